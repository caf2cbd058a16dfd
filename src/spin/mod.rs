//! Spin lifecycle module
//!
//! Turns a winner into a rotation target and tracks the wheel across spins:
//! - Deterministic given the RNG seed
//! - No clocks: the renderer owns animation time
//! - No rendering or platform dependencies

pub mod controller;
pub mod geometry;
pub mod handle;
pub mod state;

pub use controller::{SpinController, SpinGate};
pub use geometry::{Sector, WheelGeometry, sector_at_pointer};
pub use handle::WheelHandle;
pub use state::{RngState, SpinEvent, SpinPhase, SpinSettled, SpinStarted, SpinState};
