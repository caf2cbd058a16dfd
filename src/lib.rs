//! Fortune Wheel - weighted prize selection and spin targeting
//!
//! Core modules:
//! - `catalog`: Prize entries, weight modes, validation
//! - `selection`: Weighted draw or external winner validation
//! - `spin`: Rotation arithmetic and the spin state machine
//! - `settings`: Animation and spin defaults
//!
//! Drawing the wheel is left to the host: it consumes [`SpinEvent`]s and reports back
//! when its animation finishes.

pub mod catalog;
pub mod error;
pub mod selection;
pub mod settings;
pub mod spin;

pub use catalog::{PrizeCatalog, PrizeEntry, PrizeId, WeightMode};
pub use error::{CatalogError, NotReadyReason, WheelError};
pub use settings::WheelSettings;
pub use spin::{SpinController, SpinEvent, SpinGate, SpinPhase, WheelHandle};

use glam::Vec2;

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let folded = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if folded >= 360.0 { 0.0 } else { folded }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
