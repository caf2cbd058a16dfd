//! Spin lifecycle state

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::catalog::{PrizeEntry, PrizeId};

/// Current phase of a wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    /// Ready for the next spin
    #[default]
    Idle,
    /// Renderer is animating toward the target angle
    Spinning,
    /// Result is final, waiting for the caller to acknowledge it
    Settled,
}

/// Per-wheel state carried across spins
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpinState {
    pub phase: SpinPhase,
    /// Last settle angle, folded into [0, 360)
    pub cumulative_angle: f64,
    /// Winner of the spin in flight
    pub pending_winner: Option<PrizeId>,
    /// Unfolded terminal angle of the spin in flight
    pub final_angle: Option<f64>,
    /// Base turns the spin in flight was started with
    pub spin_turns: Option<i32>,
}

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Lifecycle notifications for renderers and UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpinEvent {
    Started(SpinStarted),
    /// Winner changed mid-spin; animate to the new target instead
    Retargeted(SpinStarted),
    Settled(SpinSettled),
}

/// Animation instructions for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinStarted {
    /// Unfolded rotation to reach, in degrees
    pub target_angle: f64,
    pub duration_ms: u32,
    /// Easing curve name, passed through untouched
    pub easing: String,
}

impl SpinStarted {
    /// Animation duration in seconds, as CSS transitions expect
    pub fn duration_secs(&self) -> f32 {
        self.duration_ms as f32 / 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinSettled {
    pub prize: PrizeEntry,
}
