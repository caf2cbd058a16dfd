//! Error types for catalog validation and the spin lifecycle

use thiserror::Error;

use crate::catalog::PrizeId;
use crate::spin::SpinPhase;

/// A prize catalog that cannot be spun
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("prize catalog is empty")]
    Empty,

    #[error("prize id {id} appears more than once")]
    DuplicateId { id: PrizeId },

    #[error("prize {id} has invalid weight {weight}")]
    InvalidWeight { id: PrizeId, weight: f64 },

    /// Totals are in normalized ticket units (`100 * 10^precision` expected)
    #[error("probabilities sum to {total} tickets, expected {expected}")]
    ProbabilityMismatch { total: u64, expected: u64 },

    #[error("ticket weights sum to zero")]
    ZeroWeightTotal,

    #[error("ticket weights sum past {}", u64::MAX)]
    TicketOverflow,
}

/// Why a spin could not start
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotReadyReason {
    #[error("a spin is already in progress")]
    Spinning,

    #[error("the previous result has not been acknowledged")]
    AwaitingAcknowledge,

    #[error("the spin gate is closed")]
    GateClosed,

    #[error("catalog is invalid: {0}")]
    InvalidCatalog(CatalogError),
}

#[derive(Debug, Error)]
pub enum WheelError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("prize id {0} is not in the catalog")]
    UnknownPrizeId(PrizeId),

    #[error("wheel not ready: {0}")]
    NotReady(NotReadyReason),

    #[error("wheel is already handling another operation")]
    ConcurrentSpin,

    #[error("cannot {operation} while {phase:?}")]
    InvalidTransition {
        phase: SpinPhase,
        operation: &'static str,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl WheelError {
    /// True for the routine "try again later" rejections
    pub fn is_not_ready(&self) -> bool {
        matches!(self, WheelError::NotReady(_))
    }
}

pub type Result<T> = std::result::Result<T, WheelError>;
