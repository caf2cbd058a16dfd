//! Prize catalog and weight normalization
//!
//! Entry order is significant: entry `i` owns sector `i` of the wheel, counted clockwise
//! from the 12 o'clock pointer.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Deepest decimal precision honoured for probability weights
pub const MAX_PROBABILITY_DECIMALS: u32 = 4;

/// Required probability total (percent)
pub const PROBABILITY_TOTAL: u64 = 100;

/// Stable prize identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrizeId(pub u64);

impl fmt::Display for PrizeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PrizeId {
    fn from(id: u64) -> Self {
        PrizeId(id)
    }
}

/// How entry weights are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightMode {
    /// Weights are percentages and must total 100
    #[default]
    Probability,
    /// Weights are integer ticket counts with any positive total
    Integer,
}

/// A single prize on the wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeEntry {
    pub id: PrizeId,
    #[serde(default)]
    pub label: String,
    /// Result data handed back on settle, never interpreted here
    #[serde(default)]
    pub payload: serde_json::Value,
    pub weight: f64,
}

impl PrizeEntry {
    pub fn new(id: impl Into<PrizeId>, weight: f64) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            payload: serde_json::Value::Null,
            weight,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Ordered set of prizes plus the weighting mode they are read in
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrizeCatalog {
    #[serde(default)]
    pub mode: WeightMode,
    pub entries: Vec<PrizeEntry>,
}

impl PrizeCatalog {
    pub fn new(entries: Vec<PrizeEntry>, mode: WeightMode) -> Self {
        Self { mode, entries }
    }

    /// Parse a `{ "mode": ..., "entries": [...] }` document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Angular width of one sector in degrees (0 for an empty catalog)
    pub fn sector_angle(&self) -> f64 {
        crate::spin::geometry::sector_angle(self.len())
    }

    pub fn position(&self, id: PrizeId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: PrizeId) -> Option<&PrizeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: PrizeId) -> bool {
        self.position(id).is_some()
    }

    /// Fractional digit count used to normalize probability weights, clamped to 4.
    /// Always 0 in integer mode.
    pub fn precision(&self) -> u32 {
        match self.mode {
            WeightMode::Integer => 0,
            WeightMode::Probability => self
                .entries
                .iter()
                .map(|e| fractional_digits(e.weight))
                .max()
                .unwrap_or(0)
                .min(MAX_PROBABILITY_DECIMALS),
        }
    }

    /// Multiplier turning a weight into whole tickets (`10^precision`)
    pub fn scale(&self) -> u64 {
        10u64.pow(self.precision())
    }

    /// Ticket count contributed by each entry, in catalog order
    pub fn ticket_counts(&self) -> Vec<u64> {
        let scale = self.scale() as f64;
        self.entries
            .iter()
            .map(|e| ticket_count(e.weight, scale))
            .collect()
    }

    /// Sum of all ticket counts, `TicketOverflow` if it does not fit in a `u64`
    pub fn total_tickets(&self) -> Result<u64, CatalogError> {
        self.ticket_counts()
            .into_iter()
            .try_fold(0u64, |total, count| total.checked_add(count))
            .ok_or(CatalogError::TicketOverflow)
    }

    /// Check the catalog can be spun
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId { id: entry.id });
            }
        }

        for entry in &self.entries {
            let w = entry.weight;
            let bad = !w.is_finite()
                || w < 0.0
                || (self.mode == WeightMode::Integer && w.fract() != 0.0);
            if bad {
                return Err(CatalogError::InvalidWeight {
                    id: entry.id,
                    weight: w,
                });
            }
        }

        match self.mode {
            WeightMode::Probability => {
                let deepest = self
                    .entries
                    .iter()
                    .map(|e| fractional_digits(e.weight))
                    .max()
                    .unwrap_or(0);
                if deepest > MAX_PROBABILITY_DECIMALS {
                    log::debug!(
                        "probability weights use {} decimals, clamping to {}",
                        deepest,
                        MAX_PROBABILITY_DECIMALS
                    );
                }

                let total = self.total_tickets()?;
                let expected = PROBABILITY_TOTAL * self.scale();
                if total != expected {
                    return Err(CatalogError::ProbabilityMismatch { total, expected });
                }
            }
            WeightMode::Integer => {
                if self.total_tickets()? == 0 {
                    return Err(CatalogError::ZeroWeightTotal);
                }
            }
        }

        Ok(())
    }
}

/// Number of digits after the decimal point in the shortest rendering of `value`
pub fn fractional_digits(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let text = value.to_string();
    match text.split_once('.') {
        Some((_, frac)) => frac.len() as u32,
        None => 0,
    }
}

#[inline]
fn ticket_count(weight: f64, scale: f64) -> u64 {
    if weight.is_finite() && weight > 0.0 {
        (weight * scale).round() as u64
    } else {
        0
    }
}
