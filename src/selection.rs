//! Winner selection
//!
//! Stateless: every function is a pure function of the catalog, the optional external
//! winner, and the injected RNG. The RNG draw is the only non-deterministic input.

use rand::Rng;

use crate::catalog::{PrizeCatalog, PrizeId};
use crate::error::{CatalogError, Result, WheelError};

/// Weighted ticket pool
///
/// Stores the exclusive upper ticket bound of each entry instead of one slot per ticket,
/// so ticket `t` belongs to the first entry whose bound exceeds `t`. Zero-weight entries
/// own no tickets and can never be drawn.
#[derive(Debug, Clone)]
pub struct TicketPool {
    bounds: Vec<(u64, PrizeId)>,
}

impl TicketPool {
    pub fn build(catalog: &PrizeCatalog) -> std::result::Result<Self, CatalogError> {
        let mut end = 0u64;
        let mut bounds = Vec::with_capacity(catalog.len());
        for (entry, count) in catalog.entries.iter().zip(catalog.ticket_counts()) {
            if count == 0 {
                continue;
            }
            end = end.checked_add(count).ok_or(CatalogError::TicketOverflow)?;
            bounds.push((end, entry.id));
        }
        Ok(Self { bounds })
    }

    pub fn size(&self) -> u64 {
        self.bounds.last().map(|&(end, _)| end).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Prize owning ticket `index`, if `index < size()`
    pub fn ticket(&self, index: u64) -> Option<PrizeId> {
        let slot = self.bounds.partition_point(|&(end, _)| end <= index);
        self.bounds.get(slot).map(|&(_, id)| id)
    }

    /// Uniformly draw one ticket
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<PrizeId> {
        if self.is_empty() {
            return None;
        }
        self.ticket(rng.random_range(0..self.size()))
    }
}

/// Draw a winner locally according to the catalog weights
pub fn draw_random<R: Rng>(catalog: &PrizeCatalog, rng: &mut R) -> Result<PrizeId> {
    catalog.validate()?;
    draw_validated(catalog, rng)
}

/// Draw from a catalog the caller has already validated
pub(crate) fn draw_validated<R: Rng>(catalog: &PrizeCatalog, rng: &mut R) -> Result<PrizeId> {
    TicketPool::build(catalog)?
        .draw(rng)
        .ok_or(WheelError::Catalog(CatalogError::ZeroWeightTotal))
}

/// Validate a winner decided elsewhere (e.g. by a backend)
pub fn accept_external(catalog: &PrizeCatalog, winner: PrizeId) -> Result<PrizeId> {
    if catalog.contains(winner) {
        Ok(winner)
    } else {
        Err(WheelError::UnknownPrizeId(winner))
    }
}

/// Resolve the winner for a spin: the external id when given, otherwise a local draw
pub fn select<R: Rng>(
    catalog: &PrizeCatalog,
    winner: Option<PrizeId>,
    rng: &mut R,
) -> Result<PrizeId> {
    match winner {
        Some(id) => accept_external(catalog, id),
        None => draw_random(catalog, rng),
    }
}
