//! Spin state machine
//!
//! `Idle -> Spinning -> Settled -> Idle`. The controller never measures time: the
//! renderer animates to the emitted target and reports back via
//! [`SpinController::on_animation_complete`].

use std::sync::mpsc::{Receiver, Sender, channel};

use rand_pcg::Pcg32;

use super::geometry;
use super::state::{RngState, SpinEvent, SpinPhase, SpinSettled, SpinStarted, SpinState};
use crate::catalog::{PrizeCatalog, PrizeId};
use crate::error::{CatalogError, NotReadyReason, Result, WheelError};
use crate::selection;
use crate::settings::WheelSettings;

/// External "may the wheel spin now" check (e.g. a verification step)
pub trait SpinGate {
    fn is_gate_open(&self) -> bool;
}

impl<F: Fn() -> bool> SpinGate for F {
    fn is_gate_open(&self) -> bool {
        self()
    }
}

/// Drives one wheel through its spin lifecycle
pub struct SpinController {
    catalog: PrizeCatalog,
    settings: WheelSettings,
    state: SpinState,
    rng_state: RngState,
    rng: Pcg32,
    gate: Option<Box<dyn SpinGate>>,
    subscribers: Vec<Sender<SpinEvent>>,
}

impl SpinController {
    /// Create a controller seeded from OS entropy
    pub fn new(catalog: PrizeCatalog, settings: WheelSettings) -> Self {
        Self::with_rng_state(catalog, settings, RngState::from_entropy())
    }

    /// Create a controller with a fixed seed (reproducible draws and jitter)
    pub fn with_seed(catalog: PrizeCatalog, settings: WheelSettings, seed: u64) -> Self {
        Self::with_rng_state(catalog, settings, RngState::new(seed))
    }

    fn with_rng_state(catalog: PrizeCatalog, settings: WheelSettings, rng_state: RngState) -> Self {
        if let Err(e) = catalog.validate() {
            log::warn!("Wheel created with invalid catalog: {}", e);
        }
        Self {
            rng: rng_state.to_rng(),
            rng_state,
            catalog,
            settings,
            state: SpinState::default(),
            gate: None,
            subscribers: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &PrizeCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> SpinPhase {
        self.state.phase
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    /// Replace the catalog. Refused while spinning; an invalid catalog is stored anyway
    /// and reported, leaving the wheel unspinnable until it is fixed.
    pub fn load_catalog(&mut self, catalog: PrizeCatalog) -> Result<()> {
        if self.state.phase == SpinPhase::Spinning {
            return Err(WheelError::NotReady(NotReadyReason::Spinning));
        }
        let validation = catalog.validate();
        self.catalog = catalog;
        match validation {
            Ok(()) => {
                log::info!(
                    "Loaded catalog: {} prizes, {:?} mode",
                    self.catalog.len(),
                    self.catalog.mode
                );
                Ok(())
            }
            Err(e) => {
                log::warn!("Loaded invalid catalog: {}", e);
                Err(e.into())
            }
        }
    }

    /// Mutable access for edits between spins (`None` while spinning)
    pub fn catalog_mut(&mut self) -> Option<&mut PrizeCatalog> {
        match self.state.phase {
            SpinPhase::Spinning => None,
            _ => Some(&mut self.catalog),
        }
    }

    pub fn set_settings(&mut self, settings: WheelSettings) {
        self.settings = settings;
    }

    pub fn set_gate(&mut self, gate: impl SpinGate + 'static) {
        self.gate = Some(Box::new(gate));
    }

    pub fn clear_gate(&mut self) {
        self.gate = None;
    }

    /// Receive lifecycle events. Dropped receivers are pruned on the next emit.
    pub fn subscribe(&mut self) -> Receiver<SpinEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// True when a spin could start right now (ignores the gate)
    pub fn can_spin(&self) -> bool {
        self.state.phase == SpinPhase::Idle && self.catalog.validate().is_ok()
    }

    fn check_ready(&self) -> std::result::Result<(), NotReadyReason> {
        match self.state.phase {
            SpinPhase::Idle => {}
            SpinPhase::Spinning => return Err(NotReadyReason::Spinning),
            SpinPhase::Settled => return Err(NotReadyReason::AwaitingAcknowledge),
        }
        self.catalog
            .validate()
            .map_err(NotReadyReason::InvalidCatalog)?;
        if let Some(gate) = &self.gate {
            if !gate.is_gate_open() {
                return Err(NotReadyReason::GateClosed);
            }
        }
        Ok(())
    }

    /// Start a spin with the configured number of base turns
    pub fn spin(&mut self, winner: Option<PrizeId>) -> Result<SpinStarted> {
        self.begin_spin(winner, self.settings.base_turns)
    }

    /// Start a spin toward `winner`, or a locally drawn winner when `None`.
    ///
    /// On any error the state is left untouched.
    pub fn begin_spin(&mut self, winner: Option<PrizeId>, base_turns: i32) -> Result<SpinStarted> {
        if let Err(reason) = self.check_ready() {
            log::warn!("Spin refused: {}", reason);
            return Err(WheelError::NotReady(reason));
        }

        let winner = match winner {
            Some(id) => selection::accept_external(&self.catalog, id)?,
            // check_ready has validated the catalog
            None => selection::draw_validated(&self.catalog, &mut self.rng)?,
        };
        let final_angle = self.aim(winner, base_turns, self.state.cumulative_angle)?;

        self.state.pending_winner = Some(winner);
        self.state.final_angle = Some(final_angle);
        self.state.spin_turns = Some(base_turns);
        self.state.phase = SpinPhase::Spinning;

        let started = self.animation(final_angle);
        log::info!(
            "Spin started: prize {} -> {:.2} deg over {} ms",
            winner,
            final_angle,
            started.duration_ms
        );
        self.emit(SpinEvent::Started(started.clone()));
        Ok(started)
    }

    /// Point the spin in flight at a different winner (e.g. a late backend answer).
    ///
    /// Keeps the turn count and direction the spin was started with.
    pub fn retarget(&mut self, winner: PrizeId) -> Result<SpinStarted> {
        let (current, base_turns) = match (
            self.state.phase,
            self.state.final_angle,
            self.state.spin_turns,
        ) {
            (SpinPhase::Spinning, Some(angle), Some(turns)) => (angle, turns),
            (phase, _, _) => {
                return Err(WheelError::InvalidTransition {
                    phase,
                    operation: "retarget",
                });
            }
        };

        let winner = selection::accept_external(&self.catalog, winner)?;
        let final_angle = self.aim(winner, base_turns, current)?;

        self.state.pending_winner = Some(winner);
        self.state.final_angle = Some(final_angle);

        let started = self.animation(final_angle);
        log::info!("Spin retargeted: prize {} -> {:.2} deg", winner, final_angle);
        self.emit(SpinEvent::Retargeted(started.clone()));
        Ok(started)
    }

    /// Renderer callback: the animation reached its target
    pub fn on_animation_complete(&mut self) -> Result<SpinSettled> {
        let (winner, final_angle) = match (
            self.state.phase,
            self.state.pending_winner,
            self.state.final_angle,
        ) {
            (SpinPhase::Spinning, Some(winner), Some(angle)) => (winner, angle),
            (phase, _, _) => {
                return Err(WheelError::InvalidTransition {
                    phase,
                    operation: "complete animation",
                });
            }
        };

        let prize = self
            .catalog
            .get(winner)
            .cloned()
            .ok_or(WheelError::UnknownPrizeId(winner))?;

        self.state.cumulative_angle = crate::normalize_degrees(final_angle);
        self.state.pending_winner = None;
        self.state.final_angle = None;
        self.state.spin_turns = None;
        self.state.phase = SpinPhase::Settled;

        log::info!(
            "Spin settled on prize {} at {:.2} deg",
            prize.id,
            self.state.cumulative_angle
        );
        let settled = SpinSettled { prize };
        self.emit(SpinEvent::Settled(settled.clone()));
        Ok(settled)
    }

    /// Caller has handled the result; ready the wheel for the next spin
    pub fn acknowledge(&mut self) -> Result<()> {
        if self.state.phase != SpinPhase::Settled {
            return Err(WheelError::InvalidTransition {
                phase: self.state.phase,
                operation: "acknowledge",
            });
        }
        self.state.phase = SpinPhase::Idle;
        Ok(())
    }

    /// Terminal rotation for `winner` relative to `prev`
    fn aim(&mut self, winner: PrizeId, base_turns: i32, prev: f64) -> Result<f64> {
        let n = self.catalog.len();
        if n == 0 {
            return Err(CatalogError::Empty.into());
        }
        let index = self
            .catalog
            .position(winner)
            .ok_or(WheelError::UnknownPrizeId(winner))?;

        let jitter = geometry::sample_jitter(&mut self.rng, n);
        let final_angle = geometry::terminal_angle(index, n, jitter, base_turns, prev);
        log::debug!(
            "aim: index={} n={} jitter={:.3} turns={} prev={:.3} final={:.3}",
            index,
            n,
            jitter,
            base_turns,
            prev,
            final_angle
        );
        Ok(final_angle)
    }

    fn animation(&self, target_angle: f64) -> SpinStarted {
        SpinStarted {
            target_angle,
            duration_ms: self.settings.duration_ms,
            easing: self.settings.easing.clone(),
        }
    }

    fn emit(&mut self, event: SpinEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
