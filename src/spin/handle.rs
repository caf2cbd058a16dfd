//! Shared wheel handle for callback-driven hosts
//!
//! Renderers and UI callbacks each hold a clone. Operations never block: re-entering the
//! wheel while another operation is running fails with [`WheelError::ConcurrentSpin`].

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Receiver;

use super::controller::{SpinController, SpinGate};
use super::state::{SpinEvent, SpinPhase, SpinSettled, SpinStarted};
use crate::catalog::{PrizeCatalog, PrizeId};
use crate::error::{Result, WheelError};

#[derive(Clone)]
pub struct WheelHandle {
    inner: Rc<RefCell<SpinController>>,
}

impl WheelHandle {
    pub fn new(controller: SpinController) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    /// Run `f` with exclusive access to the controller
    pub fn with<T>(&self, f: impl FnOnce(&mut SpinController) -> Result<T>) -> Result<T> {
        let mut controller = self
            .inner
            .try_borrow_mut()
            .map_err(|_| WheelError::ConcurrentSpin)?;
        f(&mut controller)
    }

    pub fn load_catalog(&self, catalog: PrizeCatalog) -> Result<()> {
        self.with(|c| c.load_catalog(catalog))
    }

    pub fn can_spin(&self) -> bool {
        self.inner
            .try_borrow()
            .map(|c| c.can_spin())
            .unwrap_or(false)
    }

    pub fn phase(&self) -> Result<SpinPhase> {
        self.inner
            .try_borrow()
            .map(|c| c.phase())
            .map_err(|_| WheelError::ConcurrentSpin)
    }

    pub fn set_gate(&self, gate: impl SpinGate + 'static) -> Result<()> {
        self.with(|c| {
            c.set_gate(gate);
            Ok(())
        })
    }

    pub fn subscribe(&self) -> Result<Receiver<SpinEvent>> {
        self.with(|c| Ok(c.subscribe()))
    }

    pub fn begin_spin(&self, winner: Option<PrizeId>, base_turns: i32) -> Result<SpinStarted> {
        self.with(|c| c.begin_spin(winner, base_turns))
    }

    pub fn spin(&self, winner: Option<PrizeId>) -> Result<SpinStarted> {
        self.with(|c| c.spin(winner))
    }

    pub fn retarget(&self, winner: PrizeId) -> Result<SpinStarted> {
        self.with(|c| c.retarget(winner))
    }

    pub fn on_animation_complete(&self) -> Result<SpinSettled> {
        self.with(|c| c.on_animation_complete())
    }

    pub fn acknowledge(&self) -> Result<()> {
        self.with(|c| c.acknowledge())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PrizeEntry, WeightMode};
    use crate::settings::WheelSettings;

    fn handle() -> WheelHandle {
        let catalog = PrizeCatalog::new(
            vec![PrizeEntry::new(1, 50.0), PrizeEntry::new(2, 50.0)],
            WeightMode::Probability,
        );
        WheelHandle::new(SpinController::with_seed(
            catalog,
            WheelSettings::default(),
            4,
        ))
    }

    #[test]
    fn test_reentrant_call_is_rejected() {
        let wheel = handle();
        let inner = wheel.clone();

        let result = wheel.with(|c| {
            c.begin_spin(None, 10)?;
            // a renderer completing synchronously from inside the operation
            Ok(inner.on_animation_complete())
        });

        let nested = result.unwrap();
        assert!(matches!(nested, Err(WheelError::ConcurrentSpin)));
        assert_eq!(wheel.phase().unwrap(), SpinPhase::Spinning);
        assert!(!inner.can_spin());
    }

    #[test]
    fn test_clones_share_state() {
        let wheel = handle();
        let renderer = wheel.clone();
        let events = wheel.subscribe().unwrap();

        wheel.spin(Some(PrizeId(2))).unwrap();
        assert!(matches!(events.try_recv().unwrap(), SpinEvent::Started(_)));

        let settled = renderer.on_animation_complete().unwrap();
        assert_eq!(settled.prize.id, PrizeId(2));
        assert_eq!(wheel.phase().unwrap(), SpinPhase::Settled);

        wheel.acknowledge().unwrap();
        assert!(renderer.can_spin());
    }
}
