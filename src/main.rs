//! Fortune Wheel demo
//!
//! Headless walk-through of two wheels: a probability wheel behind a verification gate,
//! and a ticket-weighted wheel aimed at winners chosen elsewhere. A stand-in renderer
//! drains spin events and reports each animation as finished.
//!
//! Usage: `fortune-wheel [settings.json]`

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use fortune_wheel::error::Result;
use fortune_wheel::spin::SpinSettled;
use fortune_wheel::{
    PrizeCatalog, PrizeEntry, PrizeId, SpinController, SpinEvent, WeightMode, WheelHandle,
    WheelSettings,
};

/// How long the simulated verification takes before the gate opens
const VERIFY_DELAY: Duration = Duration::from_millis(300);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Fortune Wheel demo starting...");

    if let Err(e) = run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => WheelSettings::load(path)?,
        None => WheelSettings::default(),
    };

    canvas_wheel(settings.clone())?;
    image_wheel(settings)?;
    Ok(())
}

fn canvas_prizes() -> PrizeCatalog {
    let prize = |id: u64, name: &str, probability: f64| {
        PrizeEntry::new(id, probability)
            .with_label(name)
            .with_payload(serde_json::json!(format!("{}'s value", name)))
    };
    PrizeCatalog::new(
        vec![
            prize(1, "Blue", 10.0),
            prize(2, "Red", 10.0),
            prize(3, "Yellow", 10.0),
            prize(4, "Brown", 70.0),
        ],
        WeightMode::Probability,
    )
}

fn image_prizes() -> Result<PrizeCatalog> {
    Ok(PrizeCatalog::from_json(
        r#"{
            "mode": "integer",
            "entries": [
                { "id": 1, "payload": "Blue's value", "weight": 0 },
                { "id": 2, "payload": "Red's value", "weight": 1 },
                { "id": 3, "payload": "Yellow's value", "weight": 0 }
            ]
        }"#,
    )?)
}

/// Probability wheel that may only spin once verification passes
fn canvas_wheel(settings: WheelSettings) -> Result<()> {
    let mut wheel = SpinController::new(canvas_prizes(), settings);
    let events = wheel.subscribe();

    let verified_at = Instant::now() + VERIFY_DELAY;
    wheel.set_gate(move || Instant::now() >= verified_at);

    if let Err(e) = wheel.spin(None) {
        log::info!("Canvas wheel waiting for verification: {}", e);
    }
    std::thread::sleep(VERIFY_DELAY);
    log::info!("Verification passed, start to rotate");

    for _ in 0..3 {
        wheel.spin(None)?;
        let settled = render(&events, || wheel.on_animation_complete())?;
        announce("canvas", &settled);
        wheel.acknowledge()?;
    }
    Ok(())
}

/// Ticket wheel driven through a shared handle, winners picked by the caller
fn image_wheel(settings: WheelSettings) -> Result<()> {
    let wheel = WheelHandle::new(SpinController::new(image_prizes()?, settings));
    let renderer = wheel.clone();
    let events = wheel.subscribe()?;

    for choice in [Some(PrizeId(3)), Some(PrizeId(4)), None] {
        match wheel.spin(choice) {
            Ok(_) => {
                let settled = render(&events, || renderer.on_animation_complete())?;
                announce("image", &settled);
                wheel.acknowledge()?;
            }
            Err(e) => log::warn!("Image wheel rejected {:?}: {}", choice, e),
        }
    }
    Ok(())
}

/// Stand-in renderer: apply every pending animation, then report completion once
fn render(
    events: &Receiver<SpinEvent>,
    complete: impl FnOnce() -> Result<SpinSettled>,
) -> Result<SpinSettled> {
    for event in events.try_iter() {
        match event {
            SpinEvent::Started(anim) | SpinEvent::Retargeted(anim) => log::info!(
                "rotateZ({:.2}deg) over {:.1}s using {}",
                anim.target_angle,
                anim.duration_secs(),
                anim.easing
            ),
            SpinEvent::Settled(_) => {}
        }
    }
    complete()
}

fn announce(wheel: &str, settled: &SpinSettled) {
    println!(
        "[{}] landed on prize {} {}",
        wheel, settled.prize.id, settled.prize.payload
    );
}
