//! Skyhop headless runner
//!
//! Plays the simulation with the demo autopilot and logs the outcome.
//!
//! Usage: `skyhop [preset] [frames] [seed] [--realtime]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use skyhop::persistence::JsonFileStore;
    use skyhop::sim::{GameEvent, GapSource, PcgGapSource, autopilot};
    use skyhop::{Clock, Preset, Scheduler, Session, SimConfig};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let realtime = args.iter().any(|a| a == "--realtime");
    let mut positional = args.iter().filter(|a| !a.starts_with("--"));

    let preset = match positional.next() {
        Some(name) => Preset::from_str(name).unwrap_or_else(|| {
            log::warn!("Unknown preset '{}', using Classic", name);
            Preset::Classic
        }),
        None => Preset::Classic,
    };
    let frames: u64 = positional.next().and_then(|s| s.parse().ok()).unwrap_or(3600);
    let seed: u64 = positional.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let config = SimConfig::from_preset(preset);
    let rng: Box<dyn GapSource + Send> = Box::new(PcgGapSource::new(seed));
    let store = JsonFileStore::new("skyhop_best.json");
    let session = match Session::new(config.clone(), rng, Box::new(store)) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Skyhop (native) starting: preset={} frames={} seed={}",
        preset.as_str(),
        frames,
        seed
    );

    let mut scheduler = Scheduler::new(session);
    let mut runs = 0u32;
    let mut top_run = 0u32;
    let mut elapsed = 0u64;
    let mut event_cursor = 0u64;
    let pacing = if realtime {
        Duration::from_micros(16_667)
    } else {
        Duration::ZERO
    };

    scheduler.run(Clock::Fixed { step: 1.0 / 60.0 }, pacing, |snapshot, input| {
        if snapshot.missed_events(event_cursor) {
            log::warn!("Event window overran; some events were dropped");
        }
        for event in snapshot.events_since(event_cursor) {
            if let GameEvent::Crashed { score } = event {
                runs += 1;
                top_run = top_run.max(*score);
                log::info!("Run {} ended with score {}", runs, score);
            }
        }
        event_cursor = snapshot.next_event_seq;
        if autopilot(snapshot, &config) {
            input.activate();
        }
        elapsed += 1;
        elapsed <= frames
    });

    let session = scheduler.session();
    println!(
        "{} runs, top run {}, best score {} ({} frames)",
        runs,
        top_run,
        session.best_score(),
        scheduler.frames()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts construct `skyhop::platform::web::WebGame` instead
}
