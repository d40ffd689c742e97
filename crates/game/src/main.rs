//! Skyline Drive - headless run of the driving, flying and on-foot simulation.

use anyhow::{Context, Result};
use game::{CannedTips, GameConfig, ScriptedInput, Session};
use std::sync::Arc;
use std::time::Duration;

const FRAME_RATE: u32 = 60;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Skyline Drive");

    let config = GameConfig::load();
    let seconds = config.demo_seconds;
    let tips = CannedTips::builtin().context("built-in tip table")?;

    let mut session = Session::new(config, Arc::new(tips), ScriptedInput::demo());
    log::info!(
        "City ready: {} buildings, {} traffic cars",
        session.city.buildings.len(),
        session.city.traffic.len()
    );

    let summary = session.run(seconds, FRAME_RATE);
    session.tips.wait(Duration::from_millis(200));

    log::info!(
        "Session over after {} frames: {} impacts, top speed {} km/h, {} missiles, peak altitude {:.1}",
        summary.frames,
        summary.impacts,
        summary.peak_speed_kmh,
        summary.missiles_fired,
        summary.peak_altitude
    );
    if let Some(tip) = session.tips.current() {
        log::info!("Last tip - {}: {}", tip.title, tip.instruction);
    }

    Ok(())
}
