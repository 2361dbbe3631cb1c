//! Builds the cable crane scene, starts the winch spooling out and
//! runs the update loop for a fixed number of ticks.

use rig_crane::{CableCraneScene, KeyboardControls, SHIFT_MASK, WINCH_KEY};
use rig_engine::{Application, SimulatorModule};
use tracing::info;

/// Ticks to run before the headless loop stops on its own.
const STEP_LIMIT: u64 = 600;

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> rig_crane::Result<()> {
    let mut scene = CableCraneScene::build()?;

    let controls = KeyboardControls::new();
    for (key, action) in controls.descriptions() {
        info!(key = key.as_str(), action = action.as_str(), "key binding");
    }

    // Hold Shift+9: winch cable out for the whole run.
    controls.on_key_pressed(WINCH_KEY, SHIFT_MASK, scene.crane_mut());

    let mut application = Application::new().with_step_limit(STEP_LIMIT);
    application.insert_module(SimulatorModule::dynamics());
    #[cfg(feature = "graphics")]
    application.insert_module(SimulatorModule::graphics());

    application.add_scene(scene.description());

    while application.update() {}
    info!(ticks = application.tick(), "run finished");

    Ok(())
}
