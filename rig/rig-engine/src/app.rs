//! Application shell: simulator modules and the update loop.
//!
//! The real engine owns stepping; this shell only models the host
//! surface the entry point drives: insert modules, add scenes, then
//! call [`Application::update`] until it reports completion.

use tracing::info;

use crate::scene::Scene;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of simulator module inserted into the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModuleKind {
    /// Rigid-body and cable dynamics.
    Dynamics,
    /// Rendering and visualization.
    Graphics,
}

/// An opaque simulator module descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulatorModule {
    kind: ModuleKind,
}

impl SimulatorModule {
    /// The dynamics module.
    #[must_use]
    pub fn dynamics() -> Self {
        Self {
            kind: ModuleKind::Dynamics,
        }
    }

    /// The graphics module.
    #[must_use]
    pub fn graphics() -> Self {
        Self {
            kind: ModuleKind::Graphics,
        }
    }

    /// The module kind.
    #[must_use]
    pub fn kind(&self) -> ModuleKind {
        self.kind
    }
}

/// The engine application: modules, scenes, and the update loop.
#[derive(Debug, Clone, Default)]
pub struct Application {
    modules: Vec<SimulatorModule>,
    scenes: Vec<Scene>,
    tick: u64,
    step_limit: Option<u64>,
    shutdown: bool,
}

impl Application {
    /// Create an application with no modules or scenes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the update loop after the given number of ticks.
    ///
    /// Without a limit the loop runs until [`request_shutdown`]
    /// (the host's shutdown signal in a real deployment).
    ///
    /// [`request_shutdown`]: Self::request_shutdown
    #[must_use]
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Insert a simulator module.
    pub fn insert_module(&mut self, module: SimulatorModule) {
        info!(kind = ?module.kind(), "inserted simulator module");
        self.modules.push(module);
    }

    /// The inserted modules.
    #[must_use]
    pub fn modules(&self) -> &[SimulatorModule] {
        &self.modules
    }

    /// Add a scene to simulate.
    pub fn add_scene(&mut self, scene: Scene) {
        self.scenes.push(scene);
    }

    /// The added scenes.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Signal the loop to stop after the current tick.
    pub fn request_shutdown(&mut self) {
        self.shutdown = true;
    }

    /// Advance one tick.
    ///
    /// Returns `false` once the host has signalled shutdown or the
    /// step limit is reached.
    pub fn update(&mut self) -> bool {
        if self.shutdown {
            return false;
        }
        if let Some(limit) = self.step_limit {
            if self.tick >= limit {
                return false;
            }
        }
        self.tick += 1;
        true
    }

    /// Ticks advanced so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_step_limit_ends_loop() {
        let mut app = Application::new().with_step_limit(3);
        let mut steps = 0;
        while app.update() {
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(app.tick(), 3);
    }

    #[test]
    fn test_shutdown_ends_loop() {
        let mut app = Application::new();
        assert!(app.update());
        app.request_shutdown();
        assert!(!app.update());
    }

    #[test]
    fn test_module_insertion() {
        let mut app = Application::new();
        app.insert_module(SimulatorModule::dynamics());
        app.insert_module(SimulatorModule::graphics());
        assert_eq!(app.modules().len(), 2);
        assert_eq!(app.modules()[0].kind(), ModuleKind::Dynamics);
    }
}
