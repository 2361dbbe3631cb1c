//! Keyboard mapping for the crane motors.
//!
//! Holding a key drives one motor at a fixed speed; releasing it stops
//! that motor. Shift picks the positive direction (boom up, boom out,
//! winch out), plain keys the negative one, and Alt doubles the speed.

use crate::crane::MotorControl;

/// Shift modifier bit.
pub const SHIFT_MASK: u32 = 1 << 0;

/// Alt modifier bit.
pub const ALT_MASK: u32 = 1 << 1;

/// Key driving the boom elongation slider.
pub const ELONGATION_KEY: char = '7';

/// Key driving the boom elevation hinge.
pub const ELEVATION_KEY: char = '8';

/// Key driving the winch.
pub const WINCH_KEY: char = '9';

const ELONGATION_SPEED: f64 = 0.5;
const ELEVATION_SPEED: f64 = 0.1;
const WINCH_SPEED: f64 = 0.5;

/// Maps key presses and releases to motor velocity commands.
#[derive(Debug, Clone, Default)]
pub struct KeyboardControls {
    descriptions: Vec<(String, String)>,
}

impl KeyboardControls {
    /// Create the mapping with its user-facing key descriptions.
    #[must_use]
    pub fn new() -> Self {
        let describe = |key: String, what: &str| (key, what.to_owned());
        Self {
            descriptions: vec![
                describe(
                    format!("Shift+{ELONGATION_KEY}"),
                    "Hold to extend the telescopic section of the crane (boom out)",
                ),
                describe(
                    ELONGATION_KEY.to_string(),
                    "Hold to retract the telescopic section of the crane (boom in)",
                ),
                describe(
                    format!("Shift+{ELEVATION_KEY}"),
                    "Hold to lift the boom of the crane (boom up)",
                ),
                describe(
                    ELEVATION_KEY.to_string(),
                    "Hold to lower the boom of the crane (boom down)",
                ),
                describe(
                    format!("Shift+{WINCH_KEY}"),
                    "Hold to winch out the cable of the crane",
                ),
                describe(
                    WINCH_KEY.to_string(),
                    "Hold to winch in the cable of the crane",
                ),
                describe(
                    "Alt".to_owned(),
                    "Hold together with the keys above to double the speed",
                ),
            ],
        }
    }

    /// User-facing key descriptions, in display order.
    #[must_use]
    pub fn descriptions(&self) -> &[(String, String)] {
        &self.descriptions
    }

    /// Handle a key press: start the mapped motor.
    ///
    /// Unmapped keys are ignored. The command goes through
    /// [`MotorControl`], so a press on a crane that lost the joint is
    /// the crane's problem to log, not ours.
    pub fn on_key_pressed(&self, key: char, modifiers: u32, motors: &mut dyn MotorControl) {
        let direction = if modifiers & SHIFT_MASK != 0 { 1.0 } else { -1.0 };
        let scale = if modifiers & ALT_MASK != 0 { 2.0 } else { 1.0 };
        let factor = direction * scale;

        match key {
            ELONGATION_KEY => motors.set_elongation_speed(factor * ELONGATION_SPEED),
            ELEVATION_KEY => motors.set_elevation_speed(factor * ELEVATION_SPEED),
            WINCH_KEY => motors.set_winch_speed(factor * WINCH_SPEED),
            _ => {}
        }
    }

    /// Handle a key release: stop the mapped motor, whatever the
    /// modifiers were.
    pub fn on_key_released(&self, key: char, motors: &mut dyn MotorControl) {
        match key {
            ELONGATION_KEY => motors.set_elongation_speed(0.0),
            ELEVATION_KEY => motors.set_elevation_speed(0.0),
            WINCH_KEY => motors.set_winch_speed(0.0),
            _ => {}
        }
    }
}
