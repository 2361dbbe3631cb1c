//! A cable crane scene built on the engine facade.
//!
//! The scene has a crane with an extendable boom, a winch and two
//! guide pulleys; a load; an animated hook; and the ground. A cable
//! spools off the winch, runs over the pulleys, threads the hook's
//! ring and attaches on top of the load. The crane's three motorized
//! drives are commanded from the keyboard.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn, clippy::missing_errors_doc)]

mod crane;
mod error;
mod keyboard;
pub mod names;
mod scene;

pub use crane::{Crane, MotorControl};
pub use error::CraneError;
pub use keyboard::{
    KeyboardControls, ALT_MASK, ELEVATION_KEY, ELONGATION_KEY, SHIFT_MASK, WINCH_KEY,
};
pub use scene::CableCraneScene;

/// Result type for crane scene construction.
pub type Result<T> = std::result::Result<T, CraneError>;
