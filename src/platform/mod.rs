//! Platform abstraction layer
//!
//! Handles browser/native differences for input events. DOM wiring lives in
//! the binary; this module only holds the state those handlers write.

pub mod input;

pub use input::{DEFAULT_JOYSTICK_RADIUS, InputState, normalize_steer};
