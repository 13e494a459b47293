//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles by index)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod round;
pub mod state;
pub mod tick;
pub mod traffic;
pub mod vehicle;

pub use camera::{CameraPose, follow};
pub use collision::{Aabb, check_termination, first_collision, is_off_road};
pub use state::{EndReason, GameState, Obstacle, RoundPhase, RoundState, Vehicle};
pub use tick::{FixedStep, TickInput, camera_pose, tick};
pub use vehicle::Controls;
