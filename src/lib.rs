//! Dash Courier - A 3D delivery driving mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, traffic, collisions, round state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native input adapters
//! - `tuning`: Data-driven vehicle and traffic parameters
//! - `hud`: Mapping from game state to display surfaces

pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{GameTuning, VehicleVariant};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one reference display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// `SIM_DT` as a wall-clock span, rounded up so 60 steps cover a second
    pub const SIM_STEP: std::time::Duration = std::time::Duration::from_nanos(16_666_667);
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Height of box centres above the ground plane
    pub const GROUND_HEIGHT: f32 = 0.5;
    /// Ground plane edge length
    pub const GROUND_SIZE: f32 = 100.0;
    /// Off-road threshold on |x|
    pub const LANE_HALF_WIDTH: f32 = 10.0;

    /// Camera offset behind the vehicle
    pub const CAMERA_HEIGHT: f32 = 6.0;
    pub const CAMERA_BACK: f32 = 10.0;
    /// Vertical field of view (degrees)
    pub const CAMERA_FOV_DEG: f32 = 75.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;

    /// Round defaults
    pub const SHIFT_SECONDS: u32 = 180;
    pub const FRESHNESS_MAX: f32 = 100.0;
    pub const FRESHNESS_DECAY: f32 = 0.05;
    pub const STARTING_RATING: u8 = 5;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit forward direction on the ground plane (x, z) for a heading.
///
/// Heading 0 faces -Z; positive heading turns toward -X.
#[inline]
pub fn heading_forward(heading: f32) -> Vec2 {
    Vec2::new(-heading.sin(), -heading.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!(normalize_angle(PI) < PI);
    }

    #[test]
    fn test_heading_forward() {
        let f = heading_forward(0.0);
        assert!(f.x.abs() < 1e-6);
        assert!((f.y + 1.0).abs() < 1e-6);

        let f = heading_forward(FRAC_PI_2);
        assert!((f.x + 1.0).abs() < 1e-6);
    }
}
