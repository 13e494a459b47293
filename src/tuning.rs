//! Gameplay tuning for the two vehicle variants.
//!
//! Keep this separate from runtime configuration (timestep, substeps) in
//! `consts`. All rates are per simulation tick at `SIM_DT`.

use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which vehicle the player drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VehicleVariant {
    #[default]
    Car,
    Motorbike,
}

impl VehicleVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleVariant::Car => "Car",
            VehicleVariant::Motorbike => "Motorbike",
        }
    }

    /// The other variant (for the in-game toggle)
    pub fn toggled(self) -> Self {
        match self {
            VehicleVariant::Car => VehicleVariant::Motorbike,
            VehicleVariant::Motorbike => VehicleVariant::Car,
        }
    }
}

impl FromStr for VehicleVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "car" => Ok(VehicleVariant::Car),
            "motorbike" | "bike" => Ok(VehicleVariant::Motorbike),
            other => Err(format!("unknown vehicle variant: {other}")),
        }
    }
}

/// Ground-plane axis an obstacle travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficAxis {
    X,
    Z,
}

/// Player vehicle handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleTuning {
    /// Speed added per tick while accelerating
    pub accel_rate: f32,
    /// Speed removed per tick while braking
    pub brake_rate: f32,
    /// Multiplicative drag applied every tick (0..1)
    pub drag: f32,
    /// Heading change per tick at full stick deflection (radians)
    pub turn_rate: f32,
    /// Box half-extents (x, y, z)
    pub half_extents: Vec3,
}

/// Traffic conveyor parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficTuning {
    /// Number of obstacles spawned per round
    pub count: usize,
    /// Axis the conveyor moves along
    pub axis: TrafficAxis,
    /// Distance advanced per tick
    pub step: f32,
    /// Wrap band: coordinates past `half_range` jump to `-half_range`
    pub half_range: f32,
    /// Obstacles spawn uniformly in [-spawn_extent, spawn_extent] on x and z
    pub spawn_extent: f32,
    /// Box half-extents (x, y, z)
    pub half_extents: Vec3,
}

/// Round timing and freshness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundTuning {
    pub shift_seconds: u32,
    pub freshness_decay: f32,
    pub lane_half_width: f32,
}

impl Default for RoundTuning {
    fn default() -> Self {
        Self {
            shift_seconds: SHIFT_SECONDS,
            freshness_decay: FRESHNESS_DECAY,
            lane_half_width: LANE_HALF_WIDTH,
        }
    }
}

/// Complete tuning bundle for one variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameTuning {
    pub variant: VehicleVariant,
    pub vehicle: VehicleTuning,
    pub traffic: TrafficTuning,
    pub round: RoundTuning,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self::for_variant(VehicleVariant::Car)
    }
}

impl GameTuning {
    pub fn for_variant(variant: VehicleVariant) -> Self {
        match variant {
            VehicleVariant::Car => Self {
                variant,
                vehicle: VehicleTuning {
                    accel_rate: 0.01,
                    brake_rate: 0.02,
                    drag: 0.98,
                    // 50 px joystick radius * 0.003 rad/px
                    turn_rate: 0.15,
                    half_extents: Vec3::new(0.5, 0.5, 1.0),
                },
                traffic: TrafficTuning {
                    count: 3,
                    axis: TrafficAxis::X,
                    step: 0.05,
                    half_range: 20.0,
                    spawn_extent: 10.0,
                    half_extents: Vec3::new(0.5, 0.5, 1.0),
                },
                round: RoundTuning::default(),
            },
            VehicleVariant::Motorbike => Self {
                variant,
                vehicle: VehicleTuning {
                    accel_rate: 0.012,
                    brake_rate: 0.025,
                    drag: 0.97,
                    turn_rate: 0.18,
                    half_extents: Vec3::new(0.25, 0.5, 0.8),
                },
                traffic: TrafficTuning {
                    count: 4,
                    axis: TrafficAxis::Z,
                    step: 0.5,
                    half_range: 100.0,
                    spawn_extent: 10.0,
                    half_extents: Vec3::new(0.5, 0.5, 1.0),
                },
                round: RoundTuning::default(),
            },
        }
    }

    /// Terminal speed under constant throttle: accel * drag / (1 - drag)
    pub fn top_speed(&self) -> f32 {
        let v = &self.vehicle;
        v.accel_rate * v.drag / (1.0 - v.drag)
    }
}
