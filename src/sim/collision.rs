//! Collision and boundary checks
//!
//! Boxes are compared as world-space AABBs. The vehicle's box is rotated by
//! its heading, so its AABB is the bound of the rotated footprint.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{EndReason, GameState, Obstacle, Vehicle};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Closed-interval overlap on all three axes (touching counts)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// World AABB of the vehicle box after yaw rotation
pub fn vehicle_aabb(vehicle: &Vehicle) -> Aabb {
    let (sin, cos) = vehicle.heading.sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let h = vehicle.half_extents;
    let half = Vec3::new(cos * h.x + sin * h.z, h.y, sin * h.x + cos * h.z);
    Aabb::from_center_half_extents(vehicle.center(), half)
}

/// World AABB of an obstacle (obstacles never rotate)
pub fn obstacle_aabb(obstacle: &Obstacle) -> Aabb {
    Aabb::from_center_half_extents(obstacle.center(), obstacle.half_extents)
}

/// Index of the first obstacle the vehicle overlaps
pub fn first_collision(vehicle: &Vehicle, obstacles: &[Obstacle]) -> Option<usize> {
    let vehicle_box = vehicle_aabb(vehicle);
    obstacles
        .iter()
        .position(|o| obstacle_aabb(o).intersects(&vehicle_box))
}

/// True once the vehicle is strictly outside the lane band
#[inline]
pub fn is_off_road(vehicle: &Vehicle, lane_half_width: f32) -> bool {
    vehicle.pos.x.abs() > lane_half_width
}

/// Terminal condition for the current positions, collision first
pub fn check_termination(state: &GameState) -> Option<EndReason> {
    if let Some(obstacle) = first_collision(&state.vehicle, &state.obstacles) {
        return Some(EndReason::Collision { obstacle });
    }
    if is_off_road(&state.vehicle, state.tuning.round.lane_half_width) {
        return Some(EndReason::OffRoad);
    }
    None
}
