//! Chase camera
//!
//! Pure function of the vehicle position. The camera sits a fixed offset
//! behind on world Z (not behind the heading) and snaps every tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::Vehicle;
use crate::consts::{CAMERA_BACK, CAMERA_HEIGHT};

/// Where the camera is and what it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

pub fn follow(vehicle: &Vehicle) -> CameraPose {
    let target = vehicle.center();
    CameraPose {
        eye: Vec3::new(target.x, CAMERA_HEIGHT, target.z - CAMERA_BACK),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_camera_tracks_vehicle() {
        let mut v = Vehicle::new(Vec3::new(0.5, 0.5, 1.0));
        v.pos = Vec2::new(3.0, -7.0);
        v.heading = 1.2;
        let pose = follow(&v);
        assert_eq!(pose.eye, Vec3::new(3.0, 6.0, -17.0));
        assert_eq!(pose.target, Vec3::new(3.0, 0.5, -7.0));
    }
}
