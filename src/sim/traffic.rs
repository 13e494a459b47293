//! Traffic conveyor
//!
//! Every obstacle slides the same distance along one axis each tick and
//! wraps to the far edge of the band. No lanes, no per-unit speed.

use super::state::Obstacle;
use crate::tuning::{TrafficAxis, TrafficTuning};

/// Advance one coordinate and wrap it into the band
#[inline]
pub fn advance_wrapped(coord: f32, step: f32, half_range: f32) -> f32 {
    let next = coord + step;
    if next > half_range { -half_range } else { next }
}

/// Move all obstacles one tick along the conveyor
pub fn advance(obstacles: &mut [Obstacle], tuning: &TrafficTuning) {
    for obstacle in obstacles.iter_mut() {
        let coord = match tuning.axis {
            TrafficAxis::X => &mut obstacle.pos.x,
            TrafficAxis::Z => &mut obstacle.pos.y,
        };
        *coord = advance_wrapped(*coord, tuning.step, tuning.half_range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{GameTuning, VehicleVariant};
    use glam::{Vec2, Vec3};
    use proptest::prelude::*;

    fn obstacle(x: f32, z: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, z),
            half_extents: Vec3::new(0.5, 0.5, 1.0),
        }
    }

    #[test]
    fn test_wraps_on_the_frame_it_would_exceed() {
        let tuning = GameTuning::for_variant(VehicleVariant::Motorbike).traffic;
        let mut obstacles = vec![obstacle(3.0, 99.6)];
        advance(&mut obstacles, &tuning);
        assert_eq!(obstacles[0].pos.y, -100.0);
        // Off-axis coordinate untouched
        assert_eq!(obstacles[0].pos.x, 3.0);
    }

    #[test]
    fn test_exact_boundary_does_not_wrap() {
        assert_eq!(advance_wrapped(19.5, 0.5, 20.0), 20.0);
        assert_eq!(advance_wrapped(20.0, 0.5, 20.0), -20.0);
    }

    #[test]
    fn test_car_traffic_moves_along_x() {
        let tuning = GameTuning::for_variant(VehicleVariant::Car).traffic;
        let mut obstacles = vec![obstacle(0.0, 4.0), obstacle(-5.0, -2.0)];
        advance(&mut obstacles, &tuning);
        assert!((obstacles[0].pos.x - 0.05).abs() < 1e-6);
        assert!((obstacles[1].pos.x + 4.95).abs() < 1e-6);
        assert_eq!(obstacles[0].pos.y, 4.0);
    }

    #[test]
    fn test_full_cycle_returns_to_band_start() {
        let tuning = GameTuning::for_variant(VehicleVariant::Car).traffic;
        let mut obstacles = vec![obstacle(19.99, 0.0)];
        advance(&mut obstacles, &tuning);
        assert_eq!(obstacles[0].pos.x, -20.0);
    }

    proptest! {
        #[test]
        fn prop_stays_in_band(start in -20.0f32..=20.0, ticks in 1usize..3000) {
            let tuning = GameTuning::for_variant(VehicleVariant::Car).traffic;
            let mut obstacles = vec![obstacle(start, 0.0)];
            for _ in 0..ticks {
                advance(&mut obstacles, &tuning);
                prop_assert!(obstacles[0].pos.x >= -tuning.half_range);
                prop_assert!(obstacles[0].pos.x <= tuning.half_range);
            }
        }
    }
}
