//! Vehicle kinematics
//!
//! One call = one fixed tick. Speed is unclamped; drag is the only thing
//! pulling it back toward zero.

use super::state::Vehicle;
use crate::tuning::VehicleTuning;
use crate::{heading_forward, normalize_angle};

/// Driver controls sampled for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Controls {
    pub accelerating: bool,
    pub braking: bool,
    /// -1 (full left) ..= 1 (full right)
    pub steer_axis: f32,
}

/// Integrate speed, heading and position for one tick
pub fn step(vehicle: &mut Vehicle, controls: Controls, tuning: &VehicleTuning) {
    if controls.accelerating {
        vehicle.speed += tuning.accel_rate;
    }
    if controls.braking {
        vehicle.speed -= tuning.brake_rate;
    }
    vehicle.speed *= tuning.drag;

    let steer = controls.steer_axis.clamp(-1.0, 1.0);
    vehicle.heading = normalize_angle(vehicle.heading - steer * tuning.turn_rate);

    vehicle.pos += heading_forward(vehicle.heading) * vehicle.speed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{GameTuning, VehicleVariant};
    use proptest::prelude::*;

    fn car() -> (Vehicle, VehicleTuning) {
        let tuning = GameTuning::for_variant(VehicleVariant::Car).vehicle;
        (Vehicle::new(tuning.half_extents), tuning)
    }

    #[test]
    fn test_throttle_matches_iterated_recurrence() {
        let (mut vehicle, tuning) = car();
        let throttle = Controls {
            accelerating: true,
            ..Default::default()
        };

        let mut expected = 0.0_f32;
        for _ in 0..50 {
            step(&mut vehicle, throttle, &tuning);
            expected = (expected + tuning.accel_rate) * tuning.drag;
        }
        assert!((vehicle.speed - expected).abs() < 1e-6);
    }

    #[test]
    fn test_throttle_converges_to_top_speed() {
        let (mut vehicle, tuning) = car();
        let throttle = Controls {
            accelerating: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            step(&mut vehicle, throttle, &tuning);
        }
        let limit = tuning.accel_rate * tuning.drag / (1.0 - tuning.drag);
        assert!((vehicle.speed - limit).abs() < 1e-3);
    }

    #[test]
    fn test_coasting_decays_without_reversing() {
        let (mut vehicle, tuning) = car();
        vehicle.speed = 0.4;
        let mut last = vehicle.speed;
        for _ in 0..500 {
            step(&mut vehicle, Controls::default(), &tuning);
            assert!(vehicle.speed >= 0.0);
            assert!(vehicle.speed <= last);
            assert!((vehicle.speed - last * tuning.drag).abs() < 1e-6);
            last = vehicle.speed;
        }
    }

    #[test]
    fn test_braking_from_rest_reverses() {
        let (mut vehicle, tuning) = car();
        let brake = Controls {
            braking: true,
            ..Default::default()
        };
        step(&mut vehicle, brake, &tuning);
        assert!(vehicle.speed < 0.0);
        // Reversing moves toward +Z at heading 0
        assert!(vehicle.pos.y > 0.0);
    }

    #[test]
    fn test_forward_motion_is_negative_z() {
        let (mut vehicle, tuning) = car();
        vehicle.speed = 1.0;
        step(&mut vehicle, Controls::default(), &tuning);
        assert!(vehicle.pos.x.abs() < 1e-6);
        assert!((vehicle.pos.y + tuning.drag).abs() < 1e-6);
    }

    #[test]
    fn test_steer_right_decreases_heading() {
        let (mut vehicle, tuning) = car();
        let right = Controls {
            steer_axis: 1.0,
            ..Default::default()
        };
        step(&mut vehicle, right, &tuning);
        assert!((vehicle.heading + tuning.turn_rate).abs() < 1e-6);
    }

    #[test]
    fn test_steer_is_clamped() {
        let (mut vehicle, tuning) = car();
        let wild = Controls {
            steer_axis: 5.0,
            ..Default::default()
        };
        step(&mut vehicle, wild, &tuning);
        assert!((vehicle.heading + tuning.turn_rate).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_position_stays_finite(
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), -1.0f32..=1.0), 1..400)
        ) {
            let (mut vehicle, tuning) = car();
            for (accelerating, braking, steer_axis) in inputs {
                step(&mut vehicle, Controls { accelerating, braking, steer_axis }, &tuning);
                prop_assert!(vehicle.pos.is_finite());
                prop_assert!(vehicle.speed.is_finite());
            }
        }

        #[test]
        fn prop_zero_input_preserves_sign(start in -5.0f32..5.0) {
            let (mut vehicle, tuning) = car();
            vehicle.speed = start;
            for _ in 0..100 {
                step(&mut vehicle, Controls::default(), &tuning);
                prop_assert!(vehicle.speed == 0.0 || vehicle.speed.signum() == start.signum());
            }
            prop_assert!(vehicle.speed.abs() <= start.abs());
        }
    }
}
