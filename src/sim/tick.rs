//! Fixed timestep simulation tick
//!
//! Order per tick: input -> kinematics -> camera -> traffic ->
//! collision/boundary -> round state. The shift countdown runs on
//! wall-clock time in `FixedStep::advance`, apart from the ticks.

use std::time::Duration;

use super::camera::{self, CameraPose};
use super::collision::check_termination;
use super::round;
use super::state::{EndReason, GameState};
use super::traffic;
use super::vehicle::{self, Controls};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Gas held
    pub accelerating: bool,
    /// Brake held
    pub braking: bool,
    /// Normalized steering, -1..=1
    pub steer_axis: f32,
    /// Take an order (one-shot)
    pub accept_order: bool,
    /// Hand over the current order (one-shot)
    pub deliver_order: bool,
}

impl TickInput {
    pub fn controls(&self) -> Controls {
        Controls {
            accelerating: self.accelerating,
            braking: self.braking,
            steer_axis: self.steer_axis,
        }
    }

    /// Drop one-shot requests after they have been consumed by a tick
    pub fn clear_one_shots(&mut self) {
        self.accept_order = false;
        self.deliver_order = false;
    }
}

/// Advance the game state by one fixed timestep.
///
/// Returns the end reason on the tick that finishes the round. Once the
/// round has ended this does nothing until `GameState::reset`.
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<EndReason> {
    if state.round.phase.is_ended() {
        return None;
    }

    state.time_ticks += 1;

    if input.accept_order {
        round::accept_order(&mut state.round);
    }
    if input.deliver_order {
        round::deliver_order(&mut state.round);
    }

    vehicle::step(&mut state.vehicle, input.controls(), &state.tuning.vehicle);
    traffic::advance(&mut state.obstacles, &state.tuning.traffic);

    let crashed = check_termination(state);

    round::decay_freshness(&mut state.round, state.tuning.round.freshness_decay);

    if let Some(reason) = crashed {
        round::end(&mut state.round, reason);
    }
    crashed
}

/// Camera pose for the current vehicle position
pub fn camera_pose(state: &GameState) -> CameraPose {
    camera::follow(&state.vehicle)
}

/// Accumulator that turns variable frame deltas into fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many ticks as `frame_dt` covers, up to `MAX_SUBSTEPS`, then
    /// take the full, unclamped `frame_dt` off the shift countdown.
    ///
    /// One-shot inputs are cleared after the first tick that sees them.
    /// Stops early on the tick that ends the round and returns its reason.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        input: &mut TickInput,
        frame_dt: f32,
    ) -> Option<EndReason> {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let ended = tick(state, input);
            self.accumulator -= SIM_DT;
            substeps += 1;
            input.clear_one_shots();

            if ended.is_some() {
                self.accumulator = 0.0;
                return ended;
            }
        }

        // Drop backlog we could not simulate this frame
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let elapsed = Duration::try_from_secs_f32(frame_dt).unwrap_or(Duration::ZERO);
        let shift_over = round::advance_clock(&mut state.round, elapsed);
        if let Some(reason) = shift_over {
            round::end(&mut state.round, reason);
            self.accumulator = 0.0;
        }
        shift_over
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, RoundPhase};
    use crate::tuning::GameTuning;
    use glam::{Vec2, Vec3};
    use proptest::prelude::*;

    /// Round with traffic parked far away so only the tested rule fires
    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345, GameTuning::default());
        for o in &mut state.obstacles {
            o.pos = Vec2::new(-20.0, 50.0);
        }
        state
    }

    #[test]
    fn test_tick_accepts_order_and_decays() {
        let mut state = quiet_state();
        let input = TickInput {
            accept_order: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.round.phase, RoundPhase::OrderActive);
        assert!((state.round.freshness - (100.0 - FRESHNESS_DECAY)).abs() < 1e-4);
    }

    #[test]
    fn test_tick_ends_on_collision() {
        let mut state = quiet_state();
        state.obstacles.push(Obstacle {
            pos: Vec2::new(0.0, -1.5),
            half_extents: Vec3::new(0.5, 0.5, 1.0),
        });
        let idx = state.obstacles.len() - 1;

        let ended = tick(&mut state, &TickInput::default());
        assert_eq!(ended, Some(EndReason::Collision { obstacle: idx }));
        assert!(state.round.phase.is_ended());
    }

    #[test]
    fn test_tick_ends_off_road() {
        let mut state = quiet_state();
        state.vehicle.pos.x = 10.2;
        let ended = tick(&mut state, &TickInput::default());
        assert_eq!(ended, Some(EndReason::OffRoad));
    }

    #[test]
    fn test_shift_runs_out_after_one_second_of_frames() {
        let mut state = quiet_state();
        let mut stepper = FixedStep::new();
        let mut input = TickInput::default();
        state.round.time_left = 1;

        let mut ended = None;
        for _ in 0..120 {
            ended = stepper.advance(&mut state, &mut input, SIM_DT);
            if ended.is_some() {
                break;
            }
        }
        assert_eq!(ended, Some(EndReason::ShiftOver));
        assert_eq!(state.time_ticks, 60);
        assert_eq!(state.round.phase, RoundPhase::Ended(EndReason::ShiftOver));
    }

    #[test]
    fn test_ticks_alone_do_not_run_the_countdown() {
        let mut state = quiet_state();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.round.time_left, SHIFT_SECONDS);
    }

    #[test]
    fn test_countdown_follows_wall_clock_on_slow_frames() {
        let mut state = quiet_state();
        let mut stepper = FixedStep::new();
        let mut input = TickInput::default();

        // Ten seconds at 5 fps: the simulation is capped, the countdown is not
        for _ in 0..50 {
            stepper.advance(&mut state, &mut input, 0.2);
        }
        assert_eq!(state.round.time_left, SHIFT_SECONDS - 10);
        assert!(state.time_ticks < 600);

        // A ten second gap between frames
        stepper.advance(&mut state, &mut input, 10.0);
        assert_eq!(state.round.time_left, SHIFT_SECONDS - 20);
    }

    #[test]
    fn test_sixty_fps_takes_ten_seconds_in_600_frames() {
        let mut state = quiet_state();
        let mut stepper = FixedStep::new();
        let mut input = TickInput::default();
        for _ in 0..600 {
            stepper.advance(&mut state, &mut input, SIM_DT);
        }
        assert_eq!(state.time_ticks, 600);
        assert_eq!(state.round.time_left, SHIFT_SECONDS - 10);
    }

    #[test]
    fn test_fixed_step_stops_on_ending_tick() {
        let mut state = quiet_state();
        let mut stepper = FixedStep::new();
        let mut input = TickInput::default();
        // Sliding right: x = 9.948 after tick 1, past the edge after tick 2
        state.vehicle.pos.x = 9.85;
        state.vehicle.heading = -std::f32::consts::FRAC_PI_2;
        state.vehicle.speed = 0.1;

        let ended = stepper.advance(&mut state, &mut input, SIM_DT * 5.0);
        assert_eq!(ended, Some(EndReason::OffRoad));
        assert_eq!(state.time_ticks, 2);
        assert_eq!(stepper.accumulator, 0.0);

        assert_eq!(stepper.advance(&mut state, &mut input, SIM_DT * 5.0), None);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_ended_round_is_frozen() {
        let mut state = quiet_state();
        state.vehicle.pos.x = 11.0;
        tick(&mut state, &TickInput::default());

        let ticks = state.time_ticks;
        let pos = state.vehicle.pos;
        let input = TickInput {
            accelerating: true,
            accept_order: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input), None);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.vehicle.pos, pos);
        assert_eq!(state.round.phase, RoundPhase::Ended(EndReason::OffRoad));
    }

    #[test]
    fn test_camera_follows_after_tick() {
        let mut state = quiet_state();
        state.vehicle.speed = 0.3;
        tick(&mut state, &TickInput::default());
        let pose = camera_pose(&state);
        assert_eq!(pose.target.z, state.vehicle.pos.y);
        assert_eq!(pose.eye.z, state.vehicle.pos.y - CAMERA_BACK);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, GameTuning::default());
        let mut state2 = GameState::new(99999, GameTuning::default());

        let inputs = [
            TickInput {
                accelerating: true,
                ..Default::default()
            },
            TickInput {
                steer_axis: 0.4,
                accept_order: true,
                ..Default::default()
            },
            TickInput {
                braking: true,
                steer_axis: -0.7,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for input in &inputs {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.vehicle.pos, state2.vehicle.pos);
        assert_eq!(state1.round.phase, state2.round.phase);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut state = quiet_state();
        let mut stepper = FixedStep::new();
        let mut input = TickInput::default();

        stepper.advance(&mut state, &mut input, 10.0);
        assert_eq!(state.time_ticks, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_fixed_step_clears_one_shots() {
        let mut state = quiet_state();
        let mut stepper = FixedStep::new();
        let mut input = TickInput {
            accept_order: true,
            accelerating: true,
            ..Default::default()
        };

        stepper.advance(&mut state, &mut input, SIM_DT * 3.5);
        assert_eq!(state.time_ticks, 3);
        assert!(!input.accept_order);
        assert!(input.accelerating);
        assert_eq!(state.round.phase, RoundPhase::OrderActive);
    }

    #[test]
    fn test_fixed_step_accumulates_small_frames() {
        let mut state = quiet_state();
        let mut stepper = FixedStep::new();
        let mut input = TickInput::default();

        stepper.advance(&mut state, &mut input, SIM_DT * 0.6);
        assert_eq!(state.time_ticks, 0);
        stepper.advance(&mut state, &mut input, SIM_DT * 0.6);
        assert_eq!(state.time_ticks, 1);
    }

    proptest! {
        #[test]
        fn prop_round_invariants_hold(
            frames in prop::collection::vec(
                (any::<bool>(), any::<bool>(), -1.0f32..=1.0, any::<bool>()),
                1..600,
            )
        ) {
            let mut state = GameState::new(7, GameTuning::default());
            for (accelerating, braking, steer_axis, accept_order) in frames {
                let input = TickInput { accelerating, braking, steer_axis, accept_order, ..Default::default() };
                tick(&mut state, &input);
                prop_assert!((0.0..=FRESHNESS_MAX).contains(&state.round.freshness));
                prop_assert!(state.round.time_left <= SHIFT_SECONDS);
                prop_assert!(state.vehicle.pos.is_finite());
                for o in &state.obstacles {
                    prop_assert!(o.pos.x.abs() <= state.tuning.traffic.half_range);
                }
            }
        }
    }
}
