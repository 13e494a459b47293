//! HUD model
//!
//! Pure mapping from game state to the DOM display surfaces. The binary
//! writes these values; nothing here touches the DOM.

use glam::Vec2;

use crate::sim::{EndReason, GameState, RoundPhase};

/// Freshness bar pixels per freshness point
pub const FRESHNESS_BAR_SCALE: f32 = 2.0;
/// Stick indicator resting `left` offset inside the joystick pad
pub const STICK_REST_LEFT: f32 = 30.0;
/// Stick indicator resting `top` offset inside the joystick pad
pub const STICK_REST_TOP: f32 = 30.0;

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudModel {
    pub time_text: String,
    pub freshness_bar_px: f32,
    /// Whether the deliver button is offered
    pub has_order: bool,
    /// Stick indicator (left, top) in pixels
    pub stick_px: (f32, f32),
}

impl HudModel {
    pub fn from_state(state: &GameState, stick_offset: Vec2) -> Self {
        let round = &state.round;
        Self {
            time_text: round.time_left.to_string(),
            freshness_bar_px: freshness_bar_width(round.freshness),
            has_order: round.phase == RoundPhase::OrderActive,
            stick_px: stick_position(stick_offset),
        }
    }
}

/// Linear 0..=100 -> 0..=200 px
pub fn freshness_bar_width(freshness: f32) -> f32 {
    freshness.clamp(0.0, 100.0) * FRESHNESS_BAR_SCALE
}

pub fn stick_position(offset: Vec2) -> (f32, f32) {
    (STICK_REST_LEFT + offset.x, STICK_REST_TOP + offset.y)
}

/// Text of the interruptive end-of-round notification
pub fn end_message(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Collision { .. } => "Crashed into traffic!",
        EndReason::OffRoad => "You drove off the road!",
        EndReason::ShiftOver => "Shift Ended!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::GameTuning;

    #[test]
    fn test_bar_width_is_linear() {
        assert_eq!(freshness_bar_width(100.0), 200.0);
        assert_eq!(freshness_bar_width(37.5), 75.0);
        assert_eq!(freshness_bar_width(0.0), 0.0);
    }

    #[test]
    fn test_model_from_fresh_state() {
        let state = GameState::new(3, GameTuning::default());
        let hud = HudModel::from_state(&state, Vec2::ZERO);
        assert_eq!(hud.time_text, "180");
        assert_eq!(hud.freshness_bar_px, 200.0);
        assert!(!hud.has_order);
        assert_eq!(hud.stick_px, (30.0, 30.0));
    }

    #[test]
    fn test_model_tracks_active_order() {
        let mut state = GameState::new(3, GameTuning::default());
        crate::sim::round::accept_order(&mut state.round);
        assert!(HudModel::from_state(&state, Vec2::ZERO).has_order);
    }

    #[test]
    fn test_stick_follows_offset() {
        assert_eq!(stick_position(Vec2::new(-20.0, 5.0)), (10.0, 35.0));
    }

    #[test]
    fn test_end_messages() {
        assert_eq!(end_message(EndReason::ShiftOver), "Shift Ended!");
        assert_eq!(
            end_message(EndReason::Collision { obstacle: 2 }),
            "Crashed into traffic!"
        );
        assert_eq!(end_message(EndReason::OffRoad), "You drove off the road!");
    }
}
