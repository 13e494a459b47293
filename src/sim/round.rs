//! Round lifecycle: orders, freshness and the shift countdown
//!
//! `Idle -> OrderActive -> (Idle | Ended)`. `Ended` is terminal; every
//! function here is a no-op on an ended round.

use std::time::Duration;

use super::state::{EndReason, RoundPhase, RoundState};
use crate::consts::FRESHNESS_MAX;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Take a new order. Resets freshness even if one is already active.
pub fn accept_order(round: &mut RoundState) -> bool {
    match round.phase {
        RoundPhase::Idle | RoundPhase::OrderActive => {
            round.freshness = FRESHNESS_MAX;
            round.phase = RoundPhase::OrderActive;
            log::info!("Order accepted");
            true
        }
        RoundPhase::Ended(_) => false,
    }
}

/// Hand over the current order and go back to idle driving
pub fn deliver_order(round: &mut RoundState) -> bool {
    match round.phase {
        RoundPhase::OrderActive => {
            log::info!("Order delivered at freshness {:.1}", round.freshness);
            round.phase = RoundPhase::Idle;
            true
        }
        RoundPhase::Idle | RoundPhase::Ended(_) => false,
    }
}

/// Per-tick freshness decay, only while carrying an order
pub fn decay_freshness(round: &mut RoundState, decay: f32) {
    if round.has_order() {
        round.freshness = (round.freshness - decay).max(0.0);
    }
}

/// Feed elapsed wall-clock time into the countdown.
///
/// Takes one second off `time_left` per whole second elapsed, however the
/// time arrives. Returns `ShiftOver` once the timer hits zero.
pub fn advance_clock(round: &mut RoundState, elapsed: Duration) -> Option<EndReason> {
    if round.phase.is_ended() {
        return None;
    }

    round.clock = round.clock.saturating_add(elapsed);
    while round.clock >= ONE_SECOND && round.time_left > 0 {
        round.clock -= ONE_SECOND;
        round.time_left -= 1;
        log::trace!("Shift time left: {}s", round.time_left);
    }

    (round.time_left == 0).then_some(EndReason::ShiftOver)
}

/// Enter the terminal phase
pub fn end(round: &mut RoundState, reason: EndReason) {
    if !round.phase.is_ended() {
        log::info!(
            "Round ended: {:?} (time left {}s, freshness {:.1})",
            reason,
            round.time_left,
            round.freshness
        );
        round.phase = RoundPhase::Ended(reason);
    }
}
