//! Game state and core simulation types
//!
//! Everything a round needs lives in `GameState`; nothing is global.

use std::time::Duration;

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, obstacle_aabb, vehicle_aabb};
use crate::consts::*;
use crate::tuning::GameTuning;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Vehicle box overlapped an obstacle (index into `obstacles`)
    Collision { obstacle: usize },
    /// Vehicle left the road band
    OffRoad,
    /// Countdown reached zero
    ShiftOver,
}

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Driving without an order
    #[default]
    Idle,
    /// Carrying an order; freshness decays
    OrderActive,
    /// Terminal until `GameState::reset`
    Ended(EndReason),
}

impl RoundPhase {
    pub fn is_ended(&self) -> bool {
        matches!(self, RoundPhase::Ended(_))
    }
}

/// The player vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Ground-plane position (x, z)
    pub pos: Vec2,
    /// Yaw in radians; 0 faces -Z
    pub heading: f32,
    /// Signed scalar speed (units per tick)
    pub speed: f32,
    pub half_extents: Vec3,
}

impl Vehicle {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            pos: Vec2::ZERO,
            heading: 0.0,
            speed: 0.0,
            half_extents,
        }
    }

    /// Box centre in world space
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.pos.x, GROUND_HEIGHT, self.pos.y)
    }
}

/// A traffic unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Ground-plane position (x, z)
    pub pos: Vec2,
    pub half_extents: Vec3,
}

impl Obstacle {
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.pos.x, GROUND_HEIGHT, self.pos.y)
    }
}

/// Score-like state for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    /// Order quality, 0..=100
    pub freshness: f32,
    /// Whole seconds left on the shift
    pub time_left: u32,
    /// Elapsed time not yet taken off `time_left`
    pub clock: Duration,
    /// Reserved for order payouts; never changed by the simulation
    pub money: u32,
    /// Reserved for customer ratings; never changed by the simulation
    pub rating: u8,
}

impl RoundState {
    pub fn new(shift_seconds: u32) -> Self {
        Self {
            phase: RoundPhase::Idle,
            freshness: FRESHNESS_MAX,
            time_left: shift_seconds,
            clock: Duration::ZERO,
            money: 0,
            rating: STARTING_RATING,
        }
    }

    pub fn has_order(&self) -> bool {
        self.phase == RoundPhase::OrderActive
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Random spawn attempts per obstacle before using the fallback slot
const SPAWN_ATTEMPTS: u32 = 16;
/// Gap between the start box and a fallback obstacle
const SPAWN_CLEARANCE: f32 = 0.5;

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed of the current round
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: GameTuning,
    pub vehicle: Vehicle,
    /// Fixed-size traffic collection (order is stable)
    pub obstacles: Vec<Obstacle>,
    pub round: RoundState,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new round with the given seed
    pub fn new(seed: u64, tuning: GameTuning) -> Self {
        let rng_state = RngState::new(seed);
        let vehicle = Vehicle::new(tuning.vehicle.half_extents);
        let obstacles = spawn_traffic(&rng_state, &tuning, &vehicle);

        Self {
            seed,
            rng_state,
            tuning,
            vehicle,
            obstacles,
            round: RoundState::new(tuning.round.shift_seconds),
            time_ticks: 0,
        }
    }

    /// Start a fresh round in place, keeping tuning and advancing the seed
    pub fn reset(&mut self) {
        let next_seed = next_round_seed(self.seed);
        log::info!("Round reset (seed {} -> {})", self.seed, next_seed);
        *self = Self::new(next_seed, self.tuning);
    }

    /// Switch vehicle variant and restart
    pub fn set_tuning(&mut self, tuning: GameTuning) {
        log::info!("Switching to {}", tuning.variant.as_str());
        *self = Self::new(next_round_seed(self.seed), tuning);
    }
}

/// Seed for the round after `seed`
pub fn next_round_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407)
}

/// Place obstacles uniformly in the spawn square, avoiding the start box
fn spawn_traffic(rng_state: &RngState, tuning: &GameTuning, vehicle: &Vehicle) -> Vec<Obstacle> {
    let mut rng = rng_state.to_rng();
    let traffic = &tuning.traffic;
    let start_box = vehicle_aabb(vehicle);
    let extent = traffic.spawn_extent;

    (0..traffic.count)
        .map(|i| {
            let mut obstacle = Obstacle {
                pos: Vec2::ZERO,
                half_extents: traffic.half_extents,
            };
            for attempt in 0..SPAWN_ATTEMPTS {
                obstacle.pos = Vec2::new(
                    rng.random_range(-extent..extent),
                    rng.random_range(-extent..extent),
                );
                if clears_start(&obstacle, &start_box) {
                    return obstacle;
                }
                log::debug!("Obstacle {} overlaps start box (attempt {})", i, attempt + 1);
            }
            obstacle.pos.y = behind_start(&start_box, &obstacle);
            log::debug!("Obstacle {} placed behind the start box", i);
            obstacle
        })
        .collect()
}

/// z coordinate that puts `obstacle` just behind the start box
fn behind_start(start_box: &Aabb, obstacle: &Obstacle) -> f32 {
    start_box.max.z + obstacle.half_extents.z + SPAWN_CLEARANCE
}

fn clears_start(obstacle: &Obstacle, start_box: &Aabb) -> bool {
    !obstacle_aabb(obstacle).intersects(start_box)
}
