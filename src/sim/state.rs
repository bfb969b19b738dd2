//! Game state and core simulation types
//!
//! Everything that defines a run lives here. State is serializable and the
//! RNG travels with it, so a snapshot resumes deterministically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, TuningError};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Run in progress, input and scoring live
    Active,
    /// Run ended on a fatal contact. Terminal: a new run is a fresh
    /// `GameState`, never an in-place reset.
    GameOver,
}

/// The player-controlled sprite's body.
///
/// Models the slice of the host physics body the game logic owns: velocity,
/// rotation and the two flags the death sequence flips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub pos: Vec2,
    /// Radians, 0 = level flight, positive = nose up
    pub rotation: f32,
    pub vel: Vec2,
    /// Rad/s, positive = nose up
    pub angular_vel: f32,
    /// Cleared on death so no further angular impulses apply
    pub allows_rotation: bool,
    /// Cleared on death so the body rests instead of jittering
    /// (the host physics bitmask, reduced to the one bit we flip)
    pub collision_enabled: bool,
}

impl Hero {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            rotation: 0.0,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            allows_rotation: true,
            collision_enabled: true,
        }
    }
}

/// One terrain sprite inside a scroll layer.
///
/// `local_x` is the tile's left edge in layer-local space; the layer's
/// offset maps it into viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub local_x: f32,
    pub y: f32,
    pub width: f32,
}

/// A parallax layer (ground or clouds) holding its tiles in a typed
/// container. Two tiles per layer are enough for infinite scroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollLayer {
    /// Layer origin in viewport space; scrolling decrements this
    pub offset_x: f32,
    pub tiles: Vec<Tile>,
}

impl ScrollLayer {
    /// Build a layer of `count` tiles abutted left to right from x=0.
    pub fn tiled(count: usize, width: f32, y: f32) -> Self {
        let tiles = (0..count)
            .map(|i| Tile {
                local_x: i as f32 * width,
                y,
                width,
            })
            .collect();
        Self {
            offset_x: 0.0,
            tiles,
        }
    }

    /// Layer-local x to viewport space
    pub fn to_world(&self, local_x: f32) -> f32 {
        self.offset_x + local_x
    }

    /// Viewport-space x to layer-local
    pub fn to_local(&self, world_x: f32) -> f32 {
        world_x - self.offset_x
    }
}

/// A gap obstacle. Geometry (pipes and the goal sensor between them) is an
/// external asset the host instantiates when it sees `ObstacleSpawned`;
/// the sim tracks only placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left-edge x in obstacle-layer-local space
    pub local_x: f32,
    /// Vertical position of the gap
    pub y: f32,
}

/// The layer obstacles scroll inside, in lockstep with the ground.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObstacleLayer {
    pub offset_x: f32,
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleLayer {
    pub fn to_world(&self, local_x: f32) -> f32 {
        self.offset_x + local_x
    }

    pub fn to_local(&self, world_x: f32) -> f32 {
        world_x - self.offset_x
    }
}

/// The transient score ripple. Replaced wholesale by the next score; expires
/// on its own after `Tuning::ripple_duration`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    pub pos: Vec2,
    /// Seconds until the one-shot removal fires
    pub ttl: f32,
}

/// Fire-and-forget sound effects for the host audio player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Tap / wing flap
    Flap,
    /// Passed through an obstacle gap
    Goal,
}

impl SoundEffect {
    /// Audio asset name the host resolves
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Flap => "sfx_flap",
            SoundEffect::Goal => "sfx_goal",
        }
    }
}

/// Outbound signals for the host (renderer, audio, UI). Drained once per
/// frame; purely informational, never read back by the sim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// Instantiate the ripple asset at `pos`
    RippleSpawned { pos: Vec2 },
    /// Remove the ripple asset (expired or replaced)
    RippleExpired,
    /// Instantiate the obstacle asset for this id
    ObstacleSpawned { id: u32 },
    /// Remove the obstacle asset for this id
    ObstacleDespawned { id: u32 },
    /// Score display update; `is_record` hints the record color change
    ScoreChanged {
        points: u32,
        level: u32,
        is_record: bool,
    },
    /// Level display update after a speed step
    LevelUp { level: u32, scroll_speed: f32 },
    /// Stop any in-progress hero animation
    HeroAnimationCancelled,
    /// One-shot shake applied to every top-level scene node
    Shake,
    /// Run ended; host shows the restart control
    RunEnded {
        points: u32,
        high_score: u32,
        new_record: bool,
    },
}

/// Complete run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; serialized with the state so snapshots replay exactly
    pub rng: Pcg32,
    /// Simulation tick counter
    pub ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Seconds since the last tap
    pub since_touch: f32,
    /// Accumulates toward the next obstacle spawn
    pub spawn_timer: f32,
    /// Player body
    pub hero: Hero,
    /// Ground layer, scrolls at `scroll_speed`
    pub ground: ScrollLayer,
    /// Cloud layer, scrolls at the fixed cloud speed
    pub clouds: ScrollLayer,
    /// Obstacles, scrolling in lockstep with the ground
    pub obstacle_layer: ObstacleLayer,
    /// Points this run; monotonic while Active
    pub points: u32,
    /// Derived: points / points_per_level
    pub level: u32,
    /// Ground/obstacle scroll speed; steps up on level increase, never down
    pub scroll_speed: f32,
    /// Best score carried in from the session; committed on fatal contact
    pub high_score: u32,
    /// Active score ripple, if any
    pub ripple: Option<Ripple>,
    /// Balance values this run was built with
    pub tuning: Tuning,
    /// Outbound host signals (not gameplay state)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a run with default tuning. `high_score` is the session's
    /// carryover shown (and possibly beaten) during this run.
    pub fn new(seed: u64, high_score: u32) -> Self {
        // Defaults are covered by tuning tests; validation cannot fail here
        match Self::with_tuning(seed, high_score, Tuning::default()) {
            Ok(state) => state,
            Err(e) => unreachable!("default tuning must validate: {e}"),
        }
    }

    /// Create a run with explicit tuning, validating it first.
    pub fn with_tuning(seed: u64, high_score: u32, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            phase: GamePhase::Active,
            since_touch: 0.0,
            spawn_timer: 0.0,
            hero: Hero::new(Vec2::new(tuning.hero_start_x, tuning.hero_start_y)),
            ground: ScrollLayer::tiled(2, tuning.ground_tile_width, tuning.ground_tile_y),
            clouds: ScrollLayer::tiled(2, tuning.cloud_tile_width, tuning.cloud_tile_y),
            obstacle_layer: ObstacleLayer::default(),
            points: 0,
            level: 0,
            scroll_speed: tuning.base_scroll_speed,
            high_score,
            ripple: None,
            tuning,
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue a signal for the host
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the queued signals to the host, clearing the queue
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
