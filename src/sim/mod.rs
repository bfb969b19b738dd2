//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (dt supplied by the host)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod contact;
pub mod scroll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use contact::{BodyTag, on_contact};
pub use state::{
    GameEvent, GamePhase, GameState, Hero, Obstacle, ObstacleLayer, Ripple, ScrollLayer,
    SoundEffect, Tile,
};
pub use tick::{TickInput, tick};
