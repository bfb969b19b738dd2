//! Hoppy - a tap-to-flap scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hero physics, scrolling terrain, obstacle
//!   spawning, contact resolution)
//! - `session`: Run lifecycle and the process-lifetime high score
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio playback and UI are host concerns: the simulation emits
//! [`sim::GameEvent`]s each tick and the host drains them.

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the cadence the host frame driver
    /// is expected to supply; the sim itself accepts any dt)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport extents (portrait phone scene, origin at the lower-left)
    pub const VIEWPORT_WIDTH: f32 = 320.0;
    pub const VIEWPORT_HEIGHT: f32 = 568.0;
    /// Viewport-space x of the left screen edge
    pub const VIEWPORT_LEFT: f32 = 0.0;
}
