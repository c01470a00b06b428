//! Midi Balls - bouncing balls that strike MIDI notes on impact
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spatial grid)
//! - `events`: Impact events and the sinks that consume them
//! - `midi`: Impact-to-MIDI translation (notes, velocity, stereo pan)
//! - `notes`: Scales, chords and the key state notes are picked from
//! - `config`: Serializable simulation parameters
//! - `color`: Ball palette helpers

pub mod color;
pub mod config;
pub mod events;
pub mod midi;
pub mod notes;
pub mod sim;

pub use config::SimConfig;
pub use events::{EventSink, ImpactEvent};
pub use sim::{World, tick};

use glam::Vec2;

/// Simulation tuning constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 405.0;
    pub const ARENA_HEIGHT: f32 = 720.0;
    /// Gap between the arena edge and the inner face of the walls
    pub const ARENA_MARGIN: f32 = 10.0;
    /// Thickness of the reflecting walls
    pub const WALL_THICKNESS: f32 = 10.0;

    /// Ball defaults
    pub const BALL_COUNT: usize = 34;
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_SPEED: f32 = 5.0;
    /// Spacing of the start-position lattice the balls are dealt onto
    pub const SLOT_STEP: f32 = 45.0;

    /// Downward acceleration added to every ball each tick
    pub const GRAVITY: f32 = 0.5;
    /// Global time scale applied to gravity and displacement
    pub const SPEED_SCALE: f32 = 0.125;
    /// Multiplier for `SPEED_SCALE` while slow motion is on
    pub const SLOMO_FACTOR: f32 = 0.5;
    /// Movement sub-steps per tick
    pub const SUBFRAMES: u32 = 1;

    /// Spatial grid resolution
    pub const GRID_ROWS: usize = 24;
    pub const GRID_COLS: usize = 14;

    /// Impact speed to MIDI velocity conversion factor
    pub const NOTE_VELOCITY_MULT: f32 = 4.5;
    /// Default root note (middle C)
    pub const ROOT_NOTE: u8 = 60;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
