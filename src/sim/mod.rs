//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by ball ID)
//! - No MIDI or platform dependencies; impacts leave through `EventSink`

pub mod ball;
pub mod collision;
pub mod grid;
pub mod tick;
pub mod world;

pub use ball::Ball;
pub use collision::{MAX_SEPARATION_ATTEMPTS, PairResolution, resolve_pair};
pub use grid::SpatialGrid;
pub use tick::tick;
pub use world::{Arena, World};
