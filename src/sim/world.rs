//! World state and construction
//!
//! A `World` is everything the simulation owns: config, arena bounds, the
//! balls and the spatial grid, plus the tick counter. Construction is fully
//! determined by a seed and a config; two worlds built from the same pair
//! are identical.

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::grid::SpatialGrid;
use crate::color::random_palette;
use crate::config::SimConfig;
use crate::consts;

/// Rectangular playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Gap between the arena edge and the inner face of the walls
    pub margin: f32,
    pub wall_thickness: f32,
}

impl Arena {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            margin: config.margin,
            wall_thickness: config.wall_thickness,
        }
    }

    /// Smallest legal center coordinate on either axis for `radius`
    #[inline]
    pub fn min_center(&self, radius: f32) -> f32 {
        self.margin + self.wall_thickness + radius
    }

    /// Largest legal center x for `radius`
    #[inline]
    pub fn max_center_x(&self, radius: f32) -> f32 {
        self.width - self.margin - self.wall_thickness - radius
    }

    /// Largest legal center y for `radius`
    #[inline]
    pub fn max_center_y(&self, radius: f32) -> f32 {
        self.height - self.margin - self.wall_thickness - radius
    }
}

/// Launch lattice: grid-aligned positions spaced so freshly dealt balls
/// never start in contact, filtered to the band of legal centers
fn start_slots(arena: &Arena, radius: f32) -> Vec<Vec2> {
    let step = consts::SLOT_STEP;
    let cols = (arena.width / step) as i32 - 1;
    let rows = (arena.height / step) as i32 - 1;
    let min = arena.min_center(radius);
    let max_x = arena.max_center_x(radius);
    let max_y = arena.max_center_y(radius);
    let mut slots = Vec::new();
    for sx in 1..=cols {
        for sy in 1..=rows {
            let pos = Vec2::new(sx as f32 * step, sy as f32 * step);
            if pos.x >= min && pos.x <= max_x && pos.y >= min && pos.y <= max_y {
                slots.push(pos);
            }
        }
    }
    slots
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub seed: u64,
    pub config: SimConfig,
    pub arena: Arena,
    pub balls: Vec<Ball>,
    pub grid: SpatialGrid,
    pub tick_count: u64,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SimConfig::default())
    }

    pub fn with_config(seed: u64, config: SimConfig) -> Self {
        let config = config.sanitized();
        let arena = Arena::new(&config);
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut slots = start_slots(&arena, config.ball_radius);
        slots.shuffle(&mut rng);
        let count = config.ball_count.min(slots.len());
        if count < config.ball_count {
            log::warn!(
                "Only {} start slots for {} balls, dealing {}",
                slots.len(),
                config.ball_count,
                count
            );
        }

        let mut grid =
            SpatialGrid::new(config.grid_rows, config.grid_cols, config.width, config.height);
        let mut balls = Vec::with_capacity(count);
        for (i, slot) in slots.into_iter().take(count).enumerate() {
            let color = random_palette(&mut rng);
            let mut ball = Ball::new(i as u32, slot, config.ball_radius, color);
            ball.launch(config.start_speed, &mut rng);
            grid.assign(ball.id, ball.pos);
            balls.push(ball);
        }

        log::info!(
            "World seeded: {} balls in a {}x{} arena over a {}x{} grid, seed {}",
            balls.len(),
            config.width,
            config.height,
            grid.rows(),
            grid.cols(),
            seed
        );
        Self {
            seed,
            config,
            arena,
            balls,
            grid,
            tick_count: 0,
        }
    }

    /// Change global gravity mid-run
    pub fn set_gravity(&mut self, gravity: f32) {
        if gravity.is_finite() {
            self.config.gravity = gravity;
        } else {
            log::warn!("Ignoring non-finite gravity");
        }
    }

    /// Change the global time scale mid-run (slow motion toggles this)
    pub fn set_speed_scale(&mut self, speed_scale: f32) {
        if speed_scale.is_finite() && speed_scale > 0.0 {
            self.config.speed_scale = speed_scale;
        } else {
            log::warn!("Ignoring invalid speed scale {}", speed_scale);
        }
    }

    /// Mutable references to two distinct balls
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Ball, &mut Ball) {
        debug_assert_ne!(i, j);
        if i < j {
            let (lo, hi) = self.balls.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.balls.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        }
    }
}
