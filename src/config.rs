//! Simulation parameters
//!
//! Everything tunable about the arena and the swarm lives here so runs
//! can be reproduced from a seed plus a config. Unknown or missing JSON
//! fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts;

/// Tunable simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena width in pixels
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Gap between the arena edge and the inner face of the walls
    pub margin: f32,
    /// Thickness of the reflecting walls
    pub wall_thickness: f32,
    /// Number of balls dealt onto the start lattice
    pub ball_count: usize,
    pub ball_radius: f32,
    /// Launch speed of every ball
    pub start_speed: f32,
    /// Downward acceleration per tick, before per-ball scaling
    pub gravity: f32,
    /// Global time scale applied to gravity and displacement
    pub speed_scale: f32,
    /// Movement sub-steps per tick
    pub subframes: u32,
    pub grid_rows: usize,
    pub grid_cols: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: consts::ARENA_WIDTH,
            height: consts::ARENA_HEIGHT,
            margin: consts::ARENA_MARGIN,
            wall_thickness: consts::WALL_THICKNESS,
            ball_count: consts::BALL_COUNT,
            ball_radius: consts::BALL_RADIUS,
            start_speed: consts::BALL_START_SPEED,
            gravity: consts::GRAVITY,
            speed_scale: consts::SPEED_SCALE,
            subframes: consts::SUBFRAMES,
            grid_rows: consts::GRID_ROWS,
            grid_cols: consts::GRID_COLS,
        }
    }
}

impl SimConfig {
    /// Parse from JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to parse config: {}", e);
                Self::default()
            }
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Repair out-of-range fields, logging each fix
    ///
    /// The simulation assumes positive dimensions, at least one sub-step,
    /// a non-empty grid and a playfield wide enough to hold a ball.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.width.is_finite() || self.width <= 0.0 {
            log::warn!("Invalid width {}, using {}", self.width, defaults.width);
            self.width = defaults.width;
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            log::warn!("Invalid height {}, using {}", self.height, defaults.height);
            self.height = defaults.height;
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            log::warn!("Invalid margin {}, using {}", self.margin, defaults.margin);
            self.margin = defaults.margin;
        }
        if !self.wall_thickness.is_finite() || self.wall_thickness < 0.0 {
            log::warn!(
                "Invalid wall thickness {}, using {}",
                self.wall_thickness,
                defaults.wall_thickness
            );
            self.wall_thickness = defaults.wall_thickness;
        }
        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            log::warn!(
                "Invalid ball radius {}, using {}",
                self.ball_radius,
                defaults.ball_radius
            );
            self.ball_radius = defaults.ball_radius;
        }
        if !self.start_speed.is_finite() || self.start_speed < 0.0 {
            log::warn!(
                "Invalid start speed {}, using {}",
                self.start_speed,
                defaults.start_speed
            );
            self.start_speed = defaults.start_speed;
        }
        if !self.gravity.is_finite() {
            log::warn!("Invalid gravity {}, using {}", self.gravity, defaults.gravity);
            self.gravity = defaults.gravity;
        }
        if !self.speed_scale.is_finite() || self.speed_scale <= 0.0 {
            log::warn!(
                "Invalid speed scale {}, using {}",
                self.speed_scale,
                defaults.speed_scale
            );
            self.speed_scale = defaults.speed_scale;
        }
        if self.subframes == 0 {
            log::warn!("Sub-steps must be at least 1, using 1");
            self.subframes = 1;
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            log::warn!(
                "Empty grid {}x{}, using {}x{}",
                self.grid_rows,
                self.grid_cols,
                defaults.grid_rows,
                defaults.grid_cols
            );
            self.grid_rows = defaults.grid_rows;
            self.grid_cols = defaults.grid_cols;
        }
        // The band of legal ball centers must be non-empty on both axes
        let inset = 2.0 * (self.margin + self.wall_thickness + self.ball_radius);
        if self.width <= inset || self.height <= inset {
            log::warn!(
                "Playfield {}x{} too small for radius {}, using default dimensions",
                self.width,
                self.height,
                self.ball_radius
            );
            self.width = defaults.width.max(inset + 1.0);
            self.height = defaults.height.max(inset + 1.0);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig {
            ball_count: 5,
            gravity: -0.25,
            ..Default::default()
        };
        let parsed = SimConfig::from_json(&config.to_json());
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{"ball_count": 3, "gravity": 0.0}"#);
        assert_eq!(config.ball_count, 3);
        assert_eq!(config.gravity, 0.0);
        assert_eq!(config.width, SimConfig::default().width);
        assert_eq!(config.subframes, SimConfig::default().subframes);
    }

    #[test]
    fn test_garbage_json_falls_back_to_defaults() {
        let config = SimConfig::from_json("not json at all");
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_sanitized_repairs_bad_fields() {
        let config = SimConfig {
            width: -100.0,
            subframes: 0,
            grid_rows: 0,
            speed_scale: 0.0,
            ..Default::default()
        }
        .sanitized();
        let defaults = SimConfig::default();
        assert_eq!(config.width, defaults.width);
        assert_eq!(config.subframes, 1);
        assert_eq!(config.grid_rows, defaults.grid_rows);
        assert_eq!(config.speed_scale, defaults.speed_scale);
    }

    #[test]
    fn test_sanitized_keeps_valid_config() {
        let config = SimConfig {
            gravity: 0.0,
            ball_count: 2,
            ..Default::default()
        };
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn test_sanitized_grows_cramped_playfield() {
        let config = SimConfig {
            width: 30.0,
            height: 25.0,
            ..Default::default()
        }
        .sanitized();
        let inset = 2.0 * (config.margin + config.wall_thickness + config.ball_radius);
        assert!(config.width > inset);
        assert!(config.height > inset);
    }
}
