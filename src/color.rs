//! Ball palette
//!
//! Colors are picked from a small set of fully saturated hues so the
//! swarm stays readable against the dark background.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hues (0..1) balls are painted with, all at full saturation and value
pub const PALETTE_HUES: [f32; 6] = [0.0, 0.1, 0.3, 0.6, 0.7, 0.8];

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pick a random palette color
pub fn random_palette<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let hue = PALETTE_HUES[rng.random_range(0..PALETTE_HUES.len())];
    hsv_to_rgb(hue, 1.0, 1.0)
}

/// Convert HSV (all components in 0..1) to 8-bit RGB
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let to_byte = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    if s <= 0.0 {
        let g = to_byte(v);
        return Rgb::new(g, g, g);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match (sector as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}
