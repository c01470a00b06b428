//! Ball-to-ball collision resolution
//!
//! Equal-mass elastic exchange along the contact normal, followed by a
//! bounded push-apart so overlapping pairs reach touching distance in a
//! handful of attempts.

use super::ball::Ball;

/// Push-apart attempts before giving up on a deeply tangled pair
pub const MAX_SEPARATION_ATTEMPTS: u32 = 10;

/// Outcome of resolving one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResolution {
    /// Relative speed of the pair after the velocity exchange
    pub intensity: f32,
    /// Push-apart attempts consumed
    pub attempts: u32,
    /// Whether the pair reached at least touching distance
    pub separated: bool,
}

/// Resolve one overlapping pair in place
///
/// Swaps the normal components of the two velocities, then pushes the
/// balls apart along the current normal, half the overlap each, until
/// they separate or the attempt budget runs out. Returns `None` without
/// touching anything when the centers coincide, since no contact normal
/// exists there.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball) -> Option<PairResolution> {
    let delta = a.pos - b.pos;
    let distance = delta.length();
    if distance == 0.0 {
        return None;
    }
    let normal = delta / distance;
    let a_n = a.vel.dot(normal);
    let b_n = b.vel.dot(normal);
    a.vel += (b_n - a_n) * normal;
    b.vel += (a_n - b_n) * normal;
    let intensity = (b.vel - a.vel).length();

    let target = a.radius + b.radius;
    let mut attempts = 0;
    let mut separated = false;
    loop {
        let delta = a.pos - b.pos;
        let distance = delta.length();
        if distance >= target {
            separated = true;
            break;
        }
        if attempts >= MAX_SEPARATION_ATTEMPTS {
            break;
        }
        let push = delta / distance * ((target - distance) / 2.0);
        a.pos += push;
        b.pos -= push;
        attempts += 1;
    }
    Some(PairResolution {
        intensity,
        attempts,
        separated,
    })
}
