//! Sky Tower - per-frame simulation core of a side-scrolling tower platformer
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (player, enemies, collisions, events)
//! - `renderer`: Draw contract consumed by the host renderer
//! - `tuning`: Data-driven game balance
//! - `settings`: Host/session flags (debug overlay, cheats)

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed entity geometry (not tunable: art and hitboxes are authored to these)
pub mod consts {
    /// Player bounding box
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Bounding box for every enemy kind except the falling rock
    pub const ENEMY_SIZE: f32 = 35.0;
    /// Falling rock bounding box (drawn as a circle of half this size)
    pub const ROCK_SIZE: f32 = 40.0;

    /// Chest sprite sitting centered on top of its platform
    pub const CHEST_WIDTH: f32 = 50.0;
    pub const CHEST_HEIGHT: f32 = 40.0;

    /// Window trap hitbox sitting centered on top of its platform
    pub const WINDOW_WIDTH: f32 = 60.0;
    pub const WINDOW_HEIGHT: f32 = 90.0;

    /// Number of particles in a landing burst
    pub const LANDING_PARTICLES: usize = 20;
    /// Number of particles emitted per frame while sinking through a cloud
    pub const CLOUD_PARTICLES: usize = 3;
    /// Size of an enemy trail particle
    pub const TRAIL_PARTICLE_SIZE: f32 = 5.0;
}

/// Linear interpolation between two points
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Advance `pos` by `vel * dt`, skipping the step if anything is non-finite.
///
/// This is the single validation boundary for motion: a corrupted velocity or
/// position leaves the entity where it is for this frame instead of spreading
/// NaN into later collision checks. Returns whether the step was applied.
#[inline]
pub fn integrate(pos: &mut Vec2, vel: Vec2, dt: f32) -> bool {
    let next = *pos + vel * dt;
    if next.is_finite() {
        *pos = next;
        true
    } else {
        log::trace!("Skipping non-finite step: pos={:?} vel={:?} dt={}", pos, vel, dt);
        false
    }
}

/// Unit vector from `from` toward `to` scaled by `speed`, or zero when the
/// points coincide (or the direction is not finite)
#[inline]
pub fn aim(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let dir = (to - from).normalize_or_zero();
    if dir.is_finite() { dir * speed } else { Vec2::ZERO }
}
