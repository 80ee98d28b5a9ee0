//! Side-channel outputs of a simulation frame
//!
//! Particles and events are write-only from the simulation's point of view:
//! ownership passes to the host at the end of each update.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// RGBA color, components in 0-1
pub type Color = [f32; 4];

/// A request for the host particle system to spawn one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpawn {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
    /// Remaining life in seconds
    pub lifespan: f32,
    /// Life at spawn, for fade computations
    pub initial_lifespan: f32,
    pub vel: Vec2,
    /// Position is on-screen rather than in world space
    pub screen_space: bool,
}

impl ParticleSpawn {
    /// A motionless trail dot
    pub fn trail(pos: Vec2, size: f32, color: Color, lifespan: f32, screen_space: bool) -> Self {
        Self {
            pos,
            size,
            color,
            lifespan,
            initial_lifespan: lifespan,
            vel: Vec2::ZERO,
            screen_space,
        }
    }

    /// Dust kicked up under the player's feet when landing
    pub fn landing_dust(pos: Vec2, color: Color, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            size: rng.random::<f32>() * 4.0 + 3.0,
            color,
            lifespan: 0.6 + rng.random::<f32>() * 0.4,
            initial_lifespan: 1.0,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 350.0,
                rng.random::<f32>() * -200.0 - 80.0,
            ),
            screen_space: false,
        }
    }

    /// Wisps shed while sinking through a cloud
    pub fn cloud_wisp(pos: Vec2, color: Color, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            size: rng.random::<f32>() * 3.0 + 2.0,
            color,
            lifespan: 0.5 + rng.random::<f32>() * 0.5,
            initial_lifespan: 1.0,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 150.0,
                rng.random::<f32>() * -40.0 - 20.0,
            ),
            screen_space: false,
        }
    }
}

/// Sound cues for the host audio collaborator (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Land,
    Damage,
    /// Rebound hit and reward payouts
    Coin,
}

/// Events emitted by the simulation for external collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Play a sound
    Sound(SoundCue),
    /// Ask the reward subsystem to spawn `count` coins at `pos`
    CoinReward { pos: Vec2, count: u32 },
}

/// Particle and sprite colors
pub mod colors {
    use super::Color;

    pub const TRAIL_STRAIGHT: Color = [0.44, 0.44, 0.83, 0.8];
    pub const TRAIL_HOMING: Color = [1.0, 0.95, 0.32, 0.8];
    pub const TRAIL_REBOUND: Color = [0.33, 0.63, 1.0, 0.8];
    pub const TRAIL_CHARGER: Color = [0.31, 0.78, 0.47, 0.8];

    /// Landing on a wall top (#A9A9A9)
    pub const LANDING_WALL: Color = [0.66, 0.66, 0.66, 1.0];
    /// Landing on a platform or cloud (#4CAF50)
    pub const LANDING_GROUND: Color = [0.3, 0.69, 0.31, 1.0];
    pub const CLOUD_WISP: Color = [1.0, 1.0, 1.0, 0.8];
}
