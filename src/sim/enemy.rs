//! Enemy entities
//!
//! One struct carries the shared position/velocity/trail envelope; the
//! kind-specific state lives in the `Behavior` payload and motion dispatches on
//! it. The kind is fixed at construction.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::event::{Color, ParticleSpawn, SimEvent, SoundCue, colors};
use crate::consts::{ENEMY_SIZE, ROCK_SIZE, TRAIL_PARTICLE_SIZE};
use crate::tuning::Tuning;
use crate::{aim, integrate};

/// Enemy types as chosen by the spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Straight,
    Homing,
    Rebound,
    Charger,
    Patrol,
    FallingRock,
}

/// Decorative crack arc drawn on a falling rock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockDetail {
    pub angle: f32,
    pub radius: f32,
    pub arc_length: f32,
}

/// Kind-specific state
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Straight,
    /// Drifts vertically toward the player at a constant rate
    Homing,
    /// Bounced back by the player; homes on the boss afterwards
    Rebound { rebounded: bool },
    /// Waits `timer` seconds, then fires itself at the player once
    Charger { timer: f32, fired: bool },
    /// Walks back and forth along its platform
    Patrol {
        /// Bounds of the owning platform
        platform: Option<Rect>,
        direction: f32,
        anim_phase: f32,
    },
    FallingRock { radius: f32, details: Vec<RockDetail> },
}

impl Behavior {
    pub fn kind(&self) -> EnemyKind {
        match self {
            Behavior::Straight => EnemyKind::Straight,
            Behavior::Homing => EnemyKind::Homing,
            Behavior::Rebound { .. } => EnemyKind::Rebound,
            Behavior::Charger { .. } => EnemyKind::Charger,
            Behavior::Patrol { .. } => EnemyKind::Patrol,
            Behavior::FallingRock { .. } => EnemyKind::FallingRock,
        }
    }

    /// Trail color, `None` for kinds that leave no trail
    fn trail_color(&self) -> Option<Color> {
        match self {
            Behavior::Homing => Some(colors::TRAIL_HOMING),
            Behavior::Rebound { .. } => Some(colors::TRAIL_REBOUND),
            Behavior::Charger { .. } => Some(colors::TRAIL_CHARGER),
            Behavior::Straight => Some(colors::TRAIL_STRAIGHT),
            Behavior::Patrol { .. } | Behavior::FallingRock { .. } => None,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Top-left corner, in screen space if `screen_space` else world space
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Speed magnitude used by world-space scroller motion
    pub speed: f32,
    /// Signed speed used by screen-space motion
    pub original_speed: f32,
    /// Position is on-screen coordinates (latches true, never reverts)
    pub screen_space: bool,
    pub behavior: Behavior,
    /// Center at the end of the previous update, for trail interpolation
    last_center: Vec2,
}

impl Enemy {
    /// Create an enemy. `platform` is required for `Patrol` to move.
    ///
    /// Randomness is cosmetic: patrol direction and walk phase, rock cracks.
    pub fn new(
        pos: Vec2,
        kind: EnemyKind,
        speed: f32,
        screen_space: bool,
        platform: Option<Rect>,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Self {
        let (size, behavior) = match kind {
            EnemyKind::Straight => (ENEMY_SIZE, Behavior::Straight),
            EnemyKind::Homing => (ENEMY_SIZE, Behavior::Homing),
            EnemyKind::Rebound => (ENEMY_SIZE, Behavior::Rebound { rebounded: false }),
            EnemyKind::Charger => (
                ENEMY_SIZE,
                Behavior::Charger {
                    timer: tuning.charger_delay,
                    fired: false,
                },
            ),
            EnemyKind::Patrol => (
                ENEMY_SIZE,
                Behavior::Patrol {
                    platform,
                    direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
                    anim_phase: rng.random::<f32>() * TAU,
                },
            ),
            EnemyKind::FallingRock => {
                let radius = ROCK_SIZE / 2.0;
                let count = rng.random_range(2..=4);
                let details = (0..count)
                    .map(|_| RockDetail {
                        angle: rng.random::<f32>() * TAU,
                        radius: radius * (0.4 + rng.random::<f32>() * 0.5),
                        arc_length: PI * (0.2 + rng.random::<f32>() * 0.3),
                    })
                    .collect();
                (ROCK_SIZE, Behavior::FallingRock { radius, details })
            }
        };

        let size = Vec2::splat(size);
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            speed: speed.abs(),
            original_speed: speed,
            // Chargers aim in screen space
            screen_space: screen_space || kind == EnemyKind::Charger,
            behavior,
            last_center: pos + size / 2.0,
        }
    }

    #[inline]
    pub fn kind(&self) -> EnemyKind {
        self.behavior.kind()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_rebounded(&self) -> bool {
        matches!(self.behavior, Behavior::Rebound { rebounded: true })
    }

    pub fn has_charged(&self) -> bool {
        matches!(self.behavior, Behavior::Charger { fired: true, .. })
    }

    /// Bounce a `Rebound` enemy back toward the boss.
    ///
    /// Converts a world-space position to screen space, latches the rebounded
    /// state and zeroes the scroller speeds. Only the first call on a `Rebound`
    /// enemy does anything; returns the coin cue when it does.
    pub fn rebound(&mut self, scroll_offset: f32) -> Option<SimEvent> {
        let Behavior::Rebound { rebounded } = &mut self.behavior else {
            return None;
        };
        if *rebounded {
            return None;
        }

        if !self.screen_space {
            if !scroll_offset.is_finite() {
                log::debug!("Rebound skipped: scroll offset is {}", scroll_offset);
                return None;
            }
            self.pos.x -= scroll_offset;
        }

        *rebounded = true;
        self.screen_space = true;
        self.speed = 0.0;
        self.original_speed = 0.0;
        self.last_center = self.pos + self.size / 2.0;
        log::debug!("Enemy rebounded at {:?}", self.pos);

        Some(SimEvent::Sound(SoundCue::Coin))
    }

    /// Advance one frame and return trail particles to spawn.
    ///
    /// `player` is the player's world-space box; `boss` is only used by
    /// rebounded projectiles.
    pub fn update(
        &mut self,
        dt: f32,
        player: &Rect,
        scroll_offset: f32,
        boss: Option<&Rect>,
        tuning: &Tuning,
    ) -> Vec<ParticleSpawn> {
        self.advance(dt, player, scroll_offset, boss, tuning);

        if self.behavior == Behavior::Homing {
            let target_y = player.center().y;
            let center_y = self.center().y;
            if target_y.is_finite() && center_y.is_finite() {
                if center_y < target_y {
                    self.pos.y += tuning.homing_attraction * dt;
                } else {
                    self.pos.y -= tuning.homing_attraction * dt;
                }
            }
        }

        self.emit_trail(tuning)
    }

    /// Per-kind motion
    fn advance(&mut self, dt: f32, player: &Rect, scroll_offset: f32, boss: Option<&Rect>, tuning: &Tuning) {
        let center = self.pos + self.size / 2.0;
        let rebounded = self.is_rebounded();

        match &mut self.behavior {
            Behavior::Charger { timer, fired } => {
                if *fired {
                    integrate(&mut self.pos, self.vel, dt);
                } else {
                    *timer -= dt;
                    if *timer <= 0.0 {
                        *fired = true;
                        let target = Vec2::new(player.center().x - scroll_offset, player.center().y);
                        self.vel = aim(center, target, tuning.charge_speed);
                        log::debug!("Charger fired toward {:?} with velocity {:?}", target, self.vel);
                    }
                }
            }
            Behavior::Patrol {
                platform,
                direction,
                anim_phase,
            } => {
                *anim_phase += tuning.patrol_anim_speed * dt;

                if let Some(platform) = platform {
                    self.pos.x += self.speed * *direction * dt;

                    if self.pos.x <= platform.x {
                        self.pos.x = platform.x;
                        *direction = 1.0;
                    } else if self.pos.x + self.size.x >= platform.right() {
                        self.pos.x = platform.right() - self.size.x;
                        *direction = -1.0;
                    }
                }
            }
            Behavior::FallingRock { .. } => {
                self.vel.y += tuning.falling_rock_gravity * dt;
                integrate(&mut self.pos, self.vel, dt);
            }
            _ if rebounded => {
                if let Some(boss) = boss {
                    self.vel = aim(center, boss.center(), tuning.rebound_aimed_speed);
                    integrate(&mut self.pos, self.vel, dt);
                }
            }
            _ if self.screen_space => {
                integrate(&mut self.pos, Vec2::new(self.original_speed, 0.0), dt);
            }
            _ => {
                integrate(&mut self.pos, Vec2::new(-self.speed, 0.0), dt);
            }
        }
    }

    /// Speed that decides trail density
    fn trail_speed(&self) -> f32 {
        if self.is_rebounded() || self.has_charged() {
            self.vel.length()
        } else if self.screen_space {
            self.original_speed.abs()
        } else {
            self.speed
        }
    }

    /// Trail dots interpolated between last frame's center and this one
    fn emit_trail(&mut self, tuning: &Tuning) -> Vec<ParticleSpawn> {
        let Some(color) = self.behavior.trail_color() else {
            return Vec::new();
        };

        let current = self.center();
        let last = self.last_center;
        self.last_center = current;

        if !current.is_finite() || !last.is_finite() {
            return Vec::new();
        }

        let (count, lifespan) = if self.trail_speed() > tuning.dense_trail_speed() {
            (3, 0.3)
        } else {
            (1, 0.5)
        };

        (1..=count)
            .map(|i| {
                let fraction = i as f32 / count as f32;
                let pos = last + (current - last) * fraction;
                ParticleSpawn::trail(pos, TRAIL_PARTICLE_SIZE, color, lifespan, self.screen_space)
            })
            .collect()
    }
}
