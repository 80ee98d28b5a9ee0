//! Player vs. obstacle resolution
//!
//! Runs once per platform per frame, before the platform's own landing check.
//! Overlap tests use the player's box as it was when collisions started; the
//! landing tests use the live position so earlier snaps are respected.

use super::collision::Rect;
use super::level::{ObstacleKind, Platform};
use super::player::Player;
use crate::tuning::Tuning;

/// What the obstacles on one platform did to the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObstacleContact {
    /// Came down on an obstacle top; the platform landing check is skipped
    pub on_surface: bool,
    /// Landed on a wall top
    pub landed_on_wall: bool,
}

impl Player {
    /// Resolve every obstacle on `platform` against the player.
    ///
    /// `body` is the player's box at the start of the collision phase.
    pub(super) fn resolve_obstacles(&mut self, platform: &Platform, body: &Rect, tuning: &Tuning) -> ObstacleContact {
        let mut contact = ObstacleContact::default();

        for obstacle in &platform.obstacles {
            let Some(boxes) = obstacle.hitboxes(&platform.rect) else {
                continue;
            };

            if obstacle.kind == ObstacleKind::SpikeDown {
                // The knockback leaves the player rising, so every hit bounces down
                let hit = !self.is_invincible && body.overlaps(&boxes.main) && self.take_damage(true, tuning);
                if hit && self.vel.y < 0.0 {
                    self.vel.y = tuning.jump_force * tuning.spike_down_bounce;
                }
                continue;
            }

            let surface = boxes.top_surface();
            if self.lands_on(&surface) {
                contact.on_surface = true;

                let spiked = match obstacle.kind {
                    ObstacleKind::Spike | ObstacleKind::WallWithTopSpikes { .. } => {
                        !self.is_invincible && self.take_damage(true, tuning)
                    }
                    _ => {
                        contact.landed_on_wall = true;
                        false
                    }
                };
                if !spiked {
                    self.pos.y = surface.y - self.size.y;
                    self.vel.y = 0.0;
                }
                self.is_jumping = false;
            }

            if body.overlaps(&boxes.main) {
                if !self.is_invincible {
                    let lateral_hit = boxes.lateral_spikes.is_some_and(|spikes| body.overlaps(&spikes));
                    if lateral_hit || obstacle.kind == ObstacleKind::Spike {
                        self.take_damage(true, tuning);
                    }
                }

                if matches!(obstacle.kind, ObstacleKind::Wall { .. } | ObstacleKind::WallWithTopSpikes { .. }) {
                    self.push_out_of_wall(&boxes.main);
                }
            }

            if let Some(cap) = boxes.spike_cap {
                if !self.is_invincible && body.overlaps(&cap) {
                    self.take_damage(true, tuning);
                }
            }
        }

        contact
    }

    /// Head bump from below, otherwise a sideways push back to the side the
    /// player came from
    fn push_out_of_wall(&mut self, wall: &Rect) {
        if self.vel.y < 0.0 && self.last_pos.y >= wall.bottom() {
            self.pos.y = wall.bottom();
            self.vel.y = 0.0;
        } else if self.vel.x != 0.0 {
            if self.last_pos.x + self.size.x <= wall.x {
                self.pos.x = wall.x - self.size.x;
            } else if self.last_pos.x >= wall.right() {
                self.pos.x = wall.right();
            }
            self.vel.x = 0.0;
        }
    }
}
