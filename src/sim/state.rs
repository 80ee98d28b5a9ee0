//! World state and camera scroll
//!
//! The world owns every entity the simulation steps. Platforms and debris are
//! authored and animated by the host; the simulation only updates their flags.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::enemy::{Enemy, EnemyKind};
use super::level::{Debris, Platform};
use super::player::Player;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Camera scroll for the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    /// Horizontal scroll (horizontal phase)
    pub offset: f32,
    /// Vertical scroll (tower climb phase)
    pub vertical_offset: f32,
    /// Tower climb phase: the camera moves vertically
    pub vertical: bool,
}

impl Scroll {
    pub fn horizontal(offset: f32) -> Self {
        Self {
            offset,
            ..Default::default()
        }
    }

    pub fn vertical(vertical_offset: f32) -> Self {
        Self {
            vertical_offset,
            vertical: true,
            ..Default::default()
        }
    }

    /// Subtract from a world position to get its screen position
    #[inline]
    pub fn screen_offset(&self) -> Vec2 {
        if self.vertical {
            Vec2::new(0.0, self.vertical_offset)
        } else {
            Vec2::new(self.offset, 0.0)
        }
    }
}

/// Seed wrapper so a run can be replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct World {
    pub rng_state: RngState,
    pub player: Player,
    /// Active enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub platforms: Vec<Platform>,
    pub debris: Vec<Debris>,
    /// Boss hitbox (screen space), target of rebounded projectiles
    pub boss: Option<Rect>,
    pub scroll: Scroll,
    pub tuning: Tuning,
    pub settings: Settings,
    /// Frames stepped so far
    pub frame: u64,
    /// Seconds simulated so far
    pub elapsed: f32,
    pub(super) rng: Pcg32,
}

impl World {
    pub fn new(seed: u64, player_pos: Vec2, tuning: Tuning, settings: Settings) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            rng_state,
            player: Player::new(player_pos, &tuning),
            enemies: Vec::new(),
            platforms: Vec::new(),
            debris: Vec::new(),
            boss: None,
            scroll: Scroll::default(),
            tuning,
            settings,
            frame: 0,
            elapsed: 0.0,
            rng: rng_state.to_rng(),
        }
    }

    /// Spawn an enemy; `platform` indexes `platforms` and is only used by patrols
    pub fn spawn_enemy(
        &mut self,
        pos: Vec2,
        kind: EnemyKind,
        speed: f32,
        screen_space: bool,
        platform: Option<usize>,
    ) -> &Enemy {
        let platform_rect = platform.and_then(|i| self.platforms.get(i)).map(|p| p.rect);
        if kind == EnemyKind::Patrol && platform_rect.is_none() {
            log::warn!("Patrol enemy spawned without a platform; it will stand still");
        }
        let enemy = Enemy::new(pos, kind, speed, screen_space, platform_rect, &self.tuning, &mut self.rng);
        log::debug!("Spawned {:?} at {:?}", kind, pos);
        self.enemies.push(enemy);
        &self.enemies[self.enemies.len() - 1]
    }

    /// Random source for host-side cosmetic effects, shared with the simulation
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Respawn the player after falling out of view in the tower phase
    pub fn fall_respawn(&mut self) {
        self.player
            .trigger_fall_respawn(&self.platforms, self.scroll.vertical_offset, &self.tuning);
    }

    /// Respawn the player after damage in the horizontal phase
    pub fn damage_respawn(&mut self) {
        self.player.respawn(&self.platforms, self.scroll.offset, &self.tuning);
    }

    /// Put a consumed player back on the capturing platform
    pub fn tower_respawn(&mut self) {
        self.player.respawn_in_tower(&mut self.platforms, &self.tuning);
    }

    /// Open the chest next to the player, if any
    pub fn open_chest(&mut self) -> bool {
        self.player.interact_with_chest(&mut self.platforms, &self.tuning)
    }

    pub fn pick_up_debris(&mut self, index: usize) -> bool {
        self.player.pick_up_debris(index, &mut self.debris)
    }

    pub fn release_debris(&mut self) -> Option<usize> {
        self.player.release_debris(&mut self.debris)
    }

    /// Player fell below the visible tower section
    pub fn player_below_view(&self) -> bool {
        self.scroll.vertical && self.player.pos.y > self.scroll.vertical_offset + self.tuning.canvas_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::PlatformKind;

    #[test]
    fn test_scroll_screen_offset() {
        assert_eq!(Scroll::horizontal(120.0).screen_offset(), Vec2::new(120.0, 0.0));
        assert_eq!(Scroll::vertical(-300.0).screen_offset(), Vec2::new(0.0, -300.0));
    }

    #[test]
    fn test_same_seed_same_enemies() {
        let mut a = World::new(7, Vec2::ZERO, Tuning::default(), Settings::default());
        let mut b = World::new(7, Vec2::ZERO, Tuning::default(), Settings::default());
        a.spawn_enemy(Vec2::ZERO, EnemyKind::FallingRock, 0.0, false, None);
        b.spawn_enemy(Vec2::ZERO, EnemyKind::FallingRock, 0.0, false, None);
        assert_eq!(a.enemies[0].behavior, b.enemies[0].behavior);
    }

    #[test]
    fn test_patrol_gets_platform_rect() {
        let mut world = World::new(1, Vec2::ZERO, Tuning::default(), Settings::default());
        world
            .platforms
            .push(Platform::new(Rect::new(10.0, 300.0, 200.0, 20.0), PlatformKind::Stable));
        let enemy = world.spawn_enemy(Vec2::new(50.0, 265.0), EnemyKind::Patrol, 80.0, false, Some(0));
        assert!(matches!(
            enemy.behavior,
            crate::sim::enemy::Behavior::Patrol { platform: Some(rect), .. } if rect.w == 200.0
        ));
    }

    #[test]
    fn test_player_below_view() {
        let mut world = World::new(1, Vec2::new(0.0, 700.0), Tuning::default(), Settings::default());
        assert!(!world.player_below_view());
        world.scroll = Scroll::vertical(0.0);
        assert!(world.player_below_view());
        world.scroll = Scroll::vertical(200.0);
        assert!(!world.player_below_view());
    }
}
