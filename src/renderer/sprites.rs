//! Sprite snapshots for the host renderer
//!
//! Converts simulation entities into screen-space draw descriptions. Nothing
//! here mutates the simulation.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::collision::Rect;
use crate::sim::enemy::{Behavior, Enemy, EnemyKind, RockDetail};
use crate::sim::event::Color;
use crate::sim::player::{CaptureState, Player};
use crate::sim::state::Scroll;

/// Body colors per enemy kind
fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Straight => [0.29, 0.29, 0.71, 1.0],
        EnemyKind::Homing => [1.0, 0.84, 0.0, 1.0],
        EnemyKind::Rebound => [0.12, 0.56, 1.0, 1.0],
        EnemyKind::Charger => [0.18, 0.55, 0.34, 1.0],
        EnemyKind::Patrol => [0.55, 0.27, 0.07, 1.0],
        EnemyKind::FallingRock => [0.5, 0.5, 0.5, 1.0],
    }
}

const PLAYER_COLOR: Color = [0.91, 0.3, 0.24, 1.0];

/// What to draw
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteShape {
    /// The player's box, rotated while somersaulting
    Player,
    /// Projectile enemies (straight, homing, rebound, charger)
    Diamond,
    /// Walking patrol enemy; `phase` drives the leg animation
    Walker { phase: f32, facing: f32 },
    /// Rock circle with decorative cracks
    Rock { radius: f32, details: Vec<RockDetail> },
}

/// Debug overlay outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
    Rect(Rect),
    Diamond(Rect),
}

/// One entity ready to draw, in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Top-left corner on screen
    pub pos: Vec2,
    pub size: Vec2,
    /// Rotation around the sprite center (radians)
    pub rotation: f32,
    pub color: Color,
    pub shape: SpriteShape,
    pub outline: Option<Outline>,
}

impl Sprite {
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Invincibility blink: hidden on even tenths of the remaining time
fn blink_hidden(player: &Player) -> bool {
    player.is_invincible && ((player.invincibility_timer * 10.0).floor() as i64).rem_euclid(2) == 0
}

/// Player sprite, or `None` while blinked out or consumed by a window
pub fn player_sprite(player: &Player, scroll: &Scroll, settings: &Settings) -> Option<Sprite> {
    if player.is_consumed() || blink_hidden(player) {
        return None;
    }

    let screen = player.bounds().offset_by(scroll.screen_offset());
    if !screen.pos().is_finite() {
        return None;
    }

    let scale = match player.capture {
        CaptureState::Pulling { progress } => 1.0 - 0.9 * progress,
        _ => 1.0,
    };
    // Shrinks toward the top-left corner
    let size = player.size * scale;

    Some(Sprite {
        pos: screen.pos(),
        size,
        rotation: if player.is_somersaulting { player.rotation } else { 0.0 },
        color: PLAYER_COLOR,
        shape: SpriteShape::Player,
        outline: settings.debug_overlay.then_some(Outline::Rect(screen)),
    })
}

/// Enemy sprite, or `None` if its position is not finite
pub fn enemy_sprite(enemy: &Enemy, scroll: &Scroll, settings: &Settings) -> Option<Sprite> {
    let offset = scroll.screen_offset();
    // Screen-space enemies already ignore the horizontal scroll
    let offset = if enemy.screen_space { Vec2::new(0.0, offset.y) } else { offset };
    let screen = enemy.bounds().offset_by(offset);
    if !screen.pos().is_finite() {
        return None;
    }

    let shape = match &enemy.behavior {
        Behavior::Patrol {
            direction, anim_phase, ..
        } => SpriteShape::Walker {
            phase: *anim_phase,
            facing: *direction,
        },
        Behavior::FallingRock { radius, details } => SpriteShape::Rock {
            radius: *radius,
            details: details.clone(),
        },
        _ => SpriteShape::Diamond,
    };

    let outline = settings.debug_overlay.then_some(if shape == SpriteShape::Diamond {
        Outline::Diamond(screen)
    } else {
        Outline::Rect(screen)
    });

    Some(Sprite {
        pos: screen.pos(),
        size: enemy.size,
        rotation: 0.0,
        color: enemy_color(enemy.kind()),
        shape,
        outline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy(kind: EnemyKind, screen_space: bool) -> Enemy {
        let mut rng = Pcg32::seed_from_u64(1);
        Enemy::new(Vec2::new(500.0, 200.0), kind, 100.0, screen_space, None, &Tuning::default(), &mut rng)
    }

    #[test]
    fn test_player_sprite_scrolls() {
        let player = Player::new(Vec2::new(300.0, 200.0), &Tuning::default());
        let sprite = player_sprite(&player, &Scroll::horizontal(100.0), &Settings::default()).unwrap();
        assert_eq!(sprite.pos, Vec2::new(200.0, 200.0));
        assert_eq!(sprite.outline, None);

        let sprite = player_sprite(&player, &Scroll::vertical(150.0), &Settings::default()).unwrap();
        assert_eq!(sprite.pos, Vec2::new(300.0, 50.0));
    }

    #[test]
    fn test_invincibility_blink() {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default());
        player.is_invincible = true;

        player.invincibility_timer = 0.85; // floor(8.5) = 8
        assert!(player_sprite(&player, &Scroll::default(), &Settings::default()).is_none());

        player.invincibility_timer = 0.95; // floor(9.5) = 9
        assert!(player_sprite(&player, &Scroll::default(), &Settings::default()).is_some());
    }

    #[test]
    fn test_capture_shrinks_then_hides() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), &Tuning::default());
        player.capture = CaptureState::Pulling { progress: 0.5 };
        let sprite = player_sprite(&player, &Scroll::default(), &Settings::default()).unwrap();
        assert!((sprite.size.x - 40.0 * 0.55).abs() < 1e-4);
        assert_eq!(sprite.pos, Vec2::new(100.0, 100.0));

        player.capture = CaptureState::Pulling { progress: 1.0 };
        assert!(player_sprite(&player, &Scroll::default(), &Settings::default()).is_none());
    }

    #[test]
    fn test_somersault_rotation() {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default());
        player.rotation = 1.25;
        let sprite = player_sprite(&player, &Scroll::default(), &Settings::default()).unwrap();
        assert_eq!(sprite.rotation, 0.0);

        player.is_somersaulting = true;
        let sprite = player_sprite(&player, &Scroll::default(), &Settings::default()).unwrap();
        assert_eq!(sprite.rotation, 1.25);
    }

    #[test]
    fn test_enemy_shapes_and_outlines() {
        let debug = Settings {
            debug_overlay: true,
            ..Settings::default()
        };

        let sprite = enemy_sprite(&enemy(EnemyKind::Homing, false), &Scroll::default(), &debug).unwrap();
        assert_eq!(sprite.shape, SpriteShape::Diamond);
        assert!(matches!(sprite.outline, Some(Outline::Diamond(_))));

        let sprite = enemy_sprite(&enemy(EnemyKind::Patrol, false), &Scroll::default(), &debug).unwrap();
        assert!(matches!(sprite.shape, SpriteShape::Walker { .. }));
        assert!(matches!(sprite.outline, Some(Outline::Rect(_))));

        let sprite = enemy_sprite(&enemy(EnemyKind::FallingRock, false), &Scroll::default(), &debug).unwrap();
        assert!(matches!(sprite.shape, SpriteShape::Rock { radius, .. } if radius == 20.0));
    }

    #[test]
    fn test_screen_space_enemy_ignores_scroll() {
        let scroll = Scroll::horizontal(300.0);
        let world = enemy_sprite(&enemy(EnemyKind::Straight, false), &scroll, &Settings::default()).unwrap();
        let screen = enemy_sprite(&enemy(EnemyKind::Straight, true), &scroll, &Settings::default()).unwrap();
        assert_eq!(world.pos.x, 200.0);
        assert_eq!(screen.pos.x, 500.0);
    }

    #[test]
    fn test_non_finite_enemy_not_drawn() {
        let mut e = enemy(EnemyKind::Straight, false);
        e.pos.x = f32::NAN;
        assert!(enemy_sprite(&e, &Scroll::default(), &Settings::default()).is_none());
    }
}
