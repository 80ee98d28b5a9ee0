//! Per-frame simulation step
//!
//! Advances the player, then every enemy, and hands particles and events back
//! to the host.

use super::event::{ParticleSpawn, SimEvent};
use super::player::{Keys, PlayerFrame};
use super::state::{Scroll, World};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held keys
    pub keys: Keys,
    /// Jump pressed this frame (edge, not held)
    pub jump: bool,
    pub scroll: Scroll,
    /// The reward subsystem is still busy with a payout
    pub reward_active: bool,
}

/// Everything a frame produced for the host
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    pub particles: Vec<ParticleSpawn>,
    pub events: Vec<SimEvent>,
    /// Nearest landed debris the player could pick up
    pub closest_debris: Option<usize>,
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> FrameOutput {
    world.scroll = input.scroll;

    if input.jump {
        world.player.jump(&world.tuning);
    }

    let frame = PlayerFrame {
        keys: input.keys,
        scroll: input.scroll,
        invincibility_cheat: world.settings.infinite_invincibility,
        reward_active: input.reward_active,
    };

    let update = world.player.update(
        dt,
        &frame,
        &mut world.platforms,
        &mut world.enemies,
        &mut world.debris,
        &world.tuning,
        &mut world.rng,
    );
    let mut output = FrameOutput {
        particles: update.particles,
        events: update.events,
        closest_debris: update.closest_debris,
    };

    let player = world.player.bounds();
    for enemy in &mut world.enemies {
        output.particles.extend(enemy.update(
            dt,
            &player,
            input.scroll.offset,
            world.boss.as_ref(),
            &world.tuning,
        ));
    }

    if !world.settings.particles {
        output.particles.clear();
    }

    world.frame += 1;
    world.elapsed += dt;
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::collision::Rect;
    use crate::sim::enemy::EnemyKind;
    use crate::sim::event::SoundCue;
    use crate::sim::level::{Platform, PlatformKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        let mut world = World::new(3, Vec2::new(100.0, 360.0), Tuning::default(), Settings::default());
        world
            .platforms
            .push(Platform::new(Rect::new(0.0, 400.0, 2000.0, 20.0), PlatformKind::Stable));
        world
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut world = world();
        for _ in 0..10 {
            tick(&mut world, &TickInput::default(), DT);
        }
        assert_eq!(world.frame, 10);
        assert!((world.elapsed - 10.0 * DT).abs() < 1e-5);
    }

    #[test]
    fn test_jump_input_reaches_player() {
        let mut world = world();
        tick(&mut world, &TickInput::default(), DT);

        let out = tick(
            &mut world,
            &TickInput {
                jump: true,
                keys: Keys { space: true, ..Default::default() },
                ..Default::default()
            },
            DT,
        );
        assert!(out.events.contains(&SimEvent::Sound(SoundCue::Jump)));
        assert!(world.player.vel.y < 0.0);
        assert!(world.player.is_jumping);
    }

    #[test]
    fn test_enemies_move_and_trail() {
        let mut world = world();
        world.spawn_enemy(Vec2::new(700.0, 100.0), EnemyKind::Straight, 150.0, false, None);

        let out = tick(&mut world, &TickInput::default(), DT);
        assert!(world.enemies[0].pos.x < 700.0);
        assert_eq!(out.particles.len(), 1);
    }

    #[test]
    fn test_particles_setting_drops_particles() {
        let mut world = world();
        world.settings.particles = false;
        world.spawn_enemy(Vec2::new(700.0, 100.0), EnemyKind::Straight, 150.0, false, None);

        let out = tick(&mut world, &TickInput::default(), DT);
        assert!(out.particles.is_empty());
    }

    #[test]
    fn test_cheat_setting_keeps_invincibility() {
        let mut world = world();
        world.settings.infinite_invincibility = true;
        world.spawn_enemy(Vec2::new(105.0, 365.0), EnemyKind::Straight, 0.0, false, None);

        for _ in 0..5 {
            tick(&mut world, &TickInput::default(), DT);
        }
        assert_eq!(world.player.health, world.tuning.initial_health);
        assert!(world.player.is_invincible);
    }
}
