//! Sky Tower headless runner
//!
//! Builds a small level in code and drives the simulation with scripted input,
//! logging what happens. Usage: `sky-tower [tuning.json] [settings.json]`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use sky_tower::sim::{
        EnemyKind, Keys, Obstacle, ObstacleKind, Platform, PlatformKind, Rect, Scroll, SimEvent, TickInput,
        WindowKind, WindowState, World, tick,
    };
    use sky_tower::renderer::world_sprites;
    use sky_tower::{Settings, Tuning};

    const SIM_DT: f32 = 1.0 / 60.0;
    const FRAMES: u32 = 60 * 20;

    fn read_config(path: &str) -> String {
        std::fs::read_to_string(path).unwrap_or_else(|e| {
            log::warn!("Could not read {}: {}", path, e);
            String::new()
        })
    }

    fn build_level(world: &mut World) {
        let ground = |x: f32, w: f32| Platform::new(Rect::new(x, 500.0, w, 30.0), PlatformKind::Stable);

        world.platforms = vec![
            ground(0.0, 600.0),
            ground(650.0, 400.0).with_obstacle(Obstacle {
                x: 150.0,
                width: 40.0,
                height: 20.0,
                kind: ObstacleKind::Spike,
            }),
            ground(1100.0, 500.0).with_obstacle(Obstacle {
                x: 200.0,
                width: 50.0,
                height: 60.0,
                kind: ObstacleKind::Wall { lateral_spikes: None },
            }),
            Platform::new(Rect::new(1650.0, 420.0, 160.0, 20.0), PlatformKind::PassThroughSlow),
            Platform::new(Rect::new(1850.0, 500.0, 150.0, 20.0), PlatformKind::Falling),
            ground(2050.0, 600.0).with_chest(),
            ground(2700.0, 400.0).with_window(WindowKind::Normal, WindowState::Active),
        ];

        world.spawn_enemy(Vec2::new(900.0, 440.0), EnemyKind::Straight, world.tuning.enemy_speed, false, None);
        world.spawn_enemy(Vec2::new(1500.0, 300.0), EnemyKind::Homing, world.tuning.enemy_speed, false, None);
        world.spawn_enemy(Vec2::new(700.0, 200.0), EnemyKind::Charger, 0.0, true, None);
        world.spawn_enemy(Vec2::new(2100.0, 465.0), EnemyKind::Patrol, 80.0, false, Some(5));
        world.spawn_enemy(Vec2::new(1300.0, -100.0), EnemyKind::FallingRock, 0.0, false, None);
        world.boss = Some(Rect::new(650.0, 100.0, 120.0, 120.0));
    }

    /// Run right, hop every second, look up near the end
    fn scripted_input(frame: u32, world: &World) -> TickInput {
        let scroll_offset = (world.player.pos.x - 200.0).max(0.0);
        TickInput {
            keys: Keys {
                right: true,
                space: frame % 60 < 20,
                up: world.player.pos.x > 2750.0,
                ..Default::default()
            },
            jump: frame % 60 == 0,
            scroll: Scroll::horizontal(scroll_offset),
            reward_active: false,
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Sky Tower (headless) starting...");

        let mut args = std::env::args().skip(1);
        let tuning = args
            .next()
            .map(|path| Tuning::load_or_default(&read_config(&path)))
            .unwrap_or_default();
        let settings = args
            .next()
            .map(|path| Settings::load_or_default(&read_config(&path)))
            .unwrap_or_default();

        let seed = 0x5EED;
        let mut world = World::new(seed, Vec2::new(100.0, 460.0), tuning, settings);
        build_level(&mut world);
        log::info!("Level built with seed {}: {} platforms, {} enemies", seed, world.platforms.len(), world.enemies.len());

        let mut particles = 0usize;
        let mut coins = 0u32;
        let mut captured_frames = 0u32;

        for frame in 0..FRAMES {
            let input = scripted_input(frame, &world);
            let output = tick(&mut world, &input, SIM_DT);
            particles += output.particles.len();
            if frame % 60 == 0 {
                log::debug!("Frame {}: {} sprites to draw", frame, world_sprites(&world).len());
            }

            for event in &output.events {
                match event {
                    SimEvent::CoinReward { count, .. } => coins += count,
                    SimEvent::Sound(cue) => log::trace!("Sound {:?}", cue),
                }
            }

            if world.player.chest_in_range.is_some() && world.open_chest() {
                for event in world.player.take_events() {
                    if let SimEvent::CoinReward { count, .. } = event {
                        coins += count;
                    }
                }
            }

            if world.player.is_consumed() {
                captured_frames += 1;
                if captured_frames > 30 {
                    world.tower_respawn();
                    captured_frames = 0;
                }
            }

            if world.player.pos.y > world.tuning.canvas_height + 200.0 {
                world.damage_respawn();
            }

            if world.player.is_dead() {
                log::info!("Game over at frame {}", frame);
                break;
            }
        }

        log::info!(
            "Done after {} frames: player at {:?}, health {}/{}, {} enemies left, {} particles, {} coins",
            world.frame,
            world.player.pos,
            world.player.health,
            world.player.max_health,
            world.enemies.len(),
            particles,
            coins
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the web host directly
}
