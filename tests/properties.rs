//! Property tests for collision and entity invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use sky_tower::Tuning;
use sky_tower::sim::{Circle, Enemy, EnemyKind, Player, Rect, circle_rect_overlap, rects_overlap};

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..200.0, 1.0f32..200.0).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn spawn(kind: EnemyKind, pos: Vec2, speed: f32, platform: Option<Rect>, seed: u64) -> Enemy {
    let mut rng = Pcg32::seed_from_u64(seed);
    Enemy::new(pos, kind, speed, false, platform, &Tuning::default(), &mut rng)
}

proptest! {
    #[test]
    fn prop_rect_overlap_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
    }

    #[test]
    fn prop_rect_overlaps_itself(a in rect_strategy()) {
        prop_assert!(rects_overlap(&a, &a));
    }

    #[test]
    fn prop_circle_center_inside_rect_overlaps(
        rect in rect_strategy(),
        fx in 0.0f32..1.0,
        fy in 0.0f32..1.0,
        radius in 0.0f32..50.0,
    ) {
        let center = Vec2::new(rect.x + rect.w * fx, rect.y + rect.h * fy);
        let circle = Circle { center, radius };
        prop_assert!(circle_rect_overlap(&circle, &rect));
    }

    #[test]
    fn prop_rock_velocity_is_summed_gravity(
        steps in proptest::collection::vec(0.001f32..0.05, 1..60),
        seed in any::<u64>(),
    ) {
        let tuning = Tuning::default();
        let mut rock = spawn(EnemyKind::FallingRock, Vec2::new(100.0, 0.0), 0.0, None, seed);
        let player = Rect::new(1000.0, 1000.0, 40.0, 40.0);

        let mut expected = 0.0f32;
        for dt in steps {
            rock.update(dt, &player, 0.0, None, &tuning);
            expected += tuning.falling_rock_gravity * dt;
        }
        prop_assert_eq!(rock.vel.y, expected);
        prop_assert_eq!(rock.pos.x, 100.0);
    }

    #[test]
    fn prop_patrol_stays_on_platform(
        start in 0.0f32..165.0,
        speed in 0.0f32..600.0,
        steps in proptest::collection::vec(0.001f32..0.1, 1..120),
        seed in any::<u64>(),
    ) {
        let tuning = Tuning::default();
        let platform = Rect::new(0.0, 300.0, 200.0, 20.0);
        let mut patrol = spawn(EnemyKind::Patrol, Vec2::new(start, 265.0), speed, Some(platform), seed);
        let player = Rect::new(1000.0, 0.0, 40.0, 40.0);

        for dt in steps {
            patrol.update(dt, &player, 0.0, None, &tuning);
            prop_assert!(patrol.pos.x >= platform.x);
            prop_assert!(patrol.pos.x + patrol.size.x <= platform.right() + 1e-3);
        }
    }

    #[test]
    fn prop_rebound_is_idempotent(x in -1000.0f32..1000.0, scroll in -500.0f32..500.0) {
        let mut enemy = spawn(EnemyKind::Rebound, Vec2::new(x, 200.0), 150.0, None, 1);
        prop_assert!(enemy.rebound(scroll).is_some());
        let after_first = enemy.clone();

        prop_assert!(enemy.rebound(scroll).is_none());
        prop_assert!(enemy.rebound(scroll + 10.0).is_none());
        prop_assert_eq!(enemy, after_first);
    }

    #[test]
    fn prop_health_never_increases(hits in proptest::collection::vec(any::<bool>(), 0..20)) {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        let mut last = player.health;

        for knockback in hits {
            player.is_invincible = false;
            player.take_damage(knockback, &tuning);
            prop_assert!(player.health <= last);
            last = player.health;
        }
        prop_assert_eq!(player.is_dead(), player.health == 0);
    }

    #[test]
    fn prop_jump_without_jumps_is_noop(vy in -1000.0f32..1000.0, combo in 0u8..3) {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.jumps_left = 0;
        player.coyote_timer = 0.0;
        player.is_jumping = true;
        player.vel.y = vy;
        player.jump_combo_count = combo;

        player.jump(&tuning);
        prop_assert_eq!(player.vel.y, vy);
        prop_assert_eq!(player.jump_combo_count, combo);
        prop_assert!(player.take_events().is_empty());
    }
}
