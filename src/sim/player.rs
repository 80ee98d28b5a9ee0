//! The player entity
//!
//! Movement, the jump/combo state machine, platform and enemy collisions, the
//! window capture sequence, and damage/respawn handling. Everything advances
//! from `Player::update`, called once per frame by the host.

use glam::Vec2;
use rand::Rng;

use super::collision::{Circle, Rect, circle_rect_overlap, swept_rect};
use super::enemy::{Enemy, EnemyKind};
use super::event::{ParticleSpawn, SimEvent, SoundCue, colors};
use super::level::{ChestState, Debris, DebrisState, Platform, PlatformKind, WindowKind, WindowState};
use super::state::Scroll;
use crate::consts::{CLOUD_PARTICLES, LANDING_PARTICLES, PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::tuning::Tuning;
use crate::{integrate, lerp};

/// Held input flags for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keys {
    /// Look up (enter window traps)
    pub up: bool,
    /// Drop through passable surfaces
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Jump held (releasing early cuts the jump short)
    pub space: bool,
}

/// Per-frame inputs to `Player::update` that are not entity collections
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerFrame {
    pub keys: Keys,
    pub scroll: Scroll,
    /// Cheat: keep the player invincible indefinitely
    pub invincibility_cheat: bool,
    /// The reward subsystem is still paying out (coins spawning or animating)
    pub reward_active: bool,
}

/// Window capture sequence
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CaptureState {
    #[default]
    Free,
    /// Frozen while the window reaches out; progress 0-1
    Reaching { progress: f32 },
    /// Shrinking toward the window; progress 0-1, consumed at 1
    Pulling { progress: f32 },
}

/// Where a pending reward came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardSource {
    Window,
    Chest,
}

/// Output of one player update
#[derive(Debug, Clone, Default)]
pub struct PlayerUpdate {
    pub particles: Vec<ParticleSpawn>,
    pub events: Vec<SimEvent>,
    /// Index of the nearest landed debris in pickup range
    pub closest_debris: Option<usize>,
}

/// The player (one per session)
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Position at the start of the current frame's physics
    pub last_pos: Vec2,
    /// Facing: 1 right, -1 left
    pub direction: f32,

    pub health: u8,
    pub max_health: u8,
    pub is_invincible: bool,
    pub invincibility_timer: f32,

    /// Airborne this frame
    pub is_jumping: bool,
    /// Standing on something that can be dropped through
    pub on_passable_surface: bool,
    pub jumps_left: u8,
    /// Jump combo stage (0-2)
    pub jump_combo_count: u8,
    /// Time left to chain the next grounded jump into the combo
    pub jump_combo_timer: f32,
    pub is_somersaulting: bool,
    /// Somersault rotation in radians
    pub rotation: f32,
    pub coyote_timer: f32,

    pub capture: CaptureState,
    pub capture_start: Vec2,
    pub capture_end: Vec2,
    /// Platform whose window captured the player
    pub captured_by: Option<usize>,

    /// While positive the player is frozen
    pub reward_cooldown: f32,
    pub reward_platform: Option<usize>,
    pub reward_source: Option<RewardSource>,
    /// Platform whose closed chest is within reach
    pub chest_in_range: Option<usize>,

    /// Debris being carried (index into the host's debris list)
    pub held_debris: Option<usize>,
    pub debris_in_range: Option<usize>,

    /// Events produced outside `update` (jump, respawn), delivered with the next update
    events: Vec<SimEvent>,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            last_pos: pos,
            direction: 1.0,
            health: tuning.initial_health,
            max_health: tuning.initial_health,
            is_invincible: false,
            invincibility_timer: 0.0,
            is_jumping: false,
            on_passable_surface: false,
            jumps_left: tuning.max_jumps,
            jump_combo_count: 0,
            jump_combo_timer: 0.0,
            is_somersaulting: false,
            rotation: 0.0,
            coyote_timer: 0.0,
            capture: CaptureState::Free,
            capture_start: pos,
            capture_end: pos,
            captured_by: None,
            reward_cooldown: 0.0,
            reward_platform: None,
            reward_source: None,
            chest_in_range: None,
            held_debris: None,
            debris_in_range: None,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Health ran out; handled by the host's game-state logic
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn is_captured(&self) -> bool {
        self.capture != CaptureState::Free
    }

    /// Fully pulled into a window; stays hidden until `respawn_in_tower`
    pub fn is_consumed(&self) -> bool {
        matches!(self.capture, CaptureState::Pulling { progress } if progress >= 1.0)
    }

    /// Drain events produced by calls made outside `update`
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn can_jump(&self) -> bool {
        self.jumps_left > 0 || self.coyote_timer > 0.0
    }

    /// Start a jump (or a mid-air jump).
    ///
    /// Grounded jumps chain into a combo while the combo window is open; a
    /// mid-air jump at combo stage 2 is the boosted somersault jump.
    pub fn jump(&mut self, tuning: &Tuning) {
        if !self.can_jump() {
            return;
        }

        let mut force = tuning.jump_force;

        // Coyote time counts as still standing
        if self.coyote_timer > 0.0 {
            self.is_jumping = false;
            self.jumps_left = tuning.max_jumps;
        }

        if !self.is_jumping {
            if self.jump_combo_timer > 0.0 && self.jump_combo_count < 2 {
                self.jump_combo_count += 1;
            } else {
                self.jump_combo_count = 1;
            }
        } else {
            if self.jump_combo_count == 2 {
                force = tuning.triple_jump_force;
                self.is_somersaulting = true;
            }
            self.jump_combo_count = 0;
        }

        self.vel.y = -force;
        self.is_jumping = true;
        self.jumps_left = self.jumps_left.saturating_sub(1);
        self.coyote_timer = 0.0;
        self.jump_combo_timer = 0.0;
        self.events.push(SimEvent::Sound(SoundCue::Jump));
    }

    /// Take one point of damage unless invincible or captured.
    ///
    /// Returns whether the hit landed.
    pub fn take_damage(&mut self, knockback: bool, tuning: &Tuning) -> bool {
        if self.is_invincible || self.is_captured() {
            return false;
        }

        self.apply_damage(tuning);
        if knockback {
            self.vel.y = -tuning.jump_force / 2.0;
        }
        true
    }

    /// Unconditional hit: health, combo reset, sound and invincibility
    fn apply_damage(&mut self, tuning: &Tuning) {
        self.health = self.health.saturating_sub(1);
        self.jump_combo_count = 0;
        self.is_somersaulting = false;
        self.events.push(SimEvent::Sound(SoundCue::Damage));
        self.start_invincibility(tuning);

        log::debug!("Player hit, health {}/{}", self.health, self.max_health);
        if self.is_dead() {
            log::info!("Player died at {:?}", self.pos);
        }
    }

    fn start_invincibility(&mut self, tuning: &Tuning) {
        self.is_invincible = true;
        self.invincibility_timer = tuning.invincibility_duration;
    }

    /// Freeze the player while a reward plays out
    pub fn start_reward_cooldown(&mut self, seconds: f32) {
        self.reward_cooldown = self.reward_cooldown.max(seconds);
    }

    /// Let an active window grab the player.
    ///
    /// Reward windows pay out coins instead of capturing. No-op unless the
    /// window is active and the player is free and vulnerable.
    pub fn get_captured(&mut self, index: usize, platform: &mut Platform, window_center: Vec2, tuning: &Tuning) {
        let Some(window) = platform.window.as_mut() else {
            return;
        };
        if window.state != WindowState::Active || self.is_captured() || self.is_invincible {
            return;
        }

        window.state = WindowState::InProgress;

        match window.kind {
            WindowKind::Reward => {
                self.reward_platform = Some(index);
                self.reward_source = Some(RewardSource::Window);
                self.events.push(SimEvent::CoinReward {
                    pos: Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y),
                    count: tuning.window_reward_coins,
                });
                log::debug!("Reward window {} triggered", index);
            }
            WindowKind::Normal => {
                self.capture = CaptureState::Reaching { progress: 0.0 };
                self.captured_by = Some(index);
                self.capture_start = self.pos;
                self.capture_end = window_center;
                self.vel = Vec2::ZERO;
                log::debug!("Captured by window {} at {:?}", index, window_center);
            }
        }
    }

    /// Open the chest in range and request its coins.
    ///
    /// Returns whether a chest was opened.
    pub fn interact_with_chest(&mut self, platforms: &mut [Platform], tuning: &Tuning) -> bool {
        if self.reward_platform.is_some() {
            return false;
        }
        let Some(index) = self.chest_in_range else {
            return false;
        };
        let Some(platform) = platforms.get_mut(index) else {
            return false;
        };
        if platform.chest != Some(ChestState::Closed) {
            return false;
        }

        platform.chest = Some(ChestState::Open);
        let chest = platform.chest_rect();
        self.reward_platform = Some(index);
        self.reward_source = Some(RewardSource::Chest);
        self.chest_in_range = None;
        self.events.push(SimEvent::CoinReward {
            pos: Vec2::new(chest.center().x, chest.y),
            count: tuning.chest_reward_coins,
        });
        log::debug!("Chest on platform {} opened", index);
        true
    }

    /// Pick up a landed piece of debris. Only one can be held at a time.
    pub fn pick_up_debris(&mut self, index: usize, debris: &mut [Debris]) -> bool {
        if self.held_debris.is_some() {
            return false;
        }
        let Some(piece) = debris.get_mut(index) else {
            return false;
        };
        if piece.state != DebrisState::Landed {
            return false;
        }

        piece.state = DebrisState::Held;
        self.held_debris = Some(index);
        self.debris_in_range = None;
        true
    }

    /// Let go of held debris; the host takes over its flight
    pub fn release_debris(&mut self, debris: &mut [Debris]) -> Option<usize> {
        let index = self.held_debris.take()?;
        if let Some(piece) = debris.get_mut(index) {
            piece.state = DebrisState::Thrown;
        }
        Some(index)
    }

    /// Advance the player one frame.
    ///
    /// Order matters: input, vertical integration, enemy hits, windows,
    /// obstacles, then platform landings. Defeated enemies are removed from
    /// `enemies` in place.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        frame: &PlayerFrame,
        platforms: &mut [Platform],
        enemies: &mut Vec<Enemy>,
        debris: &mut [Debris],
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> PlayerUpdate {
        let mut particles = Vec::new();
        let keys = frame.keys;

        self.release_finished_reward(platforms, frame.reward_active);

        if self.reward_cooldown > 0.0 {
            self.reward_cooldown -= dt;
            return self.finish(particles, None);
        }

        if self.is_captured() {
            self.advance_capture(dt, tuning);
            return self.finish(particles, None);
        }

        self.tick_invincibility(dt, frame.invincibility_cheat);

        self.last_pos = self.pos;

        // Horizontal: velocity straight from input
        self.vel.x = 0.0;
        if keys.right {
            self.vel.x += tuning.player_speed;
            self.direction = 1.0;
        }
        if keys.left {
            self.vel.x -= tuning.player_speed;
            self.direction = -1.0;
        }
        integrate(&mut self.pos, Vec2::new(self.vel.x, 0.0), dt);

        let (on_solid, on_cloud) = self.scan_platforms(platforms, tuning);
        let was_jumping = self.is_jumping;

        // Vertical
        if keys.down && self.on_passable_surface {
            self.pos.y += tuning.fast_drop_nudge;
            self.vel.y = tuning.fast_drop_speed;
        } else if on_cloud && !on_solid {
            self.vel.y = tuning.slow_fall_speed;
            if was_jumping {
                self.jumps_left = tuning.max_jumps;
            }
            let feet = Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y);
            particles.extend((0..CLOUD_PARTICLES).map(|_| ParticleSpawn::cloud_wisp(feet, colors::CLOUD_WISP, &mut *rng)));
        } else {
            self.vel.y += tuning.gravity * dt;
        }

        if self.vel.y < 0.0 && self.is_jumping && !keys.space {
            self.vel.y *= tuning.jump_release_damping;
        }
        integrate(&mut self.pos, Vec2::new(0.0, self.vel.y), dt);

        if self.jump_combo_timer > 0.0 {
            self.jump_combo_timer -= dt;
            if self.jump_combo_timer <= 0.0 {
                self.jump_combo_count = 0;
            }
        }

        if self.is_somersaulting {
            self.rotation += tuning.somersault_spin * dt * self.direction;
        }

        self.clamp_to_view(&frame.scroll, tuning);
        self.carry_debris(debris, tuning);

        // Collisions run against this snapshot of the player's box
        let body = self.bounds();

        self.is_jumping = true;
        self.on_passable_surface = false;
        let mut landed_on_wall = false;
        let mut landed_on_platform = false;

        self.resolve_enemy_hits(enemies, &frame.scroll, &body, tuning);
        self.chest_in_range = self.nearest_chest(platforms, tuning);

        for (index, platform) in platforms.iter_mut().enumerate() {
            if platform.window.is_some() && keys.up {
                let window = platform.window_rect();
                if body.overlaps(&window) {
                    self.get_captured(index, platform, window.center(), tuning);
                }
            }

            let contact = self.resolve_obstacles(platform, &body, tuning);
            if contact.landed_on_wall {
                landed_on_wall = true;
            }

            if !contact.on_surface && self.lands_on(&platform.rect) {
                self.is_jumping = false;
                if platform.kind == PlatformKind::PassThroughSlow {
                    self.on_passable_surface = true;
                } else {
                    self.vel.y = 0.0;
                    self.pos.y = platform.rect.y - self.size.y;
                    self.on_passable_surface = platform.kind != PlatformKind::Falling;
                    landed_on_platform = true;
                    landed_on_wall = false;
                    if platform.kind == PlatformKind::Falling && !platform.is_falling {
                        platform.is_falling = true;
                        log::debug!("Platform {} starts falling", index);
                    }
                }
            }
        }

        if was_jumping && !self.is_jumping {
            self.jumps_left = tuning.max_jumps;
            self.is_somersaulting = false;
            self.rotation = 0.0;
            self.jump_combo_timer = tuning.jump_combo_window;
            self.events.push(SimEvent::Sound(SoundCue::Land));

            if landed_on_platform || landed_on_wall || on_cloud {
                let color = if landed_on_wall {
                    colors::LANDING_WALL
                } else {
                    colors::LANDING_GROUND
                };
                let feet = Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y);
                particles.extend((0..LANDING_PARTICLES).map(|_| ParticleSpawn::landing_dust(feet, color, &mut *rng)));
            }
        }

        if self.is_jumping {
            self.coyote_timer -= dt;
        } else {
            self.coyote_timer = tuning.coyote_time;
        }

        self.debris_in_range = self.nearest_debris(debris, tuning);
        let closest = self.debris_in_range;
        self.finish(particles, closest)
    }

    fn finish(&mut self, particles: Vec<ParticleSpawn>, closest_debris: Option<usize>) -> PlayerUpdate {
        PlayerUpdate {
            particles,
            events: self.take_events(),
            closest_debris,
        }
    }

    /// Close the window of a finished window reward and forget the reward platform
    fn release_finished_reward(&mut self, platforms: &mut [Platform], reward_active: bool) {
        let Some(index) = self.reward_platform else {
            return;
        };
        if reward_active {
            return;
        }

        if self.reward_source == Some(RewardSource::Window) {
            if let Some(window) = platforms.get_mut(index).and_then(|p| p.window.as_mut()) {
                window.state = WindowState::Closed;
            }
        }
        self.reward_platform = None;
        self.reward_source = None;
    }

    fn advance_capture(&mut self, dt: f32, tuning: &Tuning) {
        match self.capture {
            CaptureState::Reaching { progress } => {
                let progress = progress + dt / tuning.capture_reach_duration;
                if progress >= 1.0 {
                    self.capture = CaptureState::Pulling { progress: 0.0 };
                    log::debug!("Capture: pulling");
                } else {
                    self.capture = CaptureState::Reaching { progress };
                }
            }
            CaptureState::Pulling { progress } => {
                let progress = (progress + dt / tuning.capture_pull_duration).min(1.0);
                self.pos = if progress >= 1.0 {
                    self.capture_end
                } else {
                    lerp(self.capture_start, self.capture_end, progress)
                };
                self.capture = CaptureState::Pulling { progress };
            }
            CaptureState::Free => {}
        }
    }

    fn tick_invincibility(&mut self, dt: f32, cheat: bool) {
        if cheat {
            self.is_invincible = true;
        }
        if self.is_invincible {
            self.invincibility_timer -= dt;
            if self.invincibility_timer <= 0.0 && !cheat {
                self.is_invincible = false;
            }
        }
    }

    /// Pre-scan: (standing over a solid platform, sinking into a cloud)
    fn scan_platforms(&self, platforms: &[Platform], tuning: &Tuning) -> (bool, bool) {
        let body = self.bounds();
        let last_bottom = self.last_pos.y + self.size.y;
        let mut on_solid = false;
        let mut on_cloud = false;

        for platform in platforms {
            if self.vel.y < 0.0 || !body.spans_x(&platform.rect) {
                continue;
            }
            match platform.kind {
                PlatformKind::Stable | PlatformKind::Falling => {
                    if body.bottom() >= platform.rect.y
                        && last_bottom <= platform.rect.y + tuning.solid_landing_tolerance
                    {
                        on_solid = true;
                    }
                }
                PlatformKind::PassThroughSlow if !on_solid => {
                    let swept = swept_rect(&body, self.last_pos.y);
                    let surface = Rect::new(
                        platform.rect.x,
                        platform.rect.y,
                        platform.rect.w,
                        tuning.cloud_surface_thickness,
                    );
                    if swept.overlaps(&surface) {
                        on_cloud = true;
                    }
                }
                PlatformKind::PassThroughSlow => {}
            }
        }

        (on_solid, on_cloud)
    }

    /// Came down onto the top of `surface` this frame
    pub(super) fn lands_on(&self, surface: &Rect) -> bool {
        let bottom = self.pos.y + self.size.y;
        let last_bottom = self.last_pos.y + self.size.y;
        self.vel.y >= 0.0 && self.bounds().spans_x(surface) && bottom >= surface.y && last_bottom <= surface.y
    }

    fn clamp_to_view(&mut self, scroll: &Scroll, tuning: &Tuning) {
        if scroll.vertical {
            if self.pos.x < 0.0 {
                self.pos.x = 0.0;
            }
            if self.pos.x + self.size.x > tuning.canvas_width {
                self.pos.x = tuning.canvas_width - self.size.x;
            }
        } else {
            let left_edge = scroll.offset + tuning.scroll_edge_margin;
            if self.pos.x < left_edge {
                self.pos.x = left_edge;
            }
        }
    }

    /// Held debris rides centered above the player's head
    fn carry_debris(&self, debris: &mut [Debris], tuning: &Tuning) {
        let Some(piece) = self.held_debris.and_then(|i| debris.get_mut(i)) else {
            return;
        };
        piece.rect.x = self.pos.x + self.size.x / 2.0 - piece.rect.w / 2.0;
        piece.rect.y = self.pos.y - piece.rect.h - tuning.held_debris_gap;
    }

    /// Test every enemy against the player, newest first.
    ///
    /// Rebound enemies bounce instead of being defeated. Other enemies hurt the
    /// player and are removed, unless the player is invincible, in which case
    /// they are left alone. Removal is deferred until the pass is done.
    fn resolve_enemy_hits(&mut self, enemies: &mut Vec<Enemy>, scroll: &Scroll, body: &Rect, tuning: &Tuning) {
        let screen_body = body.offset_by(scroll.screen_offset());
        let mut defeated = vec![false; enemies.len()];

        for index in (0..enemies.len()).rev() {
            let enemy = &mut enemies[index];
            let bounds = enemy.bounds();
            let player_box = if enemy.screen_space { &screen_body } else { body };

            let hit = match enemy.kind() {
                EnemyKind::FallingRock => body.overlaps(&bounds),
                EnemyKind::Patrol => player_box.overlaps(&bounds),
                _ => circle_rect_overlap(&Circle::inscribed(&bounds), player_box),
            };
            if !hit {
                continue;
            }

            if enemy.kind() == EnemyKind::Rebound {
                if let Some(event) = enemy.rebound(scroll.offset) {
                    self.events.push(event);
                }
            } else if !self.is_invincible {
                self.take_damage(true, tuning);
                defeated[index] = true;
                log::debug!("Enemy {:?} defeated on contact", enemy.kind());
            }
        }

        if defeated.contains(&true) {
            let mut flags = defeated.into_iter();
            enemies.retain(|_| !flags.next().unwrap_or(false));
        }
    }

    fn nearest_chest(&self, platforms: &[Platform], tuning: &Tuning) -> Option<usize> {
        let center = self.center();
        platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| p.chest == Some(ChestState::Closed))
            .map(|(i, p)| (i, center.distance(p.chest_rect().center())))
            .filter(|(_, d)| *d < tuning.chest_prompt_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn nearest_debris(&self, debris: &[Debris], tuning: &Tuning) -> Option<usize> {
        if self.held_debris.is_some() {
            return None;
        }
        let center = self.center();
        debris
            .iter()
            .enumerate()
            .filter(|(_, d)| d.state == DebrisState::Landed)
            .map(|(i, d)| (i, center.distance(d.rect.center())))
            .filter(|(_, d)| *d < tuning.debris_pickup_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Respawn after falling out of the tower.
    ///
    /// Always costs a point of health. Picks the lowest visible platform that
    /// is neither a cloud nor guarded by ceiling spikes, else screen center.
    pub fn trigger_fall_respawn(&mut self, platforms: &[Platform], vertical_offset: f32, tuning: &Tuning) {
        self.apply_damage(tuning);
        if self.is_dead() {
            return;
        }

        let view_bottom = vertical_offset + tuning.canvas_height;
        let target = platforms
            .iter()
            .filter(|p| p.rect.y > vertical_offset && p.rect.y < view_bottom)
            .filter(|p| !p.is_cloud() && !p.has_ceiling_spikes())
            .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y));

        self.pos = match target {
            Some(p) => Vec2::new(
                p.rect.center().x - self.size.x / 2.0,
                p.rect.y - self.size.y - tuning.fall_respawn_lift,
            ),
            None => Vec2::new(
                tuning.canvas_width / 2.0 - self.size.x / 2.0,
                vertical_offset + tuning.canvas_height / 2.0,
            ),
        };
        log::debug!("Fall respawn at {:?}", self.pos);
        self.reset_after_respawn(tuning);
    }

    /// Respawn after damage in horizontal mode.
    ///
    /// Always costs a point of health. Drops the player above the nearest
    /// visible platform without walls or spikes.
    pub fn respawn(&mut self, platforms: &[Platform], scroll_offset: f32, tuning: &Tuning) {
        self.health = self.health.saturating_sub(1);
        if self.is_dead() {
            log::info!("Player died at {:?}", self.pos);
            return;
        }
        self.events.push(SimEvent::Sound(SoundCue::Damage));
        self.start_invincibility(tuning);

        let view_right = scroll_offset + tuning.canvas_width;
        let x = self.pos.x;
        let target = platforms
            .iter()
            .filter(|p| p.rect.right() > scroll_offset && p.rect.x < view_right)
            .filter(|p| !p.obstacles.iter().any(|o| o.blocks_respawn()))
            .min_by(|a, b| {
                (a.rect.center().x - x)
                    .abs()
                    .total_cmp(&(b.rect.center().x - x).abs())
            });

        self.pos = match target {
            Some(p) => Vec2::new(
                p.rect.center().x - self.size.x / 2.0,
                p.rect.y - self.size.y - tuning.damage_respawn_lift,
            ),
            None => Vec2::new(scroll_offset + 100.0, 100.0),
        };
        log::debug!("Respawn at {:?}", self.pos);
        self.reset_after_respawn(tuning);
    }

    /// Put a captured player back on the platform whose window took them
    pub fn respawn_in_tower(&mut self, platforms: &mut [Platform], tuning: &Tuning) {
        let Some(index) = self.captured_by else {
            return;
        };
        let Some(platform) = platforms.get_mut(index) else {
            return;
        };

        if let Some(window) = platform.window.as_mut() {
            window.state = WindowState::Closed;
        }

        self.pos = Vec2::new(
            platform.rect.center().x - self.size.x / 2.0,
            platform.rect.y - self.size.y - tuning.tower_respawn_lift,
        );
        self.capture = CaptureState::Free;
        self.captured_by = None;
        log::debug!("Tower respawn on platform {}", index);
        self.reset_after_respawn(tuning);
    }

    fn reset_after_respawn(&mut self, tuning: &Tuning) {
        self.vel.y = 0.0;
        self.jumps_left = tuning.max_jumps;
    }
}
