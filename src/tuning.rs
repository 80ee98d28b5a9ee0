//! Data-driven game balance
//!
//! Every speed, duration and threshold the simulation reads lives here so a
//! level designer can tweak feel from JSON without touching code. Entities take
//! a `&Tuning` instead of reaching for module-level constants.

use serde::{Deserialize, Serialize};

/// Gameplay tuning values (units: pixels and seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    /// Visible canvas width (vertical-scroll clamp, respawn visibility)
    pub canvas_width: f32,
    /// Visible canvas height (fall-respawn visibility)
    pub canvas_height: f32,

    // === Player movement ===
    pub player_speed: f32,
    pub gravity: f32,
    pub jump_force: f32,
    /// Force of the third jump of a combo (somersault)
    pub triple_jump_force: f32,
    /// Upward velocity multiplier per frame while jump is released
    pub jump_release_damping: f32,
    /// Fixed fall speed while sinking through a cloud platform
    pub slow_fall_speed: f32,
    /// Downward velocity when dropping through a passable surface
    pub fast_drop_speed: f32,
    /// Immediate downward nudge when dropping through a passable surface
    pub fast_drop_nudge: f32,
    pub max_jumps: u8,
    pub jump_combo_window: f32,
    pub coyote_time: f32,
    /// Somersault spin in radians per second
    pub somersault_spin: f32,
    /// Left margin kept from the scroll edge in horizontal mode
    pub scroll_edge_margin: f32,
    /// How far below the previous bottom a solid platform still counts as under the player
    pub solid_landing_tolerance: f32,
    /// Thickness of the cloud surface used by the swept test
    pub cloud_surface_thickness: f32,
    /// Gap between the player's head and held debris
    pub held_debris_gap: f32,

    // === Player health ===
    pub initial_health: u8,
    pub invincibility_duration: f32,
    /// Ceiling spikes bounce an ascending player down at this fraction of jump force
    pub spike_down_bounce: f32,

    // === Capture / rewards ===
    pub capture_reach_duration: f32,
    pub capture_pull_duration: f32,
    pub chest_prompt_distance: f32,
    pub debris_pickup_distance: f32,
    pub window_reward_coins: u32,
    pub chest_reward_coins: u32,

    // === Respawn ===
    /// Height above the chosen platform after falling out of the level
    pub fall_respawn_lift: f32,
    /// Height above the chosen platform after a horizontal-mode respawn
    pub damage_respawn_lift: f32,
    /// Height above the capturing platform after a tower respawn
    pub tower_respawn_lift: f32,

    // === Enemies ===
    /// Baseline enemy speed; trails get denser above `dense_trail_factor` times this
    pub enemy_speed: f32,
    pub dense_trail_factor: f32,
    /// Countdown before a charger fires itself at the player
    pub charger_delay: f32,
    pub charge_speed: f32,
    /// Speed of a rebounded projectile homing on the boss
    pub rebound_aimed_speed: f32,
    /// Constant vertical homing speed
    pub homing_attraction: f32,
    pub falling_rock_gravity: f32,
    /// Patrol walk-cycle speed (radians per second)
    pub patrol_anim_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,

            player_speed: 300.0,
            gravity: 1600.0,
            jump_force: 600.0,
            triple_jump_force: 780.0,
            jump_release_damping: 0.5,
            slow_fall_speed: 60.0,
            fast_drop_speed: 180.0,
            fast_drop_nudge: 5.0,
            max_jumps: 2,
            jump_combo_window: 0.3,
            coyote_time: 0.1,
            somersault_spin: 20.0,
            scroll_edge_margin: 10.0,
            solid_landing_tolerance: 10.0,
            cloud_surface_thickness: 5.0,
            held_debris_gap: 10.0,

            initial_health: 3,
            invincibility_duration: 1.5,
            spike_down_bounce: 0.3,

            capture_reach_duration: 0.6,
            capture_pull_duration: 1.0,
            chest_prompt_distance: 80.0,
            debris_pickup_distance: 70.0,
            window_reward_coins: 10,
            chest_reward_coins: 15,

            fall_respawn_lift: 50.0,
            damage_respawn_lift: 150.0,
            tower_respawn_lift: 5.0,

            enemy_speed: 150.0,
            dense_trail_factor: 1.8,
            charger_delay: 2.0,
            charge_speed: 400.0,
            rebound_aimed_speed: 600.0,
            homing_attraction: 60.0,
            falling_rock_gravity: 300.0,
            patrol_anim_speed: 8.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse tuning from JSON, logging and using defaults on failure
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Trail density threshold for enemies
    #[inline]
    pub fn dense_trail_speed(&self) -> f32 {
        self.enemy_speed * self.dense_trail_factor
    }
}
