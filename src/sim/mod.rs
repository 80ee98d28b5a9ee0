//! Frame-stepped simulation
//!
//! All gameplay logic lives here:
//! - Variable timestep driven by the host (`dt` in seconds)
//! - Seeded RNG, and only for cosmetic randomness
//! - Side effects leave as particles and events, never as direct calls
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod event;
pub mod level;
pub mod obstacles;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Circle, Rect, circle_rect_overlap, rects_overlap, swept_rect};
pub use enemy::{Behavior, Enemy, EnemyKind, RockDetail};
pub use event::{ParticleSpawn, SimEvent, SoundCue};
pub use level::{
    ChestState, Debris, DebrisState, Obstacle, ObstacleKind, Platform, PlatformKind, WindowKind, WindowState,
    WindowTrap,
};
pub use obstacles::ObstacleContact;
pub use player::{CaptureState, Keys, Player, PlayerFrame, PlayerUpdate, RewardSource};
pub use state::{RngState, Scroll, World};
pub use tick::{FrameOutput, TickInput, tick};
