//! Level data consumed by the simulation
//!
//! Platforms, obstacles and boss debris are built and owned by the host. The
//! simulation reads their geometry and writes back a handful of state flags
//! (`is_falling`, window and chest state, debris state).

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::{CHEST_HEIGHT, CHEST_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH};

/// Platform behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformKind {
    #[default]
    Stable,
    /// Starts falling once landed on (animated and removed by the host)
    Falling,
    /// Cloud: the player sinks through slowly instead of standing on it
    PassThroughSlow,
}

/// Spikes sticking out of a wall's left face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralSpikes {
    pub protrusion: f32,
    /// Offset from the wall top
    pub y_offset: f32,
    pub height: f32,
}

/// Obstacle type and type-specific geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ObstacleKind {
    Wall {
        #[serde(default)]
        lateral_spikes: Option<LateralSpikes>,
    },
    Spike,
    /// Hangs from the platform's underside
    #[serde(rename = "spike-down")]
    SpikeDown,
    WallWithTopSpikes { wall_height: f32, spike_height: f32 },
    /// Decoration only
    Bush,
}

/// An obstacle placed on a platform (x is relative to the platform's left edge)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    #[serde(flatten)]
    pub kind: ObstacleKind,
}

/// Collision boxes of one obstacle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleHitboxes {
    /// Wall body, spike body, or the ceiling spike
    pub main: Rect,
    /// Spike cap on top of a `WallWithTopSpikes`
    pub spike_cap: Option<Rect>,
    pub lateral_spikes: Option<Rect>,
}

impl ObstacleHitboxes {
    /// The surface the player can come down on: the spike cap if any, else the body
    pub fn top_surface(&self) -> Rect {
        self.spike_cap.unwrap_or(self.main)
    }
}

impl Obstacle {
    /// World-space hitboxes for this obstacle on `platform`; `None` for bushes
    pub fn hitboxes(&self, platform: &Rect) -> Option<ObstacleHitboxes> {
        let left = platform.x + self.x;
        match self.kind {
            ObstacleKind::Bush => None,
            ObstacleKind::Spike => Some(ObstacleHitboxes {
                main: Rect::new(left, platform.y - self.height, self.width, self.height),
                spike_cap: None,
                lateral_spikes: None,
            }),
            ObstacleKind::SpikeDown => Some(ObstacleHitboxes {
                main: Rect::new(left, platform.bottom(), self.width, self.height),
                spike_cap: None,
                lateral_spikes: None,
            }),
            ObstacleKind::Wall { lateral_spikes } => {
                let top = platform.y - self.height;
                Some(ObstacleHitboxes {
                    main: Rect::new(left, top, self.width, self.height),
                    spike_cap: None,
                    lateral_spikes: lateral_spikes.map(|s| {
                        Rect::new(left - s.protrusion, top + s.y_offset, s.protrusion, s.height)
                    }),
                })
            }
            ObstacleKind::WallWithTopSpikes {
                wall_height,
                spike_height,
            } => {
                let wall_top = platform.y - wall_height;
                Some(ObstacleHitboxes {
                    main: Rect::new(left, wall_top, self.width, wall_height),
                    spike_cap: Some(Rect::new(left, wall_top - spike_height, self.width, spike_height)),
                    lateral_spikes: None,
                })
            }
        }
    }

    /// Walls and spikes make a platform unsuitable for a damage respawn
    pub fn blocks_respawn(&self) -> bool {
        match self.kind {
            ObstacleKind::Wall { .. } | ObstacleKind::Spike | ObstacleKind::WallWithTopSpikes { .. } => {
                true
            }
            ObstacleKind::SpikeDown | ObstacleKind::Bush => false,
        }
    }
}

/// Chest lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestState {
    #[default]
    Closed,
    Open,
}

/// Window trap lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    #[default]
    Closed,
    /// Open and able to grab the player
    Active,
    /// A capture or reward is under way
    InProgress,
}

/// What happens when an active window is triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Pulls the player in
    #[default]
    Normal,
    /// Pays out coins instead
    Reward,
}

/// Window trap mounted on a platform
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowTrap {
    pub state: WindowState,
    pub kind: WindowKind,
}

/// A platform and everything mounted on it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Platform {
    #[serde(flatten)]
    pub rect: Rect,
    pub kind: PlatformKind,
    #[serde(default)]
    pub is_falling: bool,
    /// Chest state, if the platform carries a chest
    #[serde(default)]
    pub chest: Option<ChestState>,
    #[serde(default)]
    pub window: Option<WindowTrap>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Platform {
    pub fn new(rect: Rect, kind: PlatformKind) -> Self {
        Self {
            rect,
            kind,
            ..Default::default()
        }
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn with_chest(mut self) -> Self {
        self.chest = Some(ChestState::Closed);
        self
    }

    pub fn with_window(mut self, kind: WindowKind, state: WindowState) -> Self {
        self.window = Some(WindowTrap { state, kind });
        self
    }

    /// Cloud platforms are never respawn targets
    #[inline]
    pub fn is_cloud(&self) -> bool {
        self.kind == PlatformKind::PassThroughSlow
    }

    pub fn has_ceiling_spikes(&self) -> bool {
        self.obstacles.iter().any(|o| o.kind == ObstacleKind::SpikeDown)
    }

    /// Chest sprite box, centered on the platform top
    pub fn chest_rect(&self) -> Rect {
        Rect::new(
            self.rect.x + self.rect.w / 2.0 - CHEST_WIDTH / 2.0,
            self.rect.y - CHEST_HEIGHT,
            CHEST_WIDTH,
            CHEST_HEIGHT,
        )
    }

    /// Window trap hitbox, centered on the platform top
    pub fn window_rect(&self) -> Rect {
        Rect::new(
            self.rect.x + self.rect.w / 2.0 - WINDOW_WIDTH / 2.0,
            self.rect.y - WINDOW_HEIGHT,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
        )
    }
}

/// Boss debris lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebrisState {
    #[default]
    Falling,
    /// Resting on the ground; the only state that can be picked up
    Landed,
    Held,
    Thrown,
}

/// A chunk of boss debris the player can carry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Debris {
    #[serde(flatten)]
    pub rect: Rect,
    pub state: DebrisState,
}
