//! Draw contract
//!
//! The host owns pixel output. This module turns the world into a list of
//! screen-space sprites it can draw in order.

pub mod sprites;

pub use sprites::{Outline, Sprite, SpriteShape, enemy_sprite, player_sprite};

use crate::sim::state::World;

/// Every visible entity of the world, enemies first so the player draws on top
pub fn world_sprites(world: &World) -> Vec<Sprite> {
    let mut sprites: Vec<Sprite> = world
        .enemies
        .iter()
        .filter_map(|e| enemy_sprite(e, &world.scroll, &world.settings))
        .collect();
    sprites.extend(player_sprite(&world.player, &world.scroll, &world.settings));
    sprites
}
