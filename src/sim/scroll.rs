//! Parallax world scrolling
//!
//! Two layers move leftward each tick: ground at the current (level-scaled)
//! scroll speed, clouds at their own fixed speed. Each layer holds two tiles
//! and recycles whichever one leaves the viewport to sit flush against the
//! other, which reads as infinite terrain.

use crate::consts::VIEWPORT_LEFT;

use super::state::{GameState, ScrollLayer};

/// Advance both parallax layers and recycle their off-screen tiles.
pub fn scroll_world(state: &mut GameState, dt: f32) {
    state.ground.offset_x -= state.scroll_speed * dt;
    state.clouds.offset_x -= state.tuning.cloud_speed * dt;

    let margin = state.tuning.recycle_margin;
    recycle_offscreen(&mut state.ground, margin);
    recycle_offscreen(&mut state.clouds, margin);
}

/// Wrap any tile whose right edge has passed `margin` units beyond the
/// viewport's left edge around to the right end of the layer.
///
/// The new position abuts the rightmost remaining tile, so tiles of unequal
/// widths still tile seamlessly. Vertical offsets are untouched.
pub fn recycle_offscreen(layer: &mut ScrollLayer, margin: f32) {
    for i in 0..layer.tiles.len() {
        let tile = layer.tiles[i];
        let world_right = layer.to_world(tile.local_x) + tile.width;
        if world_right > VIEWPORT_LEFT - margin {
            continue;
        }

        // Right edge of the layer's other tile(s), in local space
        let next_local = layer
            .tiles
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, t)| t.local_x + t.width)
            .fold(f32::NEG_INFINITY, f32::max);
        if next_local.is_finite() {
            layer.tiles[i].local_x = next_local;
        }
    }
}
