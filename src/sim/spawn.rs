//! Obstacle spawning and teardown
//!
//! Obstacles ride their own layer in lockstep with the ground. New ones
//! appear just past the right screen edge on a fixed cadence with a random
//! gap height; old ones are destroyed once they are fully behind the
//! viewport. The host instantiates/removes the obstacle asset in response
//! to the spawn/despawn events.

use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle};

/// Scroll the obstacle layer, cull obstacles that left the screen, and
/// spawn a new one when the timer has accumulated a full interval.
pub fn update_obstacles(state: &mut GameState, dt: f32) {
    state.obstacle_layer.offset_x -= state.scroll_speed * dt;

    let offset = state.obstacle_layer.offset_x;
    let despawn_x = state.tuning.despawn_x;
    let mut despawned = Vec::new();
    state.obstacle_layer.obstacles.retain(|o| {
        if offset + o.local_x <= despawn_x {
            despawned.push(o.id);
            false
        } else {
            true
        }
    });
    for id in despawned {
        state.push_event(GameEvent::ObstacleDespawned { id });
    }

    // One spawn per call even if the timer overshot (a long dt must not
    // burst-spawn a wall of obstacles)
    if state.spawn_timer >= state.tuning.spawn_interval {
        let y = state
            .rng
            .random_range(state.tuning.spawn_y_min..=state.tuning.spawn_y_max);
        let id = state.next_entity_id();
        let local_x = state.obstacle_layer.to_local(state.tuning.spawn_x);
        state.obstacle_layer.obstacles.push(Obstacle { id, local_x, y });
        state.spawn_timer = 0.0;
        state.push_event(GameEvent::ObstacleSpawned { id });
    }
}
