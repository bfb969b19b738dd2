//! Fixed timestep simulation tick
//!
//! The game loop: hero physics and clamps, then world scrolling, then
//! obstacle upkeep. `dt` comes from the host frame driver (expected 1/60 s)
//! and is never hardcoded here.

use super::scroll;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState, SoundEffect};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Tap-down this frame; tap-move/tap-up are ignored by gameplay
    pub tap: bool,
}

/// Advance the run by one timestep. No-op once the run is over.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.ticks += 1;

    if input.tap {
        flap(state);
    }

    let tuning = state.tuning;
    let hero = &mut state.hero;

    // Body integration (the host physics step between frames)
    hero.vel.y += tuning.gravity_y * dt;
    hero.pos += hero.vel * dt;
    if hero.allows_rotation {
        hero.rotation += hero.angular_vel * dt;
    }

    // Cap vertical velocity so impulses can't rocket the hero off-screen
    if hero.vel.y > tuning.max_rise_speed {
        hero.vel.y = tuning.max_rise_speed;
    }

    // Falling rotation: once the last tap is stale, pitch the nose down
    if state.since_touch > tuning.fall_rotation_delay && hero.allows_rotation {
        hero.angular_vel += tuning.fall_angular_impulse * dt;
    }

    // Clamp pose
    hero.rotation = hero
        .rotation
        .clamp(tuning.rotation_min(), tuning.rotation_max());
    hero.angular_vel = hero
        .angular_vel
        .clamp(-tuning.max_angular_speed, tuning.max_angular_speed);

    state.since_touch += dt;

    scroll::scroll_world(state, dt);
    spawn::update_obstacles(state, dt);
    state.spawn_timer += dt;

    update_ripple(state, dt);
}

/// Apply the tap impulse.
///
/// Vertical velocity is zeroed first: replacing the accumulated fall speed
/// keeps taps responsive instead of fighting gravity's backlog.
fn flap(state: &mut GameState) {
    let tuning = state.tuning;
    let hero = &mut state.hero;
    hero.vel.y = 0.0;
    hero.vel.y += tuning.flap_impulse;
    hero.angular_vel += tuning.flap_angular_impulse;
    state.since_touch = 0.0;
    state.push_event(GameEvent::Sound(SoundEffect::Flap));
}

/// Count the ripple toward its one-shot removal
fn update_ripple(state: &mut GameState, dt: f32) {
    if let Some(ripple) = &mut state.ripple {
        ripple.ttl -= dt;
        if ripple.ttl <= 0.0 {
            state.ripple = None;
            state.push_event(GameEvent::RippleExpired);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::contact::{BodyTag, on_contact};

    const TAP: TickInput = TickInput { tap: true };
    const COAST: TickInput = TickInput { tap: false };

    #[test]
    fn tap_replaces_fall_velocity_and_emits_flap() {
        let mut state = GameState::new(1, 0);
        state.hero.vel.y = -500.0;

        tick(&mut state, &TAP, SIM_DT);

        // Impulse replaces the fall speed entirely, then gravity integrates
        let expected = state.tuning.flap_impulse + state.tuning.gravity_y * SIM_DT;
        assert!((state.hero.vel.y - expected).abs() < 1e-3);
        assert!((state.since_touch - SIM_DT).abs() < 1e-6);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Sound(SoundEffect::Flap))
        );
    }

    #[test]
    fn vertical_velocity_capped_at_ceiling() {
        let mut state = GameState::new(1, 0);
        state.hero.vel.y = 1000.0;

        tick(&mut state, &COAST, SIM_DT);

        assert!(state.hero.vel.y <= state.tuning.max_rise_speed);
    }

    #[test]
    fn falling_rotation_waits_for_stale_touch() {
        let mut state = GameState::new(1, 0);

        // Fresh tap: no falling impulse on the very next tick
        tick(&mut state, &TAP, SIM_DT);
        let after_tap = state.hero.angular_vel;
        assert!(after_tap > 0.0);

        // Let the touch go stale, then the nose-down impulse applies
        state.since_touch = 0.2;
        tick(&mut state, &COAST, SIM_DT);
        assert_eq!(state.hero.angular_vel, -state.tuning.max_angular_speed);
    }

    #[test]
    fn rotation_stays_clamped() {
        let mut state = GameState::new(1, 0);
        state.hero.rotation = 3.0;
        state.hero.angular_vel = 50.0;

        tick(&mut state, &COAST, SIM_DT);

        assert!(state.hero.rotation <= state.tuning.rotation_max() + 1e-6);
        assert!(state.hero.rotation >= state.tuning.rotation_min() - 1e-6);
        assert!(state.hero.angular_vel.abs() <= state.tuning.max_angular_speed);
    }

    #[test]
    fn gravity_pulls_the_hero_down() {
        let mut state = GameState::new(1, 0);
        let y0 = state.hero.pos.y;

        for _ in 0..30 {
            tick(&mut state, &COAST, SIM_DT);
        }

        assert!(state.hero.pos.y < y0);
        // Per-tick loss is exactly one gravity step, nothing more
        let expected = state.tuning.gravity_y * SIM_DT * 30.0;
        assert!((state.hero.vel.y - expected).abs() < 1e-2);
    }

    #[test]
    fn game_over_freezes_everything() {
        let mut state = GameState::new(1, 0);
        for _ in 0..120 {
            tick(&mut state, &TAP, SIM_DT);
        }
        on_contact(&mut state, BodyTag::Hero, BodyTag::Ground);
        state.drain_events();
        let frozen = state.clone();

        for _ in 0..60 {
            tick(&mut state, &TAP, SIM_DT);
        }

        assert_eq!(state.ticks, frozen.ticks);
        assert_eq!(state.hero, frozen.hero);
        assert_eq!(state.points, frozen.points);
        assert_eq!(state.ground, frozen.ground);
        assert_eq!(state.obstacle_layer, frozen.obstacle_layer);
        assert_eq!(state.spawn_timer, frozen.spawn_timer);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn ripple_expires_after_its_duration() {
        let mut state = GameState::new(1, 0);
        on_contact(&mut state, BodyTag::Hero, BodyTag::Goal);
        assert!(state.ripple.is_some());
        state.drain_events();

        let ticks = (state.tuning.ripple_duration / SIM_DT).ceil() as u32 + 1;
        for _ in 0..ticks {
            tick(&mut state, &TAP, SIM_DT);
        }

        assert!(state.ripple.is_none());
        assert!(state.drain_events().contains(&GameEvent::RippleExpired));
    }

    #[test]
    fn same_seed_same_inputs_same_run() {
        let mut a = GameState::new(0xDECAF, 0);
        let mut b = GameState::new(0xDECAF, 0);

        for i in 0..300u32 {
            let input = TickInput { tap: i % 17 == 0 };
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }

        a.drain_events();
        b.drain_events();
        assert_eq!(a.hero, b.hero);
        assert_eq!(a.obstacle_layer, b.obstacle_layer);
        assert_eq!(a.ground, b.ground);
        assert!(!a.obstacle_layer.obstacles.is_empty());
    }
}
