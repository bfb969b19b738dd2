//! Contact classification and the run-ending transition
//!
//! The host physics engine reports each contact as a pair of tagged bodies.
//! A pair involving the goal sensor scores; anything else the hero touched
//! is fatal and ends the run. Both paths are no-ops once the run is over.

use super::state::{GameEvent, GamePhase, GameState, Ripple, SoundEffect};

/// Which body a contact participant belongs to, as tagged by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTag {
    Hero,
    /// The gap sensor between an obstacle's pipes
    Goal,
    Ground,
    Obstacle,
}

/// Resolve one contact event from the host physics engine.
pub fn on_contact(state: &mut GameState, body_a: BodyTag, body_b: BodyTag) {
    if state.phase != GamePhase::Active {
        return;
    }

    if body_a == BodyTag::Goal || body_b == BodyTag::Goal {
        score(state);
    } else {
        fatal(state);
    }
}

/// The hero passed through a gap: a score event, not a collision.
fn score(state: &mut GameState) {
    // A fresh ripple replaces any active one
    if state.ripple.take().is_some() {
        state.push_event(GameEvent::RippleExpired);
    }
    let pos = state.hero.pos;
    state.ripple = Some(Ripple {
        pos,
        ttl: state.tuning.ripple_duration,
    });
    state.push_event(GameEvent::RippleSpawned { pos });
    state.push_event(GameEvent::Sound(SoundEffect::Goal));

    state.points += 1;
    let previous_level = state.level;
    state.level = state.points / state.tuning.points_per_level;
    if state.level != previous_level {
        state.scroll_speed += state.tuning.level_speed_step;
        state.push_event(GameEvent::LevelUp {
            level: state.level,
            scroll_speed: state.scroll_speed,
        });
    }

    // Display hint only; the high score itself is committed on death
    let is_record = state.points > state.high_score;
    state.push_event(GameEvent::ScoreChanged {
        points: state.points,
        level: state.level,
        is_record,
    });
}

/// The hero struck terrain or an obstacle: end the run.
fn fatal(state: &mut GameState) {
    state.phase = GamePhase::GameOver;

    let hero = &mut state.hero;
    hero.allows_rotation = false;
    hero.angular_vel = 0.0;
    // Face down in the dirt, and stop colliding so the body rests
    hero.rotation = state.tuning.rotation_min();
    hero.collision_enabled = false;

    state.push_event(GameEvent::HeroAnimationCancelled);
    state.push_event(GameEvent::Shake);

    let new_record = state.points > state.high_score;
    if new_record {
        state.high_score = state.points;
    }
    state.push_event(GameEvent::RunEnded {
        points: state.points,
        high_score: state.high_score,
        new_record,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_n(state: &mut GameState, n: u32) {
        for _ in 0..n {
            on_contact(state, BodyTag::Hero, BodyTag::Goal);
        }
    }

    #[test]
    fn goal_contact_scores_and_ripples() {
        let mut state = GameState::new(1, 0);
        on_contact(&mut state, BodyTag::Hero, BodyTag::Goal);

        assert_eq!(state.points, 1);
        assert_eq!(state.phase, GamePhase::Active);
        let ripple = state.ripple.expect("ripple spawned");
        assert_eq!(ripple.pos, state.hero.pos);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundEffect::Goal)));
        assert!(events.contains(&GameEvent::RippleSpawned {
            pos: state.hero.pos
        }));
    }

    #[test]
    fn goal_tag_order_does_not_matter() {
        let mut state = GameState::new(1, 0);
        on_contact(&mut state, BodyTag::Goal, BodyTag::Hero);
        assert_eq!(state.points, 1);
    }

    #[test]
    fn fifth_point_levels_up_and_speeds_up() {
        let mut state = GameState::new(1, 0);
        score_n(&mut state, 4);
        let base_speed = state.scroll_speed;
        assert_eq!(state.level, 0);
        state.drain_events();

        on_contact(&mut state, BodyTag::Hero, BodyTag::Goal);

        assert_eq!(state.points, 5);
        assert_eq!(state.level, 1);
        assert_eq!(state.scroll_speed, base_speed + state.tuning.level_speed_step);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LevelUp {
            level: 1,
            scroll_speed: state.scroll_speed,
        }));
        assert!(events.contains(&GameEvent::ScoreChanged {
            points: 5,
            level: 1,
            is_record: true,
        }));
    }

    #[test]
    fn level_tracks_points_between_steps() {
        let mut state = GameState::new(1, 0);
        for points in 1..=23u32 {
            on_contact(&mut state, BodyTag::Hero, BodyTag::Goal);
            assert_eq!(state.level, points / state.tuning.points_per_level);
        }
        // 4 level-ups worth of speed
        assert_eq!(
            state.scroll_speed,
            state.tuning.base_scroll_speed + 4.0 * state.tuning.level_speed_step
        );
    }

    #[test]
    fn no_record_hint_while_below_the_high_score() {
        let mut state = GameState::new(1, 10);
        score_n(&mut state, 3);

        let hinted = state.drain_events().iter().any(|e| {
            matches!(
                e,
                GameEvent::ScoreChanged {
                    is_record: true,
                    ..
                }
            )
        });
        assert!(!hinted);
    }

    #[test]
    fn rescore_replaces_the_active_ripple() {
        let mut state = GameState::new(1, 0);
        on_contact(&mut state, BodyTag::Hero, BodyTag::Goal);
        if let Some(ripple) = state.ripple.as_mut() {
            ripple.ttl = 0.5;
        }
        state.drain_events();

        on_contact(&mut state, BodyTag::Hero, BodyTag::Goal);

        let ripple = state.ripple.expect("ripple replaced");
        assert_eq!(ripple.ttl, state.tuning.ripple_duration);
        let events = state.drain_events();
        let expired = events.iter().position(|e| *e == GameEvent::RippleExpired);
        let spawned = events
            .iter()
            .position(|e| matches!(e, GameEvent::RippleSpawned { .. }));
        assert!(expired.unwrap() < spawned.unwrap());
    }

    #[test]
    fn fatal_contact_ends_the_run_in_the_death_pose() {
        let mut state = GameState::new(1, 0);
        state.hero.angular_vel = 1.5;

        on_contact(&mut state, BodyTag::Hero, BodyTag::Ground);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.hero.rotation, state.tuning.rotation_min());
        assert_eq!(state.hero.angular_vel, 0.0);
        assert!(!state.hero.allows_rotation);
        assert!(!state.hero.collision_enabled);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::HeroAnimationCancelled));
        assert!(events.contains(&GameEvent::Shake));
        assert!(events.contains(&GameEvent::RunEnded {
            points: 0,
            high_score: 0,
            new_record: false,
        }));
    }

    #[test]
    fn obstacle_hit_is_just_as_fatal() {
        let mut state = GameState::new(1, 0);
        on_contact(&mut state, BodyTag::Obstacle, BodyTag::Hero);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn death_commits_a_beaten_high_score() {
        let mut state = GameState::new(1, 10);
        score_n(&mut state, 12);
        state.drain_events();

        on_contact(&mut state, BodyTag::Hero, BodyTag::Ground);

        assert_eq!(state.high_score, 12);
        assert!(state.drain_events().contains(&GameEvent::RunEnded {
            points: 12,
            high_score: 12,
            new_record: true,
        }));
    }

    #[test]
    fn death_keeps_an_unbeaten_high_score() {
        let mut state = GameState::new(1, 10);
        score_n(&mut state, 3);
        on_contact(&mut state, BodyTag::Hero, BodyTag::Ground);
        assert_eq!(state.high_score, 10);
    }

    #[test]
    fn contacts_after_game_over_are_noops() {
        let mut state = GameState::new(1, 0);
        score_n(&mut state, 2);
        on_contact(&mut state, BodyTag::Hero, BodyTag::Ground);
        state.drain_events();

        on_contact(&mut state, BodyTag::Hero, BodyTag::Goal);
        on_contact(&mut state, BodyTag::Hero, BodyTag::Obstacle);

        assert_eq!(state.points, 2);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().is_empty());
    }
}
