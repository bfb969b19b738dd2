//! Hoppy entry point
//!
//! Headless demo driver. Stands in for the host framework: feeds wall time
//! to the fixed-step sim through an accumulator, emulates the physics
//! collaborator's contact reports (goal sensor crossings, ground strikes)
//! and drains the event queue into the log.

use hoppy::Session;
use hoppy::consts::{MAX_SUBSTEPS, SIM_DT};
use hoppy::sim::{BodyTag, GameEvent, GamePhase, GameState, TickInput, on_contact, tick};

/// Viewport-space y of the ground surface the emulated physics collides
/// against (top of the ground tiles)
const GROUND_SURFACE_Y: f32 = 20.0;

/// One run plus the host-side scaffolding around it
struct Demo {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    /// Stop tapping once this many points are in, letting the hero drop
    retire_at: u32,
}

impl Demo {
    fn new(state: GameState, retire_at: u32) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            retire_at,
        }
    }

    /// Feed a frame's worth of wall time to the fixed-step sim
    fn update(&mut self, frame_dt: f32) {
        let frame_dt = frame_dt.min(0.1);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input;
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.tap = false;

            self.emulate_contacts();
            self.drain_events();
            self.decide_input();
        }
    }

    /// The contact reports the host physics engine would deliver
    fn emulate_contacts(&mut self) {
        if self.state.phase != GamePhase::Active {
            return;
        }

        // Goal sensor: an obstacle's spawn line crossed the hero's column
        // during this tick's scroll step
        let hero_x = self.state.hero.pos.x;
        let step = self.state.scroll_speed * SIM_DT;
        let crossings = self
            .state
            .obstacle_layer
            .obstacles
            .iter()
            .filter(|o| {
                let world_x = self.state.obstacle_layer.to_world(o.local_x);
                world_x <= hero_x && world_x + step > hero_x
            })
            .count();
        for _ in 0..crossings {
            on_contact(&mut self.state, BodyTag::Hero, BodyTag::Goal);
        }

        // Terrain: the hero dropped onto the ground plane
        if self.state.hero.pos.y <= GROUND_SURFACE_Y && self.state.hero.collision_enabled {
            on_contact(&mut self.state, BodyTag::Hero, BodyTag::Ground);
        }
    }

    /// Naive autopilot: flap whenever falling below the start height,
    /// until the retirement score is reached
    fn decide_input(&mut self) {
        let state = &self.state;
        if state.points >= self.retire_at {
            return;
        }
        self.input.tap = state.hero.vel.y < 0.0 && state.hero.pos.y < state.tuning.hero_start_y;
    }

    /// What the renderer/audio/UI collaborators would consume
    fn drain_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(sfx) => log::debug!("play {}", sfx.asset_name()),
                GameEvent::ScoreChanged {
                    points,
                    level,
                    is_record,
                } => {
                    log::info!("score {points} (level {level}, record hint: {is_record})");
                }
                GameEvent::LevelUp {
                    level,
                    scroll_speed,
                } => log::info!("level {level}, scroll speed now {scroll_speed}"),
                GameEvent::RunEnded {
                    points,
                    high_score,
                    new_record,
                } => {
                    log::info!("run ended: {points} points, best {high_score} (new record: {new_record})");
                }
                other => log::debug!("{other:?}"),
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB0B);

    let mut session = Session::new();
    for run_index in 0..3u64 {
        let retire_at = 6 + 3 * run_index as u32;
        let mut demo = Demo::new(session.new_run(seed + run_index), retire_at);
        log::info!(
            "starting run {} (seed {}, carryover best {})",
            run_index + 1,
            seed + run_index,
            session.high_score()
        );

        // Drive at the expected frame cadence with a safety cap
        let mut frames = 0u32;
        while demo.state.phase == GamePhase::Active && frames < 60 * 120 {
            demo.update(SIM_DT);
            frames += 1;
        }

        session.commit(&demo.state);
    }

    log::info!("session best: {}", session.high_score());
}
