//! Flappy Bird headless driver
//!
//! Runs a session at a fixed 60 Hz with a simple autopilot and logs what
//! happens. A renderer would drive `GameSession::tick` the same way, once per
//! frame, and draw from `GameSession::snapshot`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use flappy_bird::audio::LogAudio;
    use flappy_bird::consts::SIM_DT;
    use flappy_bird::sim::GroupKind;
    use flappy_bird::{
        GameConfig, GameEvent, GamePhase, GameSession, JsonFileStore, MemoryStore, ScoreStore,
        TickInput,
    };

    /// Flappy Bird headless demo
    #[derive(Parser)]
    #[command(version, about = "Plays a headless Flappy Bird session with an autopilot")]
    struct Cli {
        /// RNG seed for wall and item placement
        #[arg(default_value_t = 1)]
        seed: u64,

        /// Simulated seconds to run
        #[arg(default_value_t = 60.0)]
        seconds: f32,

        /// JSON file holding the best score (in-memory when omitted)
        store: Option<PathBuf>,

        /// Game config JSON (defaults when omitted)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Dump the final frame as JSON to stdout
        #[arg(long)]
        dump_frame: bool,

        /// Silence sound cue logging
        #[arg(long)]
        mute: bool,
    }

    /// Tap when the bird sinks below the next gap's center
    fn autopilot<S: ScoreStore, A: flappy_bird::AudioSink>(session: &GameSession<S, A>) -> bool {
        if session.state().phase == GamePhase::GameOver {
            return true;
        }

        let bird = session.bird();
        let radius = bird.body.shape.half_extents().x;
        let scene = session.scene();
        let target = scene
            .groups()
            .iter()
            .filter(|g| g.kind == GroupKind::Obstacle)
            .filter(|g| g.anchor_x + g.half_width > bird.position().x - radius)
            .min_by(|a, b| a.anchor_x.total_cmp(&b.anchor_x))
            .and_then(|g| {
                let lower = scene.body(*g.members.first()?)?;
                let upper = scene.body(*g.members.get(1)?)?;
                Some((lower.position.y + upper.position.y) / 2.0)
            })
            .unwrap_or(session.config().playfield.height / 2.0);

        bird.velocity().y <= 0.0 && bird.position().y < target - radius * 2.0
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::parse();

        let config = match &cli.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        let store: Box<dyn ScoreStore> = match &cli.store {
            Some(path) => {
                let store = JsonFileStore::open(path)?;
                log::info!("Best score stored in {}", store.path().display());
                Box::new(store)
            }
            None => Box::new(MemoryStore::new()),
        };

        let mut session = GameSession::new(config, cli.seed, store, LogAudio::new())?;
        session.audio_mut().set_muted(cli.mute);
        let ticks = (cli.seconds / SIM_DT).round().max(0.0) as u64;
        log::info!("Running {} ticks with seed {}", ticks, session.rng_state().seed);

        let mut runs = 1u32;
        let mut scores = Vec::new();
        for _ in 0..ticks {
            let input = TickInput {
                tap: autopilot(&session),
            };
            for event in session.tick(&input, SIM_DT) {
                match event {
                    GameEvent::GameOver { score } => scores.push(score),
                    GameEvent::Restarted => runs += 1,
                    GameEvent::Scored { score } => log::debug!("Score {}", score),
                    _ => {}
                }
            }
        }

        let state = session.state();
        log::info!(
            "Finished after {:.1}s: {} runs, scores {:?}, current score {}, items {}, best {}",
            session.time(),
            runs,
            scores,
            state.score,
            state.item_score,
            state.best_score
        );

        if cli.dump_frame {
            println!("{}", session.snapshot().to_json()?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by the host page on wasm; nothing to run here
}
