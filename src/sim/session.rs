//! Game session state machine
//!
//! Owns the game state, the bird, the scene and every collaborator. Only the
//! session mutates `GameState`; other components hand it new bodies or lists
//! of contacts and expired groups.

use rand_pcg::Pcg32;

use super::body::Body;
use super::collision::{CollisionResolver, Contact};
use super::scene::{GroupKind, Scene};
use super::scheduler::SpawnScheduler;
use super::scroll::ScrollController;
use super::spawn::{ItemGenerator, ObstacleGenerator};
use super::state::{Bird, GameEvent, GamePhase, GameState, RngState};
use crate::audio::{AudioCommand, AudioSink, NullAudio, Track};
use crate::config::GameConfig;
use crate::consts::BEST_SCORE_KEY;
use crate::error::ConfigError;
use crate::frame::FrameSnapshot;
use crate::persistence::{MemoryStore, ScoreStore};

pub struct GameSession<S: ScoreStore = MemoryStore, A: AudioSink = NullAudio> {
    pub(super) config: GameConfig,
    pub(super) state: GameState,
    pub(super) bird: Bird,
    pub(super) scene: Scene,
    pub(super) wall_spawner: SpawnScheduler,
    pub(super) item_spawner: SpawnScheduler,
    pub(super) walls: ObstacleGenerator,
    pub(super) items: ItemGenerator,
    pub(super) scroll: ScrollController,
    pub(super) contacts: CollisionResolver,
    pub(super) rng: Pcg32,
    rng_state: RngState,
    /// Simulation time since the session started
    pub(super) time: f32,
    store: S,
    audio: A,
}

impl GameSession {
    /// Default config, in-memory store, silent audio
    pub fn headless(seed: u64) -> Result<Self, ConfigError> {
        Self::new(GameConfig::default(), seed, MemoryStore::new(), NullAudio)
    }
}

impl<S: ScoreStore, A: AudioSink> GameSession<S, A> {
    /// Validate the config, lay out the scene and start the stage music
    pub fn new(config: GameConfig, seed: u64, store: S, mut audio: A) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut scene = Scene::new(&config);
        let bird_id = scene.ids_mut().body();
        let bird = Bird::new(
            bird_id,
            config.launch_position(),
            config.sprites.bird.height,
            config.timing.flap_frame_time,
        );

        let best_score = clamp_score(store.get_integer(BEST_SCORE_KEY));
        let rng_state = RngState::new(seed);

        audio.dispatch(AudioCommand::PlayLoop(Track::StageBgm));
        log::info!("Session started (seed {}, best score {})", seed, best_score);

        Ok(Self {
            wall_spawner: SpawnScheduler::primed(config.timing.wall_spawn_period)?,
            item_spawner: SpawnScheduler::primed(config.timing.item_spawn_period)?,
            walls: ObstacleGenerator::new(&config)?,
            items: ItemGenerator::new(&config)?,
            scroll: ScrollController,
            contacts: CollisionResolver::new(),
            rng: rng_state.to_rng(),
            rng_state,
            state: GameState::new(best_score),
            bird,
            scene,
            config,
            time: 0.0,
            store,
            audio,
        })
    }

    /// Handle one tap: flap while scrolling, restart once the roll is done,
    /// otherwise ignore.
    pub fn tap(&mut self) -> Option<GameEvent> {
        if self.state.accepts_flap() {
            self.bird.flap(self.config.physics.flap_impulse);
            Some(GameEvent::Flapped)
        } else if self.state.can_restart() {
            self.restart();
            Some(GameEvent::Restarted)
        } else {
            None
        }
    }

    /// Full reset to a fresh run. Items already on screen are left alone.
    pub fn restart(&mut self) {
        self.state.reset_run();
        self.bird.reset(self.config.launch_position());
        let cleared = self.scene.clear_groups(GroupKind::Obstacle);
        self.contacts.clear();
        self.audio.dispatch(AudioCommand::PlayLoop(Track::StageBgm));
        log::info!("Restarted ({} wall pairs cleared)", cleared);
    }

    /// Contacts the bird started this tick, in priority order
    pub(super) fn detect_contacts(&mut self) -> Vec<Contact> {
        let mut bodies: Vec<&Body> = Vec::with_capacity(self.scene.bodies().len() + 1);
        bodies.push(&self.bird.body);
        bodies.extend(self.scene.bodies());
        self.contacts.detect(&bodies)
    }

    pub(super) fn apply_contact(&mut self, contact: Contact, events: &mut Vec<GameEvent>) {
        match contact {
            Contact::Score { .. } => {
                self.state.score += 1;
                events.push(GameEvent::Scored {
                    score: self.state.score,
                });
            }
            Contact::ItemCollect { item } => {
                if let Some(group) = self.scene.body(item).and_then(|b| b.group) {
                    self.scene.remove_group(group);
                }
                self.state.item_score += 1;
                self.audio.dispatch(AudioCommand::PlayOnce(Track::ItemSe));
                events.push(GameEvent::ItemCollected {
                    item_score: self.state.item_score,
                });
                if let Some(best_score) = self.record_best_score() {
                    events.push(GameEvent::BestScoreUpdated { best_score });
                }
            }
            Contact::Fatal { other } => {
                if self.state.phase == GamePhase::GameOver {
                    return;
                }
                self.state.scroll_speed = 0.0;
                self.state.phase = GamePhase::GameOver;
                self.bird.fall_through();
                let angle =
                    std::f32::consts::PI * self.bird.position().y * self.config.timing.roll_factor;
                self.bird.start_roll(angle, self.config.timing.roll_duration);

                self.audio.dispatch(AudioCommand::Stop(Track::StageBgm));
                self.audio.dispatch(AudioCommand::Rewind(Track::StageBgm));
                self.audio.dispatch(AudioCommand::PlayOnce(Track::GameOverSe));

                log::info!("Game over: hit {:?} with score {}", other, self.state.score);
                events.push(GameEvent::GameOver {
                    score: self.state.score,
                });
            }
        }
    }

    /// Persist the wall score if it beats the stored best
    fn record_best_score(&mut self) -> Option<u32> {
        let stored = self.store.get_integer(BEST_SCORE_KEY);
        if i64::from(self.state.score) <= stored {
            return None;
        }
        self.store.set_integer(BEST_SCORE_KEY, i64::from(self.state.score));
        self.state.best_score = self.state.best_score.max(self.state.score);
        log::info!("New best score {}", self.state.best_score);
        Some(self.state.best_score)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn rng_state(&self) -> &RngState {
        &self.rng_state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Read-only copy of the current frame for a renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, &self.bird, &self.scene, self.time)
    }
}

fn clamp_score(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
