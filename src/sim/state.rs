//! Game state and the bird actor
//!
//! `GameState` is the single source of truth for scores and lifecycle; only
//! the session writes it. Presentation reads it through the frame snapshot.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, GroupId};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Scrolling, spawning, scoring
    Playing,
    /// Scene frozen; restart allowed once the roll animation finishes
    GameOver,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    ObstacleSpawned(GroupId),
    ItemSpawned(GroupId),
    /// A group scrolled off-screen and was destroyed
    GroupExpired(GroupId),
    Scored { score: u32 },
    ItemCollected { item_score: u32 },
    BestScoreUpdated { best_score: u32 },
    GameOver { score: u32 },
    /// Game-over roll finished; a tap now restarts
    RollFinished,
    Restarted,
}

/// Scores and lifecycle flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Walls passed
    pub score: u32,
    /// Items collected
    pub item_score: u32,
    /// Persisted best wall score (never decreases)
    pub best_score: u32,
    /// Multiplier for everything that scrolls or spawns (0 = frozen)
    pub scroll_speed: f32,
    /// Multiplier for bird animations (0 = restart allowed)
    pub bird_speed: f32,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(best_score: u32) -> Self {
        Self {
            score: 0,
            item_score: 0,
            best_score,
            scroll_speed: 1.0,
            bird_speed: 1.0,
            phase: GamePhase::Playing,
        }
    }

    /// Tap input moves the bird while the scene scrolls
    pub fn accepts_flap(&self) -> bool {
        self.scroll_speed > 0.0
    }

    /// Tap input restarts once the game-over roll has finished
    pub fn can_restart(&self) -> bool {
        self.scroll_speed <= 0.0 && self.bird_speed == 0.0
    }

    /// Clear per-run values, keep the best score
    pub fn reset_run(&mut self) {
        *self = Self::new(self.best_score);
    }
}

/// One-shot rotation played on game over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollAnimation {
    start: f32,
    angle: f32,
    duration: f32,
    elapsed: f32,
}

impl RollAnimation {
    pub fn new(start: f32, angle: f32, duration: f32) -> Self {
        Self {
            start,
            angle,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance; true once finished
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn rotation(&self) -> f32 {
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.start + self.angle * t
    }
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub body: Body,
    /// Presentation-only rotation (radians)
    pub rotation: f32,
    pub roll: Option<RollAnimation>,
    /// Animation clock for wing flaps
    anim_time: f32,
    flap_frame_time: f32,
}

impl Bird {
    pub fn new(id: BodyId, launch: Vec2, height: f32, flap_frame_time: f32) -> Self {
        Self {
            body: Body::bird(id, launch, height),
            rotation: 0.0,
            roll: None,
            anim_time: 0.0,
            flap_frame_time,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Zero the velocity, then kick upward
    pub fn flap(&mut self, impulse: f32) {
        self.body.velocity = Vec2::ZERO;
        self.body.velocity += Vec2::new(0.0, impulse);
    }

    /// After a fatal hit the bird only collides with the ground
    pub fn fall_through(&mut self) {
        self.body.collision_mask = GROUND_CATEGORY;
    }

    pub fn start_roll(&mut self, angle: f32, duration: f32) {
        self.roll = Some(RollAnimation::new(self.rotation, angle, duration));
    }

    /// Advance animations by `dt * speed`; true when a roll completes this call
    pub fn animate(&mut self, dt: f32, speed: f32) -> bool {
        let step = dt * speed;
        if step <= 0.0 {
            return false;
        }
        self.anim_time += step;
        let Some(roll) = self.roll.as_mut() else {
            return false;
        };
        if roll.is_finished() {
            return false;
        }
        let done = roll.advance(step);
        self.rotation = roll.rotation();
        done
    }

    /// Which of the two wing textures to show
    pub fn flap_frame(&self) -> u8 {
        ((self.anim_time / self.flap_frame_time) as u64 % 2) as u8
    }

    /// Back to the launch point, upright, at rest, fully collidable.
    /// Cancels any roll in flight.
    pub fn reset(&mut self, launch: Vec2) {
        self.body.position = launch;
        self.body.velocity = Vec2::ZERO;
        self.body.collision_mask = GROUND_CATEGORY | WALL_CATEGORY | ITEM_CATEGORY;
        self.body.contact_mask = GROUND_CATEGORY | WALL_CATEGORY | ITEM_CATEGORY;
        self.rotation = 0.0;
        self.roll = None;
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird() -> Bird {
        Bird::new(BodyId(1), Vec2::new(75.0, 466.9), 24.0, FLAP_FRAME_TIME)
    }

    #[test]
    fn test_flap_replaces_velocity() {
        let mut b = bird();
        b.body.velocity = Vec2::new(3.0, -200.0);
        b.flap(15.0);
        assert_eq!(b.velocity(), Vec2::new(0.0, 15.0));
    }

    #[test]
    fn test_roll_completes_once() {
        let mut b = bird();
        b.start_roll(std::f32::consts::PI, 1.0);
        assert!(!b.animate(0.5, 1.0));
        assert!((b.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert!(b.animate(0.6, 1.0));
        assert!((b.rotation - std::f32::consts::PI).abs() < 1e-4);
        assert!(!b.animate(1.0, 1.0));
    }

    #[test]
    fn test_zero_speed_halts_animation() {
        let mut b = bird();
        b.start_roll(1.0, 1.0);
        assert!(!b.animate(5.0, 0.0));
        assert_eq!(b.rotation, 0.0);
        assert_eq!(b.flap_frame(), 0);
    }

    #[test]
    fn test_flap_frames_alternate() {
        let mut b = bird();
        assert_eq!(b.flap_frame(), 0);
        b.animate(0.25, 1.0);
        assert_eq!(b.flap_frame(), 1);
        b.animate(0.2, 1.0);
        assert_eq!(b.flap_frame(), 0);
    }

    #[test]
    fn test_reset_cancels_roll() {
        let mut b = bird();
        b.fall_through();
        b.start_roll(2.0, 1.0);
        b.animate(0.3, 1.0);
        b.reset(Vec2::new(10.0, 20.0));
        assert_eq!(b.rotation, 0.0);
        assert!(b.roll.is_none());
        assert_eq!(b.body.collision_mask, GROUND_CATEGORY | WALL_CATEGORY | ITEM_CATEGORY);
        assert_eq!(b.position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_restart_gate() {
        let mut state = GameState::new(4);
        assert!(state.accepts_flap());
        assert!(!state.can_restart());
        state.scroll_speed = 0.0;
        assert!(!state.accepts_flap());
        assert!(!state.can_restart());
        state.bird_speed = 0.0;
        assert!(state.can_restart());
        state.score = 9;
        state.reset_run();
        assert_eq!(state, GameState::new(4));
    }
}
