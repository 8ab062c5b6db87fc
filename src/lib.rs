//! Flappy Bird - a single-screen side-scrolling arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, spawning, scrolling, contacts, game state)
//! - `config`: Data-driven playfield, sprite, physics and timing parameters
//! - `persistence`: Best-score settings store
//! - `audio`: Fire-and-forget audio hooks
//! - `frame`: Per-frame render feed for a presentation layer

pub mod audio;
pub mod config;
pub mod error;
pub mod frame;
pub mod persistence;
pub mod sim;

pub use audio::{AudioCommand, AudioSink, Track};
pub use config::GameConfig;
pub use error::{ConfigError, StoreError};
pub use frame::FrameSnapshot;
pub use persistence::{JsonFileStore, MemoryStore, ScoreStore};
pub use sim::{GameEvent, GamePhase, GameSession, TickInput};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native driver (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Physics world scale (points per metre)
    pub const POINTS_PER_METER: f32 = 150.0;
    /// Gravity of -4 m/s² expressed in points
    pub const GRAVITY_Y: f32 = -4.0 * POINTS_PER_METER;
    /// Upward velocity given by one tap (points/s)
    pub const FLAP_IMPULSE: f32 = 300.0;

    /// Collision categories - each a distinct single bit
    pub const BIRD_CATEGORY: u32 = 1 << 0;
    pub const GROUND_CATEGORY: u32 = 1 << 1;
    pub const WALL_CATEGORY: u32 = 1 << 2;
    pub const SCORE_CATEGORY: u32 = 1 << 3;
    pub const ITEM_CATEGORY: u32 = 1 << 4;

    /// Default playfield (points)
    pub const PLAYFIELD_WIDTH: f32 = 375.0;
    pub const PLAYFIELD_HEIGHT: f32 = 667.0;

    /// Default sprite sizes (points)
    pub const BIRD_SIZE: (f32, f32) = (34.0, 24.0);
    pub const GROUND_SIZE: (f32, f32) = (336.0, 112.0);
    pub const CLOUD_SIZE: (f32, f32) = (375.0, 100.0);
    pub const WALL_SIZE: (f32, f32) = (60.0, 480.0);
    pub const ITEM_SIZE: (f32, f32) = (30.0, 30.0);

    /// Gap between the two walls, in bird heights
    pub const WALL_SLIT_BIRDS: f32 = 4.0;
    /// Vertical jitter of the wall gap, in bird heights
    pub const WALL_RANDOM_Y_BIRDS: f32 = 4.0;
    /// Item slit, in bird heights
    pub const ITEM_SLIT_BIRDS: f32 = 2.0;
    /// Vertical jitter of items, in bird heights
    pub const ITEM_RANDOM_Y_BIRDS: f32 = 5.0;

    /// Spawn cadence (time units)
    pub const WALL_SPAWN_PERIOD: f32 = 3.0;
    pub const ITEM_SPAWN_PERIOD: f32 = 5.0;
    /// Time to cross from spawn to removal (time units)
    pub const WALL_TRAVERSAL: f32 = 4.0;
    pub const ITEM_TRAVERSAL: f32 = 2.0;
    /// Time for a strip to scroll one segment width
    pub const GROUND_LOOP: f32 = 5.0;
    pub const CLOUD_LOOP: f32 = 20.0;

    /// Game-over roll: angle = π * bird_y * ROLL_FACTOR over ROLL_DURATION
    pub const ROLL_FACTOR: f32 = 0.01;
    pub const ROLL_DURATION: f32 = 1.0;
    /// Wing flap texture swap interval
    pub const FLAP_FRAME_TIME: f32 = 0.2;

    /// Launch position as a fraction of the playfield
    pub const LAUNCH_X_FRACTION: f32 = 0.2;
    pub const LAUNCH_Y_FRACTION: f32 = 0.7;

    /// Settings-store key of the persisted best score
    pub const BEST_SCORE_KEY: &str = "BEST";
}
