//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod scene;
pub mod scheduler;
pub mod scroll;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::{Body, BodyId, BodyKind, GroupId, Shape};
pub use collision::{CollisionResolver, Contact};
pub use scene::{GroupKind, Scene, ScrollGroup, TileStrip};
pub use scheduler::SpawnScheduler;
pub use scroll::ScrollController;
pub use session::GameSession;
pub use spawn::{ItemGenerator, ItemUnit, ObstacleGenerator, ObstaclePair};
pub use state::{Bird, GameEvent, GamePhase, GameState, RngState};
pub use tick::TickInput;
