//! Game configuration
//!
//! Playfield, sprite sizes, physics and timing. Loaded from JSON on native;
//! every field falls back to the stock scene defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ensure_non_negative, ensure_positive};

/// Width/height pair in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    const fn from_tuple((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }

    fn validate(
        &self,
        width_field: &'static str,
        height_field: &'static str,
    ) -> Result<(), ConfigError> {
        ensure_positive(width_field, self.width)?;
        ensure_positive(height_field, self.height)
    }
}

/// Texture sizes the simulation derives geometry from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub bird: Size,
    pub ground: Size,
    pub cloud: Size,
    pub wall: Size,
    pub item: Size,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            bird: Size::from_tuple(BIRD_SIZE),
            ground: Size::from_tuple(GROUND_SIZE),
            cloud: Size::from_tuple(CLOUD_SIZE),
            wall: Size::from_tuple(WALL_SIZE),
            item: Size::from_tuple(ITEM_SIZE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// World gravity (points/s²)
    pub gravity: Vec2,
    /// Upward velocity applied by a tap after zeroing the bird's velocity
    pub flap_impulse: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, GRAVITY_Y),
            flap_impulse: FLAP_IMPULSE,
        }
    }
}

/// Durations in simulation time units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub wall_spawn_period: f32,
    pub item_spawn_period: f32,
    pub wall_traversal: f32,
    pub item_traversal: f32,
    pub ground_loop: f32,
    pub cloud_loop: f32,
    pub roll_duration: f32,
    /// Roll angle multiplier applied to the bird's y at impact
    pub roll_factor: f32,
    pub flap_frame_time: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wall_spawn_period: WALL_SPAWN_PERIOD,
            item_spawn_period: ITEM_SPAWN_PERIOD,
            wall_traversal: WALL_TRAVERSAL,
            item_traversal: ITEM_TRAVERSAL,
            ground_loop: GROUND_LOOP,
            cloud_loop: CLOUD_LOOP,
            roll_duration: ROLL_DURATION,
            roll_factor: ROLL_FACTOR,
            flap_frame_time: FLAP_FRAME_TIME,
        }
    }
}

/// Bird start position as playfield fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchPoint {
    pub x_fraction: f32,
    pub y_fraction: f32,
}

impl Default for LaunchPoint {
    fn default() -> Self {
        Self {
            x_fraction: LAUNCH_X_FRACTION,
            y_fraction: LAUNCH_Y_FRACTION,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: Size,
    pub sprites: SpriteSizes,
    pub physics: PhysicsConfig,
    pub timing: TimingConfig,
    pub launch: LaunchPoint,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Size::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            sprites: SpriteSizes::default(),
            physics: PhysicsConfig::default(),
            timing: TimingConfig::default(),
            launch: LaunchPoint::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject zero/negative durations and sizes
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.playfield.validate("playfield.width", "playfield.height")?;

        let s = &self.sprites;
        s.bird.validate("sprites.bird.width", "sprites.bird.height")?;
        s.ground.validate("sprites.ground.width", "sprites.ground.height")?;
        s.cloud.validate("sprites.cloud.width", "sprites.cloud.height")?;
        s.wall.validate("sprites.wall.width", "sprites.wall.height")?;
        s.item.validate("sprites.item.width", "sprites.item.height")?;

        let t = &self.timing;
        ensure_positive("timing.wall_spawn_period", t.wall_spawn_period)?;
        ensure_positive("timing.item_spawn_period", t.item_spawn_period)?;
        ensure_positive("timing.wall_traversal", t.wall_traversal)?;
        ensure_positive("timing.item_traversal", t.item_traversal)?;
        ensure_positive("timing.ground_loop", t.ground_loop)?;
        ensure_positive("timing.cloud_loop", t.cloud_loop)?;
        ensure_positive("timing.roll_duration", t.roll_duration)?;
        ensure_positive("timing.flap_frame_time", t.flap_frame_time)?;

        ensure_non_negative("launch.x_fraction", self.launch.x_fraction)?;
        ensure_non_negative("launch.y_fraction", self.launch.y_fraction)?;
        Ok(())
    }

    /// Bird start position in playfield coordinates
    pub fn launch_position(&self) -> Vec2 {
        Vec2::new(
            self.playfield.width * self.launch.x_fraction,
            self.playfield.height * self.launch.y_fraction,
        )
    }
}
