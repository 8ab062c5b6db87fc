//! Procedural wall-pair and item placement
//!
//! Both generators share one layout rule: a slit of fixed length whose lower
//! edge is jittered upward from a lowest position by a uniform random offset.
//! Generators only create bodies; the scene takes ownership on insert.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyKind, GroupId, IdAllocator};
use crate::config::{GameConfig, Size};
use crate::consts::*;
use crate::error::{ConfigError, ensure_non_negative, ensure_positive};

/// Vertical placement rule shared by walls and items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlitLayout {
    pub slit_length: f32,
    pub random_y_range: f32,
    /// Lowest center y of the anchored sprite
    pub lowest_y: f32,
}

impl SlitLayout {
    /// `center_y` is the middle of the band the slit is centered in and
    /// `sprite_height` the height of the sprite placed below the slit.
    pub fn new(center_y: f32, slit_length: f32, random_y_range: f32, sprite_height: f32) -> Self {
        let lowest_y = center_y - slit_length / 2.0 - sprite_height / 2.0 - random_y_range / 2.0;
        Self {
            slit_length,
            random_y_range,
            lowest_y,
        }
    }

    /// Uniform offset in `[0, random_y_range)`; a non-positive range yields 0
    pub fn random_offset<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.random_y_range > 0.0 {
            rng.random_range(0.0..self.random_y_range)
        } else {
            0.0
        }
    }

    pub fn draw_y<R: Rng>(&self, rng: &mut R) -> f32 {
        self.lowest_y + self.random_offset(rng)
    }
}

/// Upper and lower wall plus the score zone trailing them
#[derive(Debug, Clone, PartialEq)]
pub struct ObstaclePair {
    pub group: GroupId,
    pub lower: Body,
    pub upper: Body,
    pub score_zone: Body,
    pub spawn_x: f32,
    pub half_width: f32,
    pub speed: f32,
}

impl ObstaclePair {
    /// Bottom and top of the opening between the walls
    pub fn gap(&self) -> (f32, f32) {
        let bottom = self.lower.position.y + self.lower.shape.half_extents().y;
        let top = self.upper.position.y - self.upper.shape.half_extents().y;
        (bottom, top)
    }

    pub fn gap_center(&self) -> f32 {
        let (bottom, top) = self.gap();
        (bottom + top) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleGenerator {
    playfield: Size,
    wall: Size,
    bird: Size,
    layout: SlitLayout,
    speed: f32,
}

impl ObstacleGenerator {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::from_dimensions(
            config.playfield,
            config.sprites.ground.height,
            config.sprites.bird,
            config.sprites.wall,
            config.timing.wall_traversal,
        )
    }

    pub fn from_dimensions(
        playfield: Size,
        ground_height: f32,
        bird: Size,
        wall: Size,
        traversal: f32,
    ) -> Result<Self, ConfigError> {
        ensure_positive("playfield.width", playfield.width)?;
        ensure_non_negative("playfield.height", playfield.height)?;
        ensure_non_negative("ground.height", ground_height)?;
        ensure_non_negative("bird.height", bird.height)?;
        ensure_positive("wall.width", wall.width)?;
        ensure_positive("wall.height", wall.height)?;
        ensure_positive("wall traversal", traversal)?;

        let center_y = ground_height + (playfield.height - ground_height) / 2.0;
        let layout = SlitLayout::new(
            center_y,
            bird.height * WALL_SLIT_BIRDS,
            bird.height * WALL_RANDOM_Y_BIRDS,
            wall.height,
        );
        Ok(Self {
            playfield,
            wall,
            bird,
            layout,
            speed: (playfield.width + wall.width) / traversal,
        })
    }

    pub fn layout(&self) -> &SlitLayout {
        &self.layout
    }

    /// Points per time unit the pair scrolls left
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Place a new pair just past the right edge
    pub fn spawn<R: Rng>(&self, ids: &mut IdAllocator, rng: &mut R) -> ObstaclePair {
        let group = ids.group();
        let spawn_x = self.playfield.width + self.wall.width / 2.0;
        let under_wall_y = self.layout.draw_y(rng);
        let upper_wall_y = under_wall_y + self.wall.height + self.layout.slit_length;

        let lower = Body::static_rect(
            ids.body(),
            BodyKind::Wall,
            Vec2::new(spawn_x, under_wall_y),
            self.wall.width,
            self.wall.height,
            WALL_CATEGORY,
        )
        .in_group(group);

        let upper = Body::static_rect(
            ids.body(),
            BodyKind::Wall,
            Vec2::new(spawn_x, upper_wall_y),
            self.wall.width,
            self.wall.height,
            WALL_CATEGORY,
        )
        .in_group(group);

        // Full-height zone so the bird cannot slip past without a contact
        let score_zone = Body::static_rect(
            ids.body(),
            BodyKind::ScoreZone,
            Vec2::new(
                spawn_x + self.wall.width + self.bird.width / 2.0,
                self.playfield.height / 2.0,
            ),
            self.wall.width,
            self.playfield.height,
            SCORE_CATEGORY,
        )
        .with_contact_mask(BIRD_CATEGORY)
        .in_group(group);

        log::debug!("Spawned wall pair {:?} at y={:.1}", group, under_wall_y);

        ObstaclePair {
            group,
            lower,
            upper,
            score_zone,
            spawn_x,
            half_width: self.wall.width / 2.0,
            speed: self.speed,
        }
    }
}

/// A collectible and its trailing trigger zone
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUnit {
    pub group: GroupId,
    pub item: Body,
    pub trigger_zone: Body,
    pub spawn_x: f32,
    pub half_width: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemGenerator {
    playfield: Size,
    item: Size,
    layout: SlitLayout,
    speed: f32,
}

impl ItemGenerator {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::from_dimensions(
            config.playfield,
            config.sprites.bird.height,
            config.sprites.item,
            config.timing.item_traversal,
        )
    }

    pub fn from_dimensions(
        playfield: Size,
        bird_height: f32,
        item: Size,
        traversal: f32,
    ) -> Result<Self, ConfigError> {
        ensure_positive("playfield.width", playfield.width)?;
        ensure_non_negative("playfield.height", playfield.height)?;
        ensure_non_negative("bird.height", bird_height)?;
        ensure_positive("item.width", item.width)?;
        ensure_positive("item.height", item.height)?;
        ensure_positive("item traversal", traversal)?;

        let center_y = item.height + (playfield.height - item.height) / 2.0;
        let layout = SlitLayout::new(
            center_y,
            bird_height * ITEM_SLIT_BIRDS,
            bird_height * ITEM_RANDOM_Y_BIRDS,
            item.height,
        );
        Ok(Self {
            playfield,
            item,
            layout,
            speed: (playfield.width + item.width) / traversal,
        })
    }

    pub fn layout(&self) -> &SlitLayout {
        &self.layout
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn spawn<R: Rng>(&self, ids: &mut IdAllocator, rng: &mut R) -> ItemUnit {
        let group = ids.group();
        let spawn_x = self.playfield.width + self.item.width / 2.0;
        let item_y = self.layout.draw_y(rng);

        let item = Body::static_rect(
            ids.body(),
            BodyKind::Item,
            Vec2::new(spawn_x, item_y),
            self.item.width,
            self.item.height,
            ITEM_CATEGORY,
        )
        .in_group(group);

        // Offset from the unit origin (spawn_x, 0), trailing the item
        let trigger_zone = Body::static_rect(
            ids.body(),
            BodyKind::ItemTrigger,
            Vec2::new(spawn_x + self.item.width, self.item.height),
            self.item.width,
            self.item.height,
            BIRD_CATEGORY,
        )
        .with_contact_mask(ITEM_CATEGORY)
        .in_group(group);

        log::debug!("Spawned item {:?} at y={:.1}", group, item_y);

        ItemUnit {
            group,
            item,
            trigger_zone,
            spawn_x,
            half_width: self.item.width / 2.0,
            speed: self.speed,
        }
    }
}
