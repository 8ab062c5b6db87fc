//! Flat arena of active scene bodies
//!
//! Bodies are kept sorted by id (ids are monotonic, so appending preserves the
//! order). Groups reference bodies by id; nothing owns anything else. The bird
//! is not part of the scene - the session owns it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, BodyKind, GroupId, IdAllocator};
use super::spawn::{ItemUnit, ObstaclePair};
use crate::config::GameConfig;
use crate::consts::GROUND_CATEGORY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    Obstacle,
    Item,
}

/// Bodies that scroll together and are destroyed together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollGroup {
    pub id: GroupId,
    pub kind: GroupKind,
    /// Horizontal position of the group origin
    pub anchor_x: f32,
    /// Half the leading sprite width; the group is gone once `anchor_x <= -half_width`
    pub half_width: f32,
    /// Points per time unit
    pub speed: f32,
    pub members: Vec<BodyId>,
}

impl ScrollGroup {
    pub fn is_off_screen(&self) -> bool {
        self.anchor_x <= -self.half_width
    }
}

/// Ring-buffer tiled strip of equal segments (ground, clouds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileStrip {
    pub segment_width: f32,
    pub speed: f32,
    pub members: Vec<BodyId>,
}

impl TileStrip {
    /// Total width covered by all segments
    pub fn span(&self) -> f32 {
        self.segment_width * self.members.len() as f32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    bodies: Vec<Body>,
    groups: Vec<ScrollGroup>,
    ground: TileStrip,
    clouds: TileStrip,
    ids: IdAllocator,
}

impl Scene {
    /// Scene with ground and cloud strips laid out across the playfield
    pub fn new(config: &GameConfig) -> Self {
        let mut scene = Self {
            bodies: Vec::new(),
            groups: Vec::new(),
            ground: TileStrip {
                segment_width: config.sprites.ground.width,
                speed: config.sprites.ground.width / config.timing.ground_loop,
                members: Vec::new(),
            },
            clouds: TileStrip {
                segment_width: config.sprites.cloud.width,
                speed: config.sprites.cloud.width / config.timing.cloud_loop,
                members: Vec::new(),
            },
            ids: IdAllocator::default(),
        };

        let width = config.playfield.width;
        let ground = config.sprites.ground;
        let ground_count = (width / ground.width) as usize + 2;
        for i in 0..ground_count {
            let id = scene.ids.body();
            let pos = Vec2::new(
                ground.width / 2.0 + ground.width * i as f32,
                ground.height / 2.0,
            );
            scene.bodies.push(Body::static_rect(
                id,
                BodyKind::Ground,
                pos,
                ground.width,
                ground.height,
                GROUND_CATEGORY,
            ));
            scene.ground.members.push(id);
        }

        let cloud = config.sprites.cloud;
        let cloud_count = (width / cloud.width) as usize + 2;
        for i in 0..cloud_count {
            let id = scene.ids.body();
            let pos = Vec2::new(
                cloud.width / 2.0 + cloud.width * i as f32,
                config.playfield.height - cloud.height / 2.0,
            );
            scene
                .bodies
                .push(Body::static_rect(id, BodyKind::Cloud, pos, cloud.width, cloud.height, 0));
            scene.clouds.members.push(id);
        }

        scene
    }

    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub(crate) fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let idx = self.index_of(id)?;
        Some(&mut self.bodies[idx])
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.binary_search_by_key(&id, |b| b.id).ok()
    }

    pub fn groups(&self) -> &[ScrollGroup] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&ScrollGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub(crate) fn groups_mut(&mut self) -> &mut [ScrollGroup] {
        &mut self.groups
    }

    pub fn ground(&self) -> &TileStrip {
        &self.ground
    }

    pub fn clouds(&self) -> &TileStrip {
        &self.clouds
    }

    pub fn group_count(&self, kind: GroupKind) -> usize {
        self.groups.iter().filter(|g| g.kind == kind).count()
    }

    /// Take ownership of a freshly spawned wall pair
    pub fn insert_obstacle(&mut self, pair: ObstaclePair) -> GroupId {
        let members = vec![pair.lower.id, pair.upper.id, pair.score_zone.id];
        self.groups.push(ScrollGroup {
            id: pair.group,
            kind: GroupKind::Obstacle,
            anchor_x: pair.spawn_x,
            half_width: pair.half_width,
            speed: pair.speed,
            members,
        });
        self.push_bodies([pair.lower, pair.upper, pair.score_zone]);
        pair.group
    }

    /// Take ownership of a freshly spawned item unit
    pub fn insert_item(&mut self, unit: ItemUnit) -> GroupId {
        let members = vec![unit.item.id, unit.trigger_zone.id];
        self.groups.push(ScrollGroup {
            id: unit.group,
            kind: GroupKind::Item,
            anchor_x: unit.spawn_x,
            half_width: unit.half_width,
            speed: unit.speed,
            members,
        });
        self.push_bodies([unit.item, unit.trigger_zone]);
        unit.group
    }

    fn push_bodies<const N: usize>(&mut self, bodies: [Body; N]) {
        for body in bodies {
            debug_assert!(self.bodies.last().is_none_or(|last| last.id < body.id));
            self.bodies.push(body);
        }
    }

    /// Destroy a group and all its bodies; false if it was already gone
    pub fn remove_group(&mut self, id: GroupId) -> bool {
        let Some(idx) = self.groups.iter().position(|g| g.id == id) else {
            return false;
        };
        let group = self.groups.remove(idx);
        self.bodies.retain(|b| !group.members.contains(&b.id));
        true
    }

    /// Destroy every group of a kind, returning how many were removed
    pub fn clear_groups(&mut self, kind: GroupKind) -> usize {
        let doomed: Vec<GroupId> = self
            .groups
            .iter()
            .filter(|g| g.kind == kind)
            .map(|g| g.id)
            .collect();
        for id in &doomed {
            self.remove_group(*id);
        }
        doomed.len()
    }

    /// Mutable access to bodies and strips at once (for scrolling)
    pub(crate) fn strips_and_bodies_mut(&mut self) -> (&TileStrip, &TileStrip, &mut Vec<Body>) {
        (&self.ground, &self.clouds, &mut self.bodies)
    }
}
