//! Minimal 2D rigid body
//!
//! Positions are body centers in playfield points, y pointing up. Bodies never
//! own other bodies; grouping is a plain id reference into the scene.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stable body handle (unique for the lifetime of a session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Handle of a scroll group (obstacle pair or item unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

/// Monotonic id source shared by bodies and groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn body(&mut self) -> BodyId {
        BodyId(self.bump())
    }

    pub fn group(&mut self) -> GroupId {
        GroupId(self.bump())
    }

    fn bump(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Collision shape, centered on the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

impl Shape {
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Rect { width, height } => Vec2::new(width / 2.0, height / 2.0),
        }
    }
}

/// What a body is, for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Bird,
    Ground,
    Cloud,
    Wall,
    ScoreZone,
    Item,
    ItemTrigger,
}

impl BodyKind {
    /// Invisible helper volumes are not drawn
    pub fn is_visible(&self) -> bool {
        !matches!(self, BodyKind::ScoreZone | BodyKind::ItemTrigger)
    }
}

/// Axis-aligned bounds
#[derive(Debug, Clone, Copy)]
struct Aabb {
    min: Vec2,
    max: Vec2,
}

impl Aabb {
    fn around(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

/// A physics body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub shape: Shape,
    /// Exactly one category bit for generated bodies (0 for scenery)
    pub category: u32,
    /// Categories this body physically collides with
    pub collision_mask: u32,
    /// Categories this body wants contact notifications for
    pub contact_mask: u32,
    pub dynamic: bool,
    pub rotation_locked: bool,
    pub group: Option<GroupId>,
}

impl Body {
    /// Static rectangle with no masks
    pub fn static_rect(
        id: BodyId,
        kind: BodyKind,
        position: Vec2,
        width: f32,
        height: f32,
        category: u32,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            velocity: Vec2::ZERO,
            shape: Shape::Rect { width, height },
            category,
            collision_mask: 0,
            contact_mask: 0,
            dynamic: false,
            rotation_locked: true,
            group: None,
        }
    }

    /// The bird: a dynamic, rotation-locked circle of half its height
    pub fn bird(id: BodyId, position: Vec2, height: f32) -> Self {
        Self {
            id,
            kind: BodyKind::Bird,
            position,
            velocity: Vec2::ZERO,
            shape: Shape::Circle { radius: height / 2.0 },
            category: BIRD_CATEGORY,
            collision_mask: GROUND_CATEGORY | WALL_CATEGORY | ITEM_CATEGORY,
            contact_mask: GROUND_CATEGORY | WALL_CATEGORY | ITEM_CATEGORY,
            dynamic: true,
            rotation_locked: true,
            group: None,
        }
    }

    pub fn with_contact_mask(mut self, mask: u32) -> Self {
        self.contact_mask = mask;
        self
    }

    pub fn in_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    pub fn is_category(&self, category: u32) -> bool {
        self.category & category != 0
    }

    /// Whether either body asked to be told about touching the other
    pub fn wants_contact_with(&self, other: &Body) -> bool {
        self.contact_mask & other.category != 0 || other.contact_mask & self.category != 0
    }

    /// Semi-implicit Euler step; static bodies are immovable
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        if !self.dynamic {
            return;
        }
        self.velocity += gravity * dt;
        self.position += self.velocity * dt;
    }

    fn aabb(&self) -> Aabb {
        Aabb::around(self.position, self.shape.half_extents())
    }

    /// Strict geometric intersection (touching edges do not overlap)
    pub fn overlaps(&self, other: &Body) -> bool {
        match (self.shape, other.shape) {
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                let r = ra + rb;
                self.position.distance_squared(other.position) < r * r
            }
            (Shape::Circle { radius }, Shape::Rect { .. }) => {
                circle_rect_overlap(self.position, radius, &other.aabb())
            }
            (Shape::Rect { .. }, Shape::Circle { radius }) => {
                circle_rect_overlap(other.position, radius, &self.aabb())
            }
            (Shape::Rect { .. }, Shape::Rect { .. }) => {
                let a = self.aabb();
                let b = other.aabb();
                a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
            }
        }
    }

    /// Push this body out of `other` along the minimum-penetration direction
    /// and drop the velocity component pointing into it.
    ///
    /// Returns false when the bodies were not overlapping.
    pub fn separate_from(&mut self, other: &Body) -> bool {
        let Some((normal, depth)) = self.penetration(other) else {
            return false;
        };
        self.position += normal * depth;
        let into = self.velocity.dot(normal);
        if into < 0.0 {
            self.velocity -= normal * into;
        }
        true
    }

    /// Unit normal pointing from `other` toward `self`, and depth
    fn penetration(&self, other: &Body) -> Option<(Vec2, f32)> {
        if !self.overlaps(other) {
            return None;
        }
        match (self.shape, other.shape) {
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                let delta = self.position - other.position;
                let dist = delta.length();
                let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::Y };
                Some((normal, ra + rb - dist))
            }
            (Shape::Circle { radius }, Shape::Rect { .. }) => {
                let aabb = other.aabb();
                let delta = self.position - aabb.closest_point(self.position);
                let dist = delta.length();
                if aabb.contains(self.position) || dist <= f32::EPSILON {
                    let (normal, depth) = min_axis_exit(self.position, &aabb);
                    Some((normal, depth + radius))
                } else {
                    Some((delta / dist, radius - dist))
                }
            }
            (Shape::Rect { .. }, _) => {
                let a = self.aabb();
                let b = other.aabb();
                let push_right = b.max.x - a.min.x;
                let push_left = a.max.x - b.min.x;
                let push_up = b.max.y - a.min.y;
                let push_down = a.max.y - b.min.y;
                let candidates = [
                    (Vec2::X, push_right),
                    (Vec2::NEG_X, push_left),
                    (Vec2::Y, push_up),
                    (Vec2::NEG_Y, push_down),
                ];
                candidates
                    .into_iter()
                    .min_by(|a, b| a.1.total_cmp(&b.1))
            }
        }
    }
}

fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Aabb) -> bool {
    center.distance_squared(rect.closest_point(center)) < radius * radius
}

/// Nearest edge for a point inside a box
fn min_axis_exit(p: Vec2, aabb: &Aabb) -> (Vec2, f32) {
    let candidates = [
        (Vec2::NEG_X, p.x - aabb.min.x),
        (Vec2::X, aabb.max.x - p.x),
        (Vec2::NEG_Y, p.y - aabb.min.y),
        (Vec2::Y, aabb.max.y - p.y),
    ];
    let mut best = candidates[0];
    for c in candidates {
        if c.1 < best.1 {
            best = c;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(id: u32, x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::static_rect(BodyId(id), BodyKind::Wall, Vec2::new(x, y), w, h, WALL_CATEGORY)
    }

    #[test]
    fn test_integrate_dynamic() {
        let mut bird = Body::bird(BodyId(1), Vec2::new(0.0, 500.0), 24.0);
        bird.velocity = Vec2::new(0.0, 15.0);
        bird.integrate(0.5, Vec2::new(0.0, -4.0));
        assert!((bird.velocity.y - 13.0).abs() < 1e-5);
        assert!((bird.position.y - 506.5).abs() < 1e-4);
    }

    #[test]
    fn test_static_is_immovable() {
        let mut wall = rect(1, 10.0, 10.0, 5.0, 5.0);
        wall.velocity = Vec2::new(3.0, 3.0);
        wall.integrate(1.0, Vec2::new(0.0, -600.0));
        assert_eq!(wall.position, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_circle_rect_overlap() {
        let bird = Body::bird(BodyId(1), Vec2::new(0.0, 0.0), 20.0);
        assert!(bird.overlaps(&rect(2, 14.0, 0.0, 10.0, 10.0)));
        assert!(!bird.overlaps(&rect(3, 16.0, 0.0, 10.0, 10.0)));
        // Corner: closest point (5, 5) is ~7.07 away
        assert!(bird.overlaps(&rect(4, 10.0, 10.0, 10.0, 10.0)));
        assert!(!bird.overlaps(&rect(5, 13.0, 13.0, 10.0, 10.0)));
    }

    #[test]
    fn test_rect_rect_overlap_is_strict() {
        let a = rect(1, 0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(2, 9.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(3, 10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_separate_lands_on_ground() {
        let ground = Body::static_rect(
            BodyId(2),
            BodyKind::Ground,
            Vec2::new(0.0, 50.0),
            200.0,
            100.0,
            GROUND_CATEGORY,
        );
        let mut bird = Body::bird(BodyId(1), Vec2::new(0.0, 105.0), 20.0);
        bird.velocity = Vec2::new(0.0, -30.0);
        assert!(bird.separate_from(&ground));
        assert!((bird.position.y - 110.0).abs() < 1e-4);
        assert_eq!(bird.velocity.y, 0.0);
        assert!(!bird.overlaps(&ground));
    }

    #[test]
    fn test_separate_deep_inside_uses_nearest_edge() {
        let wall = rect(2, 0.0, 0.0, 40.0, 100.0);
        let mut bird = Body::bird(BodyId(1), Vec2::new(15.0, 0.0), 10.0);
        assert!(bird.separate_from(&wall));
        assert!((bird.position.x - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_wants_contact_either_direction() {
        let bird = Body::bird(BodyId(1), Vec2::ZERO, 10.0);
        let zone =
            Body::static_rect(BodyId(2), BodyKind::ScoreZone, Vec2::ZERO, 1.0, 1.0, SCORE_CATEGORY)
                .with_contact_mask(BIRD_CATEGORY);
        let cloud = Body::static_rect(BodyId(3), BodyKind::Cloud, Vec2::ZERO, 1.0, 1.0, 0);
        assert!(bird.wants_contact_with(&zone));
        assert!(zone.wants_contact_with(&bird));
        assert!(!bird.wants_contact_with(&cloud));
    }
}
