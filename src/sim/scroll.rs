//! Leftward scrolling of everything but the bird
//!
//! Groups (walls, items) move at their traversal speed and are reported for
//! removal once fully past the left edge. Strip segments (ground, clouds) wrap
//! to the right end of their strip instead of being destroyed.

use super::body::{BodyId, GroupId};
use super::scene::{Scene, TileStrip};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollController;

impl ScrollController {
    /// Move every scrolling body by `dt * speed * speed_multiplier` and return
    /// the groups that are now off-screen. A multiplier of 0 freezes the scene.
    ///
    /// Removal is left to the caller.
    pub fn advance(&self, scene: &mut Scene, dt: f32, speed_multiplier: f32) -> Vec<GroupId> {
        let step = (dt * speed_multiplier).max(0.0);

        let mut shifts: Vec<(BodyId, f32)> = Vec::new();
        let mut expired = Vec::new();
        for group in scene.groups_mut() {
            let dx = group.speed * step;
            group.anchor_x -= dx;
            shifts.extend(group.members.iter().map(|&id| (id, dx)));
            if group.is_off_screen() {
                expired.push(group.id);
            }
        }
        for (id, dx) in shifts {
            if let Some(body) = scene.body_mut(id) {
                body.position.x -= dx;
            }
        }

        let (ground, clouds, bodies) = scene.strips_and_bodies_mut();
        for strip in [ground, clouds] {
            scroll_strip(strip, bodies, step);
        }

        expired
    }
}

fn scroll_strip(strip: &TileStrip, bodies: &mut [super::body::Body], step: f32) {
    let span = strip.span();
    if span <= 0.0 {
        return;
    }
    // Whole spans are a no-op on the ring, so fold them away first
    let dx = (strip.speed * step).rem_euclid(span);
    let half = strip.segment_width / 2.0;
    for body in bodies.iter_mut().filter(|b| strip.members.contains(&b.id)) {
        body.position.x -= dx;
        if body.position.x + half <= 0.0 {
            body.position.x += span;
        }
    }
}
