//! Render feed
//!
//! A read-only, per-frame copy of everything a renderer needs: bodies with
//! their shapes and kinds, the bird's pose, and HUD values. Nothing here feeds
//! back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::body::{BodyId, BodyKind, Shape};
use crate::sim::scene::Scene;
use crate::sim::state::{Bird, GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub id: BodyId,
    pub kind: BodyKind,
    pub position: Vec2,
    pub shape: Shape,
    pub category: u32,
    /// False for score zones and item triggers
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirdView {
    pub position: Vec2,
    pub rotation: f32,
    /// Wing texture index (0 or 1)
    pub flap_frame: u8,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub item_score: u32,
    pub best_score: u32,
    pub phase: GamePhase,
}

impl Hud {
    pub fn score_label(&self) -> String {
        format!("Score:{}", self.score)
    }

    pub fn item_score_label(&self) -> String {
        format!("Item Score:{}", self.item_score)
    }

    pub fn best_score_label(&self) -> String {
        format!("Best Score:{}", self.best_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Simulation time of this frame
    pub time: f32,
    pub bodies: Vec<BodyView>,
    pub bird: BirdView,
    pub hud: Hud,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, bird: &Bird, scene: &Scene, time: f32) -> Self {
        let bodies = scene
            .bodies()
            .iter()
            .map(|b| BodyView {
                id: b.id,
                kind: b.kind,
                position: b.position,
                shape: b.shape,
                category: b.category,
                visible: b.kind.is_visible(),
            })
            .collect();

        Self {
            time,
            bodies,
            bird: BirdView {
                position: bird.position(),
                rotation: bird.rotation,
                flap_frame: bird.flap_frame(),
                radius: bird.body.shape.half_extents().x,
            },
            hud: Hud {
                score: state.score,
                item_score: state.item_score,
                best_score: state.best_score,
                phase: state.phase,
            },
        }
    }

    /// Visible bodies of one kind
    pub fn of_kind(&self, kind: BodyKind) -> impl Iterator<Item = &BodyView> {
        self.bodies.iter().filter(move |b| b.kind == kind)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
