//! Contact detection and classification
//!
//! Replaces a physics-engine contact delegate with an explicit per-tick pass:
//! overlapping pairs whose masks ask for notification are classified by
//! category and returned as a list, in priority order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId};
use crate::consts::*;

/// A classified contact between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Bird entered a score zone
    Score { zone: BodyId },
    /// Bird touched a collectible
    ItemCollect { item: BodyId },
    /// Bird hit the ground or a wall
    Fatal { other: BodyId },
}

impl Contact {
    /// Lower sorts first
    fn priority(&self) -> u8 {
        match self {
            Contact::Score { .. } => 0,
            Contact::ItemCollect { .. } => 1,
            Contact::Fatal { .. } => 2,
        }
    }
}

/// Classify a qualifying pair: score zone beats item beats everything else
pub fn classify(a: &Body, b: &Body) -> Contact {
    if a.is_category(SCORE_CATEGORY) {
        Contact::Score { zone: a.id }
    } else if b.is_category(SCORE_CATEGORY) {
        Contact::Score { zone: b.id }
    } else if a.is_category(ITEM_CATEGORY) {
        Contact::ItemCollect { item: a.id }
    } else if b.is_category(ITEM_CATEGORY) {
        Contact::ItemCollect { item: b.id }
    } else if a.is_category(BIRD_CATEGORY) {
        Contact::Fatal { other: b.id }
    } else {
        Contact::Fatal { other: a.id }
    }
}

/// Whether a pair can produce a contact at all (ignoring geometry)
pub fn is_contact_candidate(a: &Body, b: &Body) -> bool {
    // Two static bodies never report, as in a rigid-body world
    (a.dynamic || b.dynamic) && a.wants_contact_with(b)
}

/// Begin-contact detector
///
/// A pair is reported on the tick it starts overlapping and not again until
/// it has separated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionResolver {
    touching: BTreeSet<(BodyId, BodyId)>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect new contacts among `bodies`, each reported once, sorted
    /// score → item → fatal (stable within a class).
    pub fn detect(&mut self, bodies: &[&Body]) -> Vec<Contact> {
        let mut current = BTreeSet::new();
        let mut contacts = Vec::new();

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                if !is_contact_candidate(a, b) || !a.overlaps(b) {
                    continue;
                }
                let key = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };
                if !self.touching.contains(&key) {
                    let contact = classify(a, b);
                    log::debug!("Contact {:?} between {:?} and {:?}", contact, a.id, b.id);
                    contacts.push(contact);
                }
                current.insert(key);
            }
        }

        self.touching = current;
        contacts.sort_by_key(Contact::priority);
        contacts
    }

    /// Forget all tracked pairs
    pub fn clear(&mut self) {
        self.touching.clear();
    }

    pub fn is_touching(&self, a: BodyId, b: BodyId) -> bool {
        let key = if a < b { (a, b) } else { (b, a) };
        self.touching.contains(&key)
    }
}

/// Physical response for a dynamic body against the static bodies in its
/// collision mask. Returns the ids it was pushed out of.
pub fn resolve_solids(body: &mut Body, others: &[Body]) -> Vec<BodyId> {
    if !body.dynamic {
        return Vec::new();
    }
    let mut hit = Vec::new();
    for other in others {
        if other.dynamic || body.collision_mask & other.category == 0 {
            continue;
        }
        if body.separate_from(other) {
            hit.push(other.id);
        }
    }
    hit
}
