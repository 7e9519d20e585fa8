//! Active-object registry
//!
//! The set of live game objects, partitioned into draw/update layers.
//! Iteration is always in id order so every run is reproducible.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::{GameObject, ObjectId, Tag};

/// Draw/update layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Drawn first, never collides
    Background,
    /// Bricks and walls: collide with movers, never with each other
    Static,
    /// Balls, paddles, pickups
    Default,
    /// Heads-up display, never collides
    Ui,
}

#[derive(Debug, Clone)]
struct Entry {
    layer: Layer,
    object: GameObject,
}

/// Layered collection of live objects
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    entries: BTreeMap<ObjectId, Entry>,
    next_id: u32,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Allocate a new object ID
    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an object on a layer. Returns false if its id is already live.
    pub fn add(&mut self, object: GameObject, layer: Layer) -> bool {
        if self.entries.contains_key(&object.id) {
            return false;
        }
        self.entries.insert(object.id, Entry { layer, object });
        true
    }

    /// Remove an object from a layer. Returns false if it is not live on that
    /// layer (already removed, or never there).
    pub fn remove(&mut self, id: ObjectId, layer: Layer) -> bool {
        match self.entries.get(&id) {
            Some(entry) if entry.layer == layer => {
                self.entries.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Drop every object (ids keep increasing)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.entries.get(&id).map(|e| &e.object)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.entries.get_mut(&id).map(|e| &mut e.object)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All live objects with their layer, in id order
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &GameObject)> {
        self.entries.values().map(|e| (e.layer, &e.object))
    }

    /// Mutable access to every live object on a layer, in id order
    pub fn layer_mut(&mut self, layer: Layer) -> impl Iterator<Item = &mut GameObject> {
        self.entries
            .values_mut()
            .filter(move |e| e.layer == layer)
            .map(|e| &mut e.object)
    }

    /// Live objects on a layer, in id order
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &GameObject> {
        self.entries
            .values()
            .filter(move |e| e.layer == layer)
            .map(|e| &e.object)
    }

    /// Live objects carrying a tag, in id order
    pub fn with_tag(&self, tag: Tag) -> impl Iterator<Item = &GameObject> {
        self.entries
            .values()
            .map(|e| &e.object)
            .filter(move |o| o.tag() == tag)
    }

    pub fn count_tag(&self, tag: Tag) -> usize {
        self.with_tag(tag).count()
    }
}
