use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::direction::Direction;
use crate::item::Item;
use crate::world::World;

/// Unique identifier for a location in the world arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub Uuid);

impl LocationId {
    /// Generate a new random location ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A room or area in the world graph.
///
/// Exits hold arena keys rather than references, so mutually connected
/// locations form a cyclic graph without ownership cycles. The loader
/// resolves destination names to keys in a second pass, once every
/// location is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Arena key of this location.
    pub id: LocationId,
    /// Display name; unique within the world.
    pub name: String,
    /// Free-text description shown when the location is rendered.
    pub description: String,
    /// Exit edges by direction.
    pub exits: HashMap<Direction, LocationId>,
    /// Items currently resting here, keyed by name. A `BTreeMap` keeps
    /// iteration order stable within a render.
    pub items: BTreeMap<String, Item>,
}

impl Location {
    /// Create an empty location with a fresh arena key.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            description: String::new(),
            exits: HashMap::new(),
            items: BTreeMap::new(),
        }
    }

    /// Add or replace the exit in `direction`.
    pub fn add_exit(&mut self, direction: Direction, destination: LocationId) {
        self.exits.insert(direction, destination);
    }

    /// Render the location: name, description, the visible items, and
    /// one line per exit in `DIR (destination name)` form.
    pub fn describe(&self, world: &World) -> String {
        let mut out = format!("Current location: {}\n{}\n", self.name, self.description);

        let visible: Vec<&str> = self
            .items
            .values()
            .filter(|item| !item.hidden)
            .map(|item| item.name.as_str())
            .collect();
        out.push_str("You can see: ");
        out.push_str(&visible.join(", "));
        out.push('\n');

        for direction in Direction::ALL {
            if let Some(destination) = self.exits.get(&direction) {
                let name = world
                    .location(*destination)
                    .map(|l| l.name.as_str())
                    .unwrap_or("nowhere");
                out.push_str(&format!("\t{direction} ({name})\n"));
            }
        }

        out
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
