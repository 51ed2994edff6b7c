use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::location::LocationId;

/// The player: a display name, a current location, and carried items.
///
/// The player refers to its location by arena key and never owns it.
/// One player exists per session, created at the world's start location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Display name chosen at session start.
    pub name: String,
    /// Arena key of the current location.
    pub location: LocationId,
    /// Carried items, keyed by name. Same stable ordering as a
    /// location's item map.
    pub items: BTreeMap<String, Item>,
}

impl Player {
    /// Create a player at the given location.
    pub fn new(location: LocationId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location,
            items: BTreeMap::new(),
        }
    }

    /// Render the inventory listing.
    pub fn inventory(&self) -> String {
        if self.items.is_empty() {
            return "Your hands are empty!".to_string();
        }
        let names: Vec<&str> = self.items.keys().map(String::as_str).collect();
        format!("You are carrying: {}", names.join(", "))
    }
}
