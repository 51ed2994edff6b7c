use std::fmt;

use serde::{Deserialize, Serialize};

/// A world object that can be examined and, unless fixed, carried.
///
/// Items are created once at load time and owned by exactly one
/// container — a location's item map or the player's — at any moment.
/// Moving an item moves the owned value between those maps, never a copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Display name; unique across the whole world at load time.
    pub name: String,
    /// Free-text description shown by `look <item>`.
    pub description: String,
    /// Alternative names the item answers to, stored lowercased.
    pub aliases: Vec<String>,
    /// When set, the item cannot be taken and the message says why.
    pub fixed: Option<String>,
    /// Hidden items are left out of a location's visible listing but
    /// still resolve by exact name or alias.
    pub hidden: bool,
}

impl Item {
    /// Create a movable, visible item with an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            aliases: Vec::new(),
            fixed: None,
            hidden: false,
        }
    }

    /// Register additional names; callers pass them already lowercased.
    pub fn add_aliases(&mut self, aliases: impl IntoIterator<Item = String>) {
        self.aliases.extend(aliases);
    }

    /// The item's raw description text.
    pub fn describe(&self) -> &str {
        &self.description
    }

    /// True when `query` (already lowercased) is the item's name or one
    /// of its aliases.
    pub fn answers_to(&self, query: &str) -> bool {
        self.name.to_lowercase() == query || self.aliases.iter().any(|a| a == query)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
