use std::collections::{BTreeMap, HashMap};

use crate::error::{FwError, FwResult};
use crate::location::{Location, LocationId};

/// The world arena. Owns every location and the global alias table.
///
/// One `World` exists per session; nothing in it is shared across
/// sessions. The first location added becomes the start location.
#[derive(Debug, Clone, Default)]
pub struct World {
    locations: HashMap<LocationId, Location>,
    by_name_lower: HashMap<String, LocationId>,
    start: Option<LocationId>,
    aliases: BTreeMap<String, String>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Locations
    // -----------------------------------------------------------------------

    /// Add a location to the arena. The first one added becomes the
    /// start location. Returns the location's arena key.
    pub fn add_location(&mut self, location: Location) -> FwResult<LocationId> {
        let name_lower = location.name.to_lowercase();
        if self.by_name_lower.contains_key(&name_lower) {
            return Err(FwError::DuplicateName(location.name.clone()));
        }

        let id = location.id;
        self.by_name_lower.insert(name_lower, id);
        self.locations.insert(id, location);
        if self.start.is_none() {
            self.start = Some(id);
        }
        Ok(id)
    }

    /// Get a reference to a location by arena key.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Get a mutable reference to a location by arena key.
    pub fn location_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.locations.get_mut(&id)
    }

    /// Find a location by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Location> {
        self.by_name_lower
            .get(&name.to_lowercase())
            .and_then(|id| self.locations.get(id))
    }

    /// Find a location's arena key by name (case-insensitive).
    pub fn find_id_by_name(&self, name: &str) -> Option<LocationId> {
        self.by_name_lower.get(&name.to_lowercase()).copied()
    }

    /// The start location every session begins at.
    pub fn start(&self) -> FwResult<LocationId> {
        self.start.ok_or(FwError::NoStartLocation)
    }

    /// Iterate over all locations in the arena.
    pub fn all_locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Number of locations in the arena.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    // -----------------------------------------------------------------------
    // Alias table
    // -----------------------------------------------------------------------

    /// Map a name (lowercased on insert) to an item's canonical name.
    /// Colliding aliases resolve last-write-wins, matching load order.
    pub fn register_alias(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.aliases.insert(alias.into().to_lowercase(), canonical.into());
    }

    /// Look up the canonical item name behind a name or alias.
    pub fn alias_canonical(&self, name: &str) -> Option<&str> {
        self.aliases.get(&name.to_lowercase()).map(String::as_str)
    }

    /// The full alias table, in its stable iteration order.
    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// Number of items counted across every location's item map.
    pub fn item_count(&self) -> usize {
        self.locations.values().map(|l| l.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get_location() {
        let mut world = World::new();
        let id = world.add_location(Location::new("Garage")).unwrap();
        assert_eq!(world.location(id).unwrap().name, "Garage");
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut world = World::new();
        world.add_location(Location::new("Garage")).unwrap();
        let result = world.add_location(Location::new("garage"));
        assert!(matches!(result, Err(FwError::DuplicateName(_))));
    }

    #[test]
    fn find_by_name_case_insensitive() {
        let mut world = World::new();
        world.add_location(Location::new("Garage")).unwrap();
        assert!(world.find_by_name("garage").is_some());
        assert!(world.find_by_name("GARAGE").is_some());
        assert!(world.find_by_name("attic").is_none());
    }

    #[test]
    fn first_location_is_start() {
        let mut world = World::new();
        assert!(world.start().is_err());

        let first = world.add_location(Location::new("Garage")).unwrap();
        world.add_location(Location::new("Kitchen")).unwrap();
        assert_eq!(world.start().unwrap(), first);
    }

    #[test]
    fn alias_table_is_lowercased_and_last_write_wins() {
        let mut world = World::new();
        world.register_alias("Knife", "knife");
        world.register_alias("blade", "knife");
        world.register_alias("blade", "sword");

        assert_eq!(world.alias_canonical("KNIFE"), Some("knife"));
        assert_eq!(world.alias_canonical("blade"), Some("sword"));
        assert_eq!(world.alias_canonical("fork"), None);
    }
}
