//! Core types for Fernweh: the world model a text adventure runs against.
//!
//! This crate defines locations, items, the player, and the [`World`]
//! arena that owns every location. It is independent of the world-file
//! loader — a [`World`] can be built programmatically or by the
//! `fw-worldfile` crate.

/// Cardinal directions labelling exit edges.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// Items that can be examined, carried, and dropped.
pub mod item;
/// Locations: the nodes of the world graph.
pub mod location;
/// The player and their carried items.
pub mod player;
/// The central world arena that owns all locations.
pub mod world;

/// Re-export the direction type.
pub use direction::Direction;
/// Re-export error types.
pub use error::{FwError, FwResult};
/// Re-export the item type.
pub use item::Item;
/// Re-export location types.
pub use location::{Location, LocationId};
/// Re-export the player type.
pub use player::Player;
/// Re-export the world arena.
pub use world::World;
