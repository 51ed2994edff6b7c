//! Item lookup by name or alias within a single container.

use std::collections::BTreeMap;

use fw_core::Item;

/// Find the first item in `items` whose lowercased name equals `query`
/// or whose alias set contains it.
///
/// Case-insensitive on both sides; the scan runs in the map's stable
/// order, so a tie between alias-colliding items always breaks the same
/// way. Returns `None` when nothing matches — never an error.
pub fn find_item<'a>(items: &'a BTreeMap<String, Item>, query: &str) -> Option<&'a Item> {
    let query = query.to_lowercase();
    items.values().find(|item| item.answers_to(&query))
}
