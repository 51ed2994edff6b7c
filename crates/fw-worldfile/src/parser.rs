use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;

use fw_core::{Direction, Item, Location, LocationId, World};

use crate::diagnostics::{Diagnostic, Severity};

/// Result of loading a world file.
pub struct LoadResult {
    /// The loaded world; partial when errors occurred.
    pub world: World,
    /// Errors and warnings produced during loading.
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadResult {
    /// True when any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Load a world from source text.
pub fn load_str(source: &str) -> LoadResult {
    let mut diagnostics = Vec::new();
    let (locations, items) = scan(source, &mut diagnostics);
    build(locations, items, diagnostics)
}

/// Load a world from a file on disk.
pub fn load_file(path: &Path) -> LoadResult {
    match std::fs::read_to_string(path) {
        Ok(source) => load_str(&source),
        Err(e) => LoadResult {
            world: World::new(),
            diagnostics: vec![Diagnostic::error(
                0..0,
                format!("cannot read {}: {e}", path.display()),
            )],
        },
    }
}

struct RawExit {
    direction: Direction,
    destination: String,
    span: Range<usize>,
}

struct RawLocation {
    name: String,
    description: Option<String>,
    exits: Vec<RawExit>,
    span: Range<usize>,
}

struct RawItem {
    name: String,
    location: Option<String>,
    location_span: Range<usize>,
    description: Option<String>,
    aliases: Vec<String>,
    fixed: Option<String>,
    hidden: bool,
    span: Range<usize>,
}

#[derive(Clone, Copy)]
enum Ctx {
    None,
    Location(usize),
    Item(usize),
}

/// Pass one: cut the source into raw location and item blocks, keeping
/// byte spans for every line that can fail later.
fn scan(source: &str, diagnostics: &mut Vec<Diagnostic>) -> (Vec<RawLocation>, Vec<RawItem>) {
    let mut locations: Vec<RawLocation> = Vec::new();
    let mut items: Vec<RawItem> = Vec::new();
    let mut ctx = Ctx::None;

    let mut offset = 0;
    for raw in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw.len();

        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let start = line_start + (raw.len() - raw.trim_start().len());
        let span = start..start + line.len();

        if let Some(name) = line.strip_prefix(':') {
            locations.push(RawLocation {
                name: name.to_string(),
                description: None,
                exits: Vec::new(),
                span,
            });
            ctx = Ctx::Location(locations.len() - 1);
            continue;
        }
        if let Some(name) = line.strip_prefix('*') {
            items.push(RawItem {
                name: name.to_string(),
                location: None,
                location_span: span.clone(),
                description: None,
                aliases: Vec::new(),
                fixed: None,
                hidden: false,
                span,
            });
            ctx = Ctx::Item(items.len() - 1);
            continue;
        }

        match ctx {
            Ctx::None => {
                diagnostics.push(Diagnostic::error(
                    span,
                    "content before any `:location` or `*item` header",
                ));
            }
            Ctx::Location(index) => {
                let location = &mut locations[index];
                if location.description.is_none() {
                    location.description = Some(line.to_string());
                } else if let Some((tag, destination)) = line.split_once(':') {
                    match Direction::parse(tag.trim()) {
                        Some(direction) => location.exits.push(RawExit {
                            direction,
                            destination: destination.trim().to_string(),
                            span,
                        }),
                        None => diagnostics.push(Diagnostic::error(
                            span,
                            format!("unknown direction \"{}\"", tag.trim()),
                        )),
                    }
                } else {
                    diagnostics.push(Diagnostic::error(
                        span,
                        "expected an exit line in `DIR:destination` form",
                    ));
                }
            }
            Ctx::Item(index) => {
                let item = &mut items[index];
                if item.location.is_none() {
                    item.location = Some(line.to_string());
                    item.location_span = span;
                } else if item.description.is_none() {
                    item.description = Some(line.to_string());
                } else if let Some((tag, arg)) = line.split_once(':') {
                    match tag.trim() {
                        "A" => item.aliases.extend(
                            arg.split(',')
                                .map(|a| a.trim().to_lowercase())
                                .filter(|a| !a.is_empty()),
                        ),
                        "F" => item.fixed = Some(arg.trim().to_string()),
                        "H" => item.hidden = true,
                        other => diagnostics.push(Diagnostic::error(
                            span,
                            format!("unknown item tag \"{other}\""),
                        )),
                    }
                } else {
                    diagnostics.push(Diagnostic::error(
                        span,
                        "expected an item tag line (`A:`, `F:`, or `H:`)",
                    ));
                }
            }
        }
    }

    (locations, items)
}

/// Pass two: fill the arena, then resolve exit destinations and item
/// placements now that every location name is known.
fn build(
    locations: Vec<RawLocation>,
    items: Vec<RawItem>,
    mut diagnostics: Vec<Diagnostic>,
) -> LoadResult {
    let mut world = World::new();

    if locations.is_empty() {
        diagnostics.push(Diagnostic::error(0..0, "world file defines no locations"));
    }

    let mut pending_exits: Vec<(LocationId, Vec<RawExit>)> = Vec::new();
    for raw in locations {
        let mut location = Location::new(&raw.name);
        location.description = raw.description.unwrap_or_default();
        match world.add_location(location) {
            Ok(id) => pending_exits.push((id, raw.exits)),
            Err(e) => diagnostics.push(Diagnostic::error(raw.span, e.to_string())),
        }
    }

    for (id, exits) in pending_exits {
        for exit in exits {
            match world.find_id_by_name(&exit.destination) {
                Some(destination) => {
                    if let Some(location) = world.location_mut(id) {
                        location.add_exit(exit.direction, destination);
                    }
                }
                None => diagnostics.push(
                    Diagnostic::error(
                        exit.span,
                        format!(
                            "exit destination \"{}\" does not name a known location",
                            exit.destination
                        ),
                    )
                    .with_label("no such location"),
                ),
            }
        }
    }

    let mut seen_items: HashSet<String> = HashSet::new();
    for raw in items {
        if !seen_items.insert(raw.name.to_lowercase()) {
            diagnostics.push(Diagnostic::error(
                raw.span,
                format!("item already exists: \"{}\"", raw.name),
            ));
            continue;
        }

        let Some(place) = raw.location else {
            diagnostics.push(Diagnostic::error(
                raw.span,
                format!("item \"{}\" names no location to rest in", raw.name),
            ));
            continue;
        };
        let Some(location_id) = world.find_id_by_name(&place) else {
            diagnostics.push(
                Diagnostic::error(
                    raw.location_span,
                    format!("item location \"{place}\" does not name a known location"),
                )
                .with_label("no such location"),
            );
            continue;
        };

        let mut item = Item::new(raw.name.clone());
        item.description = raw.description.unwrap_or_default();
        item.fixed = raw.fixed;
        item.hidden = raw.hidden;
        item.add_aliases(raw.aliases.clone());

        world.register_alias(raw.name.clone(), raw.name.clone());
        for alias in raw.aliases {
            world.register_alias(alias, raw.name.clone());
        }

        if let Some(location) = world.location_mut(location_id) {
            location.items.insert(raw.name.clone(), item);
        }
    }

    LoadResult { world, diagnostics }
}
