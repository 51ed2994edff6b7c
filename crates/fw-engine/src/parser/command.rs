//! Verb table and command parsing for player input.

/// A parsed player command, one variant per dispatcher verb.
///
/// Keeping the verbs in a closed enum means every handler site is an
/// exhaustive match — adding a verb fails to compile until each one is
/// handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move through an exit (`move` / `go`).
    Move {
        /// The direction argument, as typed or inferred.
        direction: String,
    },
    /// Describe the current location, an exit, or an item
    /// (`look` / `examine` / `ex`).
    Look {
        /// Optional target: a direction or an item name.
        target: Option<String>,
    },
    /// Pick up an item (`get` / `take`).
    Get {
        /// The item name or alias.
        target: String,
    },
    /// Put down a carried item (`drop` / `put`).
    Drop {
        /// The item name or alias.
        target: String,
    },
    /// List carried items (`inventory` / `inv` / `i`).
    Inventory,
    /// End the session.
    Quit,
    /// No verb matched; a candidate for the intent guesser.
    Unknown {
        /// The original input line, trimmed.
        input: String,
    },
}

/// Verb synonyms, as the dispatcher recognizes them.
const MOVE_VERBS: &[&str] = &["move", "go"];
const LOOK_VERBS: &[&str] = &["look", "examine", "ex"];
const GET_VERBS: &[&str] = &["get", "take"];
const DROP_VERBS: &[&str] = &["drop", "put"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i"];
const QUIT_VERBS: &[&str] = &["quit"];

/// Parse an input line into a command.
///
/// The first whitespace-delimited token, lowercased, is matched exactly
/// against the verb table; the remaining tokens join into the single
/// free-text argument. Anything else — bare directions included — comes
/// back as [`Command::Unknown`] for the guesser to take a shot at.
pub fn parse_command(input: &str) -> Command {
    let mut words = input.split_whitespace();
    let Some(first) = words.next() else {
        return Command::Unknown {
            input: String::new(),
        };
    };
    let verb = first.to_lowercase();
    let arg = words.collect::<Vec<_>>().join(" ");

    if MOVE_VERBS.contains(&verb.as_str()) {
        return Command::Move { direction: arg };
    }
    if LOOK_VERBS.contains(&verb.as_str()) {
        return Command::Look {
            target: if arg.is_empty() { None } else { Some(arg) },
        };
    }
    if GET_VERBS.contains(&verb.as_str()) {
        return Command::Get { target: arg };
    }
    if DROP_VERBS.contains(&verb.as_str()) {
        return Command::Drop { target: arg };
    }
    if INVENTORY_VERBS.contains(&verb.as_str()) {
        return Command::Inventory;
    }
    if QUIT_VERBS.contains(&verb.as_str()) {
        return Command::Quit;
    }

    Command::Unknown {
        input: input.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_move_and_go() {
        assert_eq!(
            parse_command("go E"),
            Command::Move {
                direction: "E".to_string()
            }
        );
        assert_eq!(
            parse_command("move north"),
            Command::Move {
                direction: "north".to_string()
            }
        );
    }

    #[test]
    fn parse_look_variants() {
        assert_eq!(parse_command("look"), Command::Look { target: None });
        assert_eq!(parse_command("ex"), Command::Look { target: None });
        assert_eq!(
            parse_command("examine knife"),
            Command::Look {
                target: Some("knife".to_string())
            }
        );
        assert_eq!(
            parse_command("look dust bunny"),
            Command::Look {
                target: Some("dust bunny".to_string())
            }
        );
    }

    #[test]
    fn parse_get_and_drop() {
        assert_eq!(
            parse_command("take knife"),
            Command::Get {
                target: "knife".to_string()
            }
        );
        assert_eq!(
            parse_command("put knife"),
            Command::Drop {
                target: "knife".to_string()
            }
        );
    }

    #[test]
    fn parse_inventory_shortcuts() {
        assert_eq!(parse_command("inventory"), Command::Inventory);
        assert_eq!(parse_command("inv"), Command::Inventory);
        assert_eq!(parse_command("i"), Command::Inventory);
    }

    #[test]
    fn parse_quit() {
        assert_eq!(parse_command("quit"), Command::Quit);
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(
            parse_command("TAKE Knife"),
            Command::Get {
                target: "Knife".to_string()
            }
        );
    }

    #[test]
    fn bare_directions_are_unknown() {
        assert_eq!(
            parse_command("north"),
            Command::Unknown {
                input: "north".to_string()
            }
        );
    }

    #[test]
    fn free_text_is_unknown() {
        assert_eq!(
            parse_command("grab the knife"),
            Command::Unknown {
                input: "grab the knife".to_string()
            }
        );
        assert_eq!(
            parse_command("   "),
            Command::Unknown {
                input: String::new()
            }
        );
    }
}
