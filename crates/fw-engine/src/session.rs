//! Session state, the verb dispatcher, and the session loop.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::sync::Arc;

use fw_core::{Direction, LocationId, Player, World};

use crate::error::EngineResult;
use crate::guesser::Guesser;
use crate::parser::{Command, find_item, parse_command};

/// What processing one input line produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Text to send back to the player.
    Reply(String),
    /// Nothing to send. Unrecognized input the guesser could not place
    /// produces no feedback at all.
    Silence,
    /// The session is over; send the farewell and stop reading.
    Farewell(String),
}

/// One isolated play session: a world, a player, and the optionally
/// shared intent guesser.
///
/// Sessions never share game state; the guesser is the only thing a
/// server hands to more than one session, and it is read-only.
pub struct Session {
    world: World,
    player: Player,
    guesser: Option<Arc<Guesser>>,
    /// Noun lookup for the guesser fallback: every item name and alias
    /// plus the cardinal directions, each mapped to its canonical form.
    /// Built once here instead of mutated globally; scan order is the
    /// map's stable order.
    noun_table: BTreeMap<String, String>,
}

impl Session {
    /// Create a session with the player at the world's start location.
    pub fn new(
        world: World,
        player_name: impl Into<String>,
        guesser: Option<Arc<Guesser>>,
    ) -> EngineResult<Self> {
        let start = world.start()?;
        let player = Player::new(start, player_name);

        let mut noun_table = world.aliases().clone();
        for direction in Direction::ALL {
            noun_table.insert(direction.name().to_string(), direction.code().to_string());
            noun_table.insert(
                direction.code().to_lowercase(),
                direction.code().to_string(),
            );
        }

        Ok(Self {
            world,
            player,
            guesser,
            noun_table,
        })
    }

    /// The player state.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The world this session runs against.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process one input line: exact verb dispatch first, then the
    /// guesser fallback for anything unrecognized.
    pub fn process(&mut self, input: &str) -> Outcome {
        self.execute(parse_command(input))
    }

    /// Execute a parsed command against the world.
    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Move { direction } => Outcome::Reply(self.do_move(&direction)),
            Command::Look { target } => Outcome::Reply(self.do_look(target.as_deref())),
            Command::Get { target } => Outcome::Reply(self.do_get(&target)),
            Command::Drop { target } => Outcome::Reply(self.do_drop(&target)),
            Command::Inventory => Outcome::Reply(self.player.inventory()),
            Command::Quit => Outcome::Farewell(format!("Bye {}", self.player.name)),
            Command::Unknown { input } => self.guess_intent(&input),
        }
    }

    /// Drive the session over a duplex line channel: write the opening
    /// location, then read, process, and reply until quit or the
    /// channel closes. A transport error ends only this session.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> std::io::Result<()> {
        output.write_all(self.describe(self.player.location).as_bytes())?;
        output.flush()?;

        let mut line = String::new();
        loop {
            output.write_all(b"> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            match self.process(line.trim_end_matches(['\r', '\n'])) {
                Outcome::Reply(text) => {
                    output.write_all(text.as_bytes())?;
                    if !text.ends_with('\n') {
                        output.write_all(b"\n")?;
                    }
                }
                Outcome::Silence => {}
                Outcome::Farewell(text) => {
                    output.write_all(text.as_bytes())?;
                    output.write_all(b"\n")?;
                    output.flush()?;
                    return Ok(());
                }
            }
            output.flush()?;
        }
    }

    // -----------------------------------------------------------------------
    // Verb handlers. Every failure path is a rendered reply, never an
    // error — the session loop keeps going no matter what was typed.
    // -----------------------------------------------------------------------

    fn do_move(&mut self, direction: &str) -> String {
        let Some(direction) = Direction::parse(direction) else {
            return "No pass around!".to_string();
        };
        let exit = self
            .world
            .location(self.player.location)
            .and_then(|l| l.exits.get(&direction))
            .copied();
        match exit {
            Some(destination) => {
                self.player.location = destination;
                self.describe(destination)
            }
            None => "No pass around!".to_string(),
        }
    }

    fn do_look(&self, target: Option<&str>) -> String {
        let Some(target) = target else {
            return self.describe(self.player.location);
        };

        // A valid exit is peeked at without moving; anything else falls
        // through to item lookup, current location before inventory.
        if let Some(direction) = Direction::parse(target) {
            if let Some(destination) = self
                .world
                .location(self.player.location)
                .and_then(|l| l.exits.get(&direction))
            {
                return self.describe(*destination);
            }
        }

        let here = self.world.location(self.player.location);
        let item = here
            .and_then(|l| find_item(&l.items, target))
            .or_else(|| find_item(&self.player.items, target));
        match item {
            Some(item) => item.describe().to_string(),
            None => format!("You can't see {target}"),
        }
    }

    fn do_get(&mut self, target: &str) -> String {
        let Some(here) = self.world.location_mut(self.player.location) else {
            return format!("You can't see {target}");
        };
        let Some(found) = find_item(&here.items, target) else {
            return format!("You can't see {target}");
        };
        if let Some(message) = &found.fixed {
            return message.clone();
        }

        let name = found.name.clone();
        if let Some(item) = here.items.remove(&name) {
            self.player.items.insert(name.clone(), item);
        }
        format!("Taken {name}")
    }

    fn do_drop(&mut self, target: &str) -> String {
        let name = match find_item(&self.player.items, target) {
            Some(item) => item.name.clone(),
            None => return format!("You don't have {target}"),
        };

        if let Some(item) = self.player.items.remove(&name) {
            if let Some(here) = self.world.location_mut(self.player.location) {
                here.items.insert(name.clone(), item);
            }
        }
        format!("Dropped {name}")
    }

    fn describe(&self, id: LocationId) -> String {
        self.world
            .location(id)
            .map(|l| l.describe(&self.world))
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Guesser fallback
    // -----------------------------------------------------------------------

    /// Fallback for lines with no recognized verb: find a known noun in
    /// the line, classify the remaining text, and dispatch the winner
    /// with the noun's canonical form as its argument.
    fn guess_intent(&mut self, input: &str) -> Outcome {
        match self.infer_command(input) {
            Some(command) => self.execute(command),
            None => Outcome::Silence,
        }
    }

    fn infer_command(&self, input: &str) -> Option<Command> {
        let guesser = self.guesser.as_ref()?;

        for (noun, canonical) in &self.noun_table {
            let Some(residual) = strip_word(input, noun) else {
                continue;
            };
            let ranked = guesser.guess(&residual);
            let Some((category, _)) = ranked.first() else {
                continue;
            };
            let command = match category.as_str() {
                "move" => Command::Move {
                    direction: canonical.clone(),
                },
                "look" => Command::Look {
                    target: Some(canonical.clone()),
                },
                "get" => Command::Get {
                    target: canonical.clone(),
                },
                "drop" => Command::Drop {
                    target: canonical.clone(),
                },
                "inventory" => Command::Inventory,
                "quit" => Command::Quit,
                _ => continue,
            };
            return Some(command);
        }
        None
    }
}

/// Remove the first word-boundary occurrence of `word` from `line`,
/// case-insensitively.
///
/// Matching and stripping both happen on a lowercased copy; the
/// residual only ever feeds the classifier, which lowercases anyway.
/// Returns `None` when the word does not occur as a whole word.
fn strip_word(line: &str, word: &str) -> Option<String> {
    if word.is_empty() {
        return None;
    }
    let line = line.to_lowercase();
    let word = word.to_lowercase();

    let mut from = 0;
    while let Some(found) = line[from..].find(&word) {
        let start = from + found;
        let end = start + word.len();
        let boundary_before = line[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let boundary_after = line[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if boundary_before && boundary_after {
            let mut residual = String::with_capacity(line.len() - word.len());
            residual.push_str(&line[..start]);
            residual.push_str(&line[end..]);
            return Some(residual);
        }
        from = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_core::{Item, Location};

    /// Garage (E→Bedroom, W→Kitchen), Kitchen (E→Garage, knife),
    /// Bedroom (no exits, anvil + dust bunny). Player starts in Garage.
    fn test_world() -> World {
        let mut world = World::new();

        let mut garage = Location::new("Garage");
        garage.description = "You are in the garage.".to_string();
        let mut kitchen = Location::new("Kitchen");
        kitchen.description = "The kitchen is immaculate.".to_string();
        let mut bedroom = Location::new("Bedroom");
        bedroom.description = "A narrow bedroom.".to_string();

        let mut knife = Item::new("knife");
        knife.description = "A sharp kitchen knife.".to_string();
        knife.add_aliases(["blade".to_string()]);
        kitchen.items.insert("knife".to_string(), knife);

        let mut anvil = Item::new("anvil");
        anvil.fixed = Some("It won't budge.".to_string());
        bedroom.items.insert("anvil".to_string(), anvil);

        let mut bunny = Item::new("dust bunny");
        bunny.description = "A ball of dust with aspirations.".to_string();
        bunny.hidden = true;
        bedroom.items.insert("dust bunny".to_string(), bunny);

        let garage_id = world.add_location(garage).unwrap();
        let kitchen_id = world.add_location(kitchen).unwrap();
        let bedroom_id = world.add_location(bedroom).unwrap();

        {
            let garage = world.location_mut(garage_id).unwrap();
            garage.add_exit(Direction::East, bedroom_id);
            garage.add_exit(Direction::West, kitchen_id);
        }
        world
            .location_mut(kitchen_id)
            .unwrap()
            .add_exit(Direction::East, garage_id);

        world.register_alias("knife", "knife");
        world.register_alias("blade", "knife");
        world.register_alias("anvil", "anvil");
        world.register_alias("dust bunny", "dust bunny");

        world
    }

    fn session() -> Session {
        Session::new(test_world(), "John", None).unwrap()
    }

    fn session_with_guesser() -> Session {
        let guesser = Guesser::with_default_corpus();
        Session::new(test_world(), "John", Some(Arc::new(guesser))).unwrap()
    }

    fn reply(outcome: Outcome) -> String {
        match outcome {
            Outcome::Reply(text) => text,
            other => panic!("expected a reply, got {other:?}"),
        }
    }

    #[test]
    fn move_follows_the_exit_and_renders_the_destination() {
        let mut session = session();
        let text = reply(session.process("go E"));

        let bedroom_id = session.world().find_id_by_name("Bedroom").unwrap();
        assert_eq!(session.player().location, bedroom_id);

        let expected = session
            .world()
            .location(bedroom_id)
            .unwrap()
            .describe(session.world());
        assert_eq!(text, expected);
    }

    #[test]
    fn move_without_exit_stays_put() {
        let mut session = session();
        reply(session.process("go E"));
        let bedroom_id = session.world().find_id_by_name("Bedroom").unwrap();
        assert_eq!(session.player().location, bedroom_id);

        let text = reply(session.process("go W"));
        assert_eq!(text, "No pass around!");
        assert_eq!(session.player().location, bedroom_id);
    }

    #[test]
    fn move_with_garbage_direction_is_refused() {
        let mut session = session();
        let home = session.player().location;
        assert_eq!(reply(session.process("go sideways")), "No pass around!");
        assert_eq!(session.player().location, home);
    }

    #[test]
    fn look_renders_current_location() {
        let mut session = session();
        let text = reply(session.process("look"));
        assert!(text.contains("Current location: Garage"));
        assert!(text.contains("E (Bedroom)"));
        assert!(text.contains("W (Kitchen)"));
    }

    #[test]
    fn look_direction_peeks_without_moving() {
        let mut session = session();
        let home = session.player().location;

        let text = reply(session.process("look W"));
        assert!(text.contains("Current location: Kitchen"));
        assert_eq!(session.player().location, home);
    }

    #[test]
    fn look_item_shows_description() {
        let mut session = session();
        reply(session.process("go W"));
        assert_eq!(
            reply(session.process("look knife")),
            "A sharp kitchen knife."
        );
        assert_eq!(
            reply(session.process("examine blade")),
            "A sharp kitchen knife."
        );
    }

    #[test]
    fn look_finds_carried_items_too() {
        let mut session = session();
        reply(session.process("go W"));
        reply(session.process("take knife"));
        reply(session.process("go E"));
        assert_eq!(
            reply(session.process("look knife")),
            "A sharp kitchen knife."
        );
    }

    #[test]
    fn look_hidden_item_resolves_by_name() {
        let mut session = session();
        reply(session.process("go E"));

        let rendered = reply(session.process("look"));
        assert!(!rendered.contains("dust bunny"));

        assert_eq!(
            reply(session.process("look dust bunny")),
            "A ball of dust with aspirations."
        );
    }

    #[test]
    fn look_unknown_target_cant_be_seen() {
        let mut session = session();
        assert_eq!(reply(session.process("look spoon")), "You can't see spoon");
    }

    #[test]
    fn get_then_drop_round_trips_ownership() {
        let mut session = session();
        reply(session.process("go W"));

        assert_eq!(reply(session.process("take knife")), "Taken knife");
        let kitchen_id = session.world().find_id_by_name("Kitchen").unwrap();
        assert!(
            !session
                .world()
                .location(kitchen_id)
                .unwrap()
                .items
                .contains_key("knife")
        );
        assert!(session.player().items.contains_key("knife"));
        assert_eq!(
            reply(session.process("inventory")),
            "You are carrying: knife"
        );

        assert_eq!(reply(session.process("drop knife")), "Dropped knife");
        assert!(
            session
                .world()
                .location(kitchen_id)
                .unwrap()
                .items
                .contains_key("knife")
        );
        assert!(session.player().items.is_empty());
        assert_eq!(reply(session.process("inventory")), "Your hands are empty!");
    }

    #[test]
    fn get_by_alias_moves_the_canonical_item() {
        let mut session = session();
        reply(session.process("go W"));
        assert_eq!(reply(session.process("get blade")), "Taken knife");
        assert!(session.player().items.contains_key("knife"));
    }

    #[test]
    fn get_fixed_item_echoes_its_message_and_moves_nothing() {
        let mut session = session();
        reply(session.process("go E"));

        assert_eq!(reply(session.process("take anvil")), "It won't budge.");

        let bedroom_id = session.world().find_id_by_name("Bedroom").unwrap();
        assert!(
            session
                .world()
                .location(bedroom_id)
                .unwrap()
                .items
                .contains_key("anvil")
        );
        assert!(session.player().items.is_empty());
    }

    #[test]
    fn get_missing_item_cant_be_seen() {
        let mut session = session();
        assert_eq!(reply(session.process("take knife")), "You can't see knife");
    }

    #[test]
    fn drop_without_having_it() {
        let mut session = session();
        assert_eq!(
            reply(session.process("drop knife")),
            "You don't have knife"
        );
    }

    #[test]
    fn quit_says_farewell() {
        let mut session = session();
        assert_eq!(
            session.process("quit"),
            Outcome::Farewell("Bye John".to_string())
        );
    }

    #[test]
    fn unknown_line_without_guesser_is_silent() {
        let mut session = session();
        assert_eq!(session.process("grab knife"), Outcome::Silence);
        assert_eq!(session.process("sing loudly"), Outcome::Silence);
    }

    #[test]
    fn guesser_turns_grab_into_take() {
        let mut session = session_with_guesser();
        reply(session.process("go W"));

        let outcome = session.process("grab knife");
        assert_eq!(outcome, Outcome::Reply("Taken knife".to_string()));
        assert!(session.player().items.contains_key("knife"));
    }

    #[test]
    fn guesser_resolves_aliases_to_canonical_names() {
        let mut session = session_with_guesser();
        reply(session.process("go W"));

        let outcome = session.process("snatch the blade");
        assert_eq!(outcome, Outcome::Reply("Taken knife".to_string()));
    }

    #[test]
    fn guesser_handles_directions() {
        let mut session = session_with_guesser();
        let outcome = session.process("wander west");
        let text = reply(outcome);
        assert!(text.contains("Current location: Kitchen"));
        assert_eq!(
            session.player().location,
            session.world().find_id_by_name("Kitchen").unwrap()
        );
    }

    #[test]
    fn guesser_line_with_no_known_noun_is_silent() {
        let mut session = session_with_guesser();
        assert_eq!(session.process("grab the spoon"), Outcome::Silence);
    }

    #[test]
    fn guesser_line_with_noun_but_no_verb_signal_is_silent() {
        let mut session = session_with_guesser();
        assert_eq!(session.process("xyzzy knife"), Outcome::Silence);
    }

    #[test]
    fn session_loop_plays_a_scripted_transcript() {
        let mut session = session();
        let script = b"go W\ntake knife\ninventory\nquit\n" as &[u8];
        let mut output = Vec::new();

        session.run(script, &mut output).unwrap();
        let transcript = String::from_utf8(output).unwrap();

        assert!(transcript.starts_with("Current location: Garage\n"));
        assert!(transcript.contains("Current location: Kitchen"));
        assert!(transcript.contains("Taken knife\n"));
        assert!(transcript.contains("You are carrying: knife\n"));
        assert!(transcript.ends_with("Bye John\n"));
    }

    #[test]
    fn session_loop_survives_eof_without_quit() {
        let mut session = session();
        let script = b"look\n" as &[u8];
        let mut output = Vec::new();
        session.run(script, &mut output).unwrap();
    }

    #[test]
    fn strip_word_respects_boundaries() {
        assert_eq!(strip_word("grab knife", "knife"), Some("grab ".to_string()));
        assert_eq!(strip_word("grab KNIFE", "knife"), Some("grab ".to_string()));
        assert_eq!(strip_word("sharpen knives", "knife"), None);
        assert_eq!(strip_word("north", "n"), None);
        assert_eq!(strip_word("go n", "n"), Some("go ".to_string()));
        assert_eq!(strip_word("anything", ""), None);
    }
}
