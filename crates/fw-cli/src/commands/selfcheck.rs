//! Self-checks: load the sample universe and exercise the core moves.

use colored::Colorize;
use fw_engine::{Outcome, Session};

/// The built-in demonstration world used by `fw test`.
pub const SAMPLE_UNIVERSE: &str = "\
# Fernweh sample universe.

:Garage
You are in the garage. There are no cars here currently.
E:Bedroom
W:Kitchen

:Kitchen
The kitchen is immaculate. You suspect that nobody has ever actually prepared any food here.
E:Garage

:Bedroom
A narrow bedroom. Someone left in a hurry.
W:Garage

*knife
Kitchen
A sharp kitchen knife.
A:blade,cutter

*workbench
Garage
A heavy oak workbench, bolted to the floor.
F:It won't budge.

*dust bunny
Bedroom
A ball of dust with aspirations.
H:
";

type Check = fn() -> Result<(), String>;

const CHECKS: &[(&str, Check)] = &[
    ("sample universe loads", check_load),
    ("movement follows exits", check_movement),
    ("items can be taken and dropped", check_take_drop),
    ("aliases resolve to their item", check_aliases),
    ("fixed items stay put", check_fixed),
];

pub fn run() -> Result<(), String> {
    let mut failures = 0;
    for (name, check) in CHECKS {
        match check() {
            Ok(()) => println!("{} {name}", "ok".green()),
            Err(e) => {
                println!("{} {name}: {e}", "FAILED".red());
                failures += 1;
            }
        }
    }

    if failures == 0 {
        println!("  All {} checks passed.", CHECKS.len());
        Ok(())
    } else {
        Err(format!("{failures} of {} checks failed", CHECKS.len()))
    }
}

fn sample_session() -> Result<Session, String> {
    let result = fw_worldfile::load_str(SAMPLE_UNIVERSE);
    if result.has_errors() {
        return Err(format!("sample universe broken: {:?}", result.diagnostics));
    }
    Session::new(result.world, "Tester", None).map_err(|e| e.to_string())
}

fn expect_reply(session: &mut Session, input: &str) -> Result<String, String> {
    match session.process(input) {
        Outcome::Reply(text) => Ok(text),
        other => Err(format!("`{input}` produced {other:?}")),
    }
}

fn check_load() -> Result<(), String> {
    let result = fw_worldfile::load_str(SAMPLE_UNIVERSE);
    if result.has_errors() {
        return Err(format!("{:?}", result.diagnostics));
    }
    if result.world.location_count() != 3 {
        return Err(format!(
            "expected 3 locations, found {}",
            result.world.location_count()
        ));
    }
    if result.world.item_count() != 3 {
        return Err(format!(
            "expected 3 items, found {}",
            result.world.item_count()
        ));
    }
    Ok(())
}

fn check_movement() -> Result<(), String> {
    let mut session = sample_session()?;

    let text = expect_reply(&mut session, "go E")?;
    if !text.contains("Current location: Bedroom") {
        return Err(format!("`go E` did not land in the bedroom: {text:?}"));
    }

    let text = expect_reply(&mut session, "go N")?;
    if text != "No pass around!" {
        return Err(format!("missing exit was not refused: {text:?}"));
    }
    Ok(())
}

fn check_take_drop() -> Result<(), String> {
    let mut session = sample_session()?;
    expect_reply(&mut session, "go W")?;

    let text = expect_reply(&mut session, "take knife")?;
    if text != "Taken knife" {
        return Err(format!("take failed: {text:?}"));
    }

    let text = expect_reply(&mut session, "inventory")?;
    if text != "You are carrying: knife" {
        return Err(format!("inventory wrong: {text:?}"));
    }

    let text = expect_reply(&mut session, "drop knife")?;
    if text != "Dropped knife" {
        return Err(format!("drop failed: {text:?}"));
    }

    let text = expect_reply(&mut session, "inventory")?;
    if text != "Your hands are empty!" {
        return Err(format!("hands not empty after drop: {text:?}"));
    }
    Ok(())
}

fn check_aliases() -> Result<(), String> {
    let mut session = sample_session()?;
    expect_reply(&mut session, "go W")?;

    let by_alias = expect_reply(&mut session, "look blade")?;
    let by_name = expect_reply(&mut session, "look knife")?;
    if by_alias != by_name {
        return Err(format!("alias and name disagree: {by_alias:?} vs {by_name:?}"));
    }
    Ok(())
}

fn check_fixed() -> Result<(), String> {
    let mut session = sample_session()?;

    let text = expect_reply(&mut session, "take workbench")?;
    if text != "It won't budge." {
        return Err(format!("fixed message wrong: {text:?}"));
    }

    let text = expect_reply(&mut session, "look")?;
    if !text.contains("workbench") {
        return Err("workbench left its location".to_string());
    }
    Ok(())
}
