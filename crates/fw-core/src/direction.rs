use std::fmt;

use serde::{Deserialize, Serialize};

/// A cardinal direction labelling an exit edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// North.
    North,
    /// East.
    East,
    /// South.
    South,
    /// West.
    West,
}

impl Direction {
    /// All directions in N, E, S, W order. Renders iterate this array so
    /// exit listings come out in a stable order.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Parse a direction from its letter code or full name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "e" | "east" => Some(Self::East),
            "s" | "south" => Some(Self::South),
            "w" | "west" => Some(Self::West),
            _ => None,
        }
    }

    /// The single-letter code used in world files and the noun table.
    pub fn code(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::East => "E",
            Self::South => "S",
            Self::West => "W",
        }
    }

    /// The full lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes_and_names() {
        assert_eq!(Direction::parse("n"), Some(Direction::North));
        assert_eq!(Direction::parse("N"), Some(Direction::North));
        assert_eq!(Direction::parse("north"), Some(Direction::North));
        assert_eq!(Direction::parse("NORTH"), Some(Direction::North));
        assert_eq!(Direction::parse("w"), Some(Direction::West));
        assert_eq!(Direction::parse("up"), None);
        assert_eq!(Direction::parse(""), None);
    }

    #[test]
    fn display_is_the_code() {
        assert_eq!(Direction::East.to_string(), "E");
    }

    #[test]
    fn all_is_compass_order() {
        let codes: Vec<&str> = Direction::ALL.iter().map(|d| d.code()).collect();
        assert_eq!(codes, ["N", "E", "S", "W"]);
    }
}
