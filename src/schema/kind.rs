/// Name kinds the forge can produce, parsed from CLI and config strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The kinds of name the forge can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameKind {
    /// "Adjective-or-nationality Creature", e.g. a wild monster's name.
    Creature,
    Item,
    /// An attack or ability name.
    Move,
    Nationality,
}

#[derive(Debug, Clone, Error)]
#[error("unknown name kind '{0}' (expected creature, item, move or nationality)")]
pub struct UnknownNameKind(pub String);

impl NameKind {
    pub const ALL: [NameKind; 4] = [
        NameKind::Creature,
        NameKind::Item,
        NameKind::Move,
        NameKind::Nationality,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NameKind::Creature => "creature",
            NameKind::Item => "item",
            NameKind::Move => "move",
            NameKind::Nationality => "nationality",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NameKind {
    type Err = UnknownNameKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "creature" | "name" => Ok(NameKind::Creature),
            "item" => Ok(NameKind::Item),
            "move" | "ability" => Ok(NameKind::Move),
            "nationality" => Ok(NameKind::Nationality),
            other => Err(UnknownNameKind(other.to_string())),
        }
    }
}
