//! Static game table
//!
//! The default collection sweep walks these games. Entries map a logical
//! key (usable on the command line) to the speedrun.com game id and a
//! display name.

/// A configured game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    /// Logical key, e.g. `super_mario_64`
    pub key: &'static str,
    /// speedrun.com game id
    pub id: &'static str,
    /// Human readable title
    pub name: &'static str,
}

pub const GAMES: &[Game] = &[
    Game {
        key: "super_mario_64",
        id: "o1y9wo6q",
        name: "Super Mario 64",
    },
    Game {
        key: "super_mario_bros",
        id: "om1m3625",
        name: "Super Mario Bros.",
    },
    Game {
        key: "celeste",
        id: "o1y9j9v6",
        name: "Celeste",
    },
    Game {
        key: "minecraft_java",
        id: "j1npme6p",
        name: "Minecraft: Java Edition",
    },
    Game {
        key: "hollow_knight",
        id: "76rqmld8",
        name: "Hollow Knight",
    },
];

/// Ids of every configured game, in table order
pub fn game_ids() -> Vec<&'static str> {
    GAMES.iter().map(|g| g.id).collect()
}

/// Display name for a game id, falling back to the id itself
pub fn game_name(game_id: &str) -> &str {
    GAMES
        .iter()
        .find(|g| g.id == game_id)
        .map(|g| g.name)
        .unwrap_or(game_id)
}

/// Resolve a command line argument that is either a logical key or a raw id
pub fn resolve_game_id(key_or_id: &str) -> &str {
    GAMES
        .iter()
        .find(|g| g.key == key_or_id)
        .map(|g| g.id)
        .unwrap_or(key_or_id)
}
