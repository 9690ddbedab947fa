//! Platform id → display name table
//!
//! Ids are the speedrun.com platform identifiers. Unknown ids are shown as-is.

/// Known platforms, `(id, display name)`
pub const PLATFORM_NAMES: &[(&str, &str)] = &[
    ("v06dr394", "NES"),
    ("7m6ylw9p", "SNES"),
    ("83exk6l5", "Nintendo 64"),
    ("83exovel", "Game Boy"),
    ("nzelkr6q", "PlayStation"),
    ("o0e3y2rw", "PC"),
    ("mr6k4e7n", "Wii"),
    ("w89rwelk", "Xbox"),
    ("p86kx6rq", "PlayStation 2"),
    ("v06dr3e4", "GameCube"),
];

/// Resolve a platform id to its display name, falling back to the id itself
pub fn platform_name(platform_id: &str) -> &str {
    PLATFORM_NAMES
        .iter()
        .find(|(id, _)| *id == platform_id)
        .map(|(_, name)| *name)
        .unwrap_or(platform_id)
}
