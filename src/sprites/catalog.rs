//! Built-in ASCII sprite catalog

/// One multi-line drawing
pub type SpriteFrame = &'static [&'static str];

/// A named sprite with one or more frames
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub name: &'static str,
    pub frames: &'static [SpriteFrame],
}

impl Sprite {
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Frame by index (wraps), empty when the sprite has no frames
    pub fn frame(&self, index: usize) -> SpriteFrame {
        if self.frames.is_empty() {
            return &[];
        }
        self.frames[index % self.frames.len()]
    }
}

const PLAYER_WALK: &[SpriteFrame] = &[
    &[
        "    (o_o)    ",
        "   <)   (>   ",
        "    /|_|\\    ",
        "     | |     ",
        "    /   \\    ",
    ],
    &[
        "    (O_O)    ",
        "   <)   (>   ",
        "    /| |\\    ",
        "     |_|     ",
        "    /   \\    ",
    ],
    &[
        "    (°_°)    ",
        "   <)   (>   ",
        "    /|^|\\    ",
        "     |_|     ",
        "    /   \\    ",
    ],
];

const MONITOR: &[SpriteFrame] = &[&[
    "  .========================.",
    "  |  [■]                   |",
    "  |  |> _ SYSTEM READY     |",
    "  |                        |",
    "  |  ENTER PASSWORD:       |",
    "  |  [________________]    |",
    "  |                        |",
    "  |  > RETR0 TERMINAL      |",
    "  '========================'",
]];

const DOOR_CLOSED: &[SpriteFrame] = &[&[
    "  +========================+",
    "  |                        |",
    "  |         [ # ]          |",
    "  |                        |",
    "  |          _|_           |",
    "  |         / | \\          |",
    "  |           |            |",
    "  |      [LOCKED]          |",
    "  |                        |",
    "  +========================+",
]];

const DOOR_OPEN: &[SpriteFrame] = &[&[
    "         +========================+",
    "        /|                        |",
    "       / |                        |",
    "      /  |                        |",
    "     /   |       FREEDOM          |",
    "    /    |                        |",
    "   /     |        AWAITS          |",
    "  /      |                        |",
    " /       |                        |",
    "+--------+========================+",
]];

const COMPUTER_TERMINAL: &[SpriteFrame] = &[&[
    "    ┌──────────────────┐",
    "    │ ████████████████ │",
    "    │ █ MAINFRAME █ █  │",
    "    │ ████████████████ │",
    "    │                  │",
    "    │ > LOGIN REQUIRED │",
    "    │                  │",
    "    └──────────────────┘",
]];

const KEYCARD: &[SpriteFrame] = &[&[
    "  ┌──────────────┐",
    "  │ ████         │",
    "  │ ████ ACCESS  │",
    "  │ ████ GRANTED │",
    "  │ ████         │",
    "  └──────────────┘",
]];

const WARNING_SIGN: &[SpriteFrame] = &[&[
    "     ▲▲▲▲▲▲▲     ",
    "    ▲ DANGER ▲    ",
    "   ▲ HIGH VOLT ▲   ",
    "    ▲ DANGER ▲    ",
    "     ▼▼▼▼▼▼▼     ",
]];

const GLITCH: &[SpriteFrame] = &[
    &[
        "    ▓▓░░▓▓░░    ",
        "   ░▓▓░░▓▓░░▓   ",
        "    ░▓▓▓▓▓▓░    ",
        "     ░▓▓▓▓░     ",
        "    ░▓░▓▓░▓░    ",
    ],
    &[
        "    ░░▓▓░░▓▓    ",
        "   ▓░░▓▓░░▓▓░   ",
        "    ▓░░░░░░▓    ",
        "     ▓░░░░▓     ",
        "    ▓░▓░░▓░▓    ",
    ],
];

const VICTORY: &[SpriteFrame] = &[&[
    "     (^_^)     ",
    "    <)   (>    ",
    "     /|★|\\     ",
    "      |_|      ",
    "     /   \\     ",
    "               ",
    "   VICTORY!    ",
]];

/// Keyed sprite lookup
#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    sprites: Vec<Sprite>,
}

impl SpriteCatalog {
    pub fn new() -> Self {
        Self { sprites: Vec::new() }
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (name, frames) in [
            ("player_walk", PLAYER_WALK),
            ("monitor", MONITOR),
            ("door_closed", DOOR_CLOSED),
            ("door_open", DOOR_OPEN),
            ("computer_terminal", COMPUTER_TERMINAL),
            ("keycard", KEYCARD),
            ("warning_sign", WARNING_SIGN),
            ("glitch", GLITCH),
            ("victory", VICTORY),
        ] {
            catalog.insert(Sprite { name, frames });
        }
        catalog
    }

    /// Add a sprite, replacing any with the same name
    pub fn insert(&mut self, sprite: Sprite) {
        match self.sprites.iter_mut().find(|s| s.name == sprite.name) {
            Some(existing) => *existing = sprite,
            None => self.sprites.push(sprite),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.name == name)
    }

    /// Frame lines for a sprite, empty when the name is unknown
    pub fn frame(&self, name: &str, index: usize) -> SpriteFrame {
        self.get(name).map(|s| s.frame(index)).unwrap_or(&[])
    }

    pub fn frame_count(&self, name: &str) -> usize {
        self.get(name).map_or(0, |s| s.frames.len())
    }

    pub fn is_animated(&self, name: &str) -> bool {
        self.get(name).is_some_and(Sprite::is_animated)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sprites.iter().map(|s| s.name)
    }
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = SpriteCatalog::builtin();
        assert_eq!(catalog.frame_count("player_walk"), 3);
        assert!(catalog.is_animated("glitch"));
        assert!(!catalog.is_animated("monitor"));
        assert_eq!(catalog.frame("monitor", 0).len(), 9);
        assert!(catalog.names().any(|n| n == "keycard"));
    }

    #[test]
    fn test_unknown_sprite_is_empty() {
        let catalog = SpriteCatalog::builtin();
        assert!(catalog.get("dragon").is_none());
        assert!(catalog.frame("dragon", 0).is_empty());
        assert_eq!(catalog.frame_count("dragon"), 0);
    }

    #[test]
    fn test_insert_replaces_by_name() {
        const ONE: &[SpriteFrame] = &[&["x"]];
        let mut catalog = SpriteCatalog::builtin();
        let before = catalog.names().count();
        catalog.insert(Sprite { name: "monitor", frames: ONE });
        assert_eq!(catalog.names().count(), before);
        assert_eq!(catalog.frame("monitor", 0), &["x"]);
    }

    #[test]
    fn test_frame_index_wraps() {
        let catalog = SpriteCatalog::builtin();
        assert_eq!(catalog.frame("glitch", 2), catalog.frame("glitch", 0));
    }
}
