use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The keys the viewer polls every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Escape,
    W,
    A,
    S,
    D,
    Up,
    Down,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Escape,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Up,
        Key::Down,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::Escape => "escape",
            Key::W => "w",
            Key::A => "a",
            Key::S => "s",
            Key::D => "d",
            Key::Up => "up",
            Key::Down => "down",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key `{0}` (expected one of: escape, w, a, s, d, up, down)")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "esc" => Ok(Key::Escape),
            other => Key::ALL
                .into_iter()
                .find(|k| k.name() == other)
                .ok_or_else(|| UnknownKey(s.to_string())),
        }
    }
}

/// Per-frame "is this key held" query supplied by the window system.
pub trait KeyState {
    fn is_held(&self, key: Key) -> bool;
}

/// Key state tracked from press/release events.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    /// Drop every held key, e.g. when focus is lost and releases go missing.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl KeyState for HeldKeys {
    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}
