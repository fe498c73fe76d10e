//! Held-key capture and per-tick input snapshots
//!
//! Input capture (a window event handler, a test, or the AI) writes lowercase
//! key identifiers into a shared [`KeyboardState`]. The simulation reads the
//! set exactly once at tick start and resolves it into an immutable
//! [`InputState`] per fighter via that fighter's [`ControlScheme`].

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::game::fighter::FighterSlot;

/// Shared set of currently held keys, written by the input-capture
/// collaborator and read by the tick loop.
#[derive(Clone, Default)]
pub struct KeyboardState {
    keys: Arc<RwLock<HashSet<String>>>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Identifiers are normalized to lowercase.
    pub fn press(&self, key: &str) {
        self.keys.write().insert(key.to_lowercase());
    }

    /// Record a key release.
    pub fn release(&self, key: &str) {
        self.keys.write().remove(&key.to_lowercase());
    }

    /// Drop all held keys (e.g. on window focus loss).
    pub fn clear(&self) {
        self.keys.write().clear();
    }

    /// Copy out the held keys. The tick loop takes exactly one snapshot per
    /// tick so resolution never observes mid-tick input changes.
    pub fn snapshot(&self) -> HashSet<String> {
        self.keys.read().clone()
    }
}

/// Key bindings for one fighter slot.
#[derive(Debug, Clone, Copy)]
pub struct ControlScheme {
    pub left: &'static str,
    pub right: &'static str,
    pub up: &'static str,
    pub down: &'static str,
    pub attack: &'static str,
    pub block: &'static str,
    pub special: &'static str,
}

const PLAYER_ONE_SCHEME: ControlScheme = ControlScheme {
    left: "a",
    right: "d",
    up: "w",
    down: "s",
    attack: "f",
    block: "g",
    special: "h",
};

const PLAYER_TWO_SCHEME: ControlScheme = ControlScheme {
    left: "arrowleft",
    right: "arrowright",
    up: "arrowup",
    down: "arrowdown",
    attack: "k",
    block: "l",
    special: ";",
};

impl ControlScheme {
    pub fn for_slot(slot: FighterSlot) -> &'static ControlScheme {
        match slot {
            FighterSlot::PlayerOne => &PLAYER_ONE_SCHEME,
            FighterSlot::PlayerTwo => &PLAYER_TWO_SCHEME,
        }
    }

    /// Resolve a held-key set into this scheme's input snapshot.
    pub fn capture(&self, keys: &HashSet<String>) -> InputState {
        InputState {
            left: keys.contains(self.left),
            right: keys.contains(self.right),
            up: keys.contains(self.up),
            down: keys.contains(self.down),
            attack: keys.contains(self.attack),
            block: keys.contains(self.block),
            special: keys.contains(self.special),
        }
    }
}

/// Input state for a single fighter for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub attack: bool,
    pub block: bool,
    pub special: bool,
}
