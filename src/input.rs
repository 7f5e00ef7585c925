//! Player intents and raw key handling
//!
//! The simulation only sees [`Intent`]s. Whatever delivers key events (a
//! window, a terminal, a test) maps its key names through [`KeyBindings`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Something the player wants the craft to do while a key is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Thrust,
    TurnLeft,
    TurnRight,
    Depart,
}

impl Intent {
    pub const ALL: [Intent; 4] = [
        Intent::Thrust,
        Intent::TurnLeft,
        Intent::TurnRight,
        Intent::Depart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Thrust => "thrust",
            Intent::TurnLeft => "turn_left",
            Intent::TurnRight => "turn_right",
            Intent::Depart => "depart",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "thrust" | "accelerate" => Some(Intent::Thrust),
            "turn_left" | "left" => Some(Intent::TurnLeft),
            "turn_right" | "right" => Some(Intent::TurnRight),
            "depart" | "leave" => Some(Intent::Depart),
            _ => None,
        }
    }
}

/// Key name to intent table. Key names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    keys: HashMap<String, Intent>,
}

impl Default for KeyBindings {
    /// W thrusts, A/D turn, X leaves a planet
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind("w", Intent::Thrust);
        bindings.bind("a", Intent::TurnLeft);
        bindings.bind("d", Intent::TurnRight);
        bindings.bind("x", Intent::Depart);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Bind a key, replacing any previous binding for it
    pub fn bind(&mut self, key: &str, intent: Intent) {
        self.keys.insert(key.to_lowercase(), intent);
    }

    pub fn intent_for(&self, key: &str) -> Option<Intent> {
        self.keys.get(&key.to_lowercase()).copied()
    }

    /// Apply a key press to `input`. Returns the intent it mapped to.
    pub fn press(&self, input: &mut TickInput, key: &str) -> Option<Intent> {
        self.apply(input, key, true)
    }

    /// Apply a key release to `input`. Returns the intent it mapped to.
    pub fn release(&self, input: &mut TickInput, key: &str) -> Option<Intent> {
        self.apply(input, key, false)
    }

    fn apply(&self, input: &mut TickInput, key: &str, pressed: bool) -> Option<Intent> {
        let intent = self.intent_for(key)?;
        input.set(intent, pressed);
        Some(intent)
    }
}
