//! Key-to-action bindings.
//!
//! Windows resolve every key through this table before offering it to the
//! focused widget; the field-navigation actions are intercepted by the window
//! itself and never reach widgets. The table is process-global so every
//! window dispatches consistently.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::core::input::Key;

/// Actions keys resolve into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Begin,
    End,
    PrevPage,
    NextPage,
    NextField,
    PrevField,
    Confirm,
    Cancel,
    Delete,
    Clear,
    Select,
    Help,
}

/// A key-to-action table. Each key maps to at most one action.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    map: HashMap<Key, KeyAction>,
}

impl KeyBindings {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// The stock table every window starts from.
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();
        bindings.bind(Key::Up, KeyAction::Up);
        bindings.bind(Key::Down, KeyAction::Down);
        bindings.bind(Key::Left, KeyAction::Left);
        bindings.bind(Key::Right, KeyAction::Right);
        bindings.bind(Key::Home, KeyAction::Begin);
        bindings.bind(Key::End, KeyAction::End);
        bindings.bind(Key::PageUp, KeyAction::PrevPage);
        bindings.bind(Key::PageDown, KeyAction::NextPage);
        bindings.bind(Key::Tab, KeyAction::NextField);
        bindings.bind(Key::BackTab, KeyAction::PrevField);
        bindings.bind(Key::Enter, KeyAction::Confirm);
        bindings.bind(Key::Escape, KeyAction::Cancel);
        bindings.bind(Key::Delete, KeyAction::Delete);
        bindings.bind(Key::Ctrl('u'), KeyAction::Clear);
        bindings.bind(Key::Char(' '), KeyAction::Select);
        bindings.bind(Key::F(1), KeyAction::Help);
        bindings
    }

    pub fn bind(&mut self, key: Key, action: KeyAction) {
        self.map.insert(key, action);
    }

    pub fn unbind(&mut self, key: Key) {
        self.map.remove(&key);
    }

    pub fn action_for(&self, key: Key) -> Option<KeyAction> {
        self.map.get(&key).copied()
    }

    /// Every key currently bound to `action`, in no particular order.
    pub fn keys_for(&self, action: KeyAction) -> Vec<Key> {
        self.map
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect()
    }
}

static GLOBAL_KEY_BINDINGS: Lazy<RwLock<KeyBindings>> =
    Lazy::new(|| RwLock::new(KeyBindings::with_defaults()));

/// Resolve `key` against the global table.
pub fn find_action(key: Key) -> Option<KeyAction> {
    GLOBAL_KEY_BINDINGS
        .read()
        .expect("key bindings lock poisoned")
        .action_for(key)
}

/// Mutate the global table in place.
pub fn configure<F>(f: F)
where
    F: FnOnce(&mut KeyBindings),
{
    let mut bindings = GLOBAL_KEY_BINDINGS
        .write()
        .expect("key bindings lock poisoned");
    f(&mut bindings);
}
