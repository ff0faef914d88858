use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "KeybindingTable", into = "KeybindingTable")]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Entries given in a file override the defaults one action at a time, so a
/// `[keybindings.bindings]` table only needs the keys being changed.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `toggle_pause` → `"KeyP"`).
    bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action).
    key_to_action: HashMap<String, KeyAction>,
}

/// On-disk shape of [`KeybindingOptions`].
#[derive(Serialize, Deserialize)]
struct KeybindingTable {
    #[serde(default)]
    bindings: HashMap<KeyAction, String>,
}

impl From<KeybindingTable> for KeybindingOptions {
    fn from(table: KeybindingTable) -> Self {
        let mut opts = Self::default();
        for (action, key) in table.bindings {
            opts.assign(action, key);
        }
        opts.rebuild_reverse_map();
        opts
    }
}

impl From<KeybindingOptions> for KeybindingTable {
    fn from(opts: KeybindingOptions) -> Self {
        Self {
            bindings: opts.bindings,
        }
    }
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::MoveSphereUp, "KeyW".into()),
            (KeyAction::MoveSphereDown, "KeyS".into()),
            (KeyAction::MoveSphereLeft, "KeyA".into()),
            (KeyAction::MoveSphereRight, "KeyD".into()),
            (KeyAction::MoveSphereForward, "KeyQ".into()),
            (KeyAction::MoveSphereBack, "KeyE".into()),
            (KeyAction::ResetSphere, "Space".into()),
            (KeyAction::TogglePause, "KeyP".into()),
            (KeyAction::ReportTiming, "KeyT".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            if let Some(previous) = self.key_to_action.insert(key.clone(), *action) {
                log::warn!("key {key} bound to both {previous:?} and {action:?}");
            }
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }

    /// Key currently bound to `action`.
    #[must_use]
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.bindings.get(&action).map(String::as_str)
    }

    /// Bind `action` to `key`, replacing its previous key. Any other action
    /// bound to `key` is unbound.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        self.assign(action, key.into());
        self.rebuild_reverse_map();
    }

    fn assign(&mut self, action: KeyAction, key: String) {
        self.bindings
            .retain(|other, bound| *other == action || *bound != key);
        let _ = self.bindings.insert(action, key);
    }
}
