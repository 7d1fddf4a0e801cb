//! Menu keybindings.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    SelectUp,
    SelectDown,
    SelectConfirm,
}

pub type KeyId = String;

pub static DEFAULT_MENU_KEYBINDINGS: LazyLock<HashMap<MenuAction, Vec<KeyId>>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();
        map.insert(
            MenuAction::SelectUp,
            vec!["up".to_string(), "k".to_string()],
        );
        map.insert(
            MenuAction::SelectDown,
            vec!["down".to_string(), "j".to_string()],
        );
        map.insert(
            MenuAction::SelectConfirm,
            vec!["enter".to_string(), " ".to_string()],
        );
        map
    });

#[derive(Debug, Clone)]
pub struct MenuKeybindings {
    bindings: HashMap<MenuAction, Vec<KeyId>>,
}

impl MenuKeybindings {
    pub fn new() -> Self {
        Self {
            bindings: DEFAULT_MENU_KEYBINDINGS.clone(),
        }
    }

    pub fn set_binding(&mut self, action: MenuAction, keys: Vec<KeyId>) {
        self.bindings.insert(action, keys);
    }

    pub fn matches(&self, key_id: &str, action: MenuAction) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|key| key == key_id))
    }
}

impl Default for MenuKeybindings {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide keybindings shared by every menu instance.
pub fn get_menu_keybindings() -> Arc<Mutex<MenuKeybindings>> {
    static INSTANCE: OnceLock<Arc<Mutex<MenuKeybindings>>> = OnceLock::new();
    INSTANCE
        .get_or_init(|| Arc::new(Mutex::new(MenuKeybindings::new())))
        .clone()
}
