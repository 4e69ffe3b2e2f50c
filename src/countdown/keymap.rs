//! Key bindings for the countdown widget.

use super::machine::State;
use crate::key::{self, Binding};
use crossterm::event::KeyCode;

/// Bindings for each countdown action.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Type a digit into the entry.
    pub digit: Binding,
    /// Erase the previous digit.
    pub delete: Binding,
    /// Start the countdown, or acknowledge that it finished.
    pub confirm: Binding,
    /// Stop a running countdown. Disabled unless the config allows it.
    pub cancel: Binding,
    state: State,
}

/// Default bindings: digits, `backspace`, `enter` and `esc`.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        digit: Binding::new(('0'..='9').map(KeyCode::Char).collect::<Vec<KeyCode>>()).with_help("0-9", "type"),
        delete: Binding::new(vec![KeyCode::Backspace]).with_help("backspace", "delete"),
        confirm: Binding::new(vec![KeyCode::Enter]).with_help("enter", "start"),
        cancel: Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        state: State::Input,
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl KeyMap {
    /// Adjusts the help labels to what each key does in `state`.
    pub(super) fn sync(&mut self, state: State) {
        self.state = state;
        let confirm = if state == State::Done { "reset" } else { "start" };
        self.confirm = self.confirm.clone().with_help("enter", confirm);
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        match self.state {
            State::Input => vec![&self.digit, &self.delete, &self.confirm],
            State::Timing if self.cancel.enabled() => vec![&self.cancel],
            State::Timing => Vec::new(),
            State::Done => vec![&self.confirm],
        }
    }
}
