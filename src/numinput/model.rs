//! Core model for the numeric input.

use super::keymap::{default_key_map, KeyMap};
use crate::key::matches_binding;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;

/// Raised whenever an edit changes the input's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The full text after the edit.
    pub text: String,
}

/// Whether `ch` may be typed into the numeric input.
///
/// Hex digits cover the decimal digits, the exponent marker `e` and the
/// binary/hex prefixes' digits; the radix letters `x` and `o` plus sign and
/// decimal point complete the set.
pub fn is_numeric_char(ch: char) -> bool {
    ch.is_ascii_hexdigit() || matches!(ch, '.' | '+' | '-' | 'x' | 'X' | 'o' | 'O')
}

/// Single-line numeric text field.
#[derive(Debug, Clone)]
pub struct Model {
    /// Text shown before the value.
    pub prompt: String,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for the typed text.
    pub text_style: Style,
    /// Text shown while the value is empty.
    pub placeholder: String,
    /// Style for the placeholder.
    pub placeholder_style: Style,
    /// Style for the character under the cursor.
    pub cursor_style: Style,
    /// Maximum number of characters accepted; `0` means no limit.
    pub char_limit: usize,
    /// Editing key bindings.
    pub key_map: KeyMap,

    pub(super) value: Vec<char>,
    pub(super) pos: usize,
    pub(super) focus: bool,
}

/// Creates an empty, unfocused numeric input.
///
/// The default character limit of 12 is enough for any duration a terminal
/// countdown would reasonably show.
pub fn new() -> Model {
    Model {
        prompt: "> ".to_string(),
        prompt_style: Style::new(),
        text_style: Style::new(),
        placeholder: String::new(),
        placeholder_style: Style::new().foreground(Color::from("240")),
        cursor_style: Style::new().reverse(true),
        char_limit: 12,
        key_map: default_key_map(),
        value: Vec::new(),
        pos: 0,
        focus: false,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// The current text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the text, dropping characters that are not numeric and
    /// anything beyond the character limit. The cursor moves to the end.
    pub fn set_value(&mut self, s: &str) {
        let mut value: Vec<char> = s.chars().filter(|c| is_numeric_char(*c)).collect();
        if self.char_limit > 0 {
            value.truncate(self.char_limit);
        }
        self.value = value;
        self.pos = self.value.len();
    }

    /// Sets the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the text.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Moves the cursor to the start.
    pub fn cursor_start(&mut self) {
        self.set_cursor(0);
    }

    /// Moves the cursor to the end.
    pub fn cursor_end(&mut self) {
        self.set_cursor(self.value.len());
    }

    /// Clears the text.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Handles a key message while focused.
    ///
    /// Returns a [`ChangeEvent`] when the text changed. Non-key messages,
    /// unfocused inputs and keys that do nothing return `None`.
    pub fn update(&mut self, msg: &Msg) -> Option<ChangeEvent> {
        if !self.focus {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        let before = self.value.clone();
        self.handle_deletion_keys(key_msg);
        self.handle_movement_keys(key_msg);
        self.handle_character_input(key_msg);

        if self.value != before {
            Some(ChangeEvent { text: self.value() })
        } else {
            None
        }
    }

    fn handle_deletion_keys(&mut self, key_msg: &KeyMsg) {
        if matches_binding(key_msg, &self.key_map.delete_character_backward) {
            if self.pos > 0 {
                self.value.remove(self.pos - 1);
                self.pos -= 1;
            }
        } else if matches_binding(key_msg, &self.key_map.delete_character_forward) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if matches_binding(key_msg, &self.key_map.delete_before_cursor) {
            self.value.drain(..self.pos);
            self.pos = 0;
        } else if matches_binding(key_msg, &self.key_map.delete_after_cursor) {
            self.value.truncate(self.pos);
        }
    }

    fn handle_movement_keys(&mut self, key_msg: &KeyMsg) {
        if matches_binding(key_msg, &self.key_map.character_backward) {
            if self.pos > 0 {
                self.set_cursor(self.pos - 1);
            }
        } else if matches_binding(key_msg, &self.key_map.character_forward) {
            self.set_cursor(self.pos + 1);
        } else if matches_binding(key_msg, &self.key_map.line_start) {
            self.cursor_start();
        } else if matches_binding(key_msg, &self.key_map.line_end) {
            self.cursor_end();
        }
    }

    fn handle_character_input(&mut self, key_msg: &KeyMsg) {
        let KeyCode::Char(ch) = key_msg.key else {
            return;
        };
        if key_msg.modifiers.contains(KeyModifiers::CONTROL)
            || key_msg.modifiers.contains(KeyModifiers::ALT)
            || !is_numeric_char(ch)
        {
            return;
        }
        if self.char_limit > 0 && self.value.len() >= self.char_limit {
            return;
        }
        self.value.insert(self.pos, ch);
        self.pos += 1;
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
