//! Numeric text field for entering the countdown duration.
//!
//! A trimmed-down single-line input in the style of the bubbles textinput:
//! a prompt, a placeholder, a block cursor and the usual editing keys. Only
//! characters that can appear in a numeric literal are inserted; whether the
//! text is a usable duration is decided by the
//! [`Configurator`](crate::configurator::Configurator).
//!
//! Every edit that changes the text yields a [`ChangeEvent`] carrying the new
//! raw text.
//!
//! ```rust
//! use countdown_widgets::numinput::new;
//! use countdown_widgets::Component;
//! use bubbletea_rs::{KeyMsg, Msg};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut input = new();
//! input.focus();
//!
//! let msg: Msg = Box::new(KeyMsg { key: KeyCode::Char('9'), modifiers: KeyModifiers::NONE });
//! let change = input.update(&msg).unwrap();
//! assert_eq!(change.text, "9");
//!
//! // Letters that cannot be part of a number are ignored.
//! let msg: Msg = Box::new(KeyMsg { key: KeyCode::Char('z'), modifiers: KeyModifiers::NONE });
//! assert!(input.update(&msg).is_none());
//! ```

pub mod keymap;
pub mod model;
pub mod view;


pub use keymap::{default_key_map, KeyMap};
pub use model::{is_numeric_char, new, ChangeEvent, Model};
