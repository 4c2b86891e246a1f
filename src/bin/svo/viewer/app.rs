//! Main application state and event handling
//!
//! The App struct brings together the model and the global key handling: quitting,
//! stepping through trace events and switching sentences.

use super::model::Model;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The main application
pub struct App {
    /// Parsed sentences and selection state
    pub model: Model,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(model: Model) -> Self {
        App {
            model,
            should_quit: false,
        }
    }

    /// Handle a keyboard event
    ///
    /// Returns whether the state changed (needed for re-rendering)
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Down | KeyCode::Char('j') => self.model.next_event(),
            KeyCode::Up | KeyCode::Char('k') => self.model.previous_event(),
            KeyCode::Home | KeyCode::Char('g') => self.model.first_event(),
            KeyCode::End | KeyCode::Char('G') => self.model.last_event(),
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('n') => self.model.next_sentence(),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('p') => {
                self.model.previous_sentence()
            }
            _ => return false,
        }
        true
    }
}
