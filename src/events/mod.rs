//! Terminal events and key bindings.

mod handler;
mod keys;

pub use handler::EventHandler;
pub use keys::{get_keybindings, get_keybindings_grouped, KeyContext, Keybinding};

use crossterm::event::KeyEvent;

/// An event for the application to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The tick interval elapsed without input.
    Tick,
}
