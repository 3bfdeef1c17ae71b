//! Screens and the layout shell.

mod help;
mod layout;
mod results;

pub use help::{HelpAction, HelpView};
pub use layout::{render_shell, RefineAction, RefinePanel};
pub use results::{HitRow, ResultList, ResultsView};
