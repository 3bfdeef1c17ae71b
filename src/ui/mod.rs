//! Terminal rendering: reusable components, screens and the theme.

mod components;
pub mod theme;
mod views;

pub use components::{
    InputAction, Notification, NotificationManager, Spinner, TagAction, TagEditor, TextInput,
    ToastKind,
};
pub use views::{
    render_shell, HelpAction, HelpView, HitRow, RefineAction, RefinePanel, ResultList,
    ResultsView,
};
