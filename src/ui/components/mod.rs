//! Reusable UI components.

mod input;
mod loading;
mod notification;
mod tag_editor;

pub use input::{InputAction, TextInput};
pub use loading::Spinner;
pub use notification::{Notification, NotificationManager, ToastKind};
pub use tag_editor::{TagAction, TagEditor};
