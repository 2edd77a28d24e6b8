// ABOUTME: Application layer: state, keyboard events, and the text editor
// shared by the letter and reverse steps

pub mod editor;
pub mod events;
pub mod state;

pub use editor::TextEditor;
pub use events::{AppEvent, EventHandler};
pub use state::{App, AppState, AsyncAction, LoginFlow, Toast, ToastLevel, View};
