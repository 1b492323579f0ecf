pub mod application;
pub mod error;
pub mod file_ref;
pub mod loader;
pub mod window;

// Re-export commonly used types
pub use application::{
    AboutInfo, AppAction, Application, ApplicationFlags, ABOUT, APPLICATION_ID, APPLICATION_NAME,
};
pub use error::{ApplicationError, OpenError};
pub use file_ref::FileRef;
pub use loader::{spawn_load, LoadCompleted, LoadedContent, PendingLoad};
pub use window::{
    DialogResponse, DisplayState, OpenDialogRequest, OpenState, ViewerWindow, WindowCommand,
    WindowEvent,
};
