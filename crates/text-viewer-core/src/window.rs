//! The viewer window's open-file flow.
//!
//! `Idle -> DialogOpen -> Loading -> Idle`. The window itself never blocks
//! and never performs I/O other than the display-name query; it tells its
//! driver what to do through [`WindowCommand`] and is fed the outcome
//! through [`WindowEvent`], all on the UI thread.

use std::path::PathBuf;

use crate::application::APPLICATION_NAME;
use crate::error::OpenError;
use crate::file_ref::FileRef;
use crate::loader::LoadCompleted;

/// Parameters of the native "open file" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDialogRequest {
    pub title: &'static str,
    pub accept_label: &'static str,
    pub cancel_label: &'static str,
    pub select_multiple: bool,
}

impl Default for OpenDialogRequest {
    fn default() -> Self {
        Self {
            title: "Open File",
            accept_label: "_Open",
            cancel_label: "_Cancel",
            select_multiple: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResponse {
    Accepted(FileRef),
    /// Cancel button or dismissal.
    Cancelled,
}

#[derive(Debug)]
pub enum WindowEvent {
    OpenRequested,
    DialogResponded(DialogResponse),
    LoadCompleted(LoadCompleted),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCommand {
    ShowOpenDialog(OpenDialogRequest),
    StartLoad(FileRef),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OpenState {
    #[default]
    Idle,
    DialogOpen,
    Loading(FileRef),
}

/// What the window shows: its title and the text buffer with its cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    title: String,
    text: String,
    /// Character offset of the insertion point.
    cursor: usize,
    /// Bumped on every successful open.
    revision: u64,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            title: APPLICATION_NAME.to_string(),
            text: String::new(),
            cursor: 0,
            revision: 0,
        }
    }
}

impl DisplayState {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn replace(&mut self, text: String, title: String) {
        self.text = text;
        self.cursor = 0;
        self.title = title;
        self.revision += 1;
    }
}

#[derive(Debug, Default)]
pub struct ViewerWindow {
    display: DisplayState,
    state: OpenState,
}

impl ViewerWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn state(&self) -> &OpenState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == OpenState::Idle
    }

    /// Feeds one event through the open-file flow.
    ///
    /// Errors are open failures to be reported; the display state is
    /// untouched whenever one is returned. Events that do not apply to the
    /// current state are dropped.
    pub fn handle(&mut self, event: WindowEvent) -> Result<Option<WindowCommand>, OpenError> {
        match event {
            WindowEvent::OpenRequested => Ok(self.request_open()),
            WindowEvent::DialogResponded(response) => Ok(self.dialog_responded(response)),
            WindowEvent::LoadCompleted(completed) => self.load_completed(completed),
        }
    }

    /// Starts loading `path` directly, skipping the dialog.
    pub fn open_path(&mut self, path: impl Into<PathBuf>) -> Option<WindowCommand> {
        if !self.is_idle() {
            tracing::debug!(state = ?self.state, "open ignored, window busy");
            return None;
        }
        let file = FileRef::new(path);
        self.state = OpenState::Loading(file.clone());
        Some(WindowCommand::StartLoad(file))
    }

    fn request_open(&mut self) -> Option<WindowCommand> {
        if !self.is_idle() {
            tracing::debug!(state = ?self.state, "open ignored, window busy");
            return None;
        }
        self.state = OpenState::DialogOpen;
        Some(WindowCommand::ShowOpenDialog(OpenDialogRequest::default()))
    }

    fn dialog_responded(&mut self, response: DialogResponse) -> Option<WindowCommand> {
        if self.state != OpenState::DialogOpen {
            tracing::warn!(state = ?self.state, "dialog response without an open dialog");
            return None;
        }
        match response {
            DialogResponse::Accepted(file) => {
                tracing::debug!(path = %file.path().display(), "file selected");
                self.state = OpenState::Loading(file.clone());
                Some(WindowCommand::StartLoad(file))
            }
            DialogResponse::Cancelled => {
                self.state = OpenState::Idle;
                None
            }
        }
    }

    fn load_completed(
        &mut self,
        completed: LoadCompleted,
    ) -> Result<Option<WindowCommand>, OpenError> {
        match &self.state {
            OpenState::Loading(file) if *file == completed.file => {}
            _ => {
                tracing::warn!(
                    state = ?self.state,
                    path = %completed.file.path().display(),
                    "unexpected load completion"
                );
                return Ok(None);
            }
        }
        self.state = OpenState::Idle;

        let LoadCompleted { file, result } = completed;
        // Queried whether or not the read succeeded.
        let display_name = file.resolve_display_name();

        let content = result.map_err(|source| OpenError::Read {
            path: file.path().to_path_buf(),
            source,
        })?;
        let text = content.into_text(file.path())?;

        self.display.replace(text, display_name);
        tracing::debug!(title = %self.display.title, "file displayed");
        Ok(None)
    }
}
