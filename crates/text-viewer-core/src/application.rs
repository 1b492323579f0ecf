//! Application shell: owns the single viewer window and the global actions.

use crate::error::ApplicationError;
use crate::window::ViewerWindow;

pub const APPLICATION_ID: &str = "com.example.TextViewer";
pub const APPLICATION_NAME: &str = "Text Viewer";

const MAX_ID_LEN: usize = 255;

/// Flags handed to the shell at creation. Stored and reported as given;
/// the shell itself does not act on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationFlags {
    pub non_unique: bool,
}

/// Process-wide actions, named the way accelerators refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppAction {
    Quit,
    About,
}

impl AppAction {
    pub const ALL: [AppAction; 2] = [AppAction::Quit, AppAction::About];

    pub fn name(self) -> &'static str {
        match self {
            AppAction::Quit => "app.quit",
            AppAction::About => "app.about",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

/// Static metadata shown by the about dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AboutInfo {
    pub application_name: &'static str,
    pub application_icon: &'static str,
    pub developer_name: &'static str,
    pub version: &'static str,
    pub developers: &'static [&'static str],
    pub copyright: &'static str,
}

pub const ABOUT: AboutInfo = AboutInfo {
    application_name: "text-viewer",
    application_icon: APPLICATION_ID,
    developer_name: "Fulvio Leo",
    version: env!("CARGO_PKG_VERSION"),
    developers: &["Fulvio Leo"],
    copyright: "© 2022 Fulvio Leo",
};

/// Reverse-DNS application id: two or more non-empty dot-separated
/// elements of `[A-Za-z0-9_-]`, none starting with a digit.
pub fn is_valid_application_id(id: &str) -> bool {
    if id.is_empty() || id.len() > MAX_ID_LEN {
        return false;
    }
    let mut elements = 0;
    for element in id.split('.') {
        let mut chars = element.chars();
        match chars.next() {
            Some(first) if !first.is_ascii_digit() && is_id_char(first) => {}
            _ => return false,
        }
        if !chars.all(is_id_char) {
            return false;
        }
        elements += 1;
    }
    elements >= 2
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[derive(Debug)]
pub struct Application {
    id: String,
    flags: ApplicationFlags,
    window: Option<ViewerWindow>,
    focus_requested: bool,
    about_visible: bool,
    running: bool,
}

impl Application {
    pub fn new(id: impl Into<String>, flags: ApplicationFlags) -> Result<Self, ApplicationError> {
        let id = id.into();
        if !is_valid_application_id(&id) {
            return Err(ApplicationError::InvalidId(id));
        }
        tracing::debug!(%id, ?flags, "application created");
        Ok(Self {
            id,
            flags,
            window: None,
            focus_requested: false,
            about_visible: false,
            running: true,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn flags(&self) -> ApplicationFlags {
        self.flags
    }

    /// Creates the window if there is none, reuses it otherwise, and asks
    /// for it to be brought to the foreground.
    pub fn activate(&mut self) -> &mut ViewerWindow {
        self.running = true;
        self.focus_requested = true;
        self.window.get_or_insert_with(|| {
            tracing::debug!("creating viewer window");
            ViewerWindow::new()
        })
    }

    pub fn window(&self) -> Option<&ViewerWindow> {
        self.window.as_ref()
    }

    pub fn window_mut(&mut self) -> Option<&mut ViewerWindow> {
        self.window.as_mut()
    }

    pub fn window_count(&self) -> usize {
        usize::from(self.window.is_some())
    }

    /// Returns and clears the pending focus request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn activate_action(&mut self, action: AppAction) {
        tracing::debug!(action = action.name(), "activating action");
        match action {
            AppAction::Quit => self.quit(),
            AppAction::About => self.about_visible = self.window.is_some(),
        }
    }

    /// Activates an action by its accelerator name. Returns `false` when no
    /// application action carries that name.
    pub fn activate_named(&mut self, name: &str) -> bool {
        match AppAction::from_name(name) {
            Some(action) => {
                self.activate_action(action);
                true
            }
            None => false,
        }
    }

    pub fn about_visible(&self) -> bool {
        self.about_visible
    }

    /// The about dialog is modal: while it is up the window takes no input.
    pub fn accepts_window_input(&self) -> bool {
        self.window.is_some() && !self.about_visible
    }

    pub fn close_about(&mut self) {
        self.about_visible = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn quit(&mut self) {
        self.window = None;
        self.about_visible = false;
        self.focus_requested = false;
        self.running = false;
    }
}
