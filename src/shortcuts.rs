//! Accelerator table, applied once at startup and consumed every frame.

use egui::{InputState, Key, KeyboardShortcut, Modifiers};

pub const ACTION_QUIT: &str = "app.quit";
pub const ACTION_ABOUT: &str = "app.about";
pub const ACTION_OPEN: &str = "win.open";
pub const ACTION_SAVE_AS: &str = "win.save-as";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accelerator {
    pub action: &'static str,
    pub shortcut: KeyboardShortcut,
}

const CTRL_SHIFT: Modifiers = Modifiers {
    ctrl: true,
    shift: true,
    ..Modifiers::NONE
};

// More specific modifier sets first, so Ctrl+Shift+S is not taken as Ctrl+S.
pub const ACCELERATORS: [Accelerator; 3] = [
    Accelerator {
        action: ACTION_SAVE_AS,
        shortcut: KeyboardShortcut::new(CTRL_SHIFT, Key::S),
    },
    Accelerator {
        action: ACTION_QUIT,
        shortcut: KeyboardShortcut::new(Modifiers::COMMAND, Key::Q),
    },
    Accelerator {
        action: ACTION_OPEN,
        shortcut: KeyboardShortcut::new(Modifiers::CTRL, Key::O),
    },
];

pub fn accelerator_for(action: &str) -> Option<&'static Accelerator> {
    ACCELERATORS.iter().find(|accel| accel.action == action)
}

/// Human-readable shortcut for menu entries, e.g. "Ctrl+O".
pub fn shortcut_text(ctx: &egui::Context, action: &str) -> Option<String> {
    accelerator_for(action).map(|accel| ctx.format_shortcut(&accel.shortcut))
}

/// Consumes every bound shortcut pressed this frame and returns the names
/// of the actions they trigger.
pub fn consume_triggered(input: &mut InputState) -> Vec<&'static str> {
    ACCELERATORS
        .iter()
        .filter(|accel| input.consume_shortcut(&accel.shortcut))
        .map(|accel| accel.action)
        .collect()
}
