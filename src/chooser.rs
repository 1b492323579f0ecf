use std::future::Future;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use text_viewer_core::{DialogResponse, FileRef, OpenDialogRequest};

/// An "open file" dialog on screen. Its response is delivered over a
/// channel and polled from `update()`, so the UI keeps repainting.
#[derive(Debug)]
pub struct PendingDialog {
    rx: Receiver<DialogResponse>,
}

impl PendingDialog {
    /// Non-blocking poll. A dialog task that vanishes counts as a cancel.
    pub fn try_response(&self) -> Option<DialogResponse> {
        match self.rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(DialogResponse::Cancelled),
        }
    }

    pub fn wait(self) -> DialogResponse {
        self.rx.recv().unwrap_or(DialogResponse::Cancelled)
    }
}

pub fn response_for(picked: Option<PathBuf>) -> DialogResponse {
    match picked {
        Some(path) => DialogResponse::Accepted(FileRef::new(path)),
        None => DialogResponse::Cancelled,
    }
}

/// Drives `pick` to completion on a helper thread and hands back the
/// response. `notify` runs once the response has been sent.
pub fn spawn_response<P, F>(pick: P, notify: F) -> PendingDialog
where
    P: Future<Output = Option<PathBuf>> + Send + 'static,
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = channel();
    thread::spawn(move || {
        let response = response_for(pollster::block_on(pick));
        tracing::trace!(?response, "dialog closed");
        let _ = tx.send(response);
        notify();
    });
    PendingDialog { rx }
}

/// Shows the native "open file" dialog, modal to the viewer window.
///
/// The dialog is created here on the UI thread and released by the helper
/// thread once the user answers, on both the accept and cancel paths. rfd
/// has no hook for custom button labels; the platform's own Open/Cancel
/// labels are used.
pub fn choose_file<F>(
    request: &OpenDialogRequest,
    parent: &eframe::Frame,
    notify: F,
) -> PendingDialog
where
    F: FnOnce() + Send + 'static,
{
    let pick = rfd::AsyncFileDialog::new()
        .set_title(request.title)
        .set_parent(parent)
        .pick_file();

    spawn_response(
        async move { pick.await.map(|handle| handle.path().to_path_buf()) },
        notify,
    )
}
