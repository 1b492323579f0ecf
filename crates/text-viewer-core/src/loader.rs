use std::fs;
use std::io;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use encoding_rs::UTF_8;

use crate::error::OpenError;
use crate::file_ref::FileRef;

/// Raw bytes of a whole-file read, owned by the open operation until they
/// are validated and copied into the display buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedContent {
    bytes: Vec<u8>,
}

impl LoadedContent {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Interprets the content as UTF-8 without replacement. A leading BOM
    /// is kept as-is.
    pub fn into_text(self, path: &Path) -> Result<String, OpenError> {
        UTF_8
            .decode_without_bom_handling_and_without_replacement(&self.bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| OpenError::NotUtf8 {
                path: path.to_path_buf(),
            })
    }
}

/// Completion of an asynchronous read, delivered back to the UI thread.
#[derive(Debug)]
pub struct LoadCompleted {
    pub file: FileRef,
    pub result: io::Result<LoadedContent>,
}

impl LoadCompleted {
    fn worker_lost(file: FileRef) -> Self {
        Self {
            file,
            result: Err(io::Error::new(
                io::ErrorKind::Other,
                "load worker exited without reporting",
            )),
        }
    }
}

/// A read in flight. Dropping it abandons the result.
#[derive(Debug)]
pub struct PendingLoad {
    file: FileRef,
    rx: Receiver<LoadCompleted>,
}

impl PendingLoad {
    /// Non-blocking poll. Returns `None` while the read is still running.
    pub fn try_complete(&self) -> Option<LoadCompleted> {
        match self.rx.try_recv() {
            Ok(completed) => Some(completed),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(LoadCompleted::worker_lost(self.file.clone())),
        }
    }

    /// Blocks until the read finishes.
    pub fn wait(self) -> LoadCompleted {
        self.rx
            .recv()
            .unwrap_or_else(|_| LoadCompleted::worker_lost(self.file))
    }
}

/// Reads `file` in full on a worker thread. `notify` runs after the result
/// has been sent so the owner can wake up and poll.
pub fn spawn_load<F>(file: FileRef, notify: F) -> PendingLoad
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = channel();
    let worker_file = file.clone();

    thread::spawn(move || {
        tracing::trace!(path = %worker_file.path().display(), "reading file");
        let result = fs::read(worker_file.path()).map(LoadedContent::new);
        if let Ok(content) = &result {
            tracing::trace!(bytes = content.len(), "read finished");
        }
        let _ = tx.send(LoadCompleted {
            file: worker_file,
            result,
        });
        notify();
    });

    PendingLoad { file, rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_whole_file() {
        let temp_file = create_test_file(b"Hello, world!\n");
        let pending = spawn_load(FileRef::new(temp_file.path()), || {});

        let completed = pending.wait();
        let content = completed.result.unwrap();
        assert_eq!(content.len(), 14);
        assert_eq!(
            content.into_text(temp_file.path()).unwrap(),
            "Hello, world!\n"
        );
    }

    #[test]
    fn test_notify_runs_after_send() {
        let temp_file = create_test_file(b"abc");
        let notified = Arc::new(AtomicBool::new(false));
        let flag = notified.clone();

        let pending = spawn_load(FileRef::new(temp_file.path()), move || {
            flag.store(true, Ordering::SeqCst);
        });

        let completed = pending.wait();
        assert!(completed.result.is_ok());
        // The worker may still be between send and notify; give it a moment.
        for _ in 0..100 {
            if notified.load(Ordering::SeqCst) {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert!(notified.load(Ordering::SeqCst));
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let pending = spawn_load(FileRef::new(dir.path().join("nope.txt")), || {});

        let completed = pending.wait();
        assert_eq!(
            completed.result.unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn test_try_complete_eventually_yields() {
        let temp_file = create_test_file(b"polled");
        let pending = spawn_load(FileRef::new(temp_file.path()), || {});

        let mut completed = None;
        for _ in 0..500 {
            completed = pending.try_complete();
            if completed.is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(completed.unwrap().result.is_ok());
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let content = LoadedContent::new(vec![0xFF, 0xFE]);
        let err = content.into_text(Path::new("bad.bin")).unwrap_err();
        assert!(matches!(err, OpenError::NotUtf8 { .. }));
    }

    #[test]
    fn test_bom_is_preserved() {
        let content = LoadedContent::new(vec![0xEF, 0xBB, 0xBF, b'h', b'i']);
        assert_eq!(content.into_text(Path::new("bom.txt")).unwrap(), "\u{FEFF}hi");
    }

    #[test]
    fn test_empty_content_is_valid() {
        let content = LoadedContent::new(Vec::new());
        assert!(content.is_empty());
        assert_eq!(content.into_text(Path::new("empty.txt")).unwrap(), "");
    }
}
