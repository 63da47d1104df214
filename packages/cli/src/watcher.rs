use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to create watcher: {0}")]
    CreateError(#[from] notify::Error),

    #[error("Cannot watch {0}: it has no parent directory")]
    NoParent(PathBuf),
}

pub type WatcherResult<T> = Result<T, WatcherError>;

/// Change notifications for one file.
///
/// Watches the file's directory, since editors often replace a file
/// instead of writing it in place.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    file: PathBuf,
}

impl FileWatcher {
    pub fn new(file: &Path) -> WatcherResult<Self> {
        let file = file
            .canonicalize()
            .unwrap_or_else(|_| file.to_path_buf());
        let dir = file
            .parent()
            .ok_or_else(|| WatcherError::NoParent(file.clone()))?
            .to_path_buf();
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            file,
        })
    }

    /// Block until the file changes; `None` once the watcher is gone
    pub fn next_change(&self) -> Option<()> {
        loop {
            match self.receiver.recv() {
                Ok(Ok(event)) if self.concerns_file(&event) => {
                    self.drain(Duration::from_millis(50));
                    return Some(());
                }
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
    }

    fn concerns_file(&self, event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event
                .paths
                .iter()
                .any(|path| path.file_name() == self.file.file_name())
    }

    /// Swallow the burst of events a single save produces
    fn drain(&self, quiet: Duration) {
        loop {
            match self.receiver.recv_timeout(quiet) {
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;

    #[test]
    fn test_file_watcher() {
        let temp_dir = std::env::temp_dir().join("pagesmith_watcher_test");
        fs::create_dir_all(&temp_dir).unwrap();
        let doc = temp_dir.join("page.json");
        fs::write(&doc, "[]").unwrap();

        let watcher = FileWatcher::new(&doc).unwrap();

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            fs::write(&doc, "[{\"id\":\"el-1\",\"type\":\"button\"}]").unwrap();
        });

        assert!(watcher.next_change().is_some());
    }
}
