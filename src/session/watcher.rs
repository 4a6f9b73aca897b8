//! File system watcher that feeds "note changed" events.
//!
//! Watches the directory holding a file and hands back the file's new body
//! whenever it changes, so the session can re-extract the outline. Watching
//! the directory keeps working when editors save by writing a temporary file
//! and renaming it over the original.

use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{AccessKind, AccessMode},
};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crate::error::Result;

/// Watches a single file through its parent directory.
pub struct NoteWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    path: PathBuf,
    file_name: OsString,
    /// A relevant event arrived that has not been delivered yet.
    pending: bool,
    /// Debounce: hold changes until this long after the last reload
    last_reload: Instant,
    debounce_duration: Duration,
}

impl NoteWatcher {
    /// Start watching an existing file.
    pub fn new(path: &Path) -> Result<Self> {
        fs::metadata(path)?;
        Self::watch_entry(path)
    }

    /// Start watching a file that may not exist yet.
    ///
    /// Its directory must exist. The first body is delivered once the file
    /// is created.
    pub fn watch_entry(path: &Path) -> Result<Self> {
        let file_name = path.file_name().map(OsString::from).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} does not name a file", path.display()),
            )
        })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            path: path.to_path_buf(),
            file_name,
            pending: false,
            last_reload: Instant::now(),
            debounce_duration: Duration::from_millis(100),
        })
    }

    /// Path of the watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending events. Returns the fresh body if the file changed.
    ///
    /// A change seen inside the debounce window is kept and delivered by a
    /// later call. A file that is gone yields nothing until it is recreated.
    pub fn poll(&mut self) -> Result<Option<String>> {
        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    if self.is_relevant_event(&event) {
                        self.pending = true;
                    }
                }
                Ok(Err(e)) => log::warn!("watch error on {}: {}", self.path.display(), e),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if !self.pending {
            return Ok(None);
        }

        let now = Instant::now();
        if now.duration_since(self.last_reload) < self.debounce_duration {
            return Ok(None);
        }
        self.last_reload = now;
        self.pending = false;

        match fs::read_to_string(&self.path) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} is gone; waiting for it to reappear", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn is_relevant_event(&self, event: &Event) -> bool {
        let names_file = event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(self.file_name.as_os_str()));
        if !names_file {
            return false;
        }

        matches!(
            event.kind,
            EventKind::Modify(_)
                | EventKind::Create(_)
                | EventKind::Remove(_)
                | EventKind::Access(AccessKind::Close(AccessMode::Write))
                | EventKind::Any
        )
    }
}
