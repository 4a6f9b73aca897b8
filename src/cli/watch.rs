//! Event sources for the `watch` command.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tocmd::session::NoteWatcher;
use tocmd::{Event, Host, Outcome, PanelMessage, Session};

use super::settings::SettingsWatcher;

/// Panel messages, the note file and the config file, polled in turn.
pub struct WatchSources {
    note: NoteWatcher,
    settings: Option<SettingsWatcher>,
    messages: Receiver<PanelMessage>,
    messages_open: bool,
    interval: Duration,
}

impl WatchSources {
    pub fn new(
        note: NoteWatcher,
        settings: Option<SettingsWatcher>,
        messages: Receiver<PanelMessage>,
        interval: Duration,
    ) -> Self {
        Self {
            note,
            settings,
            messages,
            messages_open: true,
            interval,
        }
    }

    pub fn note(&self) -> &NoteWatcher {
        &self.note
    }

    /// One loop turn: wait up to the interval for a panel message, then check
    /// the note and the config. The files are checked on every turn, however
    /// many messages are queued.
    pub fn step<H: Host>(
        &mut self,
        session: &mut Session,
        host: &mut H,
    ) -> tocmd::Result<Vec<Outcome>> {
        let mut outcomes = Vec::new();

        if self.messages_open {
            match self.messages.recv_timeout(self.interval) {
                Ok(message) => outcomes.push(session.handle(Event::Panel(message), host)?),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => self.messages_open = false,
            }
        } else {
            thread::sleep(self.interval);
        }

        if let Some(body) = self.note.poll()? {
            outcomes.push(session.handle(Event::NoteChanged { body }, host)?);
        }

        if let Some(settings) = self.settings.as_mut() {
            if let Some(event) = settings.poll()? {
                outcomes.push(session.handle(event, host)?);
            }
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::host::FileHost;
    use std::fs;
    use std::sync::mpsc;
    use std::time::Instant;

    #[test]
    fn test_note_change_lands_while_messages_are_queued() {
        let dir = tempfile::tempdir().unwrap();
        let note = dir.path().join("note.md");
        let output = dir.path().join("toc.html");
        fs::write(&note, "## Old").unwrap();

        let mut host = FileHost::new(output.clone());
        let mut session = Session::new(2);
        let body = fs::read_to_string(&note).unwrap();
        session.handle(Event::NoteSelected { body }, &mut host).unwrap();

        let (tx, rx) = mpsc::channel();
        let mut sources = WatchSources::new(
            NoteWatcher::new(&note).unwrap(),
            None,
            rx,
            Duration::from_millis(10),
        );

        fs::write(&note, "## New").unwrap();

        let deadline = Instant::now() + Duration::from_secs(3);
        let mut rendered = false;
        while Instant::now() < deadline && !rendered {
            // Keep a backlog so every turn has a message waiting.
            for _ in 0..2 {
                tx.send(PanelMessage::ExpandChanged {
                    slug: "old".to_string(),
                    expanded: true,
                })
                .unwrap();
            }
            let outcomes = sources.step(&mut session, &mut host).unwrap();
            rendered = outcomes.contains(&Outcome::Rendered);
            thread::sleep(Duration::from_millis(5));
        }

        assert!(rendered, "note change was never rendered");
        assert!(fs::read_to_string(&output).unwrap().contains("New"));
    }

    #[test]
    fn test_closed_message_channel_keeps_polling_note() {
        let dir = tempfile::tempdir().unwrap();
        let note = dir.path().join("note.md");
        fs::write(&note, "## A").unwrap();

        let mut host = FileHost::new(dir.path().join("toc.html"));
        let mut session = Session::new(2);
        let (tx, rx) = mpsc::channel::<PanelMessage>();
        drop(tx);
        let mut sources = WatchSources::new(
            NoteWatcher::new(&note).unwrap(),
            None,
            rx,
            Duration::from_millis(10),
        );
        assert_eq!(sources.note().path(), note.as_path());

        fs::write(&note, "## B").unwrap();
        let deadline = Instant::now() + Duration::from_secs(3);
        let mut outcomes = Vec::new();
        while Instant::now() < deadline && outcomes.is_empty() {
            outcomes = sources.step(&mut session, &mut host).unwrap();
        }
        assert_eq!(outcomes, vec![Outcome::Rendered]);
    }
}
