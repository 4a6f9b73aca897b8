//! Turns edits of the config file into settings events for `watch`.

use std::path::Path;

use tocmd::session::NoteWatcher;
use tocmd::{Config, Event};

/// Watches the config file and reports a new default expand level.
pub struct SettingsWatcher {
    watcher: NoteWatcher,
}

impl SettingsWatcher {
    /// Watch `path`, which may not exist yet. Its directory must.
    pub fn new(path: &Path) -> tocmd::Result<Self> {
        Ok(Self {
            watcher: NoteWatcher::watch_entry(path)?,
        })
    }

    /// The settings event for the latest saved config, if it changed.
    ///
    /// An unparsable file is skipped with a warning; the next valid save is
    /// picked up.
    pub fn poll(&mut self) -> tocmd::Result<Option<Event>> {
        let Some(contents) = self.watcher.poll()? else {
            return Ok(None);
        };

        match Config::parse(&contents) {
            Ok(config) => Ok(Some(settings_event(&config))),
            Err(e) => {
                log::warn!(
                    "ignoring invalid config {}: {}",
                    self.watcher.path().display(),
                    e
                );
                Ok(None)
            }
        }
    }
}

pub fn settings_event(config: &Config) -> Event {
    Event::SettingsChanged {
        default_expand_level: config.outline.default_expand_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::host::FileHost;
    use std::fs;
    use std::thread;
    use std::time::{Duration, Instant};
    use tocmd::{Outcome, Session};

    /// Poll until the saved level shows up; a half-written file may be seen first.
    fn wait_for_level(watcher: &mut SettingsWatcher, level: i64) -> Option<Event> {
        let expected = Event::SettingsChanged {
            default_expand_level: level,
        };
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            if let Some(event) = watcher.poll().unwrap() {
                if event == expected {
                    return Some(event);
                }
            }
            thread::sleep(Duration::from_millis(20));
        }
        None
    }

    fn is_open(markup: &str, slug: &str) -> bool {
        let tag = format!("<details id=\"{}\"", slug);
        markup
            .lines()
            .find(|line| line.starts_with(&tag))
            .is_some_and(|line| line.ends_with(" open>"))
    }

    #[test]
    fn test_config_edit_rerenders_outline() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let output = dir.path().join("toc.html");
        let mut host = FileHost::new(output.clone());
        let mut session = Session::from_config(&Config::load_from(&config_path));
        let mut settings = SettingsWatcher::new(&config_path).unwrap();

        let body = "## Guide\n### Install\n#### Linux".to_string();
        session.handle(Event::NoteSelected { body }, &mut host).unwrap();
        let before = fs::read_to_string(&output).unwrap();
        assert!(is_open(&before, "guide"));
        assert!(!is_open(&before, "install"));

        let mut config = Config::default();
        config.set_default_expand_level(3).unwrap();
        config.save_to(&config_path).unwrap();

        let event = wait_for_level(&mut settings, 3).unwrap();
        assert_eq!(session.handle(event, &mut host).unwrap(), Outcome::Rendered);
        assert_eq!(session.default_expand_level(), 3);

        let after = fs::read_to_string(&output).unwrap();
        assert!(is_open(&after, "install"));
    }

    #[test]
    fn test_invalid_config_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let mut settings = SettingsWatcher::new(&config_path).unwrap();

        fs::write(&config_path, "[outline\n").unwrap();
        thread::sleep(Duration::from_millis(300));
        assert!(settings.poll().unwrap().is_none());
    }

    #[test]
    fn test_settings_event_carries_raw_level() {
        let config = Config::parse("[outline]\ndefault_expand_level = 9\n").unwrap();
        assert!(matches!(
            settings_event(&config),
            Event::SettingsChanged {
                default_expand_level: 9
            }
        ));
    }
}
