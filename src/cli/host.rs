//! File-backed display surface for the `watch` and `render` commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tocmd::Host;

/// Read a note from a path, or from stdin when the path is `-`.
pub fn read_note(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        fs::read_to_string(path)
    }
}

/// Replace `path` with `contents` without exposing a half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Writes outline markup to a file and reports scroll requests on stdout.
pub struct FileHost {
    output: PathBuf,
}

impl FileHost {
    pub fn new(output: PathBuf) -> Self {
        Self { output }
    }
}

impl Host for FileHost {
    fn display(&mut self, markup: &str) -> tocmd::Result<()> {
        write_atomic(&self.output, markup)?;
        log::info!("wrote outline to {}", self.output.display());
        Ok(())
    }

    fn scroll_to_slug(&mut self, slug: &str) -> tocmd::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "scroll {}", slug)?;
        stdout.flush()?;
        Ok(())
    }
}
