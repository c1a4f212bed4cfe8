use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only store of memory notes in a plain text file.
///
/// Single-process, single-instance use is assumed; there is no file locking.
/// Running multiple instances against the same file is unsupported.
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one note as a line. Creates the file on first write.
    /// The handle is released when this returns.
    pub fn append(&self, text: &str) -> astro_core::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{text}")?;
        debug!(path = %self.path.display(), "note appended");
        Ok(())
    }

    /// Full contents of the memory file. A missing file is not an error,
    /// it reads as empty.
    pub fn load(&self) -> astro_core::Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}
