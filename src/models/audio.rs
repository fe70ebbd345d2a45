//! Synthesized speech output.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Audio returned by the speech endpoint, held in a temporary `.mp3` file.
///
/// The file is removed when the value is dropped unless it was persisted.
#[derive(Debug)]
pub struct SpeechAudio {
    file: NamedTempFile,
    len: usize,
}

impl SpeechAudio {
    /// Write the audio bytes to a fresh temporary file.
    pub fn from_bytes(bytes: &[u8]) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("speech-")
            .suffix(".mp3")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            file,
            len: bytes.len(),
        })
    }

    /// Location of the audio file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of audio bytes written.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move the file to `path` and stop tracking it.
    pub fn persist(self, path: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let target = path.as_ref().to_path_buf();
        self.file.persist(&target)?;
        Ok(target)
    }

    /// Keep the file at its temporary location.
    pub fn keep(self) -> std::io::Result<PathBuf> {
        let (_, path) = self.file.keep()?;
        Ok(path)
    }
}
