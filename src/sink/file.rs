//! File sink.
//!
//! Appends plain lines to a file kept open until `release` or until the
//! `filename` option points it somewhere else.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::SinkError;
use crate::sink::render::{context_suffix, message_text, timestamp};
use crate::sink::{str_option, Options, Record, Sink};

struct OpenFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Appends records to a file.
pub struct FileSink {
    file: Mutex<Option<OpenFile>>,
}

impl FileSink {
    /// Open (or create) `path` in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let sink = Self {
            file: Mutex::new(None),
        };
        sink.use_file(path.as_ref())?;
        Ok(sink)
    }

    /// Path currently written to, if the sink has not been released.
    pub fn path(&self) -> Option<PathBuf> {
        self.lock().as_ref().map(|f| f.path.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<OpenFile>> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn use_file(&self, path: &Path) -> Result<(), SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut slot = self.lock();
        if let Some(mut previous) = slot.take() {
            let _ = previous.writer.flush();
        }
        *slot = Some(OpenFile {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        });
        Ok(())
    }
}

impl Sink for FileSink {
    fn write(&self, record: &Record<'_>) {
        let mut slot = self.lock();
        let Some(file) = slot.as_mut() else {
            return;
        };
        let _ = write!(
            file.writer,
            "\n{} {} {} {}{}",
            timestamp(),
            record.level.prefix(),
            record.module,
            message_text(record.message),
            context_suffix(record.context),
        );
        let _ = file.writer.flush();
    }

    fn apply_config(&self, options: &Options) -> Result<(), SinkError> {
        if let Some(filename) = str_option(options, "filename")? {
            if filename.is_empty() {
                return Err(SinkError::invalid_option("filename", "must not be empty"));
            }
            self.use_file(Path::new(filename))?;
        }
        Ok(())
    }

    fn release(&self) {
        if let Some(mut file) = self.lock().take() {
            let _ = file.writer.flush();
        }
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink").field("path", &self.path()).finish()
    }
}
