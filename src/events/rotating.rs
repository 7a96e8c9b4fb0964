//! Size-rotating log file for the `tracing_subscriber` fmt layer.
//!
//! The active file is `<path>`; rotated files are `<path>.1` (newest) up to
//! `<path>.<backups>` (oldest). A write that would take the active file to
//! `max_bytes` or beyond rotates first.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

struct RotatingState {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    written: u64,
}

impl RotatingState {
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backups > 0 {
            for i in (1..self.backups).rev() {
                let src = self.backup_path(i);
                if src.exists() {
                    let dst = self.backup_path(i + 1);
                    if dst.exists() {
                        fs::remove_file(&dst)?;
                    }
                    fs::rename(&src, &dst)?;
                }
            }
            let first = self.backup_path(1);
            if first.exists() {
                fs::remove_file(&first)?;
            }
            fs::rename(&self.path, &first)?;
        }
        // with no backups this truncates the active file
        self.file = File::create(&self.path)?;
        self.written = 0;
        Ok(())
    }

    fn write_record(&mut self, buf: &[u8]) -> io::Result<()> {
        let len = buf.len() as u64;
        if self.max_bytes > 0 && self.written > 0 && self.written + len >= self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += len;
        Ok(())
    }
}

/// Shared handle to a size-rotating log file.
pub struct RotatingFileWriter {
    state: Mutex<RotatingState>,
}

impl RotatingFileWriter {
    /// Open (appending) or create `path`, creating parent directories.
    pub fn new(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            state: Mutex::new(RotatingState {
                path,
                max_bytes,
                backups,
                file,
                written,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, RotatingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn path(&self) -> PathBuf {
        self.lock().path.clone()
    }

    /// Path of the `index`-th backup (1 is the most recent).
    pub fn backup_path(&self, index: usize) -> PathBuf {
        self.lock().backup_path(index)
    }
}

/// Locked writer handed out per event.
pub struct RotatingFileGuard<'a>(MutexGuard<'a, RotatingState>);

impl Write for RotatingFileGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingFileGuard(self.lock())
    }
}
