//! Size-based log file rotation
//!
//! A `RotatingFile` appends lines to one live file. When the next write
//! would push the file past `max_bytes`, the live file is renamed to
//! `<name>.1`, older backups shift up by one, and the backup beyond
//! `backup_count` is discarded.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::domain::sink::RotationPolicy;

/// Append-only log file with size-based rotation
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    file: File,
    size: u64,
}

/// Rotating file shared by every sink writing the same path
pub type SharedFile = Arc<Mutex<RotatingFile>>;

impl RotatingFile {
    /// Open (or create) the live file in append mode.
    pub fn open(path: impl AsRef<Path>, policy: RotationPolicy) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            policy,
            file,
            size,
        })
    }

    /// Wrap for sharing between sinks.
    pub fn shared(self) -> SharedFile {
        Arc::new(Mutex::new(self))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Bytes currently in the live file.
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Whether writing `incoming` more bytes requires a rotation first
    ///
    /// An empty file never rotates, so a single oversized entry still
    /// lands somewhere.
    pub const fn should_rotate(&self, incoming: u64) -> bool {
        self.policy.is_enabled()
            && self.size > 0
            && self.size.saturating_add(incoming) > self.policy.max_bytes
    }

    /// Path of the numbered backup `index` (1 = newest).
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Existing backups, newest first.
    pub fn backups(&self) -> Vec<PathBuf> {
        (1..=self.policy.backup_count)
            .map(|index| self.backup_path(index))
            .filter(|path| path.exists())
            .collect()
    }

    /// Write one entry followed by a newline, rotating first when needed
    ///
    /// A failed rotation is reported and the entry goes to the current file.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut entry = String::with_capacity(line.len() + 1);
        entry.push_str(line);
        entry.push('\n');

        let incoming = entry.len() as u64;
        if self.should_rotate(incoming) {
            if let Err(err) = self.rotate() {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "log rotation failed, appending to current file"
                );
            }
        }

        self.file.write_all(entry.as_bytes())?;
        self.file.flush()?;
        self.size += incoming;
        Ok(())
    }

    /// Rotate unconditionally: shift backups and start a fresh live file.
    pub fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let count = self.policy.backup_count;
        if count == 0 {
            return Ok(());
        }

        for index in (1..count).rev() {
            let source = self.backup_path(index);
            if source.exists() {
                let target = self.backup_path(index + 1);
                remove_if_exists(&target)?;
                fs::rename(&source, &target)?;
            }
        }

        let newest = self.backup_path(1);
        remove_if_exists(&newest)?;
        fs::rename(&self.path, &newest)?;

        self.file = open_append(&self.path)?;
        self.size = 0;

        debug!(
            path = %self.path.display(),
            backup = %newest.display(),
            "rotated log file"
        );

        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

/// Lock a shared file, recovering the guard if a writer panicked.
pub fn lock(file: &SharedFile) -> MutexGuard<'_, RotatingFile> {
    file.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
