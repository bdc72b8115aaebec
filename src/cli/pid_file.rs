//! PID file management
//!
//! One instance per user session: a second global key hook would double
//! every activation.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process;

use thiserror::Error;

#[cfg(unix)]
use nix::sys::signal::kill;
#[cfg(unix)]
use nix::unistd::Pid;

/// Default PID file location
const DEFAULT_PID_PATH: &str = "/tmp/clipforge.pid";

/// PID file errors
#[derive(Debug, Error)]
pub enum PidFileError {
    #[error("Another instance is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),
}

/// PID file guard for single-instance enforcement
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Create a new PID file manager with default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PID_PATH),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the PID file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Check if another instance is already running
    pub fn is_running(&self) -> Option<u32> {
        if !self.path.exists() {
            return None;
        }

        let mut file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return None,
        };

        let mut contents = String::new();
        if file.read_to_string(&mut contents).is_err() {
            return None;
        }

        let pid: u32 = match contents.trim().parse() {
            Ok(p) => p,
            Err(_) => return None,
        };

        if Self::process_alive(pid) {
            Some(pid)
        } else {
            // Stale PID file left by a crashed instance
            let _ = fs::remove_file(&self.path);
            None
        }
    }

    #[cfg(unix)]
    fn process_alive(pid: u32) -> bool {
        // Signal 0: existence probe without delivering anything
        match kill(Pid::from_raw(pid as i32), None) {
            Ok(()) => true,
            Err(nix::errno::Errno::EPERM) => true,
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    fn process_alive(_pid: u32) -> bool {
        // No cheap probe; assume the file is authoritative
        true
    }

    /// Acquire the PID file (fails if another instance is running)
    pub fn acquire(&self) -> Result<(), PidFileError> {
        if let Some(pid) = self.is_running() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        let mut file =
            File::create(&self.path).map_err(|e| PidFileError::WriteFailed(e.to_string()))?;
        write!(file, "{}", process::id())
            .map_err(|e| PidFileError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    /// Release the PID file
    pub fn release(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}
