//! Exclusive advisory lock around a group's read-modify-write window.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::errors::{Result, SherlockError};

/// Holds an exclusive `flock` on a lock file until dropped.
///
/// On non-Unix targets the file is opened but no OS lock is taken.
#[derive(Debug)]
pub struct VaultLock {
    file: File,
    path: PathBuf,
}

impl VaultLock {
    /// Open (creating if needed) `path` and block until the lock is ours.
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|e| SherlockError::LockFailed(format!("{}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::io::AsRawFd;
            // SAFETY: the descriptor is owned by `file` and stays open for the call.
            let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
            if rc != 0 {
                let err = std::io::Error::last_os_error();
                return Err(SherlockError::LockFailed(format!("{}: {err}", path.display())));
            }
        }

        tracing::debug!(lock = %path.display(), "vault lock acquired");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for VaultLock {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            use std::os::unix::io::AsRawFd;
            // SAFETY: see `acquire`. Closing the file would release it too.
            unsafe {
                libc::flock(self.file.as_raw_fd(), libc::LOCK_UN);
            }
        }
        tracing::debug!(lock = %self.path.display(), "vault lock released");
    }
}
