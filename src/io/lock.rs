use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory file lock serializing writes to a data file.
///
/// Uses platform-native flock (Unix) so the TUI and CLI invocations never
/// interleave writes to the same file. The lock is released when the guard
/// drops; the lock file stays on disk so every process locks the same inode.
pub struct FileLock {
    _file: File,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another timetrack process may be writing")]
    Timeout { path: PathBuf },
}

/// Lock file guarding `data_path` (`<data_path>.lock`)
pub fn lock_path_for(data_path: &Path) -> PathBuf {
    let mut name = data_path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    data_path.with_file_name(name)
}

impl FileLock {
    /// Acquire the lock guarding `data_path`, waiting up to `timeout`.
    pub fn acquire(data_path: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = lock_path_for(data_path);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::CreateError {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => return Ok(FileLock { _file: file }),
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(_) => {
                    return Err(LockError::Timeout { path: lock_path });
                }
            }
        }
    }

    /// Acquire with default timeout (2 seconds)
    pub fn acquire_default(data_path: &Path) -> Result<Self, LockError> {
        Self::acquire(data_path, Duration::from_secs(2))
    }
}

/// Try to acquire an exclusive flock on the file (non-blocking)
#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let fd = file.as_raw_fd();
    let result = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    // Advisory only off Unix
    Ok(())
}
