use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::io::lock::{FileLock, LockError};
use crate::model::item::Item;
use crate::ops::store::Change;

/// Error type for data file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize items: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Lock(#[from] LockError),
}

/// On-disk layout of the data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(rename = "Items", default)]
    pub items: Vec<Item>,
}

/// Where the item list is loaded from and saved to.
pub trait Persistence {
    fn load(&self) -> Result<Vec<Item>, StoreError>;
    fn save(&self, items: &[Item]) -> Result<(), StoreError>;

    /// Replay `change` onto the stored items, save, and return the result.
    fn apply(&self, change: &Change) -> Result<Vec<Item>, StoreError> {
        let mut items = self.load()?;
        change.apply(&mut items);
        self.save(&items)?;
        Ok(items)
    }
}

/// JSON data file, written atomically under a [`FileLock`]
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load, change and save the items under one lock, so another process
    /// cannot write in between. Nothing is written when `f` fails.
    pub fn update<T, E>(&self, f: impl FnOnce(&mut Vec<Item>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        self.create_parent()?;
        let _lock = FileLock::acquire_default(&self.path).map_err(StoreError::from)?;
        let mut items = self.load()?;
        let out = f(&mut items)?;
        self.write(&items)?;
        Ok(out)
    }

    fn create_parent(&self) -> Result<(), StoreError> {
        fs::create_dir_all(parent_dir(&self.path)).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Serialize and replace the file. Caller holds the lock.
    fn write(&self, items: &[Item]) -> Result<(), StoreError> {
        let data = DataFile {
            items: items.to_vec(),
        };
        let content = serde_json::to_string_pretty(&data)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl Persistence for JsonFile {
    /// A missing file is an empty list.
    fn load(&self) -> Result<Vec<Item>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let data: DataFile =
            serde_json::from_str(&content).map_err(|e| StoreError::ParseError {
                path: self.path.clone(),
                source: e,
            })?;
        Ok(data.items)
    }

    fn save(&self, items: &[Item]) -> Result<(), StoreError> {
        self.create_parent()?;
        let _lock = FileLock::acquire_default(&self.path)?;
        self.write(items)
    }

    /// Read, replay and write under one lock, keeping whatever other
    /// processes saved in the meantime.
    fn apply(&self, change: &Change) -> Result<Vec<Item>, StoreError> {
        self.update(|items| {
            change.apply(items);
            Ok::<_, StoreError>(items.clone())
        })
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = parent_dir(path);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
