//! Per-owner JSON record storage shared by the file repositories.

use std::fmt::Write as _;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;
use workbench_application::ports::{FileSystem, FileSystemError};

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Failure of a record store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with that id for that owner.
    #[error("record not found: {0}")]
    NotFound(Uuid),

    /// File system failure.
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    /// A record could not be encoded or decoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// Stores one JSON file per record under `<root>/users/<owner>/<kind>/`.
///
/// File names are the record ids, so listing in file name order is listing
/// in id order.
#[derive(Debug, Clone)]
pub struct RecordStore<F, T> {
    fs: F,
    root: PathBuf,
    kind: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<F: FileSystem, T: Serialize + DeserializeOwned> RecordStore<F, T> {
    pub fn new(fs: F, root: impl Into<PathBuf>, kind: &'static str) -> Self {
        Self {
            fs,
            root: root.into(),
            kind,
            _record: PhantomData,
        }
    }

    pub fn dir(&self, owner_id: &str) -> PathBuf {
        self.root
            .join("users")
            .join(owner_dir_name(owner_id))
            .join(self.kind)
    }

    pub fn path(&self, owner_id: &str, id: Uuid) -> PathBuf {
        self.dir(owner_id).join(format!("{id}.json"))
    }

    /// Loads every record of the owner. Unreadable files are skipped with a
    /// warning so one bad file does not hide the rest.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<T>, StoreError> {
        let dir = self.dir(owner_id);
        let entries = match self.fs.read_dir(&dir).await {
            Ok(entries) => entries,
            Err(FileSystemError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::with_capacity(entries.len());
        for path in entries.iter().filter(|p| is_record_file(p)) {
            match self.read(path).await {
                Ok(record) => records.push(record),
                Err(error) => warn!(path = %path.display(), %error, "skipping unreadable record"),
            }
        }
        Ok(records)
    }

    pub async fn get(&self, owner_id: &str, id: Uuid) -> Result<T, StoreError> {
        match self.read(&self.path(owner_id, id)).await {
            Err(StoreError::FileSystem(FileSystemError::NotFound(_))) => {
                Err(StoreError::NotFound(id))
            }
            other => other,
        }
    }

    pub async fn put(&self, owner_id: &str, id: Uuid, record: &T) -> Result<(), StoreError> {
        let content = to_json_stable_bytes(record)?;
        self.fs
            .write_file(&self.path(owner_id, id), &content)
            .await?;
        Ok(())
    }

    pub async fn remove(&self, owner_id: &str, id: Uuid) -> Result<(), StoreError> {
        match self.fs.remove_file(&self.path(owner_id, id)).await {
            Err(FileSystemError::NotFound(_)) => Err(StoreError::NotFound(id)),
            other => other.map_err(Into::into),
        }
    }

    async fn read(&self, path: &Path) -> Result<T, StoreError> {
        let content = self.fs.read_file(path).await?;
        Ok(from_json_bytes(&content)?)
    }
}

fn is_record_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| Uuid::parse_str(stem).is_ok())
}

/// Maps an owner id onto a single safe path component.
///
/// ASCII alphanumerics, `-` and `_` are kept; every other byte becomes
/// `%XX`, so distinct owners never share a directory.
pub fn owner_dir_name(owner_id: &str) -> String {
    let mut name = String::with_capacity(owner_id.len());
    for byte in owner_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            name.push(char::from(byte));
        } else {
            let _ = write!(name, "%{byte:02X}");
        }
    }
    name
}
