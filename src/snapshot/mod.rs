// Snapshot persistence for the record store

use crate::records::Store;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tag at the start of every snapshot file
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"GRDB";

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u16 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("not a snapshot file (bad magic tag)")]
    BadMagic,

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u16),

    /// Decoded fine but the store inside breaks an invariant
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

/// Load and save the whole store at once
pub trait Persistence {
    fn load(&self) -> Result<Store, SnapshotError>;
    fn save(&self, store: &Store) -> Result<(), SnapshotError>;
}

#[derive(Serialize)]
struct ImageRef<'a> {
    magic: [u8; 4],
    version: u16,
    store: &'a Store,
}

#[derive(Deserialize)]
struct Image {
    magic: [u8; 4],
    version: u16,
    store: Store,
}

/// Encode a store into a snapshot image
pub fn encode(store: &Store) -> Result<Vec<u8>, SnapshotError> {
    let image = ImageRef {
        magic: SNAPSHOT_MAGIC,
        version: SNAPSHOT_VERSION,
        store,
    };
    Ok(bincode::serialize(&image)?)
}

/// Decode a snapshot image and verify the store it carries
pub fn decode(bytes: &[u8]) -> Result<Store, SnapshotError> {
    if bytes.len() < SNAPSHOT_MAGIC.len() || bytes[..SNAPSHOT_MAGIC.len()] != SNAPSHOT_MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    let image: Image = bincode::deserialize(bytes)?;
    if image.magic != SNAPSHOT_MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    if image.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(image.version));
    }
    image.store.check_invariants().map_err(SnapshotError::Corrupt)?;
    Ok(image.store)
}

/// Snapshot stored in a single file
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    max_classes: usize,
    max_students: usize,
}

impl SnapshotFile {
    /// A snapshot at `path` expected to hold a store with the given slot
    /// counts. A snapshot with other counts still loads as saved.
    pub fn new(path: impl Into<PathBuf>, max_classes: usize, max_students: usize) -> Self {
        SnapshotFile {
            path: path.into(),
            max_classes,
            max_students,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file written first and renamed over the snapshot
    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.as_os_str().to_owned();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl Persistence for SnapshotFile {
    fn load(&self) -> Result<Store, SnapshotError> {
        let bytes = fs::read(&self.path)?;
        let store = decode(&bytes)?;
        // The snapshot's own slot counts win so its records are never dropped
        if store.max_classes() != self.max_classes || store.max_students() != self.max_students {
            tracing::warn!(
                path = %self.path.display(),
                classes = store.max_classes(),
                students = store.max_students(),
                configured_classes = self.max_classes,
                configured_students = self.max_students,
                "snapshot slot counts differ from configuration, keeping the snapshot's"
            );
        }
        Ok(store)
    }

    fn save(&self, store: &Store) -> Result<(), SnapshotError> {
        let bytes = encode(store)?;
        let staging = self.staging_path();
        fs::write(&staging, &bytes)?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot saved");
        Ok(())
    }
}

/// Persistence that stores nothing; `load` always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Persistence for Detached {
    fn load(&self) -> Result<Store, SnapshotError> {
        Err(SnapshotError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "persistence is detached",
        )))
    }

    fn save(&self, _store: &Store) -> Result<(), SnapshotError> {
        Ok(())
    }
}

/// Load the store, falling back to an empty one on any failure
pub fn load_or_empty<P: Persistence + ?Sized>(
    persistence: &P,
    max_classes: usize,
    max_students: usize,
) -> Store {
    match persistence.load() {
        Ok(store) => {
            tracing::info!(
                classes = store.active_class_count(),
                students = store.active_student_count(),
                "snapshot loaded"
            );
            store
        }
        Err(e) => {
            tracing::warn!(error = %e, "no usable snapshot, starting with an empty store");
            Store::new(max_classes, max_students)
        }
    }
}
