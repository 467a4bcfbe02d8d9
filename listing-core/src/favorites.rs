use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::listing::scalar_text;

/// Storage key of the favorites slot. The `_v1` suffix is the schema version:
/// a payload written under any other key is never read back.
pub const FAVORITES_KEY: &str = "airbnb_fav_ids_v1";

/// File backing the favorites slot inside a storage directory.
pub fn slot_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(format!("{FAVORITES_KEY}.json"))
}

/// Identifiers the user marked as favorite, kept sorted so the persisted
/// array is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet(BTreeSet<String>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn flip(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_owned());
            true
        }
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Reads and decodes the slot. A missing or blank slot is an empty set;
/// every other failure is reported.
pub async fn read_slot(path: &Path) -> Result<FavoriteSet, StorageError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FavoriteSet::new()),
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(FavoriteSet::new());
    }
    match serde_json::from_slice::<Value>(&bytes)? {
        Value::Array(items) => Ok(items.iter().filter_map(scalar_text).collect()),
        _ => Err(StorageError::NotAnArray),
    }
}

/// Owns the favorite set and every write to its slot.
#[derive(Debug, Clone)]
pub struct FavoriteStore {
    favorites: FavoriteSet,
    path: Option<PathBuf>,
    volatile: bool,
}

impl FavoriteStore {
    pub fn in_memory() -> Self {
        Self {
            favorites: FavoriteSet::new(),
            path: None,
            volatile: true,
        }
    }

    /// Hydrates from the slot at `path`. Never fails: an unreadable slot
    /// yields an empty set.
    pub async fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let favorites = match read_slot(&path).await {
            Ok(set) => set,
            Err(err) => {
                warn!(%err, path = %path.display(), "ignoring unreadable favorites slot");
                FavoriteSet::new()
            }
        };
        debug!(count = favorites.len(), "favorites hydrated");
        Self {
            favorites,
            path: Some(path),
            volatile: false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// True when changes only live in memory: no slot, or the last write failed.
    pub fn is_volatile(&self) -> bool {
        self.volatile
    }

    /// Flips membership of `id` and writes the whole set through.
    /// Returns whether `id` is now a favorite.
    pub async fn toggle(&mut self, id: &str) -> bool {
        let now_favorite = self.favorites.flip(id);
        match self.persist().await {
            Ok(()) => self.volatile = self.path.is_none(),
            Err(err) => {
                warn!(%err, "favorites kept in memory only");
                self.volatile = true;
            }
        }
        now_favorite
    }

    pub async fn persist(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            debug!("favorite store is in-memory only; skipping persist");
            return Ok(());
        };
        let ids: Vec<&str> = self.favorites.iter().collect();
        let bytes = serde_json::to_vec(&ids).map_err(StorageError::Serialize)?;
        if let Some(parent) = path.parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }
        // Ecriture atomique
        let tmp = path.with_extension("json.tmp");
        let write_err = |source| StorageError::Write {
            path: path.clone(),
            source,
        };
        tokio::fs::write(&tmp, &bytes).await.map_err(write_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(write_err)?;
        Ok(())
    }
}
