//! Process-wide cache of loaded model artifacts.
//!
//! Each artifact path is loaded at most once; later lookups share the same
//! `Arc`. The map lock is only held to find or create a path's slot, and the
//! load itself runs under that slot's own lock, so lookups of other paths
//! never wait on disk.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::error::PredictionResult;
use crate::model::PersistedModel;
use crate::utils::io::load_model;

static GLOBAL_CACHE: OnceLock<ModelCache> = OnceLock::new();

/// One path's entry. `loading` serialises the first load; `model` is read
/// without locking once set.
#[derive(Debug, Default)]
struct Slot {
    model: OnceLock<Arc<PersistedModel>>,
    loading: Mutex<()>,
}

#[derive(Debug, Default)]
pub struct ModelCache {
    slots: RwLock<HashMap<PathBuf, Arc<Slot>>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache shared by the whole process.
    pub fn global() -> &'static ModelCache {
        GLOBAL_CACHE.get_or_init(ModelCache::new)
    }

    fn slot(&self, path: &Path) -> Arc<Slot> {
        if let Some(slot) = self.slots.read().get(path) {
            return Arc::clone(slot);
        }
        Arc::clone(self.slots.write().entry(path.to_path_buf()).or_default())
    }

    /// Returns the cached model for `path`, loading it on first use.
    ///
    /// A failed load is not cached; the next call tries again.
    pub fn get_or_load(&self, path: &Path) -> PredictionResult<Arc<PersistedModel>> {
        let slot = self.slot(path);
        if let Some(model) = slot.model.get() {
            return Ok(Arc::clone(model));
        }

        let _loading = slot.loading.lock();
        // Another caller may have finished the load while we waited.
        if let Some(model) = slot.model.get() {
            return Ok(Arc::clone(model));
        }
        let model = Arc::new(load_model(path)?);
        debug!(path = %path.display(), "model cached");
        Ok(Arc::clone(slot.model.get_or_init(|| model)))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.slots
            .read()
            .get(path)
            .map(|slot| slot.model.get().is_some())
            .unwrap_or(false)
    }

    /// Number of paths with a loaded model.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.model.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.slots.write().clear();
    }
}
