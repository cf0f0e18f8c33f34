//! Read-modify-write helpers for one enveloped collection under one key.

use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, error, info};
use serde::{de::DeserializeOwned, Serialize};

use super::{envelope, KeyValueStore};
use crate::entities::{Report, User};
use crate::error::{StoreError, StoreResult};
use crate::utils::merge::{shallow_merge, Patch};

/// A persisted entity addressable by its string identifier.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Accepted alternate field names, as `(alias, canonical)` pairs.
    const FIELD_ALIASES: &'static [(&'static str, &'static str)] = &[];

    fn id(&self) -> &str;
}

impl Record for Report {
    const FIELD_ALIASES: &'static [(&'static str, &'static str)] = &[("created_at", "createdAt")];

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for User {
    const FIELD_ALIASES: &'static [(&'static str, &'static str)] = &[("created_at", "joinDate")];

    fn id(&self) -> &str {
        &self.id
    }
}

/// An ordered collection of `T` stored as a single envelope under `key`.
///
/// Every mutating call loads the whole collection, changes it and saves it
/// back. A collection that fails to load is never overwritten by a mutation.
/// Nothing serializes concurrent callers: the last save wins.
pub struct LocalCollection<T> {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    collection: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for LocalCollection<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            key: self.key.clone(),
            collection: self.collection,
            _marker: PhantomData,
        }
    }
}

impl<T: Record> LocalCollection<T> {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>, collection: &'static str) -> Self {
        Self {
            storage,
            key: key.into(),
            collection,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the stored collection, stamping the envelope.
    pub fn save_all(&self, items: &[T]) -> StoreResult<()> {
        let raw = envelope::encode(self.collection, items).inspect_err(|e| {
            error!("Error serializing {}: {}", self.collection, e);
        })?;
        self.storage.set(&self.key, &raw).inspect_err(|e| {
            error!("Error saving {} to '{}': {}", self.collection, self.key, e);
        })?;
        info!("Saved {} {} to '{}'", items.len(), self.collection, self.key);
        Ok(())
    }

    /// Load the collection, surfacing read and decode failures.
    pub fn try_load_all(&self) -> StoreResult<Vec<T>> {
        let Some(raw) = self.storage.get(&self.key)? else {
            debug!("No stored {} found under '{}'", self.collection, self.key);
            return Ok(Vec::new());
        };

        let envelope = envelope::decode::<T>(self.collection, &raw)?;
        debug!(
            "Loaded {} {} (last updated: {})",
            envelope.items.len(),
            self.collection,
            envelope.last_updated.as_deref().unwrap_or("unknown")
        );
        Ok(envelope.items)
    }

    /// Load the collection; missing or unreadable data yields an empty list.
    pub fn load_all(&self) -> Vec<T> {
        self.try_load_all().unwrap_or_else(|e| {
            error!("Error loading {} from '{}': {}", self.collection, self.key, e);
            Vec::new()
        })
    }

    pub fn find(&self, id: &str) -> Option<T> {
        self.load_all().into_iter().find(|item| item.id() == id)
    }

    fn load_for_write(&self) -> StoreResult<Vec<T>> {
        self.try_load_all().inspect_err(|e| {
            error!("Refusing to modify unreadable {} under '{}': {}", self.collection, self.key, e);
        })
    }

    /// Insert `item` at the front of the collection and save.
    pub fn prepend(&self, item: T) -> StoreResult<()> {
        let mut items = self.load_for_write()?;
        items.insert(0, item);
        self.save_all(&items)
    }

    /// Insert `item` at the end of the collection and save.
    pub fn append(&self, item: T) -> StoreResult<()> {
        let mut items = self.load_for_write()?;
        items.push(item);
        self.save_all(&items)
    }

    /// Load, apply `f` to every record, and save.
    pub fn modify_all(&self, f: impl FnMut(&mut T)) -> StoreResult<()> {
        let mut items = self.load_for_write()?;
        items.iter_mut().for_each(f);
        self.save_all(&items)
    }

    /// Shallow-merge `patch` into the record with `id` and save.
    pub fn update(&self, id: &str, patch: &Patch) -> StoreResult<T> {
        let mut items = self.load_for_write()?;
        let Some(index) = items.iter().position(|item| item.id() == id) else {
            error!("{} record not found: {}", self.collection, id);
            return Err(StoreError::NotFound(id.to_string()));
        };

        let merged = shallow_merge(&items[index], patch, T::FIELD_ALIASES).inspect_err(|e| {
            error!("Error updating {} record {}: {}", self.collection, id, e);
        })?;
        items[index] = merged.clone();

        self.save_all(&items)?;
        info!("Updated {} record {}", self.collection, id);
        Ok(merged)
    }

    /// Remove the record with `id`; saves only when something was removed.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let items = self.load_for_write()?;
        let before = items.len();
        let remaining: Vec<T> = items.into_iter().filter(|item| item.id() != id).collect();

        if remaining.len() == before {
            error!("{} record not found for deletion: {}", self.collection, id);
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.save_all(&remaining)?;
        info!("Deleted {} record {}", self.collection, id);
        Ok(())
    }

    /// Remove the persisted key entirely.
    pub fn clear(&self) -> StoreResult<()> {
        self.storage.remove(&self.key).inspect_err(|e| {
            error!("Error clearing {} under '{}': {}", self.collection, self.key, e);
        })?;
        info!("Cleared all {} from '{}'", self.collection, self.key);
        Ok(())
    }
}
