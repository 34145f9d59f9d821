//! The widget state store the actions read and write.
//!
//! # Design
//! `WidgetStore` is the contract the actions depend on: four async calls
//! addressed by widget id. `MemoryStore` is the in-process implementation,
//! a `RwLock<HashMap>` shared behind an `Arc` so clones see the same records.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::types::{WidgetPatch, WidgetState};

#[async_trait]
pub trait WidgetStore: Send + Sync {
    /// Fetch a record. Fails with `NotFound` when the id is unknown.
    async fn get(&self, id: &str) -> Result<WidgetState, StoreError>;

    /// Insert a new record. Fails with `AlreadyExists` on a duplicate id.
    async fn add(&self, state: WidgetState) -> Result<(), StoreError>;

    /// Merge a patch into an existing record.
    async fn patch(&self, patch: WidgetPatch) -> Result<(), StoreError>;

    /// Remove a record.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// In-memory `WidgetStore`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<String, WidgetState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `records`. Later duplicates replace earlier ones.
    pub fn with_records(records: impl IntoIterator<Item = WidgetState>) -> Self {
        let records = records
            .into_iter()
            .map(|state| (state.id.clone(), state))
            .collect();
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.records.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl WidgetStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<WidgetState, StoreError> {
        let records = self.records.read().await;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn add(&self, state: WidgetState) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&state.id) {
            return Err(StoreError::AlreadyExists(state.id));
        }
        records.insert(state.id.clone(), state);
        Ok(())
    }

    async fn patch(&self, patch: WidgetPatch) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&patch.id)
            .ok_or_else(|| StoreError::NotFound(patch.id.clone()))?;
        record.apply(patch);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
