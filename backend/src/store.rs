//! In-memory dataset snapshot shared by every handler
//!
//! The store holds exactly one immutable snapshot. Replacing the dataset
//! builds a new snapshot with a bumped version and freshly computed
//! aggregates; readers keep whatever snapshot they cloned.

use std::sync::Arc;

use serde::Serialize;
use shared::{aggregate_by_product_with, GroupingKey, InventoryRecord, ProductAggregate};
use tokio::sync::RwLock;

/// Where the current dataset came from
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    Empty,
    Seed,
    Upload,
    Api,
}

/// One immutable view of the dataset with its aggregate cache
#[derive(Debug)]
pub struct Snapshot {
    pub version: u64,
    pub source: DatasetSource,
    pub records: Vec<InventoryRecord>,
    pub aggregates: Vec<ProductAggregate>,
}

impl Snapshot {
    fn build(
        version: u64,
        source: DatasetSource,
        records: Vec<InventoryRecord>,
        grouping: GroupingKey,
    ) -> Self {
        let aggregates = aggregate_by_product_with(&records, grouping);
        Self {
            version,
            source,
            records,
            aggregates,
        }
    }
}

/// Versioned holder of the current snapshot
#[derive(Clone)]
pub struct InventoryStore {
    inner: Arc<RwLock<Arc<Snapshot>>>,
    grouping: GroupingKey,
}

impl InventoryStore {
    pub fn new(grouping: GroupingKey) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(Snapshot::build(
                0,
                DatasetSource::Empty,
                Vec::new(),
                grouping,
            )))),
            grouping,
        }
    }

    /// Store pre-loaded with the given records
    pub fn with_records(
        grouping: GroupingKey,
        source: DatasetSource,
        records: Vec<InventoryRecord>,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(Snapshot::build(
                1, source, records, grouping,
            )))),
            grouping,
        }
    }

    pub fn grouping(&self) -> GroupingKey {
        self.grouping
    }

    /// Current snapshot
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.read().await.clone()
    }

    /// Replace the whole dataset and return the new snapshot
    pub async fn replace(
        &self,
        source: DatasetSource,
        records: Vec<InventoryRecord>,
    ) -> Arc<Snapshot> {
        let mut guard = self.inner.write().await;
        let next = Arc::new(Snapshot::build(
            guard.version + 1,
            source,
            records,
            self.grouping,
        ));
        *guard = next.clone();

        tracing::info!(
            version = next.version,
            records = next.records.len(),
            products = next.aggregates.len(),
            "Inventory dataset replaced"
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::seed::inventory_seed;

    #[tokio::test]
    async fn test_replace_bumps_version_and_recomputes() {
        let store = InventoryStore::new(GroupingKey::Exact);
        let empty = store.snapshot().await;
        assert_eq!(empty.version, 0);
        assert!(empty.aggregates.is_empty());

        let next = store.replace(DatasetSource::Seed, inventory_seed()).await;
        assert_eq!(next.version, 1);
        assert_eq!(next.source, DatasetSource::Seed);
        assert!(!next.aggregates.is_empty());

        // Earlier readers keep their snapshot
        assert_eq!(empty.version, 0);
        assert_eq!(store.snapshot().await.version, 1);
    }
}
