//! The persistence contract.
//!
//! The pipeline never talks to a database directly: the executor commits
//! canonical records through [`RecordRepository`], injected by the
//! caller. Whether a batch is transactional is the repository's
//! decision; the executor treats it opaquely and reports whatever was
//! committed before a failure.

use std::collections::BTreeMap;
use std::sync::Mutex;

use hoa_model::{EntityType, Record};

/// External record store the executor commits into.
pub trait RecordRepository {
    /// Commit a batch of canonical records for one entity type.
    /// Returns the number of records accepted.
    fn commit_batch(&self, entity: EntityType, records: &[Record]) -> anyhow::Result<usize>;
}

/// In-memory repository for tests, demos, and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: Mutex<BTreeMap<EntityType, Vec<Record>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records committed so far for an entity type.
    pub fn committed(&self, entity: EntityType) -> Vec<Record> {
        self.store
            .lock()
            .map(|store| store.get(&entity).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn committed_count(&self, entity: EntityType) -> usize {
        self.committed(entity).len()
    }
}

impl RecordRepository for InMemoryRepository {
    fn commit_batch(&self, entity: EntityType, records: &[Record]) -> anyhow::Result<usize> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| anyhow::anyhow!("record store lock poisoned"))?;
        store
            .entry(entity)
            .or_default()
            .extend(records.iter().cloned());
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cells: &[(&str, &str)]) -> Record {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn batches_accumulate_per_entity() {
        let repo = InMemoryRepository::new();
        repo.commit_batch(
            EntityType::Resident,
            &[record(&[("first_name", "A")]), record(&[("first_name", "B")])],
        )
        .unwrap();
        repo.commit_batch(EntityType::Resident, &[record(&[("first_name", "C")])])
            .unwrap();
        repo.commit_batch(EntityType::Vendor, &[record(&[("company_name", "X")])])
            .unwrap();

        assert_eq!(repo.committed_count(EntityType::Resident), 3);
        assert_eq!(repo.committed_count(EntityType::Vendor), 1);
        assert_eq!(repo.committed_count(EntityType::Property), 0);
    }
}
