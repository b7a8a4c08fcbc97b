//! In-memory record store with monotonically assigned identifiers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use parking_lot::RwLock;

use crate::error::{DecompositionError, Result};

/// Identifier of a stored record. Assigned from 1 upward, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct StoreInner<R> {
    records: HashMap<RecordId, Arc<R>>,
    next_id: u64,
}

/// Append-only store of immutable records.
///
/// Creation holds the write lock across counter read, insert and increment, so
/// identifiers are unique, strictly increasing, and a record is visible only once
/// fully inserted. Lookups share the read lock and hand out `Arc` clones.
pub struct RecordStore<R> {
    name: &'static str,
    inner: RwLock<StoreInner<R>>,
}

impl<R> RecordStore<R> {
    /// Creates an empty store. `name` is used in log messages only.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(StoreInner {
                records: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Stores `record` under the next identifier and returns that identifier.
    pub fn create(&self, record: R) -> RecordId {
        let mut inner = self.inner.write();
        let id = RecordId(inner.next_id);
        inner.records.insert(id, Arc::new(record));
        inner.next_id += 1;
        info!("Stored {} record {}", self.name, id);
        id
    }

    /// Returns the record stored under `id`.
    ///
    /// # Errors
    /// `DecompositionError::NotFound` if no record has that identifier.
    pub fn get(&self, id: RecordId) -> Result<Arc<R>> {
        let record = self.inner.read().records.get(&id).cloned();
        record.ok_or_else(|| {
            debug!("Lookup of unknown {} record {}", self.name, id);
            DecompositionError::NotFound(id)
        })
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_ids_start_at_one_and_increase_by_one() {
        let store = RecordStore::new("test");
        assert!(store.is_empty());
        assert_eq!(store.create("a"), RecordId(1));
        assert_eq!(store.create("b"), RecordId(2));
        assert_eq!(store.create("c"), RecordId(3));
        assert_eq!(store.len(), 3);
        assert_eq!(*store.get(RecordId(2)).unwrap(), "b");
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let store: RecordStore<i32> = RecordStore::new("test");
        store.create(10);
        assert!(matches!(
            store.get(RecordId(0)),
            Err(DecompositionError::NotFound(RecordId(0)))
        ));
        assert!(matches!(
            store.get(RecordId(2)),
            Err(DecompositionError::NotFound(RecordId(2)))
        ));
    }

    #[test]
    fn test_stores_have_separate_id_spaces() {
        let first = RecordStore::new("first");
        let second = RecordStore::new("second");
        first.create(1u8);
        first.create(2u8);
        assert_eq!(second.create(3u8), RecordId(1));
        assert!(second.get(RecordId(2)).is_err());
        assert_eq!(*first.get(RecordId(2)).unwrap(), 2);
    }

    #[test]
    fn test_concurrent_creates_assign_unique_contiguous_ids() {
        let store = Arc::new(RecordStore::new("concurrent"));
        let n_threads = 8;
        let per_thread = 250;

        let handles: Vec<_> = (0..n_threads)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..per_thread)
                        .map(|i| {
                            let id = store.create((t, i));
                            assert_eq!(*store.get(id).unwrap(), (t, i));
                            id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let ids = handle.join().unwrap();
            // Ids handed to one thread increase in the order it created them.
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            seen.extend(ids);
        }
        let total = (n_threads * per_thread) as u64;
        assert_eq!(seen.len() as u64, total);
        assert!((1..=total).all(|i| seen.contains(&RecordId(i))));
    }
}
