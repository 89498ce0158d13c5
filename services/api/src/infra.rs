use metrics_exporter_prometheus::PrometheusHandle;
use receipt_points::receipts::{ReceiptId, ReceiptRepository, RepositoryError, ScoreRecord};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-lifetime receipt store. Records vanish on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReceiptRepository {
    records: Arc<Mutex<HashMap<ReceiptId, ScoreRecord>>>,
}

impl InMemoryReceiptRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<ReceiptId, ScoreRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("receipt store mutex poisoned".to_string()))
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().map(|guard| guard.len()).unwrap_or_default()
    }
}

impl ReceiptRepository for InMemoryReceiptRepository {
    fn insert(&self, record: ScoreRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_points::receipts::{Amount, Item, PurchaseDate, PurchaseTime, Receipt};

    fn record(id: &str, points: u64) -> ScoreRecord {
        ScoreRecord {
            id: ReceiptId(id.to_string()),
            receipt: Receipt {
                retailer: "Walgreens".to_string(),
                purchase_date: PurchaseDate {
                    year: 2022,
                    month: 1,
                    day: 2,
                },
                purchase_time: PurchaseTime {
                    hour: 8,
                    minute: 13,
                },
                items: vec![Item {
                    short_description: "Pepsi 12PK".to_string(),
                    price: Amount::from_cents(125),
                }],
                total: Amount::from_cents(125),
            },
            points,
            processed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn insert_then_fetch() {
        let repository = InMemoryReceiptRepository::default();
        repository.insert(record("a", 15)).expect("insert succeeds");

        let stored = repository
            .fetch(&ReceiptId("a".to_string()))
            .expect("fetch succeeds")
            .expect("record present");
        assert_eq!(stored.points, 15);
        assert!(repository
            .fetch(&ReceiptId("b".to_string()))
            .expect("fetch succeeds")
            .is_none());
    }

    #[test]
    fn duplicate_ids_conflict_without_overwriting() {
        let repository = InMemoryReceiptRepository::default();
        repository.insert(record("a", 15)).expect("insert succeeds");

        match repository.insert(record("a", 99)) {
            Err(RepositoryError::Conflict) => {}
            other => panic!("expected conflict, got {other:?}"),
        }
        let stored = repository
            .fetch(&ReceiptId("a".to_string()))
            .expect("fetch succeeds")
            .expect("record present");
        assert_eq!(stored.points, 15);
        assert_eq!(repository.len(), 1);
    }
}
