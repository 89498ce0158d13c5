use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Receipt, ReceiptId};

/// Scored receipt kept by the store. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub id: ReceiptId,
    pub receipt: Receipt,
    pub points: u64,
    pub processed_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn points_view(&self) -> PointsView {
        PointsView {
            points: self.points,
        }
    }
}

/// Storage abstraction so the service can be exercised against any backend.
pub trait ReceiptRepository: Send + Sync {
    /// Store a new record. An existing id is a conflict, never an overwrite.
    fn insert(&self, record: ScoreRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Body returned by the process endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedView {
    pub id: ReceiptId,
}

/// Body returned by the points endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointsView {
    pub points: u64,
}
