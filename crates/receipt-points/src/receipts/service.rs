use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::domain::ReceiptId;
use super::repository::{ReceiptRepository, RepositoryError, ScoreRecord};
use super::scoring::PointsEngine;
use super::validation::{validate_receipt, ValidationError};

/// Message returned for unknown receipt ids.
pub const NOT_FOUND_MESSAGE: &str = "No receipt found for that id";

/// Service composing the validator, points engine, and receipt store.
pub struct ReceiptService<R> {
    repository: Arc<R>,
    engine: PointsEngine,
}

fn next_receipt_id() -> ReceiptId {
    ReceiptId(Uuid::new_v4().to_string())
}

impl<R> ReceiptService<R>
where
    R: ReceiptRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            engine: PointsEngine::new(),
        }
    }

    pub fn engine(&self) -> &PointsEngine {
        &self.engine
    }

    /// Validate, score, and store a raw receipt, returning the stored record.
    ///
    /// Nothing is scored or stored when validation fails.
    pub fn process(&self, raw: &Value) -> Result<ScoreRecord, ReceiptServiceError> {
        let receipt = validate_receipt(raw).map_err(|err| {
            warn!(field = %err.field(), rule = err.code(), "receipt rejected: {}", err);
            err
        })?;

        let points = self.engine.score(&receipt);
        let record = ScoreRecord {
            id: next_receipt_id(),
            receipt,
            points,
            processed_at: Utc::now(),
        };

        self.repository.insert(record.clone()).map_err(|err| {
            error!(id = %record.id, "failed to store scored receipt: {}", err);
            err
        })?;

        info!(id = %record.id, points, "receipt processed");
        Ok(record)
    }

    /// Fetch a stored record by id.
    pub fn get(&self, id: &ReceiptId) -> Result<ScoreRecord, ReceiptServiceError> {
        match self.repository.fetch(id)? {
            Some(record) => Ok(record),
            None => {
                debug!(%id, "no receipt stored under id");
                Err(ReceiptServiceError::NotFound)
            }
        }
    }

    /// Points awarded to a stored receipt.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        self.get(id).map(|record| record.points)
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No receipt found for that id")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
