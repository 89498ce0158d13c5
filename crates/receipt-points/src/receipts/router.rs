use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::warn;

use super::domain::ReceiptId;
use super::repository::{ProcessedView, ReceiptRepository};
use super::service::ReceiptService;
use crate::error::AppError;

/// Router exposing the process and points endpoints.
pub fn receipt_router<R>(service: Arc<ReceiptService<R>>) -> Router
where
    R: ReceiptRepository + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<R>))
        .route("/receipts/:id/points", get(points_handler::<R>))
        .with_state(service)
}

pub(crate) async fn process_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    R: ReceiptRepository + 'static,
{
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            warn!("unreadable receipt body: {}", rejection.body_text());
            return AppError::from(rejection).into_response();
        }
    };

    match service.process(&body) {
        Ok(record) => {
            let view = ProcessedView { id: record.id };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn points_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ReceiptRepository + 'static,
{
    match service.get(&ReceiptId(id)) {
        Ok(record) => (StatusCode::OK, Json(record.points_view())).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
