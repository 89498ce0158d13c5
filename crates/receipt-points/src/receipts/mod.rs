//! Receipt intake and loyalty points scoring.
//!
//! Raw JSON goes through [`validation::validate_receipt`] before anything else sees it; only
//! a typed [`Receipt`] reaches the [`PointsEngine`]. The [`ReceiptService`] stores each scored
//! receipt under a fresh UUID through whichever [`ReceiptRepository`] it was built with.

pub mod amount;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use amount::Amount;
pub use domain::{Item, PurchaseDate, PurchaseTime, Receipt, ReceiptId};
pub use repository::{
    PointsView, ProcessedView, ReceiptRepository, RepositoryError, ScoreRecord,
};
pub use router::receipt_router;
pub use scoring::{PointsBreakdown, PointsEngine, PointsRule, RuleAward};
pub use service::{ReceiptService, ReceiptServiceError, NOT_FOUND_MESSAGE};
pub use validation::{validate_receipt, ValidationError};
