use super::common::*;
use serde_json::json;
use std::sync::Arc;

use crate::receipts::domain::ReceiptId;
use crate::receipts::repository::RepositoryError;
use crate::receipts::validation::ValidationError;
use crate::receipts::{PointsEngine, ReceiptService, ReceiptServiceError};

#[test]
fn process_stores_scored_record() {
    let (service, repository) = build_service();

    let record = service.process(&target_receipt()).expect("valid receipt");

    assert_eq!(record.points, 28);
    assert_eq!(repository.len(), 1);
    assert!(uuid::Uuid::parse_str(record.id.as_str()).is_ok());
    assert_eq!(service.points(&record.id).expect("stored"), 28);
    assert_eq!(service.get(&record.id).expect("stored").receipt.retailer, "Target");
}

#[test]
fn process_matches_direct_scoring() {
    let (service, _) = build_service();
    for raw in [target_receipt(), corner_market_receipt(), plain_receipt()] {
        let receipt = crate::receipts::validate_receipt(&raw).expect("valid");
        let expected = PointsEngine::new().score(&receipt);
        let record = service.process(&raw).expect("valid");
        assert_eq!(service.points(&record.id).expect("stored"), expected);
    }
}

#[test]
fn repeated_lookups_are_stable() {
    let (service, _) = build_service();
    let record = service.process(&corner_market_receipt()).expect("valid");

    let first = service.points(&record.id).expect("stored");
    let second = service.points(&record.id).expect("stored");
    assert_eq!(first, 109);
    assert_eq!(first, second);
}

#[test]
fn each_submission_gets_a_fresh_id() {
    let (service, repository) = build_service();
    let first = service.process(&target_receipt()).expect("valid");
    let second = service.process(&target_receipt()).expect("valid");

    assert_ne!(first.id, second.id);
    assert_eq!(repository.len(), 2);
}

#[test]
fn invalid_receipts_never_reach_the_store() {
    let (service, repository) = build_service();

    let mut empty_items = target_receipt();
    empty_items["items"] = json!([]);
    let mut short_total = target_receipt();
    short_total["total"] = json!("10.5");

    match service.process(&empty_items) {
        Err(ReceiptServiceError::Validation(ValidationError::MissingField { field: "items" })) => {}
        other => panic!("expected missing items, got {other:?}"),
    }
    match service.process(&short_total) {
        Err(ReceiptServiceError::Validation(ValidationError::InvalidTotal)) => {}
        other => panic!("expected invalid total, got {other:?}"),
    }

    assert_eq!(repository.insert_calls(), 0);
    assert_eq!(repository.len(), 0);
}

#[test]
fn unknown_id_is_not_found() {
    let (service, _) = build_service();
    service.process(&target_receipt()).expect("valid");

    let id = ReceiptId("7fb1377b-b223-49d9-a31a-5a02701dd310".to_string());
    match service.points(&id) {
        Err(ReceiptServiceError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn store_conflicts_surface_as_repository_errors() {
    let service = ReceiptService::new(Arc::new(ConflictRepository));
    match service.process(&target_receipt()) {
        Err(ReceiptServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn store_outages_propagate_on_lookup() {
    let service = ReceiptService::new(Arc::new(UnavailableRepository));
    match service.points(&ReceiptId("anything".to_string())) {
        Err(ReceiptServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable, got {other:?}"),
    }
}

#[test]
fn concurrent_submissions_do_not_collide() {
    let (service, repository) = build_service();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            std::thread::spawn(move || {
                (0..25)
                    .map(|_| service.process(&corner_market_receipt()).expect("valid").id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<ReceiptId> = handles
        .into_iter()
        .flat_map(|handle| handle.join().expect("worker finished"))
        .collect();

    assert_eq!(ids.len(), 200);
    assert_eq!(repository.len(), 200);
    for id in &ids {
        assert_eq!(service.points(id).expect("stored"), 109);
    }
}
