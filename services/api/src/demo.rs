use crate::infra::InMemoryReceiptRepository;
use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{validate_receipt, PointsBreakdown, PointsEngine, ReceiptService};
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Receipt JSON file, or `-` to read from stdin
    pub(crate) path: PathBuf,
    /// Print the points awarded by each rule
    #[arg(long)]
    pub(crate) breakdown: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = read_receipt(&args.path)?;
    let breakdown = score_value(&raw)?;

    println!("Points: {}", breakdown.total);
    if args.breakdown {
        render_breakdown(&breakdown);
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let repository = Arc::new(InMemoryReceiptRepository::default());
    let service = ReceiptService::new(repository.clone());

    println!("Receipt points demo");
    for (label, raw) in demo_receipts() {
        let record = service.process(&raw)?;
        let points = service.points(&record.id)?;
        println!("\n{label}");
        println!("- id {} processed at {}", record.id, record.processed_at);
        println!("- retrieved points: {points}");
        render_breakdown(&service.engine().evaluate(&record.receipt));
    }

    let mut rejected = demo_receipts()[0].1.clone();
    rejected["total"] = json!("10.5");
    match service.process(&rejected) {
        Ok(record) => println!("\nUnexpectedly accepted malformed receipt {}", record.id),
        Err(err) => println!("\nMalformed receipt rejected: {err}"),
    }

    println!("\nStore holds {} receipt(s)", repository.len());
    Ok(())
}

fn read_receipt(path: &Path) -> Result<Value, AppError> {
    let mut contents = String::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut contents)?;
    } else {
        contents = std::fs::read_to_string(path)?;
    }
    Ok(serde_json::from_str(&contents)?)
}

fn score_value(raw: &Value) -> Result<PointsBreakdown, AppError> {
    let receipt = validate_receipt(raw)?;
    Ok(PointsEngine::new().evaluate(&receipt))
}

fn render_breakdown(breakdown: &PointsBreakdown) {
    if breakdown.awards.is_empty() {
        println!("  no rules applied");
        return;
    }
    for award in &breakdown.awards {
        println!(
            "  - {}: +{} ({})",
            award.rule.label(),
            award.points,
            award.notes
        );
    }
}

fn demo_receipts() -> Vec<(&'static str, Value)> {
    vec![
        (
            "Target, 5 items",
            json!({
                "retailer": "Target",
                "purchaseDate": "2022-01-01",
                "purchaseTime": "13:01",
                "items": [
                    { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
                    { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
                    { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
                    { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
                    { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
                ],
                "total": "35.35"
            }),
        ),
        (
            "M&M Corner Market, 4 items",
            json!({
                "retailer": "M&M Corner Market",
                "purchaseDate": "2022-03-20",
                "purchaseTime": "14:33",
                "items": [
                    { "shortDescription": "Gatorade", "price": "2.25" },
                    { "shortDescription": "Gatorade", "price": "2.25" },
                    { "shortDescription": "Gatorade", "price": "2.25" },
                    { "shortDescription": "Gatorade", "price": "2.25" }
                ],
                "total": "9.00"
            }),
        ),
    ]
}
