use super::super::domain::{Item, Receipt};
use super::super::validation::is_description_whitespace;
use super::{PointsRule, RuleAward};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const QUARTER_CENTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

// Exclusive bounds, 14:00 < t < 16:00.
const AFTERNOON_START_MINUTES: u16 = 14 * 60;
const AFTERNOON_END_MINUTES: u16 = 16 * 60;

pub(crate) fn award_receipt(receipt: &Receipt) -> Vec<RuleAward> {
    let mut awards = Vec::new();

    let alphanumeric = retailer_points(&receipt.retailer);
    if alphanumeric > 0 {
        awards.push(RuleAward {
            rule: PointsRule::RetailerName,
            points: alphanumeric,
            notes: format!(
                "{alphanumeric} alphanumeric characters in '{}'",
                receipt.retailer
            ),
        });
    }

    if receipt.total.is_whole_dollars() {
        awards.push(RuleAward {
            rule: PointsRule::RoundDollarTotal,
            points: ROUND_DOLLAR_POINTS,
            notes: format!("total {} has no cents", receipt.total),
        });
    }

    if receipt.total.is_multiple_of(QUARTER_CENTS) {
        awards.push(RuleAward {
            rule: PointsRule::QuarterMultipleTotal,
            points: QUARTER_MULTIPLE_POINTS,
            notes: format!("total {} is a multiple of 0.25", receipt.total),
        });
    }

    let pairs = (receipt.items.len() / 2) as u64;
    if pairs > 0 {
        awards.push(RuleAward {
            rule: PointsRule::ItemPairs,
            points: pairs.saturating_mul(POINTS_PER_ITEM_PAIR),
            notes: format!("{pairs} pair(s) across {} items", receipt.items.len()),
        });
    }

    for (index, item) in receipt.items.iter().enumerate() {
        if let Some(points) = description_points(item).filter(|points| *points > 0) {
            awards.push(RuleAward {
                rule: PointsRule::DescriptionLength,
                points,
                notes: format!(
                    "items[{index}] '{}' trims to a multiple of 3; ceil(0.2 x {})",
                    trimmed_description(item),
                    item.price
                ),
            });
        }
    }

    if receipt.purchase_date.day % 2 == 1 {
        awards.push(RuleAward {
            rule: PointsRule::OddPurchaseDay,
            points: ODD_DAY_POINTS,
            notes: format!("purchase day {:02} is odd", receipt.purchase_date.day),
        });
    }

    let minutes = receipt.purchase_time.minutes_since_midnight();
    if minutes > AFTERNOON_START_MINUTES && minutes < AFTERNOON_END_MINUTES {
        awards.push(RuleAward {
            rule: PointsRule::AfternoonPurchase,
            points: AFTERNOON_POINTS,
            notes: format!("purchased at {}", receipt.purchase_time),
        });
    }

    awards
}

pub(crate) fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

/// `ceil(price * 0.2)` when the trimmed description length is a non-zero multiple of 3.
fn trimmed_description(item: &Item) -> &str {
    item.short_description.trim_matches(is_description_whitespace)
}

pub(crate) fn description_points(item: &Item) -> Option<u64> {
    let length = trimmed_description(item).chars().count();
    if length == 0 || length % 3 != 0 {
        return None;
    }
    Some(item.price.ceil_share(1, 5))
}
