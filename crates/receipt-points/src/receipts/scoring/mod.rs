mod rules;

use serde::Serialize;

use super::domain::Receipt;

/// Stateless scorer applying the seven receipt rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsEngine;

impl PointsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Total points for a validated receipt.
    pub fn score(&self, receipt: &Receipt) -> u64 {
        self.evaluate(receipt).total
    }

    /// Points with one award per applied rule, for audits and the CLI breakdown.
    pub fn evaluate(&self, receipt: &Receipt) -> PointsBreakdown {
        let awards = rules::award_receipt(receipt);
        let total = awards
            .iter()
            .fold(0u64, |sum, award| sum.saturating_add(award.points));

        PointsBreakdown { total, awards }
    }
}

/// The rule that produced an award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl PointsRule {
    pub fn label(&self) -> &'static str {
        match self {
            PointsRule::RetailerName => "Retailer name",
            PointsRule::RoundDollarTotal => "Round dollar total",
            PointsRule::QuarterMultipleTotal => "Total is a multiple of 0.25",
            PointsRule::ItemPairs => "Item pairs",
            PointsRule::DescriptionLength => "Description length multiple of 3",
            PointsRule::OddPurchaseDay => "Odd purchase day",
            PointsRule::AfternoonPurchase => "Purchased between 14:00 and 16:00",
        }
    }
}

/// Discrete contribution to a receipt's points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleAward {
    pub rule: PointsRule,
    pub points: u64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub total: u64,
    pub awards: Vec<RuleAward>,
}

impl PointsBreakdown {
    pub fn points_for(&self, rule: PointsRule) -> u64 {
        self.awards
            .iter()
            .filter(|award| award.rule == rule)
            .fold(0u64, |sum, award| sum.saturating_add(award.points))
    }
}
