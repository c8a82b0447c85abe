//! Domain model for badge rules.
//!
//! A badge is a gamification award with a machine-checkable rule. Rules carry
//! a type tag plus a free-form JSON config; the only config key the evaluator
//! understands today is `threshold`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The metric a badge rule is checked against.
///
/// Catalogs are data and may grow rule types faster than this code does.
/// Unrecognized tags parse to `Unknown` instead of erroring, and `Unknown`
/// rules simply never fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    DonationCount,
    DistinctSchools,
    StreakDays,
    TotalAmount,
    #[serde(other)]
    Unknown,
}

impl RuleType {
    /// Convert to string for CSV storage
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::DonationCount => "donation_count",
            RuleType::DistinctSchools => "distinct_schools",
            RuleType::StreakDays => "streak_days",
            RuleType::TotalAmount => "total_amount",
            RuleType::Unknown => "unknown",
        }
    }

    /// Parse from string for CSV loading. Never fails: unrecognized tags
    /// become `Unknown` so a newer catalog still loads on an older build.
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "donation_count" => RuleType::DonationCount,
            "distinct_schools" => RuleType::DistinctSchools,
            "streak_days" => RuleType::StreakDays,
            "total_amount" => RuleType::TotalAmount,
            _ => RuleType::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeRule {
    pub id: String,
    pub rule_type: RuleType,
    /// Raw rule configuration as stored in the catalog
    pub rule_config: Value,
}

impl BadgeRule {
    /// The threshold this rule compares against, if the config carries one
    /// as a finite number. A rule without a usable threshold is inert: it
    /// can never be satisfied, but loading and evaluating it is not an error.
    pub fn threshold(&self) -> Option<f64> {
        self.rule_config
            .get("threshold")
            .and_then(Value::as_f64)
            .filter(|t| t.is_finite())
    }
}
