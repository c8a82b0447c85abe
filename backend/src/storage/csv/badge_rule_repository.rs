//! # CSV Badge Rule Repository
//!
//! File-based storage for the global badge rule catalog, kept in a single
//! `badge_rules.csv` at the root of the data directory.
//!
//! ## CSV Format
//!
//! ```csv
//! id,rule_type,rule_config
//! badge-first-donation,donation_count,"{""threshold"":1}"
//! badge-streak-week,streak_days,"{""threshold"":7}"
//! ```
//!
//! The `rule_config` column holds a JSON object. A row whose config fails to
//! parse still loads - as a rule with a null config, which can never be
//! satisfied - because one bad catalog row must not take badge evaluation
//! down with it.

use anyhow::Result;
use csv::{Reader, Writer};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::domain::models::badge::{BadgeRule, RuleType};
use crate::storage::traits::BadgeRuleStorage;

/// CSV record structure for badge rules
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BadgeRuleRecord {
    id: String,
    rule_type: String,
    rule_config: String,
}

impl From<BadgeRule> for BadgeRuleRecord {
    fn from(rule: BadgeRule) -> Self {
        BadgeRuleRecord {
            id: rule.id,
            rule_type: rule.rule_type.as_str().to_string(),
            rule_config: rule.rule_config.to_string(),
        }
    }
}

impl From<BadgeRuleRecord> for BadgeRule {
    fn from(record: BadgeRuleRecord) -> Self {
        let rule_config = match serde_json::from_str(&record.rule_config) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Badge rule {} has unparsable config '{}' ({}), treating as inert",
                    record.id, record.rule_config, e
                );
                serde_json::Value::Null
            }
        };

        BadgeRule {
            id: record.id,
            rule_type: RuleType::from_string(&record.rule_type),
            rule_config,
        }
    }
}

/// CSV-based badge rule repository over the global catalog file
#[derive(Clone)]
pub struct BadgeRuleRepository {
    connection: CsvConnection,
}

impl BadgeRuleRepository {
    /// Create a new CSV badge rule repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_badge_rules(&self) -> Result<Vec<BadgeRule>> {
        let file_path = self.connection.get_badge_rules_file_path();

        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut rules = Vec::new();
        for result in csv_reader.deserialize() {
            let record: BadgeRuleRecord = result?;
            rules.push(BadgeRule::from(record));
        }

        Ok(rules)
    }

    fn write_badge_rules(&self, rules: &[BadgeRule]) -> Result<()> {
        let file_path = self.connection.get_badge_rules_file_path();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)?;

        let writer = BufWriter::new(file);
        let mut csv_writer = Writer::from_writer(writer);

        for rule in rules {
            csv_writer.serialize(BadgeRuleRecord::from(rule.clone()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl BadgeRuleStorage for BadgeRuleRepository {
    fn list_badge_rules(&self) -> Result<Vec<BadgeRule>> {
        self.read_badge_rules()
    }

    fn store_badge_rule(&self, rule: &BadgeRule) -> Result<()> {
        info!("Storing badge rule: {}", rule.id);

        let mut rules = self.read_badge_rules()?;

        if let Some(pos) = rules.iter().position(|r| r.id == rule.id) {
            rules[pos] = rule.clone();
        } else {
            rules.push(rule.clone());
        }

        self.write_badge_rules(&rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use serde_json::json;

    fn setup_test_repo() -> Result<(BadgeRuleRepository, TestEnvironment)> {
        let env = TestEnvironment::new()?;
        let repo = BadgeRuleRepository::new(env.connection.clone());
        Ok((repo, env))
    }

    #[test]
    fn test_store_and_list_badge_rules() -> Result<()> {
        let (repo, _env) = setup_test_repo()?;

        repo.store_badge_rule(&BadgeRule {
            id: "badge-first".to_string(),
            rule_type: RuleType::DonationCount,
            rule_config: json!({"threshold": 1}),
        })?;
        repo.store_badge_rule(&BadgeRule {
            id: "badge-streak".to_string(),
            rule_type: RuleType::StreakDays,
            rule_config: json!({"threshold": 7}),
        })?;

        let rules = repo.list_badge_rules()?;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].rule_type, RuleType::DonationCount);
        assert_eq!(rules[0].threshold(), Some(1.0));
        assert_eq!(rules[1].threshold(), Some(7.0));
        Ok(())
    }

    #[test]
    fn test_empty_catalog_when_no_file() -> Result<()> {
        let (repo, _env) = setup_test_repo()?;
        assert!(repo.list_badge_rules()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_rule_type_round_trips_as_unknown() -> Result<()> {
        let (repo, _env) = setup_test_repo()?;

        // Simulate a catalog written by a newer build with a rule type this
        // build does not know about.
        let file_path = repo.connection.get_badge_rules_file_path();
        std::fs::write(
            &file_path,
            "id,rule_type,rule_config\nbadge-custom,custom_xyz,\"{\"\"threshold\"\":1}\"\n",
        )?;

        let rules = repo.list_badge_rules()?;
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].rule_type, RuleType::Unknown);
        Ok(())
    }

    #[test]
    fn test_unparsable_config_loads_as_inert_rule() -> Result<()> {
        let (repo, _env) = setup_test_repo()?;

        let file_path = repo.connection.get_badge_rules_file_path();
        std::fs::write(
            &file_path,
            "id,rule_type,rule_config\nbadge-broken,donation_count,not-json\n",
        )?;

        let rules = repo.list_badge_rules()?;
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].threshold(), None);
        Ok(())
    }

    #[test]
    fn test_storing_same_id_replaces_rule() -> Result<()> {
        let (repo, _env) = setup_test_repo()?;

        let mut rule = BadgeRule {
            id: "badge-first".to_string(),
            rule_type: RuleType::DonationCount,
            rule_config: json!({"threshold": 1}),
        };
        repo.store_badge_rule(&rule)?;
        rule.rule_config = json!({"threshold": 3});
        repo.store_badge_rule(&rule)?;

        let rules = repo.list_badge_rules()?;
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].threshold(), Some(3.0));
        Ok(())
    }
}
