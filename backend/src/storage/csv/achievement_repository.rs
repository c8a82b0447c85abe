//! # CSV Achievement Repository
//!
//! File-based achievement storage using per-donor CSV files. Each donor's
//! achievements are stored in `{donor_id}/achievements.csv`.
//!
//! ## CSV Format
//!
//! ```csv
//! donor_id,badge_id,achieved_at
//! donor-1,badge-first-donation,2024-04-01T12:00:00+00:00
//! donor-1,badge-streak-week,2024-04-08T09:15:00+00:00
//! ```
//!
//! Achievements are write-once: the store operation inserts only the
//! (donor, badge) pairs not already present, so repeat badge evaluations
//! never duplicate a row or move its achieved_at.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::domain::models::achievement::Achievement;
use crate::storage::traits::AchievementStorage;

/// CSV record structure for achievements
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AchievementRecord {
    donor_id: String,
    badge_id: String,
    achieved_at: String,
}

impl From<Achievement> for AchievementRecord {
    fn from(achievement: Achievement) -> Self {
        AchievementRecord {
            donor_id: achievement.donor_id,
            badge_id: achievement.badge_id,
            achieved_at: achievement.achieved_at.to_rfc3339(),
        }
    }
}

impl TryFrom<AchievementRecord> for Achievement {
    type Error = anyhow::Error;

    fn try_from(record: AchievementRecord) -> Result<Self> {
        let achieved_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&record.achieved_at)
            .with_context(|| format!("Invalid achievement date: {}", record.achieved_at))?
            .with_timezone(&Utc);

        Ok(Achievement {
            donor_id: record.donor_id,
            badge_id: record.badge_id,
            achieved_at,
        })
    }
}

/// CSV-based achievement repository using per-donor files
#[derive(Clone)]
pub struct AchievementRepository {
    connection: CsvConnection,
}

impl AchievementRepository {
    /// Create a new CSV achievement repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_achievements(&self, donor_id: &str) -> Result<Vec<Achievement>> {
        let file_path = self.connection.get_achievements_file_path(donor_id);

        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut achievements = Vec::new();
        for result in csv_reader.deserialize() {
            let record: AchievementRecord = result?;
            achievements.push(Achievement::try_from(record)?);
        }

        Ok(achievements)
    }

    fn write_achievements(&self, donor_id: &str, achievements: &[Achievement]) -> Result<()> {
        self.connection.ensure_donor_directory_exists(donor_id)?;
        let file_path = self.connection.get_achievements_file_path(donor_id);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)?;

        let writer = BufWriter::new(file);
        let mut csv_writer = Writer::from_writer(writer);

        for achievement in achievements {
            csv_writer.serialize(AchievementRecord::from(achievement.clone()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl AchievementStorage for AchievementRepository {
    fn store_achievements(&self, donor_id: &str, achievements: &[Achievement]) -> Result<()> {
        if achievements.is_empty() {
            return Ok(());
        }

        let mut stored = self.read_achievements(donor_id)?;
        let held: HashSet<String> = stored.iter().map(|a| a.badge_id.clone()).collect();

        let mut inserted = 0;
        for achievement in achievements {
            if held.contains(&achievement.badge_id) {
                debug!(
                    "Donor {} already holds badge {}, keeping original achieved_at",
                    donor_id, achievement.badge_id
                );
                continue;
            }
            stored.push(achievement.clone());
            inserted += 1;
        }

        if inserted == 0 {
            return Ok(());
        }

        self.write_achievements(donor_id, &stored)?;

        info!(
            "Recorded {} new achievement(s) for donor {} ({} already held)",
            inserted,
            donor_id,
            achievements.len() - inserted
        );
        Ok(())
    }

    fn list_achievements(&self, donor_id: &str) -> Result<Vec<Achievement>> {
        self.read_achievements(donor_id)
    }

    fn has_achievement(&self, donor_id: &str, badge_id: &str) -> Result<bool> {
        let achievements = self.read_achievements(donor_id)?;
        Ok(achievements.iter().any(|a| a.badge_id == badge_id))
    }
}
