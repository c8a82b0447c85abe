//! # CSV Donation Repository
//!
//! File-based donation storage using per-donor CSV files. Each donor's
//! donations are stored in `{donor_id}/donations.csv`.
//!
//! ## CSV Format
//!
//! ```csv
//! id,donor_id,amount,school_id,created_at
//! dn-1712345678901-af3c,donor-1,25.00,school-a,2024-04-01T12:00:00+00:00
//! dn-1712432078901-b2e1,donor-1,10.00,,2024-04-02T09:30:00+00:00
//! ```
//!
//! An empty `school_id` column means the donation was not directed at a
//! school. Files are rewritten whole on every store, sorted chronologically.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::domain::models::donation::Donation;
use crate::storage::traits::DonationStorage;

/// CSV record structure for donations
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DonationRecord {
    id: String,
    donor_id: String,
    amount: f64,
    school_id: String,
    created_at: String,
}

impl From<Donation> for DonationRecord {
    fn from(donation: Donation) -> Self {
        DonationRecord {
            id: donation.id,
            donor_id: donation.donor_id,
            amount: donation.amount,
            school_id: donation.school_id.unwrap_or_default(),
            created_at: donation.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<DonationRecord> for Donation {
    type Error = anyhow::Error;

    fn try_from(record: DonationRecord) -> Result<Self> {
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&record.created_at)
            .with_context(|| format!("Invalid donation date: {}", record.created_at))?
            .with_timezone(&Utc);

        Ok(Donation {
            id: record.id,
            donor_id: record.donor_id,
            amount: record.amount,
            school_id: Some(record.school_id).filter(|s| !s.is_empty()),
            created_at,
        })
    }
}

/// CSV-based donation repository using per-donor files
#[derive(Clone)]
pub struct DonationRepository {
    connection: CsvConnection,
}

impl DonationRepository {
    /// Create a new CSV donation repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all donations for a donor from their CSV file.
    /// A donor with no file yet simply has no donations.
    fn read_donations(&self, donor_id: &str) -> Result<Vec<Donation>> {
        let file_path = self.connection.get_donations_file_path(donor_id);

        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut donations = Vec::new();
        for result in csv_reader.deserialize() {
            let record: DonationRecord = result?;
            donations.push(Donation::try_from(record)?);
        }

        Ok(donations)
    }

    /// Write all donations for a donor to their CSV file
    fn write_donations(&self, donor_id: &str, donations: &[Donation]) -> Result<()> {
        self.connection.ensure_donor_directory_exists(donor_id)?;
        let file_path = self.connection.get_donations_file_path(donor_id);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)?;

        let writer = BufWriter::new(file);
        let mut csv_writer = Writer::from_writer(writer);

        for donation in donations {
            csv_writer.serialize(DonationRecord::from(donation.clone()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl DonationStorage for DonationRepository {
    fn store_donation(&self, donation: &Donation) -> Result<()> {
        info!(
            "Storing donation in CSV for donor '{}': {}",
            donation.donor_id, donation.id
        );

        let mut donations = self.read_donations(&donation.donor_id)?;

        if let Some(pos) = donations.iter().position(|d| d.id == donation.id) {
            donations[pos] = donation.clone();
        } else {
            donations.push(donation.clone());
        }

        // Keep the file chronologically ordered.
        donations.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        self.write_donations(&donation.donor_id, &donations)
    }

    fn get_donation(&self, donor_id: &str, donation_id: &str) -> Result<Option<Donation>> {
        let donations = self.read_donations(donor_id)?;
        Ok(donations.into_iter().find(|d| d.id == donation_id))
    }

    fn list_donations(&self, donor_id: &str) -> Result<Vec<Donation>> {
        let mut donations = self.read_donations(donor_id)?;
        donations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(donations)
    }

    fn count_donations(&self, donor_id: &str) -> Result<u32> {
        Ok(self.read_donations(donor_id)?.len() as u32)
    }
}
