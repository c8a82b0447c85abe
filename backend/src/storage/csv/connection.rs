use anyhow::Result;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// CsvConnection manages file paths and ensures CSV files exist for each donor.
///
/// The base directory is the only piece of configuration the storage layer
/// needs; callers pass it in explicitly rather than relying on ambient
/// global state.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// The base data directory this connection operates on
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the directory path for a donor's data
    ///
    /// Donor IDs are opaque identifiers and are used directly as directory
    /// names.
    pub fn get_donor_directory(&self, donor_id: &str) -> PathBuf {
        self.base_directory.join(donor_id)
    }

    /// Get the file path for a donor's donations
    pub fn get_donations_file_path(&self, donor_id: &str) -> PathBuf {
        self.get_donor_directory(donor_id).join("donations.csv")
    }

    /// Get the file path for a donor's achievements
    pub fn get_achievements_file_path(&self, donor_id: &str) -> PathBuf {
        self.get_donor_directory(donor_id).join("achievements.csv")
    }

    /// Get the file path for the global badge rule catalog
    pub fn get_badge_rules_file_path(&self) -> PathBuf {
        self.base_directory.join("badge_rules.csv")
    }

    /// Ensure a donor's directory exists before writing into it
    pub fn ensure_donor_directory_exists(&self, donor_id: &str) -> Result<()> {
        let donor_dir = self.get_donor_directory(donor_id);
        if !donor_dir.exists() {
            debug!("Creating donor directory: {}", donor_dir.display());
            fs::create_dir_all(&donor_dir)?;
        }
        Ok(())
    }
}
