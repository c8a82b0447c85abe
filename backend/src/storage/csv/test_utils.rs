//! Test utilities for the CSV storage backend.
//!
//! Provides RAII-based cleanup that guarantees test data is removed even if
//! tests panic or fail.

use anyhow::Result;
use tempfile::TempDir;

use super::achievement_repository::AchievementRepository;
use super::badge_rule_repository::BadgeRuleRepository;
use super::connection::CsvConnection;
use super::donation_repository::DonationRepository;

/// Test environment that provides a temporary directory and connection that
/// will be automatically cleaned up when the environment is dropped, even if
/// tests panic or fail.
pub struct TestEnvironment {
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    /// Create a new test environment with a temporary directory
    pub fn new() -> Result<Self> {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Test helper that provides repository instances for a test environment
pub struct TestHelper {
    pub env: TestEnvironment,
    pub donation_repo: DonationRepository,
    pub badge_rule_repo: BadgeRuleRepository,
    pub achievement_repo: AchievementRepository,
}

impl TestHelper {
    /// Create a new test helper with a fresh environment
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let donation_repo = DonationRepository::new(env.connection.clone());
        let badge_rule_repo = BadgeRuleRepository::new(env.connection.clone());
        let achievement_repo = AchievementRepository::new(env.connection.clone());

        Ok(Self {
            env,
            donation_repo,
            badge_rule_repo,
            achievement_repo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::{BadgeRuleStorage, DonationStorage};

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
            // Environment dropped here
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn test_helper_provides_working_repositories() -> Result<()> {
        let helper = TestHelper::new()?;
        assert!(helper.badge_rule_repo.list_badge_rules()?.is_empty());
        assert!(helper
            .donation_repo
            .list_donations("donor-1")
            .map(|d| d.is_empty())?);
        Ok(())
    }
}
