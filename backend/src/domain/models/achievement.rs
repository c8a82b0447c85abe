//! Domain model for a recorded achievement.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted record that a donor has satisfied a badge's rule.
///
/// Achieving a badge is a one-time, monotonic event: at most one record
/// exists per (donor_id, badge_id) pair, and `achieved_at` keeps the time the
/// badge was first recorded even if later evaluations satisfy it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub donor_id: String,
    pub badge_id: String,
    pub achieved_at: DateTime<Utc>,
}
