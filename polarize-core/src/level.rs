//! Player level: the per-request caps that decide how a result is split.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tournament::Category;

/// Caps (in USD) supplied by the player-level provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLevel {
    /// Descriptive label, e.g. "3.1"
    pub level: String,
    /// Progress towards the next level (0.0 - 1.0); informational only
    #[serde(default)]
    pub level_progress: f64,
    /// Cap for regular and other-currency tournaments
    pub normal_limit: f64,
    /// Cap for phase tournaments
    pub phase_limit: f64,
}

impl PlayerLevel {
    pub fn new(level: impl Into<String>, normal_limit: f64, phase_limit: f64) -> Self {
        Self {
            level: level.into(),
            level_progress: 0.0,
            normal_limit,
            phase_limit,
        }
    }

    /// Level used when the provider cannot be reached
    pub fn fallback() -> Self {
        Self::new("fallback", 22.0, 11.0)
    }

    /// Reject caps that would make the split percentages meaningless
    pub fn validate(&self) -> Result<(), CoreError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.normal_limit) && ok(self.phase_limit) {
            Ok(())
        } else {
            Err(CoreError::InvalidPlayerLevel {
                normal_limit: self.normal_limit,
                phase_limit: self.phase_limit,
            })
        }
    }

    /// Cap that applies to a tournament of the given category
    pub fn cap_for(&self, category: Category) -> f64 {
        if category.is_phase() {
            self.phase_limit
        } else {
            self.normal_limit
        }
    }
}

impl Default for PlayerLevel {
    fn default() -> Self {
        Self::fallback()
    }
}
