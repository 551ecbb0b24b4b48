//! Core types for the MediScout community health demo: synthetic patient
//! records, patient accounts, simulated AI predictions and shared config.

use serde::{Deserialize, Serialize};

pub mod account;
pub mod random;
pub mod record;

pub use account::{
    AiAssessment, ImageDescriptor, Prediction, Registration, SubmittedHealthRecord,
    SubmittedVitals, UserAccount,
};
pub use record::{
    Condition, Gender, ImageAnalysis, Location, PatientRecord, Vitals, HIGH_RISK_THRESHOLD,
};

/// Store key of the cached cohort. Bump the suffix whenever the record
/// schema changes so stale shapes are never read back as valid.
pub const COHORT_CACHE_KEY: &str = "syntheticHealthData_v2";

/// Settings for cohort generation and caching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CohortConfig {
    /// Records generated per condition family (tuberculosis excepted).
    pub per_condition_count: usize,
    /// Hard cap on the assembled cohort.
    pub max_cohort_size: usize,
    /// Observation dates are drawn from this many days before generation.
    pub lookback_days: u32,
    pub cache_key: String,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            per_condition_count: 15,
            max_cohort_size: 200,
            lookback_days: 60,
            cache_key: COHORT_CACHE_KEY.to_string(),
        }
    }
}

/// Settings for the simulated symptom matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatcherConfig {
    /// Artificial delay (ms) applied by the async prediction path.
    pub latency_ms: u64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { latency_ms: 1500 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MediscoutConfig {
    pub cohort: CohortConfig,
    pub matcher: MatcherConfig,
}

/// Errors surfaced to callers. Validation failures carry a message that is
/// safe to show to the end user.
#[derive(Debug, thiserror::Error)]
pub enum MediscoutError {
    #[error("Username already exists.")]
    UsernameTaken,
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("Please describe your symptoms.")]
    EmptySymptoms,
    #[error("You must be logged in to do that.")]
    NotLoggedIn,
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MediscoutError {
    /// True for rejections caused by user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UsernameTaken
                | Self::InvalidCredentials
                | Self::EmptySymptoms
                | Self::NotLoggedIn
                | Self::AccountNotFound(_)
        )
    }
}
