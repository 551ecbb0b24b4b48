//! Synthetic cohort generation, cohort caching, the simulated symptom
//! matcher and patient accounts for the MediScout dashboard.

pub mod accounts;
pub mod analytics;
pub mod cache;
pub mod cohort;
pub mod explorer;
pub mod export;
pub mod matcher;
pub mod store;
pub mod submission;
pub mod synth;

pub use accounts::{AccountStore, Session, CURRENT_USER_KEY, USERS_KEY};
pub use analytics::{cohort_analytics, CohortAnalytics};
pub use cache::CohortCache;
pub use cohort::{assemble_cohort, tuberculosis_case_count, ConditionFamily};
pub use explorer::{explore, ExplorerQuery};
pub use export::{export_csv, EXPORT_FILE_NAME};
pub use matcher::SymptomMatcher;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use submission::{record_prediction, submit_health_record, HealthSubmission};
pub use synth::{RecordOverrides, Synthesizer};
