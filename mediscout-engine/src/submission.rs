//! Patient self-reported health entries.

use chrono::{DateTime, Utc};
use mediscout_core::{
    AiAssessment, ImageDescriptor, MediscoutError, Prediction, SubmittedHealthRecord,
    SubmittedVitals,
};
use serde::{Deserialize, Serialize};

use crate::accounts::{AccountStore, Session};
use crate::matcher::SymptomMatcher;
use crate::store::KeyValueStore;

/// Health entry form as filled in by a logged-in patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HealthSubmission {
    pub symptoms: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub image: Option<ImageDescriptor>,
}

impl HealthSubmission {
    /// Rejects a blank symptom description.
    pub fn validate(&self) -> Result<(), MediscoutError> {
        if self.symptoms.trim().is_empty() {
            return Err(MediscoutError::EmptySymptoms);
        }
        Ok(())
    }

    pub fn into_record(self, prediction: Prediction, now: DateTime<Utc>) -> SubmittedHealthRecord {
        SubmittedHealthRecord {
            date: now,
            symptoms: self.symptoms,
            vitals: SubmittedVitals {
                temperature: self.temperature,
                weight: self.weight,
            },
            image_file: self.image,
            ai_prediction: AiAssessment::from(prediction),
        }
    }
}

/// Validates the form, runs the matcher and appends the result to the
/// session user's history.
pub fn submit_health_record<S: KeyValueStore>(
    accounts: &mut AccountStore<S>,
    session: &mut Session,
    matcher: &SymptomMatcher,
    form: HealthSubmission,
    now: DateTime<Utc>,
) -> Result<SubmittedHealthRecord, MediscoutError> {
    form.validate()?;
    session.require_user()?;
    let prediction = matcher.predict(&form.symptoms, form.image.as_ref());
    record_prediction(accounts, session, form, prediction, now)
}

/// Appends an already computed prediction, for callers that ran the matcher
/// themselves (e.g. through the delayed async path).
pub fn record_prediction<S: KeyValueStore>(
    accounts: &mut AccountStore<S>,
    session: &mut Session,
    form: HealthSubmission,
    prediction: Prediction,
    now: DateTime<Utc>,
) -> Result<SubmittedHealthRecord, MediscoutError> {
    form.validate()?;
    let user_id = session.require_user()?.id.clone();
    let record = form.into_record(prediction, now);
    accounts.append_health_record(session, &user_id, record.clone())?;
    Ok(record)
}
