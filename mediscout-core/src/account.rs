//! Patient accounts and the self-reported health entries attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Condition;

/// A registered patient. The password is stored in plain text; this is a
/// demo prototype, not an authentication system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub password: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub location: String,
    #[serde(default)]
    pub health_records: Vec<SubmittedHealthRecord>,
}

/// Fields collected by the registration form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub location: String,
}

impl Registration {
    pub fn into_account(self, id: String) -> UserAccount {
        UserAccount {
            id,
            username: self.username,
            password: self.password,
            name: self.name,
            age: self.age,
            gender: self.gender,
            location: self.location,
            health_records: Vec::new(),
        }
    }
}

/// Metadata of an uploaded image. Only the descriptor is kept, never the
/// image bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
}

impl ImageDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: String::new(),
            size: 0,
        }
    }

    /// True for file names the simulated image model "understands".
    pub fn is_photo(&self) -> bool {
        let lower = self.name.to_lowercase();
        [".jpeg", ".jpg", ".png"]
            .iter()
            .any(|ext| lower.ends_with(ext))
    }
}

/// Output of the simulated symptom matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub prediction: Condition,
    pub advice: String,
    /// In [0.4, 0.95], two decimals.
    pub confidence: f64,
    pub image_analysis: String,
}

/// Prediction as stored on a submitted record, with a risk score derived
/// from the confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiAssessment {
    #[serde(flatten)]
    pub prediction: Prediction,
    pub risk_score: f64,
}

impl From<Prediction> for AiAssessment {
    fn from(prediction: Prediction) -> Self {
        let risk_score = prediction.confidence * 10.0;
        Self {
            prediction,
            risk_score,
        }
    }
}

/// Vitals as typed by the patient; either may be left blank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SubmittedVitals {
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub weight: String,
}

/// A patient self-report. Appended to an account, never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedHealthRecord {
    pub date: DateTime<Utc>,
    pub symptoms: String,
    pub vitals: SubmittedVitals,
    #[serde(default)]
    pub image_file: Option<ImageDescriptor>,
    pub ai_prediction: AiAssessment,
}
