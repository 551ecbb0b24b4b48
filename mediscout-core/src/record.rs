//! Synthetic patient observation and its vocabularies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Cities covered by the community dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Location {
    Karachi,
    Lahore,
    Faisalabad,
    Rawalpindi,
    Multan,
    Hyderabad,
    Gujranwala,
    Peshawar,
    Quetta,
    Islamabad,
}

impl Location {
    pub const ALL: [Location; 10] = [
        Location::Karachi,
        Location::Lahore,
        Location::Faisalabad,
        Location::Rawalpindi,
        Location::Multan,
        Location::Hyderabad,
        Location::Gujranwala,
        Location::Peshawar,
        Location::Quetta,
        Location::Islamabad,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Location::Karachi => "Karachi",
            Location::Lahore => "Lahore",
            Location::Faisalabad => "Faisalabad",
            Location::Rawalpindi => "Rawalpindi",
            Location::Multan => "Multan",
            Location::Hyderabad => "Hyderabad",
            Location::Gujranwala => "Gujranwala",
            Location::Peshawar => "Peshawar",
            Location::Quetta => "Quetta",
            Location::Islamabad => "Islamabad",
        }
    }
}

/// Condition labels shared by the cohort generators and the symptom matcher.
/// Serialized as the human-readable label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Condition {
    #[serde(rename = "Febrile Illness (Suspected Vector-borne)")]
    FebrileIllness,
    #[serde(rename = "Mild Viral Infection")]
    MildViralInfection,
    #[serde(rename = "Acute Diarrheal Disease")]
    AcuteDiarrhealDisease,
    #[serde(rename = "Healthy Child Checkup")]
    HealthyChildCheckup,
    #[serde(rename = "Nutritional Assessment (Possible Stunting)")]
    PossibleStunting,
    #[serde(rename = "Routine Child Checkup")]
    RoutineChildCheckup,
    #[serde(rename = "Nutritional Assessment (Possible Wasting)")]
    PossibleWasting,
    #[serde(rename = "Suspected Tuberculosis (TB)")]
    SuspectedTuberculosis,
    #[serde(rename = "Obstetric Complication (e.g., Suspected Preeclampsia)")]
    ObstetricComplication,
    #[serde(rename = "Routine Antenatal Care")]
    RoutineAntenatalCare,
    #[serde(rename = "General Adult Female Checkup")]
    GeneralAdultFemaleCheckup,
    #[serde(rename = "Hypertension")]
    Hypertension,
    #[serde(rename = "Normotensive Adult")]
    NormotensiveAdult,
    #[serde(rename = "Diabetes Mellitus")]
    DiabetesMellitus,
    #[serde(rename = "Non-Diabetic Adult")]
    NonDiabeticAdult,
    #[serde(rename = "Immunization Status Check")]
    ImmunizationStatusCheck,
    #[serde(rename = "Acute Respiratory Infection (ARI)")]
    AcuteRespiratoryInfection,
    #[serde(rename = "Healthy Child")]
    HealthyChild,
    #[serde(rename = "General Checkup")]
    GeneralCheckup,
}

impl Condition {
    /// Full vocabulary in matcher order.
    pub const ALL: [Condition; 19] = [
        Condition::FebrileIllness,
        Condition::MildViralInfection,
        Condition::AcuteDiarrhealDisease,
        Condition::HealthyChildCheckup,
        Condition::PossibleStunting,
        Condition::RoutineChildCheckup,
        Condition::PossibleWasting,
        Condition::SuspectedTuberculosis,
        Condition::ObstetricComplication,
        Condition::RoutineAntenatalCare,
        Condition::GeneralAdultFemaleCheckup,
        Condition::Hypertension,
        Condition::NormotensiveAdult,
        Condition::DiabetesMellitus,
        Condition::NonDiabeticAdult,
        Condition::ImmunizationStatusCheck,
        Condition::AcuteRespiratoryInfection,
        Condition::HealthyChild,
        Condition::GeneralCheckup,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Condition::FebrileIllness => "Febrile Illness (Suspected Vector-borne)",
            Condition::MildViralInfection => "Mild Viral Infection",
            Condition::AcuteDiarrhealDisease => "Acute Diarrheal Disease",
            Condition::HealthyChildCheckup => "Healthy Child Checkup",
            Condition::PossibleStunting => "Nutritional Assessment (Possible Stunting)",
            Condition::RoutineChildCheckup => "Routine Child Checkup",
            Condition::PossibleWasting => "Nutritional Assessment (Possible Wasting)",
            Condition::SuspectedTuberculosis => "Suspected Tuberculosis (TB)",
            Condition::ObstetricComplication => {
                "Obstetric Complication (e.g., Suspected Preeclampsia)"
            }
            Condition::RoutineAntenatalCare => "Routine Antenatal Care",
            Condition::GeneralAdultFemaleCheckup => "General Adult Female Checkup",
            Condition::Hypertension => "Hypertension",
            Condition::NormotensiveAdult => "Normotensive Adult",
            Condition::DiabetesMellitus => "Diabetes Mellitus",
            Condition::NonDiabeticAdult => "Non-Diabetic Adult",
            Condition::ImmunizationStatusCheck => "Immunization Status Check",
            Condition::AcuteRespiratoryInfection => "Acute Respiratory Infection (ARI)",
            Condition::HealthyChild => "Healthy Child",
            Condition::GeneralCheckup => "General Checkup",
        }
    }

    pub fn from_label(label: &str) -> Option<Condition> {
        Condition::ALL
            .into_iter()
            .find(|condition| condition.label() == label)
    }

    /// Label without its parenthetical qualifier, e.g. "Hypertension" or
    /// "Suspected Tuberculosis".
    pub fn short_label(self) -> &'static str {
        let label = self.label();
        label.split('(').next().unwrap_or(label).trim()
    }

    /// Maternal-health conditions only ever apply to female patients.
    pub fn is_maternal(self) -> bool {
        matches!(
            self,
            Condition::ObstetricComplication
                | Condition::RoutineAntenatalCare
                | Condition::GeneralAdultFemaleCheckup
        )
    }
}

/// Vital signs at the time of observation. A condition override replaces the
/// whole struct, so fields it leaves unset stay `None` and are omitted from
/// the serialized record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// Degrees Celsius, one decimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// "systolic/diastolic" in mmHg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<u16>,
}

impl Vitals {
    /// Systolic and diastolic values parsed from `blood_pressure`.
    pub fn blood_pressure_values(&self) -> Option<(u16, u16)> {
        let (sys, dia) = self.blood_pressure.as_deref()?.split_once('/')?;
        Some((sys.trim().parse().ok()?, dia.trim().parse().ok()?))
    }
}

/// Simulated image model output attached to a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageAnalysis {
    pub finding: String,
    /// 0.0 when there is no finding.
    pub confidence: f64,
}

impl ImageAnalysis {
    pub fn none() -> Self {
        Self {
            finding: "N/A".to_string(),
            confidence: 0.0,
        }
    }

    pub fn finding(finding: &str, confidence: f64) -> Self {
        Self {
            finding: finding.to_string(),
            confidence,
        }
    }

    pub fn has_finding(&self) -> bool {
        self.finding != "N/A"
    }
}

impl Default for ImageAnalysis {
    fn default() -> Self {
        Self::none()
    }
}

/// One synthetic community health observation. Field order matches the
/// exported CSV column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: String,
    pub date: NaiveDate,
    pub age: u8,
    pub gender: Gender,
    pub location: Location,
    pub symptoms_text: String,
    pub vitals: Vitals,
    pub image_placeholder: String,
    pub condition_assigned: Condition,
    pub simulated_risk_score: u8,
    pub simulated_ai_triage_category: String,
    pub simulated_ai_image_analysis: ImageAnalysis,
}

impl PatientRecord {
    pub fn is_high_risk(&self) -> bool {
        self.simulated_risk_score >= HIGH_RISK_THRESHOLD
    }
}

/// Risk scores at or above this value count as high risk on the dashboards.
pub const HIGH_RISK_THRESHOLD: u8 = 7;
