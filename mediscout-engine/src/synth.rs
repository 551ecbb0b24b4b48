//! Builds single synthetic patient records from a randomized template.

use chrono::{Duration, NaiveDate};
use mediscout_core::random::{float_between, generate_id, int_between, pick};
use mediscout_core::{Condition, Gender, ImageAnalysis, Location, PatientRecord, Vitals};
use rand::Rng;

/// Per-record overrides applied on top of the default template.
///
/// Every `Some` field replaces the template value as a whole. `vitals` and
/// `image_analysis` are not merged field by field: an override that only
/// sets a temperature yields a record whose other vitals are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordOverrides {
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub location: Option<Location>,
    pub symptoms_text: Option<String>,
    pub vitals: Option<Vitals>,
    pub image_placeholder: Option<String>,
    pub condition: Option<Condition>,
    pub risk_score: Option<u8>,
    pub triage_category: Option<String>,
    pub image_analysis: Option<ImageAnalysis>,
}

impl RecordOverrides {
    /// Replaces template fields with the overrides that are set.
    pub fn apply(self, mut record: PatientRecord) -> PatientRecord {
        if let Some(age) = self.age {
            record.age = age;
        }
        if let Some(gender) = self.gender {
            record.gender = gender;
        }
        if let Some(location) = self.location {
            record.location = location;
        }
        if let Some(text) = self.symptoms_text {
            record.symptoms_text = text;
        }
        if let Some(vitals) = self.vitals {
            record.vitals = vitals;
        }
        if let Some(placeholder) = self.image_placeholder {
            record.image_placeholder = placeholder;
        }
        if let Some(condition) = self.condition {
            record.condition_assigned = condition;
        }
        if let Some(score) = self.risk_score {
            record.simulated_risk_score = score;
        }
        if let Some(category) = self.triage_category {
            record.simulated_ai_triage_category = category;
        }
        if let Some(analysis) = self.image_analysis {
            record.simulated_ai_image_analysis = analysis;
        }

        if record.condition_assigned.is_maternal() {
            record.gender = Gender::Female;
        }

        record
    }
}

/// Record factory bound to a random source and a generation date.
pub struct Synthesizer<'r, R: ?Sized> {
    rng: &'r mut R,
    today: NaiveDate,
    lookback_days: u32,
}

impl<'r, R: Rng + ?Sized> Synthesizer<'r, R> {
    pub fn new(rng: &'r mut R, today: NaiveDate) -> Self {
        Self {
            rng,
            today,
            lookback_days: 60,
        }
    }

    pub fn with_lookback(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Random source shared with callers computing override values.
    pub fn rng(&mut self) -> &mut R {
        &mut *self.rng
    }

    pub fn synthesize(&mut self, overrides: RecordOverrides) -> PatientRecord {
        let template = self.template();
        overrides.apply(template)
    }

    /// Baseline vitals of a healthy adult.
    pub fn baseline_vitals(&mut self) -> Vitals {
        let rng = &mut *self.rng;
        Vitals {
            temperature: Some(float_between(rng, 36.0, 37.5, 1)),
            blood_pressure: Some(blood_pressure(rng, (90, 140), (60, 90))),
            heart_rate: Some(int_between(rng, 60, 100)),
            respiratory_rate: Some(int_between(rng, 12, 20)),
        }
    }

    fn template(&mut self) -> PatientRecord {
        let days_ago = int_between(&mut *self.rng, 0, i64::from(self.lookback_days));
        let vitals = self.baseline_vitals();
        let rng = &mut *self.rng;

        PatientRecord {
            id: generate_id(rng),
            date: self.today - Duration::days(days_ago),
            age: int_between(rng, 0, 80),
            gender: pick(rng, &Gender::ALL),
            location: pick(rng, &Location::ALL),
            symptoms_text: String::new(),
            vitals,
            image_placeholder: "No specific image noted.".to_string(),
            condition_assigned: Condition::GeneralCheckup,
            simulated_risk_score: int_between(rng, 1, 3),
            simulated_ai_triage_category: "Non-urgent".to_string(),
            simulated_ai_image_analysis: ImageAnalysis::none(),
        }
    }
}

/// "sys/dia" reading with both values drawn from inclusive ranges.
pub fn blood_pressure<R: Rng + ?Sized>(
    rng: &mut R,
    systolic: (u16, u16),
    diastolic: (u16, u16),
) -> String {
    let sys = int_between(rng, systolic.0, systolic.1);
    let dia = int_between(rng, diastolic.0, diastolic.1);
    format!("{sys}/{dia}")
}
