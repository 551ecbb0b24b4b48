//! Assembles the synthetic cohort from ten condition-family generators.
//!
//! Each family draws `count` patients and decides per patient, with a fixed
//! prevalence, whether the patient is affected or a baseline/healthy case.
//! Prevalence figures are the design assumptions of the demo dataset, not
//! measured statistics.

use chrono::NaiveDate;
use log::debug;
use mediscout_core::random::{chance, float_between, int_between};
use mediscout_core::{CohortConfig, Condition, Gender, ImageAnalysis, PatientRecord, Vitals};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::synth::{blood_pressure, RecordOverrides, Synthesizer};

/// Tuberculosis incidence per 100 000 population.
const TB_INCIDENCE_PER_100K: f64 = 259.0;
/// Inflates the TB incidence so the small demo cohort still shows cases.
const TB_SCALING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionFamily {
    FebrileIllness,
    DiarrhealDisease,
    Stunting,
    Wasting,
    Tuberculosis,
    ObstetricComplication,
    Hypertension,
    Diabetes,
    Immunization,
    RespiratoryInfection,
}

impl ConditionFamily {
    /// Generation order. Tuberculosis depends on how many records precede it.
    pub const ALL: [ConditionFamily; 10] = [
        ConditionFamily::FebrileIllness,
        ConditionFamily::DiarrhealDisease,
        ConditionFamily::Stunting,
        ConditionFamily::Wasting,
        ConditionFamily::Tuberculosis,
        ConditionFamily::ObstetricComplication,
        ConditionFamily::Hypertension,
        ConditionFamily::Diabetes,
        ConditionFamily::Immunization,
        ConditionFamily::RespiratoryInfection,
    ];

    /// Probability that a generated patient is an affected case. For
    /// immunization this is the share of fully immunized children.
    pub fn prevalence(self) -> f64 {
        match self {
            ConditionFamily::FebrileIllness => 0.25,
            ConditionFamily::DiarrhealDisease => 0.39,
            ConditionFamily::Stunting => 0.38,
            ConditionFamily::Wasting => 0.177,
            ConditionFamily::Tuberculosis => 1.0,
            ConditionFamily::ObstetricComplication => 0.10,
            ConditionFamily::Hypertension => 0.373,
            ConditionFamily::Diabetes => 0.314,
            ConditionFamily::Immunization => 0.66,
            ConditionFamily::RespiratoryInfection => 0.75,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConditionFamily::FebrileIllness => "febrile illness",
            ConditionFamily::DiarrhealDisease => "diarrheal disease",
            ConditionFamily::Stunting => "stunting",
            ConditionFamily::Wasting => "wasting",
            ConditionFamily::Tuberculosis => "tuberculosis",
            ConditionFamily::ObstetricComplication => "obstetric complication",
            ConditionFamily::Hypertension => "hypertension",
            ConditionFamily::Diabetes => "diabetes",
            ConditionFamily::Immunization => "immunization",
            ConditionFamily::RespiratoryInfection => "acute respiratory infection",
        }
    }

    /// Generates this family's records. `preceding` is the number of records
    /// already produced by earlier families.
    pub fn generate<R: Rng + ?Sized>(
        self,
        synth: &mut Synthesizer<'_, R>,
        count: usize,
        preceding: usize,
    ) -> Vec<PatientRecord> {
        let count = match self {
            ConditionFamily::Tuberculosis => tuberculosis_case_count(count, preceding + count),
            _ => count,
        };

        (0..count)
            .map(|_| {
                let overrides = self.draw_overrides(synth);
                synth.synthesize(overrides)
            })
            .collect()
    }

    fn draw_overrides<R: Rng + ?Sized>(self, synth: &mut Synthesizer<'_, R>) -> RecordOverrides {
        let p = self.prevalence();
        let rng = synth.rng();
        match self {
            ConditionFamily::FebrileIllness => febrile_illness(rng, p),
            ConditionFamily::DiarrhealDisease => diarrheal_disease(rng, p),
            ConditionFamily::Stunting => stunting(rng, p),
            ConditionFamily::Wasting => wasting(rng, p),
            ConditionFamily::Tuberculosis => tuberculosis(rng),
            ConditionFamily::ObstetricComplication => obstetric(rng, p),
            ConditionFamily::Hypertension => hypertension(rng, p),
            ConditionFamily::Diabetes => diabetes(rng, p),
            ConditionFamily::Immunization => immunization(rng, p),
            ConditionFamily::RespiratoryInfection => respiratory_infection(rng, p),
        }
    }
}

/// Number of tuberculosis cases: the incidence scaled by the running record
/// total, never fewer than one unless `count` is zero.
pub fn tuberculosis_case_count(count: usize, running_total: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let count_f = count as f64;
    let expected = count_f
        * (TB_INCIDENCE_PER_100K / 100_000.0)
        * (running_total as f64 / count_f * TB_SCALING);
    (expected.round() as usize).max(1)
}

/// Generates every family, shuffles the result uniformly and applies the
/// cohort cap.
pub fn assemble_cohort<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    config: &CohortConfig,
) -> Vec<PatientRecord> {
    let mut synth = Synthesizer::new(&mut *rng, today).with_lookback(config.lookback_days);
    let mut records = Vec::new();

    for family in ConditionFamily::ALL {
        let generated = family.generate(&mut synth, config.per_condition_count, records.len());
        debug!("generated {} {} records", generated.len(), family.name());
        records.extend(generated);
    }

    records.shuffle(&mut *rng);
    records.truncate(config.max_cohort_size);
    debug!("assembled cohort of {} records", records.len());
    records
}

fn febrile_illness<R: Rng + ?Sized>(rng: &mut R, p: f64) -> RecordOverrides {
    let affected = chance(rng, p);
    let vitals = Vitals {
        temperature: Some(if affected {
            float_between(rng, 38.0, 40.5, 1)
        } else {
            float_between(rng, 36.5, 37.5, 1)
        }),
        blood_pressure: Some(blood_pressure(rng, (90, 130), (60, 85))),
        heart_rate: Some(if affected {
            int_between(rng, 90, 120)
        } else {
            int_between(rng, 60, 100)
        }),
        respiratory_rate: None,
    };

    if affected {
        let image_analysis = if chance(rng, 0.3) {
            ImageAnalysis::finding("Possible Dengue Rash", float_between(rng, 0.6, 0.85, 2))
        } else {
            ImageAnalysis::none()
        };
        RecordOverrides {
            vitals: Some(vitals),
            symptoms_text: Some(
                "High fever, headache, body aches, chills. Possible skin rash.".into(),
            ),
            image_placeholder: Some(
                "Photo of patient appearing flushed, possible faint rash on arm.".into(),
            ),
            condition: Some(Condition::FebrileIllness),
            risk_score: Some(int_between(rng, 6, 9)),
            triage_category: Some("Vector-borne / Infectious Disease".into()),
            image_analysis: Some(image_analysis),
            ..RecordOverrides::default()
        }
    } else {
        RecordOverrides {
            vitals: Some(vitals),
            symptoms_text: Some("General weakness, mild cough.".into()),
            image_placeholder: Some("General observation photo.".into()),
            condition: Some(Condition::MildViralInfection),
            risk_score: Some(int_between(rng, 2, 4)),
            triage_category: Some("General Acute".into()),
            image_analysis: Some(ImageAnalysis::none()),
            ..RecordOverrides::default()
        }
    }
}

fn diarrheal_disease<R: Rng + ?Sized>(rng: &mut R, p: f64) -> RecordOverrides {
    let age = int_between(rng, 0, 4);
    let affected = chance(rng, p);
    let temperature = if affected {
        float_between(rng, 37.0, 38.5, 1)
    } else {
        float_between(rng, 36.5, 37.2, 1)
    };
    let vitals = Some(Vitals {
        temperature: Some(temperature),
        ..Vitals::default()
    });

    if affected {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some(
                "Multiple loose stools per day, abdominal cramps, dehydration signs.".into(),
            ),
            image_placeholder: Some(
                "Photo showing signs of dehydration (e.g., sunken eyes).".into(),
            ),
            condition: Some(Condition::AcuteDiarrhealDisease),
            risk_score: Some(int_between(rng, 5, 8)),
            triage_category: Some("Gastrointestinal / Pediatric".into()),
            vitals,
            ..RecordOverrides::default()
        }
    } else {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some("Normal bowel movements, playful.".into()),
            image_placeholder: Some("Child playing.".into()),
            condition: Some(Condition::HealthyChildCheckup),
            risk_score: Some(int_between(rng, 1, 3)),
            triage_category: Some("Pediatric Wellness".into()),
            vitals,
            ..RecordOverrides::default()
        }
    }
}

fn stunting<R: Rng + ?Sized>(rng: &mut R, p: f64) -> RecordOverrides {
    let age = int_between(rng, 1, 4);
    if chance(rng, p) {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some("Appears small for age, recurrent minor illnesses.".into()),
            condition: Some(Condition::PossibleStunting),
            risk_score: Some(int_between(rng, 3, 6)),
            triage_category: Some("Nutritional / Pediatric Chronic".into()),
            image_placeholder: Some("Full body photo for growth assessment.".into()),
            ..RecordOverrides::default()
        }
    } else {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some("Normal growth observed, active.".into()),
            condition: Some(Condition::RoutineChildCheckup),
            risk_score: Some(int_between(rng, 1, 2)),
            triage_category: Some("Pediatric Wellness".into()),
            image_placeholder: Some("Child smiling.".into()),
            ..RecordOverrides::default()
        }
    }
}

fn wasting<R: Rng + ?Sized>(rng: &mut R, p: f64) -> RecordOverrides {
    let age = int_between(rng, 0, 4);
    if chance(rng, p) {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some("Appears very thin, low energy, poor appetite.".into()),
            condition: Some(Condition::PossibleWasting),
            risk_score: Some(int_between(rng, 6, 9)),
            triage_category: Some("Nutritional Emergency / Pediatric Acute".into()),
            image_placeholder: Some("Photo showing thin limbs and visible ribs.".into()),
            ..RecordOverrides::default()
        }
    } else {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some("Healthy weight, energetic.".into()),
            condition: Some(Condition::RoutineChildCheckup),
            risk_score: Some(int_between(rng, 1, 2)),
            triage_category: Some("Pediatric Wellness".into()),
            image_placeholder: Some("Child engaged in activity.".into()),
            ..RecordOverrides::default()
        }
    }
}

fn tuberculosis<R: Rng + ?Sized>(rng: &mut R) -> RecordOverrides {
    let age = int_between(rng, 15, 65);
    let image_analysis = if chance(rng, 0.4) {
        ImageAnalysis::finding(
            "Possible Lung Infiltrates (X-Ray simulation)",
            float_between(rng, 0.65, 0.9, 2),
        )
    } else {
        ImageAnalysis::none()
    };

    RecordOverrides {
        age: Some(age),
        symptoms_text: Some(
            "Persistent cough for >2 weeks, fever, night sweats, weight loss, chest pain.".into(),
        ),
        image_placeholder: Some(
            "Chest X-ray placeholder or photo of patient looking unwell.".into(),
        ),
        condition: Some(Condition::SuspectedTuberculosis),
        risk_score: Some(int_between(rng, 7, 10)),
        triage_category: Some("Respiratory / Infectious Disease Chronic".into()),
        image_analysis: Some(image_analysis),
        vitals: Some(Vitals {
            temperature: Some(float_between(rng, 37.5, 38.8, 1)),
            respiratory_rate: Some(int_between(rng, 20, 28)),
            ..Vitals::default()
        }),
        ..RecordOverrides::default()
    }
}

fn obstetric<R: Rng + ?Sized>(rng: &mut R, p: f64) -> RecordOverrides {
    let complicated = chance(rng, p);
    let age = int_between(rng, 18, 40);
    if complicated {
        return RecordOverrides {
            age: Some(age),
            gender: Some(Gender::Female),
            symptoms_text: Some(
                "Pregnant. Experiencing severe headache, blurred vision, abdominal pain, and swelling."
                    .into(),
            ),
            image_placeholder: Some(
                "Photo of pregnant woman, focus on facial swelling or discomfort.".into(),
            ),
            condition: Some(Condition::ObstetricComplication),
            risk_score: Some(int_between(rng, 8, 10)),
            triage_category: Some("Maternal Health Emergency".into()),
            vitals: Some(Vitals {
                blood_pressure: Some(blood_pressure(rng, (140, 180), (90, 110))),
                temperature: Some(float_between(rng, 36.5, 37.5, 1)),
                ..Vitals::default()
            }),
            ..RecordOverrides::default()
        };
    }

    let antenatal = chance(rng, 0.3);
    let (symptoms, condition, triage) = if antenatal {
        (
            "Routine pregnancy checkup, mild fatigue.",
            Condition::RoutineAntenatalCare,
            "Maternal Health Wellness",
        )
    } else {
        (
            "General checkup, no major complaints.",
            Condition::GeneralAdultFemaleCheckup,
            "General Adult",
        )
    };
    RecordOverrides {
        age: Some(age),
        gender: Some(Gender::Female),
        symptoms_text: Some(symptoms.into()),
        condition: Some(condition),
        risk_score: Some(int_between(rng, 1, 3)),
        triage_category: Some(triage.into()),
        ..RecordOverrides::default()
    }
}

fn hypertension<R: Rng + ?Sized>(rng: &mut R, p: f64) -> RecordOverrides {
    let age = int_between(rng, 18, 69);
    let affected = chance(rng, p);
    let vitals = Vitals {
        blood_pressure: Some(if affected {
            blood_pressure(rng, (140, 180), (90, 110))
        } else {
            blood_pressure(rng, (100, 125), (65, 85))
        }),
        heart_rate: Some(int_between(rng, 60, 90)),
        ..Vitals::default()
    };

    if affected {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some(
                "Occasional headaches, dizziness, chest discomfort. Often asymptomatic.".into(),
            ),
            vitals: Some(vitals),
            condition: Some(Condition::Hypertension),
            risk_score: Some(int_between(rng, 5, 8)),
            triage_category: Some("Cardiovascular / Chronic Disease".into()),
            ..RecordOverrides::default()
        }
    } else {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some("Feeling well, no specific complaints.".into()),
            vitals: Some(vitals),
            condition: Some(Condition::NormotensiveAdult),
            risk_score: Some(int_between(rng, 1, 3)),
            triage_category: Some("General Adult Wellness".into()),
            ..RecordOverrides::default()
        }
    }
}

fn diabetes<R: Rng + ?Sized>(rng: &mut R, p: f64) -> RecordOverrides {
    let age = int_between(rng, 25, 70);
    if !chance(rng, p) {
        return RecordOverrides {
            age: Some(age),
            symptoms_text: Some("No specific diabetic symptoms reported.".into()),
            image_placeholder: Some("General observation.".into()),
            condition: Some(Condition::NonDiabeticAdult),
            risk_score: Some(int_between(rng, 1, 3)),
            triage_category: Some("General Adult Wellness".into()),
            image_analysis: Some(ImageAnalysis::none()),
            ..RecordOverrides::default()
        };
    }

    let foot_ulcer = chance(rng, 0.2);
    let (placeholder, image_analysis) = if foot_ulcer {
        (
            "Photo of a foot ulcer or skin infection.",
            ImageAnalysis::finding(
                "Possible Diabetic Foot Ulcer",
                float_between(rng, 0.7, 0.9, 2),
            ),
        )
    } else {
        ("General observation.", ImageAnalysis::none())
    };
    RecordOverrides {
        age: Some(age),
        symptoms_text: Some(
            "Increased thirst, frequent urination, fatigue, blurred vision, slow healing wounds."
                .into(),
        ),
        image_placeholder: Some(placeholder.into()),
        condition: Some(Condition::DiabetesMellitus),
        risk_score: Some(int_between(rng, 6, 9)),
        triage_category: Some("Endocrine / Chronic Disease".into()),
        image_analysis: Some(image_analysis),
        ..RecordOverrides::default()
    }
}

fn immunization<R: Rng + ?Sized>(rng: &mut R, p: f64) -> RecordOverrides {
    let age_in_months: u8 = int_between(rng, 12, 23);
    let fully_immunized = chance(rng, p);
    let status = if fully_immunized {
        "Fully Immunized"
    } else {
        "Partially or Not Immunized"
    };

    RecordOverrides {
        age: Some(age_in_months / 12),
        symptoms_text: Some(format!(
            "Child aged {age_in_months} months. Immunization status: {status}."
        )),
        condition: Some(Condition::ImmunizationStatusCheck),
        risk_score: Some(if fully_immunized {
            1
        } else {
            int_between(rng, 3, 5)
        }),
        triage_category: Some("Pediatric Wellness / Preventive Health".into()),
        ..RecordOverrides::default()
    }
}

fn respiratory_infection<R: Rng + ?Sized>(rng: &mut R, p: f64) -> RecordOverrides {
    let age = int_between(rng, 0, 4);
    let affected = chance(rng, p);
    let vitals = Vitals {
        temperature: Some(if affected {
            float_between(rng, 37.5, 39.5, 1)
        } else {
            float_between(rng, 36.5, 37.2, 1)
        }),
        respiratory_rate: Some(if affected {
            int_between(rng, 30, 50)
        } else {
            int_between(rng, 20, 30)
        }),
        ..Vitals::default()
    };

    if affected {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some("Cough, difficulty breathing, fever, runny nose.".into()),
            image_placeholder: Some(
                "Video/audio placeholder of child coughing or showing labored breathing.".into(),
            ),
            condition: Some(Condition::AcuteRespiratoryInfection),
            risk_score: Some(int_between(rng, 4, 7)),
            triage_category: Some("Respiratory / Pediatric Acute".into()),
            vitals: Some(vitals),
            ..RecordOverrides::default()
        }
    } else {
        RecordOverrides {
            age: Some(age),
            symptoms_text: Some("No respiratory symptoms.".into()),
            image_placeholder: Some("Child breathing normally.".into()),
            condition: Some(Condition::HealthyChild),
            risk_score: Some(int_between(rng, 1, 2)),
            triage_category: Some("Pediatric Wellness".into()),
            vitals: Some(vitals),
            ..RecordOverrides::default()
        }
    }
}
