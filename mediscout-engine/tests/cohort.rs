use chrono::NaiveDate;
use mediscout_core::{CohortConfig, Condition, Gender, ImageAnalysis, Vitals};
use mediscout_engine::{assemble_cohort, tuberculosis_case_count, RecordOverrides, Synthesizer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod common;
use common::assert_in_domain;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

#[test]
fn default_cohort_has_every_family_and_valid_records() {
    let mut rng = ChaCha8Rng::seed_from_u64(2026);
    let cohort = assemble_cohort(&mut rng, today(), &CohortConfig::default());

    // nine families of 15 plus a single tuberculosis case
    assert_eq!(cohort.len(), 136);
    for record in &cohort {
        assert_in_domain(record, today());
    }
    assert_eq!(
        cohort
            .iter()
            .filter(|r| r.condition_assigned == Condition::SuspectedTuberculosis)
            .count(),
        1
    );
    assert_eq!(
        cohort
            .iter()
            .filter(|r| r.condition_assigned == Condition::ImmunizationStatusCheck)
            .count(),
        15
    );
}

#[test]
fn cohort_is_capped() {
    let config = CohortConfig {
        per_condition_count: 30,
        ..CohortConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let cohort = assemble_cohort(&mut rng, today(), &config);
    assert_eq!(cohort.len(), 200);
}

#[test]
fn same_seed_yields_same_cohort() {
    let config = CohortConfig::default();
    let a = assemble_cohort(&mut ChaCha8Rng::seed_from_u64(9), today(), &config);
    let b = assemble_cohort(&mut ChaCha8Rng::seed_from_u64(9), today(), &config);
    let c = assemble_cohort(&mut ChaCha8Rng::seed_from_u64(10), today(), &config);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn cohort_is_shuffled_across_families() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let cohort = assemble_cohort(&mut rng, today(), &CohortConfig::default());
    let head_is_all_febrile = cohort.iter().take(15).all(|r| {
        matches!(
            r.condition_assigned,
            Condition::FebrileIllness | Condition::MildViralInfection
        )
    });
    assert!(!head_is_all_febrile);
}

#[test]
fn prevalence_matches_family_assumptions() {
    let config = CohortConfig {
        per_condition_count: 4000,
        max_cohort_size: usize::MAX,
        ..CohortConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let cohort = assemble_cohort(&mut rng, today(), &config);

    let share = |affected: Condition, baseline: Condition| {
        let hits = cohort
            .iter()
            .filter(|r| r.condition_assigned == affected)
            .count() as f64;
        let misses = cohort
            .iter()
            .filter(|r| r.condition_assigned == baseline)
            .count() as f64;
        hits / (hits + misses)
    };

    let febrile = share(Condition::FebrileIllness, Condition::MildViralInfection);
    assert!((febrile - 0.25).abs() < 0.03, "febrile share {febrile}");
    let hypertension = share(Condition::Hypertension, Condition::NormotensiveAdult);
    assert!((hypertension - 0.373).abs() < 0.03, "hypertension share {hypertension}");
    let ari = share(Condition::AcuteRespiratoryInfection, Condition::HealthyChild);
    assert!((ari - 0.75).abs() < 0.03, "ari share {ari}");
}

#[test]
fn family_specific_fields_follow_the_branch() {
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let cohort = assemble_cohort(&mut rng, today(), &CohortConfig::default());

    for record in &cohort {
        match record.condition_assigned {
            Condition::FebrileIllness => {
                let temperature = record.vitals.temperature.expect("febrile temperature");
                assert!(temperature >= 38.0);
                assert!((6..=9).contains(&record.simulated_risk_score));
                assert_eq!(record.vitals.respiratory_rate, None);
            }
            Condition::AcuteDiarrhealDisease | Condition::HealthyChildCheckup => {
                assert!(record.age <= 4);
                assert_eq!(record.vitals.blood_pressure, None);
                assert!(record.vitals.temperature.is_some());
            }
            Condition::SuspectedTuberculosis => {
                assert!((15..=65).contains(&record.age));
                assert!(record.simulated_risk_score >= 7);
                assert!(record.vitals.respiratory_rate.unwrap() >= 20);
            }
            Condition::ObstetricComplication => {
                let (sys, dia) = record.vitals.blood_pressure_values().unwrap();
                assert!(sys >= 140 && dia >= 90);
                assert_eq!(record.gender, Gender::Female);
            }
            Condition::ImmunizationStatusCheck => {
                assert_eq!(record.age, 1);
                assert!(record.symptoms_text.starts_with("Child aged "));
            }
            Condition::Hypertension => {
                let (sys, _) = record.vitals.blood_pressure_values().unwrap();
                assert!(sys >= 140);
            }
            _ => {}
        }
    }
}

#[test]
fn foot_ulcer_photo_and_finding_come_together() {
    let config = CohortConfig {
        per_condition_count: 600,
        max_cohort_size: usize::MAX,
        ..CohortConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let cohort = assemble_cohort(&mut rng, today(), &config);

    let diabetic: Vec<_> = cohort
        .iter()
        .filter(|r| r.condition_assigned == Condition::DiabetesMellitus)
        .collect();
    assert!(!diabetic.is_empty());
    let mut ulcers = 0;
    for record in &diabetic {
        let photo = record.image_placeholder == "Photo of a foot ulcer or skin infection.";
        let finding = record.simulated_ai_image_analysis.finding == "Possible Diabetic Foot Ulcer";
        assert_eq!(photo, finding, "record {}", record.id);
        if photo {
            ulcers += 1;
            assert!((0.7..=0.9).contains(&record.simulated_ai_image_analysis.confidence));
        } else {
            assert_eq!(record.simulated_ai_image_analysis.confidence, 0.0);
        }
    }
    assert!(ulcers > 0 && ulcers < diabetic.len());
}

#[test]
fn tuberculosis_count_scales_with_running_total() {
    assert_eq!(tuberculosis_case_count(15, 75), 1);
    assert_eq!(tuberculosis_case_count(100, 500), 6);
    assert_eq!(tuberculosis_case_count(1, 1), 1);
    assert_eq!(tuberculosis_case_count(0, 60), 0);
}

#[test]
fn overrides_replace_nested_objects_wholesale() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut synth = Synthesizer::new(&mut rng, today());

    let record = synth.synthesize(RecordOverrides {
        vitals: Some(Vitals {
            temperature: Some(38.4),
            ..Vitals::default()
        }),
        ..RecordOverrides::default()
    });

    assert_eq!(record.vitals.temperature, Some(38.4));
    assert_eq!(record.vitals.heart_rate, None);
    assert_eq!(record.vitals.blood_pressure, None);
    assert_eq!(record.condition_assigned, Condition::GeneralCheckup);
    assert_eq!(record.simulated_ai_image_analysis, ImageAnalysis::none());
}

#[test]
fn template_defaults_are_complete() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut synth = Synthesizer::new(&mut rng, today());
    let record = synth.synthesize(RecordOverrides::default());

    assert_in_domain(&record, today());
    assert!((1..=3).contains(&record.simulated_risk_score));
    assert_eq!(record.simulated_ai_triage_category, "Non-urgent");
    assert_eq!(record.image_placeholder, "No specific image noted.");
    let vitals = &record.vitals;
    assert!(vitals.temperature.is_some());
    assert!(vitals.blood_pressure_values().is_some());
    assert!(vitals.heart_rate.is_some());
    assert!(vitals.respiratory_rate.is_some());
}

#[test]
fn maternal_conditions_force_female() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut synth = Synthesizer::new(&mut rng, today());

    for condition in [
        Condition::ObstetricComplication,
        Condition::RoutineAntenatalCare,
        Condition::GeneralAdultFemaleCheckup,
    ] {
        let record = synth.synthesize(RecordOverrides {
            gender: Some(Gender::Male),
            condition: Some(condition),
            ..RecordOverrides::default()
        });
        assert_eq!(record.gender, Gender::Female);
    }

    let record = synth.synthesize(RecordOverrides {
        gender: Some(Gender::Male),
        condition: Some(Condition::Hypertension),
        ..RecordOverrides::default()
    });
    assert_eq!(record.gender, Gender::Male);
}

#[test]
fn records_serialize_with_camel_case_keys_in_order() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let cohort = assemble_cohort(&mut rng, today(), &CohortConfig::default());
    let value = serde_json::to_value(&cohort[0]).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        [
            "id",
            "date",
            "age",
            "gender",
            "location",
            "symptomsText",
            "vitals",
            "imagePlaceholder",
            "conditionAssigned",
            "simulatedRiskScore",
            "simulatedAiTriageCategory",
            "simulatedAiImageAnalysis",
        ]
    );
}
