use mediscout_core::{Condition, ImageDescriptor, MatcherConfig};
use mediscout_engine::matcher::advice_for;
use mediscout_engine::SymptomMatcher;
use proptest::prelude::*;

#[test]
fn fever_and_rash_point_to_febrile_illness() {
    let prediction = SymptomMatcher::default().predict("High fever, headache, rash for 3 days", None);

    assert_eq!(prediction.prediction, Condition::FebrileIllness);
    assert_eq!(prediction.confidence, 0.85);
    assert_eq!(prediction.advice, advice_for(Condition::FebrileIllness));
    assert_eq!(prediction.image_analysis, "No image submitted for analysis.");
}

#[test]
fn empty_text_falls_back_to_general_checkup() {
    let prediction = SymptomMatcher::default().predict("", None);
    assert_eq!(prediction.prediction, Condition::GeneralCheckup);
    assert_eq!(prediction.confidence, 0.4);
    assert!(prediction.advice.starts_with("Your symptoms require a general check-up."));
}

#[test]
fn cough_ties_resolve_to_the_first_condition() {
    // tuberculosis and respiratory infection both score 2; tuberculosis is listed first
    let prediction = SymptomMatcher::default().predict("Persistent cough", None);
    assert_eq!(prediction.prediction, Condition::SuspectedTuberculosis);
    assert_eq!(prediction.confidence, 0.7);
}

#[test]
fn loose_motion_counts_as_diarrhea() {
    let matcher = SymptomMatcher::default();
    for text in ["loose motion since morning", "watery DIARRHEA"] {
        assert_eq!(
            matcher.predict(text, None).prediction,
            Condition::AcuteDiarrhealDisease,
            "{text}"
        );
    }
}

#[test]
fn label_words_raise_confidence_up_to_the_cap() {
    let prediction = SymptomMatcher::default().predict(
        "acute diarrheal disease with loose motion",
        None,
    );
    assert_eq!(prediction.prediction, Condition::AcuteDiarrhealDisease);
    assert_eq!(prediction.confidence, 0.95);
}

#[test]
fn image_name_is_echoed_in_the_analysis() {
    let image = ImageDescriptor::named("Rash_Photo.PNG");
    let prediction = SymptomMatcher::default().predict("itchy skin", Some(&image));

    // the photo alone boosts the vector-borne label
    assert_eq!(prediction.prediction, Condition::FebrileIllness);
    assert_eq!(
        prediction.image_analysis,
        "Simulated analysis of Rash_Photo.PNG: Possible signs consistent with Febrile Illness."
    );
}

#[test]
fn non_photo_attachments_do_not_boost() {
    let image = ImageDescriptor::named("report.pdf");
    let prediction = SymptomMatcher::default().predict("itchy skin", Some(&image));
    assert_eq!(prediction.prediction, Condition::GeneralCheckup);
    assert!(prediction
        .image_analysis
        .ends_with("consistent with General Checkup."));
}

#[test]
fn prediction_serializes_with_the_full_label() {
    let prediction = SymptomMatcher::default().predict("fever", None);
    let json = serde_json::to_value(&prediction).unwrap();
    assert_eq!(json["prediction"], "Febrile Illness (Suspected Vector-borne)");
    assert_eq!(json["imageAnalysis"], "No image submitted for analysis.");
}

proptest! {
    #[test]
    fn confidence_stays_in_range(text in ".{0,200}") {
        let prediction = SymptomMatcher::default().predict(&text, None);
        prop_assert!(prediction.confidence >= 0.4);
        prop_assert!(prediction.confidence <= 0.95);
        let cents = prediction.confidence * 100.0;
        prop_assert!((cents - cents.round()).abs() < 1e-6);
    }

    #[test]
    fn prediction_is_deterministic(text in "[a-z ,]{0,80}") {
        let matcher = SymptomMatcher::default();
        prop_assert_eq!(matcher.predict(&text, None), matcher.predict(&text, None));
    }
}

#[cfg(feature = "latency")]
#[tokio::test]
async fn delayed_prediction_matches_the_immediate_one() {
    let matcher = SymptomMatcher::new(MatcherConfig { latency_ms: 5 });
    let started = std::time::Instant::now();
    let delayed = matcher.predict_with_latency("fever", None).await;

    assert!(started.elapsed() >= std::time::Duration::from_millis(5));
    assert_eq!(delayed, matcher.predict("fever", None));
}

#[test]
fn default_latency_is_one_and_a_half_seconds() {
    assert_eq!(SymptomMatcher::default().config().latency_ms, 1500);
    let matcher = SymptomMatcher::new(MatcherConfig { latency_ms: 0 });
    assert_eq!(matcher.config().latency_ms, 0);
}
