use chrono::{Duration, NaiveDate};
use mediscout_core::{Gender, Location, PatientRecord};

/// Field domains every generated record must satisfy.
pub fn assert_in_domain(record: &PatientRecord, today: NaiveDate) {
    assert_eq!(record.id.len(), 9, "id {}", record.id);
    assert!(record.date <= today && record.date >= today - Duration::days(60));
    assert!(record.age <= 80, "age {}", record.age);
    assert!((1..=10).contains(&record.simulated_risk_score));
    assert!(Gender::ALL.contains(&record.gender));
    assert!(Location::ALL.contains(&record.location));
    assert!((0.0..=1.0).contains(&record.simulated_ai_image_analysis.confidence));
    assert!(!record.simulated_ai_triage_category.is_empty());
    assert!(!record.image_placeholder.is_empty());
    if record.condition_assigned.is_maternal() {
        assert_eq!(record.gender, Gender::Female);
    }
}
