//! Search, filter and sort over a cohort for the data explorer table.

use std::cmp::Ordering;

use mediscout_core::{Condition, PatientRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    Date,
    Age,
    Gender,
    Location,
    ConditionAssigned,
    SimulatedRiskScore,
    SimulatedAiTriageCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplorerQuery {
    /// Case-insensitive substring matched against text and numeric fields.
    pub search: Option<String>,
    pub condition: Option<Condition>,
    pub sort_key: Option<SortKey>,
    pub direction: SortDirection,
}

/// Records matching `query`, sorted as requested. The sort is stable, so
/// ties keep cohort order.
pub fn explore<'a>(records: &'a [PatientRecord], query: &ExplorerQuery) -> Vec<&'a PatientRecord> {
    let needle = query
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|needle| !needle.is_empty());

    let mut matches: Vec<&PatientRecord> = records
        .iter()
        .filter(|record| {
            needle
                .as_deref()
                .map_or(true, |needle| matches_search(record, needle))
        })
        .filter(|record| {
            query
                .condition
                .map_or(true, |condition| record.condition_assigned == condition)
        })
        .collect();

    if let Some(key) = query.sort_key {
        matches.sort_by(|a, b| {
            let ordering = compare_by(a, b, key);
            match query.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    matches
}

/// Distinct conditions in first-seen order, for the filter dropdown.
pub fn distinct_conditions(records: &[PatientRecord]) -> Vec<Condition> {
    let mut conditions = Vec::new();
    for record in records {
        if !conditions.contains(&record.condition_assigned) {
            conditions.push(record.condition_assigned);
        }
    }
    conditions
}

fn matches_search(record: &PatientRecord, needle: &str) -> bool {
    let date = record.date.to_string();
    let age = record.age.to_string();
    let risk = record.simulated_risk_score.to_string();
    let fields = [
        record.id.as_str(),
        date.as_str(),
        age.as_str(),
        record.gender.as_str(),
        record.location.as_str(),
        record.symptoms_text.as_str(),
        record.image_placeholder.as_str(),
        record.condition_assigned.label(),
        risk.as_str(),
        record.simulated_ai_triage_category.as_str(),
    ];
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn compare_by(a: &PatientRecord, b: &PatientRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Age => a.age.cmp(&b.age),
        SortKey::Gender => a.gender.as_str().cmp(b.gender.as_str()),
        SortKey::Location => a.location.as_str().cmp(b.location.as_str()),
        SortKey::ConditionAssigned => a
            .condition_assigned
            .label()
            .cmp(b.condition_assigned.label()),
        SortKey::SimulatedRiskScore => a.simulated_risk_score.cmp(&b.simulated_risk_score),
        SortKey::SimulatedAiTriageCategory => a
            .simulated_ai_triage_category
            .cmp(&b.simulated_ai_triage_category),
    }
}
