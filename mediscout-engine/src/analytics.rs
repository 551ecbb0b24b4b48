//! Aggregates behind the health-worker dashboards.

use mediscout_core::{Location, PatientRecord};
use serde::{Deserialize, Serialize};

/// Hours to flag a high-risk case without AI triage (assumed baseline).
pub const BASELINE_HOURS_TO_IDENTIFY: u32 = 72;
/// Hours to flag a high-risk case with AI triage (assumed).
pub const AI_HOURS_TO_IDENTIFY: u32 = 6;
/// Share of high-risk cases the simulated AI is assumed to catch.
const AI_DETECTION_RATE: f64 = 0.9;
/// Conditions shown on the distribution chart.
pub const TOP_CONDITIONS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_patients: usize,
    pub high_risk_patients: usize,
    pub most_common_condition: String,
    pub most_common_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationCount {
    pub location: Location,
    pub count: usize,
    pub high_risk: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetrics {
    pub total_high_risk: usize,
    pub ai_identified_high_risk: usize,
    /// Percentage with one decimal.
    pub identification_rate: f64,
    pub avg_hours_to_identify_baseline: u32,
    pub avg_hours_to_identify_ai: u32,
    pub hours_saved_per_case: u32,
}

/// Everything the dashboard charts need, computed in one pass over the cohort.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CohortAnalytics {
    pub summary: DashboardSummary,
    pub top_conditions: Vec<CountEntry>,
    pub risk_bands: Vec<CountEntry>,
    pub age_groups: Vec<CountEntry>,
    pub genders: Vec<CountEntry>,
    pub locations: Vec<LocationCount>,
    pub impact: ImpactMetrics,
}

/// Risk band used for the score distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn of(score: u8) -> Self {
        match score {
            7.. => RiskBand::High,
            4..=6 => RiskBand::Medium,
            _ => RiskBand::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "Low Risk (1-3)",
            RiskBand::Medium => "Medium Risk (4-6)",
            RiskBand::High => "High Risk (7-10)",
        }
    }
}

const AGE_GROUPS: [(&str, u8); 5] = [
    ("0-5 yrs", 5),
    ("6-17 yrs", 17),
    ("18-40 yrs", 40),
    ("41-65 yrs", 65),
    ("65+ yrs", u8::MAX),
];

pub fn cohort_analytics(records: &[PatientRecord]) -> CohortAnalytics {
    CohortAnalytics {
        summary: dashboard_summary(records),
        top_conditions: condition_distribution(records, TOP_CONDITIONS),
        risk_bands: risk_distribution(records),
        age_groups: age_distribution(records),
        genders: gender_distribution(records),
        locations: location_distribution(records),
        impact: impact_metrics(records),
    }
}

pub fn dashboard_summary(records: &[PatientRecord]) -> DashboardSummary {
    let conditions = condition_distribution(records, 1);
    let (most_common_condition, most_common_count) = conditions
        .into_iter()
        .next()
        .map(|entry| (entry.label, entry.count))
        .unwrap_or_else(|| ("N/A".to_string(), 0));

    DashboardSummary {
        total_patients: records.len(),
        high_risk_patients: records.iter().filter(|r| r.is_high_risk()).count(),
        most_common_condition,
        most_common_count,
    }
}

/// The `limit` most frequent conditions, ties in first-seen order.
pub fn condition_distribution(records: &[PatientRecord], limit: usize) -> Vec<CountEntry> {
    let mut counts = tally(records.iter().map(|r| r.condition_assigned.label()));
    counts.truncate(limit);
    counts
}

/// Counts per risk band, low to high, omitting empty bands.
pub fn risk_distribution(records: &[PatientRecord]) -> Vec<CountEntry> {
    let mut bands = [0usize; 3];
    for record in records {
        bands[RiskBand::of(record.simulated_risk_score) as usize] += 1;
    }
    [RiskBand::Low, RiskBand::Medium, RiskBand::High]
        .into_iter()
        .zip(bands)
        .filter(|(_, count)| *count > 0)
        .map(|(band, count)| CountEntry {
            label: band.label().to_string(),
            count,
        })
        .collect()
}

/// Counts per age group; every group is present, possibly with zero.
pub fn age_distribution(records: &[PatientRecord]) -> Vec<CountEntry> {
    if records.is_empty() {
        return Vec::new();
    }
    let mut counts = [0usize; AGE_GROUPS.len()];
    for record in records {
        if let Some(index) = AGE_GROUPS.iter().position(|(_, max)| record.age <= *max) {
            counts[index] += 1;
        }
    }
    AGE_GROUPS
        .iter()
        .zip(counts)
        .map(|((label, _), count)| CountEntry {
            label: label.to_string(),
            count,
        })
        .collect()
}

pub fn gender_distribution(records: &[PatientRecord]) -> Vec<CountEntry> {
    tally(records.iter().map(|r| r.gender.as_str()))
}

/// Cases and high-risk cases per location, busiest first.
pub fn location_distribution(records: &[PatientRecord]) -> Vec<LocationCount> {
    let mut entries: Vec<LocationCount> = Vec::new();
    for record in records {
        let high_risk = usize::from(record.is_high_risk());
        match entries.iter_mut().find(|e| e.location == record.location) {
            Some(entry) => {
                entry.count += 1;
                entry.high_risk += high_risk;
            }
            None => entries.push(LocationCount {
                location: record.location,
                count: 1,
                high_risk,
            }),
        }
    }
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

pub fn impact_metrics(records: &[PatientRecord]) -> ImpactMetrics {
    let total_high_risk = records.iter().filter(|r| r.is_high_risk()).count();
    let ai_identified_high_risk = (total_high_risk as f64 * AI_DETECTION_RATE).round() as usize;
    let identification_rate = if total_high_risk > 0 {
        let rate = ai_identified_high_risk as f64 / total_high_risk as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    } else {
        0.0
    };

    ImpactMetrics {
        total_high_risk,
        ai_identified_high_risk,
        identification_rate,
        avg_hours_to_identify_baseline: BASELINE_HOURS_TO_IDENTIFY,
        avg_hours_to_identify_ai: AI_HOURS_TO_IDENTIFY,
        hours_saved_per_case: if records.is_empty() {
            0
        } else {
            BASELINE_HOURS_TO_IDENTIFY - AI_HOURS_TO_IDENTIFY
        },
    }
}

/// Counts labels, most frequent first; equal counts keep first-seen order.
fn tally<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<CountEntry> {
    let mut counts: Vec<CountEntry> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(CountEntry {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
