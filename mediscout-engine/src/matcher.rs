//! Simulated AI: a deterministic keyword scorer that maps free-text symptoms
//! to the closest condition label and canned advice.

use mediscout_core::random::round_to;
use mediscout_core::{Condition, ImageDescriptor, MatcherConfig, Prediction};

const DEFAULT_ADVICE: &str = "Your symptoms require a general check-up. Please consult a healthcare professional for accurate diagnosis and advice. Maintain good hygiene and a healthy lifestyle.";
const NO_IMAGE_ANALYSIS: &str = "No image submitted for analysis.";

const BASE_CONFIDENCE: f64 = 0.4;
const CONFIDENCE_PER_POINT: f64 = 0.15;
const MAX_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Default)]
pub struct SymptomMatcher {
    config: MatcherConfig,
}

impl SymptomMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Scores `symptoms` against every known condition. The first condition
    /// reaching the highest score wins; with no keyword hit at all the
    /// prediction falls back to a coarse fever/cough rule.
    pub fn predict(&self, symptoms: &str, image: Option<&ImageDescriptor>) -> Prediction {
        let text = symptoms.to_lowercase();
        let has_photo = image.is_some_and(ImageDescriptor::is_photo);

        let mut predicted = Condition::GeneralCheckup;
        let mut best_score = 0u32;
        for condition in Condition::ALL {
            let score = score_condition(condition, &text, has_photo);
            if score > best_score {
                best_score = score;
                predicted = condition;
            }
        }

        if best_score < 1 {
            predicted = if text.contains("fever") {
                Condition::FebrileIllness
            } else if text.contains("cough") {
                Condition::AcuteRespiratoryInfection
            } else {
                Condition::GeneralCheckup
            };
        }

        // The fallback keeps the original score, so its confidence stays at
        // the base value.
        let confidence = round_to(
            (f64::from(best_score) * CONFIDENCE_PER_POINT + BASE_CONFIDENCE).min(MAX_CONFIDENCE),
            2,
        );

        let image_analysis = match image {
            Some(image) => format!(
                "Simulated analysis of {}: Possible signs consistent with {}.",
                image.name,
                predicted.short_label()
            ),
            None => NO_IMAGE_ANALYSIS.to_string(),
        };

        Prediction {
            prediction: predicted,
            advice: advice_for(predicted).to_string(),
            confidence,
            image_analysis,
        }
    }

    /// [`predict`](Self::predict) behind the configured artificial latency,
    /// emulating a remote inference call.
    #[cfg(feature = "latency")]
    pub async fn predict_with_latency(
        &self,
        symptoms: &str,
        image: Option<&ImageDescriptor>,
    ) -> Prediction {
        let delay = std::time::Duration::from_millis(self.config.latency_ms);
        tokio::time::sleep(delay).await;
        self.predict(symptoms, image)
    }
}

/// Keyword overlap between the label and the text plus fixed symptom boosts.
fn score_condition(condition: Condition, text: &str, has_photo: bool) -> u32 {
    let label = condition.label();
    let keywords = strip_parentheticals(&label.to_lowercase());
    let mut score = keywords
        .split(' ')
        .filter(|keyword| keyword.len() > 2 && text.contains(keyword))
        .count() as u32;

    if text.contains("fever") && (label.contains("Febrile") || label.contains("Dengue")) {
        score += 2;
    }
    if text.contains("cough") && (label.contains("TB") || label.contains("Respiratory")) {
        score += 2;
    }
    if (text.contains("diarrhea") || text.contains("loose motion")) && label.contains("Diarrheal")
    {
        score += 2;
    }
    if (text.contains("rash") || has_photo) && is_dengue_like(label) {
        score += 1;
    }

    score
}

fn is_dengue_like(label: &str) -> bool {
    label.contains("Dengue") || label.contains("Vector-borne")
}

/// Removes every `(...)` group, shortest match first.
fn strip_parentheticals(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')') else {
            break;
        };
        output.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    output.push_str(rest);
    output
}

pub fn advice_for(condition: Condition) -> &'static str {
    match condition {
        Condition::FebrileIllness => "High fever, body aches, and rash suggest a vector-borne illness like Dengue. Please consult a doctor immediately. Rest, stay hydrated, and monitor for warning signs like bleeding or severe abdominal pain.",
        Condition::MildViralInfection => "Symptoms like mild fever and cough could be a common viral infection. Rest, drink plenty of fluids, and take over-the-counter medication for symptom relief if needed. If symptoms worsen or persist, see a doctor.",
        Condition::AcuteDiarrhealDisease => "Frequent loose stools and cramps indicate acute diarrhea. Stay hydrated with ORS (Oral Rehydration Salts) or clear fluids. Eat bland food. Seek medical attention if dehydration is severe, or if there's blood in stool or high fever.",
        Condition::SuspectedTuberculosis => "Persistent cough, fever, night sweats, and weight loss are serious symptoms that could indicate TB. It's crucial to see a doctor for testing (like a sputum test or chest X-ray) and treatment. TB is curable with proper medication.",
        Condition::ObstetricComplication => "Severe headache, blurred vision, and abdominal pain during pregnancy can be signs of preeclampsia, a serious condition. Go to the nearest hospital or clinic immediately for evaluation. Do not delay.",
        Condition::Hypertension => "Elevated blood pressure needs management. Consult a doctor for lifestyle advice (diet, exercise) and possible medication. Monitor your blood pressure regularly.",
        Condition::DiabetesMellitus => "Symptoms like increased thirst, frequent urination, and fatigue suggest diabetes. See a doctor for blood sugar testing and management plan, which may include diet, exercise, and medication.",
        Condition::AcuteRespiratoryInfection => "Cough, difficulty breathing, and fever could be an ARI. Rest, stay hydrated. For children, monitor for fast breathing or chest indrawing, and seek urgent care if present. Adults should see a doctor if symptoms are severe or don't improve.",
        _ => DEFAULT_ADVICE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_parenthetical_group() {
        assert_eq!(
            strip_parentheticals("obstetric complication (e.g., suspected preeclampsia)"),
            "obstetric complication "
        );
        assert_eq!(strip_parentheticals("a (b) c (d)"), "a  c ");
        assert_eq!(strip_parentheticals("hypertension"), "hypertension");
    }

    #[test]
    fn label_keywords_count_once_each() {
        let score = score_condition(
            Condition::DiabetesMellitus,
            "known diabetes mellitus patient",
            false,
        );
        assert_eq!(score, 2);
    }

    #[test]
    fn photo_boosts_only_dengue_like_labels() {
        assert_eq!(score_condition(Condition::FebrileIllness, "tired", true), 1);
        assert_eq!(score_condition(Condition::Hypertension, "tired", true), 0);
    }
}
