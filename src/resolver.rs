//! Advisory Resolver
//!
//! Turns one classifier prediction (label + confidence) into a normalized,
//! presentation-ready `DiagnosisResult`. All branching and fallback policy
//! lives here:
//! - healthy verdicts never carry disease content, even from a mis-tagged
//!   record;
//! - disease verdicts substitute fixed fallback text per missing field and
//!   always carry the safety disclaimer;
//! - a label with no record at all resolves with `advisory = None` and
//!   `advisory_available = false`, which the UI must surface differently
//!   from an all-fallback record;
//! - out-of-range confidence is clamped and flagged, never propagated.
//!
//! The resolver receives its knowledge base by constructor injection and
//! holds no other state, so identical inputs always produce identical
//! results.

use serde::Serialize;

use crate::error::DiagnosisError;
use crate::knowledge::{AdvisoryRecord, KnowledgeBase};
use crate::labels::ParsedLabel;

/// Fixed policy string attached to every diseased result. Must always
/// accompany chemical-treatment content.
pub const SAFETY_DISCLAIMER: &str = "This information is for educational purposes only. \
    Always consult a local agricultural expert or extension service for accurate diagnosis \
    and treatment plans. Misapplication of treatments can harm plants, the environment, \
    and human health. Always follow local regulations and product labels for any chemical \
    application.";

/// Fallback text for a disease record without symptoms
pub const NO_SYMPTOMS_FALLBACK: &str = "No symptoms listed.";
/// Fallback text per missing treatment sub-field
pub const NO_TREATMENT_FALLBACK: &str = "No treatment information available.";
/// Fallback text for a disease record without prevention guidance
pub const NO_PREVENTION_FALLBACK: &str = "No prevention information available.";
/// Fallback text for a disease record without a description
pub const NO_DESCRIPTION_FALLBACK: &str = "No description available.";

/// Treatment guidance with fallbacks already applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreatmentAdvice {
    pub organic: String,
    pub chemical: String,
}

/// Advisory payload for a diseased verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseAdvisory {
    pub description: String,
    pub symptoms: Vec<String>,
    pub treatment: TreatmentAdvice,
    pub prevention: String,
    pub safety_notice: &'static str,
}

/// Advisory payload for a healthy verdict
///
/// `best_practices` is the record's prevention text, which doubles as
/// ongoing-care guidance for healthy plants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthyAdvisory {
    pub description: Option<String>,
    pub maintenance_tips: Vec<String>,
    pub best_practices: Option<String>,
}

/// Resolved advisory content, shaped by the health verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    Healthy(HealthyAdvisory),
    Diseased(DiseaseAdvisory),
}

/// The normalized output of resolving one prediction
///
/// Constructed fresh per diagnosis, discarded after rendering. When
/// `advisory_available` is false the label was unknown to the knowledge
/// base and the UI should show a "no advisory data" notice instead of an
/// advisory with all-fallback text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisResult {
    pub raw_label: String,
    pub display_name: String,
    pub plant: String,
    pub condition: String,
    pub confidence: f64,
    /// True when the adapter handed us a confidence outside [0, 1]
    pub confidence_clamped: bool,
    pub is_healthy: bool,
    pub advisory_available: bool,
    pub advisory: Option<Advisory>,
}

/// Stateless resolver over an injected knowledge base
pub struct AdvisoryResolver {
    knowledge: KnowledgeBase,
}

impl AdvisoryResolver {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        AdvisoryResolver { knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Resolve one (label, confidence) pair to a `DiagnosisResult`
    ///
    /// Errors only when the label has no normalizable segment. Missing or
    /// partial knowledge-base entries degrade through the result's fields.
    pub fn resolve(&self, label: &str, confidence: f64) -> Result<DiagnosisResult, DiagnosisError> {
        let parsed = ParsedLabel::parse(label)?;
        let (confidence, confidence_clamped) = clamp_confidence(label, confidence);

        let record = self.knowledge.lookup(label);
        let advisory_available = record.is_some();

        let advisory = record.map(|record| {
            if parsed.is_healthy {
                Advisory::Healthy(resolve_healthy(record))
            } else {
                Advisory::Diseased(resolve_diseased(record))
            }
        });

        Ok(DiagnosisResult {
            raw_label: label.to_string(),
            display_name: parsed.display_name(),
            plant: parsed.plant,
            condition: parsed.condition,
            confidence,
            confidence_clamped,
            is_healthy: parsed.is_healthy,
            advisory_available,
            advisory,
        })
    }
}

/// Healthy branch: maintenance tips only, never symptoms or treatment
fn resolve_healthy(record: &AdvisoryRecord) -> HealthyAdvisory {
    HealthyAdvisory {
        description: record.description.clone(),
        maintenance_tips: record.maintenance_tips.clone().unwrap_or_default(),
        best_practices: record.prevention.clone(),
    }
}

/// Disease branch: per-field fallbacks plus the safety disclaimer
fn resolve_diseased(record: &AdvisoryRecord) -> DiseaseAdvisory {
    let treatment = match &record.treatment {
        Some(treatment) => TreatmentAdvice {
            organic: treatment
                .organic
                .clone()
                .unwrap_or_else(|| NO_TREATMENT_FALLBACK.to_string()),
            chemical: treatment
                .chemical
                .clone()
                .unwrap_or_else(|| NO_TREATMENT_FALLBACK.to_string()),
        },
        None => TreatmentAdvice {
            organic: NO_TREATMENT_FALLBACK.to_string(),
            chemical: NO_TREATMENT_FALLBACK.to_string(),
        },
    };

    let symptoms = match &record.symptoms {
        Some(symptoms) if !symptoms.is_empty() => symptoms.clone(),
        _ => vec![NO_SYMPTOMS_FALLBACK.to_string()],
    };

    DiseaseAdvisory {
        description: record
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION_FALLBACK.to_string()),
        symptoms,
        treatment,
        prevention: record
            .prevention
            .clone()
            .unwrap_or_else(|| NO_PREVENTION_FALLBACK.to_string()),
        safety_notice: SAFETY_DISCLAIMER,
    }
}

/// Clamp confidence into [0, 1], warning on contract violations.
/// NaN counts as a violation and clamps to 0.0.
fn clamp_confidence(label: &str, confidence: f64) -> (f64, bool) {
    if confidence.is_nan() {
        tracing::warn!("Confidence for {:?} is NaN, clamping to 0.0", label);
        return (0.0, true);
    }
    if !(0.0..=1.0).contains(&confidence) {
        let clamped = confidence.clamp(0.0, 1.0);
        tracing::warn!(
            "Confidence {} for {:?} is outside [0, 1], clamping to {}",
            confidence,
            label,
            clamped
        );
        return (clamped, true);
    }
    (confidence, false)
}
