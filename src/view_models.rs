//! View Models for the Presentation Adapter
//!
//! Serializable, render-ready projection of a `DiagnosisResult`. The UI
//! collaborator consumes these as-is: badge styling, a formatted confidence
//! string, and advisory content flattened into titled sections. The
//! `advisory_available` flag drives the "no advisory data" notice for labels
//! the knowledge base does not know.

use serde::Serialize;

use crate::resolver::{Advisory, DiagnosisResult};

/// Health verdict badge for visual rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum HealthBadge {
    Healthy,   // Green - no disease detected
    Diseased,  // Red - advisory content applies
}

impl HealthBadge {
    pub fn css_class(&self) -> &'static str {
        match self {
            HealthBadge::Healthy => "bg-emerald-100 text-emerald-800 dark:bg-emerald-900 dark:text-emerald-200",
            HealthBadge::Diseased => "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-200",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBadge::Healthy => "Healthy",
            HealthBadge::Diseased => "Diseased",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            HealthBadge::Healthy => "check-circle",
            HealthBadge::Diseased => "alert-triangle",
        }
    }
}

/// One titled block of advisory content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisorySection {
    pub heading: String,
    pub items: Vec<String>,
}

impl AdvisorySection {
    fn new(heading: &str, items: Vec<String>) -> Self {
        AdvisorySection {
            heading: heading.to_string(),
            items,
        }
    }

    fn paragraph(heading: &str, text: String) -> Self {
        Self::new(heading, vec![text])
    }
}

/// Complete render payload for one diagnosis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisView {
    pub display_name: String,
    pub plant: String,
    pub condition: String,
    pub badge: HealthBadge,
    /// Two-decimal confidence, e.g. "0.93 confidence"
    pub confidence_label: String,
    pub advisory_available: bool,
    /// Set when no advisory data exists for the label
    pub notice: Option<String>,
    pub sections: Vec<AdvisorySection>,
}

impl DiagnosisView {
    /// Project a resolved diagnosis into render-ready sections
    pub fn from_result(result: &DiagnosisResult) -> Self {
        let badge = if result.is_healthy {
            HealthBadge::Healthy
        } else {
            HealthBadge::Diseased
        };

        let mut sections = Vec::new();
        let mut notice = None;

        match &result.advisory {
            Some(Advisory::Healthy(advisory)) => {
                if let Some(description) = &advisory.description {
                    sections.push(AdvisorySection::paragraph("Overview", description.clone()));
                }
                if !advisory.maintenance_tips.is_empty() {
                    sections.push(AdvisorySection::new(
                        "Maintenance Tips",
                        advisory.maintenance_tips.clone(),
                    ));
                }
                if let Some(best_practices) = &advisory.best_practices {
                    sections.push(AdvisorySection::paragraph(
                        "Keep It Healthy",
                        best_practices.clone(),
                    ));
                }
            }
            Some(Advisory::Diseased(advisory)) => {
                sections.push(AdvisorySection::paragraph(
                    "Description",
                    advisory.description.clone(),
                ));
                sections.push(AdvisorySection::new("Symptoms", advisory.symptoms.clone()));
                sections.push(AdvisorySection::new(
                    "Treatment",
                    vec![
                        format!("Organic: {}", advisory.treatment.organic),
                        format!("Chemical: {}", advisory.treatment.chemical),
                    ],
                ));
                sections.push(AdvisorySection::paragraph(
                    "Prevention",
                    advisory.prevention.clone(),
                ));
                sections.push(AdvisorySection::paragraph(
                    "Safety Notice",
                    advisory.safety_notice.to_string(),
                ));
            }
            None => {
                notice = Some(format!(
                    "No advisory data available for {}.",
                    result.display_name
                ));
            }
        }

        DiagnosisView {
            display_name: result.display_name.clone(),
            plant: result.plant.clone(),
            condition: result.condition.clone(),
            badge,
            confidence_label: format!("{:.2} confidence", result.confidence),
            advisory_available: result.advisory_available,
            notice,
            sections,
        }
    }
}
