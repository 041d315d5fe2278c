//! Knowledge Base
//!
//! Immutable label → advisory-record mapping, loaded once at startup from a
//! hand-authored JSON table. The table is expected to lag behind the
//! classifier's label set, so an unknown label is a recoverable `None`, not
//! an error. Construction validates each record's shape against the label's
//! health convention and logs data-quality warnings; a partially specified
//! record is still usable, degrading field by field at resolve time.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::labels::ParsedLabel;

/// Organic and chemical treatment guidance for one disease
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    #[serde(default)]
    pub organic: Option<String>,
    #[serde(default)]
    pub chemical: Option<String>,
}

/// One entry of the advisory table
///
/// Every field is optional at the schema level: the table author may leave
/// gaps, and healthy records carry explicit nulls for disease-only fields.
/// Shape expectations (disease records carry symptoms + treatment, healthy
/// records carry maintenance tips) are checked at load time, not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryRecord {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
    #[serde(default)]
    pub treatment: Option<Treatment>,
    #[serde(default)]
    pub prevention: Option<String>,
    #[serde(default)]
    pub maintenance_tips: Option<Vec<String>>,
}

/// Immutable label → `AdvisoryRecord` mapping
pub struct KnowledgeBase {
    records: FxHashMap<String, AdvisoryRecord>,
}

impl KnowledgeBase {
    /// Build from an already-parsed record table, logging shape warnings
    pub fn from_records(records: FxHashMap<String, AdvisoryRecord>) -> Self {
        let kb = KnowledgeBase { records };
        for finding in kb.validation_findings() {
            tracing::warn!("Advisory table: {}", finding);
        }
        kb
    }

    /// Load the advisory table from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read advisory table: {:?}", path))?;

        let records: FxHashMap<String, AdvisoryRecord> = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse advisory table JSON")?;

        if records.is_empty() {
            anyhow::bail!("Advisory table {:?} contains no records", path);
        }

        Ok(Self::from_records(records))
    }

    /// Knowledge base over the advisory table shipped with the crate
    pub fn builtin() -> Result<Self> {
        let records: FxHashMap<String, AdvisoryRecord> =
            serde_json::from_str(include_str!("../data/disease_info.json"))
                .with_context(|| "Failed to parse embedded advisory table")?;
        Ok(Self::from_records(records))
    }

    /// Look up the advisory record for a label
    ///
    /// `None` means the table has no entry at all, which callers must keep
    /// distinct from an entry with missing fields.
    pub fn lookup(&self, label: &str) -> Option<&AdvisoryRecord> {
        self.records.get(label)
    }

    /// Number of records in the table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Shape inconsistencies between each record and its label's health
    /// convention. Informational only; nothing here is fatal.
    pub fn validation_findings(&self) -> Vec<String> {
        let mut findings = Vec::new();

        let mut labels: Vec<&String> = self.records.keys().collect();
        labels.sort();

        for label in labels {
            let record = &self.records[label];
            let parsed = match ParsedLabel::parse(label) {
                Ok(parsed) => parsed,
                Err(_) => {
                    findings.push(format!("record key {:?} is not a parsable label", label));
                    continue;
                }
            };

            if parsed.is_healthy {
                if record
                    .maintenance_tips
                    .as_ref()
                    .map_or(true, |tips| tips.is_empty())
                {
                    findings.push(format!("healthy record {:?} has no maintenance tips", label));
                }
                if record.symptoms.is_some() {
                    findings.push(format!("healthy record {:?} carries symptoms", label));
                }
                if record.treatment.is_some() {
                    findings.push(format!("healthy record {:?} carries treatment", label));
                }
            } else {
                if record.description.is_none() {
                    findings.push(format!("disease record {:?} has no description", label));
                }
                if record
                    .symptoms
                    .as_ref()
                    .map_or(true, |s| s.is_empty())
                {
                    findings.push(format!("disease record {:?} has no symptoms", label));
                }
                match &record.treatment {
                    None => {
                        findings.push(format!("disease record {:?} has no treatment", label));
                    }
                    Some(treatment) => {
                        if treatment.organic.is_none() {
                            findings.push(format!(
                                "disease record {:?} has no organic treatment",
                                label
                            ));
                        }
                        if treatment.chemical.is_none() {
                            findings.push(format!(
                                "disease record {:?} has no chemical treatment",
                                label
                            ));
                        }
                    }
                }
                if record.prevention.is_none() {
                    findings.push(format!("disease record {:?} has no prevention", label));
                }
                if record.maintenance_tips.is_some() {
                    findings.push(format!(
                        "disease record {:?} carries maintenance tips",
                        label
                    ));
                }
            }
        }

        findings
    }
}
