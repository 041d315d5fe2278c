//! Diagnosis pipeline
//!
//! Assembles the label codec, knowledge base, and resolver once at startup
//! and drives the full flow: image → inference adapter → (label, confidence)
//! → resolver → `DiagnosisResult`. Both data files are required; a missing
//! one is a fatal startup error.

use anyhow::{Context, Result};
use std::path::Path;

use crate::error::DiagnosisError;
use crate::inference::{InferenceAdapter, Prediction};
use crate::knowledge::KnowledgeBase;
use crate::labels::LabelCodec;
use crate::resolver::{AdvisoryResolver, DiagnosisResult};

/// Process-wide, read-only diagnosis engine
///
/// Safe to share across sessions: there is no write path after
/// construction.
pub struct DiagnosisEngine {
    codec: LabelCodec,
    resolver: AdvisoryResolver,
}

impl DiagnosisEngine {
    pub fn new(codec: LabelCodec, knowledge: KnowledgeBase) -> Self {
        DiagnosisEngine {
            codec,
            resolver: AdvisoryResolver::new(knowledge),
        }
    }

    /// Load both data files from disk
    pub fn load(class_indices: &Path, advisory_table: &Path) -> Result<Self> {
        let codec = LabelCodec::load(class_indices)
            .with_context(|| "Cannot start without a class index mapping")?;
        let knowledge = KnowledgeBase::load(advisory_table)
            .with_context(|| "Cannot start without an advisory table")?;

        tracing::info!("Loaded {} classes, {} advisory records", codec.len(), knowledge.len());

        Ok(Self::new(codec, knowledge))
    }

    /// Engine over the data files shipped with the crate
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(LabelCodec::builtin()?, KnowledgeBase::builtin()?))
    }

    pub fn codec(&self) -> &LabelCodec {
        &self.codec
    }

    pub fn resolver(&self) -> &AdvisoryResolver {
        &self.resolver
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        self.resolver.knowledge()
    }

    /// Resolve one classifier prediction
    pub fn diagnose(&self, prediction: &Prediction) -> Result<DiagnosisResult, DiagnosisError> {
        let label = self.codec.decode(prediction.class_index)?;
        self.resolver.resolve(label, prediction.confidence)
    }

    /// Full pipeline: run the adapter, then resolve its prediction
    pub fn diagnose_image<A: InferenceAdapter>(
        &self,
        adapter: &A,
        image: &A::Image,
    ) -> Result<DiagnosisResult> {
        let prediction = adapter
            .infer(image)
            .with_context(|| "Inference adapter failed")?;
        self.diagnose(&prediction)
            .with_context(|| "Failed to resolve prediction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::FixedAdapter;

    #[test]
    fn diagnose_known_index() {
        let engine = DiagnosisEngine::builtin().unwrap();
        let result = engine
            .diagnose(&Prediction {
                class_index: 2,
                confidence: 0.93,
            })
            .unwrap();
        assert_eq!(result.raw_label, "Potato___Early_blight");
        assert_eq!(result.display_name, "Potato Early Blight");
    }

    #[test]
    fn diagnose_unknown_index_errors() {
        let engine = DiagnosisEngine::builtin().unwrap();
        let err = engine
            .diagnose(&Prediction {
                class_index: 42,
                confidence: 0.5,
            })
            .unwrap_err();
        assert_eq!(err, DiagnosisError::UnknownIndex(42));
    }

    #[test]
    fn diagnose_image_runs_adapter_then_resolves() {
        let engine = DiagnosisEngine::builtin().unwrap();
        let adapter = FixedAdapter::new(14, 0.88);
        let result = engine.diagnose_image(&adapter, &()).unwrap();
        assert_eq!(result.display_name, "Tomato Healthy");
        assert!(result.is_healthy);
    }

    #[test]
    fn load_fails_on_missing_files() {
        let missing = Path::new("data/does_not_exist.json");
        let table = Path::new("data/disease_info.json");
        assert!(DiagnosisEngine::load(missing, table).is_err());
        assert!(DiagnosisEngine::load(Path::new("data/class_indices.json"), missing).is_err());
    }

    #[test]
    fn load_from_shipped_data_files() {
        let engine = DiagnosisEngine::load(
            Path::new("data/class_indices.json"),
            Path::new("data/disease_info.json"),
        )
        .unwrap();
        assert_eq!(engine.codec().len(), 15);
        assert_eq!(engine.knowledge().len(), 15);
    }
}
