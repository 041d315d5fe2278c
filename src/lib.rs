//! Leaf Disease Advisory Core
//!
//! Resolves raw leaf-classifier output (class index + softmax confidence)
//! into normalized, presentation-ready diagnoses:
//! - `labels`: class index → label decode, label-convention parsing
//! - `knowledge`: immutable label → advisory-record table with load-time
//!   shape validation
//! - `resolver`: healthy/disease branching, field-level fallbacks, safety
//!   disclaimer, confidence clamping
//! - `inference`: the adapter contract the external classifier sits behind
//! - `engine`: startup assembly and the image → diagnosis pipeline
//! - `view_models`: render contract for the presentation adapter
//!
//! The trained model, image preprocessing, and UI are external
//! collaborators; nothing here depends on an ML runtime.

pub mod engine;
pub mod error;
pub mod inference;
pub mod knowledge;
pub mod labels;
pub mod resolver;
pub mod view_models;

// Re-export commonly used types
pub use engine::DiagnosisEngine;
pub use error::DiagnosisError;
pub use inference::{InferenceAdapter, Prediction};
pub use knowledge::{AdvisoryRecord, KnowledgeBase, Treatment};
pub use labels::{LabelCodec, ParsedLabel};
pub use resolver::{Advisory, AdvisoryResolver, DiagnosisResult, SAFETY_DISCLAIMER};
pub use view_models::DiagnosisView;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_engine_resolves_a_prediction() {
        let engine = DiagnosisEngine::builtin().unwrap();
        let result = engine
            .diagnose(&Prediction {
                class_index: 2,
                confidence: 0.93,
            })
            .unwrap();
        assert_eq!(result.display_name, "Potato Early Blight");
    }
}
