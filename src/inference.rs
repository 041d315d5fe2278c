//! Inference Adapter contract
//!
//! The trained classifier is an external collaborator. The core depends on a
//! single operation: decoded image in, (class index, max softmax confidence)
//! out. Model loading, caching, and the preprocessing pipeline all live
//! behind the adapter.

use anyhow::Result;

/// One classifier output: the winning class and its softmax probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub class_index: usize,
    pub confidence: f64,
}

impl Prediction {
    /// Argmax over a softmax probability vector
    ///
    /// Returns `None` for an empty vector or one with no comparable values.
    /// Ties break to the first maximum.
    pub fn from_probabilities(probabilities: &[f32]) -> Option<Prediction> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &p) in probabilities.iter().enumerate() {
            if p.is_nan() {
                continue;
            }
            match best {
                Some((_, best_p)) if p <= best_p => {}
                _ => best = Some((i, p)),
            }
        }
        best.map(|(class_index, confidence)| Prediction {
            class_index,
            confidence: confidence as f64,
        })
    }
}

/// Blocking, synchronous classifier wrapper
///
/// The image type is owned by the adapter; the core never inspects pixels.
/// Adapter failures are opaque to the resolver and surface as a generic
/// diagnosis failure.
pub trait InferenceAdapter {
    type Image;

    fn infer(&self, image: &Self::Image) -> Result<Prediction>;
}

/// Deterministic adapter returning a fixed prediction. Lets the pipeline be
/// exercised without standing up any ML runtime.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdapter {
    prediction: Prediction,
}

impl FixedAdapter {
    pub fn new(class_index: usize, confidence: f64) -> Self {
        FixedAdapter {
            prediction: Prediction {
                class_index,
                confidence,
            },
        }
    }
}

impl InferenceAdapter for FixedAdapter {
    type Image = ();

    fn infer(&self, _image: &Self::Image) -> Result<Prediction> {
        Ok(self.prediction)
    }
}
