//! Label Codec and Parsing
//!
//! Two responsibilities:
//! - `LabelCodec`: class index → canonical label string, built from the
//!   Keras-style `class_indices.json` (label → index, inverted at load).
//! - `ParsedLabel`: the single place the `"<Plant>_<Condition>"` naming
//!   convention is parsed. Label separators are inconsistent in the source
//!   data (`_`, `__`, and `___` all occur), so every use site goes through
//!   this parser instead of re-splitting the raw string.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;

use crate::error::DiagnosisError;

/// Immutable class index → label mapping
///
/// Built once at startup, never mutated. Decoding an index outside the
/// mapping's domain is a hard error (nothing can be resolved without a
/// label).
pub struct LabelCodec {
    labels: FxHashMap<usize, String>,
}

impl LabelCodec {
    /// Build from a label → index map (the shape Keras writes)
    pub fn from_class_indices(class_indices: FxHashMap<String, usize>) -> Self {
        let labels = class_indices
            .into_iter()
            .map(|(label, index)| (index, label))
            .collect();
        LabelCodec { labels }
    }

    /// Load from a `class_indices.json` file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read class index file: {:?}", path))?;

        let class_indices: FxHashMap<String, usize> = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse class index JSON")?;

        if class_indices.is_empty() {
            anyhow::bail!("Class index file {:?} contains no labels", path);
        }

        Ok(Self::from_class_indices(class_indices))
    }

    /// Codec over the label set shipped with the crate
    pub fn builtin() -> Result<Self> {
        let class_indices: FxHashMap<String, usize> =
            serde_json::from_str(include_str!("../data/class_indices.json"))
                .with_context(|| "Failed to parse embedded class index JSON")?;
        Ok(Self::from_class_indices(class_indices))
    }

    /// Decode a classifier output index to its canonical label
    pub fn decode(&self, class_index: usize) -> Result<&str, DiagnosisError> {
        self.labels
            .get(&class_index)
            .map(String::as_str)
            .ok_or(DiagnosisError::UnknownIndex(class_index))
    }

    /// Number of known classes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All (index, label) pairs, sorted by index
    pub fn entries(&self) -> Vec<(usize, &str)> {
        let mut entries: Vec<(usize, &str)> = self
            .labels
            .iter()
            .map(|(i, l)| (*i, l.as_str()))
            .collect();
        entries.sort_by_key(|(i, _)| *i);
        entries
    }
}

/// A label decomposed into its naming-convention parts
///
/// `plant` and `condition` are already in display form (separator runs
/// collapsed to single spaces, each word title-cased). A label's health
/// status is a naming convention, not a typed field: the final
/// underscore-delimited segment equals `healthy` (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLabel {
    pub plant: String,
    pub condition: String,
    pub is_healthy: bool,
}

impl ParsedLabel {
    /// Parse a raw classifier label
    ///
    /// Logic:
    /// - Split into words on underscore runs (empty segments dropped).
    /// - Plant/condition boundary: the longest underscore run, first
    ///   occurrence on ties. This keeps `Pepper__bell___Bacterial_spot`
    ///   as ("Pepper Bell", "Bacterial Spot") while `Tomato_Bacterial_spot`
    ///   splits after the plant name.
    /// - Single-word labels parse with an empty condition.
    ///
    /// Errors with `UnparsableLabel` when nothing remains after splitting.
    pub fn parse(raw: &str) -> Result<Self, DiagnosisError> {
        // (separator run length before word, title-cased word)
        let mut words: Vec<(usize, String)> = Vec::new();
        let mut run = 0usize;
        let mut current = String::new();

        for ch in raw.chars() {
            if ch == '_' {
                if !current.is_empty() {
                    words.push((run, title_case(&current)));
                    current.clear();
                    run = 0;
                }
                run += 1;
            } else {
                current.push(ch);
            }
        }
        if !current.is_empty() {
            words.push((run, title_case(&current)));
        }

        if words.is_empty() {
            return Err(DiagnosisError::UnparsableLabel(raw.to_string()));
        }

        let is_healthy = raw
            .rsplit('_')
            .find(|s| !s.is_empty())
            .map(|s| s.eq_ignore_ascii_case("healthy"))
            .unwrap_or(false);

        if words.len() == 1 {
            return Ok(ParsedLabel {
                plant: words[0].1.clone(),
                condition: String::new(),
                is_healthy,
            });
        }

        // Boundary at the longest separator run (first occurrence wins)
        let mut split_at = 1;
        let mut longest = 0;
        for (i, (run, _)) in words.iter().enumerate().skip(1) {
            if *run > longest {
                longest = *run;
                split_at = i;
            }
        }

        let plant = words[..split_at]
            .iter()
            .map(|(_, w)| w.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let condition = words[split_at..]
            .iter()
            .map(|(_, w)| w.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(ParsedLabel {
            plant,
            condition,
            is_healthy,
        })
    }

    /// Full display name: plant and condition joined by a single space
    pub fn display_name(&self) -> String {
        if self.condition.is_empty() {
            self.plant.clone()
        } else {
            format!("{} {}", self.plant, self.condition)
        }
    }
}

/// Title-case a single word: first character uppercased, rest lowercased
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn codec() -> LabelCodec {
        let mut map = FxHashMap::default();
        map.insert("Potato___Early_blight".to_string(), 0);
        map.insert("Tomato_healthy".to_string(), 1);
        LabelCodec::from_class_indices(map)
    }

    #[test]
    fn decode_known_index() {
        let codec = codec();
        assert_eq!(codec.decode(0).unwrap(), "Potato___Early_blight");
        assert_eq!(codec.decode(1).unwrap(), "Tomato_healthy");
    }

    #[test]
    fn decode_unknown_index_errors() {
        let codec = codec();
        assert_eq!(codec.decode(99), Err(DiagnosisError::UnknownIndex(99)));
    }

    #[test]
    fn entries_sorted_by_index() {
        let codec = codec();
        let entries = codec.entries();
        assert_eq!(entries[0], (0, "Potato___Early_blight"));
        assert_eq!(entries[1], (1, "Tomato_healthy"));
    }

    #[test]
    fn builtin_codec_covers_all_classes() {
        let codec = LabelCodec::builtin().unwrap();
        assert_eq!(codec.len(), 15);
        assert_eq!(codec.decode(2).unwrap(), "Potato___Early_blight");
        assert_eq!(codec.decode(14).unwrap(), "Tomato_healthy");
    }

    #[test]
    fn parse_triple_underscore() {
        let parsed = ParsedLabel::parse("Potato___Early_blight").unwrap();
        assert_eq!(parsed.plant, "Potato");
        assert_eq!(parsed.condition, "Early Blight");
        assert!(!parsed.is_healthy);
        assert_eq!(parsed.display_name(), "Potato Early Blight");
    }

    #[test]
    fn parse_single_underscore() {
        let parsed = ParsedLabel::parse("Tomato_Bacterial_spot").unwrap();
        assert_eq!(parsed.plant, "Tomato");
        assert_eq!(parsed.condition, "Bacterial Spot");
        assert_eq!(parsed.display_name(), "Tomato Bacterial Spot");
    }

    #[test]
    fn parse_mixed_separators() {
        // Longest run (___) separates plant from condition
        let parsed = ParsedLabel::parse("Pepper__bell___Bacterial_spot").unwrap();
        assert_eq!(parsed.plant, "Pepper Bell");
        assert_eq!(parsed.condition, "Bacterial Spot");
        assert_eq!(parsed.display_name(), "Pepper Bell Bacterial Spot");
    }

    #[test]
    fn parse_double_underscore_tie_breaks_first() {
        let parsed = ParsedLabel::parse("Tomato__Tomato_YellowLeaf__Curl_Virus").unwrap();
        assert_eq!(parsed.plant, "Tomato");
        assert_eq!(parsed.condition, "Tomato Yellowleaf Curl Virus");
    }

    #[test]
    fn display_name_never_contains_underscores_or_double_spaces() {
        let labels = [
            "Potato___Early_blight",
            "Tomato_healthy",
            "Pepper__bell___healthy",
            "Tomato_Spider_mites_Two_spotted_spider_mite",
            "Tomato__Target_Spot",
        ];
        for label in labels {
            let name = ParsedLabel::parse(label).unwrap().display_name();
            assert!(!name.contains('_'), "underscore in {:?}", name);
            assert!(!name.contains("  "), "double space in {:?}", name);
        }
    }

    #[test]
    fn healthy_predicate_from_final_segment() {
        assert!(ParsedLabel::parse("Tomato_healthy").unwrap().is_healthy);
        assert!(ParsedLabel::parse("Pepper__bell___healthy").unwrap().is_healthy);
        assert!(ParsedLabel::parse("Potato___HEALTHY").unwrap().is_healthy);
        assert!(!ParsedLabel::parse("Tomato_Late_blight").unwrap().is_healthy);
        // "healthy" must be the final segment, not just present
        assert!(!ParsedLabel::parse("Tomato_healthy_lookalike").unwrap().is_healthy);
    }

    #[test]
    fn parse_single_word_label() {
        let parsed = ParsedLabel::parse("healthy").unwrap();
        assert_eq!(parsed.plant, "Healthy");
        assert_eq!(parsed.condition, "");
        assert!(parsed.is_healthy);
        assert_eq!(parsed.display_name(), "Healthy");
    }

    #[test]
    fn parse_rejects_empty_and_separator_only() {
        assert!(matches!(
            ParsedLabel::parse(""),
            Err(DiagnosisError::UnparsableLabel(_))
        ));
        assert!(matches!(
            ParsedLabel::parse("___"),
            Err(DiagnosisError::UnparsableLabel(_))
        ));
    }

    #[test]
    fn parse_ignores_leading_and_trailing_separators() {
        let parsed = ParsedLabel::parse("_Tomato_healthy_").unwrap();
        assert_eq!(parsed.display_name(), "Tomato Healthy");
        assert!(parsed.is_healthy);
    }
}
