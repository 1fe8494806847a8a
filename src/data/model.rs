use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// FeatureValue – one named measurement inside a segment
// ---------------------------------------------------------------------------

/// A single named numeric measurement, e.g. a Hu moment invariant
/// `{ "type": "hu1", "value": 0.0123 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureValue {
    /// Feature name (`type` in the JSON document).
    #[serde(rename = "type")]
    pub kind: String,
    /// The measurement. Any finite magnitude or sign.
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Segment – one classified region of a sample
// ---------------------------------------------------------------------------

/// A labeled segment: a classification label plus its feature measurements.
/// `meta` is carried through untouched; the range calculator ignores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub classification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    pub values: Vec<FeatureValue>,
}

// ---------------------------------------------------------------------------
// Sample – one source item (e.g. one image) with its segments
// ---------------------------------------------------------------------------

/// One dataset sample. `filename` is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub segments: Vec<Segment>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded classification dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset, top-level shape `{ "samples": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub samples: Vec<Sample>,
}

/// A measurement the range calculator cannot aggregate.
///
/// Non-finite values would collide with the `+inf`/`-inf` "no data yet"
/// sentinels in [`super::ranges::RangeEntry`], so they are rejected at load
/// time instead of silently poisoning min/max.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(
        "sample {sample}, segment {segment} (classification {classification:?}): \
         feature {feature:?} has non-finite value {value}"
    )]
    NonFiniteValue {
        sample: usize,
        segment: usize,
        classification: String,
        feature: String,
        value: f64,
    },
}

impl Dataset {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total number of segments across all samples.
    pub fn segment_count(&self) -> usize {
        self.samples.iter().map(|s| s.segments.len()).sum()
    }

    /// Sorted unique classification labels present in the dataset.
    pub fn classifications(&self) -> Vec<String> {
        let labels: BTreeSet<&str> = self
            .samples
            .iter()
            .flat_map(|s| &s.segments)
            .map(|seg| seg.classification.as_str())
            .collect();
        labels.into_iter().map(str::to_string).collect()
    }

    /// Reject NaN / infinite measurements. Loaders call this after parsing;
    /// the range calculator itself assumes finite input.
    pub fn validate(&self) -> Result<(), DatasetError> {
        for (si, sample) in self.samples.iter().enumerate() {
            for (gi, segment) in sample.segments.iter().enumerate() {
                for fv in &segment.values {
                    if !fv.value.is_finite() {
                        return Err(DatasetError::NonFiniteValue {
                            sample: si,
                            segment: gi,
                            classification: segment.classification.clone(),
                            feature: fv.kind.clone(),
                            value: fv.value,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(class: &str, values: &[(&str, f64)]) -> Segment {
        Segment {
            classification: class.to_string(),
            meta: None,
            values: values
                .iter()
                .map(|&(kind, value)| FeatureValue {
                    kind: kind.to_string(),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn classifications_are_sorted_and_unique() {
        let ds = Dataset {
            samples: vec![
                Sample {
                    filename: None,
                    segments: vec![segment("T", &[]), segment("S", &[])],
                },
                Sample {
                    filename: None,
                    segments: vec![segment("T", &[])],
                },
            ],
        };
        assert_eq!(ds.classifications(), vec!["S", "T"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.segment_count(), 3);
    }

    #[test]
    fn validate_accepts_finite_values() {
        let ds = Dataset {
            samples: vec![Sample {
                filename: None,
                segments: vec![segment("T", &[("hu1", -1.5), ("hu2", 1e300)])],
            }],
        };
        assert!(ds.validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan_and_infinity() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let ds = Dataset {
                samples: vec![Sample {
                    filename: Some("x.jpg".into()),
                    segments: vec![segment("T", &[("hu1", bad)])],
                }],
            };
            let err = ds.validate().unwrap_err();
            let DatasetError::NonFiniteValue {
                sample,
                segment,
                classification,
                feature,
                ..
            } = err;
            assert_eq!((sample, segment), (0, 0));
            assert_eq!(classification, "T");
            assert_eq!(feature, "hu1");
        }
    }
}
