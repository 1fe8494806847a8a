use std::collections::BTreeMap;

use serde::Serialize;

use super::model::Sample;

// ---------------------------------------------------------------------------
// RangeEntry – min / max / all observed values for one (class, feature) pair
// ---------------------------------------------------------------------------

/// Aggregated statistics for one feature under one classification.
///
/// `min` starts at `+inf` and `max` at `-inf`; a pair that never receives a
/// value keeps those sentinels (an empty range, not an error). `values` holds
/// every observed measurement in encounter order, duplicates included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeEntry {
    pub min: f64,
    pub max: f64,
    pub values: Vec<f64>,
}

impl Default for RangeEntry {
    fn default() -> Self {
        RangeEntry {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            values: Vec::new(),
        }
    }
}

impl RangeEntry {
    /// Fold one measurement into the entry. The value is always appended,
    /// even when it moves neither bound.
    fn record(&mut self, value: f64) {
        if self.min > value {
            self.min = value;
        }
        if self.max < value {
            self.max = value;
        }
        self.values.push(value);
    }

    /// True when no value has been recorded yet (sentinel state).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-classification ranges: feature name → [`RangeEntry`].
pub type ClassRanges = BTreeMap<String, RangeEntry>;

/// The full result: classification label → feature name → [`RangeEntry`].
pub type RangesResult = BTreeMap<String, ClassRanges>;

// ---------------------------------------------------------------------------
// calculate_ranges – two-pass aggregation
// ---------------------------------------------------------------------------

/// Compute per-class feature ranges over a dataset.
///
/// Pass 1 discovers the schema: the first segment seen with a given
/// classification fixes the feature set recorded for that label. Pass 2
/// aggregates: every value whose feature exists in the schema updates
/// min/max and is appended to the value list; values for features a later
/// segment introduces under an already-seen label are silently dropped.
/// That first-occurrence lock is load-bearing for downstream consumers and
/// must not be "fixed" here.
///
/// Pure and infallible: the input is not mutated and the result is built
/// fresh on every call.
pub fn calculate_ranges(samples: &[Sample]) -> RangesResult {
    let mut ranges = RangesResult::new();

    // Pass 1: schema discovery. Only the first segment per classification
    // contributes feature keys.
    for sample in samples {
        for segment in &sample.segments {
            if ranges.contains_key(&segment.classification) {
                continue;
            }
            let entry: &mut ClassRanges = ranges.entry(segment.classification.clone()).or_default();
            for fv in &segment.values {
                entry.entry(fv.kind.clone()).or_default();
            }
        }
    }

    // Pass 2: aggregation, same iteration order.
    for sample in samples {
        for segment in &sample.segments {
            // Guaranteed present after pass 1.
            let Some(class_entry) = ranges.get_mut(&segment.classification) else {
                continue;
            };
            for fv in &segment.values {
                if let Some(range) = class_entry.get_mut(&fv.kind) {
                    range.record(fv.value);
                }
            }
        }
    }

    ranges
}
