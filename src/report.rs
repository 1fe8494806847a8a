use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};

use crate::data::ranges::RangesResult;

// ---------------------------------------------------------------------------
// Terminal table
// ---------------------------------------------------------------------------

/// Render an aligned per-classification summary table.
///
/// One block per label; value lists are elided, only their length is shown.
/// Empty ranges print their `inf`/`-inf` sentinels as-is.
pub fn render_table(ranges: &RangesResult) -> String {
    let mut out = String::new();

    if ranges.is_empty() {
        out.push_str("(no classifications)\n");
        return out;
    }

    for (classification, class_ranges) in ranges {
        let _ = writeln!(out, "classification: {classification}");

        let name_width = class_ranges
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max("feature".len());

        let _ = writeln!(
            out,
            "  {:<name_width$}  {:>16}  {:>16}  {:>6}",
            "feature", "min", "max", "count"
        );
        for (feature, entry) in class_ranges {
            let _ = writeln!(
                out,
                "  {:<name_width$}  {:>16}  {:>16}  {:>6}",
                feature,
                entry.min,
                entry.max,
                entry.values.len()
            );
        }
        out.push('\n');
    }

    out
}

// ---------------------------------------------------------------------------
// JSON export
// ---------------------------------------------------------------------------

/// Serialize the full result mapping (classification → feature →
/// {min, max, values}) as pretty JSON.
///
/// Untouched `inf`/`-inf` sentinels become JSON `null`, which is also what
/// `JSON.stringify` produces for `Infinity`.
pub fn render_json(ranges: &RangesResult) -> Result<String> {
    serde_json::to_string_pretty(ranges).context("serializing ranges to JSON")
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write the result as flat CSV rows:
/// `classification,feature,min,max,count,values`, with the value list
/// semicolon-joined inside the last cell.
pub fn write_csv<W: Write>(writer: W, ranges: &RangesResult) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(["classification", "feature", "min", "max", "count", "values"])
        .context("writing CSV header")?;

    for (classification, class_ranges) in ranges {
        for (feature, entry) in class_ranges {
            let values = entry
                .values
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(";");
            writer
                .write_record([
                    classification.clone(),
                    feature.clone(),
                    entry.min.to_string(),
                    entry.max.to_string(),
                    entry.values.len().to_string(),
                    values,
                ])
                .with_context(|| format!("writing CSV row for {classification}/{feature}"))?;
        }
    }

    writer.flush().context("flushing CSV output")?;
    Ok(())
}
