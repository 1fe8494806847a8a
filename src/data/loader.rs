use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Dataset, FeatureValue, Sample, Segment};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a classification dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – the dataset document: `{ "samples": [ { "filename", "segments": [...] } ] }`
/// * `.csv`  – flat layout, one segment per row (see [`read_csv`])
///
/// Non-finite measurements are rejected here so the range calculator never
/// sees a value colliding with its `+inf`/`-inf` sentinels.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)?
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            read_csv(file)?
        }
        other => bail!("Unsupported file extension: .{other}"),
    };

    dataset.validate()?;
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Parse the JSON dataset document:
///
/// ```json
/// {
///   "samples": [
///     {
///       "filename": "tesco_1.jpg",
///       "segments": [
///         {
///           "classification": "T",
///           "meta": { "no": 1 },
///           "values": [ { "type": "hu1", "value": 0.0123 }, ... ]
///         }
///       ]
///     }
///   ]
/// }
/// ```
///
/// Missing `segments` / `classification` / `type` / `value` fields and
/// non-numeric values are structural errors surfaced to the caller.
pub fn parse_json(text: &str) -> Result<Dataset> {
    serde_json::from_str(text).context("parsing dataset JSON")
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Read a dataset from CSV. Header row required.
///
/// Layout: a `classification` column, an optional `filename` column, and
/// every remaining column a numeric feature:
///
/// ```text
/// filename,classification,hu1,hu2
/// tesco_1.jpg,T,0.0123,0.0004
/// tesco_1.jpg,S,0.0200,0.0009
/// lidl_1.jpg,L,0.0150,
/// ```
///
/// Each row is one segment. Consecutive rows sharing a `filename` fold into
/// one sample; without a filename every row is its own sample. Empty feature
/// cells are omitted from that segment's values.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let class_idx = headers
        .iter()
        .position(|h| h == "classification")
        .context("CSV missing 'classification' column")?;
    let filename_idx = headers.iter().position(|h| h == "filename");

    let mut samples: Vec<Sample> = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let classification = record
            .get(class_idx)
            .filter(|c| !c.is_empty())
            .with_context(|| format!("CSV row {row_no}: empty classification"))?
            .to_string();

        let mut values = Vec::new();
        for (col_idx, cell) in record.iter().enumerate() {
            if col_idx == class_idx || Some(col_idx) == filename_idx || cell.is_empty() {
                continue;
            }
            let value: f64 = cell.trim().parse().with_context(|| {
                format!(
                    "CSV row {row_no}, column '{}': '{cell}' is not a number",
                    headers[col_idx]
                )
            })?;
            values.push(FeatureValue {
                kind: headers[col_idx].clone(),
                value,
            });
        }

        let segment = Segment {
            classification,
            meta: None,
            values,
        };

        let filename = filename_idx
            .and_then(|i| record.get(i))
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        // Fold into the previous sample when the filename repeats.
        match (samples.last_mut(), &filename) {
            (Some(last), Some(name)) if last.filename.as_deref() == Some(name) => {
                last.segments.push(segment);
            }
            _ => samples.push(Sample {
                filename,
                segments: vec![segment],
            }),
        }
    }

    Ok(Dataset { samples })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_full_document() {
        let text = r#"{
            "samples": [
                {
                    "filename": "tesco_1.jpg",
                    "segments": [
                        {
                            "classification": "T",
                            "meta": { "no": 1 },
                            "values": [
                                { "type": "hu1", "value": 0.0123 },
                                { "type": "hu2", "value": -4.5 }
                            ]
                        }
                    ]
                }
            ]
        }"#;
        let ds = parse_json(text).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.samples[0].filename.as_deref(), Some("tesco_1.jpg"));
        let seg = &ds.samples[0].segments[0];
        assert_eq!(seg.classification, "T");
        assert_eq!(seg.values.len(), 2);
        assert_eq!(seg.values[0].kind, "hu1");
        assert_eq!(seg.values[1].value, -4.5);
    }

    #[test]
    fn parse_json_optional_fields_default() {
        let text = r#"{
            "samples": [
                { "segments": [ { "classification": "S", "values": [] } ] }
            ]
        }"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.samples[0].filename, None);
        assert_eq!(ds.samples[0].segments[0].meta, None);
    }

    #[test]
    fn parse_json_rejects_missing_classification() {
        let text = r#"{ "samples": [ { "segments": [ { "values": [] } ] } ] }"#;
        assert!(parse_json(text).is_err());
    }

    #[test]
    fn parse_json_rejects_non_numeric_value() {
        let text = r#"{
            "samples": [
                {
                    "segments": [
                        {
                            "classification": "T",
                            "values": [ { "type": "hu1", "value": "big" } ]
                        }
                    ]
                }
            ]
        }"#;
        assert!(parse_json(text).is_err());
    }

    #[test]
    fn read_csv_groups_consecutive_filenames() {
        let csv = "filename,classification,hu1,hu2\n\
                   tesco_1.jpg,T,0.1,0.2\n\
                   tesco_1.jpg,S,0.3,0.4\n\
                   lidl_1.jpg,L,0.5,\n";
        let ds = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.samples[0].segments.len(), 2);
        assert_eq!(ds.samples[0].segments[1].classification, "S");
        // Empty hu2 cell is omitted, not parsed as zero.
        assert_eq!(ds.samples[1].segments[0].values.len(), 1);
        assert_eq!(ds.samples[1].segments[0].values[0].kind, "hu1");
    }

    #[test]
    fn read_csv_without_filename_column() {
        let csv = "classification,hu1\nT,1.0\nT,2.0\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.samples[1].filename, None);
    }

    #[test]
    fn read_csv_rejects_bad_number() {
        let csv = "classification,hu1\nT,abc\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("hu1"));
    }

    #[test]
    fn read_csv_missing_classification_column() {
        let csv = "filename,hu1\na.jpg,1.0\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }
}
