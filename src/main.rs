mod cli;
mod data;
mod report;

use anyhow::{Context, Result};
use clap::Parser;

use cli::OutputFormat;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    let dataset = data::loader::load_file(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    log::info!(
        "Loaded {} samples, {} segments, classifications: {:?}",
        dataset.len(),
        dataset.segment_count(),
        dataset.classifications()
    );

    let mut ranges = data::ranges::calculate_ranges(&dataset.samples);

    if !args.classes.is_empty() {
        for label in &args.classes {
            if !ranges.contains_key(label.as_str()) {
                log::warn!("Classification {label:?} not present in the dataset");
            }
        }
        ranges.retain(|label, _| args.classes.iter().any(|c| c == label));
    }

    let rendered = match args.format {
        OutputFormat::Table => report::render_table(&ranges),
        OutputFormat::Json => {
            let mut json = report::render_json(&ranges)?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            report::write_csv(&mut buf, &ranges)?;
            String::from_utf8(buf).context("CSV output is not valid UTF-8")?
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote ranges to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
