use crate::types::{CountryShare, Platform};
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const REQUIRED_COLUMNS: [&str; 3] = ["Country", "iOS_Percentage", "Android_Percentage"];

/// Load the market-share dataset from a CSV file.
///
/// Fails before reading any row if a required column is absent. Rows
/// are kept in file order and never mutated afterwards.
pub fn load_dataset(path: &Path) -> Result<Vec<CountryShare>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path))?;
    let dataset = parse_dataset(file)?;
    info!("Loaded market share data for {} countries", dataset.len());
    Ok(dataset)
}

pub fn parse_dataset<R: Read>(reader: R) -> Result<Vec<CountryShare>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers()?.clone();

    let col_idx = |name: &str| headers.iter().position(|h| h == name);
    let indices = [
        col_idx("Country"),
        col_idx("iOS_Percentage"),
        col_idx("Android_Percentage"),
    ];

    let (country_idx, ios_idx, android_idx) = match indices {
        [Some(c), Some(i), Some(a)] => (c, i, a),
        _ => {
            let missing: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .zip(&indices)
                .filter(|(_, idx)| idx.is_none())
                .map(|(col, _)| *col)
                .collect();
            return Err(anyhow!(
                "Missing required columns: {}. The CSV must contain: {}",
                missing.join(", "),
                REQUIRED_COLUMNS.join(", ")
            ));
        }
    };

    let mut dataset = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let country = record.get(country_idx).unwrap_or("").to_string();
        let ios_share = parse_share(record.get(ios_idx));
        let android_share = parse_share(record.get(android_idx));

        if ios_share.is_none() {
            // A row without an iOS share falls through the >50 check
            // and gets classed as Android. Possibly not what the data
            // author intended, so make it visible.
            warn!(
                country = %country,
                "iOS share missing or non-numeric; country classed as Android-dominant"
            );
        }

        let dominant = Platform::dominant(ios_share);
        dataset.push(CountryShare {
            country,
            ios_share,
            android_share,
            dominant,
        });
    }

    Ok(dataset)
}

/// Coerce a raw CSV cell to a share value. Empty cells, non-numeric
/// text and non-finite numbers all become missing, never an error.
fn parse_share(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
