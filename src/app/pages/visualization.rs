//! Data visualization page: the static dataset's shape plus the
//! distribution of every categorical column split by the Churn column.

use std::collections::BTreeMap;

use crate::domain::ports::Storage;
use crate::utils::error::{ChurnError, Result};

/// Columns with more distinct values than this (identifiers, mostly) are
/// skipped rather than rendered as distributions.
const MAX_DISTINCT_VALUES: usize = 20;

pub fn run<S: Storage>(storage: &S, dataset_path: &str) -> Result<String> {
    let raw = storage.read_file(dataset_path)?;
    render_report(&raw)
}

/// Build the page from raw CSV bytes.
pub fn render_report(raw: &[u8]) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new().from_reader(raw);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ChurnError::MalformedFileError {
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ChurnError::MalformedFileError {
            message: e.to_string(),
        })?;
        rows.push(row.iter().map(|c| c.trim().to_string()).collect());
    }

    let churn_idx = headers.iter().position(|h| h == "Churn");

    let mut out = String::new();
    out.push_str("Data Visualization\n");
    out.push_str(&format!(
        "Original data: {} rows x {} columns\n",
        rows.len(),
        headers.len()
    ));

    for (idx, name) in headers.iter().enumerate() {
        if Some(idx) == churn_idx || !is_categorical(&rows, idx) {
            continue;
        }

        let distinct = distinct_count(&rows, idx);
        if distinct > MAX_DISTINCT_VALUES {
            tracing::debug!("skipping high-cardinality column {}", name);
            continue;
        }

        out.push('\n');
        out.push_str(&format!("Distribution of {} by Churn\n", name));
        for line in column_distribution(&rows, idx, churn_idx) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    Ok(out)
}

/// A column is categorical when at least one non-empty value is not numeric.
/// All-numeric columns (tenure, MonthlyCharges) are not plotted.
fn is_categorical(rows: &[Vec<String>], idx: usize) -> bool {
    rows.iter()
        .filter_map(|row| row.get(idx))
        .any(|cell| !cell.is_empty() && cell.parse::<f64>().is_err())
}

fn distinct_count(rows: &[Vec<String>], idx: usize) -> usize {
    let mut values: Vec<&str> = rows.iter().filter_map(|r| r.get(idx)).map(|s| s.as_str()).collect();
    values.sort_unstable();
    values.dedup();
    values.len()
}

/// Per-value counts, split by the churn column when present.
fn column_distribution(
    rows: &[Vec<String>],
    idx: usize,
    churn_idx: Option<usize>,
) -> Vec<String> {
    // value -> churn value -> count; BTreeMap keeps output order stable.
    let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();

    for row in rows {
        let Some(value) = row.get(idx) else { continue };
        let churn = churn_idx
            .and_then(|c| row.get(c))
            .cloned()
            .unwrap_or_else(|| "All".to_string());
        *counts
            .entry(value.clone())
            .or_default()
            .entry(churn)
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(value, by_churn)| {
            let parts: Vec<String> = by_churn
                .into_iter()
                .map(|(churn, n)| format!("Churn={}: {}", churn, n))
                .collect();
            format!("  {:<20} {}", value, parts.join("  "))
        })
        .collect()
}
