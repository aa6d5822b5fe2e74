//! Result presenter: attach labels to their source records and render or
//! export the combined table.

use crate::domain::model::{PredictionLabel, RecordBatch, PREDICTION_COLUMN};
use crate::utils::error::{ChurnError, Result};

/// A displayed/exported table: the source columns in their original order
/// with the prediction column appended last.
#[derive(Debug, Clone)]
pub struct PredictedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Join a batch with its labels. Labels were produced positionally by the
/// adapter, so row i gets label i.
pub fn predicted_table(batch: &RecordBatch, labels: &[PredictionLabel]) -> Result<PredictedTable> {
    if labels.len() != batch.len() {
        return Err(ChurnError::PredictorError {
            message: format!(
                "{} labels cannot be attached to {} records",
                labels.len(),
                batch.len()
            ),
        });
    }

    let mut headers = batch.headers().to_vec();
    headers.push(PREDICTION_COLUMN.to_string());

    let rows = batch
        .rows()
        .iter()
        .zip(labels)
        .map(|(row, label)| {
            let mut row = row.clone();
            row.push(label.as_str().to_string());
            row
        })
        .collect();

    Ok(PredictedTable { headers, rows })
}

/// The prominent single-mode verdict line.
pub fn render_verdict(label: PredictionLabel) -> String {
    match label {
        PredictionLabel::Churn => "Prediction: the customer WILL churn".to_string(),
        PredictionLabel::NoChurn => "Prediction: the customer will NOT churn".to_string(),
    }
}

/// Render a table for terminal display, columns padded to their widest cell.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:width$}", c, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ")
    };

    out.push_str(&format_row(headers));
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

/// Serialize a predicted table as UTF-8 CSV, column order preserved.
pub fn to_csv(table: &PredictedTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| ChurnError::ProcessingError {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| ChurnError::ProcessingError {
        message: e.to_string(),
    })
}
