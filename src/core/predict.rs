//! Predictor adapter: thin pass-through from a validated batch to the
//! opaque classifier. No feature transformation happens here; encoding is
//! the classifier's own business.

use crate::domain::model::{PredictionLabel, RecordBatch};
use crate::domain::ports::Classifier;
use crate::utils::error::{ChurnError, Result};

pub struct PredictorAdapter<C: Classifier> {
    classifier: C,
}

impl<C: Classifier> PredictorAdapter<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Predict one label per record, positionally aligned with the batch.
    pub fn predict(&self, batch: &RecordBatch) -> Result<Vec<PredictionLabel>> {
        let raw = self.classifier.predict(batch.records())?;

        if raw.len() != batch.len() {
            return Err(ChurnError::PredictorError {
                message: format!(
                    "classifier returned {} labels for {} records",
                    raw.len(),
                    batch.len()
                ),
            });
        }

        Ok(raw.into_iter().map(PredictionLabel::from_raw).collect())
    }
}
