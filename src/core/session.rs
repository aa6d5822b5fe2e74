//! Prediction session: drives one user action through
//! Idle → Collecting → Validated → Predicted → Presented.
//!
//! Failed schema validation lands in the terminal Rejected state; the user
//! restarts from Idle simply by resubmitting input. Nothing is retried
//! automatically.

use crate::core::predict::PredictorAdapter;
use crate::core::present::{self, PredictedTable};
use crate::core::schema;
use crate::domain::model::{PredictionLabel, RecordBatch};
use crate::domain::ports::{Classifier, InputSource};
use crate::utils::error::{ChurnError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Collecting,
    Validated,
    Rejected,
    Predicted,
    Presented,
}

/// Everything one completed action produces: the batch, its labels, and
/// the combined table ready for display/export.
#[derive(Debug)]
pub struct SessionOutcome {
    pub batch: RecordBatch,
    pub labels: Vec<PredictionLabel>,
    pub table: PredictedTable,
}

pub struct PredictionSession<C: Classifier> {
    adapter: PredictorAdapter<C>,
    state: SessionState,
}

impl<C: Classifier> PredictionSession<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            adapter: PredictorAdapter::new(classifier),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run one full action. Each call restarts from Idle.
    pub fn run(&mut self, source: &mut dyn InputSource) -> Result<SessionOutcome> {
        self.state = SessionState::Idle;

        self.state = SessionState::Collecting;
        let batch = match source.collect() {
            Ok(batch) => batch,
            Err(e) => {
                self.state = SessionState::Rejected;
                return Err(e);
            }
        };
        tracing::info!("collected {} record(s)", batch.len());

        // File mode validates during collection already; re-validation is
        // idempotent and keeps the transition uniform across modes.
        if let Err(e) = schema::validate_columns(batch.headers()) {
            self.state = SessionState::Rejected;
            if let ChurnError::MissingFieldsError { ref missing } = e {
                tracing::warn!("batch rejected, missing columns: {}", missing.join(", "));
            }
            return Err(e);
        }
        self.state = SessionState::Validated;

        let labels = self.adapter.predict(&batch)?;
        self.state = SessionState::Predicted;
        tracing::info!("predicted {} label(s)", labels.len());

        let table = present::predicted_table(&batch, &labels)?;
        self.state = SessionState::Presented;

        Ok(SessionOutcome {
            batch,
            labels,
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        Contract, CustomerRecord, InternetService, ServiceOption, YesNo,
    };

    struct StayClassifier;

    impl Classifier for StayClassifier {
        fn predict(&self, records: &[CustomerRecord]) -> Result<Vec<u8>> {
            Ok(vec![0; records.len()])
        }
    }

    struct FailingSource;

    impl InputSource for FailingSource {
        fn collect(&mut self) -> Result<RecordBatch> {
            Err(ChurnError::MissingFieldsError {
                missing: vec!["Contract".to_string()],
            })
        }
    }

    fn record() -> CustomerRecord {
        CustomerRecord {
            dependents: YesNo::Yes,
            tenure: 24,
            online_security: ServiceOption::Yes,
            online_backup: ServiceOption::No,
            internet_service: InternetService::Dsl,
            device_protection: ServiceOption::Yes,
            tech_support: ServiceOption::Yes,
            contract: Contract::OneYear,
            paperless_billing: YesNo::No,
            monthly_charges: 55.0,
        }
    }

    #[test]
    fn test_successful_run_ends_presented() {
        let mut session = PredictionSession::new(StayClassifier);
        let mut source = crate::core::collect::SingleSource::new(record());

        let outcome = session.run(&mut source).unwrap();
        assert_eq!(session.state(), SessionState::Presented);
        assert_eq!(outcome.labels.len(), 1);
        assert_eq!(outcome.table.rows.len(), 1);
    }

    #[test]
    fn test_failed_validation_ends_rejected() {
        let mut session = PredictionSession::new(StayClassifier);
        let err = session.run(&mut FailingSource).unwrap_err();
        assert_eq!(session.state(), SessionState::Rejected);
        assert!(matches!(err, ChurnError::MissingFieldsError { .. }));
    }

    #[test]
    fn test_rejected_session_can_restart() {
        let mut session = PredictionSession::new(StayClassifier);
        let _ = session.run(&mut FailingSource);
        assert_eq!(session.state(), SessionState::Rejected);

        let mut source = crate::core::collect::SingleSource::new(record());
        assert!(session.run(&mut source).is_ok());
        assert_eq!(session.state(), SessionState::Presented);
    }
}
