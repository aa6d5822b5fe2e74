//! Model prediction page: dispatches one of the three collection modes
//! through a prediction session and renders/exports the outcome.

use std::io::BufRead;

use crate::core::collect::{FileBatchSource, ManualBatchSource, SingleSource};
use crate::core::present;
use crate::core::session::PredictionSession;
use crate::domain::model::CustomerRecord;
use crate::domain::ports::{Classifier, Storage};
use crate::utils::error::Result;

pub struct PredictionPage<C: Classifier, S: Storage> {
    session: PredictionSession<C>,
    output_storage: S,
}

impl<C: Classifier, S: Storage> PredictionPage<C, S> {
    pub fn new(classifier: C, output_storage: S) -> Self {
        Self {
            session: PredictionSession::new(classifier),
            output_storage,
        }
    }

    /// Single mode: show the customer's details and a prominent verdict.
    pub fn single(&mut self, record: CustomerRecord) -> Result<String> {
        let mut source = SingleSource::new(record);
        let outcome = self.session.run(&mut source)?;

        let mut out = String::new();
        out.push_str("Customer Details\n");
        out.push_str(&present::render_table(
            outcome.batch.headers(),
            outcome.batch.rows(),
        ));
        out.push('\n');
        out.push_str(&present::render_verdict(outcome.labels[0]));
        out.push('\n');
        Ok(out)
    }

    /// File-batch mode: predict an uploaded CSV and export the combined
    /// table under the output directory.
    pub fn file_batch<I: Storage>(
        &mut self,
        input_storage: I,
        input_path: &str,
        output_name: &str,
    ) -> Result<String> {
        let mut source = FileBatchSource::new(input_storage, input_path.to_string());
        let outcome = self.session.run(&mut source)?;

        let csv_text = present::to_csv(&outcome.table)?;
        self.output_storage
            .write_file(output_name, csv_text.as_bytes())?;
        tracing::info!("exported predictions to {}", output_name);

        let mut out = String::new();
        out.push_str("Prediction Results\n");
        out.push_str(&present::render_table(
            &outcome.table.headers,
            &outcome.table.rows,
        ));
        out.push('\n');
        out.push_str(&format!("Predictions saved to {}\n", output_name));
        Ok(out)
    }

    /// Manual-batch mode: collect N customers interactively, show the
    /// predicted table, and export it like any other batch.
    pub fn manual<R: BufRead>(
        &mut self,
        count: usize,
        input: R,
        output_name: &str,
    ) -> Result<String> {
        let mut source = ManualBatchSource::new(count, input)?;
        let outcome = self.session.run(&mut source)?;

        let csv_text = present::to_csv(&outcome.table)?;
        self.output_storage
            .write_file(output_name, csv_text.as_bytes())?;
        tracing::info!("exported predictions to {}", output_name);

        let mut out = String::new();
        out.push_str("Prediction Results\n");
        out.push_str(&present::render_table(
            &outcome.table.headers,
            &outcome.table.rows,
        ));
        out.push('\n');
        out.push_str(&format!("Predictions saved to {}\n", output_name));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        Contract, InternetService, ServiceOption, YesNo,
    };
    use crate::utils::error::ChurnError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::rc::Rc;

    struct ChurnAll;

    impl Classifier for ChurnAll {
        fn predict(&self, records: &[CustomerRecord]) -> Result<Vec<u8>> {
            Ok(vec![1; records.len()])
        }
    }

    #[derive(Clone, Default)]
    struct MemStorage {
        files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    }

    impl MemStorage {
        fn insert(&self, path: &str, data: &str) {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.as_bytes().to_vec());
        }

        fn get(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MemStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.get(path).ok_or_else(|| ChurnError::MalformedFileError {
                message: format!("no such file: {}", path),
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn record() -> CustomerRecord {
        CustomerRecord {
            dependents: YesNo::No,
            tenure: 1,
            online_security: ServiceOption::No,
            online_backup: ServiceOption::No,
            internet_service: InternetService::FiberOptic,
            device_protection: ServiceOption::No,
            tech_support: ServiceOption::No,
            contract: Contract::MonthToMonth,
            paperless_billing: YesNo::Yes,
            monthly_charges: 70.0,
        }
    }

    #[test]
    fn test_single_page_renders_verdict() {
        let mut page = PredictionPage::new(ChurnAll, MemStorage::default());
        let out = page.single(record()).unwrap();
        assert!(out.contains("Customer Details"));
        assert!(out.contains("WILL churn"));
    }

    #[test]
    fn test_file_batch_exports_predictions() {
        let input = MemStorage::default();
        input.insert(
            "upload.csv",
            "Dependents,tenure,OnlineSecurity,OnlineBackup,InternetService,DeviceProtection,TechSupport,Contract,PaperlessBilling,MonthlyCharges\n\
             No,1,No,No,Fiber optic,No,No,Month-to-month,Yes,70.0\n",
        );
        let output = MemStorage::default();

        let mut page = PredictionPage::new(ChurnAll, output.clone());
        let out = page
            .file_batch(input, "upload.csv", "predictions.csv")
            .unwrap();

        assert!(out.contains("Prediction Results"));
        let exported = String::from_utf8(output.get("predictions.csv").unwrap()).unwrap();
        assert!(exported.starts_with("Dependents,"));
        assert!(exported.contains("Churn_Prediction"));
        assert!(exported.contains("Churn"));
    }

    #[test]
    fn test_file_batch_missing_column_writes_nothing() {
        let input = MemStorage::default();
        input.insert("upload.csv", "Dependents,tenure\nNo,1\n");
        let output = MemStorage::default();

        let mut page = PredictionPage::new(ChurnAll, output.clone());
        let err = page
            .file_batch(input, "upload.csv", "predictions.csv")
            .unwrap_err();

        assert!(matches!(err, ChurnError::MissingFieldsError { .. }));
        assert!(output.get("predictions.csv").is_none());
    }

    #[test]
    fn test_manual_page_predicts_scripted_input() {
        let answers = "No\n1\nNo\nNo\nFiber optic\nNo\nNo\nMonth-to-month\nYes\n70.0\n";
        let mut page = PredictionPage::new(ChurnAll, MemStorage::default());
        let out = page
            .manual(1, Cursor::new(answers), "predictions.csv")
            .unwrap();
        assert!(out.contains("Prediction Results"));
        assert!(out.contains("Churn"));
    }

    #[test]
    fn test_manual_page_exports_predictions() {
        let answers = "No\n1\nNo\nNo\nFiber optic\nNo\nNo\nMonth-to-month\nYes\n70.0\n";
        let output = MemStorage::default();

        let mut page = PredictionPage::new(ChurnAll, output.clone());
        page.manual(1, Cursor::new(answers), "predictions.csv")
            .unwrap();

        let exported = String::from_utf8(output.get("predictions.csv").unwrap()).unwrap();
        assert!(exported.starts_with("Dependents,"));
        assert!(exported.contains("Churn_Prediction"));
        assert!(exported.lines().nth(1).unwrap().ends_with("Churn"));
    }

    #[test]
    fn test_manual_page_exhausted_input_writes_nothing() {
        let output = MemStorage::default();
        let mut page = PredictionPage::new(ChurnAll, output.clone());
        let err = page
            .manual(2, Cursor::new("No\n"), "predictions.csv")
            .unwrap_err();

        assert!(matches!(err, ChurnError::ValidationError { .. }));
        assert!(output.get("predictions.csv").is_none());
    }
}
