//! Input collectors: three ways of producing a `RecordBatch`.
//!
//! Single mode wraps one already-typed record (the CLI argument parser only
//! accepts legal enum values, so an out-of-domain single record cannot be
//! constructed). File mode parses an uploaded CSV and validates column
//! presence against the schema registry. Manual mode repeats the single
//! form over an interactive prompt loop.

use std::io::BufRead;
use std::io::Write as _;
use std::str::FromStr;

use crate::core::schema;
use crate::domain::model::{
    Contract, CustomerRecord, InternetService, RecordBatch, ServiceOption, YesNo,
};
use crate::domain::ports::{InputSource, Storage};
use crate::utils::error::{ChurnError, Result};
use crate::utils::validation::{validate_non_negative, validate_range};

pub const MANUAL_BATCH_MIN: usize = 1;
pub const MANUAL_BATCH_MAX: usize = 100;

/// Single mode: exactly one fully-collected record.
pub struct SingleSource {
    record: CustomerRecord,
}

impl SingleSource {
    pub fn new(record: CustomerRecord) -> Self {
        Self { record }
    }
}

impl InputSource for SingleSource {
    fn collect(&mut self) -> Result<RecordBatch> {
        Ok(RecordBatch::from_records(vec![self.record.clone()]))
    }
}

/// File-batch mode: parse an uploaded CSV into a batch.
///
/// The full table (extra columns included) is retained for presentation;
/// only the required columns are typed into records for prediction.
pub struct FileBatchSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> FileBatchSource<S> {
    pub fn new(storage: S, path: String) -> Self {
        Self { storage, path }
    }
}

impl<S: Storage> InputSource for FileBatchSource<S> {
    fn collect(&mut self) -> Result<RecordBatch> {
        let raw = self.storage.read_file(&self.path)?;

        let mut reader = csv::ReaderBuilder::new().from_reader(raw.as_slice());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ChurnError::MalformedFileError {
                message: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        schema::validate_columns(&headers)?;

        // Positions of the required columns inside the uploaded table.
        // Validation above guarantees every lookup succeeds.
        let required_idx: Vec<usize> = crate::domain::model::REQUIRED_FIELDS
            .iter()
            .map(|name| headers.iter().position(|h| h == name))
            .collect::<Option<Vec<usize>>>()
            .ok_or_else(|| ChurnError::ProcessingError {
                message: "required column vanished after validation".to_string(),
            })?;

        let mut records = Vec::new();
        let mut rows = Vec::new();

        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(|e| ChurnError::MalformedFileError {
                message: e.to_string(),
            })?;
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            records.push(parse_row(i + 1, &required_idx, &cells)?);
            rows.push(cells);
        }

        tracing::debug!("parsed {} rows from {}", rows.len(), self.path);
        Ok(RecordBatch::from_table(records, headers, rows))
    }
}

/// Type the required cells of one CSV row. `row` is 1-based for reporting.
fn parse_row(row: usize, required_idx: &[usize], cells: &[String]) -> Result<CustomerRecord> {
    fn typed<T: FromStr<Err = String>>(row: usize, field: &str, value: &str) -> Result<T> {
        value.parse().map_err(|_| ChurnError::InvalidValueError {
            row,
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    fn cell_at<'a>(
        row: usize,
        required_idx: &[usize],
        cells: &'a [String],
        slot: usize,
    ) -> Result<&'a str> {
        let idx = required_idx[slot];
        cells
            .get(idx)
            .map(|s| s.trim())
            .ok_or_else(|| ChurnError::MalformedFileError {
                message: format!("row {} has too few columns", row),
            })
    }

    let cell = |slot: usize| cell_at(row, required_idx, cells, slot);

    let tenure_raw = cell(1)?;
    let tenure: u32 = tenure_raw
        .parse()
        .map_err(|_| ChurnError::InvalidValueError {
            row,
            field: "tenure".to_string(),
            value: tenure_raw.to_string(),
        })?;
    validate_range("tenure", tenure, 0, 72).map_err(|_| ChurnError::InvalidValueError {
        row,
        field: "tenure".to_string(),
        value: tenure_raw.to_string(),
    })?;

    let charges_raw = cell(9)?;
    let monthly_charges: f64 = charges_raw
        .parse()
        .map_err(|_| ChurnError::InvalidValueError {
            row,
            field: "MonthlyCharges".to_string(),
            value: charges_raw.to_string(),
        })?;
    validate_non_negative("MonthlyCharges", monthly_charges).map_err(|_| {
        ChurnError::InvalidValueError {
            row,
            field: "MonthlyCharges".to_string(),
            value: charges_raw.to_string(),
        }
    })?;

    Ok(CustomerRecord {
        dependents: typed(row, "Dependents", cell(0)?)?,
        tenure,
        online_security: typed(row, "OnlineSecurity", cell(2)?)?,
        online_backup: typed(row, "OnlineBackup", cell(3)?)?,
        internet_service: typed(row, "InternetService", cell(4)?)?,
        device_protection: typed(row, "DeviceProtection", cell(5)?)?,
        tech_support: typed(row, "TechSupport", cell(6)?)?,
        contract: typed(row, "Contract", cell(7)?)?,
        paperless_billing: typed(row, "PaperlessBilling", cell(8)?)?,
        monthly_charges,
    })
}

/// Manual-batch mode: the single form repeated N times over a prompt loop.
///
/// Each customer is an independent pass over the same questions; answers
/// that fail to parse are re-asked, so a materialized record is always
/// in-domain. Input order is preserved.
pub struct ManualBatchSource<R: BufRead> {
    count: usize,
    input: R,
}

impl<R: BufRead> ManualBatchSource<R> {
    pub fn new(count: usize, input: R) -> Result<Self> {
        validate_range(
            "count",
            count,
            MANUAL_BATCH_MIN,
            MANUAL_BATCH_MAX,
        )?;
        Ok(Self { count, input })
    }

    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> std::result::Result<T, String>,
    ) -> Result<T> {
        loop {
            print!("{}: ", prompt);
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            let read = self.input.read_line(&mut line)?;
            if read == 0 {
                return Err(ChurnError::ValidationError {
                    message: "input ended before all customers were collected".to_string(),
                });
            }

            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => println!("  invalid input: {}", e),
            }
        }
    }

    fn collect_one(&mut self, index: usize) -> Result<CustomerRecord> {
        println!("Customer {} details", index + 1);

        let dependents: YesNo =
            self.ask(&format!("Dependents (customer {}) [Yes/No]", index + 1), |s| {
                s.parse()
            })?;
        let tenure: u32 = self.ask(
            &format!("Tenure in months (customer {}) [0-72]", index + 1),
            |s| {
                let v: u32 = s.parse().map_err(|_| format!("expected an integer, got '{}'", s))?;
                if v > 72 {
                    return Err(format!("tenure {} is outside 0-72", v));
                }
                Ok(v)
            },
        )?;
        let online_security: ServiceOption = self.ask(
            &format!("Online Security (customer {}) [Yes/No/No internet service]", index + 1),
            |s| s.parse(),
        )?;
        let online_backup: ServiceOption = self.ask(
            &format!("Online Backup (customer {}) [Yes/No/No internet service]", index + 1),
            |s| s.parse(),
        )?;
        let internet_service: InternetService = self.ask(
            &format!("Internet Service (customer {}) [DSL/Fiber optic/No]", index + 1),
            |s| s.parse(),
        )?;
        let device_protection: ServiceOption = self.ask(
            &format!("Device Protection (customer {}) [Yes/No/No internet service]", index + 1),
            |s| s.parse(),
        )?;
        let tech_support: ServiceOption = self.ask(
            &format!("Tech Support (customer {}) [Yes/No/No internet service]", index + 1),
            |s| s.parse(),
        )?;
        let contract: Contract = self.ask(
            &format!("Contract (customer {}) [Month-to-month/One year/Two year]", index + 1),
            |s| s.parse(),
        )?;
        let paperless_billing: YesNo = self.ask(
            &format!("Paperless Billing (customer {}) [Yes/No]", index + 1),
            |s| s.parse(),
        )?;
        let monthly_charges: f64 = self.ask(
            &format!("Monthly Charges (customer {})", index + 1),
            |s| {
                let v: f64 = s.parse().map_err(|_| format!("expected a number, got '{}'", s))?;
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("monthly charges {} must be non-negative", v));
                }
                Ok(v)
            },
        )?;

        Ok(CustomerRecord {
            dependents,
            tenure,
            online_security,
            online_backup,
            internet_service,
            device_protection,
            tech_support,
            contract,
            paperless_billing,
            monthly_charges,
        })
    }
}

impl<R: BufRead> InputSource for ManualBatchSource<R> {
    fn collect(&mut self) -> Result<RecordBatch> {
        let mut records = Vec::with_capacity(self.count);
        for i in 0..self.count {
            records.push(self.collect_one(i)?);
        }
        Ok(RecordBatch::from_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::REQUIRED_FIELDS;
    use std::collections::HashMap;
    use std::io::Cursor;

    struct MemStorage {
        files: HashMap<String, Vec<u8>>,
    }

    impl MemStorage {
        fn with(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self { files }
        }
    }

    impl Storage for MemStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| ChurnError::MalformedFileError {
                    message: format!("no such file: {}", path),
                })
        }

        fn write_file(&self, _path: &str, _data: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    const FULL_CSV: &str = "\
customerID,Dependents,tenure,OnlineSecurity,OnlineBackup,InternetService,DeviceProtection,TechSupport,Contract,PaperlessBilling,MonthlyCharges
0001,No,1,No,No,Fiber optic,No,No,Month-to-month,Yes,70.0
0002,Yes,60,Yes,Yes,DSL,Yes,Yes,Two year,No,45.5
";

    #[test]
    fn test_file_batch_keeps_extra_columns_for_display() {
        let storage = MemStorage::with("batch.csv", FULL_CSV);
        let mut source = FileBatchSource::new(storage, "batch.csv".to_string());
        let batch = source.collect().unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.headers()[0], "customerID");
        assert_eq!(batch.headers().len(), 11);
        assert_eq!(batch.rows()[0][0], "0001");
        assert_eq!(batch.records()[0].tenure, 1);
        assert_eq!(batch.records()[1].contract, Contract::TwoYear);
    }

    #[test]
    fn test_file_batch_rejects_missing_contract_column() {
        let csv = "\
Dependents,tenure,OnlineSecurity,OnlineBackup,InternetService,DeviceProtection,TechSupport,PaperlessBilling,MonthlyCharges
No,1,No,No,DSL,No,No,Yes,20.0
";
        let storage = MemStorage::with("batch.csv", csv);
        let mut source = FileBatchSource::new(storage, "batch.csv".to_string());
        match source.collect() {
            Err(ChurnError::MissingFieldsError { missing }) => {
                assert_eq!(missing, vec!["Contract".to_string()]);
            }
            other => panic!("expected MissingFieldsError, got {:?}", other),
        }
    }

    #[test]
    fn test_file_batch_reports_out_of_domain_value() {
        let header = REQUIRED_FIELDS.join(",");
        let csv = format!(
            "{}\nNo,1,No,No,Cable,No,No,Month-to-month,Yes,70.0\n",
            header
        );
        let storage = MemStorage::with("batch.csv", &csv);
        let mut source = FileBatchSource::new(storage, "batch.csv".to_string());
        match source.collect() {
            Err(ChurnError::InvalidValueError { row, field, value }) => {
                assert_eq!(row, 1);
                assert_eq!(field, "InternetService");
                assert_eq!(value, "Cable");
            }
            other => panic!("expected InvalidValueError, got {:?}", other),
        }
    }

    #[test]
    fn test_manual_batch_count_bounds() {
        assert!(ManualBatchSource::new(0, Cursor::new("")).is_err());
        assert!(ManualBatchSource::new(101, Cursor::new("")).is_err());
        assert!(ManualBatchSource::new(1, Cursor::new("")).is_ok());
        assert!(ManualBatchSource::new(100, Cursor::new("")).is_ok());
    }

    fn manual_answers() -> String {
        // One customer, answers in form order.
        "No\n1\nNo\nNo\nFiber optic\nNo\nNo\nMonth-to-month\nYes\n70.0\n".to_string()
    }

    #[test]
    fn test_manual_batch_collects_in_order() {
        let answers = manual_answers().repeat(2);
        let mut source = ManualBatchSource::new(2, Cursor::new(answers)).unwrap();
        let batch = source.collect().unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.headers(), REQUIRED_FIELDS.map(String::from).as_slice());
        assert_eq!(batch.records()[0].internet_service, InternetService::FiberOptic);
        assert_eq!(batch.records()[1].monthly_charges, 70.0);
    }

    #[test]
    fn test_manual_batch_reprompts_on_bad_answer() {
        // First answer is out of domain; the re-asked value succeeds.
        let answers = format!("Maybe\n{}", manual_answers());
        let mut source = ManualBatchSource::new(1, Cursor::new(answers)).unwrap();
        let batch = source.collect().unwrap();
        assert_eq!(batch.records()[0].dependents, YesNo::No);
    }

    #[test]
    fn test_manual_batch_fails_on_exhausted_input() {
        let mut source = ManualBatchSource::new(2, Cursor::new(manual_answers())).unwrap();
        assert!(matches!(
            source.collect(),
            Err(ChurnError::ValidationError { .. })
        ));
    }
}
