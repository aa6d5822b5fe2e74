use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The required input columns, in canonical order. This is the column order
/// used whenever a batch is rendered from form input, and the order features
/// are fed to the classifier.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "Dependents",
    "tenure",
    "OnlineSecurity",
    "OnlineBackup",
    "InternetService",
    "DeviceProtection",
    "TechSupport",
    "Contract",
    "PaperlessBilling",
    "MonthlyCharges",
];

/// Column name appended to predicted tables.
pub const PREDICTION_COLUMN: &str = "Churn_Prediction";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum YesNo {
    #[value(name = "Yes")]
    #[serde(rename = "Yes")]
    Yes,
    #[value(name = "No")]
    #[serde(rename = "No")]
    No,
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        })
    }
}

impl FromStr for YesNo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Yes" => Ok(YesNo::Yes),
            "No" => Ok(YesNo::No),
            other => Err(format!("expected Yes or No, got '{}'", other)),
        }
    }
}

/// Domain of the internet add-on columns (OnlineSecurity, OnlineBackup,
/// DeviceProtection, TechSupport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ServiceOption {
    #[value(name = "Yes")]
    #[serde(rename = "Yes")]
    Yes,
    #[value(name = "No")]
    #[serde(rename = "No")]
    No,
    #[value(name = "No internet service")]
    #[serde(rename = "No internet service")]
    NoInternetService,
}

impl fmt::Display for ServiceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ServiceOption::Yes => "Yes",
            ServiceOption::No => "No",
            ServiceOption::NoInternetService => "No internet service",
        })
    }
}

impl FromStr for ServiceOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Yes" => Ok(ServiceOption::Yes),
            "No" => Ok(ServiceOption::No),
            "No internet service" => Ok(ServiceOption::NoInternetService),
            other => Err(format!(
                "expected Yes, No or 'No internet service', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum InternetService {
    #[value(name = "DSL")]
    #[serde(rename = "DSL")]
    Dsl,
    #[value(name = "Fiber optic")]
    #[serde(rename = "Fiber optic")]
    FiberOptic,
    #[value(name = "No")]
    #[serde(rename = "No")]
    No,
}

impl fmt::Display for InternetService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InternetService::Dsl => "DSL",
            InternetService::FiberOptic => "Fiber optic",
            InternetService::No => "No",
        })
    }
}

impl FromStr for InternetService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "DSL" => Ok(InternetService::Dsl),
            "Fiber optic" => Ok(InternetService::FiberOptic),
            "No" => Ok(InternetService::No),
            other => Err(format!(
                "expected DSL, 'Fiber optic' or No, got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Contract {
    #[value(name = "Month-to-month")]
    #[serde(rename = "Month-to-month")]
    MonthToMonth,
    #[value(name = "One year")]
    #[serde(rename = "One year")]
    OneYear,
    #[value(name = "Two year")]
    #[serde(rename = "Two year")]
    TwoYear,
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Contract::MonthToMonth => "Month-to-month",
            Contract::OneYear => "One year",
            Contract::TwoYear => "Two year",
        })
    }
}

impl FromStr for Contract {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Month-to-month" => Ok(Contract::MonthToMonth),
            "One year" => Ok(Contract::OneYear),
            "Two year" => Ok(Contract::TwoYear),
            other => Err(format!(
                "expected 'Month-to-month', 'One year' or 'Two year', got '{}'",
                other
            )),
        }
    }
}

/// One customer, with every required field present and in-domain.
///
/// A record is only ever materialized whole: form modes build it from
/// fully-collected inputs, file mode from a complete CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub dependents: YesNo,
    pub tenure: u32,
    pub online_security: ServiceOption,
    pub online_backup: ServiceOption,
    pub internet_service: InternetService,
    pub device_protection: ServiceOption,
    pub tech_support: ServiceOption,
    pub contract: Contract,
    pub paperless_billing: YesNo,
    pub monthly_charges: f64,
}

impl CustomerRecord {
    /// String form of each field, in `REQUIRED_FIELDS` order.
    pub fn field_values(&self) -> Vec<String> {
        vec![
            self.dependents.to_string(),
            self.tenure.to_string(),
            self.online_security.to_string(),
            self.online_backup.to_string(),
            self.internet_service.to_string(),
            self.device_protection.to_string(),
            self.tech_support.to_string(),
            self.contract.to_string(),
            self.paperless_billing.to_string(),
            self.monthly_charges.to_string(),
        ]
    }
}

/// An ordered batch of customer records plus the table shown to the user.
///
/// For form modes the table is just the records rendered in schema order.
/// For file mode it is the uploaded table as-is, extra columns included;
/// only `records` (the required columns) ever reach the classifier.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    records: Vec<CustomerRecord>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordBatch {
    pub fn from_records(records: Vec<CustomerRecord>) -> Self {
        let headers = REQUIRED_FIELDS.iter().map(|s| s.to_string()).collect();
        let rows = records.iter().map(|r| r.field_values()).collect();
        Self {
            records,
            headers,
            rows,
        }
    }

    pub fn from_table(
        records: Vec<CustomerRecord>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        debug_assert_eq!(records.len(), rows.len());
        Self {
            records,
            headers,
            rows,
        }
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Binary churn outcome, attached 1:1 to a record and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionLabel {
    Churn,
    NoChurn,
}

impl PredictionLabel {
    /// Classifiers speak in 0/1; anything non-zero is churn.
    pub fn from_raw(raw: u8) -> Self {
        if raw != 0 {
            PredictionLabel::Churn
        } else {
            PredictionLabel::NoChurn
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionLabel::Churn => "Churn",
            PredictionLabel::NoChurn => "NoChurn",
        }
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
