//! Schema registry: the required columns and their legal value domains.
//!
//! Validation is all-or-nothing over column presence. Extra columns in an
//! uploaded table are permitted here and ignored downstream.

use crate::domain::model::REQUIRED_FIELDS;
use crate::utils::error::{ChurnError, Result};

/// Legal value domain of a required field.
#[derive(Debug, Clone, Copy)]
pub enum FieldDomain {
    /// Closed set of categorical values.
    Enumeration(&'static [&'static str]),
    /// Inclusive integer range.
    IntRange(i64, i64),
    /// Any finite real >= 0.
    NonNegativeReal,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub domain: FieldDomain,
}

const YES_NO: &[&str] = &["Yes", "No"];
const SERVICE_OPTION: &[&str] = &["Yes", "No", "No internet service"];
const INTERNET_SERVICE: &[&str] = &["DSL", "Fiber optic", "No"];
const CONTRACT: &[&str] = &["Month-to-month", "One year", "Two year"];

const FIELD_SPECS: [FieldSpec; 10] = [
    FieldSpec { name: "Dependents", domain: FieldDomain::Enumeration(YES_NO) },
    FieldSpec { name: "tenure", domain: FieldDomain::IntRange(0, 72) },
    FieldSpec { name: "OnlineSecurity", domain: FieldDomain::Enumeration(SERVICE_OPTION) },
    FieldSpec { name: "OnlineBackup", domain: FieldDomain::Enumeration(SERVICE_OPTION) },
    FieldSpec { name: "InternetService", domain: FieldDomain::Enumeration(INTERNET_SERVICE) },
    FieldSpec { name: "DeviceProtection", domain: FieldDomain::Enumeration(SERVICE_OPTION) },
    FieldSpec { name: "TechSupport", domain: FieldDomain::Enumeration(SERVICE_OPTION) },
    FieldSpec { name: "Contract", domain: FieldDomain::Enumeration(CONTRACT) },
    FieldSpec { name: "PaperlessBilling", domain: FieldDomain::Enumeration(YES_NO) },
    FieldSpec { name: "MonthlyCharges", domain: FieldDomain::NonNegativeReal },
];

/// All required fields with their domains, in canonical column order.
pub fn field_specs() -> &'static [FieldSpec] {
    &FIELD_SPECS
}

/// Check that `headers` covers every required column. Missing names are
/// reported together, in schema order, and the batch is rejected as a
/// whole; no partial validation.
pub fn validate_columns(headers: &[String]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|s| s.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ChurnError::MissingFieldsError { missing })
    }
}
