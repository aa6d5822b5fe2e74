//! GBDT-backed churn classifier.
//!
//! Wraps `gbdt::gradient_boost::GBDT` behind the `Classifier` port. The
//! serialized artifact is the gbdt-rs native JSON format produced at
//! training time and loaded once at startup.
//!
//! Categorical encoding lives here, inside the classifier boundary: callers
//! hand over whole records and never see feature vectors. The encoding is
//! a fixed ordinal code per enum, features in schema column order, and must
//! match the layout the artifact was trained with.

use gbdt::decision_tree::Data;
use gbdt::gradient_boost::GBDT;

use crate::domain::model::{
    Contract, CustomerRecord, InternetService, ServiceOption, YesNo,
};
use crate::domain::ports::Classifier;
use crate::utils::error::{ChurnError, Result};

/// One feature per required column.
pub const FEATURE_COUNT: usize = 10;

/// Encode a record as the feature vector the model was trained on.
pub fn encode_record(record: &CustomerRecord) -> Vec<f32> {
    fn yes_no(v: YesNo) -> f32 {
        match v {
            YesNo::No => 0.0,
            YesNo::Yes => 1.0,
        }
    }

    fn service(v: ServiceOption) -> f32 {
        match v {
            ServiceOption::No => 0.0,
            ServiceOption::Yes => 1.0,
            ServiceOption::NoInternetService => 2.0,
        }
    }

    let internet = match record.internet_service {
        InternetService::Dsl => 0.0,
        InternetService::FiberOptic => 1.0,
        InternetService::No => 2.0,
    };

    let contract = match record.contract {
        Contract::MonthToMonth => 0.0,
        Contract::OneYear => 1.0,
        Contract::TwoYear => 2.0,
    };

    vec![
        yes_no(record.dependents),
        record.tenure as f32,
        service(record.online_security),
        service(record.online_backup),
        internet,
        service(record.device_protection),
        service(record.tech_support),
        contract,
        yes_no(record.paperless_billing),
        record.monthly_charges as f32,
    ]
}

pub struct GbdtChurnModel {
    model: GBDT,
}

impl GbdtChurnModel {
    /// Load the serialized artifact (gbdt-rs native JSON) from disk.
    pub fn load(path: &str) -> Result<Self> {
        let model = GBDT::load_model(path).map_err(|e| ChurnError::ModelLoadError {
            message: format!("{}: {}", path, e),
        })?;
        Ok(Self { model })
    }

    /// Wrap an in-memory trained model. Used by tests and tooling.
    pub fn from_trained(model: GBDT) -> Self {
        Self { model }
    }
}

impl Classifier for GbdtChurnModel {
    fn predict(&self, records: &[CustomerRecord]) -> Result<Vec<u8>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let data: Vec<Data> = records
            .iter()
            .map(|r| Data::new_test_data(encode_record(r), None))
            .collect();

        // LogLikelyhood output is a churn probability; 0.5 is the cut.
        let preds = self.model.predict(&data);
        if preds.len() != records.len() {
            return Err(ChurnError::PredictorError {
                message: format!(
                    "model produced {} outputs for {} records",
                    preds.len(),
                    records.len()
                ),
            });
        }

        Ok(preds.into_iter().map(|p| u8::from(p >= 0.5)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_layout() {
        let record = CustomerRecord {
            dependents: YesNo::Yes,
            tenure: 12,
            online_security: ServiceOption::NoInternetService,
            online_backup: ServiceOption::Yes,
            internet_service: InternetService::No,
            device_protection: ServiceOption::No,
            tech_support: ServiceOption::Yes,
            contract: Contract::TwoYear,
            paperless_billing: YesNo::No,
            monthly_charges: 19.75,
        };

        let features = encode_record(&record);
        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features[0], 1.0);
        assert_eq!(features[1], 12.0);
        assert_eq!(features[2], 2.0);
        assert_eq!(features[4], 2.0);
        assert_eq!(features[7], 2.0);
        assert_eq!(features[9], 19.75);
    }

    #[test]
    fn test_load_missing_artifact_fails() {
        assert!(matches!(
            GbdtChurnModel::load("/nonexistent/churn_model.json"),
            Err(ChurnError::ModelLoadError { .. })
        ));
    }
}
