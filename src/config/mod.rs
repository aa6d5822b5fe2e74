use clap::{Args, Parser, Subcommand};

use crate::core::collect::{MANUAL_BATCH_MAX, MANUAL_BATCH_MIN};
use crate::domain::model::{
    Contract, CustomerRecord, InternetService, ServiceOption, YesNo,
};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_negative, validate_path, validate_range, Validate,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "telco-churn")]
#[command(about = "Telco customer churn analysis: explore the data, inspect the model, predict churn")]
pub struct CliConfig {
    /// Serialized classifier artifact, loaded once at startup.
    #[arg(long, default_value = "./model/churn_model.json")]
    pub model_path: String,

    /// Training-time evaluation sidecar for the performance page.
    #[arg(long, default_value = "./model/churn_metrics.json")]
    pub metrics_path: String,

    /// Static dataset for the visualization page.
    #[arg(long, default_value = "./data/telco_customer_churn.csv")]
    pub dataset_path: String,

    /// Directory batch predictions are exported to.
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the dataset and its categorical distributions split by churn
    Visualize,
    /// Show the model's training-time evaluation metrics
    Performance,
    /// Predict customer churn
    Predict {
        #[command(subcommand)]
        mode: PredictMode,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PredictMode {
    /// One customer from form arguments
    Single(CustomerArgs),
    /// A CSV file of customers (columns must cover the required fields)
    Batch {
        /// Input CSV path
        #[arg(long)]
        input: String,

        /// Exported predictions file, written under the output directory
        #[arg(long, default_value = "predictions.csv")]
        output: String,
    },
    /// Repeat the customer form N times over interactive prompts
    Manual {
        /// Number of customers to input (1-100)
        #[arg(long, default_value = "1")]
        count: usize,

        /// Exported predictions file, written under the output directory
        #[arg(long, default_value = "predictions.csv")]
        output: String,
    },
}

/// The single-mode form. Categorical arguments only accept the schema's
/// enumeration values, so an out-of-domain choice never parses.
#[derive(Debug, Clone, Args)]
pub struct CustomerArgs {
    #[arg(long, value_enum)]
    pub dependents: YesNo,

    /// Tenure in months
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=72))]
    pub tenure: u32,

    #[arg(long, value_enum)]
    pub online_security: ServiceOption,

    #[arg(long, value_enum)]
    pub online_backup: ServiceOption,

    #[arg(long, value_enum)]
    pub internet_service: InternetService,

    #[arg(long, value_enum)]
    pub device_protection: ServiceOption,

    #[arg(long, value_enum)]
    pub tech_support: ServiceOption,

    #[arg(long, value_enum)]
    pub contract: Contract,

    #[arg(long, value_enum)]
    pub paperless_billing: YesNo,

    #[arg(long)]
    pub monthly_charges: f64,
}

impl CustomerArgs {
    pub fn into_record(self) -> CustomerRecord {
        CustomerRecord {
            dependents: self.dependents,
            tenure: self.tenure,
            online_security: self.online_security,
            online_backup: self.online_backup,
            internet_service: self.internet_service,
            device_protection: self.device_protection,
            tech_support: self.tech_support,
            contract: self.contract,
            paperless_billing: self.paperless_billing,
            monthly_charges: self.monthly_charges,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("model_path", &self.model_path)?;
        validate_path("metrics_path", &self.metrics_path)?;
        validate_path("dataset_path", &self.dataset_path)?;
        validate_path("output_path", &self.output_path)?;

        match &self.command {
            Command::Predict { mode } => match mode {
                PredictMode::Single(args) => {
                    validate_non_negative("monthly_charges", args.monthly_charges)
                }
                PredictMode::Batch { input, output } => {
                    validate_path("input", input)?;
                    validate_path("output", output)
                }
                PredictMode::Manual { count, output } => {
                    validate_range("count", *count, MANUAL_BATCH_MIN, MANUAL_BATCH_MAX)?;
                    validate_path("output", output)
                }
            },
            _ => Ok(()),
        }
    }
}
