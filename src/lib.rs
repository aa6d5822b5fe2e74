pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{GbdtChurnModel, LocalStorage};
pub use crate::config::{CliConfig, Command, PredictMode};
pub use crate::core::session::{PredictionSession, SessionState};
pub use crate::domain::model::{CustomerRecord, PredictionLabel, RecordBatch};
pub use crate::domain::ports::{Classifier, InputSource, Storage};
pub use crate::utils::error::{ChurnError, Result};
