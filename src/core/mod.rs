pub mod collect;
pub mod predict;
pub mod present;
pub mod schema;
pub mod session;

pub use crate::domain::model::{CustomerRecord, PredictionLabel, RecordBatch};
pub use crate::domain::ports::{Classifier, InputSource, Storage};
pub use crate::utils::error::Result;
