use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Uploaded data is missing required columns: {}", missing.join(", "))]
    MissingFieldsError { missing: Vec<String> },

    #[error("Malformed input file: {message}")]
    MalformedFileError { message: String },

    #[error("Row {row}: field '{field}' has out-of-domain value '{value}'")]
    InvalidValueError {
        row: usize,
        field: String,
        value: String,
    },

    #[error("Failed to load model: {message}")]
    ModelLoadError { message: String },

    #[error("Prediction failed: {message}")]
    PredictorError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl ChurnError {
    /// Exit code for the CLI: config problems are distinguished from
    /// processing failures so scripts can tell them apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChurnError::ValidationError { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChurnError>;
