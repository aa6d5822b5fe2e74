use crate::utils::error::{ChurnError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ChurnError::ValidationError {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(ChurnError::ValidationError {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ChurnError::ValidationError {
            message: format!(
                "{}: value {} must be between {} and {}",
                field_name, value, min, max
            ),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChurnError::ValidationError {
            message: format!("{}: value {} must be a non-negative number", field_name, value),
        });
    }
    Ok(())
}
