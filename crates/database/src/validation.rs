//! Input validation for entity fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Empty value where one is required.
    Empty(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Negative or non-finite hourly rate.
    InvalidRate(f64),
    /// Malformed color tag.
    InvalidColor(String),
    /// Negative or non-finite amount.
    InvalidAmount { field: String, value: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::InvalidRate(rate) => {
                write!(f, "Invalid hourly rate: {} (must be zero or more)", rate)
            }
            ValidationError::InvalidColor(msg) => write!(f, "Invalid color: {}", msg),
            ValidationError::InvalidAmount { field, value } => {
                write!(f, "Invalid {}: {} (must be zero or more)", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for client and worker names.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum allowed length for work day notes.
pub const MAX_NOTE_LENGTH: usize = 2000;

/// Validate a display name.
pub fn validate_name(field: &str, name: &str) -> Result<(), ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }

    let len = name.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
            actual: len,
        });
    }

    Ok(())
}

/// Validate an hourly rate. Zero is allowed (volunteer or trial work).
pub fn validate_rate(rate: f64) -> Result<(), ValidationError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ValidationError::InvalidRate(rate));
    }
    Ok(())
}

/// Validate a non-negative money or hours value.
pub fn validate_amount(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// Validate a color tag in `#rrggbb` form.
pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    let color = color.trim();

    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| ValidationError::InvalidColor("must start with '#'".to_string()))?;

    if hex.len() != 6 {
        return Err(ValidationError::InvalidColor(
            "must have six hex digits".to_string(),
        ));
    }

    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidColor(format!(
            "invalid character '{}'",
            c
        )));
    }

    Ok(())
}

/// Validate a free-text note.
pub fn validate_note(note: &str) -> Result<(), ValidationError> {
    let len = note.chars().count();
    if len > MAX_NOTE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "note".to_string(),
            max: MAX_NOTE_LENGTH,
            actual: len,
        });
    }
    Ok(())
}
