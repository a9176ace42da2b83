use crate::domain::model::Identifier;
use crate::utils::error::{Result, SibylError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Rejects blank identifiers before they reach the relation.
pub fn validate_identifier<Q>(field_name: &str, id: &Q) -> Result<()>
where
    Q: Identifier + ?Sized,
{
    if id.is_blank() {
        return Err(SibylError::InvalidArgument {
            field: field_name.to_string(),
            value: id.to_string(),
            reason: "Identifier cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(SibylError::InvalidArgument {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SibylError::InvalidArgument {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SibylError::InvalidArgument {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_delimiter(field_name: &str, value: &str) -> Result<u8> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() => Ok(*byte),
        _ => Err(SibylError::InvalidArgument {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Delimiter must be a single ASCII punctuation or whitespace character"
                .to_string(),
        }),
    }
}

pub fn validate_log_level(field_name: &str, value: &str) -> Result<()> {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&value.to_ascii_lowercase().as_str()) {
        return Err(SibylError::InvalidArgument {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported level. Valid levels: {}", LEVELS.join(", ")),
        });
    }
    Ok(())
}
