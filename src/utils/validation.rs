use crate::utils::error::{LaunchError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn env_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LaunchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LaunchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LaunchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_env_var_name(field_name: &str, name: &str) -> Result<()> {
    if !env_name_pattern().is_match(name) {
        return Err(LaunchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a valid environment variable name ([A-Za-z_][A-Za-z0-9_]*)"
                .to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| LaunchError::MissingConfigError {
        field: field_name.to_string(),
    })
}
