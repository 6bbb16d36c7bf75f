use crate::utils::error::{BootstrapError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks a `host:port` store endpoint. DNS resolution is left to the
/// client; only the obvious mistakes are rejected here.
pub fn validate_endpoint(field_name: &str, endpoint: &str) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(BootstrapError::ConfigError {
            field: field_name.to_string(),
            reason: "endpoint cannot be empty".to_string(),
        });
    }

    let Some((host, port)) = endpoint.rsplit_once(':') else {
        return Err(BootstrapError::ConfigError {
            field: field_name.to_string(),
            reason: format!("'{}' is not a host:port address", endpoint),
        });
    };

    if host.is_empty() {
        return Err(BootstrapError::ConfigError {
            field: field_name.to_string(),
            reason: format!("'{}' has an empty host", endpoint),
        });
    }

    if port.parse::<u16>().is_err() {
        return Err(BootstrapError::ConfigError {
            field: field_name.to_string(),
            reason: format!("'{}' is not a valid port", port),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(BootstrapError::ConfigError {
            field: field_name.to_string(),
            reason: format!("value must be at least {}", min_value),
        });
    }
    Ok(())
}
