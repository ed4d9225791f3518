use crate::core::ConfigProvider;
use crate::utils::error::{CardError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks shared by every configuration source.
pub fn validate_provider_settings<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_url("provider.endpoint", config.endpoint())?;
    validate_non_empty_string("provider.model", config.model())?;

    if let Some(temperature) = config.temperature() {
        validate_range("provider.temperature", temperature, 0.0, 2.0)?;
    }
    if let Some(max_tokens) = config.max_tokens() {
        validate_positive_number("provider.max_tokens", max_tokens as usize, 1)?;
    }
    if let Some(path) = config.output_path() {
        validate_path("output.path", path)?;
    }

    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
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
    if !(min..=max).contains(&value) {
        return Err(CardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint", "https://example.com").is_ok());
        assert!(validate_url("endpoint", "http://localhost:11434/v1").is_ok());
        assert!(validate_url("endpoint", "").is_err());
        assert!(validate_url("endpoint", "invalid-url").is_err());
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_tokens", 5, 1).is_ok());
        assert!(validate_positive_number("max_tokens", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("temperature", 0.0, 0.0, 2.0).is_ok());
        assert!(validate_range("temperature", 2.0, 0.0, 2.0).is_ok());
        assert!(validate_range("temperature", -0.1, 0.0, 2.0).is_err());
        assert!(validate_range("temperature", f32::NAN, 0.0, 2.0).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("model", "gpt-4o-mini").is_ok());
        assert!(validate_non_empty_string("model", "  ").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "./cards").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "bad\0path").is_err());
    }
}
