use std::sync::OnceLock;

use regex::Regex;

use crate::shared::errors::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub struct Validator;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("username pattern is a valid regex")
    })
}

impl Validator {
    /// Trim a required text field and reject it when nothing is left.
    pub fn required(field: &str, value: Option<&str>) -> Result<String, AppError> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(AppError::ValidationError(format!(
                "Missing required field: {}",
                field
            ))),
        }
    }

    /// Trim an optional text field; blank values collapse to `None`.
    pub fn optional(value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
        if value.chars().count() > max {
            return Err(AppError::ValidationError(format!(
                "{} too long (max {} characters)",
                field, max
            )));
        }
        Ok(())
    }

    pub fn validate_username(username: &str) -> Result<(), AppError> {
        Self::validate_max_length("Username", username, 80)?;
        if !username_pattern().is_match(username) {
            return Err(AppError::ValidationError(
                "Username may only contain letters, digits, '.', '_' and '-'".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<(), AppError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }

    pub fn validate_cost(cost: f64) -> Result<(), AppError> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(AppError::ValidationError(
                "Cost must be a non-negative amount".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(Validator::required("first_name", Some("  Ann ")).unwrap(), "Ann");
        assert!(Validator::required("first_name", Some("   ")).is_err());
        assert!(Validator::required("first_name", None).is_err());
    }

    #[test]
    fn optional_collapses_blank_to_none() {
        assert_eq!(Validator::optional(Some("  ")), None);
        assert_eq!(
            Validator::optional(Some(" a@b.c ")),
            Some("a@b.c".to_string())
        );
    }

    #[test]
    fn username_rules() {
        assert!(Validator::validate_username("manager1").is_ok());
        assert!(Validator::validate_username("super_admin").is_ok());
        assert!(Validator::validate_username("bad name").is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(Validator::validate_password("12345").is_err());
        assert!(Validator::validate_password("123456").is_ok());
    }

    #[test]
    fn cost_must_be_non_negative() {
        assert!(Validator::validate_cost(0.0).is_ok());
        assert!(Validator::validate_cost(-1.0).is_err());
        assert!(Validator::validate_cost(f64::NAN).is_err());
    }
}
