//! Lenient parsing of user-entered values
//!
//! Numeric form fields are normalized rather than rejected: blank or
//! malformed input becomes `0` and is then caught (or not) by the
//! validation rules for the entry kind.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::error::ValidationError;

/// Parse a user-entered number, yielding 0 for blank or malformed input
pub fn parse_number(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Serde helper accepting a JSON number, a numeric string, or null.
///
/// Use with `#[serde(default, deserialize_with = "lenient_number")]`.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        serde_json::Value::String(s) => parse_number(&s),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_normalizes_malformed_input() {
        assert_eq!(parse_number("150"), 150.0);
        assert_eq!(parse_number(" 12.5 "), 12.5);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-02").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(
            parse_date("02/01/2024"),
            Err(ValidationError::InvalidDate("02/01/2024".to_string()))
        );
    }

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "lenient_number")]
        odometer: f64,
        #[serde(default, deserialize_with = "lenient_number")]
        amount: f64,
    }

    #[test]
    fn test_lenient_number_accepts_strings_and_numbers() {
        let form: Form = serde_json::from_str(r#"{"odometer": "150", "amount": 300}"#).unwrap();
        assert_eq!(form.odometer, 150.0);
        assert_eq!(form.amount, 300.0);

        let form: Form = serde_json::from_str(r#"{"odometer": "n/a", "amount": null}"#).unwrap();
        assert_eq!(form.odometer, 0.0);
        assert_eq!(form.amount, 0.0);

        let form: Form = serde_json::from_str("{}").unwrap();
        assert_eq!(form.odometer, 0.0);
    }
}
