use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    MissingSeparator(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },

    #[error("Invalid {expected} value for '{key}': '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid time limit '{0}'. Expected a positive number of seconds.")]
    InvalidDuration(String),
}

/// Splits `KEY=VALUE` at the first `=`, trimming whitespace around both parts.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(input.to_string()))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "value",
            input: input.to_string(),
        });
    }
    Ok((key, value))
}

pub fn parse_typed<T: FromStr>(
    key: &str,
    value: &str,
    expected: &'static str,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    })
}

pub fn parse_seconds(seconds: f64) -> Result<Duration, ParseError> {
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(ParseError::InvalidDuration(seconds.to_string()));
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| ParseError::InvalidDuration(seconds.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_value_splits_at_first_equals() {
        assert_eq!(
            parse_key_value("weights.synergy=0.5").unwrap(),
            ("weights.synergy", "0.5")
        );
        assert_eq!(parse_key_value(" a = b=c ").unwrap(), ("a", "b=c"));
    }

    #[test]
    fn parse_key_value_rejects_malformed_input() {
        assert_eq!(
            parse_key_value("no-separator"),
            Err(ParseError::MissingSeparator("no-separator".to_string()))
        );
        assert!(matches!(
            parse_key_value("=1"),
            Err(ParseError::EmptyComponent { component: "key", .. })
        ));
        assert!(matches!(
            parse_key_value("planner.seed="),
            Err(ParseError::EmptyComponent { component: "value", .. })
        ));
    }

    #[test]
    fn parse_typed_reports_expected_type() {
        assert_eq!(parse_typed::<usize>("planner.num-reads", "12", "integer"), Ok(12));
        let err = parse_typed::<usize>("planner.num-reads", "twelve", "integer").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid integer value for 'planner.num-reads': 'twelve'"
        );
    }

    #[test]
    fn parse_seconds_requires_positive_finite_values() {
        assert_eq!(parse_seconds(1.5), Ok(Duration::from_millis(1500)));
        assert!(parse_seconds(0.0).is_err());
        assert!(parse_seconds(-3.0).is_err());
        assert!(parse_seconds(f64::NAN).is_err());
        assert!(parse_seconds(f64::INFINITY).is_err());
    }
}
