//! Input validation helpers shared by the application services.

use serde::Deserialize;

use crate::shared::DomainError;

/// Numeric input as clients send it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for NumericInput {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for NumericInput {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Parse a floating point field. Blank text yields `None`.
pub fn parse_f64(field: &str, input: &NumericInput) -> Result<Option<f64>, DomainError> {
    let value = match input {
        NumericInput::Number(n) => *n,
        NumericInput::Text(s) if s.trim().is_empty() => return Ok(None),
        NumericInput::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::validation(format!("{field} must be a number")))?,
    };

    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be a finite number")));
    }
    Ok(Some(value))
}

/// Parse an integer field; fractional values are truncated toward zero.
pub fn parse_i32(field: &str, input: &NumericInput) -> Result<Option<i32>, DomainError> {
    let Some(value) = parse_f64(field, input)? else {
        return Ok(None);
    };
    let truncated = value.trunc();
    if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
        return Err(DomainError::validation(format!("{field} is out of range")));
    }
    Ok(Some(truncated as i32))
}

/// Basic `local@domain.tld` shape: one `@`, no whitespace, a dot inside the domain.
pub fn is_basic_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // at least one dot with non-empty text on both sides
    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

/// Trim and require a non-empty value.
pub fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
