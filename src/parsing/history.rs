use std::path::Path;
use thiserror::Error;

use crate::core::measurement::Measurement;
use crate::utils::validation::{history_limit_reached, MAX_HISTORY_POINTS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid measurement history: {0}")]
    InvalidFormat(String),

    #[error("Too many measurements: {0} exceeds maximum of {MAX_HISTORY_POINTS}")]
    TooManyMeasurements(usize),
}

/// Parse a TSV/CSV file with columns: `age_months`, value
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_history_file(path: &Path, delimiter: char) -> Result<Vec<Measurement>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_history_text(&content, delimiter)
}

/// Parse TSV/CSV text with columns: `age_months`, value
///
/// Rows are returned in file order; a later row for the same month wins when
/// the history is charted.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 2 fields or
/// contain non-numeric values, or `ParseError::TooManyMeasurements` if the
/// limit is exceeded. An empty history is valid.
pub fn parse_history_text(text: &str, delimiter: char) -> Result<Vec<Measurement>, ParseError> {
    let mut measurements = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "age" || first == "age_months" || first == "months" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 2 fields"
            )));
        }

        let age_months: f64 = fields[0].parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid age on line {}: '{}'",
                line_num, fields[0]
            ))
        })?;
        let value: f64 = fields[1].parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid value on line {}: '{}'",
                line_num, fields[1]
            ))
        })?;

        if history_limit_reached(measurements.len()) {
            return Err(ParseError::TooManyMeasurements(measurements.len() + 1));
        }

        measurements.push(Measurement::new(age_months, value));
    }

    Ok(measurements)
}

/// Parse a compact `age:value` pair, as given on the command line
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the pair is malformed.
pub fn parse_point(s: &str) -> Result<Measurement, ParseError> {
    let (age, value) = s
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidFormat(format!("Expected AGE:VALUE, got '{s}'")))?;

    let age_months = age
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("Invalid age in '{s}'")))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("Invalid value in '{s}'")))?;

    Ok(Measurement::new(age_months, value))
}
