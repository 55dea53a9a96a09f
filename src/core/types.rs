use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while interpreting caller-supplied metric/sex codes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Unknown metric '{0}' (expected height or weight)")]
    UnknownMetric(String),

    #[error("Unknown sex code '{0}' (expected male/female, m/f or 1/2)")]
    UnknownSex(String),

    #[error("Sex was not specified and no default is configured")]
    UnspecifiedSex,
}

/// Anthropometric measurement a reference table describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Recumbent length / standing height, in centimetres
    Height,
    /// Body weight, in kilograms
    Weight,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Height, Metric::Weight];

    /// Parse a metric name, accepting a few common synonyms
    ///
    /// # Errors
    ///
    /// Returns `CodeError::UnknownMetric` for anything that is not a known name.
    pub fn parse(s: &str) -> Result<Self, CodeError> {
        match s.trim().to_lowercase().as_str() {
            "height" | "length" | "stature" => Ok(Self::Height),
            "weight" | "mass" => Ok(Self::Weight),
            _ => Err(CodeError::UnknownMetric(s.to_string())),
        }
    }

    /// Unit the metric's values are expressed in
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::Height => "cm",
            Self::Weight => "kg",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Height => write!(f, "height"),
            Self::Weight => write!(f, "weight"),
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Sex of the reference population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[serde(alias = "1", alias = "m")]
    Male,
    #[serde(alias = "2", alias = "f")]
    Female,
}

impl Sex {
    /// Parse an explicit sex code. Empty input is not accepted here; see
    /// [`Sex::normalize`] for the defaulting behavior.
    ///
    /// # Errors
    ///
    /// Returns `CodeError::UnknownSex` for unrecognised codes.
    pub fn parse(s: &str) -> Result<Self, CodeError> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "1" | "boy" => Ok(Self::Male),
            "female" | "f" | "2" | "girl" => Ok(Self::Female),
            _ => Err(CodeError::UnknownSex(s.to_string())),
        }
    }

    /// Resolve a possibly-empty sex input, falling back to `default` when the
    /// input is missing or blank.
    ///
    /// # Errors
    ///
    /// Returns `CodeError::UnspecifiedSex` if the input is blank and the default
    /// is [`SexDefault::Reject`], or `CodeError::UnknownSex` for unrecognised codes.
    pub fn normalize(raw: Option<&str>, default: SexDefault) -> Result<Self, CodeError> {
        match raw.map(str::trim) {
            Some(s) if !s.is_empty() => Self::parse(s),
            _ => {
                let resolved = default.resolve().ok_or(CodeError::UnspecifiedSex)?;
                debug!("Sex not specified, using {} reference table", resolved);
                Ok(resolved)
            }
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// What to do when a caller does not say which sex's table to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SexDefault {
    /// Use the male reference table (historical behavior)
    #[default]
    Male,
    /// Use the female reference table
    Female,
    /// Refuse the request
    Reject,
}

impl SexDefault {
    #[must_use]
    pub fn resolve(self) -> Option<Sex> {
        match self {
            Self::Male => Some(Sex::Male),
            Self::Female => Some(Sex::Female),
            Self::Reject => None,
        }
    }
}

/// How ages outside a table's documented range are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AgePolicy {
    /// Use the nearest boundary row unchanged
    #[default]
    Clamp,
    /// Return an error for ages below 0 or above the table maximum
    Reject,
}
