use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

use crate::core::standard::GrowthStandard;
use crate::core::types::{Metric, Sex};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate table for {metric}/{sex}")]
    DuplicateTable { metric: Metric, sex: Sex },

    #[error("Table {metric}/{sex} has no rows")]
    EmptyTable { metric: Metric, sex: Sex },

    #[error("Table {metric}/{sex} is not contiguous: expected age {expected}, found {found}")]
    NonContiguous {
        metric: Metric,
        sex: Sex,
        expected: u32,
        found: u32,
    },

    #[error("Table {metric}/{sex} has invalid parameters at age {age_months} (M and S must be positive and finite)")]
    InvalidRow {
        metric: Metric,
        sex: Sex,
        age_months: u32,
    },
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,

    /// Where the parameters came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    pub tables: Vec<ReferenceTable>,
}

/// Reference rows for one (metric, sex) pair, indexed directly by month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTable {
    metric: Metric,
    sex: Sex,
    rows: Vec<GrowthStandard>,
}

impl ReferenceTable {
    /// Build a table, checking that rows start at month 0 and have no gaps
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the rows are empty, non-contiguous or contain
    /// a row with non-positive M or S.
    pub fn new(metric: Metric, sex: Sex, rows: Vec<GrowthStandard>) -> Result<Self, CatalogError> {
        let table = Self { metric, sex, rows };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let (metric, sex) = (self.metric, self.sex);

        if self.rows.is_empty() {
            return Err(CatalogError::EmptyTable { metric, sex });
        }

        for (expected, row) in (0u32..).zip(&self.rows) {
            if row.age_months != expected {
                return Err(CatalogError::NonContiguous {
                    metric,
                    sex,
                    expected,
                    found: row.age_months,
                });
            }
            if !row.is_well_formed() {
                return Err(CatalogError::InvalidRow {
                    metric,
                    sex,
                    age_months: row.age_months,
                });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    #[must_use]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// Rows in month order; `rows()[n].age_months == n`
    #[must_use]
    pub fn rows(&self) -> &[GrowthStandard] {
        &self.rows
    }

    /// Oldest month covered by the table
    #[must_use]
    pub fn max_age(&self) -> u32 {
        self.rows.last().map_or(0, |r| r.age_months)
    }

    /// Row for an integer month, if inside the table
    #[must_use]
    pub fn row(&self, age_months: u32) -> Option<&GrowthStandard> {
        usize::try_from(age_months)
            .ok()
            .and_then(|idx| self.rows.get(idx))
            .filter(|r| r.age_months == age_months)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All reference tables, keyed by metric and sex
#[derive(Debug, Default)]
pub struct ReferenceTables {
    /// Tables in catalog order
    tables: Vec<ReferenceTable>,

    /// Where the parameters came from
    source: Option<String>,

    /// Index: (metric, sex) -> index in tables vec
    key_to_index: HashMap<(Metric, Sex), usize>,
}

impl<'a> IntoIterator for &'a ReferenceTables {
    type Item = &'a ReferenceTable;
    type IntoIter = std::slice::Iter<'a, ReferenceTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

static SHARED: OnceLock<ReferenceTables> = OnceLock::new();

impl ReferenceTables {
    /// Create an empty set of tables
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default catalog
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the embedded catalog fails to parse or validate.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Embedded at compile time; validated by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/growth_standards.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Process-wide copy of the embedded catalog, parsed on first use
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the embedded catalog fails to parse or validate.
    pub fn shared() -> Result<&'static Self, CatalogError> {
        if let Some(tables) = SHARED.get() {
            return Ok(tables);
        }
        let loaded = Self::load_embedded()?;
        // A concurrent first caller may have won the race; either copy is identical
        Ok(SHARED.get_or_init(|| loaded))
    }

    /// Load tables from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the file cannot be read, parsed or validated.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse tables from a JSON string
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the JSON is malformed or a table is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION, data.version
            );
        }

        let mut tables = Self::new();
        tables.source = data.source;
        for table in data.tables {
            tables.add_table(table)?;
        }

        Ok(tables)
    }

    /// Add a table
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateTable` if the (metric, sex) pair is already
    /// present, or a validation error if the rows are malformed.
    pub fn add_table(&mut self, table: ReferenceTable) -> Result<(), CatalogError> {
        table.validate()?;
        let key = (table.metric, table.sex);
        if self.key_to_index.contains_key(&key) {
            return Err(CatalogError::DuplicateTable {
                metric: table.metric,
                sex: table.sex,
            });
        }
        self.key_to_index.insert(key, self.tables.len());
        self.tables.push(table);
        Ok(())
    }

    /// Table for a (metric, sex) pair; `None` means no reference data
    #[must_use]
    pub fn get(&self, metric: Metric, sex: Sex) -> Option<&ReferenceTable> {
        self.key_to_index
            .get(&(metric, sex))
            .and_then(|&idx| self.tables.get(idx))
            .filter(|t| t.metric == metric && t.sex == sex)
    }

    /// Tables in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceTable> {
        self.tables.iter()
    }

    /// Where the parameters came from, if the catalog says
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Export tables to JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            source: self.source.clone(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            tables: self.tables.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
