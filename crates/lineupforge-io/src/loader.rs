//! Typed entrant loading.

use std::fmt;
use std::path::Path;

use lineupforge_config::{ExposureConfig, ExposureMode, FieldNames, SourceConfig};
use lineupforge_core::{Entrant, EntrantPool, Outcome};
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::record::{parse_records, Record};

/// Why a row was left out of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Salary cell is empty.
    MissingSalary,
    /// Salary is zero (entrant not on the slate).
    ZeroSalary,
    NegativeSalary,
    /// Value cell is empty.
    MissingValue,
    NegativeValue,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::MissingSalary => "missing salary",
            SkipReason::ZeroSalary => "zero salary",
            SkipReason::NegativeSalary => "negative salary",
            SkipReason::MissingValue => "missing value",
            SkipReason::NegativeValue => "negative value",
        };
        f.write_str(text)
    }
}

/// A row excluded from the pool before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub id: String,
    pub reason: SkipReason,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedPool {
    pub pool: EntrantPool,
    pub skipped: Vec<SkippedRow>,
}

/// Column positions resolved from the header.
struct Columns {
    id: usize,
    salary: usize,
    projection: usize,
    value: usize,
    max_exposure: Option<usize>,
    probabilities: [(Outcome, Option<usize>); 3],
    width: usize,
}

impl Columns {
    fn resolve(header: &Record, fields: &FieldNames, mode: ExposureMode) -> Result<Self, LoadError> {
        let find = |name: &str| header.fields.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()));

        let max_exposure = match mode {
            ExposureMode::Unconstrained => None,
            ExposureMode::Field => Some(require(&fields.max_exposure)?),
        };

        let columns = Self {
            id: require(&fields.id)?,
            salary: require(&fields.salary)?,
            projection: require(&fields.projection)?,
            value: require(&fields.value)?,
            max_exposure,
            probabilities: [
                (Outcome::Top10, find(&fields.probability_top_10)),
                (Outcome::Top30, find(&fields.probability_top_30)),
                (Outcome::MakeCut, find(&fields.probability_make_cut)),
            ],
            width: header.fields.len(),
        };
        debug!(
            event = "columns_resolved",
            id = columns.id,
            salary = columns.salary,
            projection = columns.projection,
            value = columns.value,
            max_exposure = ?columns.max_exposure,
            probabilities = ?columns.probabilities.map(|(_, column)| column),
            width = columns.width,
        );
        Ok(columns)
    }
}

/// Loads the entrant file into a validated pool.
///
/// Rows with an empty or non-positive salary, or an empty or negative value,
/// are skipped with a warning. Everything else that is malformed is fatal:
/// a missing required column, a non-numeric cell, a ragged row, or any pool
/// invariant violation.
///
/// # Example
///
/// ```
/// use lineupforge_io::EntrantLoader;
///
/// let text = "\
/// dk_name_id,salary,projection,value,probability_make_cut
/// Rahm,11000,70.5,6.4,0.9
/// Spieth,0,60.1,5.0,0.7
/// Fowler,7600,55.0,7.2,
/// ";
///
/// let loaded = EntrantLoader::default().parse(text).unwrap();
/// assert_eq!(loaded.pool.len(), 2);
/// assert_eq!(loaded.skipped.len(), 1);
/// assert_eq!(loaded.pool[1].probabilities.make_cut, None);
/// ```
#[derive(Debug, Clone)]
pub struct EntrantLoader {
    fields: FieldNames,
    exposure: ExposureConfig,
    delimiter: char,
}

impl Default for EntrantLoader {
    fn default() -> Self {
        Self::new(FieldNames::default(), ExposureConfig::default(), ',')
    }
}

impl EntrantLoader {
    pub fn new(fields: FieldNames, exposure: ExposureConfig, delimiter: char) -> Self {
        Self {
            fields,
            exposure,
            delimiter,
        }
    }

    /// Creates a loader from the source and exposure sections of a config.
    pub fn from_config(source: &SourceConfig, exposure: &ExposureConfig) -> Self {
        Self::new(source.fields.clone(), exposure.clone(), source.delimiter)
    }

    /// Reads and parses the file at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedPool, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "read entrant file");
        self.parse(&text)
    }

    /// Parses entrant records from delimited text.
    pub fn parse(&self, text: &str) -> Result<LoadedPool, LoadError> {
        let mut records = parse_records(text, self.delimiter)?.into_iter();
        let header = records.next().ok_or(LoadError::Empty)?;
        let columns = Columns::resolve(&header, &self.fields, self.exposure.mode)?;

        let mut entrants = Vec::new();
        let mut skipped = Vec::new();

        for record in records {
            if record.fields.len() != columns.width {
                return Err(LoadError::RaggedRow {
                    line: record.line,
                    expected: columns.width,
                    found: record.fields.len(),
                });
            }
            match self.parse_entrant(&record, &columns)? {
                Ok(entrant) => entrants.push(entrant),
                Err(reason) => {
                    let id = record.fields[columns.id].trim().to_string();
                    warn!(line = record.line, id = %id, reason = %reason, "skipping entrant");
                    skipped.push(SkippedRow {
                        line: record.line,
                        id,
                        reason,
                    });
                }
            }
        }

        for (id, &cap) in &self.exposure.overrides {
            match entrants.iter_mut().find(|e| &e.id == id) {
                Some(entrant) => entrant.max_exposure = cap,
                None => warn!(id = %id, "exposure override names an unknown entrant"),
            }
        }

        let pool = EntrantPool::new(entrants)?;
        Ok(LoadedPool { pool, skipped })
    }

    /// Outer error is fatal; inner error means the row is skipped.
    fn parse_entrant(
        &self,
        record: &Record,
        columns: &Columns,
    ) -> Result<Result<Entrant, SkipReason>, LoadError> {
        let line = record.line;
        let cell = |index: usize| record.fields[index].trim();
        let id = cell(columns.id).to_string();

        let Some(salary) = parse_optional(line, &self.fields.salary, cell(columns.salary))? else {
            return Ok(Err(SkipReason::MissingSalary));
        };
        if salary == 0.0 {
            return Ok(Err(SkipReason::ZeroSalary));
        }
        if salary < 0.0 {
            return Ok(Err(SkipReason::NegativeSalary));
        }
        if salary.fract() != 0.0 || salary > f64::from(u32::MAX) {
            return Err(LoadError::InvalidSalary { line, value: salary });
        }

        let Some(value) = parse_optional(line, &self.fields.value, cell(columns.value))? else {
            return Ok(Err(SkipReason::MissingValue));
        };
        if value < 0.0 {
            return Ok(Err(SkipReason::NegativeValue));
        }

        let projection = parse_optional(line, &self.fields.projection, cell(columns.projection))?
            .ok_or_else(|| LoadError::MissingValue {
                line,
                field: self.fields.projection.clone(),
            })?;

        let mut entrant = Entrant::new(id, salary as u32, projection, value);

        if let Some(index) = columns.max_exposure {
            if let Some(cap) = parse_optional(line, &self.fields.max_exposure, cell(index))? {
                entrant.max_exposure = if self.exposure.percent { cap / 100.0 } else { cap };
            }
        }

        for (outcome, index) in columns.probabilities {
            if let Some(index) = index {
                let p = parse_optional(line, outcome.field_name(), cell(index))?;
                entrant.probabilities.set(outcome, p);
            }
        }

        Ok(Ok(entrant))
    }
}

fn parse_optional(line: usize, field: &str, raw: &str) -> Result<Option<f64>, LoadError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::NotNumeric {
            line,
            field: field.to_string(),
            value: raw.to_string(),
        })
}
