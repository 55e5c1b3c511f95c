//! Lineup output records.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use lineupforge_core::{round_to, EntrantPool, Lineup, Outcome};

use crate::record::write_record;

/// Output column headers for lineups of `lineup_size` members.
///
/// # Example
///
/// ```
/// use lineupforge_io::lineup_header;
///
/// assert_eq!(
///     lineup_header(2),
///     vec!["1", "2", "salary", "projection", "log_usage",
///          "probability_top_10", "probability_top_30", "probability_make_cut"]
/// );
/// ```
pub fn lineup_header(lineup_size: usize) -> Vec<String> {
    let mut header: Vec<String> = (1..=lineup_size).map(|i| i.to_string()).collect();
    header.extend(["salary", "projection", "log_usage"].map(String::from));
    header.extend(Outcome::ALL.map(|o| o.field_name().to_string()));
    header
}

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct LineupRecord {
    /// Member ids in generation order.
    pub slots: Vec<String>,
    /// Total salary.
    pub salary: u64,
    /// Total projection, rounded to 2 places.
    pub projection: f64,
    /// Reserved usage metric, always 0.
    pub log_usage: f64,
    /// Joint probabilities in [`Outcome::ALL`] order, each rounded to the
    /// outcome's precision. `None` when undefined for this lineup.
    pub probabilities: [Option<f64>; 3],
}

impl LineupRecord {
    /// Aggregates a lineup for reporting.
    pub fn from_lineup(lineup: &Lineup, pool: &EntrantPool) -> Self {
        Self {
            slots: lineup.ids(pool).map(str::to_string).collect(),
            salary: lineup.total_salary(),
            projection: round_to(lineup.total_projection(), 2),
            log_usage: 0.0,
            probabilities: Outcome::ALL.map(|outcome| {
                lineup
                    .joint_probability(pool, outcome)
                    .map(|p| round_to(p, outcome.decimal_places()))
            }),
        }
    }

    /// Returns the reported probability for `outcome`.
    pub fn probability(&self, outcome: Outcome) -> Option<f64> {
        match outcome {
            Outcome::Top10 => self.probabilities[0],
            Outcome::Top30 => self.probabilities[1],
            Outcome::MakeCut => self.probabilities[2],
        }
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = self.slots.clone();
        fields.push(self.salary.to_string());
        fields.push(self.projection.to_string());
        fields.push(self.log_usage.to_string());
        fields.extend(
            self.probabilities
                .iter()
                .map(|p| p.map(|p| p.to_string()).unwrap_or_default()),
        );
        fields
    }
}

/// Writes lineup records as delimited text.
///
/// # Example
///
/// ```
/// use lineupforge_io::{LineupRecord, LineupWriter};
///
/// let record = LineupRecord {
///     slots: vec!["a".into(), "b".into()],
///     salary: 300,
///     projection: 12.5,
///     log_usage: 0.0,
///     probabilities: [Some(0.000012), None, Some(0.42)],
/// };
///
/// let text = LineupWriter::new(',').to_string(&[record], 2);
/// assert_eq!(
///     text,
///     "1,2,salary,projection,log_usage,probability_top_10,probability_top_30,probability_make_cut\n\
///      a,b,300,12.5,0,0.000012,,0.42\n"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LineupWriter {
    delimiter: char,
}

impl Default for LineupWriter {
    fn default() -> Self {
        Self::new(',')
    }
}

impl LineupWriter {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Renders the header and all records.
    pub fn to_string(&self, records: &[LineupRecord], lineup_size: usize) -> String {
        let mut output = String::new();
        write_record(&mut output, lineup_header(lineup_size), self.delimiter);
        for record in records {
            write_record(&mut output, record.fields(), self.delimiter);
        }
        output
    }

    /// Writes records to `path`, creating parent directories.
    pub fn to_file(
        &self,
        records: &[LineupRecord],
        lineup_size: usize,
        path: impl AsRef<Path>,
    ) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_string(records, lineup_size))
    }

    /// Writes records to a writer.
    pub fn write<W: Write>(
        &self,
        records: &[LineupRecord],
        lineup_size: usize,
        mut writer: W,
    ) -> io::Result<()> {
        writer.write_all(self.to_string(records, lineup_size).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use lineupforge_core::Entrant;

    use super::*;

    fn pool() -> EntrantPool {
        EntrantPool::new(vec![
            Entrant::new("Rahm", 11_000, 70.123, 6.0)
                .with_probability(Outcome::Top10, 0.3)
                .with_probability(Outcome::MakeCut, 0.912345),
            Entrant::new("Young, C", 9_000, 60.006, 6.0)
                .with_probability(Outcome::Top10, 0.2)
                .with_probability(Outcome::MakeCut, 0.8),
        ])
        .unwrap()
    }

    #[test]
    fn test_record_from_lineup() {
        let pool = pool();
        let lineup = Lineup::from_members(&pool, &[0, 1]);
        let record = LineupRecord::from_lineup(&lineup, &pool);

        assert_eq!(record.slots, vec!["Rahm", "Young, C"]);
        assert_eq!(record.salary, 20_000);
        assert_eq!(record.projection, 130.13);
        assert_eq!(record.log_usage, 0.0);
        assert_eq!(record.probability(Outcome::Top10), Some(0.06));
        assert_eq!(record.probability(Outcome::Top30), None);
        // 0.912345 * 0.8 = 0.729876
        assert_eq!(record.probability(Outcome::MakeCut), Some(0.7299));
    }

    #[test]
    fn test_zero_probability_reported_as_zero() {
        let pool = EntrantPool::new(vec![
            Entrant::new("a", 1, 1.0, 1.0).with_probability(Outcome::Top10, 0.0),
            Entrant::new("b", 1, 1.0, 1.0).with_probability(Outcome::Top10, 0.5),
        ])
        .unwrap();
        let record = LineupRecord::from_lineup(&Lineup::from_members(&pool, &[0, 1]), &pool);
        assert_eq!(record.probability(Outcome::Top10), Some(0.0));
    }

    #[test]
    fn test_writer_quotes_ids_with_delimiter() {
        let pool = pool();
        let record = LineupRecord::from_lineup(&Lineup::from_members(&pool, &[0, 1]), &pool);
        let text = LineupWriter::default().to_string(&[record], 2);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[1].starts_with("Rahm,\"Young, C\",20000,130.13,0,0.06,,0.7299"));
    }

    #[test]
    fn test_to_file_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineups").join("401-0.csv");
        LineupWriter::default().to_file(&[], 6, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.starts_with("1,2,3,4,5,6,salary"));
    }
}
