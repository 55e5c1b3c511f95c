//! Delimited record reading and writing.
//!
//! Fields may be wrapped in double quotes; a doubled quote inside a quoted
//! field is a literal quote. Records never span lines.


use crate::error::LoadError;

/// One parsed row with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Splits `text` into records, skipping blank lines.
///
/// # Example
///
/// ```
/// use lineupforge_io::parse_records;
///
/// let records = parse_records("id,salary\n\"Smith, J\",7500\n\n", ',').unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].fields, vec!["Smith, J", "7500"]);
/// assert_eq!(records[1].line, 2);
/// ```
pub fn parse_records(text: &str, delimiter: char) -> Result<Vec<Record>, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let fields = split_line(raw, delimiter).ok_or(LoadError::UnterminatedQuote { line })?;
        records.push(Record { line, fields });
    }

    Ok(records)
}

fn split_line(raw: &str, delimiter: char) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = raw.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && field.trim().is_empty() {
            field.clear();
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field);
    Some(fields)
}

/// Appends one record followed by a newline, quoting fields that contain the
/// delimiter, a quote or a line break.
///
/// # Example
///
/// ```
/// use lineupforge_io::write_record;
///
/// let mut out = String::new();
/// write_record(&mut out, ["a", "b,c", "say \"hi\""], ',');
/// assert_eq!(out, "a,\"b,c\",\"say \"\"hi\"\"\"\n");
/// ```
pub fn write_record<I, S>(out: &mut String, fields: I, delimiter: char)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        let field = field.as_ref();
        if field.contains([delimiter, '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}
