use std::borrow::Cow;

use thiserror::Error;

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Dialect – CSV convention pair (field separator, decimal separator)
// ---------------------------------------------------------------------------

/// How many bytes of the input the sniffer looks at.
const SNIFF_LEN: usize = 4096;

/// A CSV formatting convention. German bank exports use `;` between fields
/// and `,` as the decimal mark; everything else is treated as standard CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `;`-separated fields, `,` decimal mark.
    German,
    /// `,`-separated fields, `.` decimal mark.
    Standard,
}

impl Dialect {
    pub fn field_separator(self) -> u8 {
        match self {
            Dialect::German => b';',
            Dialect::Standard => b',',
        }
    }

    pub fn decimal_separator(self) -> char {
        match self {
            Dialect::German => ',',
            Dialect::Standard => '.',
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum IngestError {
    /// Neither `;` nor `,` occurs in the sniffed prefix, so the input cannot
    /// be a delimited file we understand.
    #[error("can't detect delimiter: no ';' or ',' found in the input")]
    UnknownDelimiter,

    /// The csv parser rejected the stream (e.g. a row whose field count
    /// does not match the header).
    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Dialect sniffing
// ---------------------------------------------------------------------------

/// Detect the dialect from the first [`SNIFF_LEN`] bytes, decoded lossily.
///
/// A candidate separator counts as consistent when every sampled line
/// contains it the same positive number of times (quoted regions ignored).
/// One consistent candidate wins outright; both consistent, the comma wins.
/// When neither is consistent the candidate appearing on more lines wins,
/// ties falling back to the German convention. A ragged file still sniffs
/// as its majority separator here and then fails in the parser with a
/// row-shape error instead of a detection error.
pub fn sniff_dialect(raw: &[u8]) -> Result<Dialect, IngestError> {
    let truncated = raw.len() > SNIFF_LEN;
    let sample = String::from_utf8_lossy(&raw[..raw.len().min(SNIFF_LEN)]).into_owned();

    if !sample.contains(';') && !sample.contains(',') {
        return Err(IngestError::UnknownDelimiter);
    }

    let mut lines: Vec<&str> = sample.lines().filter(|l| !l.is_empty()).collect();
    if truncated {
        // The sample may end mid-line; an incomplete line would skew the
        // per-line counts.
        lines.pop();
    }

    let semi_ok = consistent_per_line(&lines, ';');
    let comma_ok = consistent_per_line(&lines, ',');

    match (semi_ok, comma_ok) {
        (true, false) => Ok(Dialect::German),
        (false, true) => Ok(Dialect::Standard),
        (true, true) => Ok(Dialect::Standard),
        (false, false) => {
            let semi_cov = lines.iter().filter(|l| count_unquoted(l, ';') > 0).count();
            let comma_cov = lines.iter().filter(|l| count_unquoted(l, ',') > 0).count();
            if comma_cov > semi_cov {
                Ok(Dialect::Standard)
            } else {
                Ok(Dialect::German)
            }
        }
    }
}

/// True when `ch` occurs the same positive number of times in every line,
/// not counting occurrences inside double-quoted fields.
fn consistent_per_line(lines: &[&str], ch: char) -> bool {
    let mut counts = lines.iter().map(|l| count_unquoted(l, ch));
    match counts.next() {
        Some(first) if first > 0 => counts.all(|c| c == first),
        _ => false,
    }
}

fn count_unquoted(line: &str, ch: char) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ch && !in_quotes {
            count += 1;
        }
    }
    count
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// Parse a raw CSV byte stream into a [`Table`].
///
/// The dialect is sniffed first; each field is then decoded lossily and
/// converted: empty field → null, numeric (after swapping the dialect's
/// decimal mark for `.`) → float, anything else stays a string. A row whose
/// field count differs from the header aborts the whole ingestion; no
/// partial table is produced.
pub fn ingest(raw: &[u8]) -> Result<Table, IngestError> {
    let dialect = sniff_dialect(raw)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(dialect.field_separator())
        .from_reader(raw);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for record in reader.byte_records() {
        let record = record?;
        for (i, field) in record.iter().enumerate() {
            let text = String::from_utf8_lossy(field);
            columns[i].push(parse_cell(&text, dialect.decimal_separator()));
        }
    }

    let mut table = Table::new();
    for (name, values) in headers.into_iter().zip(columns) {
        table.push_column(name, values);
    }
    Ok(table)
}

/// Convert one raw field. Numeric conversion failure is tolerated at cell
/// granularity: the original string is kept untouched.
fn parse_cell(field: &str, decimal: char) -> CellValue {
    if field.is_empty() {
        return CellValue::Null;
    }
    let candidate: Cow<'_, str> = if decimal == '.' {
        Cow::Borrowed(field)
    } else {
        Cow::Owned(field.replace(decimal, "."))
    };
    match candidate.trim().parse::<f64>() {
        Ok(v) => CellValue::Number(v),
        Err(_) => CellValue::Text(field.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Serialization (the ingestor's inverse, used for download)
// ---------------------------------------------------------------------------

/// Serialize a table to standard CSV: `,` separator, `.` decimals, header
/// row included, nulls as empty fields, no index column.
pub fn to_csv(table: &Table) -> Result<Vec<u8>, IngestError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(table.column_names())?;

        let columns: Vec<&[CellValue]> = table
            .column_names()
            .iter()
            .filter_map(|name| table.column(name))
            .collect();

        for row in 0..table.n_rows() {
            let record: Vec<String> = columns
                .iter()
                .map(|col| col[row].as_text().into_owned())
                .collect();
            writer.write_record(&record)?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(table: &Table, name: &str) -> Vec<f64> {
        table
            .column(name)
            .unwrap()
            .iter()
            .map(|v| match v {
                CellValue::Number(x) => *x,
                other => panic!("expected number, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn german_dialect_detected_and_parsed() {
        let table = ingest(b"A;B\n1,23;4,56\n7,89;0,12").unwrap();
        assert_eq!(table.column_names(), ["A", "B"]);
        assert_eq!(numbers(&table, "A"), [1.23, 7.89]);
        assert_eq!(numbers(&table, "B"), [4.56, 0.12]);
    }

    #[test]
    fn standard_dialect_detected_and_parsed() {
        let table = ingest(b"A,B\n1.5,2.5\n3.0,4.0").unwrap();
        assert_eq!(numbers(&table, "A"), [1.5, 3.0]);
        assert_eq!(numbers(&table, "B"), [2.5, 4.0]);
    }

    #[test]
    fn missing_delimiter_is_an_error() {
        assert!(matches!(
            ingest(b"A\n1\n2"),
            Err(IngestError::UnknownDelimiter)
        ));
    }

    #[test]
    fn row_shape_mismatch_is_an_error() {
        assert!(matches!(
            ingest(b"A,B\n1,2,3"),
            Err(IngestError::Malformed(_))
        ));
    }

    #[test]
    fn empty_fields_become_null_and_text_survives() {
        let table = ingest(b"Desc,Amount\nrewe markt,12.5\n,3.0\nuber *trip,").unwrap();
        let desc = table.column("Desc").unwrap();
        assert_eq!(desc[0], CellValue::Text("rewe markt".into()));
        assert_eq!(desc[1], CellValue::Null);
        assert_eq!(desc[2], CellValue::Text("uber *trip".into()));
        let amount = table.column("Amount").unwrap();
        assert_eq!(amount[2], CellValue::Null);
    }

    #[test]
    fn failed_numeric_coercion_keeps_the_original_string() {
        let table = ingest(b"A;B\nx1,2x;3,5").unwrap();
        assert_eq!(table.column("A").unwrap()[0], CellValue::Text("x1,2x".into()));
        assert_eq!(table.column("B").unwrap()[0], CellValue::Number(3.5));
    }

    #[test]
    fn export_round_trips_through_ingest() {
        let mut table = Table::new();
        table.push_column(
            "Desc",
            vec![
                CellValue::Text("coffee, large".into()),
                CellValue::Null,
                CellValue::Text("rent".into()),
            ],
        );
        table.push_column(
            "Amount",
            vec![
                CellValue::Number(3.75),
                CellValue::Number(-12.0),
                CellValue::Number(800.5),
            ],
        );

        let bytes = to_csv(&table).unwrap();
        let back = ingest(&bytes).unwrap();

        assert_eq!(back.column_names(), table.column_names());
        assert_eq!(back.column("Desc").unwrap(), table.column("Desc").unwrap());
        for (a, b) in numbers(&back, "Amount")
            .iter()
            .zip(numbers(&table, "Amount"))
        {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn export_uses_comma_and_empty_for_null() {
        let mut table = Table::new();
        table.push_column("A", vec![CellValue::Number(1.5), CellValue::Null]);
        table.push_column("B", vec![CellValue::Text("x".into()), CellValue::Text("y".into())]);
        let text = String::from_utf8(to_csv(&table).unwrap()).unwrap();
        assert_eq!(text, "A,B\n1.5,x\n,y\n");
    }

    #[test]
    fn header_only_input_gives_empty_table() {
        let table = ingest(b"A,B\n").unwrap();
        assert_eq!(table.column_names(), ["A", "B"]);
        assert_eq!(table.n_rows(), 0);
    }
}
