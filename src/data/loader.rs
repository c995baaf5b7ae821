use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::model::{RawTable, Record, Series};
use crate::error::SkipReason;

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// List the input files in `dir` carrying `extension`, sorted by file name.
///
/// Matching mirrors a shell `*.tsv` glob: the extension comparison is
/// case-sensitive and dot-files are never picked up.
pub fn discover_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("listing input directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let path = entry.path();

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(true, |n| n.starts_with('.'));
        if hidden || !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

// ---------------------------------------------------------------------------
// TSV loader
// ---------------------------------------------------------------------------

/// Read a tab-delimited file with a header row into raw strings.
///
/// Rows are read flexibly so a ragged line costs only that line, not the
/// whole file. The same holds for encoding: a row with a cell that is not
/// UTF-8 is dropped and counted, while header names are decoded lossily.
/// Blank lines are dropped.
pub fn read_table(path: &Path) -> Result<RawTable, SkipReason> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut rows = Vec::new();
    let mut undecodable = 0;
    for result in reader.byte_records() {
        let record = result?;
        let cells: Result<Vec<String>, _> = record
            .iter()
            .map(|field| std::str::from_utf8(field).map(str::to_string))
            .collect();
        let Ok(cells) = cells else {
            undecodable += 1;
            continue;
        };
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(cells);
    }

    Ok(RawTable {
        headers,
        rows,
        undecodable,
    })
}

/// Load one two-column file and keep only the rows where both the timestamp
/// and the value parse.
pub fn load_series(path: &Path) -> Result<Series, SkipReason> {
    let table = read_table(path)?;
    if table.width() != 2 {
        return Err(SkipReason::ColumnCount {
            found: table.width(),
        });
    }

    let total = table.rows.len();
    let records: Vec<Record> = table
        .rows
        .iter()
        .filter(|row| row.len() == 2)
        .filter_map(|row| {
            Some(Record {
                timestamp: parse_timestamp(&row[0])?,
                value: parse_value(&row[1])?,
            })
        })
        .collect();

    log::debug!(
        "{}: {} of {total} rows parsed, {} undecodable",
        path.display(),
        records.len(),
        table.undecodable
    );

    let mut headers = table.headers.into_iter();
    let date_column = headers.next().unwrap_or_default();
    let value_column = headers.next().unwrap_or_default();

    Ok(Series {
        source: path.to_path_buf(),
        date_column,
        value_column,
        records,
    })
}

// ---------------------------------------------------------------------------
// Cell parsers
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a timestamp cell. Offsets (RFC 3339) are normalised to UTC; date-only
/// cells land on midnight.
pub fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a value cell. NaN and infinities count as unparseable.
pub fn parse_value(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn timestamp_formats() {
        let midnight = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-05-01"), Some(midnight));
        assert_eq!(parse_timestamp(" 05/01/2024 "), Some(midnight));
        assert_eq!(parse_timestamp("2024/05/01"), Some(midnight));

        let noon = midnight.date().and_hms_opt(12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01 12:30:00"), Some(noon));
        assert_eq!(parse_timestamp("2024-05-01T12:30"), Some(noon));
        assert_eq!(parse_timestamp("2024-05-01T07:30:00-05:00"), Some(noon));

        let frac = parse_timestamp("2024-05-01 12:30:00.250").unwrap();
        assert_eq!(frac.and_utc().timestamp_subsec_millis(), 250);

        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }

    #[test]
    fn value_parsing_rejects_non_finite() {
        assert_eq!(parse_value(" 42.5 "), Some(42.5));
        assert_eq!(parse_value("-1e3"), Some(-1000.0));
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("n/a"), None);
        assert_eq!(parse_value(""), None);
    }

    #[test]
    fn load_drops_unparseable_rows() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "x.tsv",
            "time\tTURBO1 temp\n\
             2024-01-01\t10.0\n\
             garbage\t11.0\n\
             2024-01-03\tbad\n\
             \n\
             2024-01-04\t12.5\textra\n\
             2024-01-05\n\
             2024-01-06\t13.0\n",
        );
        let series = load_series(&path).unwrap();
        assert_eq!(series.date_column, "time");
        assert_eq!(series.value_column, "TURBO1 temp");
        let values: Vec<f64> = series.records.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![10.0, 13.0]);
    }

    #[test]
    fn latin1_row_is_dropped_not_the_file() {
        let dir = tempdir().unwrap();
        let mut body = b"time\tTURBO1 temp \xb0C\n".to_vec();
        for day in 1..=15 {
            body.extend_from_slice(format!("2024-01-{day:02}\t{day}.0\n").as_bytes());
        }
        body.extend_from_slice(b"2024-01-20\t12\xb0\n");
        let path = dir.path().join("latin1.tsv");
        fs::write(&path, body).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.undecodable, 1);
        assert_eq!(table.rows.len(), 15);

        let series = load_series(&path).unwrap();
        assert_eq!(series.records.len(), 15);
        assert!(series.value_column.starts_with("TURBO1 temp "));
        assert!(series.value_column.ends_with('C'));
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let dir = tempdir().unwrap();
        let three = write(dir.path(), "three.tsv", "a\tb\tc\n1\t2\t3\n");
        let one = write(dir.path(), "one.tsv", "a\n1\n");
        let empty = write(dir.path(), "empty.tsv", "");

        assert!(matches!(
            load_series(&three),
            Err(SkipReason::ColumnCount { found: 3 })
        ));
        assert!(matches!(
            load_series(&one),
            Err(SkipReason::ColumnCount { found: 1 })
        ));
        assert!(matches!(
            load_series(&empty),
            Err(SkipReason::ColumnCount { found: 0 })
        ));
    }

    #[test]
    fn missing_file_is_a_read_skip() {
        let dir = tempdir().unwrap();
        let result = load_series(&dir.path().join("absent.tsv"));
        assert!(matches!(result, Err(SkipReason::Read(_))));
    }

    #[test]
    fn discovery_sorts_and_matches_like_a_glob() {
        let dir = tempdir().unwrap();
        for name in ["b.tsv", "a.tsv", "c.TSV", "notes.txt", ".hidden.tsv"] {
            write(dir.path(), name, "");
        }
        fs::create_dir(dir.path().join("sub.tsv")).unwrap();

        let names: Vec<String> = discover_inputs(dir.path(), "tsv")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.tsv", "b.tsv"]);
    }
}
