use std::path::PathBuf;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// RawTable – one file as read, before any parsing
// ---------------------------------------------------------------------------

/// Header names and raw string rows of one delimited file.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows dropped because a cell was not valid UTF-8.
    pub undecodable: usize,
}

impl RawTable {
    /// Number of header columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

// ---------------------------------------------------------------------------
// Record – one (timestamp, value) observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Record {
    /// Milliseconds since the Unix epoch, treating the timestamp as UTC.
    pub fn epoch_millis(&self) -> i64 {
        self.timestamp.and_utc().timestamp_millis()
    }
}

// ---------------------------------------------------------------------------
// DateRange – inclusive [start, end]
// ---------------------------------------------------------------------------

/// Inclusive timestamp interval.
///
/// This is the contract the dashboard slider implements client-side: moving
/// the handles to `[start, end]` keeps exactly the records for which
/// [`DateRange::contains`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        if a <= b {
            DateRange { start: a, end: b }
        } else {
            DateRange { start: b, end: a }
        }
    }

    /// Smallest range covering every record, or `None` for an empty slice.
    pub fn spanning(records: &[Record]) -> Option<Self> {
        let first = records.first()?.timestamp;
        let (start, end) = records
            .iter()
            .fold((first, first), |(lo, hi), r| (lo.min(r.timestamp), hi.max(r.timestamp)));
        Some(DateRange { start, end })
    }

    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }

    /// Records inside the range, in their original order.
    pub fn filter(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|r| self.contains(r.timestamp))
            .copied()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Series – the cleaned contents of one file
// ---------------------------------------------------------------------------

/// A cleaned two-column time series.
#[derive(Debug, Clone)]
pub struct Series {
    /// File the series was read from.
    pub source: PathBuf,
    /// Header of column 0, used as the x-axis label.
    pub date_column: String,
    /// Header of column 1, used as the chart title.
    pub value_column: String,
    pub records: Vec<Record>,
}

impl Series {
    pub fn date_range(&self) -> Option<DateRange> {
        DateRange::spanning(&self.records)
    }
}
