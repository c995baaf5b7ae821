use std::fmt;
use std::path::PathBuf;

use crate::config::DashboardConfig;
use crate::data::model::{DateRange, Record, Series};
use crate::error::SkipReason;

// ---------------------------------------------------------------------------
// Group – which side of the dashboard a chart belongs to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Left column (default tag `TURBO1`).
    A,
    /// Right column (default tag `TURBO2`).
    B,
}

impl Group {
    /// Short lowercase key used in element ids.
    pub fn key(self) -> &'static str {
        match self {
            Group::A => "a",
            Group::B => "b",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::A => write!(f, "group A"),
            Group::B => write!(f, "group B"),
        }
    }
}

/// Classify a chart title by case-insensitive tag match. Group A is checked
/// first, so a title carrying both tags lands in A.
pub fn classify(title: &str, config: &DashboardConfig) -> Option<Group> {
    let title = title.to_uppercase();
    if title.contains(&config.group_a_tag.to_uppercase()) {
        Some(Group::A)
    } else if title.contains(&config.group_b_tag.to_uppercase()) {
        Some(Group::B)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// ChartUnit – one scatter plot with its date-range slider
// ---------------------------------------------------------------------------

/// Everything needed to draw one scatter plot and its range selector.
#[derive(Debug, Clone)]
pub struct ChartUnit {
    pub group: Group,
    pub title: String,
    pub x_label: String,
    pub source: PathBuf,
    /// Points in time order.
    pub points: Vec<Record>,
    /// Full extent of `points`; the slider's bounds and initial value.
    pub range: DateRange,
}

impl ChartUnit {
    /// Build a chart from a cleaned, outlier-free series. The title is the
    /// value column's header.
    pub fn from_series(series: Series, config: &DashboardConfig) -> Result<Self, SkipReason> {
        let title = series.value_column.clone();
        let group = classify(&title, config).ok_or_else(|| SkipReason::Ungrouped {
            title: title.clone(),
            group_a: config.group_a_tag.clone(),
            group_b: config.group_b_tag.clone(),
        })?;
        let range = series.date_range().ok_or(SkipReason::TooFewRows {
            found: 0,
            required: 1,
        })?;

        Ok(ChartUnit {
            group,
            title,
            x_label: series.date_column,
            source: series.source,
            points: series.records,
            range,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(title: &str, n: usize) -> Series {
        let records = (0..n)
            .map(|i| Record {
                timestamp: NaiveDate::from_ymd_opt(2024, 2, 1 + i as u32)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                value: i as f64,
            })
            .collect();
        Series {
            source: PathBuf::from("x.tsv"),
            date_column: "date".to_string(),
            value_column: title.to_string(),
            records,
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        let config = DashboardConfig::default();
        assert_eq!(classify("Outlet temp turbo1", &config), Some(Group::A));
        assert_eq!(classify("TURBO1_T5", &config), Some(Group::A));
        assert_eq!(classify("Turbo2 inlet", &config), Some(Group::B));
        assert_eq!(classify("turbo 1", &config), None);
        assert_eq!(classify("compressor", &config), None);
    }

    #[test]
    fn both_tags_prefer_group_a() {
        let config = DashboardConfig::default();
        assert_eq!(classify("TURBO2 vs TURBO1", &config), Some(Group::A));
    }

    #[test]
    fn custom_tags() {
        let config = DashboardConfig {
            group_a_tag: "left".to_string(),
            group_b_tag: "right".to_string(),
            ..DashboardConfig::default()
        };
        assert_eq!(classify("LEFT bearing", &config), Some(Group::A));
        assert_eq!(classify("Right bearing", &config), Some(Group::B));
        assert_eq!(classify("TURBO1", &config), None);
    }

    #[test]
    fn unit_takes_title_and_axis_from_headers() {
        let unit = ChartUnit::from_series(series("TURBO2 exhaust", 4), &DashboardConfig::default())
            .unwrap();
        assert_eq!(unit.group, Group::B);
        assert_eq!(unit.title, "TURBO2 exhaust");
        assert_eq!(unit.x_label, "date");
        assert_eq!(unit.len(), 4);
        assert_eq!(unit.range.start, unit.points[0].timestamp);
        assert_eq!(unit.range.end, unit.points[3].timestamp);
    }

    #[test]
    fn ungrouped_title_is_skipped() {
        let err = ChartUnit::from_series(series("boiler", 4), &DashboardConfig::default())
            .unwrap_err();
        assert!(matches!(err, SkipReason::Ungrouped { ref title, .. } if title == "boiler"));
    }
}
