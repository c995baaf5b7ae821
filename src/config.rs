use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::color;

/// Name of the optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Settings for one dashboard run. Every field has a default, so an absent
/// or empty `dashboard.toml` reproduces the stock behaviour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Extension (without the dot) of the files to ingest.
    pub input_extension: String,
    /// Output files are named `{output_prefix}{row}.html`, rows counted from 1.
    pub output_prefix: String,
    /// How many of the lowest values are dropped from every series.
    pub outliers_dropped: usize,
    /// Maximum number of dashboards written.
    pub max_rows: usize,
    /// Title substring (case-insensitive) selecting the left-hand group.
    pub group_a_tag: String,
    /// Title substring (case-insensitive) selecting the right-hand group.
    pub group_b_tag: String,
    pub chart: ChartStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input_extension: "tsv".to_string(),
            output_prefix: "temperature_dashboard_row_".to_string(),
            outliers_dropped: 10,
            max_rows: 5,
            group_a_tag: "TURBO1".to_string(),
            group_b_tag: "TURBO2".to_string(),
            chart: ChartStyle::default(),
        }
    }
}

/// Look of every chart unit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    /// Marker radius in pixels.
    pub point_size: f64,
    /// CSS colour name or `#rrggbb`.
    pub point_color: String,
    pub point_alpha: f32,
    pub slider_title: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 600,
            height: 250,
            point_size: 2.0,
            point_color: "navy".to_string(),
            point_alpha: 0.5,
            slider_title: "Select Date Range".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load `dashboard.toml` from `dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("no {CONFIG_FILE} in {}, using defaults", dir.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("parsing TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_extension.is_empty() || self.input_extension.starts_with('.') {
            bail!(
                "input_extension must be a bare extension such as \"tsv\", got {:?}",
                self.input_extension
            );
        }
        if self.max_rows == 0 {
            bail!("max_rows must be at least 1");
        }
        let a = self.group_a_tag.to_uppercase();
        let b = self.group_b_tag.to_uppercase();
        if a.is_empty() || b.is_empty() {
            bail!("group tags must not be empty");
        }
        if a == b {
            bail!("group_a_tag and group_b_tag must differ (both are {a:?})");
        }

        let chart = &self.chart;
        if chart.width == 0 || chart.height == 0 {
            bail!("chart width and height must be positive");
        }
        if !(chart.point_size > 0.0) {
            bail!("chart.point_size must be positive, got {}", chart.point_size);
        }
        if !(0.0..=1.0).contains(&chart.point_alpha) {
            bail!("chart.point_alpha must lie in [0, 1], got {}", chart.point_alpha);
        }
        if color::parse_color(&chart.point_color).is_none() {
            bail!("chart.point_color {:?} is not a known colour", chart.point_color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(DashboardConfig::from_toml("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = DashboardConfig::from_toml(
            r##"
            max_rows = 3
            [chart]
            point_color = "#ff8800"
            "##,
        )
        .unwrap();
        assert_eq!(config.max_rows, 3);
        assert_eq!(config.outliers_dropped, 10);
        assert_eq!(config.chart.point_color, "#ff8800");
        assert_eq!(config.chart.width, 600);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for doc in [
            "max_rows = 0",
            "group_a_tag = \"turbo2\"",
            "group_b_tag = \"\"",
            "input_extension = \".tsv\"",
            "[chart]\npoint_alpha = 1.5",
            "[chart]\npoint_color = \"not-a-colour\"",
            "[chart]\nwidth = 0",
            "unknown_key = 1",
        ] {
            assert!(DashboardConfig::from_toml(doc).is_err(), "accepted: {doc}");
        }
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(
            DashboardConfig::load(dir.path()).unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn load_reads_file_from_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "output_prefix = \"row_\"\n").unwrap();
        let config = DashboardConfig::load(dir.path()).unwrap();
        assert_eq!(config.output_prefix, "row_");
    }
}
