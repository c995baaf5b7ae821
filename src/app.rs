use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::chart::ChartUnit;
use crate::config::DashboardConfig;
use crate::data::{filter, loader};
use crate::error::SkipReason;
use crate::render::page;
use crate::state::ChartGroups;

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// What a run did, for logging and for tests.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_seen: usize,
    pub group_a: usize,
    pub group_b: usize,
    pub skipped: Vec<(PathBuf, SkipReason)>,
    pub written: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Pipeline driver
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub config: DashboardConfig,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    /// Discover the inputs in `input_dir`, build every chart and write the
    /// paired dashboards to `output_dir`.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<RunSummary> {
        let files = loader::discover_inputs(input_dir, &self.config.input_extension)?;
        log::info!(
            "Found {} .{} file(s) in {}",
            files.len(),
            self.config.input_extension,
            input_dir.display()
        );

        let mut summary = RunSummary {
            files_seen: files.len(),
            ..RunSummary::default()
        };
        let groups = self.build_groups(&files, &mut summary.skipped);
        summary.group_a = groups.group_a.len();
        summary.group_b = groups.group_b.len();

        summary.written = self.write_dashboards(&groups, output_dir)?;
        log::info!(
            "Done: {} chart(s) ({} in {}, {} in {}), {} skipped, {} dashboard(s) written",
            groups.total(),
            summary.group_a,
            self.config.group_a_tag,
            summary.group_b,
            self.config.group_b_tag,
            summary.skipped.len(),
            summary.written.len()
        );
        Ok(summary)
    }

    /// Fold the sorted file list into chart groups. A file that cannot become
    /// a chart is logged, recorded in `skipped` and otherwise ignored.
    pub fn build_groups(
        &self,
        files: &[PathBuf],
        skipped: &mut Vec<(PathBuf, SkipReason)>,
    ) -> ChartGroups {
        files
            .iter()
            .fold(ChartGroups::default(), |groups, path| match self.chart_for(path) {
                Ok(unit) => groups.with(unit),
                Err(reason) => {
                    log::warn!("Skipping {}: {reason}", path.display());
                    skipped.push((path.clone(), reason));
                    groups
                }
            })
    }

    /// Load, clean and classify one file.
    pub fn chart_for(&self, path: &Path) -> Result<ChartUnit, SkipReason> {
        let mut series = loader::load_series(path)?;
        series.records = filter::drop_lowest(&series.records, self.config.outliers_dropped)?;
        log::info!("{}", series.value_column);

        let unit = ChartUnit::from_series(series, &self.config)?;
        log::debug!(
            "{} -> {} ({} points)",
            path.display(),
            unit.group,
            unit.len()
        );
        Ok(unit)
    }

    /// Warnings for groups that cannot fill every dashboard row: unequal
    /// group sizes, and fewer pairs than `max_rows`.
    pub fn pairing_warnings(&self, groups: &ChartGroups) -> Vec<String> {
        let mut warnings = Vec::new();
        let (a, b) = (groups.group_a.len(), groups.group_b.len());
        if a != b {
            let (longer, extra) = if a > b {
                (&self.config.group_a_tag, a - b)
            } else {
                (&self.config.group_b_tag, b - a)
            };
            warnings.push(format!(
                "Group sizes differ ({a} {} vs {b} {}); {extra} {longer} chart(s) have no partner",
                self.config.group_a_tag, self.config.group_b_tag
            ));
        }

        let filled = a.min(b).min(self.config.max_rows);
        if filled < self.config.max_rows {
            warnings.push(format!(
                "Only {filled} of {} dashboard row(s) can be filled",
                self.config.max_rows
            ));
        }
        warnings
    }

    /// Write one page per positional (A, B) pair, up to `max_rows`.
    pub fn write_dashboards(&self, groups: &ChartGroups, output_dir: &Path) -> Result<Vec<PathBuf>> {
        for warning in self.pairing_warnings(groups) {
            log::warn!("{warning}");
        }

        let pairs = groups.pairs(self.config.max_rows);

        let mut written = Vec::with_capacity(pairs.len());
        for (i, (left, right)) in pairs.into_iter().enumerate() {
            let row = i + 1;
            let html = page::dashboard_page(row, left, right, &self.config.chart)
                .with_context(|| format!("rendering dashboard row {row}"))?;
            let path = output_dir.join(format!("{}{row}.html", self.config.output_prefix));
            std::fs::write(&path, html)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Dashboard for row {row} created: {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
