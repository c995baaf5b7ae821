//! Static HTML dashboards for paired time-series exports.
//!
//! Every `*.tsv` file in a directory (timestamp, value) is cleaned, stripped of
//! its lowest values and drawn as a scatter plot with a date-range slider.
//! Charts are split into two groups by a tag in their title and written side
//! by side, one HTML page per positional pair.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod state;

pub use app::{DashboardApp, RunSummary};
pub use config::DashboardConfig;
