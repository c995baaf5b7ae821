use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use super::escape_html;
use crate::chart::ChartUnit;
use crate::color;
use crate::config::ChartStyle;

// ---------------------------------------------------------------------------
// Chart data blob (consumed by the page script)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChartData<'a> {
    title: &'a str,
    x_label: &'a str,
    /// Epoch milliseconds, time-ordered.
    t: Vec<i64>,
    y: Vec<f64>,
    style: PlotStyle,
}

#[derive(Debug, Serialize)]
struct PlotStyle {
    width: u32,
    height: u32,
    radius: f64,
    fill: String,
}

/// Serialize a value for embedding inside a `<script>` element. Every `<` is
/// written as a JSON escape so the payload can never close the element.
pub fn script_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).context("serializing chart data")?;
    Ok(json.replace('<', "\\u003c"))
}

// ---------------------------------------------------------------------------
// Chart unit fragment
// ---------------------------------------------------------------------------

/// Render one scatter plot with its date-range slider as an HTML fragment.
///
/// The fragment is inert markup plus a JSON blob; the page script finds every
/// `.chart-unit`, draws the points and narrows them to the inclusive slider
/// range on every input event.
pub fn chart_fragment(unit: &ChartUnit, id: &str, style: &ChartStyle) -> Result<String> {
    let base = color::parse_color(&style.point_color)
        .with_context(|| format!("unknown point colour {:?}", style.point_color))?;
    let accent = color::css_hex(color::tint(base, 0.35));

    let data = ChartData {
        title: &unit.title,
        x_label: &unit.x_label,
        t: unit.points.iter().map(|r| r.epoch_millis()).collect(),
        y: unit.points.iter().map(|r| r.value).collect(),
        style: PlotStyle {
            width: style.width,
            height: style.height,
            radius: style.point_size,
            fill: color::css_rgba(base, style.point_alpha),
        },
    };
    let json = script_json(&data)?;

    let start = unit.range.start.and_utc().timestamp_millis();
    let end = unit.range.end.and_utc().timestamp_millis();
    let source = unit
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<div class="chart-unit" id="{id}" style="--accent: {accent}; width: {width}px">
  <div class="chart-head">
    <span class="chart-title">{title}</span>
    <span class="chart-tools">
      <button type="button" class="reset">Reset</button>
      <button type="button" class="save">Save</button>
    </span>
  </div>
  <svg class="plot" xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"></svg>
  <div class="slider">
    <div class="slider-title">{slider_title}: <span class="range-label"></span></div>
    <input type="range" class="start" min="{start}" max="{end}" step="1" value="{start}">
    <input type="range" class="end" min="{start}" max="{end}" step="1" value="{end}">
  </div>
  <div class="chart-source">{source} &middot; {points} points</div>
  <script type="application/json" class="chart-data">{json}</script>
</div>
"#,
        id = escape_html(id),
        title = escape_html(&unit.title),
        slider_title = escape_html(&style.slider_title),
        source = escape_html(&source),
        points = unit.len(),
        width = style.width,
        height = style.height,
    );
    Ok(html)
}
