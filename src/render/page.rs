use std::fmt::Write as _;

use anyhow::Result;

use super::escape_html;
use super::plot::chart_fragment;
use crate::chart::ChartUnit;
use crate::config::ChartStyle;

// ---------------------------------------------------------------------------
// Dashboard page
// ---------------------------------------------------------------------------

/// Render a complete, self-contained HTML document holding one dashboard row:
/// the group-A chart on the left, the group-B chart on the right.
///
/// `row` is 1-based. The output depends only on its inputs, so identical data
/// gives byte-identical pages.
pub fn dashboard_page(
    row: usize,
    left: &ChartUnit,
    right: &ChartUnit,
    style: &ChartStyle,
) -> Result<String> {
    let mut html = String::with_capacity(16 * 1024);
    let title = format!("Dashboard row {row}");

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n<h1>{}</h1>\n<div class=\"dashboard-row\">\n",
        escape_html(&title),
        escape_html(&title),
    );

    for unit in [left, right] {
        let id = format!("row{row}-{}", unit.group.key());
        html.push_str(&chart_fragment(unit, &id, style)?);
    }

    html.push_str("</div>\n<script>\n");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    Ok(html)
}

const STYLE: &str = r#"body { font-family: Helvetica, Arial, sans-serif; margin: 1.5rem; color: #222; }
h1 { font-size: 1.1rem; font-weight: 600; margin: 0 0 1rem; }
.dashboard-row { display: flex; flex-wrap: wrap; gap: 1.5rem; align-items: flex-start; }
.chart-unit { display: flex; flex-direction: column; gap: 0.4rem; }
.chart-head { display: flex; justify-content: space-between; align-items: center; }
.chart-title { font-weight: 600; font-size: 0.95rem; }
.chart-tools { display: flex; gap: 0.3rem; }
.chart-tools button { font-size: 0.75rem; }
svg.plot { background: #fff; border: 1px solid #e0e0e0; }
svg.plot .frame { fill: none; stroke: #bbb; }
svg.plot .grid { stroke: #eee; }
svg.plot text { font-size: 10px; fill: #555; }
.slider { display: flex; flex-direction: column; gap: 0.2rem; }
.slider-title { font-size: 0.8rem; }
.slider input[type=range] { width: 100%; accent-color: var(--accent); }
.chart-source { font-size: 0.7rem; color: #888; }
"#;

/// Draws each `.chart-unit` as an SVG scatter plot and keeps only the points
/// with `start <= t <= end` for the current slider handles.
const SCRIPT: &str = r#"(function () {
  "use strict";
  var SVG_NS = "http://www.w3.org/2000/svg";
  var M = { top: 10, right: 16, bottom: 36, left: 56 };
  var SVG_CSS = ".frame { fill: none; stroke: #bbb; } .grid { stroke: #eee; } " +
    "text { font-family: Helvetica, Arial, sans-serif; font-size: 10px; fill: #555; }";

  function el(name, attrs, parent) {
    var node = document.createElementNS(SVG_NS, name);
    Object.keys(attrs).forEach(function (k) { node.setAttribute(k, attrs[k]); });
    parent.appendChild(node);
    return node;
  }

  function fmtDate(ms) {
    return new Date(ms).toISOString().slice(0, 16).replace("T", " ");
  }

  function fmtValue(v) {
    return String(Number(v.toPrecision(4)));
  }

  function ticks(lo, hi, n) {
    var out = [];
    for (var i = 0; i <= n; i++) out.push(lo + (hi - lo) * i / n);
    return out;
  }

  function draw(svg, data, start, end) {
    while (svg.firstChild) svg.removeChild(svg.firstChild);
    var w = data.style.width, h = data.style.height;
    var pw = w - M.left - M.right, ph = h - M.top - M.bottom;

    var xs = [], ys = [];
    for (var i = 0; i < data.t.length; i++) {
      if (data.t[i] >= start && data.t[i] <= end) {
        xs.push(data.t[i]);
        ys.push(data.y[i]);
      }
    }

    var yLo = Infinity, yHi = -Infinity;
    ys.forEach(function (v) { if (v < yLo) yLo = v; if (v > yHi) yHi = v; });
    if (!ys.length) { yLo = 0; yHi = 1; }
    if (yLo === yHi) { yLo -= 1; yHi += 1; }
    var pad = (yHi - yLo) * 0.05;
    yLo -= pad; yHi += pad;
    var xLo = start, xHi = end > start ? end : start + 1;

    function sx(t) { return M.left + (t - xLo) / (xHi - xLo) * pw; }
    function sy(v) { return M.top + (1 - (v - yLo) / (yHi - yLo)) * ph; }

    ticks(yLo, yHi, 4).forEach(function (v) {
      var y = sy(v);
      el("line", { x1: M.left, x2: M.left + pw, y1: y, y2: y, "class": "grid" }, svg);
      el("text", { x: M.left - 6, y: y + 3, "text-anchor": "end" }, svg).textContent = fmtValue(v);
    });
    ticks(xLo, xHi, 3).forEach(function (t) {
      var x = sx(t);
      el("line", { x1: x, x2: x, y1: M.top, y2: M.top + ph, "class": "grid" }, svg);
      el("text", { x: x, y: M.top + ph + 14, "text-anchor": "middle" }, svg).textContent = fmtDate(t);
    });
    el("rect", { x: M.left, y: M.top, width: pw, height: ph, "class": "frame" }, svg);
    el("text", { x: M.left + pw / 2, y: h - 4, "text-anchor": "middle" }, svg).textContent = data.x_label;

    for (var j = 0; j < xs.length; j++) {
      el("circle", { cx: sx(xs[j]), cy: sy(ys[j]), r: data.style.radius, fill: data.style.fill }, svg);
    }
  }

  // Download the plot as it is currently drawn, styles inlined.
  function save(svg, name) {
    var copy = svg.cloneNode(true);
    var style = document.createElementNS(SVG_NS, "style");
    style.textContent = SVG_CSS;
    copy.insertBefore(style, copy.firstChild);
    var blob = new Blob([new XMLSerializer().serializeToString(copy)], { type: "image/svg+xml" });
    var link = document.createElement("a");
    link.href = URL.createObjectURL(blob);
    link.download = name + ".svg";
    document.body.appendChild(link);
    link.click();
    document.body.removeChild(link);
    URL.revokeObjectURL(link.href);
  }

  function wire(unit) {
    var data = JSON.parse(unit.querySelector("script.chart-data").textContent);
    var svg = unit.querySelector("svg.plot");
    var lo = unit.querySelector("input.start");
    var hi = unit.querySelector("input.end");
    var label = unit.querySelector(".range-label");

    function update() {
      var a = Number(lo.value), b = Number(hi.value);
      var start = Math.min(a, b), end = Math.max(a, b);
      label.textContent = fmtDate(start) + " to " + fmtDate(end);
      draw(svg, data, start, end);
    }

    lo.addEventListener("input", update);
    hi.addEventListener("input", update);
    unit.querySelector("button.reset").addEventListener("click", function () {
      lo.value = lo.min;
      hi.value = hi.max;
      update();
    });
    unit.querySelector("button.save").addEventListener("click", function () {
      save(svg, unit.id);
    });
    update();
  }

  document.querySelectorAll(".chart-unit").forEach(wire);
})();
"#;
