use crate::chart::ChartData;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>LVM Segments Visualization</title>
<script src="https://d3js.org/d3.v7.min.js"></script>
<style>
  body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; margin: 20px; background: #f8f9fa; }
  .container { max-width: 1200px; margin: 0 auto; background: #fff; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,.1); }
  h1 { text-align: center; color: #2c3e50; }
  h2 { color: #34495e; border-bottom: 2px solid #3498db; padding-bottom: 8px; }
  .legend { display: flex; flex-wrap: wrap; justify-content: center; gap: 15px; margin: 20px 0; }
  .legend-item { display: flex; align-items: center; gap: 5px; }
  .legend-color { width: 16px; height: 16px; border-radius: 3px; }
  .tooltip { position: absolute; padding: 8px 12px; font-size: 12px; background: rgba(0,0,0,.8); color: #fff; border-radius: 6px; pointer-events: none; opacity: 0; }
  .axis { font-size: 12px; }
  .bar:hover { opacity: .8; cursor: pointer; }
  footer { text-align: center; color: #999; font-size: 12px; margin-top: 20px; }
</style>
</head>
<body>
<div class="container">
  <h1>LVM Segments Distribution by Physical Disk</h1>
  <h2>Space Usage by PV</h2>
  <div id="overview-chart"></div>
  <h2>Detailed Segments Distribution</h2>
  <div id="segments-chart"></div>
  <div id="legend" class="legend"></div>
  <footer>Generated __GENERATED__</footer>
</div>
<div class="tooltip" id="tooltip"></div>
<script>
const data = __CHART_DATA__;
const tooltip = d3.select("#tooltip");

function tip(event, title, lines) {
  tooltip.selectAll("*").remove();
  tooltip.append("strong").text(title);
  lines.forEach(l => { tooltip.append("br"); tooltip.append("span").text(l); });
  tooltip.style("opacity", 1)
    .style("left", (event.pageX + 10) + "px")
    .style("top", (event.pageY - 10) + "px");
}
function untip() { tooltip.style("opacity", 0); }

const legend = d3.select("#legend");
data.legend.forEach(e => {
  const item = legend.append("div").attr("class", "legend-item");
  item.append("div").attr("class", "legend-color").style("background-color", e.color);
  item.append("span").text(e.free ? "Free Space" : e.lv);
});

(function overview() {
  const m = {top: 20, right: 20, bottom: 80, left: 80}, w = 800 - m.left - m.right, h = 400 - m.top - m.bottom;
  const g = d3.select("#overview-chart").append("svg")
    .attr("width", w + m.left + m.right).attr("height", h + m.top + m.bottom)
    .append("g").attr("transform", `translate(${m.left},${m.top})`);
  const x = d3.scaleBand().domain(data.overview.map(d => d.pv)).range([0, w]).padding(0.2);
  const y = d3.scaleLinear().domain([0, d3.max(data.overview, d => d.total_mb) || 1]).range([h, 0]);
  data.overview.forEach(bar => {
    let acc = 0;
    bar.slices.forEach(s => {
      const y0 = acc, y1 = acc + s.size_mb; acc = y1;
      g.append("rect").attr("class", "bar")
        .attr("x", x(bar.pv)).attr("y", y(y1)).attr("width", x.bandwidth()).attr("height", y(y0) - y(y1))
        .attr("fill", s.color).attr("stroke", "#fff")
        .on("mouseover", ev => tip(ev, s.lv, [`PV: ${bar.pv}`, `Size: ${(s.size_mb / 1024).toFixed(1)} GB (${s.size_mb.toFixed(0)} MB)`]))
        .on("mouseout", untip);
    });
  });
  g.append("g").attr("class", "axis").attr("transform", `translate(0,${h})`).call(d3.axisBottom(x))
    .selectAll("text").style("text-anchor", "end").attr("transform", "rotate(-45)");
  g.append("g").attr("class", "axis").call(d3.axisLeft(y));
})();

(function segments() {
  const m = {top: 20, right: 20, bottom: 60, left: 120}, w = 800 - m.left - m.right;
  const h = data.timeline.length * 60;
  const g = d3.select("#segments-chart").append("svg")
    .attr("width", w + m.left + m.right).attr("height", h + m.top + m.bottom)
    .append("g").attr("transform", `translate(${m.left},${m.top})`);
  const x = d3.scaleLinear().domain([0, d3.max(data.timeline, d => d.total_gb) || 1]).range([0, w]);
  const y = d3.scaleBand().domain(data.timeline.map(d => d.pv)).range([0, h]).padding(0.2);
  data.timeline.forEach(row => {
    let cx = 0;
    row.slices.forEach(s => {
      const sw = x(s.size_gb);
      g.append("rect").attr("class", "bar")
        .attr("x", cx).attr("y", y(row.pv)).attr("width", sw).attr("height", y.bandwidth())
        .attr("fill", s.color).attr("stroke", "#fff")
        .on("mouseover", ev => tip(ev, s.lv, [`PV: ${row.pv}`, `Extents ${s.start}-${s.end}`, `Size: ${s.size_gb.toFixed(1)} GB`]))
        .on("mouseout", untip);
      if (s.labeled) {
        g.append("text").attr("x", cx + sw / 2).attr("y", y(row.pv) + y.bandwidth() / 2).attr("dy", ".35em")
          .style("text-anchor", "middle").style("font-size", "12px")
          .style("fill", s.free ? "#666" : "#fff")
          .style("font-weight", s.free ? "normal" : "bold")
          .text(s.lv);
      }
      cx += sw;
    });
  });
  g.append("g").attr("class", "axis").attr("transform", `translate(0,${h})`).call(d3.axisBottom(x));
  g.append("g").attr("class", "axis").call(d3.axisLeft(y));
})();
</script>
</body>
</html>
"##;

/// Render the interactive HTML page with the chart data embedded as JSON.
pub fn render(data: &ChartData) -> Result<String> {
    // "</" inside a string literal would close the <script> element
    let json = serde_json::to_string(data)?.replace("</", "<\\/");
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    Ok(TEMPLATE
        .replace("__GENERATED__", &generated)
        .replace("__CHART_DATA__", &json))
}

pub fn write(data: &ChartData, path: &Path) -> Result<()> {
    let page = render(data)?;
    fs::write(path, page).with_context(|| format!("writing {}", path.display()))
}
