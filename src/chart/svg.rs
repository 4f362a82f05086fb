use crate::chart::ChartData;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const WIDTH:       f64 = 1200.0;
const MARGIN_L:    f64 = 100.0;
const MARGIN_R:    f64 = 230.0;
const OVERVIEW_Y:  f64 = 80.0;
const OVERVIEW_H:  f64 = 300.0;
const TIMELINE_Y:  f64 = 520.0;
const ROW_H:       f64 = 32.0;
const ROW_GAP:     f64 = 12.0;
const TICKS:       usize = 5;

/// Render both charts and the legend as one SVG document.
pub fn render(data: &ChartData) -> String {
    let plot_w = WIDTH - MARGIN_L - MARGIN_R;
    let rows   = data.timeline.len().max(1) as f64;
    let height = TIMELINE_Y + rows * (ROW_H + ROW_GAP) + 70.0;

    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = WIDTH, h = height
    );
    let _ = writeln!(out, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
    let _ = writeln!(
        out,
        r##"<text x="{}" y="36" font-size="22" font-weight="bold" text-anchor="middle" fill="#2c3e50">LVM Segments Distribution by Physical Disk</text>"##,
        WIDTH / 2.0
    );

    overview(&mut out, data, plot_w);
    timeline(&mut out, data, plot_w);
    legend(&mut out, data);

    out.push_str("</svg>\n");
    out
}

pub fn write(data: &ChartData, path: &Path) -> Result<()> {
    fs::write(path, render(data)).with_context(|| format!("writing {}", path.display()))
}

// ── Stacked bars ──────────────────────────────────────────────────────

fn overview(out: &mut String, data: &ChartData, plot_w: f64) {
    let bottom = OVERVIEW_Y + OVERVIEW_H;
    let max    = nonzero(data.max_overview_mb());

    section_title(out, OVERVIEW_Y - 20.0, "Space Usage by PV");
    y_axis(out, OVERVIEW_Y, bottom, max, "Size (MB)");

    let band = plot_w / data.overview.len().max(1) as f64;
    for (i, bar) in data.overview.iter().enumerate() {
        let x = MARGIN_L + i as f64 * band + band * 0.2;
        let w = band * 0.6;
        let mut y = bottom;
        for slice in &bar.slices {
            let h = slice.size_mb / max * OVERVIEW_H;
            y -= h;
            let opacity = if slice.free { 0.6 } else { 0.85 };
            let _ = writeln!(
                out,
                r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="{}" stroke="#ffffff"><title>{} on {}: {:.0} MB</title></rect>"##,
                x, y, w, h, escape(&slice.color), opacity, escape(&slice.lv), escape(&bar.pv), slice.size_mb
            );
        }
        let _ = writeln!(
            out,
            r##"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end" transform="rotate(-45 {:.1} {:.1})" fill="#333333">{}</text>"##,
            x + w / 2.0, bottom + 16.0, x + w / 2.0, bottom + 16.0, escape(&bar.pv)
        );
    }

    let _ = writeln!(
        out,
        r##"<text x="{:.1}" y="{:.1}" font-size="14" font-weight="bold" text-anchor="middle" fill="#333333">Physical Volumes</text>"##,
        MARGIN_L + plot_w / 2.0, bottom + 75.0
    );
}

fn y_axis(out: &mut String, top: f64, bottom: f64, max: f64, label: &str) {
    let _ = writeln!(out, r##"<line x1="{m}" y1="{t}" x2="{m}" y2="{b}" stroke="#333333"/>"##, m = MARGIN_L, t = top, b = bottom);
    for i in 0..=TICKS {
        let v = max * i as f64 / TICKS as f64;
        let y = bottom - (bottom - top) * i as f64 / TICKS as f64;
        let _ = writeln!(
            out,
            r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#e0e0e0"/><text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end" fill="#333333">{:.0}</text>"##,
            MARGIN_L, WIDTH - MARGIN_R, MARGIN_L - 6.0, y + 4.0, v, y = y
        );
    }
    let cy = (top + bottom) / 2.0;
    let _ = writeln!(
        out,
        r##"<text x="30" y="{cy:.1}" font-size="14" font-weight="bold" text-anchor="middle" transform="rotate(-90 30 {cy:.1})" fill="#333333">{}</text>"##,
        label, cy = cy
    );
}

// ── Segment timeline ──────────────────────────────────────────────────

fn timeline(out: &mut String, data: &ChartData, plot_w: f64) {
    let max = nonzero(data.max_timeline_gb());

    section_title(out, TIMELINE_Y - 20.0, "Detailed Segments Distribution");

    let mut y = TIMELINE_Y;
    for row in &data.timeline {
        let _ = writeln!(
            out,
            r##"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end" fill="#333333">{}</text>"##,
            MARGIN_L - 8.0, y + ROW_H / 2.0 + 4.0, escape(&row.pv)
        );

        let mut x = MARGIN_L;
        for slice in &row.slices {
            let w = slice.size_gb / max * plot_w;
            let _ = writeln!(
                out,
                r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{}" fill="{}" fill-opacity="0.85" stroke="#ffffff" stroke-width="0.5"><title>{} extents {}-{}: {:.1} GB</title></rect>"##,
                x, y, w, ROW_H, escape(&slice.color), escape(&slice.lv), slice.start, slice.end, slice.size_gb
            );
            if slice.labeled {
                let (fill, weight) = if slice.free { ("#666666", "normal") } else { ("#ffffff", "bold") };
                let _ = writeln!(
                    out,
                    r#"<text x="{:.1}" y="{:.1}" font-size="11" font-weight="{}" text-anchor="middle" fill="{}">{}</text>"#,
                    x + w / 2.0, y + ROW_H / 2.0 + 4.0, weight, fill, escape(&slice.lv)
                );
            }
            x += w;
        }
        y += ROW_H + ROW_GAP;
    }

    // x axis in GB
    let _ = writeln!(out, r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#333333"/>"##, MARGIN_L, MARGIN_L + plot_w, y = y);
    for i in 0..=TICKS {
        let v = max * i as f64 / TICKS as f64;
        let x = MARGIN_L + plot_w * i as f64 / TICKS as f64;
        let _ = writeln!(
            out,
            r##"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle" fill="#333333">{:.0}</text>"##,
            x, y + 16.0, v
        );
    }
    let _ = writeln!(
        out,
        r##"<text x="{:.1}" y="{:.1}" font-size="14" font-weight="bold" text-anchor="middle" fill="#333333">Size (GB)</text>"##,
        MARGIN_L + plot_w / 2.0, y + 40.0
    );
}

fn legend(out: &mut String, data: &ChartData) {
    let x = WIDTH - MARGIN_R + 30.0;
    let mut y = OVERVIEW_Y;
    for entry in &data.legend {
        let label = if entry.free { "Free Space" } else { entry.lv.as_str() };
        let _ = writeln!(
            out,
            r##"<rect x="{:.1}" y="{:.1}" width="14" height="14" rx="3" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="12" fill="#333333">{}</text>"##,
            x, y, escape(&entry.color), x + 20.0, y + 11.0, escape(label)
        );
        y += 20.0;
    }
}

fn section_title(out: &mut String, y: f64, text: &str) {
    let _ = writeln!(
        out,
        r##"<text x="{:.1}" y="{:.1}" font-size="16" font-weight="bold" fill="#34495e">{}</text>"##,
        MARGIN_L, y, text
    );
}

fn nonzero(v: f64) -> f64 {
    if v > 0.0 { v } else { 1.0 }
}

/// Escape text for XML content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _    => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartOptions;
    use crate::collectors::{pvdisplay::parse_pvdisplay, sample::SAMPLE_PVDISPLAY};
    use crate::util::palette::ColorMap;

    fn sample_svg() -> String {
        let map = parse_pvdisplay(SAMPLE_PVDISPLAY);
        render(&ChartData::build(&map, &ColorMap::with_defaults(&map), &ChartOptions::default()))
    }

    #[test]
    fn document_is_well_bracketed() {
        let svg = sample_svg();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<svg").count(), 1);
    }

    #[test]
    fn labels_and_legend_present() {
        let svg = sample_svg();
        for pv in ["sda2", "sdb1", "sdc1"] {
            assert!(svg.contains(&format!(">{}</text>", pv)), "missing {}", pv);
        }
        assert!(svg.contains(">Free Space</text>"));
        assert!(svg.contains("fill=\"#E8E8E8\""));
    }

    #[test]
    fn empty_chart_renders() {
        let data = ChartData::build(
            &Default::default(),
            &ColorMap::with_defaults(&Default::default()),
            &ChartOptions::default(),
        );
        let svg = render(&data);
        assert!(svg.contains("Space Usage by PV"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn colors_are_escaped() {
        let data = ChartData {
            overview: Vec::new(),
            timeline: Vec::new(),
            legend: vec![crate::chart::LegendEntry {
                lv:    "data".into(),
                free:  false,
                color: "red\"/><x".into(),
            }],
        };
        let svg = render(&data);
        assert!(svg.contains(r#"fill="red&quot;/&gt;&lt;x""#));
        assert!(!svg.contains("<x"));
    }
}
