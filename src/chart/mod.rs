//! Presentation model shared by the SVG, HTML and terminal charts.

pub mod html;
pub mod svg;

use crate::config::ChartConfig;
use crate::models::allocation::{AllocationMap, PhysicalVolume, Segment, SegmentOwner, FREE_LABEL};
use crate::util::palette::ColorMap;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Ordering parameters ───────────────────────────────────────────────

/// Order of segments along a timeline row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SegmentOrder {
    /// Ascending start extent
    Start,
    /// As listed by pvdisplay
    Parse,
}

impl SegmentOrder {
    pub fn toggle(self) -> Self {
        match self {
            Self::Start => Self::Parse,
            Self::Parse => Self::Start,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "by start extent",
            Self::Parse => "as listed",
        }
    }
}

/// Order of PV rows by device name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PvOrder {
    #[serde(rename = "asc")]
    #[value(name = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    #[value(name = "desc")]
    Descending,
}

impl PvOrder {
    pub fn reverse(self) -> Self {
        match self {
            Self::Ascending  => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub segment_order:     SegmentOrder,
    pub overview_pv_order: PvOrder,
    pub timeline_pv_order: PvOrder,
    pub label_min_gb:      f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl ChartOptions {
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self {
            segment_order:     cfg.segment_order,
            overview_pv_order: PvOrder::Ascending,
            timeline_pv_order: cfg.timeline_pv_order,
            label_min_gb:      cfg.label_min_gb,
        }
    }
}

pub fn ordered_pvs(map: &AllocationMap, order: PvOrder) -> Vec<&PhysicalVolume> {
    match order {
        PvOrder::Ascending  => map.iter().collect(),
        PvOrder::Descending => map.iter().rev().collect(),
    }
}

pub fn ordered_segments(pv: &PhysicalVolume, order: SegmentOrder) -> Vec<&Segment> {
    let mut segs: Vec<&Segment> = pv.segments.iter().collect();
    if order == SegmentOrder::Start {
        segs.sort_by_key(|s| s.start);
    }
    segs
}

/// `<output_dir>/<stem>.<ext>`, or relative to the cwd when `output_dir` is empty.
pub fn artifact_path(output_dir: &str, stem: &str, ext: &str) -> PathBuf {
    let file = format!("{}.{}", stem, ext);
    if output_dir.is_empty() {
        PathBuf::from(file)
    } else {
        PathBuf::from(output_dir).join(file)
    }
}

// ── Chart data ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSlice {
    pub lv:      String,
    /// Unallocated extents, as opposed to an LV that happens to be named `FREE`
    pub free:    bool,
    pub size_mb: f64,
    pub color:   String,
}

/// One stacked bar of the overview chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewBar {
    pub pv:         String,
    /// Reported capacity, or the sum of slices when that is larger
    pub total_mb:   f64,
    /// Used share of the reported capacity
    pub use_pct:    f64,
    pub slices:     Vec<BarSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSlice {
    pub lv:      String,
    pub free:    bool,
    pub start:   u64,
    pub end:     u64,
    pub size_gb: f64,
    pub color:   String,
    /// Large enough to carry a text label
    pub labeled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub pv:       String,
    pub total_gb: f64,
    pub slices:   Vec<TimelineSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub lv:    String,
    pub free:  bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub overview: Vec<OverviewBar>,
    pub timeline: Vec<TimelineRow>,
    pub legend:   Vec<LegendEntry>,
}

impl ChartData {
    pub fn build(map: &AllocationMap, colors: &ColorMap, opts: &ChartOptions) -> Self {
        let overview = ordered_pvs(map, opts.overview_pv_order)
            .into_iter()
            .map(|pv| overview_bar(pv, colors))
            .collect();

        let timeline = ordered_pvs(map, opts.timeline_pv_order)
            .into_iter()
            .map(|pv| timeline_row(pv, colors, opts))
            .collect();

        let legend = colors.entries()
            .map(|(owner, c)| LegendEntry {
                lv:    owner.label().to_string(),
                free:  owner.is_free(),
                color: c.to_string(),
            })
            .collect();

        Self { overview, timeline, legend }
    }

    /// Largest bar, used to scale the overview axis.
    pub fn max_overview_mb(&self) -> f64 {
        self.overview.iter().map(|b| b.total_mb).fold(0.0, f64::max)
    }

    /// Longest timeline row, used to scale the timeline axis.
    pub fn max_timeline_gb(&self) -> f64 {
        self.timeline.iter().map(|r| r.total_gb).fold(0.0, f64::max)
    }
}

fn overview_bar(pv: &PhysicalVolume, colors: &ColorMap) -> OverviewBar {
    let mut slices: Vec<BarSlice> = pv.lv_usage()
        .into_iter()
        .map(|(owner, size_mb)| BarSlice {
            lv:    owner.label().to_string(),
            free:  false,
            size_mb,
            color: colors.get(owner).to_string(),
        })
        .collect();

    let free = pv.free_mb();
    if free > 0.0 {
        slices.push(BarSlice {
            lv:      FREE_LABEL.to_string(),
            free:    true,
            size_mb: free,
            color:   colors.get(&SegmentOwner::Free).to_string(),
        });
    }

    let stacked: f64 = slices.iter().map(|s| s.size_mb).sum();
    OverviewBar {
        pv:       pv.short_name().to_string(),
        total_mb: pv.size_mb.max(stacked),
        use_pct:  pv.use_pct(),
        slices,
    }
}

fn timeline_row(pv: &PhysicalVolume, colors: &ColorMap, opts: &ChartOptions) -> TimelineRow {
    let slices: Vec<TimelineSlice> = ordered_segments(pv, opts.segment_order)
        .into_iter()
        .map(|seg| {
            let size_gb = seg.size_mb / 1024.0;
            TimelineSlice {
                lv:      seg.owner.label().to_string(),
                free:    seg.owner.is_free(),
                start:   seg.start,
                end:     seg.end,
                size_gb,
                color:   colors.get(&seg.owner).to_string(),
                labeled: size_gb > opts.label_min_gb,
            }
        })
        .collect();

    TimelineRow {
        pv:       pv.short_name().to_string(),
        total_gb: slices.iter().map(|s| s.size_gb).sum(),
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::{pvdisplay::parse_pvdisplay, sample::SAMPLE_PVDISPLAY};

    fn sample_chart(opts: &ChartOptions) -> ChartData {
        let map = parse_pvdisplay(SAMPLE_PVDISPLAY);
        ChartData::build(&map, &ColorMap::with_defaults(&map), opts)
    }

    #[test]
    fn artifact_paths() {
        assert_eq!(artifact_path("", "lvm_segments_live", "svg"), PathBuf::from("lvm_segments_live.svg"));
        assert_eq!(artifact_path("/tmp/out", "x", "html"), PathBuf::from("/tmp/out/x.html"));
    }

    #[test]
    fn overview_puts_free_last() {
        let data = sample_chart(&ChartOptions::default());
        let sdc = data.overview.iter().find(|b| b.pv == "sdc1").unwrap();
        let labels: Vec<&str> = sdc.slices.iter().map(|s| s.lv.as_str()).collect();
        assert_eq!(labels, vec!["backup", "media", "FREE"]);
        assert_eq!(data.overview[0].pv, "sda2");
    }

    #[test]
    fn timeline_respects_orders() {
        let text = "PV Name /dev/sda\n--- Physical Segments ---\n\
                    Physical extent 10 to 19:\nFREE\n\
                    Physical extent 0 to 9:\nLogical volume /dev/vg/a\n\
                    PV Name /dev/sdb\n";
        let map = parse_pvdisplay(text);
        let colors = ColorMap::with_defaults(&map);

        let mut opts = ChartOptions::default();
        let data = ChartData::build(&map, &colors, &opts);
        assert_eq!(data.timeline[0].pv, "sdb");
        let sda = &data.timeline[1];
        assert_eq!(sda.slices[0].start, 0);

        opts.segment_order = SegmentOrder::Parse;
        opts.timeline_pv_order = PvOrder::Ascending;
        let data = ChartData::build(&map, &colors, &opts);
        assert_eq!(data.timeline[0].pv, "sda");
        assert_eq!(data.timeline[0].slices[0].start, 10);
    }

    #[test]
    fn small_segments_are_not_labeled() {
        let data = sample_chart(&ChartOptions::default());
        let sda = data.timeline.iter().find(|r| r.pv == "sda2").unwrap();
        let swap = sda.slices.iter().find(|s| s.lv == "swap").unwrap();
        let home = sda.slices.iter().find(|s| s.lv == "home").unwrap();
        assert!(!swap.labeled);
        assert!(home.labeled);
    }

    #[test]
    fn legend_lists_every_owner() {
        let data = sample_chart(&ChartOptions::default());
        let lvs: Vec<&str> = data.legend.iter().map(|e| e.lv.as_str()).collect();
        assert_eq!(lvs, vec!["FREE", "backup", "home", "media", "root", "swap"]);
    }

    #[test]
    fn lv_named_free_is_drawn_as_used_space() {
        let text = "PV Name /dev/sdz\nPV Size 83.8 MiB\nPE Size 4.19 MiB\n\
                    --- Physical Segments ---\n\
                    Physical extent 0 to 9:\nLogical volume /dev/vg/FREE\n\
                    Physical extent 10 to 19:\nFREE\n";
        let map = parse_pvdisplay(text);
        let data = ChartData::build(&map, &ColorMap::with_defaults(&map), &ChartOptions::default());

        let slices = &data.overview[0].slices;
        assert_eq!(slices.len(), 2);
        assert!(!slices[0].free);
        assert_eq!(slices[0].color, crate::util::palette::DEFAULT_PALETTE[0]);
        assert!(slices[1].free);
        assert_eq!(slices[1].color, crate::util::palette::FREE_COLOR);
        assert!((data.overview[0].use_pct - 50.0).abs() < 1e-9);

        let row = &data.timeline[0].slices;
        assert_eq!(row.iter().filter(|s| s.free).count(), 1);
        assert_eq!(data.legend.iter().filter(|e| e.free).count(), 1);
        assert_eq!(data.legend.len(), 2);
    }
}
