use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Extent size assumed when a PV block carries no `PE Size` line (4 MiB in MB).
pub const DEFAULT_PE_SIZE_MB: f64 = 4.19;

pub const FREE_LABEL:    &str = "FREE";
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

// ── Segment ───────────────────────────────────────────────────────────

/// Who owns a contiguous run of physical extents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentOwner {
    Lv(String),
    Free,
    Unknown,
}

impl SegmentOwner {
    pub fn label(&self) -> &str {
        match self {
            SegmentOwner::Lv(name) => name,
            SegmentOwner::Free     => FREE_LABEL,
            SegmentOwner::Unknown  => UNKNOWN_LABEL,
        }
    }

    pub fn is_free(&self) -> bool { matches!(self, SegmentOwner::Free) }
}

impl Serialize for SegmentOwner {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.label())
    }
}

/// Inclusive extent range `[start, end]` on one physical volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start:   u64,
    pub end:     u64,
    pub owner:   SegmentOwner,
    /// Size in MB: extent count × extent size of the owning PV.
    pub size_mb: f64,
    /// `Logical extents A to B` of the owning LV, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_extents: Option<(u64, u64)>,
}

impl Segment {
    pub fn new(start: u64, end: u64, owner: SegmentOwner, pe_size_mb: f64) -> Self {
        Self {
            start,
            end,
            owner,
            size_mb: Self::extent_count(start, end) as f64 * pe_size_mb,
            logical_extents: None,
        }
    }

    pub fn extent_count(start: u64, end: u64) -> u64 {
        end.saturating_sub(start) + 1
    }

    pub fn extents(&self) -> u64 { Self::extent_count(self.start, self.end) }
}

// ── Physical volume ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysicalVolume {
    pub name:         String,
    pub vg_name:      String,
    pub size_mb:      f64,
    pub pe_size_mb:   f64,
    pub total_pe:     u64,
    pub free_pe:      u64,
    pub allocated_pe: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid:         Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocatable:  Option<String>,
    /// Segments in the order the command listed them.
    pub segments:     Vec<Segment>,
}

impl PhysicalVolume {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:         name.into(),
            vg_name:      String::new(),
            size_mb:      0.0,
            pe_size_mb:   DEFAULT_PE_SIZE_MB,
            total_pe:     0,
            free_pe:      0,
            allocated_pe: 0,
            uuid:         None,
            allocatable:  None,
            segments:     Vec::new(),
        }
    }

    /// Last path component of the device path: `/dev/sda2` → `sda2`.
    pub fn short_name(&self) -> &str {
        last_component(&self.name)
    }

    pub fn used_mb(&self) -> f64 {
        self.segments.iter().filter(|s| !s.owner.is_free()).map(|s| s.size_mb).sum()
    }

    pub fn free_mb(&self) -> f64 {
        self.segments.iter().filter(|s| s.owner.is_free()).map(|s| s.size_mb).sum()
    }

    pub fn segments_mb(&self) -> f64 {
        self.segments.iter().map(|s| s.size_mb).sum()
    }

    pub fn use_pct(&self) -> f64 {
        if self.size_mb <= 0.0 { return 0.0; }
        self.used_mb() / self.size_mb * 100.0
    }

    /// Total allocation per owner on this PV, free space excluded.
    /// LVs come first in name order, then `Unknown`.
    pub fn lv_usage(&self) -> BTreeMap<&SegmentOwner, f64> {
        let mut usage = BTreeMap::new();
        for seg in self.segments.iter().filter(|s| !s.owner.is_free()) {
            *usage.entry(&seg.owner).or_insert(0.0) += seg.size_mb;
        }
        usage
    }
}

// ── Whole model ───────────────────────────────────────────────────────

/// Parsed allocation keyed by PV device path; iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AllocationMap {
    pub pvs: BTreeMap<String, PhysicalVolume>,
}

impl AllocationMap {
    pub fn is_empty(&self) -> bool { self.pvs.is_empty() }

    pub fn len(&self) -> usize { self.pvs.len() }

    pub fn get(&self, name: &str) -> Option<&PhysicalVolume> { self.pvs.get(name) }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PhysicalVolume> {
        self.pvs.values()
    }

    pub fn insert(&mut self, pv: PhysicalVolume) {
        self.pvs.insert(pv.name.clone(), pv);
    }

    /// Every distinct owner across all PVs, sorted by label.
    ///
    /// An LV literally named `FREE` or `UNKNOWN` stays a separate owner from
    /// the sentinel with the same label and sorts just before it.
    pub fn owners(&self) -> Vec<&SegmentOwner> {
        let distinct: BTreeSet<&SegmentOwner> = self.iter()
            .flat_map(|pv| pv.segments.iter().map(|s| &s.owner))
            .collect();
        let mut owners: Vec<&SegmentOwner> = distinct.into_iter().collect();
        owners.sort_by(|a, b| a.label().cmp(b.label()).then_with(|| a.cmp(b)));
        owners
    }

    pub fn segment_count(&self) -> usize {
        self.iter().map(|pv| pv.segments.len()).sum()
    }
}

pub fn last_component(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
