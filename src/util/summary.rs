use crate::models::allocation::AllocationMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LvUsage {
    pub name:    String,
    pub size_mb: f64,
}

/// Capacity figures for one physical volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PvSummary {
    pub name:        String,
    pub vg_name:     String,
    pub size_mb:     f64,
    pub used_mb:     f64,
    pub free_mb:     f64,
    pub use_pct:     f64,
    pub segments_mb: f64,
    pub pe_size_mb:  f64,
    /// Allocation per LV, free space excluded, in name order.
    pub lvs:         Vec<LvUsage>,
}

impl PvSummary {
    /// Sum of segment sizes minus the reported capacity.
    pub fn capacity_delta_mb(&self) -> f64 {
        self.segments_mb - self.size_mb
    }

    /// Segments account for the reported capacity within one extent.
    pub fn is_reconciled(&self) -> bool {
        self.capacity_delta_mb().abs() <= self.pe_size_mb
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    pub size_mb: f64,
    pub used_mb: f64,
    pub free_mb: f64,
    pub use_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub pvs:    Vec<PvSummary>,
    pub totals: Totals,
}

impl Summary {
    pub fn from_model(map: &AllocationMap) -> Self {
        let mut pvs = Vec::with_capacity(map.len());
        let mut totals = Totals::default();

        for pv in map.iter() {
            let s = PvSummary {
                name:        pv.name.clone(),
                vg_name:     pv.vg_name.clone(),
                size_mb:     pv.size_mb,
                used_mb:     pv.used_mb(),
                free_mb:     pv.free_mb(),
                use_pct:     pv.use_pct(),
                segments_mb: pv.segments_mb(),
                pe_size_mb:  pv.pe_size_mb,
                lvs: pv.lv_usage()
                    .into_iter()
                    .map(|(owner, size_mb)| LvUsage { name: owner.label().to_string(), size_mb })
                    .collect(),
            };

            if !pv.segments.is_empty() && !s.is_reconciled() {
                log::warn!(
                    "{}: segments cover {:.1} MB but PV Size is {:.1} MB",
                    s.name, s.segments_mb, s.size_mb
                );
            }

            totals.size_mb += s.size_mb;
            totals.used_mb += s.used_mb;
            totals.free_mb += s.free_mb;
            pvs.push(s);
        }

        totals.use_pct = pct(totals.used_mb, totals.size_mb);
        Self { pvs, totals }
    }
}

fn pct(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 { return 0.0; }
    part / whole * 100.0
}
