use crate::util::human::{fmt_mb_gb, fmt_pct};
use crate::util::summary::Summary;

/// Render the capacity summary as plain text.
pub fn generate(summary: &Summary, source: &str) -> String {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut out = String::new();

    out.push_str(&format!("{}\n", "═".repeat(80)));
    out.push_str(&format!("  LVM Configuration Summary  {}\n", now));
    out.push_str(&format!("  Source: {}\n", source));
    out.push_str(&format!("{}\n", "═".repeat(80)));

    if summary.pvs.is_empty() {
        out.push_str("\n  No physical volumes found in input.\n");
    }

    for pv in &summary.pvs {
        out.push_str(&format!("\n── {} (VG: {}) ", pv.name, pv.vg_name));
        out.push_str(&format!("{}\n", "─".repeat(40usize.saturating_sub(pv.name.len() + pv.vg_name.len()))));
        out.push_str(&format!("   Total size:  {}\n", fmt_mb_gb(pv.size_mb)));
        out.push_str(&format!("   Used space:  {}\n", fmt_mb_gb(pv.used_mb)));
        out.push_str(&format!("   Free space:  {}\n", fmt_mb_gb(pv.free_mb)));
        out.push_str(&format!("   Usage:       {:>7}\n", fmt_pct(pv.use_pct)));

        if !pv.lvs.is_empty() {
            out.push_str("   Logical Volumes:\n");
            for lv in &pv.lvs {
                out.push_str(&format!(
                    "     • {:<15} {:>8.1} MB ({:>5.1} GB)\n",
                    lv.name, lv.size_mb, lv.size_mb / 1024.0
                ));
            }
        }
    }

    let t = &summary.totals;
    out.push_str("\n── Global Totals ──────────────────────────────\n");
    out.push_str(&format!("   Total capacity: {}\n", fmt_mb_gb(t.size_mb)));
    out.push_str(&format!("   Used space:     {}\n", fmt_mb_gb(t.used_mb)));
    out.push_str(&format!("   Free space:     {}\n", fmt_mb_gb(t.free_mb)));
    out.push_str(&format!("   Usage:          {:>7}\n", fmt_pct(t.use_pct)));
    out
}
