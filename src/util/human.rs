/// Format megabytes with a GB companion: "  8192.0 MB (8.0 GB)"
pub fn fmt_mb_gb(mb: f64) -> String {
    format!("{:>8.1} MB ({:.1} GB)", mb, mb / 1024.0)
}

/// Compact size for chart labels and tooltips: "512 MB", "34.3 GB", "1.9 TB"
pub fn fmt_mb(mb: f64) -> String {
    const GB: f64 = 1_024.0;
    const TB: f64 = 1_048_576.0;
    if mb >= TB      { format!("{:.1} TB", mb / TB) }
    else if mb >= GB { format!("{:.1} GB", mb / GB) }
    else             { format!("{:.0} MB", mb) }
}

/// Percentage with one decimal: "84.5%"
pub fn fmt_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}
