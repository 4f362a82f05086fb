use crate::config::PvdisplayConfig;
use crate::error::SourceError;
use crate::models::allocation::{last_component, AllocationMap, PhysicalVolume, Segment, SegmentOwner};
use regex::Regex;
use std::io::ErrorKind;
use std::process::Command;
use std::sync::OnceLock;

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+\.?\d*)").expect("valid regex"))
}

fn extent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Physical extent (\d+) to (\d+)").expect("valid regex"))
}

fn logical_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Logical extents\s+(\d+)\s+to\s+(\d+)").expect("valid regex"))
}

/// Parse `pvdisplay -m --units M` output into an allocation map.
///
/// Never fails: lines that match no known prefix are skipped and fields
/// that are missing or unparsable keep their defaults.
pub fn parse_pvdisplay(text: &str) -> AllocationMap {
    let lines: Vec<&str> = text.trim().lines().map(str::trim).collect();

    let mut map = AllocationMap::default();
    let mut current: Option<PhysicalVolume> = None;
    let mut in_segments = false;

    for (i, line) in lines.iter().enumerate() {
        if line.starts_with("PV Name") {
            // "PV Name               /dev/sda2"
            let Some(name) = token(line, 2) else { continue };
            if let Some(done) = current.take() {
                map.insert(done);
            }
            current = Some(PhysicalVolume::new(name));
            in_segments = false;
            continue;
        }

        if line.starts_with("--- Physical Segments ---") {
            in_segments = true;
            continue;
        }

        let Some(pv) = current.as_mut() else { continue };

        if line.starts_with("VG Name") {
            if let Some(vg) = token(line, 2) {
                pv.vg_name = vg.to_string();
            }
        } else if line.starts_with("PV Size") {
            // "PV Size               487872.00 MiB / not usable 3.00 MiB"
            if let Some(v) = first_number(line) { pv.size_mb = v; }
        } else if line.starts_with("PE Size") {
            if let Some(v) = first_number(line) { pv.pe_size_mb = v; }
        } else if line.starts_with("Total PE") {
            if let Some(v) = int_token(line) { pv.total_pe = v; }
        } else if line.starts_with("Free PE") {
            if let Some(v) = int_token(line) { pv.free_pe = v; }
        } else if line.starts_with("Allocated PE") {
            if let Some(v) = int_token(line) { pv.allocated_pe = v; }
        } else if line.starts_with("PV UUID") {
            pv.uuid = token(line, 2).map(str::to_string);
        } else if let Some(rest) = line.strip_prefix("Allocatable") {
            let rest = rest.trim();
            if !rest.is_empty() { pv.allocatable = Some(rest.to_string()); }
        } else if in_segments {
            if let Some(seg) = segment_at(&lines, i, pv.pe_size_mb) {
                pv.segments.push(seg);
            }
        }
    }

    if let Some(done) = current.take() {
        map.insert(done);
    }

    log::debug!("parsed {} PV(s), {} segment(s)", map.len(), map.segment_count());
    map
}

/// Build the segment whose range marker sits at `lines[i]`, if it is one.
///
/// Ownership comes from `lines[i + 1]` only; the line after that is read
/// for the logical extent range of an owned segment.
fn segment_at(lines: &[&str], i: usize, pe_size_mb: f64) -> Option<Segment> {
    // "Physical extent 0 to 8191:"
    let caps  = extent_re().captures(lines[i])?;
    let start = caps[1].parse().ok()?;
    let end   = caps[2].parse().ok()?;

    let owner = owner_from(lines.get(i + 1).copied());
    let mut seg = Segment::new(start, end, owner, pe_size_mb);

    if let SegmentOwner::Lv(_) = seg.owner {
        seg.logical_extents = lines.get(i + 2).and_then(|l| {
            let c = logical_re().captures(l)?;
            Some((c[1].parse().ok()?, c[2].parse().ok()?))
        });
    }
    Some(seg)
}

/// Decide the owner of a range from the line that follows its marker.
pub fn owner_from(next: Option<&str>) -> SegmentOwner {
    // nothing follows the last range marker: treat it as unallocated
    let Some(line) = next else { return SegmentOwner::Free };

    if line.split_whitespace().any(|t| t == "FREE") {
        SegmentOwner::Free
    } else if line.contains("Logical volume") {
        // "Logical volume	/dev/vg0/root"
        match token(line, 2) {
            Some(path) => SegmentOwner::Lv(last_component(path).to_string()),
            None       => SegmentOwner::Unknown,
        }
    } else {
        SegmentOwner::Unknown
    }
}

fn token(line: &str, n: usize) -> Option<&str> {
    line.split_whitespace().nth(n)
}

fn int_token(line: &str) -> Option<u64> {
    token(line, 2)?.parse().ok()
}

fn first_number(line: &str) -> Option<f64> {
    number_re().find(line)?.as_str().parse().ok()
}

// ── Live invocation ───────────────────────────────────────────────────

/// Program and argument list used to query the live system.
pub fn build_command(cfg: &PvdisplayConfig, is_root: bool) -> (String, Vec<String>) {
    if cfg.use_sudo && !is_root {
        let mut args = vec![cfg.command.clone()];
        args.extend(cfg.args.iter().cloned());
        ("sudo".to_string(), args)
    } else {
        (cfg.command.clone(), cfg.args.clone())
    }
}

/// Run `pvdisplay` and return its stdout.
pub fn run_pvdisplay(cfg: &PvdisplayConfig) -> Result<String, SourceError> {
    let is_root = nix::unistd::geteuid().is_root();
    let (program, args) = build_command(cfg, is_root);
    capture(&program, &args, &cfg.command)
}

/// Run `program` and return its stdout. `target` is the pvdisplay binary;
/// when it differs from `program` the call goes through sudo.
fn capture(program: &str, args: &[String], target: &str) -> Result<String, SourceError> {
    let display = format!("{} {}", program, args.join(" "));
    log::info!("running `{}`", display);

    let out = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound if program != target => SourceError::SudoNotFound(program.to_string()),
            ErrorKind::NotFound => SourceError::CommandNotFound(program.to_string()),
            _ => SourceError::CommandSpawn { command: display.clone(), source: e },
        })?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
        // sudo reports a missing target program on stderr
        if stderr.contains("command not found") {
            return Err(SourceError::CommandNotFound(target.to_string()));
        }
        return Err(SourceError::CommandFailed {
            command: display,
            status:  out.status.to_string(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_PV: &str = "
  --- Physical volume ---
  PV Name               /dev/nvme0n1p3
  VG Name               vg0
  PV Size               510431.00 MiB / not usable 2.00 MiB
  Allocatable           yes
  PE Size               4.19 MiB
  Total PE              121817
  Free PE               113625
  Allocated PE          8192
  PV UUID               Xy12ab-cdEF-3456

  --- Physical Segments ---
  Physical extent 0 to 8191:
    Logical volume\t/dev/vg0/lv-root
    Logical extents\t0 to 8191
  Physical extent 8192 to 121816:
    FREE
";

    #[test]
    fn parses_header_fields() {
        let map = parse_pvdisplay(ONE_PV);
        let pv = map.get("/dev/nvme0n1p3").unwrap();
        assert_eq!(pv.vg_name, "vg0");
        assert_eq!(pv.size_mb, 510431.0);
        assert_eq!(pv.pe_size_mb, 4.19);
        assert_eq!(pv.total_pe, 121817);
        assert_eq!(pv.free_pe, 113625);
        assert_eq!(pv.allocated_pe, 8192);
        assert_eq!(pv.uuid.as_deref(), Some("Xy12ab-cdEF-3456"));
        assert_eq!(pv.allocatable.as_deref(), Some("yes"));
    }

    #[test]
    fn parses_segments_with_lookahead() {
        let map = parse_pvdisplay(ONE_PV);
        let pv = map.get("/dev/nvme0n1p3").unwrap();
        assert_eq!(pv.segments.len(), 2);

        let root = &pv.segments[0];
        assert_eq!((root.start, root.end), (0, 8191));
        assert_eq!(root.owner, SegmentOwner::Lv("lv-root".into()));
        assert_eq!(root.logical_extents, Some((0, 8191)));

        let free = &pv.segments[1];
        assert_eq!(free.owner, SegmentOwner::Free);
        assert_eq!(free.logical_extents, None);
    }

    #[test]
    fn reference_sizes() {
        let map = parse_pvdisplay(ONE_PV);
        let pv = map.get("/dev/nvme0n1p3").unwrap();
        let eps = 1e-6;
        assert!((pv.used_mb() - 8192.0 * 4.19).abs() < eps);
        assert!((pv.free_mb() - 113625.0 * 4.19).abs() < eps);
        assert!((pv.segments_mb() - 121817.0 * 4.19).abs() < eps);
    }

    #[test]
    fn garbage_owner_line_is_unknown() {
        let text = "PV Name /dev/sdz\n--- Physical Segments ---\nPhysical extent 0 to 9:\n  something odd\n";
        let map = parse_pvdisplay(text);
        assert_eq!(map.get("/dev/sdz").unwrap().segments[0].owner, SegmentOwner::Unknown);
    }

    #[test]
    fn marker_at_end_of_input_is_free() {
        let text = "PV Name /dev/sdz\nPV Size 41.9 MiB\nPE Size 4.19 MiB\n\
                    --- Physical Segments ---\nPhysical extent 0 to 9:";
        let map = parse_pvdisplay(text);
        let pv = map.get("/dev/sdz").unwrap();
        assert!(pv.segments[0].owner.is_free());
        assert_eq!(pv.used_mb(), 0.0);
        assert_eq!(pv.use_pct(), 0.0);
    }

    #[test]
    fn logical_volume_line_without_path_is_unknown() {
        assert_eq!(owner_from(Some("Logical volume")), SegmentOwner::Unknown);
        assert_eq!(owner_from(None), SegmentOwner::Free);
    }

    #[test]
    fn lv_named_like_free_is_not_free_space() {
        let owner = owner_from(Some("Logical volume\t/dev/vg0/FREEDOM"));
        assert_eq!(owner, SegmentOwner::Lv("FREEDOM".into()));
    }

    #[test]
    fn ranges_outside_segment_section_are_ignored() {
        let text = "PV Name /dev/sdz\nPhysical extent 0 to 9:\nFREE\n";
        assert!(parse_pvdisplay(text).get("/dev/sdz").unwrap().segments.is_empty());
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let text = "PV Name /dev/sdz\nPV Size unknown\nTotal PE lots\n";
        let map = parse_pvdisplay(text);
        let pv = map.get("/dev/sdz").unwrap();
        assert_eq!(pv.size_mb, 0.0);
        assert_eq!(pv.total_pe, 0);
        assert_eq!(pv.pe_size_mb, crate::models::allocation::DEFAULT_PE_SIZE_MB);
    }

    #[test]
    fn fields_before_first_pv_are_ignored() {
        let text = "VG Name stray\nPV Size 100 MiB\nPV Name\nPV Name /dev/sda\n";
        let map = parse_pvdisplay(text);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("/dev/sda").unwrap().vg_name, "");
    }

    #[test]
    fn empty_input_gives_empty_map() {
        assert!(parse_pvdisplay("").is_empty());
        assert!(parse_pvdisplay("   \n\n").is_empty());
    }

    #[test]
    fn sudo_is_skipped_for_root() {
        let cfg = PvdisplayConfig::default();
        let (prog, args) = build_command(&cfg, false);
        assert_eq!(prog, "sudo");
        assert_eq!(args, vec!["pvdisplay", "-m", "--units", "M"]);

        let (prog, args) = build_command(&cfg, true);
        assert_eq!(prog, "pvdisplay");
        assert_eq!(args, vec!["-m", "--units", "M"]);
    }

    fn direct(command: &str) -> PvdisplayConfig {
        PvdisplayConfig { command: command.to_string(), use_sudo: false, ..PvdisplayConfig::default() }
    }

    #[test]
    fn failing_command_is_reported_with_status() {
        let err = run_pvdisplay(&direct("false")).unwrap_err();
        assert!(matches!(err, SourceError::CommandFailed { .. }), "{:?}", err);
        assert_eq!(err.hint(), "Make sure you have sudo rights to execute pvdisplay");
    }

    #[test]
    fn missing_program_points_at_lvm2() {
        let err = run_pvdisplay(&direct("lvmviz-no-such-pvdisplay")).unwrap_err();
        assert!(matches!(err, SourceError::CommandNotFound(ref p) if p == "lvmviz-no-such-pvdisplay"), "{:?}", err);
        assert!(err.hint().contains("lvm2"));
    }

    #[test]
    fn missing_sudo_suggests_no_sudo() {
        let args = vec!["pvdisplay".to_string()];
        let err = capture("lvmviz-no-such-sudo", &args, "pvdisplay").unwrap_err();
        assert!(matches!(err, SourceError::SudoNotFound(_)), "{:?}", err);
        assert!(err.hint().contains("--no-sudo"));
    }

    #[test]
    fn successful_command_returns_stdout() {
        let cfg = PvdisplayConfig {
            command:  "echo".to_string(),
            args:     vec!["PV Name /dev/sdz".to_string()],
            use_sudo: false,
        };
        let text = run_pvdisplay(&cfg).unwrap();
        assert!(parse_pvdisplay(&text).get("/dev/sdz").is_some());
    }
}
