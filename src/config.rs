use crate::chart::{PvOrder, SegmentOrder};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub pvdisplay: PvdisplayConfig,

    #[serde(default)]
    pub charts: ChartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Terminal view theme: default, dracula, gruvbox, nord
    pub theme: String,
    /// Directory for charts written under their default name. Empty = cwd.
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PvdisplayConfig {
    /// Program queried in live mode
    pub command: String,
    pub args: Vec<String>,
    /// Prefix the command with sudo when not running as root
    pub use_sudo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// LV colors as "#RRGGBB". Empty = built-in palette.
    pub palette: Vec<String>,
    /// Color of unallocated extents
    pub free_color: String,
    pub segment_order: SegmentOrder,
    pub timeline_pv_order: PvOrder,
    /// Segments smaller than this (GB) get no text label in the timeline
    pub label_min_gb: f64,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { theme: "default".into(), output_dir: String::new() }
    }
}

impl Default for PvdisplayConfig {
    fn default() -> Self {
        Self {
            command:  "pvdisplay".into(),
            args:     vec!["-m".into(), "--units".into(), "M".into()],
            use_sudo: true,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            palette:           Vec::new(),
            free_color:        crate::util::palette::FREE_COLOR.into(),
            segment_order:     SegmentOrder::Start,
            timeline_pv_order: PvOrder::Descending,
            label_min_gb:      10.0,
        }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else { return Config::default() };
        match Self::load_from(&path) {
            Ok(c)  => c,
            Err(e) => {
                if path.exists() {
                    log::warn!("ignoring {}: {:#}", path.display(), e);
                } else {
                    // Write defaults on first run (best-effort)
                    if let Err(e) = write_defaults(&path) {
                        log::debug!("could not write default config: {:#}", e);
                    }
                }
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&text)?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lvmviz").join("lvmviz.toml"))
    }
}

fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# lvmviz configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
