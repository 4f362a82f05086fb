use crate::config::ChartConfig;
use crate::models::allocation::{AllocationMap, SegmentOwner};

/// Neutral color for unallocated extents.
pub const FREE_COLOR: &str = "#E8E8E8";

pub const DEFAULT_PALETTE: [&str; 15] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7",
    "#DDA0DD", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E9",
    "#F8C471", "#82E0AA", "#F1948A", "#85C1E9", "#D7BDE2",
];

/// Segment owner → display color, in legend order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    colors: Vec<(SegmentOwner, String)>,
    free:   String,
}

impl ColorMap {
    /// Walk the owners sorted by label and hand out palette entries in order.
    /// Free space always takes `free_color` and does not use up a palette slot.
    ///
    /// Entries that are not `#RRGGBB` are dropped with a warning; an invalid
    /// `free_color` falls back to [`FREE_COLOR`].
    pub fn assign(map: &AllocationMap, palette: &[String], free_color: &str) -> Self {
        let mut valid: Vec<String> = palette.iter()
            .filter(|c| {
                let ok = parse_hex(c).is_some();
                if !ok { log::warn!("ignoring palette color {:?}: expected #RRGGBB", c); }
                ok
            })
            .cloned()
            .collect();
        if valid.is_empty() {
            valid = DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect();
        }

        let free = if parse_hex(free_color).is_some() {
            free_color.to_string()
        } else {
            log::warn!("ignoring free_color {:?}: expected #RRGGBB", free_color);
            FREE_COLOR.to_string()
        };

        let mut colors = Vec::new();
        let mut idx = 0usize;
        for owner in map.owners() {
            let color = if owner.is_free() {
                free.clone()
            } else {
                idx += 1;
                valid[(idx - 1) % valid.len()].clone()
            };
            colors.push((owner.clone(), color));
        }
        Self { colors, free }
    }

    pub fn from_config(map: &AllocationMap, cfg: &ChartConfig) -> Self {
        Self::assign(map, &cfg.palette, &cfg.free_color)
    }

    pub fn with_defaults(map: &AllocationMap) -> Self {
        Self::assign(map, &[], FREE_COLOR)
    }

    /// Color for `owner`; owners never seen during assignment get the free color.
    pub fn get(&self, owner: &SegmentOwner) -> &str {
        self.colors.iter()
            .find(|(o, _)| o == owner)
            .map(|(_, c)| c.as_str())
            .unwrap_or(&self.free)
    }

    /// Legend entries in label order.
    pub fn entries(&self) -> impl Iterator<Item = (&SegmentOwner, &str)> {
        self.colors.iter().map(|(o, c)| (o, c.as_str()))
    }

    pub fn len(&self) -> usize { self.colors.len() }

    pub fn is_empty(&self) -> bool { self.colors.is_empty() }
}

/// "#RRGGBB" → (r, g, b)
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) { return None; }
    let v = u32::from_str_radix(hex, 16).ok()?;
    Some(((v >> 16) as u8, (v >> 8) as u8, v as u8))
}
