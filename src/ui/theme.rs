use crate::util::palette::parse_hex;
use ratatui::style::{Color, Modifier, Style};

// ── Helper: build an Rgb Color from a hex literal ──────────────────────

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >>  8) & 0xFF) as u8,
        ( hex        & 0xFF) as u8,
    )
}

/// Terminal color for a chart color string such as "#4ECDC4".
pub fn chart_color(hex: &str) -> Color {
    match parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None            => Color::Gray,
    }
}

// ── Theme variant selector ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeVariant {
    Default,
    Dracula,
    Gruvbox,
    Nord,
}

impl ThemeVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Dracula => "Dracula",
            Self::Gruvbox => "Gruvbox",
            Self::Nord    => "Nord",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Default => Self::Dracula,
            Self::Dracula => Self::Gruvbox,
            Self::Gruvbox => Self::Nord,
            Self::Nord    => Self::Default,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::Dracula,
            "gruvbox" => Self::Gruvbox,
            "nord"    => Self::Nord,
            _         => Self::Default,
        }
    }
}

// ── Theme struct ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Theme {
    pub border:      Style,
    pub title:       Style,
    pub text:        Style,
    pub text_dim:    Style,
    pub header:      Style,
    pub ok:          Style,
    pub warn:        Style,
    pub crit:        Style,
    pub footer_bg:   Style,
    pub footer_key:  Style,
    pub footer_text: Style,
}

impl Theme {
    pub fn for_variant(v: ThemeVariant) -> Self {
        match v {
            ThemeVariant::Default => Self::default(),
            ThemeVariant::Dracula => Self::dracula(),
            ThemeVariant::Gruvbox => Self::gruvbox(),
            ThemeVariant::Nord    => Self::nord(),
        }
    }

    pub fn default() -> Self {
        Self {
            border:      Style::default().fg(Color::DarkGray),
            title:       Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            text:        Style::default().fg(Color::White),
            text_dim:    Style::default().fg(Color::DarkGray),
            header:      Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD),
            ok:          Style::default().fg(Color::Green),
            warn:        Style::default().fg(Color::Yellow),
            crit:        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            footer_bg:   Style::default().bg(Color::DarkGray).fg(Color::White),
            footer_key:  Style::default().bg(Color::DarkGray).fg(Color::Cyan).add_modifier(Modifier::BOLD),
            footer_text: Style::default().bg(Color::DarkGray).fg(Color::Gray),
        }
    }

    fn dracula() -> Self {
        // bg: #282a36  current-line: #44475a  comment: #6272a4
        // fg: #f8f8f2  green: #50fa7b  yellow: #f1fa8c  purple: #bd93f9  red: #ff5555
        Self {
            border:      Style::default().fg(rgb(0x6272a4)),
            title:       Style::default().fg(rgb(0xf8f8f2)).add_modifier(Modifier::BOLD),
            text:        Style::default().fg(rgb(0xf8f8f2)),
            text_dim:    Style::default().fg(rgb(0x6272a4)),
            header:      Style::default().fg(rgb(0xf8f8f2)).bg(rgb(0x44475a)).add_modifier(Modifier::BOLD),
            ok:          Style::default().fg(rgb(0x50fa7b)),
            warn:        Style::default().fg(rgb(0xf1fa8c)),
            crit:        Style::default().fg(rgb(0xff5555)).add_modifier(Modifier::BOLD),
            footer_bg:   Style::default().bg(rgb(0x44475a)).fg(rgb(0xf8f8f2)),
            footer_key:  Style::default().bg(rgb(0x44475a)).fg(rgb(0xbd93f9)).add_modifier(Modifier::BOLD),
            footer_text: Style::default().bg(rgb(0x44475a)).fg(rgb(0x6272a4)),
        }
    }

    fn gruvbox() -> Self {
        // bg1: #3c3836  bg2: #504945  fg1: #ebdbb2  fg4: #a89984
        // red: #fb4934  green: #b8bb26  yellow: #fabd2f  aqua: #83a598
        Self {
            border:      Style::default().fg(rgb(0x504945)),
            title:       Style::default().fg(rgb(0xebdbb2)).add_modifier(Modifier::BOLD),
            text:        Style::default().fg(rgb(0xebdbb2)),
            text_dim:    Style::default().fg(rgb(0xa89984)),
            header:      Style::default().fg(rgb(0xebdbb2)).bg(rgb(0x504945)).add_modifier(Modifier::BOLD),
            ok:          Style::default().fg(rgb(0xb8bb26)),
            warn:        Style::default().fg(rgb(0xfabd2f)),
            crit:        Style::default().fg(rgb(0xfb4934)).add_modifier(Modifier::BOLD),
            footer_bg:   Style::default().bg(rgb(0x3c3836)).fg(rgb(0xebdbb2)),
            footer_key:  Style::default().bg(rgb(0x3c3836)).fg(rgb(0x83a598)).add_modifier(Modifier::BOLD),
            footer_text: Style::default().bg(rgb(0x3c3836)).fg(rgb(0xa89984)),
        }
    }

    fn nord() -> Self {
        // Polar Night: #2e3440 #3b4252 #4c566a  Snow Storm: #d8dee9 #e5e9f0 #eceff4
        // Frost: #88c0d0  Aurora: #bf616a #ebcb8b #a3be8c
        Self {
            border:      Style::default().fg(rgb(0x4c566a)),
            title:       Style::default().fg(rgb(0xeceff4)).add_modifier(Modifier::BOLD),
            text:        Style::default().fg(rgb(0xe5e9f0)),
            text_dim:    Style::default().fg(rgb(0x4c566a)),
            header:      Style::default().fg(rgb(0xeceff4)).bg(rgb(0x3b4252)).add_modifier(Modifier::BOLD),
            ok:          Style::default().fg(rgb(0xa3be8c)),
            warn:        Style::default().fg(rgb(0xebcb8b)),
            crit:        Style::default().fg(rgb(0xbf616a)).add_modifier(Modifier::BOLD),
            footer_bg:   Style::default().bg(rgb(0x3b4252)).fg(rgb(0xd8dee9)),
            footer_key:  Style::default().bg(rgb(0x3b4252)).fg(rgb(0x88c0d0)).add_modifier(Modifier::BOLD),
            footer_text: Style::default().bg(rgb(0x3b4252)).fg(rgb(0x4c566a)),
        }
    }

    /// Usage-percentage style: green below 75, yellow below 95, red above.
    pub fn usage_style(&self, pct: f64) -> Style {
        if      pct >= 95.0 { self.crit }
        else if pct >= 75.0 { self.warn }
        else                { self.ok   }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_cycle() {
        let mut v = ThemeVariant::from_name("NORD");
        assert_eq!(v, ThemeVariant::Nord);
        v = v.next();
        assert_eq!(v, ThemeVariant::Default);
        assert_eq!(ThemeVariant::from_name("bogus"), ThemeVariant::Default);
    }

    #[test]
    fn chart_colors_convert() {
        assert_eq!(chart_color("#E8E8E8"), Color::Rgb(0xE8, 0xE8, 0xE8));
        assert_eq!(chart_color("teal"), Color::Gray);
    }
}
