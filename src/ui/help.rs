use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(56, 20, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(Span::styled(" lvmviz keybindings (? to close) ", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        key_line(theme, "Global", ""),
        key_line(theme, "  q / Ctrl-C", "Quit"),
        key_line(theme, "  ? / F1",     "Toggle this help"),
        key_line(theme, "  Esc",        "Close help"),
        key_line(theme, "  t",          "Cycle color theme"),
        Line::from(""),
        key_line(theme, "Charts", ""),
        key_line(theme, "  ↑↓ / j k",   "Scroll"),
        key_line(theme, "  PageUp/Dn",  "Scroll by page"),
        key_line(theme, "  g / G",      "Jump first / last PV"),
        key_line(theme, "  o",          "Segments by start extent / as listed"),
        key_line(theme, "  r",          "Reverse PV order of the timeline"),
        Line::from(""),
        key_line(theme, "Legend", ""),
        key_line(theme, "  █",          "Allocated to a logical volume"),
        key_line(theme, "  ░",          "Free extents"),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    if desc.is_empty() {
        // Section header
        Line::from(vec![Span::styled(key, theme.title)])
    } else {
        Line::from(vec![
            Span::styled(format!("{:<16}", key), theme.footer_key),
            Span::styled(desc, theme.text_dim),
        ])
    }
}

/// Returns a centered Rect of the given size, capped at the available area.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
