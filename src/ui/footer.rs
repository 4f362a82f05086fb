use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEYS: &[(&str, &str)] = &[
    ("q", "Quit"), ("↑↓/jk", "Scroll"), ("g/G", "Top/Bot"),
    ("o", "Segment order"), ("r", "Reverse PVs"), ("t", "Theme"), ("?", "Help"),
];

pub fn render_footer(f: &mut Frame, area: Rect, theme: &Theme) {
    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];

    for (key, desc) in KEYS {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }

    let para = Paragraph::new(Line::from(spans)).style(theme.footer_bg);
    f.render_widget(para, area);
}
