use crate::app::App;
use crate::chart::PvOrder;
use crate::ui::theme::chart_color;
use crate::ui::{footer, help};
use crate::util::human::fmt_mb;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SUFFIX_W: usize = 18;

pub fn render(f: &mut Frame, app: &App) {
    let area  = f.area();
    let theme = &app.theme;

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // Header
    let t = &app.summary.totals;
    let title = format!(
        " lvmviz  {}   {} PV(s)   {} used of {} ({:.1}%)",
        app.source, app.summary.pvs.len(), fmt_mb(t.used_mb), fmt_mb(t.size_mb), t.use_pct
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(title, theme.title))).style(theme.header),
        root[0],
    );

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(root[1]);

    render_overview(f, body[0], app);
    render_timeline(f, body[1], app);
    footer::render_footer(f, root[2], theme);

    if app.show_help {
        help::render(f, theme);
    }
}

fn render_overview(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled("Space Usage by PV", theme.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bars = &app.chart.overview;
    if bars.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("  No physical volumes found in input.", theme.text_dim)),
            inner,
        );
        return;
    }

    let label_w = label_width(bars.iter().map(|b| b.pv.as_str()));
    let bar_w   = (inner.width as usize).saturating_sub(label_w + SUFFIX_W);
    let max     = nonzero(app.chart.max_overview_mb());

    let mut lines: Vec<Line> = Vec::new();
    for bar in bars {
        let mut spans = vec![Span::styled(format!("{:<w$}", bar.pv, w = label_w), theme.text)];

        let widths = cell_widths(bar.slices.iter().map(|s| s.size_mb), max, bar_w);
        let mut used = 0;
        for (slice, cells) in bar.slices.iter().zip(widths) {
            if cells == 0 { continue; }
            let ch = if slice.free { "░" } else { "█" };
            spans.push(Span::styled(ch.repeat(cells), Style::default().fg(chart_color(&slice.color))));
            used += cells;
        }
        spans.push(Span::raw(" ".repeat(bar_w.saturating_sub(used))));
        spans.push(Span::styled(format!(" {:>6.1}%", bar.use_pct), theme.usage_style(bar.use_pct)));
        spans.push(Span::styled(format!(" {:>9}", fmt_mb(bar.total_mb)), theme.text_dim));
        lines.push(Line::from(spans));
    }

    // Legend
    lines.push(Line::from(""));
    let mut legend = vec![Span::raw(" ".repeat(label_w))];
    for entry in &app.chart.legend {
        let name = if entry.free { "Free Space" } else { entry.lv.as_str() };
        legend.push(Span::styled("■ ", Style::default().fg(chart_color(&entry.color))));
        legend.push(Span::styled(format!("{}  ", name), theme.text_dim));
    }
    lines.push(Line::from(legend));

    f.render_widget(Paragraph::new(lines).scroll((app.scroll as u16, 0)), inner);
}

fn render_timeline(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let pv_order = match app.opts.timeline_pv_order {
        PvOrder::Ascending  => "A→Z",
        PvOrder::Descending => "Z→A",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(
            format!("Segments  ({}, PVs {})", app.opts.segment_order.label(), pv_order),
            theme.title,
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = &app.chart.timeline;
    if rows.is_empty() { return; }

    let label_w = label_width(rows.iter().map(|r| r.pv.as_str()));
    let bar_w   = (inner.width as usize).saturating_sub(label_w + SUFFIX_W);
    let max     = nonzero(app.chart.max_timeline_gb());

    let mut lines: Vec<Line> = Vec::new();
    for row in rows {
        let mut spans = vec![Span::styled(format!("{:<w$}", row.pv, w = label_w), theme.text)];

        let widths = cell_widths(row.slices.iter().map(|s| s.size_gb), max, bar_w);
        for (slice, cells) in row.slices.iter().zip(widths) {
            if cells == 0 { continue; }
            let color = chart_color(&slice.color);
            if slice.labeled && cells >= slice.lv.chars().count() + 2 {
                let fg = if slice.free { Color::DarkGray } else { Color::Black };
                spans.push(Span::styled(
                    format!("{:^w$}", slice.lv, w = cells),
                    Style::default().bg(color).fg(fg).add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled("█".repeat(cells), Style::default().fg(color)));
            }
        }
        spans.push(Span::styled(format!("  {:.1} GB", row.total_gb), theme.text_dim));
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines).scroll((app.scroll as u16, 0)), inner);
}

/// Split `width` cells among consecutive sizes scaled against `max`.
/// Rounding is done on running totals so the row never drifts.
pub fn cell_widths(sizes: impl IntoIterator<Item = f64>, max: f64, width: usize) -> Vec<usize> {
    let mut out  = Vec::new();
    let mut acc  = 0.0;
    let mut prev = 0usize;
    for size in sizes {
        acc += size;
        let end = ((acc / max) * width as f64).round() as usize;
        let end = end.min(width).max(prev);
        out.push(end - prev);
        prev = end;
    }
    out
}

fn label_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0).max(6) + 2
}

fn nonzero(v: f64) -> f64 {
    if v > 0.0 { v } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_fill_exactly() {
        let w = cell_widths([1.0, 1.0, 1.0], 3.0, 10);
        assert_eq!(w.iter().sum::<usize>(), 10);
        assert_eq!(w, vec![3, 4, 3]);
    }

    #[test]
    fn shorter_rows_leave_room() {
        let w = cell_widths([5.0], 10.0, 40);
        assert_eq!(w, vec![20]);
    }

    #[test]
    fn widths_never_exceed_available() {
        let w = cell_widths([10.0, 10.0], 5.0, 8);
        assert_eq!(w.iter().sum::<usize>(), 8);
    }
}
