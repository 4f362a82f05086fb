use crate::chart::{ChartData, ChartOptions};
use crate::input::{handle_key, Action};
use crate::models::allocation::AllocationMap;
use crate::ui::allocation_view;
use crate::ui::theme::{Theme, ThemeVariant};
use crate::util::palette::ColorMap;
use crate::util::summary::Summary;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, Frame, Terminal};
use std::time::Duration;

const POLL_TIMEOUT: Duration = Duration::from_millis(250);
const PAGE: usize = 10;

// ── App ───────────────────────────────────────────────────────────────

/// State of the interactive allocation view.
pub struct App {
    pub theme:         Theme,
    pub theme_variant: ThemeVariant,

    pub source:  String,
    pub model:   AllocationMap,
    pub colors:  ColorMap,
    pub summary: Summary,
    pub opts:    ChartOptions,
    pub chart:   ChartData,

    pub scroll:    usize,
    pub show_help: bool,
    should_quit:   bool,
}

impl App {
    pub fn new(
        model:   AllocationMap,
        colors:  ColorMap,
        opts:    ChartOptions,
        theme:   ThemeVariant,
        source:  impl Into<String>,
    ) -> Self {
        let summary = Summary::from_model(&model);
        let chart   = ChartData::build(&model, &colors, &opts);
        Self {
            theme:         Theme::for_variant(theme),
            theme_variant: theme,
            source:        source.into(),
            model,
            colors,
            summary,
            opts,
            chart,
            scroll:        0,
            show_help:     false,
            should_quit:   false,
        }
    }

    pub fn should_quit(&self) -> bool { self.should_quit }

    fn max_scroll(&self) -> usize {
        self.model.len().saturating_sub(1)
    }

    fn rebuild_chart(&mut self) {
        self.chart = ChartData::build(&self.model, &self.colors, &self.opts);
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ShowHelp => self.show_help = !self.show_help,
            Action::Back => self.show_help = false,
            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
                log::debug!("theme → {}", self.theme_variant.name());
            }
            Action::ToggleSegmentOrder => {
                self.opts.segment_order = self.opts.segment_order.toggle();
                self.rebuild_chart();
            }
            Action::ReversePvOrder => {
                self.opts.timeline_pv_order = self.opts.timeline_pv_order.reverse();
                self.rebuild_chart();
            }
            Action::ScrollUp   => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            Action::PageUp     => self.scroll = self.scroll.saturating_sub(PAGE),
            Action::PageDown   => self.scroll = (self.scroll + PAGE).min(self.max_scroll()),
            Action::JumpTop    => self.scroll = 0,
            Action::JumpBottom => self.scroll = self.max_scroll(),
            Action::None => {}
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        allocation_view::render(f, self);
    }

    pub fn run<B: Backend>(&mut self, term: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            term.draw(|f| self.draw(f))?;

            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.apply(handle_key(key));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{PvOrder, SegmentOrder};
    use crate::collectors::{pvdisplay::parse_pvdisplay, sample::SAMPLE_PVDISPLAY};
    use ratatui::backend::TestBackend;

    fn sample_app() -> App {
        let model  = parse_pvdisplay(SAMPLE_PVDISPLAY);
        let colors = ColorMap::with_defaults(&model);
        App::new(model, colors, ChartOptions::default(), ThemeVariant::Default, "sample")
    }

    fn screen(app: &App, w: u16, h: u16) -> String {
        let mut term = Terminal::new(TestBackend::new(w, h)).unwrap();
        term.draw(|f| app.draw(f)).unwrap();
        term.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_both_charts() {
        let text = screen(&sample_app(), 120, 30);
        assert!(text.contains("Space Usage by PV"));
        assert!(text.contains("Segments"));
        for pv in ["sda2", "sdb1", "sdc1"] {
            assert!(text.contains(pv), "missing {}", pv);
        }
        assert!(text.contains("Free Space"));
    }

    #[test]
    fn toggles_rebuild_chart() {
        let mut app = sample_app();
        assert_eq!(app.chart.timeline[0].pv, "sdc1");

        app.apply(Action::ReversePvOrder);
        assert_eq!(app.opts.timeline_pv_order, PvOrder::Ascending);
        assert_eq!(app.chart.timeline[0].pv, "sda2");

        app.apply(Action::ToggleSegmentOrder);
        assert_eq!(app.opts.segment_order, SegmentOrder::Parse);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut app = sample_app();
        app.apply(Action::ScrollUp);
        assert_eq!(app.scroll, 0);
        app.apply(Action::PageDown);
        assert_eq!(app.scroll, 2);
        app.apply(Action::JumpTop);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn help_overlay_and_quit() {
        let mut app = sample_app();
        app.apply(Action::ShowHelp);
        assert!(screen(&app, 120, 30).contains("keybindings"));
        app.apply(Action::Back);
        assert!(!app.show_help);
        app.apply(Action::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn empty_model_renders_placeholder() {
        let model = AllocationMap::default();
        let colors = ColorMap::with_defaults(&model);
        let app = App::new(model, colors, ChartOptions::default(), ThemeVariant::Nord, "empty");
        assert!(screen(&app, 80, 20).contains("No physical volumes"));
    }
}
