use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppMode};
use crate::event::{Slot, ViewKind};

/// Bottom status bar showing mode, current view, and loading/error state.
pub struct StatusBar<'a> {
    pub app: &'a App,
}

impl<'a> StatusBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        // Background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_style(bg_style);
        }

        let mut spans = Vec::new();

        // Mode indicator
        let mode_str = match self.app.mode {
            AppMode::Normal => " NORMAL ",
            AppMode::Command => " COMMAND ",
            AppMode::InputA => " INPUT A ",
            AppMode::InputB => " INPUT B ",
        };
        let mode_style = Style::default()
            .bg(match self.app.mode {
                AppMode::Normal => Color::Blue,
                AppMode::Command => Color::Magenta,
                AppMode::InputA | AppMode::InputB => Color::Yellow,
            })
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        spans.push(Span::styled(mode_str, mode_style));
        spans.push(Span::raw(" "));

        // Current view
        let view_name = match self.app.current_view() {
            Some(ViewKind::VideoDetail) => self
                .app
                .detail
                .as_ref()
                .map(|d| d.video.title.clone())
                .unwrap_or_else(|| "영상 상세".to_owned()),
            Some(ViewKind::Help) => "Help".to_owned(),
            _ => {
                let a = self.app.slot(Slot::A).channel.as_ref();
                let b = self.app.slot(Slot::B).channel.as_ref();
                match (a, b) {
                    (Some(a), Some(b)) if self.app.compare_mode => {
                        format!("{} vs {}", a.title, b.title)
                    }
                    (Some(a), _) => a.title.clone(),
                    _ => "tubescope".to_owned(),
                }
            }
        };
        spans.push(Span::styled(view_name, bg_style));

        // Loading indicator
        if self.app.loading
            || self.app.slot_a.videos_loading
            || self.app.slot_b.videos_loading
            || self.app.insight_loading
            || self.app.revenue_loading
        {
            spans.push(Span::styled(
                " [loading...]",
                Style::default().bg(Color::DarkGray).fg(Color::Yellow),
            ));
        }

        // Error message (right-aligned; set_line clips overflow)
        if let Some(ref msg) = self.app.error {
            let left_width: usize = spans.iter().map(|s| s.width()).sum();
            let msg_width = msg.width().min(area.width as usize);
            let padding = (area.width as usize).saturating_sub(left_width + msg_width);
            if padding > 0 {
                spans.push(Span::styled(" ".repeat(padding), bg_style));
            }
            spans.push(Span::styled(
                msg.as_str(),
                Style::default().bg(Color::DarkGray).fg(Color::Red),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
