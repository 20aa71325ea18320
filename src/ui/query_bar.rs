use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::App;
use crate::keys::KeyKind;

/// Two-line header: the channel queries plus key/toggle state.
pub struct QueryBar<'a> {
    pub app: &'a App,
}

impl<'a> QueryBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let label_style = Style::default().fg(Color::DarkGray);
        let value_style = Style::default().fg(Color::White);

        // -- Line 1: channel A query + key badges --
        let input_a = if self.app.slot_a.input.is_empty() {
            Span::styled("채널 ID, 핸들(@handle) 또는 URL", label_style)
        } else {
            Span::styled(self.app.slot_a.input.as_str(), value_style)
        };

        let mut line_a = vec![
            Span::styled("채널 A ", Style::default().fg(Color::Cyan)),
            input_a,
            Span::raw("  "),
            key_badge(self.app, KeyKind::YouTube),
            Span::raw(" "),
            key_badge(self.app, KeyKind::Gemini),
        ];
        if self.app.keys.is_from_env(KeyKind::YouTube) || self.app.keys.is_from_env(KeyKind::Gemini)
        {
            line_a.push(Span::styled(" (환경 변수)", label_style));
        }
        buf.set_line(area.x, area.y, &Line::from(line_a), area.width);

        if area.height < 2 {
            return;
        }

        // -- Line 2: channel B query (compare mode) + toggles --
        let mut line_b = Vec::new();
        if self.app.compare_mode {
            line_b.push(Span::styled("채널 B ", Style::default().fg(Color::Magenta)));
            if self.app.slot_b.input.is_empty() {
                line_b.push(Span::styled("비교할 채널 입력 (b 키)", label_style));
            } else {
                line_b.push(Span::styled(self.app.slot_b.input.as_str(), value_style));
            }
            line_b.push(Span::raw("  "));
        }
        line_b.push(toggle_span("Gemini AI", self.app.keys.use_ai() && !self.app.compare_mode));
        line_b.push(Span::raw(" "));
        line_b.push(toggle_span("채널 비교", self.app.compare_mode));
        buf.set_line(area.x, area.y + 1, &Line::from(line_b), area.width);
    }
}

fn key_badge(app: &App, kind: KeyKind) -> Span<'static> {
    let set = app.keys.key(kind).is_some();
    let (text, color) = if set {
        (format!("[{} 키 활성]", kind.name()), Color::Green)
    } else {
        (format!("[{} 키 미설정]", kind.name()), Color::Red)
    };
    Span::styled(text, Style::default().fg(color))
}

fn toggle_span(label: &str, on: bool) -> Span<'static> {
    if on {
        Span::styled(
            format!("{label} ON"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("{label} OFF"), Style::default().fg(Color::DarkGray))
    }
}
