use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::app::App;

/// Right-hand panel with the streamed Gemini analysis report.
pub struct InsightPanel<'a> {
    pub app: &'a App,
}

impl<'a> InsightPanel<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for InsightPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Gemini AI 분석 인사이트 ")
            .title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        let app = self.app;

        if app.insight.is_empty() && !app.insight_loading {
            let hint = if app.keys.gemini_key().is_none() {
                "Gemini API 키를 설정해주세요."
            } else {
                "r 키를 눌러 AI 분석 리포트를 생성하세요."
            };
            Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .centered()
                .render(inner, buf);
            return;
        }

        if app.insight.is_empty() && app.insight_loading {
            Paragraph::new("AI 인사이트를 생성하는 중...")
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .render(inner, buf);
            return;
        }

        let mut lines = render_markdown_lite(&app.insight);
        if app.insight_loading {
            // Streaming cursor at the end of the growing text block.
            lines.push(Line::from(Span::styled(
                "▍",
                Style::default().fg(Color::Cyan),
            )));
        }

        // Keep the tail visible while text streams in.
        let total = lines.len() as u16;
        let scroll = total.saturating_sub(inner.height);

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(inner, buf);
    }
}

/// Minimal markdown styling: `#` headings bold, `**...**` markers stripped.
fn render_markdown_lite(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if let Some(heading) = trimmed
                .strip_prefix("### ")
                .or_else(|| trimmed.strip_prefix("## "))
                .or_else(|| trimmed.strip_prefix("# "))
            {
                Line::from(Span::styled(
                    heading,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
            } else if trimmed.starts_with("**") && trimmed.ends_with("**") && trimmed.len() > 4 {
                Line::from(Span::styled(
                    trimmed.trim_matches('*'),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(line)
            }
        })
        .collect()
}
