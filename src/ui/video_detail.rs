use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::app::DetailState;
use crate::format::{format_published, group_digits, parse_count};
use crate::gemini::types::Sentiment;

/// Full-screen detail view for one video: metadata, description, tags, and
/// the on-demand comment-reaction analysis.
pub struct VideoDetailView<'a> {
    pub detail: &'a DetailState,
    pub gemini_key_set: bool,
    pub scroll: usize,
}

impl<'a> VideoDetailView<'a> {
    pub fn new(detail: &'a DetailState, gemini_key_set: bool) -> Self {
        Self {
            detail,
            gemini_key_set,
            scroll: 0,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for VideoDetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let video = &self.detail.video;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" 영상 상세 ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        let dim = Style::default().fg(Color::DarkGray);
        let body = Style::default().fg(Color::White);

        let mut lines: Vec<Line> = Vec::new();

        // -- Header --
        lines.push(Line::from(Span::styled(
            video.title.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("{} 게시", format_published(video.published_at)),
            dim,
        )));
        lines.push(Line::from(vec![
            Span::styled("조회수 ", dim),
            Span::styled(group_digits(parse_count(&video.statistics.view_count)), body),
            Span::styled("  좋아요 ", dim),
            Span::styled(group_digits(parse_count(&video.statistics.like_count)), body),
            Span::styled("  댓글 ", dim),
            Span::styled(
                group_digits(parse_count(&video.statistics.comment_count)),
                body,
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("https://www.youtube.com/watch?v={} (o 키로 열기)", video.id),
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(""));

        // -- Description --
        lines.push(section_heading("설명"));
        if video.description.is_empty() {
            lines.push(Line::from(Span::styled("설명이 없습니다.", dim)));
        } else {
            for desc_line in video.description.lines() {
                lines.push(Line::from(desc_line));
            }
        }
        lines.push(Line::from(""));

        // -- Tags --
        if let Some(tags) = video.tags.as_ref().filter(|t| !t.is_empty()) {
            lines.push(section_heading("태그"));
            let joined = tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(Span::styled(
                joined,
                Style::default().fg(Color::Cyan),
            )));
            lines.push(Line::from(""));
        }

        // -- Comment analysis --
        lines.push(section_heading("AI 댓글 반응 분석"));
        lines.extend(self.analysis_lines());

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll as u16, 0))
            .render(inner, buf);
    }
}

impl VideoDetailView<'_> {
    fn analysis_lines(&self) -> Vec<Line<'_>> {
        let dim = Style::default().fg(Color::DarkGray);
        let detail = self.detail;

        if detail.analyzing {
            return vec![Line::from(Span::styled("댓글을 분석 중입니다...", dim))];
        }

        if let Some(ref error) = detail.analysis_error {
            return vec![Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))];
        }

        let Some(ref analysis) = detail.analysis else {
            let hint = if !self.gemini_key_set {
                "Gemini API 키를 설정하면 댓글 분석이 가능합니다."
            } else if detail.video.statistics.comment_count == "0" {
                "분석할 댓글이 없습니다."
            } else {
                "a 키를 눌러 이 영상의 댓글 반응을 분석해보세요."
            };
            return vec![Line::from(Span::styled(hint, dim))];
        };

        let mut lines = Vec::new();

        lines.push(subheading("한줄 요약"));
        lines.push(Line::from(analysis.summary.as_str()));
        lines.push(Line::from(""));

        lines.push(subheading("감성 분석"));
        lines.push(sentiment_gauge(&analysis.sentiment, 40));
        lines.push(sentiment_legend(&analysis.sentiment));
        lines.push(Line::from(""));

        lines.push(subheading("핵심 주제"));
        lines.push(Line::from(Span::styled(
            analysis
                .key_topics
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" "),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(""));

        lines.push(subheading("제안 사항"));
        for suggestion in &analysis.suggestions {
            lines.push(Line::from(format!("- {suggestion}")));
        }

        lines
    }
}

fn section_heading(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn subheading(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Horizontal share bar: positive green, negative red, neutral gray.
fn sentiment_gauge(sentiment: &Sentiment, width: usize) -> Line<'static> {
    let pos = (sentiment.positive / 100.0 * width as f64).round() as usize;
    let neg = (sentiment.negative / 100.0 * width as f64).round() as usize;
    let pos = pos.min(width);
    let neg = neg.min(width - pos);
    let neu = width - pos - neg;

    Line::from(vec![
        Span::styled("█".repeat(pos), Style::default().fg(Color::Green)),
        Span::styled("█".repeat(neg), Style::default().fg(Color::Red)),
        Span::styled("█".repeat(neu), Style::default().fg(Color::DarkGray)),
    ])
}

fn sentiment_legend(sentiment: &Sentiment) -> Line<'static> {
    Line::from(vec![
        Span::styled("긍정 ", Style::default().fg(Color::Green)),
        Span::raw(format!("{:.1}%  ", sentiment.positive)),
        Span::styled("부정 ", Style::default().fg(Color::Red)),
        Span::raw(format!("{:.1}%  ", sentiment.negative)),
        Span::styled("중립 ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{:.1}%", sentiment.neutral)),
    ])
}
