use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::format::{format_count, format_revenue, group_digits, parse_count};
use crate::gemini::types::RevenueAnalysis;
use crate::youtube::types::Channel;

/// The stat-card row: subscribers, total views, video count, and (for a
/// single AI-enabled channel) the estimated monthly revenue.
pub struct StatCards<'a> {
    pub channel: &'a Channel,
    pub revenue: Option<&'a RevenueAnalysis>,
    pub revenue_loading: bool,
    pub show_revenue: bool,
}

impl<'a> StatCards<'a> {
    pub fn new(channel: &'a Channel) -> Self {
        Self {
            channel,
            revenue: None,
            revenue_loading: false,
            show_revenue: false,
        }
    }

    pub fn revenue(mut self, revenue: Option<&'a RevenueAnalysis>, loading: bool) -> Self {
        self.revenue = revenue;
        self.revenue_loading = loading;
        self.show_revenue = true;
        self
    }
}

impl Widget for StatCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stats = &self.channel.statistics;

        let mut cards: Vec<(&str, String)> = vec![
            ("총 구독자", format_count(&stats.subscriber_count)),
            ("총 조회수", format_count(&stats.view_count)),
            ("총 비디오 수", group_digits(parse_count(&stats.video_count))),
        ];

        if self.show_revenue {
            let value = if self.revenue_loading {
                "분석 중...".to_owned()
            } else if let Some(revenue) = self.revenue {
                format!(
                    "{} ~ {}원",
                    format_revenue(revenue.estimated_monthly_min),
                    format_revenue(revenue.estimated_monthly_max),
                )
            } else {
                "분석 불가".to_owned()
            };
            cards.push(("예상 월 수익 (KRW)", value));
        }

        let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
        let areas = Layout::horizontal(constraints).split(area);

        for ((title, value), card_area) in cards.into_iter().zip(areas.iter()) {
            StatCard { title, value }.render(*card_area, buf);
        }
    }
}

struct StatCard<'a> {
    title: &'a str,
    value: String,
}

impl Widget for StatCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(Color::DarkGray))
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(self.value).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .centered()
        .render(inner, buf);
    }
}
