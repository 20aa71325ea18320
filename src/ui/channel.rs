use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::SlotState;
use crate::gemini::types::RevenueAnalysis;
use crate::ui::chart::VideoViewsChart;
use crate::ui::stats::StatCards;
use crate::ui::video_list::VideoListView;

/// One dashboard column: stat cards, the selector line, the view-count
/// chart, and the video list for a single channel slot.
pub struct ChannelColumn<'a> {
    pub slot: &'a SlotState,
    pub active: bool,
    pub show_title: bool,
    pub revenue: Option<&'a RevenueAnalysis>,
    pub revenue_loading: bool,
    pub show_revenue: bool,
}

impl<'a> ChannelColumn<'a> {
    pub fn new(slot: &'a SlotState, active: bool) -> Self {
        Self {
            slot,
            active,
            show_title: false,
            revenue: None,
            revenue_loading: false,
            show_revenue: false,
        }
    }

    /// Show the channel title header (compare-mode columns).
    pub fn titled(mut self) -> Self {
        self.show_title = true;
        self
    }

    pub fn revenue(mut self, revenue: Option<&'a RevenueAnalysis>, loading: bool) -> Self {
        self.revenue = revenue;
        self.revenue_loading = loading;
        self.show_revenue = true;
        self
    }
}

impl Widget for ChannelColumn<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(channel) = &self.slot.channel else {
            return;
        };

        let title_height = u16::from(self.show_title);
        let [title_area, stats_area, selector_area, chart_area, list_area] = Layout::vertical([
            Constraint::Length(title_height),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(9),
            Constraint::Min(1),
        ])
        .areas(area);

        if self.show_title {
            let marker = if self.active { "▶ " } else { "" };
            Paragraph::new(format!("{marker}{}", channel.title))
                .style(
                    Style::default()
                        .fg(if self.active { Color::Cyan } else { Color::White })
                        .add_modifier(Modifier::BOLD),
                )
                .centered()
                .render(title_area, buf);
        }

        let mut stat_cards = StatCards::new(channel);
        if self.show_revenue {
            stat_cards = stat_cards.revenue(self.revenue, self.revenue_loading);
        }
        stat_cards.render(stats_area, buf);

        // Selector line: the slot's own period/sort choices.
        let selector = Line::from(vec![
            Span::styled("기간: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.slot.period.label(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  정렬: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} 순", self.slot.sort_order.label()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (p/s 키로 변경)", Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(selector).render(selector_area, buf);

        let list_title = format!(
            "{} {} 순",
            self.slot.period.label(),
            self.slot.sort_order.label()
        );
        let chart_title = format!("{list_title} 조회수");

        if self.slot.videos_loading {
            Paragraph::new("영상 데이터를 불러오는 중...")
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .render(chart_area, buf);
        } else {
            VideoViewsChart::new(&chart_title, &self.slot.videos).render(chart_area, buf);
        }

        VideoListView::new(&list_title, &self.slot.videos, self.slot.selected_index)
            .loading(self.slot.videos_loading)
            .active(self.active)
            .render(list_area, buf);
    }
}
