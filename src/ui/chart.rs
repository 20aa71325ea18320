use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Widget};

use crate::format::{format_count, parse_count};
use crate::ui::video_card::truncate_width;
use crate::youtube::types::Video;

/// Bar chart of per-video view counts.
pub struct VideoViewsChart<'a> {
    pub title: &'a str,
    pub videos: &'a [Video],
}

impl<'a> VideoViewsChart<'a> {
    pub fn new(title: &'a str, videos: &'a [Video]) -> Self {
        Self { title, videos }
    }
}

impl Widget for VideoViewsChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.videos.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "표시할 데이터가 없습니다",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        // Fit as many bars as the width allows.
        let bar_width: u16 = 8;
        let bar_gap: u16 = 1;
        let max_bars = (inner.width / (bar_width + bar_gap)).max(1) as usize;

        let bars: Vec<Bar> = self
            .videos
            .iter()
            .take(max_bars)
            .map(|v| {
                let views = parse_count(&v.statistics.view_count);
                Bar::default()
                    .value(views)
                    .text_value(format_count(&v.statistics.view_count))
                    .label(truncate_width(&v.title, bar_width as usize))
            })
            .collect();

        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(bar_gap)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .label_style(Style::default().fg(Color::DarkGray))
            .render(inner, buf);
    }
}
