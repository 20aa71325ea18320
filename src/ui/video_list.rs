use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Widget};

use crate::ui::video_card::{VideoCard, video_card_height};
use crate::youtube::types::Video;

/// A scrollable list of video cards with selection highlight.
pub struct VideoListView<'a> {
    pub title: &'a str,
    pub videos: &'a [Video],
    pub selected_index: usize,
    pub loading: bool,
    pub active: bool,
}

impl<'a> VideoListView<'a> {
    pub fn new(title: &'a str, videos: &'a [Video], selected_index: usize) -> Self {
        Self {
            title,
            videos,
            selected_index,
            loading: false,
            active: true,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Widget for VideoListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.active {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(border_color)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.videos.is_empty() {
            let msg = if self.loading {
                "영상을 불러오는 중..."
            } else {
                "표시할 영상이 없습니다"
            };
            buf.set_string(
                inner.x + 1,
                inner.y,
                msg,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let content_width = inner.width.saturating_sub(1); // 1 char left margin
        let available_height = inner.height;

        // Pre-compute heights for each card (including separator).
        let heights: Vec<u16> = self
            .videos
            .iter()
            .map(|v| video_card_height(v, content_width) + 1)
            .collect();

        let scroll_start = compute_scroll_start(&heights, self.selected_index, available_height);

        // Render from scroll_start
        let mut y = inner.y;
        let mut video_idx = scroll_start;
        while video_idx < self.videos.len() && y < inner.y + inner.height {
            let video = &self.videos[video_idx];
            let card_h = heights[video_idx];
            let remaining = inner.y + inner.height - y;
            let render_h = card_h.min(remaining);

            let video_area = Rect::new(inner.x + 1, y, content_width, render_h.saturating_sub(1));

            VideoCard::new(video)
                .selected(self.active && video_idx == self.selected_index)
                .render(video_area, buf);

            y += render_h;

            // Draw separator line
            if y < inner.y + inner.height && video_idx + 1 < self.videos.len() {
                let sep = "\u{2500}".repeat(content_width as usize);
                buf.set_string(
                    inner.x + 1,
                    y.saturating_sub(1),
                    &sep,
                    Style::default().fg(Color::DarkGray),
                );
            }

            video_idx += 1;
        }
    }
}

/// Find the smallest scroll start index so that the selected item fits
/// within the available height.
fn compute_scroll_start(heights: &[u16], selected: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }

    let selected = selected.min(heights.len() - 1);
    if available == 0 {
        return selected;
    }

    // Build a viewport that always includes the selected card and packs as
    // many previous items as can fit above it.
    let mut start = selected;
    let mut used = heights[selected];

    while start > 0 {
        let next = used.saturating_add(heights[start - 1]);
        if next > available {
            break;
        }
        start -= 1;
        used = next;
    }

    start
}

#[cfg(test)]
mod tests {
    use super::compute_scroll_start;

    #[test]
    fn handles_empty_list() {
        assert_eq!(compute_scroll_start(&[], 0, 10), 0);
    }

    #[test]
    fn advances_when_selected_is_below_exactly_full_window() {
        // First two items exactly fill the viewport; selecting index 2 should
        // move the viewport start to 1 instead of looping.
        let heights = [5, 5, 5];
        assert_eq!(compute_scroll_start(&heights, 2, 10), 1);
    }

    #[test]
    fn keeps_selected_item_visible_when_it_is_taller_than_viewport() {
        let heights = [3, 12, 4];
        assert_eq!(compute_scroll_start(&heights, 1, 8), 1);
    }

    #[test]
    fn clamps_selected_index_to_last_item() {
        let heights = [2, 2, 2];
        assert_eq!(compute_scroll_start(&heights, 99, 4), 1);
    }
}
