use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::format::{format_count, format_published};
use crate::youtube::types::Video;

/// Renders a single video as a compact card.
///
/// Layout:
///   Video title (may wrap) ...
///   2024년 5월 2일 · 조회수 1.2만 · 좋아요 340 · 댓글 56
pub struct VideoCard<'a> {
    pub video: &'a Video,
    pub selected: bool,
}

impl<'a> VideoCard<'a> {
    pub fn new(video: &'a Video) -> Self {
        Self {
            video,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for VideoCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let title_style = if self.selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let mut y = area.y;

        // -- Title (wrapped, reserving the last line for stats) --
        let max_title_lines = area.height.saturating_sub(1).max(1) as usize;
        for (i, line_text) in wrap_text(&self.video.title, area.width as usize)
            .into_iter()
            .enumerate()
        {
            if i >= max_title_lines || y >= area.y + area.height {
                break;
            }
            buf.set_string(area.x, y, &line_text, title_style);
            y += 1;
        }

        if y >= area.y + area.height {
            return;
        }

        // -- Last line: publish date + counters --
        let stats = &self.video.statistics;
        let meta_line = Line::from(vec![
            Span::styled(
                format_published(self.video.published_at),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(" · 조회수 ", Style::default().fg(Color::DarkGray)),
            Span::styled(format_count(&stats.view_count), Style::default().fg(Color::Yellow)),
            Span::styled(" · 좋아요 ", Style::default().fg(Color::DarkGray)),
            Span::styled(format_count(&stats.like_count), Style::default().fg(Color::Green)),
            Span::styled(" · 댓글 ", Style::default().fg(Color::DarkGray)),
            Span::styled(format_count(&stats.comment_count), Style::default().fg(Color::Blue)),
        ]);
        buf.set_line(area.x, y, &meta_line, area.width);
    }
}

/// Height in lines needed for a video card.
pub fn video_card_height(video: &Video, width: u16) -> u16 {
    let title_lines = wrap_text(&video.title, width as usize).len() as u16;
    // title + meta
    title_lines + 1
}

/// Word-wrap measured in display cells, so CJK titles fill rows correctly.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let word = break_long_word(word, width);
            for piece in word {
                if current.is_empty() {
                    current = piece;
                } else if current.width() + 1 + piece.width() <= width {
                    current.push(' ');
                    current.push_str(&piece);
                } else {
                    lines.push(current);
                    current = piece;
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split one word into pieces no wider than `width` display cells.
fn break_long_word(word: &str, width: usize) -> Vec<String> {
    if word.width() <= width {
        return vec![word.to_owned()];
    }
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for ch in word.chars() {
        let w = ch.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += w;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Truncate to a display-cell budget, appending `…` when shortened.
pub(crate) fn truncate_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_by_display_width() {
        // Each Hangul syllable is 2 cells wide; 3 of them don't fit in 5.
        let lines = wrap_text("가나다", 5);
        assert_eq!(lines, vec!["가나".to_owned(), "다".to_owned()]);
    }

    #[test]
    fn keeps_short_text_on_one_line() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world".to_owned()]);
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_width("가나다라", 5), "가나…");
        assert_eq!(truncate_width("abc", 5), "abc");
    }

    #[test]
    fn empty_width_yields_no_lines() {
        assert!(wrap_text("text", 0).is_empty());
    }
}
