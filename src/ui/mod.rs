pub mod channel;
pub mod chart;
pub mod command_bar;
pub mod help;
pub mod input;
pub mod insight;
pub mod query_bar;
pub mod stats;
pub mod status_bar;
pub mod video_card;
pub mod video_detail;
pub mod video_list;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::{App, AppMode};
use crate::event::{Slot, ViewKind};

use channel::ChannelColumn;
use command_bar::CommandBar;
use help::HelpView;
use insight::InsightPanel;
use query_bar::QueryBar;
use status_bar::StatusBar;
use video_detail::VideoDetailView;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: query bar + error banner + main content + status/command bars
    let bottom_height = if app.mode != AppMode::Normal { 2 } else { 1 };
    let error_height = u16::from(app.error.is_some());

    let [query_area, error_area, main_area, bottom_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(error_height),
        Constraint::Min(1),
        Constraint::Length(bottom_height),
    ])
    .areas(area);

    frame.render_widget(QueryBar::new(app), query_area);

    if let Some(ref error) = app.error {
        frame.render_widget(
            Paragraph::new(Line::from(error.as_str())).style(Style::default().fg(Color::Red)),
            error_area,
        );
    }

    // Split bottom into status bar and optional command bar
    if app.mode != AppMode::Normal {
        let [status_area, cmd_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(bottom_area);
        frame.render_widget(StatusBar::new(app), status_area);
        frame.render_widget(CommandBar::new(app), cmd_area);
    } else {
        frame.render_widget(StatusBar::new(app), bottom_area);
    }

    // Render the current view
    match app.current_view() {
        Some(ViewKind::VideoDetail) => {
            if let Some(ref detail) = app.detail {
                frame.render_widget(
                    VideoDetailView::new(detail, app.keys.gemini_key().is_some())
                        .scroll(app.current_scroll()),
                    main_area,
                );
            }
        }
        Some(ViewKind::Help) => {
            draw_dashboard(frame, app, main_area);
            frame.render_widget(HelpView::new(), main_area);
        }
        _ => draw_dashboard(frame, app, main_area),
    }
}

fn draw_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    if app.loading {
        frame.render_widget(
            Paragraph::new("채널 데이터를 불러오는 중...")
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            area,
        );
        return;
    }

    if app.compare_mode {
        draw_compare(frame, app, area);
        return;
    }

    if app.slot_a.channel.is_none() {
        draw_welcome(frame, app, area);
        return;
    }

    if app.ai_panel_visible() {
        let [column_area, panel_area] =
            Layout::horizontal([Constraint::Percentage(66), Constraint::Percentage(34)])
                .areas(area);
        frame.render_widget(
            ChannelColumn::new(&app.slot_a, true)
                .revenue(app.revenue.as_ref(), app.revenue_loading),
            column_area,
        );
        frame.render_widget(InsightPanel::new(app), panel_area);
    } else {
        frame.render_widget(ChannelColumn::new(&app.slot_a, true), area);
    }
}

fn draw_compare(frame: &mut Frame, app: &App, area: Rect) {
    if app.slot_a.channel.is_none() || app.slot_b.channel.is_none() {
        draw_welcome(frame, app, area);
        return;
    }

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    frame.render_widget(
        ChannelColumn::new(&app.slot_a, app.active_slot == Slot::A).titled(),
        left,
    );
    frame.render_widget(
        ChannelColumn::new(&app.slot_b, app.active_slot == Slot::B).titled(),
        right,
    );
}

fn draw_welcome(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = if app.keys.youtube_key().is_none() {
        vec![
            Line::from("시작하려면 먼저 YouTube API 키를 설정해주세요."),
            Line::from(""),
            Line::from(":key youtube <키> 명령으로 키를 입력할 수 있습니다."),
        ]
    } else {
        vec![
            Line::from("분석할 YouTube 채널의 ID, 핸들(@handle) 또는 전체 URL을 입력하세요."),
            Line::from(""),
            Line::from("/ 키로 채널을 입력하고 Enter로 분석을 시작합니다."),
            Line::from("(예: UC_x5XG1OV2P6uZZ5FSM9Ttw, @googledevelopers)"),
        ]
    };

    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, area.y + top, area.width, height.min(area.height));
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        centered,
    );
}
