use std::sync::Arc;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::command::{self, Command};
use crate::config::AppConfig;
use crate::event::{
    ApiResult, AppEvent, ChannelBundle, Event, EventHandler, SearchOutcome, Slot, ViewKind,
};
use crate::gemini::insights;
use crate::gemini::types::{CommentAnalysis, RevenueAnalysis};
use crate::keys::{KeyKind, KeyStore};
use crate::ui;
use crate::youtube::types::{Channel, Video};
use crate::youtube::videos::{Period, SortOrder};
use crate::youtube::{YouTubeClient, YouTubeError};

// ---------------------------------------------------------------------------
// Per-slot channel state
// ---------------------------------------------------------------------------

/// Everything one dashboard column holds: the query, the fetched snapshot,
/// and its own sort/period selections.
pub struct SlotState {
    pub input: String,
    pub channel: Option<Channel>,
    pub videos: Vec<Video>,
    pub sort_order: SortOrder,
    pub period: Period,
    pub videos_loading: bool,
    pub selected_index: usize,
}

impl SlotState {
    fn new(sort_order: SortOrder) -> Self {
        Self {
            input: String::new(),
            channel: None,
            videos: Vec::new(),
            sort_order,
            period: Period::All,
            videos_loading: false,
            selected_index: 0,
        }
    }

    /// Drop fetched data ahead of a new search, keeping the query input.
    fn clear_results(&mut self, sort_order: SortOrder) {
        self.channel = None;
        self.videos.clear();
        self.sort_order = sort_order;
        self.period = Period::All;
        self.videos_loading = false;
        self.selected_index = 0;
    }
}

/// State of the video detail view. Dropped when the view closes, so comment
/// analysis never survives a dismissal.
pub struct DetailState {
    pub video: Video,
    pub analysis: Option<CommentAnalysis>,
    pub analyzing: bool,
    pub analysis_error: Option<String>,
}

// ---------------------------------------------------------------------------
// App mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Command,
    /// Editing the channel A query.
    InputA,
    /// Editing the channel B (comparison) query.
    InputB,
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

pub struct ViewState {
    pub kind: ViewKind,
    pub scroll_offset: usize,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub running: bool,
    pub events: EventHandler,
    pub config: AppConfig,
    pub keys: KeyStore,

    // View system
    pub view_stack: Vec<ViewState>,
    pub mode: AppMode,

    // Channel slots
    pub slot_a: SlotState,
    pub slot_b: SlotState,
    pub compare_mode: bool,
    pub active_slot: Slot,

    // AI panel state (channel A only, never in compare mode)
    pub insight: String,
    pub insight_loading: bool,
    pub revenue: Option<RevenueAnalysis>,
    pub revenue_loading: bool,

    // Video detail view
    pub detail: Option<DetailState>,

    // Input state
    pub command_input: String,
    pub input_buffer: String,

    // Status
    pub loading: bool,
    pub error: Option<String>,

    // API client (rebuilt whenever the YouTube key changes)
    youtube: Option<Arc<YouTubeClient>>,
}

impl App {
    pub fn new(config: AppConfig, keys: KeyStore) -> Self {
        let youtube = keys
            .youtube_key()
            .map(|key| Arc::new(YouTubeClient::new(key)));

        let mut slot_a = SlotState::new(config.default_sort);
        let mut slot_b = SlotState::new(config.default_sort);
        slot_a.input = keys.last_channel_a().unwrap_or_default().to_owned();
        slot_b.input = keys.last_channel_b().unwrap_or_default().to_owned();

        Self {
            running: true,
            events: EventHandler::new(),
            config,
            keys,
            view_stack: vec![ViewState {
                kind: ViewKind::Dashboard,
                scroll_offset: 0,
            }],
            mode: AppMode::Normal,
            slot_a,
            slot_b,
            compare_mode: false,
            active_slot: Slot::A,
            insight: String::new(),
            insight_loading: false,
            revenue: None,
            revenue_loading: false,
            detail: None,
            command_input: String::new(),
            input_buffer: String::new(),
            loading: false,
            error: None,
            youtube,
        }
    }

    // -- Main event loop ----------------------------------------------------

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key) = event
                        && key.kind == crossterm::event::KeyEventKind::Press
                    {
                        self.handle_key_event(key);
                    }
                }
                Event::App(app_event) => self.handle_app_event(*app_event),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        ui::draw(frame, self);
    }

    fn tick(&self) {}

    // -- View stack ---------------------------------------------------------

    pub fn current_view(&self) -> Option<&ViewKind> {
        self.view_stack.last().map(|vs| &vs.kind)
    }

    pub fn current_scroll(&self) -> usize {
        self.view_stack.last().map_or(0, |vs| vs.scroll_offset)
    }

    pub fn push_view(&mut self, kind: ViewKind) {
        self.view_stack.push(ViewState {
            kind,
            scroll_offset: 0,
        });
    }

    pub fn pop_view(&mut self) {
        if self.view_stack.len() > 1 {
            if let Some(popped) = self.view_stack.pop()
                && popped.kind == ViewKind::VideoDetail
            {
                // Comment analysis is not kept across detail-view closes.
                self.detail = None;
            }
        }
    }

    // -- Slot helpers -------------------------------------------------------

    pub fn slot(&self, slot: Slot) -> &SlotState {
        match slot {
            Slot::A => &self.slot_a,
            Slot::B => &self.slot_b,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut SlotState {
        match slot {
            Slot::A => &mut self.slot_a,
            Slot::B => &mut self.slot_b,
        }
    }

    fn active(&self) -> &SlotState {
        self.slot(self.active_slot)
    }

    fn active_mut(&mut self) -> &mut SlotState {
        self.slot_mut(self.active_slot)
    }

    /// The AI panel is offered for a single non-comparison channel only.
    pub fn ai_panel_visible(&self) -> bool {
        self.keys.use_ai() && !self.compare_mode
    }

    // -- Key event routing --------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.events.send(AppEvent::Quit);
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Command => self.handle_command_key(key),
            AppMode::InputA | AppMode::InputB => self.handle_input_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.current_view() == Some(&ViewKind::VideoDetail) {
            self.handle_detail_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.view_stack.len() > 1 {
                    self.events.send(AppEvent::PopView);
                } else {
                    self.events.send(AppEvent::Quit);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection_up(),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('/') => {
                self.mode = AppMode::InputA;
                self.input_buffer = self.slot_a.input.clone();
            }
            KeyCode::Char('b') => {
                if self.compare_mode {
                    self.mode = AppMode::InputB;
                    self.input_buffer = self.slot_b.input.clone();
                }
            }
            KeyCode::Char(':') => {
                self.mode = AppMode::Command;
                self.command_input.clear();
            }
            KeyCode::Char('?') => {
                self.events.send(AppEvent::PushView(ViewKind::Help));
            }
            KeyCode::Char('c') => self.set_compare_mode(!self.compare_mode),
            KeyCode::Char('g') => self.toggle_use_ai(),
            KeyCode::Char('s') => self.cycle_sort(),
            KeyCode::Char('p') => self.cycle_period(),
            KeyCode::Char('r') => self.events.send(AppEvent::GenerateInsights),
            KeyCode::Tab => {
                if self.compare_mode {
                    self.active_slot = match self.active_slot {
                        Slot::A => Slot::B,
                        Slot::B => Slot::A,
                    };
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.events.send(AppEvent::PopView),
            KeyCode::Char('a') => self.events.send(AppEvent::AnalyzeComments),
            KeyCode::Char('o') => self.open_in_browser(),
            KeyCode::Char('j') | KeyCode::Down => {
                if let Some(vs) = self.view_stack.last_mut() {
                    vs.scroll_offset = vs.scroll_offset.saturating_add(1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let Some(vs) = self.view_stack.last_mut() {
                    vs.scroll_offset = vs.scroll_offset.saturating_sub(1);
                }
            }
            KeyCode::Char('?') => self.events.send(AppEvent::PushView(ViewKind::Help)),
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.command_input.clear();
            }
            KeyCode::Enter => {
                self.execute_command();
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(c) => {
                self.command_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Enter => {
                let input = self.input_buffer.clone();
                match self.mode {
                    AppMode::InputA => self.slot_a.input = input,
                    AppMode::InputB => self.slot_b.input = input,
                    _ => {}
                }
                self.input_buffer.clear();
                self.mode = AppMode::Normal;
                self.events.send(AppEvent::Search);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    // -- Command execution --------------------------------------------------

    fn execute_command(&mut self) {
        let input = self.command_input.clone();
        match command::parse_command(&input) {
            Some(Command::ChannelA(query)) => {
                self.slot_a.input = query;
            }
            Some(Command::ChannelB(query)) => {
                self.slot_b.input = query;
            }
            Some(Command::Search(query)) => {
                if let Some(query) = query {
                    self.slot_a.input = query;
                }
                self.events.send(AppEvent::Search);
            }
            Some(Command::Compare(on)) => self.set_compare_mode(on),
            Some(Command::UseAi(on)) => self.set_use_ai(on),
            Some(Command::SetKey(kind, key)) => self.set_key(kind, key),
            Some(Command::DeleteKey(kind)) => self.delete_key(kind),
            Some(Command::Sort(order)) => {
                let period = self.active().period;
                self.events.send(AppEvent::FetchVideos {
                    slot: self.active_slot,
                    order,
                    period,
                });
            }
            Some(Command::SetPeriod(period)) => {
                let order = self.active().sort_order;
                self.events.send(AppEvent::FetchVideos {
                    slot: self.active_slot,
                    order,
                    period,
                });
            }
            Some(Command::Help) => {
                self.events.send(AppEvent::PushView(ViewKind::Help));
            }
            Some(Command::Quit) => {
                self.events.send(AppEvent::Quit);
            }
            None => {
                self.error = Some(format!("알 수 없는 명령입니다: {input}"));
            }
        }
        self.command_input.clear();
    }

    // -- Toggles and key management -----------------------------------------

    fn set_compare_mode(&mut self, on: bool) {
        self.compare_mode = on;
        if !on {
            self.active_slot = Slot::A;
        }
    }

    fn toggle_use_ai(&mut self) {
        let on = !self.keys.use_ai();
        self.set_use_ai(on);
    }

    fn set_use_ai(&mut self, on: bool) {
        if on && self.compare_mode {
            self.error = Some("채널 비교 모드에서는 Gemini AI를 사용할 수 없습니다.".to_owned());
            return;
        }
        if on && self.keys.gemini_key().is_none() {
            self.error = Some("Gemini API 키를 설정해주세요.".to_owned());
            return;
        }
        if let Err(e) = self.keys.set_use_ai(on) {
            tracing::warn!("failed to persist use_ai: {e}");
        }
    }

    fn set_key(&mut self, kind: KeyKind, key: String) {
        if let Err(e) = self.keys.set_key(kind, key) {
            self.error = Some(format!("키 저장에 실패했습니다: {e}"));
            return;
        }
        if kind == KeyKind::YouTube {
            self.rebuild_client();
        }
    }

    fn delete_key(&mut self, kind: KeyKind) {
        if let Err(e) = self.keys.delete_key(kind) {
            self.error = Some(e.to_string());
            return;
        }
        match kind {
            KeyKind::YouTube => {
                let sort = self.config.default_sort;
                self.slot_a.clear_results(sort);
                self.slot_b.clear_results(sort);
                self.error = None;
                self.rebuild_client();
            }
            KeyKind::Gemini => {
                let _ = self.keys.set_use_ai(false);
                self.insight.clear();
                self.revenue = None;
            }
        }
    }

    fn rebuild_client(&mut self) {
        self.youtube = self
            .keys
            .youtube_key()
            .map(|key| Arc::new(YouTubeClient::new(key)));
    }

    fn open_in_browser(&mut self) {
        let Some(detail) = &self.detail else { return };
        let url = format!("https://www.youtube.com/watch?v={}", detail.video.id);
        if let Err(e) = open::that(&url) {
            self.error = Some(format!("브라우저를 열 수 없습니다: {e}"));
        }
    }

    // -- Selection helpers --------------------------------------------------

    fn move_selection_down(&mut self) {
        let count = self.active().videos.len();
        let slot = self.active_mut();
        if slot.selected_index + 1 < count {
            slot.selected_index += 1;
        }
    }

    fn move_selection_up(&mut self) {
        let slot = self.active_mut();
        slot.selected_index = slot.selected_index.saturating_sub(1);
    }

    fn open_selected(&mut self) {
        let slot = self.active();
        let Some(video) = slot.videos.get(slot.selected_index).cloned() else {
            return;
        };
        self.detail = Some(DetailState {
            video,
            analysis: None,
            analyzing: false,
            analysis_error: None,
        });
        self.push_view(ViewKind::VideoDetail);
    }

    fn cycle_sort(&mut self) {
        let slot = self.active();
        let order = match slot.sort_order {
            SortOrder::Date => SortOrder::ViewCount,
            SortOrder::ViewCount => SortOrder::Date,
        };
        let period = slot.period;
        self.events.send(AppEvent::FetchVideos {
            slot: self.active_slot,
            order,
            period,
        });
    }

    fn cycle_period(&mut self) {
        let slot = self.active();
        let period = match slot.period {
            Period::All => Period::Days7,
            Period::Days7 => Period::Days30,
            Period::Days30 => Period::Days90,
            Period::Days90 => Period::All,
        };
        let order = slot.sort_order;
        self.events.send(AppEvent::FetchVideos {
            slot: self.active_slot,
            order,
            period,
        });
    }

    // -- App event handling -------------------------------------------------

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            // Navigation
            AppEvent::Quit => {
                self.running = false;
            }
            AppEvent::PushView(kind) => {
                self.push_view(kind);
            }
            AppEvent::PopView => {
                self.pop_view();
            }

            // Request triggers
            AppEvent::Search => self.start_search(),
            AppEvent::FetchVideos {
                slot,
                order,
                period,
            } => self.start_fetch_videos(slot, order, period),
            AppEvent::GenerateInsights => self.start_insights(),
            AppEvent::AnalyzeRevenue => self.start_revenue(),
            AppEvent::AnalyzeComments => self.start_comment_analysis(),

            // Responses
            AppEvent::SearchLoaded(result) => {
                self.loading = false;
                match result {
                    Ok(outcome) => {
                        self.slot_a.channel = Some(outcome.a.channel);
                        self.slot_a.videos = outcome.a.videos;
                        if let Some(b) = outcome.b {
                            self.slot_b.channel = Some(b.channel);
                            self.slot_b.videos = b.videos;
                        }
                        // The revenue estimate starts on its own for a single
                        // channel when the AI panel is in play.
                        if !self.compare_mode
                            && self.keys.use_ai()
                            && self.keys.gemini_key().is_some()
                        {
                            self.events.send(AppEvent::AnalyzeRevenue);
                        }
                    }
                    Err(e) => {
                        // Either channel failing clears both slots.
                        let sort = self.config.default_sort;
                        self.slot_a.clear_results(sort);
                        self.slot_b.clear_results(sort);
                        self.error = Some(e.to_string());
                    }
                }
            }
            AppEvent::VideosLoaded {
                slot,
                order,
                period,
                result,
            } => {
                let state = self.slot_mut(slot);
                state.videos_loading = false;
                match result {
                    Ok(videos) => {
                        state.videos = videos;
                        state.sort_order = order;
                        state.period = period;
                        state.selected_index = 0;
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                    }
                }
            }
            AppEvent::InsightChunk(chunk) => {
                self.insight.push_str(&chunk);
            }
            AppEvent::InsightFinished => {
                self.insight_loading = false;
            }
            AppEvent::RevenueLoaded(result) => {
                self.revenue_loading = false;
                // Failures clear the card silently; the panel shows "분석 불가".
                self.revenue = result.ok();
            }
            AppEvent::CommentAnalysisLoaded { video_id, result } => {
                if let Some(detail) = &mut self.detail
                    && detail.video.id == video_id
                {
                    detail.analyzing = false;
                    match result {
                        Ok(analysis) => detail.analysis = Some(analysis),
                        Err(e) => detail.analysis_error = Some(e.to_string()),
                    }
                }
            }
        }
    }

    // -- API dispatch -------------------------------------------------------

    /// Validate inputs, clear previous results, and fetch one or two
    /// channels in parallel.
    fn start_search(&mut self) {
        if self.loading {
            return;
        }
        if self.keys.youtube_key().is_none() || self.youtube.is_none() {
            self.error = Some("YouTube API 키를 설정해주세요.".to_owned());
            return;
        }

        let input_a = self.slot_a.input.trim().to_owned();
        let input_b = self.slot_b.input.trim().to_owned();
        if input_a.is_empty() || (self.compare_mode && input_b.is_empty()) {
            self.error = Some("분석할 채널 정보를 모두 입력해주세요.".to_owned());
            return;
        }

        if let Err(e) = self
            .keys
            .remember_queries(&input_a, self.compare_mode.then_some(input_b.as_str()))
        {
            tracing::warn!("failed to persist channel queries: {e}");
        }

        self.loading = true;
        self.error = None;
        let sort = self.config.default_sort;
        self.slot_a.clear_results(sort);
        self.slot_b.clear_results(sort);
        self.insight.clear();
        self.revenue = None;

        let Some(client) = self.youtube.clone() else {
            return;
        };
        let sender = self.events.sender();
        let max_videos = self.config.max_videos;
        let compare = self.compare_mode;

        tokio::spawn(async move {
            let result = if compare {
                match tokio::try_join!(
                    fetch_bundle(Arc::clone(&client), input_a, max_videos, sort),
                    fetch_bundle(Arc::clone(&client), input_b, max_videos, sort),
                ) {
                    Ok((a, b)) => Ok(SearchOutcome { a, b: Some(b) }),
                    Err(e) => Err(Arc::new(e.to_string())),
                }
            } else {
                fetch_bundle(client, input_a, max_videos, sort)
                    .await
                    .map(|a| SearchOutcome { a, b: None })
                    .map_err(|e| Arc::new(e.to_string()))
            };
            let _ = sender.send(Event::App(Box::new(AppEvent::SearchLoaded(result))));
        });
    }

    /// Re-fetch a single slot's videos with new query parameters.
    fn start_fetch_videos(&mut self, slot: Slot, order: SortOrder, period: Period) {
        let Some(client) = self.youtube.clone() else {
            return;
        };
        let Some(channel_id) = self.slot(slot).channel.as_ref().map(|c| c.id.clone()) else {
            return;
        };

        self.slot_mut(slot).videos_loading = true;
        self.error = None;
        if slot == Slot::A {
            // A fresh list for channel A invalidates the narrative insight.
            self.insight.clear();
        }

        let sender = self.events.sender();
        let max_videos = self.config.max_videos;

        tokio::spawn(async move {
            let published_after = period.cutoff_from(Utc::now());
            let result = client
                .get_videos_for_channel(&channel_id, max_videos, order, published_after)
                .await
                .map_err(|e| Arc::new(e.to_string()));
            let _ = sender.send(Event::App(Box::new(AppEvent::VideosLoaded {
                slot,
                order,
                period,
                result,
            })));
        });
    }

    /// Start streaming the narrative insight for channel A.
    fn start_insights(&mut self) {
        if !self.ai_panel_visible() {
            return;
        }
        let Some(channel) = self.slot_a.channel.clone() else {
            return;
        };
        if self.slot_a.videos.is_empty() || self.insight_loading {
            return;
        }

        self.insight_loading = true;
        self.insight.clear();
        self.error = None;

        let key = self.keys.gemini_key().map(str::to_owned);
        let videos = self.slot_a.videos.clone();
        let sender = self.events.sender();

        tokio::spawn(async move {
            let mut stream =
                insights::stream_dashboard_insights(key.as_deref(), &channel, &videos).await;
            while let Some(chunk) = stream.next_chunk().await {
                let _ = sender.send(Event::App(Box::new(AppEvent::InsightChunk(chunk))));
            }
            let _ = sender.send(Event::App(Box::new(AppEvent::InsightFinished)));
        });
    }

    /// Kick off the background revenue estimate for channel A.
    fn start_revenue(&mut self) {
        let Some(key) = self.keys.gemini_key().map(str::to_owned) else {
            return;
        };
        let Some(channel) = self.slot_a.channel.clone() else {
            return;
        };

        self.revenue_loading = true;
        let videos = self.slot_a.videos.clone();
        let sender = self.events.sender();

        tokio::spawn(async move {
            let result = insights::analyze_channel_revenue(&key, &channel, &videos)
                .await
                .map_err(|e| {
                    tracing::warn!("revenue analysis failed: {e}");
                    Arc::new(e.to_string())
                });
            let _ = sender.send(Event::App(Box::new(AppEvent::RevenueLoaded(result))));
        });
    }

    /// Fetch the detail video's comments and run sentiment analysis on them.
    fn start_comment_analysis(&mut self) {
        let Some(client) = self.youtube.clone() else {
            return;
        };
        let Some(key) = self.keys.gemini_key().map(str::to_owned) else {
            return;
        };
        let Some(detail) = &mut self.detail else {
            return;
        };
        if detail.analyzing {
            return;
        }

        detail.analyzing = true;
        detail.analysis = None;
        detail.analysis_error = None;
        let video = detail.video.clone();
        let sender = self.events.sender();

        tokio::spawn(async move {
            let video_id = video.id.clone();
            let result = analyze_comments(client, key, video).await;
            let _ = sender.send(Event::App(Box::new(AppEvent::CommentAnalysisLoaded {
                video_id,
                result,
            })));
        });
    }
}

// ---------------------------------------------------------------------------
// Spawned fetch helpers
// ---------------------------------------------------------------------------

/// Resolve + fetch one channel and its recent videos.
async fn fetch_bundle(
    client: Arc<YouTubeClient>,
    input: String,
    max_videos: u32,
    order: SortOrder,
) -> Result<ChannelBundle, YouTubeError> {
    let channel = client.get_channel(&input).await?;
    let videos = client
        .get_videos_for_channel(&channel.id, max_videos, order, None)
        .await?;
    Ok(ChannelBundle { channel, videos })
}

/// Comments then sentiment analysis. No comments is a user-visible
/// condition, not a hard failure.
async fn analyze_comments(
    client: Arc<YouTubeClient>,
    gemini_key: String,
    video: Video,
) -> ApiResult<CommentAnalysis> {
    let comments = client
        .get_comments_for_video(&video.id)
        .await
        .map_err(|e| Arc::new(e.to_string()))?;

    if comments.is_empty() {
        return Err(Arc::new("분석할 댓글이 없습니다.".to_owned()));
    }

    insights::analyze_video_comments(&gemini_key, &video, &comments)
        .await
        .map_err(|e| Arc::new(e.to_string()))
}
