use color_eyre::eyre::OptionExt;
use crossterm::event::Event as CrosstermEvent;
use futures::{FutureExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::gemini::types::{CommentAnalysis, RevenueAnalysis};
use crate::youtube::types::{Channel, Video};
use crate::youtube::videos::{Period, SortOrder};

/// The frequency at which tick events are emitted.
const TICK_FPS: f64 = 30.0;

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// An event that is emitted on a regular schedule.
    Tick,
    /// Crossterm events from the terminal.
    Crossterm(CrosstermEvent),
    /// Application-level events.
    App(Box<AppEvent>),
}

/// API result type using `Arc<String>` so errors are `Clone`.
pub type ApiResult<T> = Result<T, Arc<String>>;

/// Which dashboard column a channel occupies. B only exists in compare mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

/// Everything one search produces for a single channel.
#[derive(Debug, Clone)]
pub struct ChannelBundle {
    pub channel: Channel,
    pub videos: Vec<Video>,
}

/// Joint result of a search: channel A, plus B in compare mode.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub a: ChannelBundle,
    pub b: Option<ChannelBundle>,
}

/// Application events for navigation, API requests, and API responses.
#[derive(Clone, Debug)]
pub enum AppEvent {
    // -- Navigation --
    Quit,
    PushView(ViewKind),
    PopView,

    // -- Request triggers (sent from key handlers / commands) --
    /// Resolve and fetch the entered channel(s), clearing prior results.
    Search,
    /// Re-fetch one slot's videos with a new sort order / period.
    FetchVideos {
        slot: Slot,
        order: SortOrder,
        period: Period,
    },
    /// Start streaming the narrative insight for channel A.
    GenerateInsights,
    /// Kick off the background revenue estimate for channel A.
    AnalyzeRevenue,
    /// Fetch + analyze comments for the video open in the detail view.
    AnalyzeComments,

    // -- Response events (sent from async tasks back to the event loop) --
    SearchLoaded(ApiResult<SearchOutcome>),
    VideosLoaded {
        slot: Slot,
        order: SortOrder,
        period: Period,
        result: ApiResult<Vec<Video>>,
    },
    InsightChunk(String),
    InsightFinished,
    RevenueLoaded(ApiResult<RevenueAnalysis>),
    CommentAnalysisLoaded {
        video_id: String,
        result: ApiResult<CommentAnalysis>,
    },
}

/// Identifies a view for the view-stack navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    VideoDetail,
    Help,
}

/// Terminal event handler.
///
/// Spawns a background task that emits tick and crossterm events, and exposes
/// an unbounded channel for application events.
#[derive(Debug)]
pub struct EventHandler {
    /// Event sender channel.
    sender: mpsc::UnboundedSender<Event>,
    /// Event receiver channel.
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`] and spawns the event task.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = EventTask::new(sender.clone());
        tokio::spawn(async { actor.run().await });
        Self { sender, receiver }
    }

    /// Receives the next event, blocking until one is available.
    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("Failed to receive event")
    }

    /// Queue an app event to be processed by the event loop.
    pub fn send(&self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(Box::new(app_event)));
    }

    /// Clone the underlying sender for use in spawned async tasks.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

/// Background task that reads crossterm events and emits ticks.
struct EventTask {
    sender: mpsc::UnboundedSender<Event>,
}

impl EventTask {
    fn new(sender: mpsc::UnboundedSender<Event>) -> Self {
        Self { sender }
    }

    async fn run(self) -> color_eyre::Result<()> {
        let tick_rate = Duration::from_secs_f64(1.0 / TICK_FPS);
        let mut reader = crossterm::event::EventStream::new();
        let mut tick = tokio::time::interval(tick_rate);
        loop {
            let tick_delay = tick.tick();
            let crossterm_event = reader.next().fuse();
            tokio::select! {
                _ = self.sender.closed() => {
                    break;
                }
                _ = tick_delay => {
                    self.send(Event::Tick);
                }
                Some(Ok(evt)) = crossterm_event => {
                    self.send(Event::Crossterm(evt));
                }
            };
        }
        Ok(())
    }

    fn send(&self, event: Event) {
        let _ = self.sender.send(event);
    }
}
