use std::io::Write;

use chrono::Utc;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, eyre};

use crate::command;
use crate::config::load_config;
use crate::gemini::insights;
use crate::keys::KeyStore;
use crate::youtube::YouTubeClient;
use crate::youtube::videos::{Period, SortOrder};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "tubescope", about = "TUI and CLI for YouTube channel analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Launch the interactive TUI (default)
    Tui,
    /// Fetch a channel snapshot (JSONL)
    Channel {
        /// Channel ID, @handle, or URL
        input: String,
    },
    /// Fetch a channel's recent videos (JSONL)
    Videos {
        /// Channel ID, @handle, or URL
        input: String,
        /// Sort order for the list
        #[arg(long, value_enum, default_value = "date")]
        order: SortOrder,
        /// Publish-date window
        #[arg(long, value_enum, default_value = "all")]
        period: Period,
    },
    /// Fetch a video's most relevant comments (JSONL)
    Comments {
        /// Video ID or watch URL
        video: String,
    },
    /// Stream the AI insight report for a channel (markdown text)
    Insights {
        /// Channel ID, @handle, or URL
        input: String,
    },
    /// Estimate a channel's ad revenue with AI (JSON)
    Revenue {
        /// Channel ID, @handle, or URL
        input: String,
    },
}

// ---------------------------------------------------------------------------
// Client construction (shared with main.rs TUI path)
// ---------------------------------------------------------------------------

/// Build a `YouTubeClient` from the key store. Errors when no key is set.
pub fn build_youtube_client() -> eyre::Result<(YouTubeClient, KeyStore)> {
    let keys = KeyStore::load();
    let Some(key) = keys.youtube_key() else {
        return Err(eyre!(
            "YouTube API 키가 제공되지 않았습니다.\n\
             YOUTUBE_API_KEY 환경 변수를 설정하거나 `:key youtube <키>` 명령으로 저장해주세요."
        ));
    };
    let client = YouTubeClient::new(key);
    Ok((client, keys))
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

pub async fn run_command(cmd: CliCommand) -> eyre::Result<()> {
    let (client, keys) = build_youtube_client()?;
    let config = load_config();

    match cmd {
        CliCommand::Tui => {
            unreachable!("tui is handled in main")
        }

        CliCommand::Channel { input } => {
            let channel = client.get_channel(&input).await.map_err(|e| eyre!("{e}"))?;
            println!("{}", serde_json::to_string(&channel)?);
        }

        CliCommand::Videos {
            input,
            order,
            period,
        } => {
            let channel_id = client
                .resolve_channel_id(&input)
                .await
                .map_err(|e| eyre!("{e}"))?;
            let published_after = period.cutoff_from(Utc::now());
            let videos = client
                .get_videos_for_channel(&channel_id, config.max_videos, order, published_after)
                .await
                .map_err(|e| eyre!("{e}"))?;
            for video in &videos {
                println!("{}", serde_json::to_string(video)?);
            }
        }

        CliCommand::Comments { video } => {
            let video_id = command::parse_video_id(&video)
                .ok_or_else(|| eyre!("유효한 비디오 ID 또는 URL이 아닙니다: {video}"))?;
            let comments = client
                .get_comments_for_video(&video_id)
                .await
                .map_err(|e| eyre!("{e}"))?;
            for comment in &comments {
                println!("{}", serde_json::to_string(comment)?);
            }
        }

        CliCommand::Insights { input } => {
            let channel = client.get_channel(&input).await.map_err(|e| eyre!("{e}"))?;
            let videos = client
                .get_videos_for_channel(&channel.id, config.max_videos, config.default_sort, None)
                .await
                .map_err(|e| eyre!("{e}"))?;

            // Chunks print as they stream in; errors arrive inline.
            let mut stream =
                insights::stream_dashboard_insights(keys.gemini_key(), &channel, &videos).await;
            let mut stdout = std::io::stdout();
            while let Some(chunk) = stream.next_chunk().await {
                write!(stdout, "{chunk}")?;
                stdout.flush()?;
            }
            writeln!(stdout)?;
        }

        CliCommand::Revenue { input } => {
            let Some(gemini_key) = keys.gemini_key().map(str::to_owned) else {
                return Err(eyre!("Gemini API 키가 설정되지 않았습니다."));
            };
            let channel = client.get_channel(&input).await.map_err(|e| eyre!("{e}"))?;
            let videos = client
                .get_videos_for_channel(&channel.id, config.max_videos, config.default_sort, None)
                .await
                .map_err(|e| eyre!("{e}"))?;
            let result = insights::analyze_channel_revenue(&gemini_key, &channel, &videos)
                .await
                .map_err(|e| eyre!("{e}"))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
