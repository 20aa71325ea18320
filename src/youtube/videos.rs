use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::youtube::types::{SearchListResponse, Video, VideoListResponse};
use crate::youtube::{YouTubeClient, YouTubeError};

// ---------------------------------------------------------------------------
// Query selections
// ---------------------------------------------------------------------------

/// Video list ordering, as accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Date,
    #[serde(rename = "viewcount")]
    #[value(name = "views")]
    ViewCount,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Date => "date",
            SortOrder::ViewCount => "viewCount",
        }
    }

    /// Korean label, as shown in list/chart titles.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Date => "최신",
            SortOrder::ViewCount => "인기",
        }
    }
}

/// Publish-date window for the video list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    #[serde(rename = "7d")]
    #[value(name = "7d")]
    Days7,
    #[serde(rename = "30d")]
    #[value(name = "30d")]
    Days30,
    #[serde(rename = "90d")]
    #[value(name = "90d")]
    Days90,
}

impl Period {
    /// Lower publish bound for this window, or `None` for all time.
    pub fn cutoff_from(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days = match self {
            Period::All => return None,
            Period::Days7 => 7,
            Period::Days30 => 30,
            Period::Days90 => 90,
        };
        Some(now - Duration::days(days))
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::All => "전체",
            Period::Days7 => "7일",
            Period::Days30 => "30일",
            Period::Days90 => "90일",
        }
    }
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

impl YouTubeClient {
    /// Fetch a channel's recent videos: an ID-only search followed by a
    /// batch detail lookup. An empty ID search returns an empty list
    /// without issuing the batch call.
    pub async fn get_videos_for_channel(
        &self,
        channel_id: &str,
        max_results: u32,
        order: SortOrder,
        published_after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Video>, YouTubeError> {
        let max_results = max_results.clamp(1, 50).to_string();

        let mut params = vec![
            ("part", "id"),
            ("channelId", channel_id),
            ("maxResults", &max_results),
            ("order", order.as_param()),
            ("type", "video"),
        ];

        let after;
        if let Some(cutoff) = published_after {
            after = cutoff.to_rfc3339_opts(SecondsFormat::Secs, true);
            params.push(("publishedAfter", &after));
        }

        let search: SearchListResponse = self.get("search", &params).await?;

        let ids: Vec<String> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let data: VideoListResponse = self
            .get("videos", &[("part", "snippet,statistics"), ("id", &joined)])
            .await?;

        Ok(data.items.into_iter().map(Video::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn period_cutoffs_are_whole_days_back() {
        let now = Utc.with_ymd_and_hms(2024, 4, 15, 10, 0, 0).unwrap();
        assert_eq!(Period::All.cutoff_from(now), None);
        assert_eq!(
            Period::Days7.cutoff_from(now),
            Some(Utc.with_ymd_and_hms(2024, 4, 8, 10, 0, 0).unwrap())
        );
        assert_eq!(
            Period::Days90.cutoff_from(now),
            Some(Utc.with_ymd_and_hms(2024, 1, 16, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn sort_order_maps_to_api_params() {
        assert_eq!(SortOrder::Date.as_param(), "date");
        assert_eq!(SortOrder::ViewCount.as_param(), "viewCount");
    }
}
