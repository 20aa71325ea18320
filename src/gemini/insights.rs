use crate::format::{group_digits, parse_count};
use crate::youtube::types::{Channel, Comment, Video};

use super::GeminiError;
use super::client::{GeminiClient, TextStream};
use super::types::{CommentAnalysis, GenerateContentRequest, RevenueAnalysis, Sentiment};

// Inline notes appended to the insight text instead of raising.
const MISSING_KEY_NOTE: &str = "\n\n**오류:** Gemini API 키가 설정되지 않았습니다. \
                                `:key gemini <키>` 명령으로 키를 입력해주세요.";
const STREAM_FAILED_NOTE: &str = "\n\n**오류:** AI 인사이트를 생성하는 데 실패했습니다. \
                                  Gemini API 키가 유효한지 확인해주세요.";

// ---------------------------------------------------------------------------
// Narrative insight stream
// ---------------------------------------------------------------------------

/// Text source for the dashboard insight panel.
///
/// Key or call failures degrade to a single inline error chunk; this
/// operation never raises towards the view.
pub enum InsightStream {
    Live(TextStream),
    Inline(Option<String>),
}

impl InsightStream {
    /// Next chunk of insight text, or `None` when finished.
    pub async fn next_chunk(&mut self) -> Option<String> {
        match self {
            InsightStream::Inline(note) => note.take(),
            InsightStream::Live(stream) => match stream.next_chunk().await {
                Some(Ok(text)) => Some(text),
                Some(Err(e)) => {
                    tracing::warn!("insight stream failed: {e}");
                    *self = InsightStream::Inline(None);
                    Some(STREAM_FAILED_NOTE.to_owned())
                }
                None => None,
            },
        }
    }
}

/// Start streaming a Korean analysis report for the channel and its recent
/// videos.
pub async fn stream_dashboard_insights(
    api_key: Option<&str>,
    channel: &Channel,
    videos: &[Video],
) -> InsightStream {
    let Some(key) = api_key.filter(|k| !k.is_empty()) else {
        return InsightStream::Inline(Some(MISSING_KEY_NOTE.to_owned()));
    };

    let client = GeminiClient::new(key);
    let request = GenerateContentRequest::text(dashboard_prompt(channel, videos), 0.5);

    match client.stream_generate(&request).await {
        Ok(stream) => InsightStream::Live(stream),
        Err(e) => {
            tracing::warn!("insight stream request failed: {e}");
            InsightStream::Inline(Some(STREAM_FAILED_NOTE.to_owned()))
        }
    }
}

fn dashboard_prompt(channel: &Channel, videos: &[Video]) -> String {
    let stats = &channel.statistics;
    let video_summary = videos
        .iter()
        .map(|v| {
            format!(
                "- \"{}\" (조회수: {})",
                v.title,
                group_digits(parse_count(&v.statistics.view_count))
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "당신은 전문 YouTube 채널 분석가입니다. 다음 YouTube 채널 데이터를 분석하고, \
         한국어로 비전문가도 이해하기 쉽게 분석 리포트를 작성해주세요.\n\
         \n\
         **채널 정보:**\n\
         - 채널명: {title}\n\
         - 구독자 수: {subscribers} 명\n\
         - 총 조회수: {views} 회\n\
         - 총 비디오 수: {videos} 개\n\
         \n\
         **최신/인기 비디오 목록:**\n\
         {video_summary}\n\
         \n\
         **분석 요청 사항:**\n\
         1. **종합 평가:** 채널의 현재 성과(구독자, 조회수)를 기반으로 전반적인 평가를 내려주세요.\n\
         2. **강점 분석:** 이 채널의 명확한 강점은 무엇인가요? (예: 특정 주제 전문성, 높은 조회수, 시청자 참여도 등)\n\
         3. **개선 제안:** 데이터를 기반으로 채널이 더 성장하기 위한 구체적인 액션 아이템 2-3가지를 제안해주세요.\n\
         4. **결론:** 분석 내용을 요약하고 채널의 미래에 대한 긍정적인 전망으로 마무리해주세요.\n\
         \n\
         **출력 형식:**\n\
         - 마크다운 형식을 사용하여 명확하고 읽기 쉽게 작성해주세요.\n\
         - 각 섹션(종합 평가, 강점 분석 등)에 제목을 붙여주세요.",
        title = channel.title,
        subscribers = group_digits(parse_count(&stats.subscriber_count)),
        views = group_digits(parse_count(&stats.view_count)),
        videos = group_digits(parse_count(&stats.video_count)),
    )
}

// ---------------------------------------------------------------------------
// Revenue estimate
// ---------------------------------------------------------------------------

/// Average view count of the recent videos, ignoring zero-view entries.
pub(crate) fn average_recent_views(videos: &[Video]) -> f64 {
    let views: Vec<f64> = videos
        .iter()
        .map(|v| parse_count(&v.statistics.view_count) as f64)
        .filter(|&v| v > 0.0)
        .collect();
    if views.is_empty() {
        return 0.0;
    }
    views.iter().sum::<f64>() / views.len() as f64
}

fn revenue_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "estimatedMonthlyMin": { "type": "NUMBER", "description": "예상 월 수익 (최소, KRW 단위)." },
            "estimatedMonthlyMax": { "type": "NUMBER", "description": "예상 월 수익 (최대, KRW 단위)." },
            "estimatedYearlyMin": { "type": "NUMBER", "description": "예상 연 수익 (최소, KRW 단위)." },
            "estimatedYearlyMax": { "type": "NUMBER", "description": "예상 연 수익 (최대, KRW 단위)." },
            "currency": { "type": "STRING", "description": "수익 통화 단위 (예: 'KRW')." },
            "reasoning": { "type": "STRING", "description": "한국어로 작성된 예상 수익의 근거." }
        },
        "required": [
            "estimatedMonthlyMin", "estimatedMonthlyMax",
            "estimatedYearlyMin", "estimatedYearlyMax",
            "currency", "reasoning"
        ]
    })
}

fn revenue_prompt(channel: &Channel, videos: &[Video]) -> String {
    let stats = &channel.statistics;
    format!(
        "당신은 전문 YouTube 수익 분석가입니다. 제공된 채널 데이터를 기반으로 예상 광고 수익을 분석해주세요.\n\
         \n\
         **채널 정보:**\n\
         - 채널명: {title}\n\
         - 구독자 수: {subscribers} 명\n\
         - 총 조회수: {views} 회\n\
         - 총 비디오 수: {videos} 개\n\
         - 최근 비디오 평균 조회수: {average} 회\n\
         \n\
         **분석 요청:**\n\
         위 데이터를 바탕으로 채널의 예상 월간 및 연간 광고 수익 범위를 KRW(원) 단위로 추정해주세요.\n\
         추정 시, 채널의 주제(영상 제목들로 유추), 구독자 규모, 평균 조회수 등을 고려하여 일반적인 \
         CPM(1,000회 노출당 비용) 및 RPM(1,000회 조회당 수익) 범위를 가정해야 합니다.\n\
         결과는 반드시 지정된 JSON 스키마 형식으로 응답해주세요.\n\
         모든 텍스트 결과(reasoning)는 한국어로 작성해주세요.\n\
         예상 수익은 현실적이고 보수적으로 추정해주세요.",
        title = channel.title,
        subscribers = group_digits(parse_count(&stats.subscriber_count)),
        views = group_digits(parse_count(&stats.view_count)),
        videos = group_digits(parse_count(&stats.video_count)),
        average = group_digits(average_recent_views(videos).round() as u64),
    )
}

/// Estimate the channel's monthly and yearly ad revenue range in KRW.
pub async fn analyze_channel_revenue(
    api_key: &str,
    channel: &Channel,
    videos: &[Video],
) -> Result<RevenueAnalysis, GeminiError> {
    if api_key.is_empty() {
        return Err(GeminiError::MissingKey);
    }

    let client = GeminiClient::new(api_key);
    let request = GenerateContentRequest::json(revenue_prompt(channel, videos), 0.3, revenue_schema());

    let text = client.generate(&request).await?;
    Ok(serde_json::from_str(text.trim())?)
}

// ---------------------------------------------------------------------------
// Comment-sentiment analysis
// ---------------------------------------------------------------------------

fn comment_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "한국어로 시청자 반응에 대한 2-3문장의 전반적인 요약."
            },
            "sentiment": {
                "type": "OBJECT",
                "description": "댓글의 감성 분석 결과. 긍정, 부정, 중립의 합은 100이 되어야 함.",
                "properties": {
                    "positive": { "type": "NUMBER", "description": "긍정적인 댓글의 비율 (백분율)." },
                    "negative": { "type": "NUMBER", "description": "부정적인 댓글의 비율 (백분율)." },
                    "neutral": { "type": "NUMBER", "description": "중립적인 댓글의 비율 (백분율)." }
                },
                "required": ["positive", "negative", "neutral"]
            },
            "keyTopics": {
                "type": "ARRAY",
                "description": "댓글에서 가장 자주 언급되는 한국어 핵심 주제 또는 키워드 3-5개.",
                "items": { "type": "STRING" }
            },
            "suggestions": {
                "type": "ARRAY",
                "description": "시청자 피드백을 바탕으로 크리에이터에게 제안할 만한 구체적인 한국어 액션 아이템 2개.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary", "sentiment", "keyTopics", "suggestions"]
    })
}

fn comments_prompt(video: &Video, comments: &[Comment]) -> String {
    let comment_list = comments
        .iter()
        .map(|c| format!("- {}", c.text_display))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "당신은 전문 YouTube 동영상 분석가입니다.\n\
         다음 영상의 댓글들을 분석하여 시청자들의 반응을 요약하고 인사이트를 제공해주세요.\n\
         \n\
         **영상 제목:** {title}\n\
         \n\
         **댓글 목록 (최대 50개):**\n\
         {comment_list}\n\
         \n\
         **분석 요청:**\n\
         위 댓글들을 기반으로 아래 요청사항에 대해 JSON 형식으로 응답해주세요.\n\
         1. **summary**: 시청자 반응에 대한 2-3문장의 한국어 요약.\n\
         2. **sentiment**: 댓글의 긍정/부정/중립 비율(%). 합계는 100%.\n\
         3. **keyTopics**: 댓글에서 자주 언급된 핵심 주제(키워드) 3-5개.\n\
         4. **suggestions**: 분석을 바탕으로 크리에이터에게 제안할 만한 구체적인 액션 아이템 2가지.\n\
         \n\
         모든 텍스트 결과는 반드시 한국어로 작성해주세요.",
        title = video.title,
    )
}

/// Summarize viewer reactions to a video from its most relevant comments.
pub async fn analyze_video_comments(
    api_key: &str,
    video: &Video,
    comments: &[Comment],
) -> Result<CommentAnalysis, GeminiError> {
    if api_key.is_empty() {
        return Err(GeminiError::MissingKey);
    }

    let client = GeminiClient::new(api_key);
    let request = GenerateContentRequest::json(comments_prompt(video, comments), 0.2, comment_schema());

    let text = client.generate(&request).await?;
    let mut result: CommentAnalysis = serde_json::from_str(text.trim())?;
    result.sentiment = normalize_sentiment(result.sentiment);
    Ok(result)
}

/// Force the three sentiment shares to sum to exactly 100: neutral absorbs
/// rounding drift, and an overshoot of positive + negative past 100 is
/// scaled back with neutral pinned at zero. All shares end non-negative.
pub(crate) fn normalize_sentiment(raw: Sentiment) -> Sentiment {
    let mut positive = raw.positive.max(0.0);
    let mut negative = raw.negative.max(0.0);

    let mut neutral = 100.0 - positive - negative;
    if neutral < 0.0 {
        let scale = 100.0 / (positive + negative);
        positive *= scale;
        negative *= scale;
        neutral = 0.0;
    }

    Sentiment {
        positive,
        negative,
        neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::types::{ChannelStatistics, ThumbnailSet, VideoStatistics};
    use chrono::Utc;

    fn video(title: &str, views: &str) -> Video {
        Video {
            id: "vid".into(),
            published_at: Utc::now(),
            title: title.into(),
            description: String::new(),
            tags: None,
            thumbnails: ThumbnailSet::default(),
            statistics: VideoStatistics {
                view_count: views.into(),
                ..VideoStatistics::default()
            },
        }
    }

    fn channel() -> Channel {
        Channel {
            id: "UCabc".into(),
            title: "테스트 채널".into(),
            description: String::new(),
            custom_url: None,
            thumbnails: ThumbnailSet::default(),
            statistics: ChannelStatistics {
                view_count: "150000000".into(),
                subscriber_count: "120000".into(),
                video_count: "321".into(),
            },
        }
    }

    fn assert_sums_to_100(s: Sentiment) {
        assert!(
            (s.positive + s.negative + s.neutral - 100.0).abs() < 1e-9,
            "shares {s:?} do not sum to 100"
        );
        assert!(s.positive >= 0.0 && s.negative >= 0.0 && s.neutral >= 0.0);
    }

    #[test]
    fn sentiment_drift_lands_on_neutral() {
        let s = normalize_sentiment(Sentiment {
            positive: 70.0,
            negative: 20.0,
            neutral: 5.0,
        });
        assert_eq!(s.neutral, 10.0);
        assert_sums_to_100(s);
    }

    #[test]
    fn already_consistent_shares_are_unchanged() {
        let s = normalize_sentiment(Sentiment {
            positive: 60.0,
            negative: 10.0,
            neutral: 30.0,
        });
        assert_eq!(s.positive, 60.0);
        assert_eq!(s.negative, 10.0);
        assert_eq!(s.neutral, 30.0);
    }

    #[test]
    fn negative_shares_are_clamped() {
        let s = normalize_sentiment(Sentiment {
            positive: -5.0,
            negative: 30.0,
            neutral: 10.0,
        });
        assert_eq!(s.positive, 0.0);
        assert_sums_to_100(s);
    }

    #[test]
    fn overshooting_shares_are_scaled_back() {
        let s = normalize_sentiment(Sentiment {
            positive: 80.0,
            negative: 40.0,
            neutral: 0.0,
        });
        assert_eq!(s.neutral, 0.0);
        assert_sums_to_100(s);
    }

    #[test]
    fn average_views_ignores_zero_view_videos() {
        let videos = vec![video("a", "100"), video("b", "0"), video("c", "300")];
        assert_eq!(average_recent_views(&videos), 200.0);
    }

    #[test]
    fn average_views_of_nothing_is_zero() {
        assert_eq!(average_recent_views(&[]), 0.0);
        assert_eq!(average_recent_views(&[video("a", "0")]), 0.0);
    }

    #[test]
    fn dashboard_prompt_carries_grouped_stats_and_titles() {
        let prompt = dashboard_prompt(&channel(), &[video("인기 영상", "25000")]);
        assert!(prompt.contains("테스트 채널"));
        assert!(prompt.contains("120,000 명"));
        assert!(prompt.contains("150,000,000 회"));
        assert!(prompt.contains("- \"인기 영상\" (조회수: 25,000)"));
    }

    #[test]
    fn revenue_prompt_includes_average_views() {
        let videos = vec![video("a", "100"), video("b", "300")];
        let prompt = revenue_prompt(&channel(), &videos);
        assert!(prompt.contains("최근 비디오 평균 조회수: 200 회"));
    }

    #[test]
    fn comments_prompt_lists_comment_bodies() {
        let comment = Comment {
            id: "c1".into(),
            text_display: "정말 유익해요".into(),
            author_display_name: "viewer".into(),
            author_profile_image_url: String::new(),
            published_at: Utc::now(),
        };
        let prompt = comments_prompt(&video("제목", "1"), &[comment]);
        assert!(prompt.contains("**영상 제목:** 제목"));
        assert!(prompt.contains("- 정말 유익해요"));
    }
}
