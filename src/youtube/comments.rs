use crate::youtube::types::{Comment, CommentThreadListResponse};
use crate::youtube::{YouTubeClient, YouTubeError};

impl YouTubeClient {
    /// Fetch up to 50 top-level comments for a video, most relevant first.
    pub async fn get_comments_for_video(
        &self,
        video_id: &str,
    ) -> Result<Vec<Comment>, YouTubeError> {
        let data: CommentThreadListResponse = self
            .get(
                "commentThreads",
                &[
                    ("part", "snippet"),
                    ("videoId", video_id),
                    ("maxResults", "50"),
                    ("order", "relevance"),
                    ("textFormat", "plainText"),
                ],
            )
            .await?;

        Ok(data.items.into_iter().map(Comment::from).collect())
    }
}
