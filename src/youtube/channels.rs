use crate::youtube::types::{Channel, ChannelListResponse};
use crate::youtube::{YouTubeClient, YouTubeError};

impl YouTubeClient {
    /// Fetch the snapshot (snippet + statistics) for a free-form channel
    /// reference. Resolution happens first, then one `channels` lookup.
    pub async fn get_channel(&self, input: &str) -> Result<Channel, YouTubeError> {
        let channel_id = self.resolve_channel_id(input).await?;

        let data: ChannelListResponse = self
            .get(
                "channels",
                &[("part", "snippet,statistics"), ("id", &channel_id)],
            )
            .await?;

        data.items
            .into_iter()
            .next()
            .map(Channel::from)
            .ok_or(YouTubeError::NoChannelData)
    }
}
