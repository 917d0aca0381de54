//! Transcript persistence boundary.

use async_trait::async_trait;

use moonhollow_core::error::GameError;

use crate::channel::ChannelKey;
use crate::message::ChatMessage;

/// Repository trait for append-only transcript channels.
///
/// Implementations must return messages ordered by `(ts, seq)` ascending and
/// assign a strictly increasing `seq` per channel at append time.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Append one message, returning the stored copy with its `seq` assigned.
    async fn append(&self, message: &ChatMessage) -> Result<ChatMessage, GameError>;

    /// Read a channel's full transcript in order.
    async fn read(&self, channel: ChannelKey) -> Result<Vec<ChatMessage>, GameError>;

    /// Read the last `limit` messages of a channel, still in ascending order.
    async fn read_last(
        &self,
        channel: ChannelKey,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, GameError> {
        let mut messages = self.read(channel).await?;
        let skip = messages.len().saturating_sub(limit);
        Ok(messages.split_off(skip))
    }

    /// Delete a channel and all of its messages.
    async fn delete_channel(&self, channel: ChannelKey) -> Result<(), GameError>;
}
