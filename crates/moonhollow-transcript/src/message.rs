//! Chat message records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::channel::ChannelKey;

/// The Game Master's author id on system and command messages.
pub const GM_ID: &str = "gm";

/// The Game Master's display name.
pub const GM_NAME: &str = "Game Master";

/// The role tag stored with a message. Meaning depends on the reader: the
/// view builder relabels tags relative to the viewing participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageTag {
    /// An instruction message.
    System,
    /// A message authored by some participant or the Game Master.
    User,
    /// A participant's own prior utterance, from that participant's view.
    Assistant,
}

/// One immutable transcript entry.
///
/// `ts` is assigned by the writer path from the session clock; `seq` is
/// assigned by the store at append time and breaks timestamp ties by
/// insertion order. Messages are never edited or reordered after append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The channel this message was appended to.
    pub channel: ChannelKey,
    /// Author participant id, or [`GM_ID`] for the Game Master.
    pub author_id: String,
    /// Author display name.
    pub author_name: String,
    /// Free-text body.
    pub body: String,
    /// Stored role tag.
    pub tag: MessageTag,
    /// Epoch milliseconds; the sole ordering key within a channel.
    pub ts: i64,
    /// Tie-break assigned by the store at append time.
    pub seq: i64,
}

impl ChatMessage {
    /// A message authored by a participant.
    #[must_use]
    pub fn from_participant(
        channel: ChannelKey,
        author_id: Uuid,
        author_name: impl Into<String>,
        body: impl Into<String>,
        ts: i64,
    ) -> Self {
        Self {
            channel,
            author_id: author_id.to_string(),
            author_name: author_name.into(),
            body: body.into(),
            tag: MessageTag::User,
            ts,
            seq: 0,
        }
    }

    /// A command or announcement from the Game Master.
    #[must_use]
    pub fn from_game_master(channel: ChannelKey, body: impl Into<String>, ts: i64) -> Self {
        Self {
            channel,
            author_id: GM_ID.to_owned(),
            author_name: GM_NAME.to_owned(),
            body: body.into(),
            tag: MessageTag::User,
            ts,
            seq: 0,
        }
    }
}
