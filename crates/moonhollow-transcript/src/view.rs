//! Message view assembly.
//!
//! A participant's language-model call sees one ordered transcript: the
//! participant's current instruction first, then the shared broadcast channel
//! merged with that participant's private channel. This is a pure read-side
//! projection; the store is never mutated.

use crate::message::{ChatMessage, MessageTag};

/// One (role, text) pair of an assembled view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// The role tag relative to the viewing participant.
    pub tag: MessageTag,
    /// The turn text, author-prefixed for other participants' messages.
    pub text: String,
}

impl ChatTurn {
    /// Convenience constructor.
    #[must_use]
    pub fn new(tag: MessageTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }
}

/// Assembles the transcript a participant's model call will see.
///
/// The instruction becomes the single System turn; it is rebuilt from current
/// game state on every call rather than persisted, so an elimination's
/// dead-roster update reaches every later call automatically.
///
/// The shared and private logs are concatenated and sorted by `(ts, seq)`
/// ascending; the sort is stable, so equal keys keep their append order.
/// Every merged message is relabeled relative to the viewer: the viewer's own
/// utterances become Assistant turns, everyone else's become User turns with
/// a `"{author_name}: "` prefix so the model can attribute multi-party lines
/// within a single User turn.
///
/// If the private log is empty the view degrades to the shared log alone.
#[must_use]
pub fn build_view(
    instruction: &str,
    shared: &[ChatMessage],
    private: &[ChatMessage],
    viewer_id: &str,
) -> Vec<ChatTurn> {
    let mut merged: Vec<&ChatMessage> = shared.iter().chain(private.iter()).collect();
    merged.sort_by_key(|m| (m.ts, m.seq));

    let mut turns = Vec::with_capacity(merged.len() + 1);
    turns.push(ChatTurn::new(MessageTag::System, instruction));
    for message in merged {
        if message.author_id == viewer_id {
            turns.push(ChatTurn::new(MessageTag::Assistant, message.body.clone()));
        } else {
            turns.push(ChatTurn::new(
                MessageTag::User,
                format!("{}: {}", message.author_name, message.body),
            ));
        }
    }
    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelKey;
    use uuid::Uuid;

    fn message(
        channel: ChannelKey,
        author_id: &str,
        author_name: &str,
        body: &str,
        ts: i64,
        seq: i64,
    ) -> ChatMessage {
        ChatMessage {
            channel,
            author_id: author_id.to_owned(),
            author_name: author_name.to_owned(),
            body: body.to_owned(),
            tag: MessageTag::User,
            ts,
            seq,
        }
    }

    #[test]
    fn test_view_merges_and_sorts_by_timestamp() {
        let game_id = Uuid::new_v4();
        let viewer = Uuid::new_v4();
        let shared = ChannelKey::shared(game_id);
        let private = ChannelKey::private(game_id, viewer);
        let viewer_id = viewer.to_string();

        let shared_log = vec![message(shared, "p2", "Bea", "hello", 3, 3)];
        let private_log = vec![message(private, "gm", "Game Master", "your command", 2, 2)];

        let view = build_view("instruction", &shared_log, &private_log, &viewer_id);

        assert_eq!(view.len(), 3);
        assert_eq!(view[0], ChatTurn::new(MessageTag::System, "instruction"));
        assert_eq!(
            view[1],
            ChatTurn::new(MessageTag::User, "Game Master: your command")
        );
        assert_eq!(view[2], ChatTurn::new(MessageTag::User, "Bea: hello"));
    }

    #[test]
    fn test_exactly_one_system_turn() {
        let game_id = Uuid::new_v4();
        let shared = ChannelKey::shared(game_id);
        let shared_log = vec![
            message(shared, "gm", "Game Master", "the town awakens", 1, 1),
            message(shared, "p2", "Bea", "hello", 2, 2),
        ];

        let view = build_view("instruction", &shared_log, &[], "viewer");

        let system_count = view.iter().filter(|t| t.tag == MessageTag::System).count();
        assert_eq!(system_count, 1);
        assert_eq!(view[0].text, "instruction");
    }

    #[test]
    fn test_viewer_messages_relabel_assistant_without_prefix() {
        let game_id = Uuid::new_v4();
        let viewer = Uuid::new_v4();
        let shared = ChannelKey::shared(game_id);
        let viewer_id = viewer.to_string();

        let shared_log = vec![
            message(shared, &viewer_id, "Ada", "my own line", 1, 1),
            message(shared, "p2", "Bea", "a reply", 2, 2),
        ];

        let view = build_view("instruction", &shared_log, &[], &viewer_id);

        assert_eq!(view[1], ChatTurn::new(MessageTag::Assistant, "my own line"));
        assert_eq!(view[2], ChatTurn::new(MessageTag::User, "Bea: a reply"));
    }

    #[test]
    fn test_every_input_message_appears_exactly_once() {
        let game_id = Uuid::new_v4();
        let viewer = Uuid::new_v4();
        let shared = ChannelKey::shared(game_id);
        let private = ChannelKey::private(game_id, viewer);

        let shared_log: Vec<ChatMessage> = (0..5)
            .map(|i| message(shared, "p2", "Bea", &format!("s{i}"), i, i))
            .collect();
        let private_log: Vec<ChatMessage> = (0..3)
            .map(|i| message(private, "gm", "Game Master", &format!("p{i}"), i, 100 + i))
            .collect();

        let view = build_view("instruction", &shared_log, &private_log, &viewer.to_string());

        assert_eq!(view.len(), 9);
        for body in ["s0", "s4", "p0", "p2"] {
            assert_eq!(
                view.iter()
                    .filter(|t| t.text.ends_with(&format!(": {body}")))
                    .count(),
                1
            );
        }
    }

    #[test]
    fn test_ties_keep_append_order() {
        let game_id = Uuid::new_v4();
        let shared = ChannelKey::shared(game_id);

        // Same ts; seq assigned by insertion order must win.
        let shared_log = vec![
            message(shared, "p1", "Ada", "first", 5, 1),
            message(shared, "p2", "Bea", "second", 5, 2),
        ];

        let view = build_view("instruction", &shared_log, &[], "viewer");
        assert_eq!(view[1].text, "Ada: first");
        assert_eq!(view[2].text, "Bea: second");
    }

    #[test]
    fn test_empty_private_log_degrades_to_shared_log() {
        let game_id = Uuid::new_v4();
        let shared = ChannelKey::shared(game_id);
        let shared_log = vec![message(shared, "p2", "Bea", "hello", 1, 1)];

        let view = build_view("instruction", &shared_log, &[], "viewer");
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].tag, MessageTag::System);
        assert_eq!(view[1].text, "Bea: hello");
    }
}
