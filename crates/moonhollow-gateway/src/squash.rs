//! Transcript squashing for strict-alternation providers.

use moonhollow_transcript::message::MessageTag;
use moonhollow_transcript::view::ChatTurn;

/// A squashed transcript: the extracted system instruction plus a sequence
/// of turns that strictly alternates User/Assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquashedView {
    /// The leading System turn's text, passed via the provider's separate
    /// system-instruction slot.
    pub system: Option<String>,
    /// Alternating User/Assistant turns, chronological.
    pub turns: Vec<ChatTurn>,
}

/// Merges consecutive User turns so no two adjacent turns share a role.
///
/// Walks the view in order after the first (system) message, accumulating
/// User text with newline separators; an Assistant turn flushes the pending
/// accumulator, then is emitted as its own turn. A trailing accumulator is
/// flushed at the end. Chronological content ordering is preserved.
#[must_use]
pub fn squash(view: &[ChatTurn]) -> SquashedView {
    let mut system = None;
    let mut turns: Vec<ChatTurn> = Vec::new();
    let mut pending_user = String::new();

    let mut rest = view;
    if let Some((first, tail)) = view.split_first()
        && first.tag == MessageTag::System
    {
        system = Some(first.text.clone());
        rest = tail;
    }

    for turn in rest {
        if turn.tag == MessageTag::Assistant {
            if !pending_user.is_empty() {
                turns.push(ChatTurn::new(
                    MessageTag::User,
                    std::mem::take(&mut pending_user),
                ));
            }
            // Back-to-back utterances from the participant itself also merge,
            // so the output alternates for any input transcript.
            match turns.last_mut() {
                Some(last) if last.tag == MessageTag::Assistant => {
                    last.text.push('\n');
                    last.text.push_str(&turn.text);
                }
                _ => turns.push(turn.clone()),
            }
        } else {
            if !pending_user.is_empty() {
                pending_user.push('\n');
            }
            pending_user.push_str(&turn.text);
        }
    }
    if !pending_user.is_empty() {
        turns.push(ChatTurn::new(MessageTag::User, pending_user));
    }

    SquashedView { system, turns }
}
