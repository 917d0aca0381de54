//! The turn-routing arbiter.
//!
//! A separate model call that reads the tail of the shared channel plus the
//! newest human message and picks which bots speak next. The arbiter only
//! routes; it never authors transcript messages.

use moonhollow_core::error::GameError;
use moonhollow_transcript::message::MessageTag;
use moonhollow_transcript::view::ChatTurn;

use crate::application::context::SessionContext;
use crate::domain::game::Game;
use crate::prompts;

/// How many trailing shared messages the arbiter sees.
const ARBITER_WINDOW: usize = 10;

/// Upper bound on how many bots one human message can trigger.
const MAX_REPLIERS: usize = 3;

/// Asks the arbiter which bots should reply to `user_message`.
///
/// Returns 1 to 3 alive bot names in reply order. Nothing is persisted here;
/// the caller appends the human message only after this succeeds.
///
/// # Errors
///
/// `ArbiterParse` when the reply has no usable name; provider errors pass
/// through unrecovered.
pub async fn choose_repliers(
    ctx: &SessionContext,
    game: &Game,
    alive_names: &[String],
    user_message: &str,
) -> Result<Vec<String>, GameError> {
    let tail = ctx
        .transcripts
        .read_last(
            moonhollow_transcript::channel::ChannelKey::shared(game.id),
            ARBITER_WINDOW,
        )
        .await?;

    let mut view = Vec::with_capacity(tail.len() + 2);
    view.push(ChatTurn::new(
        MessageTag::System,
        prompts::arbiter_instruction(game),
    ));
    for message in &tail {
        view.push(ChatTurn::new(
            MessageTag::User,
            format!("{}: {}", message.author_name, message.body),
        ));
    }
    view.push(ChatTurn::new(
        MessageTag::User,
        format!("{}: {user_message}", game.human.name),
    ));

    let model = ctx.arbiter_model(game)?;
    let reply = model.ask_for_json(&view).await?;
    let names = parse_players_to_reply(&reply)?;
    filter_to_alive(names, alive_names)
}

/// Extracts the `players_to_reply` name list from the arbiter's JSON reply.
pub(crate) fn parse_players_to_reply(
    reply: &serde_json::Value,
) -> Result<Vec<String>, GameError> {
    let names = reply
        .get("players_to_reply")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| GameError::ArbiterParse(reply.to_string()))?;
    let names: Vec<String> = names
        .iter()
        .filter_map(serde_json::Value::as_str)
        .map(str::to_owned)
        .collect();
    if names.is_empty() {
        return Err(GameError::ArbiterParse(reply.to_string()));
    }
    Ok(names)
}

/// Keeps only alive bot names, deduplicated, in arbiter order, capped at
/// [`MAX_REPLIERS`]. An empty result means the arbiter named nobody usable.
pub(crate) fn filter_to_alive(
    names: Vec<String>,
    alive_names: &[String],
) -> Result<Vec<String>, GameError> {
    let mut selected: Vec<String> = Vec::new();
    for name in names {
        if alive_names.contains(&name) && !selected.contains(&name) {
            selected.push(name);
            if selected.len() == MAX_REPLIERS {
                break;
            }
        }
    }
    if selected.is_empty() {
        return Err(GameError::ArbiterParse(
            "no alive player among the selected names".to_owned(),
        ));
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_extracts_names_in_order() {
        let reply = json!({"players_to_reply": ["Bea", "Ada"]});
        assert_eq!(parse_players_to_reply(&reply).unwrap(), vec!["Bea", "Ada"]);
    }

    #[test]
    fn test_parse_rejects_missing_or_empty_list() {
        assert!(matches!(
            parse_players_to_reply(&json!({"players": []})),
            Err(GameError::ArbiterParse(_))
        ));
        assert!(matches!(
            parse_players_to_reply(&json!({"players_to_reply": []})),
            Err(GameError::ArbiterParse(_))
        ));
    }

    #[test]
    fn test_filter_drops_dead_and_unknown_names_and_caps_at_three() {
        let alive = vec![
            "Ada".to_owned(),
            "Bea".to_owned(),
            "Cal".to_owned(),
            "Dot".to_owned(),
        ];
        let names = vec![
            "Ghost".to_owned(),
            "Ada".to_owned(),
            "Ada".to_owned(),
            "Bea".to_owned(),
            "Cal".to_owned(),
            "Dot".to_owned(),
        ];
        let selected = filter_to_alive(names, &alive).unwrap();
        assert_eq!(selected, vec!["Ada", "Bea", "Cal"]);
    }

    #[test]
    fn test_filter_with_no_usable_name_is_an_arbiter_error() {
        let err = filter_to_alive(vec!["Ghost".to_owned()], &["Ada".to_owned()]).unwrap_err();
        assert!(matches!(err, GameError::ArbiterParse(_)));
    }
}
