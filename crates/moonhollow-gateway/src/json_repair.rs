//! Best-effort normalization of structured provider replies.
//!
//! Models wrap JSON in Markdown fences or lead with prose. Repair is a
//! normalization step, not error suppression: if the text still fails to
//! parse, `MalformedJson` is raised with the original reply.

use moonhollow_core::error::GameError;

/// Strips a Markdown code fence recognized only as a prefix/suffix pair at
/// the string boundaries (```` ```json ```` or ```` ``` ````).
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    inner.trim()
}

/// Parses a provider reply as JSON after fence-stripping and, when the text
/// does not already start with `{`, truncating everything before the first
/// `{`.
pub fn parse_repaired(text: &str) -> Result<serde_json::Value, GameError> {
    let stripped = strip_code_fence(text);
    let candidate = if stripped.starts_with('{') {
        stripped
    } else {
        match stripped.find('{') {
            Some(pos) => &stripped[pos..],
            None => {
                return Err(GameError::MalformedJson(format!(
                    "no JSON object in reply: {text}"
                )));
            }
        }
    };
    serde_json::from_str(candidate)
        .map_err(|e| GameError::MalformedJson(format!("{e}: {text}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_json_parses() {
        let value = parse_repaired("```json\n{\"a\":1}\n```").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_bare_fence_parses() {
        let value = parse_repaired("```\n{\"a\":1}\n```").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_leading_prose_is_truncated() {
        let value = parse_repaired("Sure! {\"a\":1}").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_clean_json_passes_through() {
        let value = parse_repaired("{\"players_to_reply\": [\"Ada\"]}").unwrap();
        assert_eq!(value, json!({"players_to_reply": ["Ada"]}));
    }

    #[test]
    fn test_no_brace_fails_with_malformed_json() {
        let err = parse_repaired("I refuse to answer.").unwrap_err();
        assert!(matches!(err, GameError::MalformedJson(_)));
    }

    #[test]
    fn test_unparseable_brace_text_fails() {
        let err = parse_repaired("{not json").unwrap_err();
        assert!(matches!(err, GameError::MalformedJson(_)));
    }
}
