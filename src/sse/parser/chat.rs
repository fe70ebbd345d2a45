//! Chat envelope parser

use crate::sse::events::StreamDelta;
use crate::sse::payloads::ChatEnvelope;

/// Parse a chat completion chunk into a delta.
///
/// Only the first choice is considered. A chunk with no choices is a valid,
/// empty delta.
pub(super) fn parse_chat_payload(data: &str) -> Result<StreamDelta, serde_json::Error> {
    let envelope: ChatEnvelope = serde_json::from_str(data)?;

    let Some(choice) = envelope.choices.into_iter().next() else {
        return Ok(StreamDelta::default());
    };

    Ok(StreamDelta {
        text_fragment: choice.delta.content,
        image_stage: None,
        image_url: choice.delta.image_url,
        finish_reason: choice.finish_reason,
        role: choice.delta.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_delta() {
        let delta = parse_chat_payload(r#"{"choices":[{"delta":{"content":"Hi"}}]}"#).unwrap();
        assert_eq!(delta, StreamDelta::text("Hi"));
    }

    #[test]
    fn test_parse_role_and_finish_reason() {
        let delta = parse_chat_payload(
            r#"{"choices":[{"finish_reason":"stop","delta":{"role":"assistant"}}]}"#,
        )
        .unwrap();
        assert_eq!(delta.role.as_deref(), Some("assistant"));
        assert_eq!(delta.finish_reason.as_deref(), Some("stop"));
        assert!(delta.text_fragment.is_none());
    }

    #[test]
    fn test_parse_camel_case_fields() {
        let delta = parse_chat_payload(
            r#"{"choices":[{"finishReason":"stop","delta":{"imageUrl":"https://x/y.png"}}]}"#,
        )
        .unwrap();
        assert_eq!(delta.finish_reason.as_deref(), Some("stop"));
        assert_eq!(delta.image_url.as_deref(), Some("https://x/y.png"));
    }

    #[test]
    fn test_only_first_choice_used() {
        let delta = parse_chat_payload(
            r#"{"choices":[{"delta":{"content":"a"}},{"delta":{"content":"b"}}]}"#,
        )
        .unwrap();
        assert_eq!(delta.text_fragment.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_choices() {
        let delta = parse_chat_payload(r#"{"choices":[]}"#).unwrap();
        assert_eq!(delta, StreamDelta::default());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let delta = parse_chat_payload(
            r#"{"id":"x","model":"m","choices":[{"index":0,"delta":{"content":"ok"}}]}"#,
        )
        .unwrap();
        assert_eq!(delta.text_fragment.as_deref(), Some("ok"));
    }

    #[test]
    fn test_missing_choices_is_error() {
        assert!(parse_chat_payload(r#"{"delta":{"content":"x"}}"#).is_err());
    }
}
