//! Parser for message API response bodies
//!
//! Server records are normalized on the way in: blank authors get the
//! placeholder name and content is capped to the display limit.

use super::error::ApiError;
use super::message::{truncate_chars, Message, DEFAULT_AUTHOR, MAX_CONTENT_CHARS};
use tracing::{debug, trace, warn};

/// Parse the body of `GET /api/messages`.
pub fn parse_message_list(body: &str) -> Result<Vec<Message>, ApiError> {
    trace!(len = body.len(), "Parsing message list");

    let messages: Vec<Message> = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse message list");
        e
    })?;

    debug!(count = messages.len(), "Message list parsed");
    Ok(messages.into_iter().map(normalize).collect())
}

/// Parse the body of `POST /api/messages` (the stored record echoed back).
pub fn parse_message(body: &str) -> Result<Message, ApiError> {
    trace!(len = body.len(), "Parsing message");

    let message: Message = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse message");
        e
    })?;

    Ok(normalize(message))
}

fn normalize(mut message: Message) -> Message {
    if message.author.trim().is_empty() {
        message.author = DEFAULT_AUTHOR.to_string();
    }
    truncate_chars(&mut message.content, MAX_CONTENT_CHARS);
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_list_with_numeric_ids() {
        let body = r#"[
            {
                "id": 7,
                "author": "kim",
                "content": "great work",
                "rating": 5,
                "sendTime": "2025-07-01T12:00:00Z"
            },
            {
                "id": "8",
                "sender": "lee",
                "content": "nice",
                "rating": 4,
                "sendTime": "2025-07-01T13:30:00.123"
            }
        ]"#;

        let messages = parse_message_list(body).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, "7");
        assert_eq!(messages[1].id, "8");
        assert_eq!(messages[1].author, "lee");
        assert_eq!(
            messages[0].sent_at,
            Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_message_normalizes() {
        let body = r#"{
            "id": 42,
            "content": "hello",
            "rating": 0,
            "timestamp": "2025-07-01T12:00:00+09:00"
        }"#;

        let message = parse_message(body).unwrap();
        assert_eq!(message.id, "42");
        assert_eq!(message.author, DEFAULT_AUTHOR);
        assert_eq!(message.rating, 1);
        assert_eq!(
            message.sent_at,
            Utc.with_ymd_and_hms(2025, 7, 1, 3, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_bad_body() {
        assert!(matches!(
            parse_message_list("<html>502</html>"),
            Err(ApiError::Decode(_))
        ));
        assert!(parse_message(r#"{"id": 1}"#).is_err());
    }
}
