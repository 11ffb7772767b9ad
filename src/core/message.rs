//! Guestbook messages and the host-owned message list
//!
//! The list is kept newest first: initial loads are sorted by send time
//! (descending, stable) and new messages are inserted at the front.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Author shown when the submitter leaves the name blank
pub const DEFAULT_AUTHOR: &str = "Anonymous visitor";
/// Maximum message length, in characters
pub const MAX_CONTENT_CHARS: usize = 500;
/// Maximum author name length, in characters
pub const MAX_AUTHOR_CHARS: usize = 20;
/// Highest (and only storable) star rating
pub const MAX_RATING: u8 = 5;

/// A stored guestbook message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "sender", default)]
    pub author: String,
    pub content: String,
    #[serde(deserialize_with = "de_rating")]
    pub rating: u8,
    #[serde(
        rename = "sendTime",
        alias = "timestamp",
        deserialize_with = "de_sent_at"
    )]
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// First character of the author name, for the avatar badge
    pub fn initial(&self) -> char {
        self.author.chars().next().unwrap_or('?')
    }
}

/// What the submission form emits. The host assigns id and send time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageDraft {
    pub content: String,
    pub author: String,
    pub rating: u8,
}

impl MessageDraft {
    /// Complete the draft into a full message.
    pub fn complete(self, id: String, sent_at: DateTime<Utc>) -> Message {
        Message {
            id,
            author: self.author,
            content: self.content,
            rating: self.rating,
            sent_at,
        }
    }
}

/// Ordered message list owned by the host view (newest first).
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
    /// Counter for ids assigned without a server
    local_seq: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a freshly loaded set.
    pub fn replace_all(&mut self, mut messages: Vec<Message>) {
        messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        debug!(count = messages.len(), "Message list replaced");
        self.messages = messages;
    }

    /// Insert a new message at the front. Duplicate ids are ignored.
    pub fn push_newest(&mut self, message: Message) {
        if self.messages.iter().any(|m| m.id == message.id) {
            debug!(id = %message.id, "Duplicate message ignored");
            return;
        }
        debug!(id = %message.id, author = %message.author, "Message added");
        self.messages.insert(0, message);
    }

    /// Complete a draft locally (no server) and insert it.
    pub fn add_local(&mut self, draft: MessageDraft, now: DateTime<Utc>) -> &Message {
        self.local_seq += 1;
        let id = format!("local-{}", self.local_seq);
        self.push_newest(draft.complete(id, now));
        &self.messages[0]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Human-readable age of a message ("just now", "5 min ago", ...).
pub fn format_relative(sent_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - sent_at).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if minutes < 1440 {
        format!("{} h ago", minutes / 60)
    } else {
        format!("{} d ago", minutes / 1440)
    }
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(s: &mut String, max: usize) {
    if let Some((byte_idx, _)) = s.char_indices().nth(max) {
        s.truncate(byte_idx);
    }
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }

    Ok(match RawId::deserialize(d)? {
        RawId::Num(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}

fn de_rating<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let raw = i64::deserialize(d)?;
    Ok(raw.clamp(1, MAX_RATING as i64) as u8)
}

/// RFC 3339, or a zone-less ISO timestamp taken as UTC.
fn de_sent_at<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 12, minute, 0).unwrap()
    }

    fn message(id: &str, minute: u32) -> Message {
        Message {
            id: id.to_string(),
            author: "kim".to_string(),
            content: "hi".to_string(),
            rating: 5,
            sent_at: at(minute),
        }
    }

    #[test]
    fn test_replace_all_sorts_newest_first() {
        let mut log = MessageLog::new();
        log.replace_all(vec![message("a", 1), message("b", 30), message("c", 10)]);
        let ids: Vec<&str> = log.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_push_newest_goes_to_front() {
        let mut log = MessageLog::new();
        log.replace_all(vec![message("a", 1)]);
        log.push_newest(message("b", 2));
        log.push_newest(message("b", 2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(0).map(|m| m.id.as_str()), Some("b"));
    }

    #[test]
    fn test_add_local_assigns_unique_ids() {
        let mut log = MessageLog::new();
        let draft = MessageDraft {
            content: "hello".to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            rating: 5,
        };
        let first = log.add_local(draft.clone(), at(0)).id.clone();
        let second = log.add_local(draft, at(1)).id.clone();
        assert_ne!(first, second);
        assert_eq!(log.get(0).map(|m| m.id.clone()), Some(second));
    }

    #[test]
    fn test_format_relative() {
        let sent = at(0);
        assert_eq!(format_relative(sent, sent + Duration::seconds(30)), "just now");
        assert_eq!(format_relative(sent, sent + Duration::minutes(5)), "5 min ago");
        assert_eq!(format_relative(sent, sent + Duration::minutes(125)), "2 h ago");
        assert_eq!(format_relative(sent, sent + Duration::days(3)), "3 d ago");
        // Clock skew: message "from the future"
        assert_eq!(format_relative(sent, sent - Duration::minutes(2)), "just now");
    }

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        let mut s = "방문자방문자".to_string();
        truncate_chars(&mut s, 3);
        assert_eq!(s, "방문자");

        let mut short = "abc".to_string();
        truncate_chars(&mut short, 20);
        assert_eq!(short, "abc");
    }

    #[test]
    fn test_initial() {
        let mut m = message("a", 0);
        m.author = "Émile".to_string();
        assert_eq!(m.initial(), 'É');
        m.author.clear();
        assert_eq!(m.initial(), '?');
    }
}
