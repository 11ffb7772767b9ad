//! Message submission form state

use tracing::{debug, trace};

use super::rating::RatingControl;
use crate::core::message::{truncate_chars, MAX_AUTHOR_CHARS, MAX_CONTENT_CHARS};
use crate::core::{MessageDraft, DEFAULT_AUTHOR};

#[derive(Debug, Default)]
pub struct MessageForm {
    content: String,
    author: String,
    rating: RatingControl,
}

impl MessageForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Text buffer for an input widget. Call `enforce_limits` after editing.
    pub fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }

    pub fn author_mut(&mut self) -> &mut String {
        &mut self.author
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.enforce_limits();
    }

    pub fn set_author(&mut self, author: &str) {
        self.author = author.to_string();
        self.enforce_limits();
    }

    /// Clip both fields to their character caps.
    pub fn enforce_limits(&mut self) {
        truncate_chars(&mut self.content, MAX_CONTENT_CHARS);
        truncate_chars(&mut self.author, MAX_AUTHOR_CHARS);
    }

    pub fn rating(&self) -> &RatingControl {
        &self.rating
    }

    pub fn rating_mut(&mut self) -> &mut RatingControl {
        &mut self.rating
    }

    /// Characters typed so far, for the `n/500` counter
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn can_submit(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Build a draft from the current fields and clear the form.
    /// Whitespace-only content produces nothing and leaves the form as is.
    pub fn submit(&mut self) -> Option<MessageDraft> {
        let content = self.content.trim();
        if content.is_empty() {
            trace!("Empty submission ignored");
            return None;
        }

        let author = match self.author.trim() {
            "" => DEFAULT_AUTHOR.to_string(),
            name => name.to_string(),
        };
        let draft = MessageDraft {
            content: content.to_string(),
            author,
            rating: self.rating.committed(),
        };
        debug!(author = %draft.author, rating = draft.rating, chars = self.char_count(), "Message submitted");

        self.content.clear();
        self.author.clear();
        self.rating.reset();
        Some(draft)
    }
}
