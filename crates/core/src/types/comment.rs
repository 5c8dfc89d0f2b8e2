//! Comment board entries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a comment submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    #[error("留言不能为空")]
    Empty,
}

/// A freeform comment. No author, no timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment(String);

impl Comment {
    /// Parse a submitted comment, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::Empty` if nothing is left after trimming.
    pub fn parse(input: &str) -> Result<Self, CommentError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(CommentError::Empty);
        }
        Ok(Self(text.to_string()))
    }

    /// Get the comment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        assert_eq!(Comment::parse("  还在吗？ \n").unwrap().as_str(), "还在吗？");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(Comment::parse(""), Err(CommentError::Empty));
        assert_eq!(Comment::parse(" \t "), Err(CommentError::Empty));
        assert_eq!(CommentError::Empty.to_string(), "留言不能为空");
    }
}
