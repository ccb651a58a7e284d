//! Token usage reported by the completion endpoint.
//!
//! Maps to the OpenAI-style usage object:
//! ```json
//! { "prompt_tokens": 100, "completion_tokens": 50, "total_tokens": 150 }
//! ```
//! Groq adds timing fields next to these; they are ignored.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Token usage statistics from one completion call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Number of tokens in the completion.
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total tokens used (prompt + completion).
    #[serde(default)]
    pub total_tokens: u32,
}

impl Usage {
    /// Create usage from prompt and completion counts.
    #[must_use]
    pub const fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }

    /// Whether no tokens were recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_tokens == 0 && self.prompt_tokens == 0 && self.completion_tokens == 0
    }
}

impl Add for Usage {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            prompt_tokens: self.prompt_tokens.saturating_add(rhs.prompt_tokens),
            completion_tokens: self.completion_tokens.saturating_add(rhs.completion_tokens),
            total_tokens: self.total_tokens.saturating_add(rhs.total_tokens),
        }
    }
}

impl AddAssign for Usage {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tokens ({} prompt + {} completion)",
            self.total_tokens, self.prompt_tokens, self.completion_tokens
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_computes_total() {
        let usage = Usage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
        assert!(!usage.is_empty());
    }

    #[test]
    fn default_is_empty() {
        assert!(Usage::default().is_empty());
    }

    #[test]
    fn add_sums_fields() {
        let mut total = Usage::new(10, 5);
        total += Usage::new(20, 10);
        assert_eq!(total, Usage::new(30, 15));
    }

    #[test]
    fn deserializes_groq_usage_with_extra_fields() {
        let json = r#"{
            "queue_time": 0.02,
            "prompt_tokens": 24,
            "prompt_time": 0.004,
            "completion_tokens": 377,
            "completion_time": 0.31,
            "total_tokens": 401,
            "total_time": 0.32
        }"#;
        let usage: Usage = serde_json::from_str(json).unwrap();
        assert_eq!(usage.prompt_tokens, 24);
        assert_eq!(usage.completion_tokens, 377);
        assert_eq!(usage.total_tokens, 401);
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(
            Usage::new(3, 4).to_string(),
            "7 tokens (3 prompt + 4 completion)"
        );
    }
}
