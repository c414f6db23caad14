//! Conversation memory for multi-turn itinerary refinement
//!
//! One session object per interactive user, owned by the caller and handed
//! to the planner on each generation. The planner records only successful
//! turns; clearing is the caller's responsibility.

use serde::{Deserialize, Serialize};

/// One recorded generation turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    /// The user notes that accompanied the request
    pub input: String,
    /// The itinerary text that came back
    pub output: String,
}

/// Append-only log of prior turns, rendered into the prompt history field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationMemory {
    turns: Vec<Turn>,
}

impl ConversationMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed turn
    pub fn record(&mut self, input: impl Into<String>, output: impl Into<String>) {
        self.turns.push(Turn {
            input: input.into(),
            output: output.into(),
        });
    }

    /// Transcript of prior turns for prompt injection; empty when fresh
    #[must_use]
    pub fn history(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("Human: {}\nAI: {}", turn.input, turn.output))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_memory_has_empty_history() {
        let memory = ConversationMemory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.history(), "");
    }

    #[test]
    fn test_history_renders_turns_in_order() {
        let mut memory = ConversationMemory::new();
        memory.record("vegetarian food", "Day 1: Colombo");
        memory.record("add a beach day", "Day 1: Mirissa");

        let history = memory.history();
        assert_eq!(
            history,
            "Human: vegetarian food\nAI: Day 1: Colombo\nHuman: add a beach day\nAI: Day 1: Mirissa"
        );
    }

    #[test]
    fn test_clear_forgets_turns() {
        let mut memory = ConversationMemory::new();
        memory.record("a", "b");
        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(memory.history(), "");
    }
}
