/// What a free-text command asks for.
///
/// Matching is by keyword: the text is lowercased and trimmed, then checked for each
/// intent's keywords in a fixed order. The first intent with a keyword contained in
/// the text wins, so `"help with my score"` is a [`CommandIntent::Help`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CommandIntent {
    Help,
    Performance,
    Hint,
    Predict,
    BoardAnalysis,
    Unknown,
}

const INTENT_KEYWORDS: [(CommandIntent, &[&str]); 5] = [
    (CommandIntent::Help, &["help", "what can you do"]),
    (CommandIntent::Performance, &["score", "how am i doing"]),
    (CommandIntent::Hint, &["hint", "what should i do"]),
    (CommandIntent::Predict, &["predict", "next move"]),
    (CommandIntent::BoardAnalysis, &["analyze", "board"]),
];

pub(crate) const HELP_LINES: [&str; 8] = [
    "=== AI ASSISTANT HELP ===",
    "Available commands:",
    "- 'help': Show this help message",
    "- 'hint': Get a hint for current piece",
    "- 'analyze board': Get board analysis",
    "- 'predict next moves': Show future predictions",
    "- 'how am I doing?': Get performance analysis",
    "=== END HELP ===",
];

pub(crate) const UNKNOWN_COMMAND: &str =
    "I don't understand that command. Try: 'help', 'hint', 'analyze board', or 'predict next moves'";

impl CommandIntent {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let text = text.trim().to_lowercase();
        INTENT_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map_or(Self::Unknown, |(intent, _)| *intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let cases = [
            ("help", CommandIntent::Help),
            ("What can you do?", CommandIntent::Help),
            ("  SCORE ", CommandIntent::Performance),
            ("how am I doing?", CommandIntent::Performance),
            ("hint please", CommandIntent::Hint),
            ("what should I do", CommandIntent::Hint),
            ("predict next moves", CommandIntent::Predict),
            ("your next move?", CommandIntent::Predict),
            ("analyze board", CommandIntent::BoardAnalysis),
            ("show the board", CommandIntent::BoardAnalysis),
            ("dance", CommandIntent::Unknown),
            ("", CommandIntent::Unknown),
        ];
        for (text, expected) in cases {
            assert_eq!(CommandIntent::from_text(text), expected, "{text:?}");
        }
    }

    #[test]
    fn test_earlier_intent_wins() {
        assert_eq!(
            CommandIntent::from_text("help with my score"),
            CommandIntent::Help
        );
        assert_eq!(
            CommandIntent::from_text("hint for the board"),
            CommandIntent::Hint
        );
        assert_eq!(
            CommandIntent::from_text("score on this board"),
            CommandIntent::Performance
        );
    }
}
