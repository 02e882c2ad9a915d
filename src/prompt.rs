//! Turns a word of inspiration into the mandala instruction sent to the API.

use std::fmt;

use crate::error::AppError;

/// A trimmed, non-empty word (or short phrase) the mandala is inspired by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspirationWord(String);

impl InspirationWord {
    /// Parse user input into an inspiration word.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or only whitespace.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidArgument(
                "Enter a word for inspiration, e.g. ocean, serenity, forest, cosmos".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The word as entered (minus surrounding whitespace).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InspirationWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the image-generation instruction for `word`.
///
/// The word is interpolated verbatim.
#[must_use]
pub fn build_prompt(word: &InspirationWord) -> String {
    format!(
        "Create a detailed black and white symmetric mandala design inspired by the concept of \
         '{word}'. The mandala should be intricate, perfectly symmetrical, and feature detailed \
         patterns. Use only black and white colors with clear contrast. The design should be \
         centered and circular with radiating patterns. Make it high-resolution and suitable for \
         printing."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_word_and_boilerplate() {
        for raw in ["ocean", "serenity", "forest-mystery", "infinity & beyond", "雪"] {
            let word = InspirationWord::parse(raw).unwrap();
            let prompt = build_prompt(&word);
            assert!(prompt.contains(&format!("'{raw}'")), "missing word in: {prompt}");
            assert!(prompt.contains("black and white symmetric mandala"));
            assert!(prompt.contains("circular with radiating patterns"));
            assert!(prompt.contains("high-resolution"));
        }
    }

    #[test]
    fn word_is_not_escaped() {
        let word = InspirationWord::parse("it's \"quoted\"").unwrap();
        assert!(build_prompt(&word).contains("'it's \"quoted\"'"));
    }

    #[test]
    fn parse_trims_whitespace() {
        let word = InspirationWord::parse("  cosmos \n").unwrap();
        assert_eq!(word.as_str(), "cosmos");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(InspirationWord::parse("").is_err());
        assert!(InspirationWord::parse("   \t").is_err());
    }

    #[test]
    fn prompt_is_deterministic() {
        let word = InspirationWord::parse("harmony").unwrap();
        assert_eq!(build_prompt(&word), build_prompt(&word));
    }
}
