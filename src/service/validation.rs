//! Boundary parsing: raw path segments and body fields become typed values here,
//! before anything touches storage.

use std::fmt;
use std::str::FromStr;

use crate::error::PollError;

pub const MAX_OPTION_CHARS: usize = 500;

/// A positive question id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionId(i64);

impl QuestionId {
    pub fn new(id: i64) -> Result<Self, PollError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(PollError::InvalidId)
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for QuestionId {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Reject "+5" and surrounding whitespace; only plain digits are an id.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PollError::InvalidId);
        }
        let id = s.parse::<i64>().map_err(|_| PollError::InvalidId)?;
        Self::new(id)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteOption {
    A,
    B,
}

impl FromStr for VoteOption {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(VoteOption::A),
            "B" => Ok(VoteOption::B),
            _ => Err(PollError::InvalidOption),
        }
    }
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteOption::A => f.write_str("A"),
            VoteOption::B => f.write_str("B"),
        }
    }
}

/// A validated question submission. Both texts are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    option_a: String,
    option_b: String,
}

impl NewQuestion {
    pub fn parse(option_a: &str, option_b: &str) -> Result<Self, PollError> {
        let option_a = option_text(option_a)?;
        let option_b = option_text(option_b)?;
        if same_option(option_a, option_b) {
            return Err(PollError::DuplicateOptions);
        }
        Ok(Self {
            option_a: option_a.to_string(),
            option_b: option_b.to_string(),
        })
    }

    pub fn option_a(&self) -> &str {
        &self.option_a
    }

    pub fn option_b(&self) -> &str {
        &self.option_b
    }
}

fn option_text(raw: &str) -> Result<&str, PollError> {
    let text = raw.trim();
    // SQLite's length() stops at NUL, so control characters never reach the store.
    if text.is_empty()
        || text.chars().count() > MAX_OPTION_CHARS
        || text.chars().any(char::is_control)
    {
        return Err(PollError::InvalidOptionText);
    }
    Ok(text)
}

/// Case-insensitive comparison of trimmed option texts.
pub fn same_option(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn option_letter_is_case_insensitive() {
        assert_eq!("a".parse::<VoteOption>().unwrap(), VoteOption::A);
        assert_eq!("A".parse::<VoteOption>().unwrap(), VoteOption::A);
        assert_eq!("b".parse::<VoteOption>().unwrap(), VoteOption::B);
        assert_eq!("B".parse::<VoteOption>().unwrap(), VoteOption::B);
    }

    #[test]
    fn other_option_letters_are_rejected() {
        for raw in ["", "C", "AB", " a", "optionA", "1"] {
            assert!(
                matches!(raw.parse::<VoteOption>(), Err(PollError::InvalidOption)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!("1".parse::<QuestionId>().unwrap().get(), 1);
        assert_eq!("999999".parse::<QuestionId>().unwrap().get(), 999_999);
        for raw in ["0", "-1", "+3", "abc", "1.5", "", " 7", "99999999999999999999"] {
            assert!(
                matches!(raw.parse::<QuestionId>(), Err(PollError::InvalidId)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn submission_texts_are_trimmed() {
        let q = NewQuestion::parse("  Cats ", "\tDogs\n").unwrap();
        assert_eq!(q.option_a(), "Cats");
        assert_eq!(q.option_b(), "Dogs");
    }

    #[test]
    fn blank_or_long_texts_are_rejected() {
        let long = "x".repeat(MAX_OPTION_CHARS + 1);
        for (a, b) in [("", "Dogs"), ("Cats", "   "), (long.as_str(), "Dogs")] {
            let err = NewQuestion::parse(a, b).unwrap_err();
            assert!(matches!(err, PollError::InvalidOptionText));
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn control_characters_are_rejected() {
        for (a, b) in [("\u{0}hidden", "Dogs"), ("Cats", "Do\u{0}gs"), ("Ca\nts", "Dogs")] {
            assert!(
                matches!(NewQuestion::parse(a, b), Err(PollError::InvalidOptionText)),
                "{a:?} / {b:?} should be rejected"
            );
        }
    }

    #[test]
    fn length_limit_counts_characters_after_trim() {
        let exact = "é".repeat(MAX_OPTION_CHARS);
        let padded = format!("   {exact}   ");
        assert!(NewQuestion::parse(&padded, "Dogs").is_ok());
    }

    #[test]
    fn duplicate_options_ignore_case_and_whitespace() {
        for (a, b) in [("Same", "same"), ("Pizza", " pizza "), ("ÉCOLE", "école")] {
            let err = NewQuestion::parse(a, b).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DuplicateOptions, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn text_errors_win_over_duplicate_check() {
        assert!(matches!(
            NewQuestion::parse(" ", " "),
            Err(PollError::InvalidOptionText)
        ));
    }
}
