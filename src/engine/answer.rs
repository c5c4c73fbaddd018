//! Player answer parsing

use thiserror::Error;

/// Reasons an answer cannot be read as an integer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("answer is empty")]
    Empty,

    #[error("answer is not an integer: {0}")]
    NotAnInteger(String),

    #[error("answer is out of range: {0}")]
    OutOfRange(String),
}

/// Parse a trimmed `-?[0-9]+` answer into an integer.
///
/// Leading zeros (`"007"`) are accepted and an explicit `+` sign is rejected,
/// unlike `str::parse`. The console and the HTTP API both go through this rule.
pub fn parse_answer(raw: &str) -> Result<i64, AnswerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnswerError::Empty);
    }

    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AnswerError::NotAnInteger(trimmed.to_string()));
    }

    trimmed
        .parse::<i64>()
        .map_err(|_| AnswerError::OutOfRange(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integers() {
        assert_eq!(parse_answer("127"), Ok(127));
        assert_eq!(parse_answer("-42"), Ok(-42));
        assert_eq!(parse_answer("0"), Ok(0));
        assert_eq!(parse_answer("007"), Ok(7));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_answer("  15\n"), Ok(15));
        assert_eq!(parse_answer("\t-3 "), Ok(-3));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(parse_answer(""), Err(AnswerError::Empty));
        assert_eq!(parse_answer("   "), Err(AnswerError::Empty));
    }

    #[test]
    fn test_parse_rejects_non_integers() {
        for raw in ["abc", "-", "+5", "1.5", "1e3", "12 3", "--1", "0x10"] {
            assert!(
                matches!(parse_answer(raw), Err(AnswerError::NotAnInteger(_))),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            parse_answer("99999999999999999999"),
            Err(AnswerError::OutOfRange(_))
        ));
        assert_eq!(parse_answer("-9223372036854775808"), Ok(i64::MIN));
    }
}
