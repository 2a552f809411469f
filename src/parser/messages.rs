//! Error-message shaping for the parser.
//!
//! Expectation messages list at most five alternatives followed by `, ...`;
//! anything longer than 200 characters is truncated. Keeps recovery-point
//! messages readable where a production admits many continuations.

use super::token_kind::TokenKind;

const MAX_ALTERNATIVES: usize = 5;
const MAX_MESSAGE_LEN: usize = 200;

/// Build an "expected ..., found ..." message from a set of acceptable
/// token kinds and the token actually seen.
pub fn expectation_message(expected: &[TokenKind], found: &str) -> String {
    let message = match expected {
        [] => format!("unexpected {}", found),
        [one] => format!("expected {}, found {}", one.describe(), found),
        _ => {
            let shown: Vec<&str> = expected
                .iter()
                .take(MAX_ALTERNATIVES)
                .map(|k| k.describe())
                .collect();
            let suffix = if expected.len() > MAX_ALTERNATIVES {
                ", ..."
            } else {
                ""
            };
            format!(
                "expected one of {}{}, found {}",
                shown.join(", "),
                suffix,
                found
            )
        }
    };
    truncate(message)
}

/// Hard cap on message length.
pub fn truncate(message: String) -> String {
    if message.len() <= MAX_MESSAGE_LEN {
        return message;
    }
    let mut cut = MAX_MESSAGE_LEN.saturating_sub(3);
    while cut > 0 && !message.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &message[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_expectation() {
        let msg = expectation_message(&[TokenKind::SEMICOLON], "'}'");
        assert_eq!(msg, "expected ';', found '}'");
    }

    #[test]
    fn test_alternatives_capped_at_five() {
        let kinds = [
            TokenKind::PACKAGE_KW,
            TokenKind::PART_KW,
            TokenKind::ITEM_KW,
            TokenKind::ATTRIBUTE_KW,
            TokenKind::ACTION_KW,
            TokenKind::STATE_KW,
            TokenKind::PORT_KW,
        ];
        let msg = expectation_message(&kinds, "'='");
        assert!(msg.contains("'package'"));
        assert!(msg.contains("'action'"));
        assert!(!msg.contains("'state'"));
        assert!(msg.contains(", ..."));
        assert!(msg.ends_with("found '='"));
    }

    #[test]
    fn test_exactly_five_alternatives_not_elided() {
        let kinds = [
            TokenKind::PACKAGE_KW,
            TokenKind::PART_KW,
            TokenKind::ITEM_KW,
            TokenKind::ATTRIBUTE_KW,
            TokenKind::ACTION_KW,
        ];
        let msg = expectation_message(&kinds, "'='");
        assert!(!msg.contains("..."));
    }

    #[test]
    fn test_truncation_at_200() {
        let long = "x".repeat(400);
        let out = truncate(long);
        assert_eq!(out.len(), 200);
        assert!(out.ends_with("..."));
    }
}
