//! C10's input half: session-id/message validation, control-character and
//! special-character sanitization, phone/handle normalization, and
//! probe/honeypot-detector phrase matching. All pure string operations —
//! the stateful half (per-client rate analysis, outbound header scrub) sits
//! in the HTTP server crate, which owns the request metadata this half
//! doesn't need.

use once_cell::sync::Lazy;
use regex::Regex;

static SESSION_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,256}$").unwrap());

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+?91[\s-]?)?([6-9]\d{9})\b").unwrap());

/// Phrases a probe or automated scam-detector might send to test the
/// endpoint, distinct from anything a real fraudster would type.
static PROBE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)honeypot",
        r"(?i)scam.?detect",
        r"(?i)\btrap\b",
        r"(?i)is this (a )?bot",
        r"(?i)are you (an? )?(ai|bot|human)",
        r"(?i)\btest(ing)?\s+(probe|payload|injection)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Control bytes (minus ordinary whitespace) and characters that have no
/// business in a chat message but are common injection/markup vectors.
const CONTROL_EXEMPT: &[char] = &['\t', '\n', '\r'];
const STRIPPED_SPECIAL_CHARS: &[char] = &['<', '>', '"', '\'', ';', '\\'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidSessionId,
    MessageTooShort,
    MessageTooLong,
}

const MAX_MESSAGE_LEN: usize = 10_000;

/// Validates a session identifier against `[A-Za-z0-9_-]{1,256}`.
pub fn validate_session_id(id: &str) -> Result<(), ValidationError> {
    if SESSION_ID_RE.is_match(id) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSessionId)
    }
}

/// Validates message length in `[1, 10000]` characters.
pub fn validate_message_length(message: &str) -> Result<(), ValidationError> {
    let len = message.chars().count();
    if len == 0 {
        Err(ValidationError::MessageTooShort)
    } else if len > MAX_MESSAGE_LEN {
        Err(ValidationError::MessageTooLong)
    } else {
        Ok(())
    }
}

/// Strips control bytes (`U+0000`-`U+001F`, excluding tab/newline/CR) and a
/// small set of markup/injection-prone special characters.
pub fn sanitize_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let is_stripped_control = c.is_control() && !CONTROL_EXEMPT.contains(c);
            let is_stripped_special = STRIPPED_SPECIAL_CHARS.contains(c);
            !is_stripped_control && !is_stripped_special
        })
        .collect()
}

/// Normalizes every Indian-format phone number found in `text` to
/// `+91XXXXXXXXXX`, leaving everything else untouched. Idempotent:
/// normalizing an already-normalized phone number returns it unchanged.
pub fn normalize_phones(text: &str) -> String {
    let bytes = text.as_bytes();
    PHONE_RE
        .replace_all(text, |caps: &regex::Captures| {
            let whole = caps.get(0).unwrap();
            let digits = caps.get(1).unwrap();
            let prefix_consumed = whole.start() < digits.start();
            if !prefix_consumed {
                let preceded_by_digit =
                    whole.start() > 0 && bytes[whole.start() - 1].is_ascii_digit();
                if preceded_by_digit {
                    return whole.as_str().to_string();
                }
            }
            format!("+91{}", digits.as_str())
        })
        .into_owned()
}

/// Lowercases a payment handle (`<alias>@<psp>`) for stable deduplication.
pub fn normalize_handle(handle: &str) -> String {
    handle.to_lowercase()
}

/// Flags a message that reads like a probe testing for honeypot/bot
/// behavior rather than an attempted scam.
pub fn is_probe_message(message: &str) -> bool {
    PROBE_PATTERNS.iter().any(|re| re.is_match(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_session_ids_pass() {
        assert!(validate_session_id("abc-123_XYZ").is_ok());
        assert!(validate_session_id("a").is_ok());
    }

    #[test]
    fn session_ids_with_bad_characters_fail() {
        assert_eq!(
            validate_session_id("abc def"),
            Err(ValidationError::InvalidSessionId)
        );
        assert_eq!(
            validate_session_id(""),
            Err(ValidationError::InvalidSessionId)
        );
    }

    #[test]
    fn overlong_session_id_fails() {
        let id = "a".repeat(257);
        assert_eq!(
            validate_session_id(&id),
            Err(ValidationError::InvalidSessionId)
        );
    }

    #[test]
    fn empty_message_is_rejected() {
        assert_eq!(
            validate_message_length(""),
            Err(ValidationError::MessageTooShort)
        );
    }

    #[test]
    fn overlong_message_is_rejected() {
        let message = "a".repeat(10_001);
        assert_eq!(
            validate_message_length(&message),
            Err(ValidationError::MessageTooLong)
        );
    }

    #[test]
    fn sanitize_strips_control_bytes_and_special_chars() {
        let dirty = "hello\u{0007}<script>\"alert\";\\ world";
        let clean = sanitize_message(dirty);
        assert!(!clean.contains('\u{0007}'));
        assert!(!clean.contains(['<', '>', '"', ';', '\\']));
        assert!(clean.contains("hello"));
        assert!(clean.contains("world"));
    }

    #[test]
    fn sanitize_preserves_ordinary_whitespace() {
        let clean = sanitize_message("line one\nline two\ttabbed");
        assert!(clean.contains('\n'));
        assert!(clean.contains('\t'));
    }

    #[test]
    fn phone_normalization_round_trip_is_idempotent() {
        let once = normalize_phones("call me on 9876543210");
        let twice = normalize_phones(&once);
        assert_eq!(once, twice);
        assert!(once.contains("+919876543210"));
    }

    #[test]
    fn contiguous_country_code_prefix_normalizes() {
        let normalized = normalize_phones("whatsapp me on +919876543210 now");
        assert!(normalized.contains("+919876543210"));
    }

    #[test]
    fn probe_phrases_are_flagged() {
        assert!(is_probe_message("Is this a honeypot?"));
        assert!(is_probe_message("are you an AI"));
        assert!(!is_probe_message("please send the otp now"));
    }
}
