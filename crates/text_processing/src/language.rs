//! C6 — lightweight language-style classification.
//!
//! A heuristic over a fixed marker-word list, not a model: no suspension
//! points, no external dependency, safe to call synchronously from inside
//! a held session lock.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use scam_honeypot_core::LanguageStyle;

/// Romanized Hindi function words and particles common in Hinglish text
/// messages. Deliberately small — this is a register hint, not a parser.
static HINDI_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "hai", "hain", "nahi", "nahin", "kya", "kyun", "kyon", "aap", "aapka", "aapko", "mera",
        "meri", "mujhe", "tumhara", "karo", "karna", "kijiye", "kar", "bhai", "sahab", "sahib",
        "ji", "bhejo", "bhej", "paisa", "paise", "rupaye", "turant", "abhi", "jaldi", "accha",
        "theek", "thik", "bahut", "sab", "koi", "kuch", "yeh", "woh", "hoga", "hogi", "chahiye",
    ]
    .into_iter()
    .collect()
});

fn tokenize(message: &str) -> Vec<String> {
    message
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Classifies a message into a closed language-style tag used to pick the
/// generator's phrase-pool register.
pub fn detect_language_style(message: &str) -> LanguageStyle {
    let tokens = tokenize(message);
    if tokens.is_empty() {
        return LanguageStyle::default();
    }

    let non_ascii_tokens = tokens.iter().filter(|t| !t.is_ascii()).count();
    let hindi_marker_tokens = tokens
        .iter()
        .filter(|t| HINDI_MARKERS.contains(t.as_str()))
        .count();
    let hindi_weight = non_ascii_tokens + hindi_marker_tokens;
    let ratio = hindi_weight as f64 / tokens.len() as f64;

    if ratio == 0.0 {
        LanguageStyle::PlainEnglish
    } else if ratio < 0.2 {
        LanguageStyle::HinglishLight
    } else if ratio < 0.5 {
        LanguageStyle::HinglishHeavy
    } else {
        LanguageStyle::HinglishHeavyEnglish
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_english_has_no_markers() {
        let style = detect_language_style("Please send the payment immediately to this account");
        assert_eq!(style, LanguageStyle::PlainEnglish);
    }

    #[test]
    fn light_hinglish_single_marker() {
        let style = detect_language_style(
            "Please send the payment today, bhai, before the deadline passes tomorrow",
        );
        assert_eq!(style, LanguageStyle::HinglishLight);
    }

    #[test]
    fn heavy_hinglish_many_markers() {
        let style = detect_language_style("aap turant paisa bhejo warna kya hoga pata hai");
        assert!(matches!(
            style,
            LanguageStyle::HinglishHeavy | LanguageStyle::HinglishHeavyEnglish
        ));
    }

    #[test]
    fn empty_message_falls_back_to_default() {
        let style = detect_language_style("   ");
        assert_eq!(style, LanguageStyle::default());
    }
}
