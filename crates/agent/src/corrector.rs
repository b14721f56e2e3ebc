//! C8's self-corrector: rejects generated replies that would break
//! character, regardless of which path (LLM or template) produced them.

use once_cell::sync::Lazy;
use regex::Regex;

use scam_honeypot_core::{LanguageStyle, MessageRecord, TechLiteracy};
use scam_honeypot_text_processing::detect_language_style;

/// Forbidden meta terms matched as plain substrings — safe because none of
/// these collide with ordinary English or transliterated-Hindi words.
const FORBIDDEN_SUBSTRINGS: &[&str] = &[
    "scam", "fraud", "honeypot", "nice try", "as an ai", "language model", "i cannot",
    "i'm an assistant", "law enforcement", "investigat",
];

/// Forbidden meta terms that must match as whole words. Plain substring
/// matching on bare "ai"/"bot" would reject most of the Hinglish persona
/// phrase pool: "hai", "bataiye", "chahiye" all contain "ai" as a bare
/// substring, and none of them mean "artificial intelligence".
static FORBIDDEN_WORDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(ai|bot)\b").unwrap());

const MAX_REPLY_LEN: usize = 200;
const MAX_SENTENCE_TERMINATORS: usize = 3;

/// Vocabulary that reads as formal/corporate English, implausible coming
/// from a low-tech persona.
const FORMAL_VOCABULARY: &[&str] = &[
    "furthermore", "notwithstanding", "pursuant", "henceforth", "aforementioned", "herein",
];

/// Phrases that claim the persona is occupied and can't engage right now.
const BUSY_CLAIM_PHRASES: &[&str] = &[
    "busy hoon", "i'm busy", "i am busy", "call you back", "abhi busy", "baad mein baat karta",
    "baad mein baat karungi",
];

/// Phrases that claim immediate availability, the opposite of a recent
/// busy claim.
const AVAILABILITY_PHRASES: &[&str] = &[
    "i'm free now", "i am free now", "go ahead, tell me", "haan bolo", "sun raha hoon",
    "sun rahi hoon", "tell me now",
];

const MIN_SHIFT_WORD_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    ForbiddenSubstring,
    TooLong,
    TooManySentences,
    FormalVocabularyMismatch,
    ContradictsRecentReplies,
    ClaimedBusyThenAvailable,
    LanguageStyleShift,
}

/// Checks a candidate reply against the character-consistency rules.
/// `Ok(())` means the reply is safe to send as-is.
pub fn check(
    reply: &str,
    tech_literacy: TechLiteracy,
    recent_agent_messages: &[&MessageRecord],
) -> Result<(), RejectionReason> {
    let lower = reply.to_lowercase();

    if FORBIDDEN_SUBSTRINGS.iter().any(|s| lower.contains(s)) || FORBIDDEN_WORDS_RE.is_match(&lower) {
        return Err(RejectionReason::ForbiddenSubstring);
    }

    if reply.chars().count() > MAX_REPLY_LEN {
        return Err(RejectionReason::TooLong);
    }

    let sentence_terminators = reply.chars().filter(|c| matches!(c, '.' | '!' | '?')).count();
    if sentence_terminators > MAX_SENTENCE_TERMINATORS {
        return Err(RejectionReason::TooManySentences);
    }

    if tech_literacy <= TechLiteracy::Low && FORMAL_VOCABULARY.iter().any(|w| lower.contains(w)) {
        return Err(RejectionReason::FormalVocabularyMismatch);
    }

    if contradicts_recent(&lower, recent_agent_messages) {
        return Err(RejectionReason::ContradictsRecentReplies);
    }

    if claims_sudden_availability(&lower, recent_agent_messages) {
        return Err(RejectionReason::ClaimedBusyThenAvailable);
    }

    if language_style_shift(reply, recent_agent_messages) {
        return Err(RejectionReason::LanguageStyleShift);
    }

    Ok(())
}

/// A narrow consistency check: if the agent recently claimed not to
/// understand technology, a reply that suddenly sounds technically fluent
/// (cites specific technical terms the persona wouldn't use) is rejected.
fn contradicts_recent(lower_reply: &str, recent: &[&MessageRecord]) -> bool {
    let recently_claimed_confusion = recent
        .iter()
        .any(|m| m.content.to_lowercase().contains("samajh nahi") || m.content.to_lowercase().contains("don't understand"));

    recently_claimed_confusion
        && FORMAL_VOCABULARY.iter().any(|w| lower_reply.contains(w))
}

/// A persona who just claimed to be busy shouldn't, a message later,
/// sound instantly available to keep talking.
fn claims_sudden_availability(lower_reply: &str, recent: &[&MessageRecord]) -> bool {
    let recently_claimed_busy = recent.iter().any(|m| {
        let lower = m.content.to_lowercase();
        BUSY_CLAIM_PHRASES.iter().any(|w| lower.contains(w))
    });

    recently_claimed_busy && AVAILABILITY_PHRASES.iter().any(|w| lower_reply.contains(w))
}

/// A persona whose recent turns read as Hindi-heavy shouldn't suddenly
/// switch to a long stretch of plain English.
fn language_style_shift(reply: &str, recent: &[&MessageRecord]) -> bool {
    if reply.split_whitespace().count() <= MIN_SHIFT_WORD_COUNT {
        return false;
    }
    if detect_language_style(reply) != LanguageStyle::PlainEnglish {
        return false;
    }

    recent.iter().any(|m| {
        matches!(
            detect_language_style(&m.content),
            LanguageStyle::HinglishHeavy | LanguageStyle::HinglishHeavyEnglish
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scam_honeypot_core::Role;

    fn msg(content: &str) -> MessageRecord {
        MessageRecord {
            role: Role::Agent,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn rejects_forbidden_substring() {
        let result = check("Ha ha nice try, I know this is a scam.", TechLiteracy::Medium, &[]);
        assert_eq!(result, Err(RejectionReason::ForbiddenSubstring));
    }

    #[test]
    fn rejects_standalone_ai_and_bot_words() {
        assert_eq!(
            check("Are you an AI?", TechLiteracy::Medium, &[]),
            Err(RejectionReason::ForbiddenSubstring)
        );
        assert_eq!(
            check("Talking to a bot right now?", TechLiteracy::Medium, &[]),
            Err(RejectionReason::ForbiddenSubstring)
        );
    }

    #[test]
    fn hinglish_words_containing_ai_substring_are_not_rejected() {
        let result = check(
            "Beta, mujhe samajh nahi aa raha, aap phir se bataiye na.",
            TechLiteracy::Low,
            &[],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_overlong_reply() {
        let long = "a".repeat(201);
        let result = check(&long, TechLiteracy::Medium, &[]);
        assert_eq!(result, Err(RejectionReason::TooLong));
    }

    #[test]
    fn rejects_too_many_sentences() {
        let result = check("One. Two. Three. Four.", TechLiteracy::Medium, &[]);
        assert_eq!(result, Err(RejectionReason::TooManySentences));
    }

    #[test]
    fn rejects_formal_vocabulary_for_low_tech_persona() {
        let result = check(
            "Notwithstanding your request, I shall comply forthwith.",
            TechLiteracy::VeryLow,
            &[],
        );
        assert_eq!(result, Err(RejectionReason::FormalVocabularyMismatch));
    }

    #[test]
    fn allows_formal_vocabulary_for_high_tech_persona() {
        let result = check(
            "Notwithstanding your request, let me verify this first.",
            TechLiteracy::High,
            &[],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn plain_reply_passes() {
        let result = check("Beta mujhe samajh nahi aa raha, phir se bataiye.", TechLiteracy::Low, &[]);
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_sudden_availability_after_claiming_busy() {
        let recent = vec![msg("Sorry, I'm busy right now, call you back.")];
        let recent_refs: Vec<&MessageRecord> = recent.iter().collect();
        let result = check("Okay I'm free now, go ahead, tell me.", TechLiteracy::Medium, &recent_refs);
        assert_eq!(result, Err(RejectionReason::ClaimedBusyThenAvailable));
    }

    #[test]
    fn availability_without_prior_busy_claim_passes() {
        let result = check("Okay I'm free now, go ahead, tell me.", TechLiteracy::Medium, &[]);
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_sudden_shift_to_plain_english_after_hindi_heavy_turns() {
        let recent = vec![msg("aap turant paisa bhejo warna kya hoga pata hai")];
        let recent_refs: Vec<&MessageRecord> = recent.iter().collect();
        let result = check(
            "Please give me a moment to check this account carefully first",
            TechLiteracy::Medium,
            &recent_refs,
        );
        assert_eq!(result, Err(RejectionReason::LanguageStyleShift));
    }

    #[test]
    fn short_plain_english_reply_does_not_trigger_shift_check() {
        let recent = vec![msg("aap turant paisa bhejo warna kya hoga pata hai")];
        let recent_refs: Vec<&MessageRecord> = recent.iter().collect();
        let result = check("Okay sir thank you", TechLiteracy::Medium, &recent_refs);
        assert!(result.is_ok());
    }
}
