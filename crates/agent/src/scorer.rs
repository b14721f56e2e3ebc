//! C2 — the scam-likelihood scorer: three independently-capped sub-scores
//! (keyword, intent, pattern) combined into a weighted total.

use once_cell::sync::Lazy;
use regex::Regex;

use scam_honeypot_config::keywords::{
    KeywordAxis, ACTION_PHRASES, KEYWORD_TABLES, VIDEO_CALL_PHRASES,
};
use scam_honeypot_core::ScamScore;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)https?://"#).unwrap());

static SHORTENER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(bit\.ly|tinyurl\.com|t\.co|goo\.gl|is\.gd)\b").unwrap()
});

static UPI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b[a-z0-9._-]{2,}@(ybl|okaxis|oksbi|okhdfcbank|paytm|upi)\b").unwrap());

static TEN_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{10}\b").unwrap());

/// Scores a single incoming message against the static keyword taxonomy.
/// `threshold` is `Settings.engagement.scam_threshold`; the caller owns
/// reading it out of config so this function stays free of I/O.
pub fn score_message(message: &str, threshold: f64) -> ScamScore {
    let lower = message.to_lowercase();

    let keyword = keyword_score(&lower);
    let intent = intent_score(&lower);
    let pattern = pattern_score(&lower);

    let total = (0.25 * keyword + 0.55 * intent + 0.2 * pattern).clamp(0.0, 1.0);
    let is_scam = total >= threshold || intent >= 0.5 || (keyword >= 0.4 && pattern >= 0.3);

    ScamScore {
        keyword,
        intent,
        pattern,
        total,
        is_scam,
    }
}

fn keyword_score(lower: &str) -> f64 {
    let mut matches = 0u32;
    let mut high_severity_matches = 0u32;
    let mut matched_categories = 0u32;
    let mut severity_sum = 0.0_f64;

    for axis in KeywordAxis::ALL {
        let entries = &KEYWORD_TABLES[&axis];
        let mut axis_matched = false;
        for entry in entries {
            if lower.contains(entry.word) {
                matches += 1;
                axis_matched = true;
                if entry.high_severity {
                    high_severity_matches += 1;
                }
                severity_sum += axis.severity_weight();
            }
        }
        if axis_matched {
            matched_categories += 1;
        }
    }

    let base = (0.15 * matches as f64 + 0.15 * high_severity_matches as f64).min(0.6);
    let bonus =
        (0.1 * matched_categories as f64 + severity_sum / 50.0).min(0.4);
    (base + bonus).clamp(0.0, 1.0)
}

fn intent_score(lower: &str) -> f64 {
    let mut total = 0.0;
    for axis in KeywordAxis::ALL {
        let entries = &KEYWORD_TABLES[&axis];
        let axis_matches = entries.iter().filter(|e| lower.contains(e.word)).count() as f64;
        if axis_matches > 0.0 {
            let contribution = (axis.intent_weight() * axis_matches).min(axis.intent_cap());
            total += contribution;
        }
    }
    total.clamp(0.0, 1.0)
}

fn pattern_score(lower: &str) -> f64 {
    let mut score = 0.0;

    if URL_RE.is_match(lower) {
        score += 0.2;
    }
    if SHORTENER_RE.is_match(lower) {
        score += 0.15;
    }
    if UPI_RE.is_match(lower) {
        score += 0.3;
    }
    if TEN_DIGIT_RE.is_match(lower) {
        score += 0.1;
    }
    if ACTION_PHRASES.iter().any(|p| lower.contains(p)) {
        score += 0.2;
    }
    if VIDEO_CALL_PHRASES.iter().any(|p| lower.contains(p)) {
        score += 0.25;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_message_scores_low() {
        let score = score_message("Hey, are we still on for lunch tomorrow?", 0.7);
        assert!(!score.is_scam);
        assert!(score.total < 0.3);
    }

    #[test]
    fn digital_arrest_message_scores_high() {
        let score = score_message(
            "This is CBI officer calling, you are under digital arrest, do not disconnect \
             the call or legal action will be taken against you immediately.",
            0.7,
        );
        assert!(score.is_scam);
        assert!(score.intent >= 0.5);
    }

    #[test]
    fn upi_handle_contributes_to_pattern_score() {
        let with_upi = pattern_score("please pay to scammer@ybl right now");
        let without = pattern_score("please pay right now");
        assert!(with_upi > without);
    }

    #[test]
    fn keyword_score_is_capped() {
        let lower = "urgent urgently immediately right now last warning final notice \
             today only within 24 hours expire expiring act now time sensitive"
            .to_lowercase();
        assert!(keyword_score(&lower) <= 1.0);
    }

    #[test]
    fn high_keyword_and_pattern_without_strong_intent_is_still_scam() {
        // Keyword axis terms without crossing into credential/digital-arrest
        // intent territory, but with a URL and action phrase present.
        let score = score_message(
            "urgent: account blocked, pay now, click here http://example.com/verify",
            0.9,
        );
        assert!(score.keyword >= 0.4);
        assert!(score.pattern >= 0.3);
        assert!(score.is_scam);
    }
}
