//! C3 — scam-category classification against the static category catalog.
//!
//! Scores every category from the incoming message plus the session's
//! accumulated keyword intelligence, then picks the argmax with a
//! declaration-order tiebreak. A message that matches nothing classifies
//! as `Unknown` with zero confidence.

use std::collections::HashSet;

use scam_honeypot_config::category::{all_category_configs, category_config};
use scam_honeypot_core::ScamCategory;

/// Scores each category as `2*(keyword in message) + 1*(keyword in the
/// session's accumulated keyword set)`, normalized by `/4` and clamped to
/// `[0, 1]`. Returns the highest-scoring category and its confidence, or
/// `(Unknown, 0.0)` if every category scores zero.
pub fn classify(message: &str, accumulated_keywords: &HashSet<String>) -> (ScamCategory, f64) {
    let lower = message.to_lowercase();

    let mut best = (ScamCategory::Unknown, 0.0_f64);

    for &category in ScamCategory::ALL {
        let cfg = category_config(category);
        let mut raw = 0.0_f64;
        for &kw in cfg.keywords {
            if lower.contains(kw) {
                raw += 2.0;
            }
            if accumulated_keywords.iter().any(|k| k == kw) {
                raw += 1.0;
            }
        }
        let score = (raw / 4.0).clamp(0.0, 1.0);
        if score > best.1 {
            best = (category, score);
        }
    }

    best
}

/// Total number of catalog entries, exposed for sanity tests and
/// dashboards that need to iterate the full category set.
pub fn category_count() -> usize {
    all_category_configs().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keyword_match_is_unknown() {
        let (category, confidence) = classify("What time works for you tomorrow?", &HashSet::new());
        assert_eq!(category, ScamCategory::Unknown);
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn digital_arrest_phrase_classifies_correctly() {
        let (category, confidence) =
            classify("This is a CBI officer, you are under digital arrest", &HashSet::new());
        assert_eq!(category, ScamCategory::DigitalArrest);
        assert!(confidence > 0.0);
    }

    #[test]
    fn accumulated_keywords_boost_confidence() {
        let mut accumulated = HashSet::new();
        accumulated.insert("kyc".to_string());
        accumulated.insert("account blocked".to_string());

        let (category, confidence) = classify("please update kyc today", &accumulated);
        assert_eq!(category, ScamCategory::KycPhishing);
        assert!(confidence > 0.5);
    }

    #[test]
    fn catalog_has_sixteen_entries() {
        assert_eq!(category_count(), 16);
    }
}
