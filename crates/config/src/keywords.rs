//! C1 — static keyword taxonomies with per-axis severity weights.
//!
//! Five keyword axes: `urgency`, `threat`, `payment`, `credential`, and
//! `india-pattern` — the last one covers the authority-impersonation /
//! digital-arrest phrasing characteristic of this fraud pattern, so it is
//! modeled here as the `DigitalArrest` axis; the same axis doubles as the
//! "digital-arrest" bucket the scam scorer's intent-score formula weights
//! most heavily. Declared once as `once_cell::sync::Lazy` static data,
//! never recomputed per call.

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordAxis {
    Urgency,
    Threat,
    Payment,
    Credential,
    DigitalArrest,
}

impl KeywordAxis {
    pub const ALL: [KeywordAxis; 5] = [
        KeywordAxis::Urgency,
        KeywordAxis::Threat,
        KeywordAxis::Payment,
        KeywordAxis::Credential,
        KeywordAxis::DigitalArrest,
    ];

    /// Per-match weight used by the scam scorer's intent-score formula.
    pub fn intent_weight(&self) -> f64 {
        match self {
            KeywordAxis::DigitalArrest => 0.4,
            KeywordAxis::Credential => 0.3,
            KeywordAxis::Threat => 0.25,
            KeywordAxis::Payment => 0.2,
            KeywordAxis::Urgency => 0.15,
        }
    }

    /// Per-axis cap on the intent-score contribution.
    pub fn intent_cap(&self) -> f64 {
        match self {
            KeywordAxis::DigitalArrest => 0.8,
            KeywordAxis::Credential => 0.6,
            KeywordAxis::Threat => 0.5,
            KeywordAxis::Payment => 0.4,
            KeywordAxis::Urgency => 0.3,
        }
    }

    /// Severity weight used for the keyword-score category bonus's
    /// `severity_sum / 50` term.
    pub fn severity_weight(&self) -> f64 {
        self.intent_weight() * 10.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordEntry {
    pub word: &'static str,
    pub high_severity: bool,
}

pub static KEYWORD_TABLES: Lazy<HashMap<KeywordAxis, Vec<KeywordEntry>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        KeywordAxis::Urgency,
        vec![
            KeywordEntry { word: "urgent", high_severity: false },
            KeywordEntry { word: "urgently", high_severity: false },
            KeywordEntry { word: "immediately", high_severity: false },
            KeywordEntry { word: "right now", high_severity: false },
            KeywordEntry { word: "last warning", high_severity: true },
            KeywordEntry { word: "final notice", high_severity: true },
            KeywordEntry { word: "today only", high_severity: false },
            KeywordEntry { word: "within 24 hours", high_severity: false },
            KeywordEntry { word: "expire", high_severity: false },
            KeywordEntry { word: "expiring", high_severity: false },
            KeywordEntry { word: "act now", high_severity: false },
            KeywordEntry { word: "time sensitive", high_severity: false },
        ],
    );
    m.insert(
        KeywordAxis::Threat,
        vec![
            KeywordEntry { word: "account blocked", high_severity: false },
            KeywordEntry { word: "account suspended", high_severity: false },
            KeywordEntry { word: "account will be blocked", high_severity: false },
            KeywordEntry { word: "legal action", high_severity: true },
            KeywordEntry { word: "arrest warrant", high_severity: true },
            KeywordEntry { word: "you will be arrested", high_severity: true },
            KeywordEntry { word: "police complaint", high_severity: true },
            KeywordEntry { word: "fir registered", high_severity: true },
            KeywordEntry { word: "case filed against you", high_severity: true },
            KeywordEntry { word: "sim will be blocked", high_severity: false },
            KeywordEntry { word: "service disconnected", high_severity: false },
        ],
    );
    m.insert(
        KeywordAxis::Payment,
        vec![
            KeywordEntry { word: "pay", high_severity: false },
            KeywordEntry { word: "send", high_severity: false },
            KeywordEntry { word: "transfer", high_severity: false },
            KeywordEntry { word: "deposit", high_severity: false },
            KeywordEntry { word: "processing fee", high_severity: false },
            KeywordEntry { word: "advance payment", high_severity: false },
            KeywordEntry { word: "refundable deposit", high_severity: false },
            KeywordEntry { word: "customs duty", high_severity: false },
            KeywordEntry { word: "clearance fee", high_severity: false },
            KeywordEntry { word: "registration fee", high_severity: false },
            KeywordEntry { word: "pay now", high_severity: false },
        ],
    );
    m.insert(
        KeywordAxis::Credential,
        vec![
            KeywordEntry { word: "otp", high_severity: false },
            KeywordEntry { word: "cvv", high_severity: true },
            KeywordEntry { word: "pin", high_severity: true },
            KeywordEntry { word: "password", high_severity: true },
            KeywordEntry { word: "kyc", high_severity: false },
            KeywordEntry { word: "verify kyc", high_severity: false },
            KeywordEntry { word: "aadhaar number", high_severity: true },
            KeywordEntry { word: "pan card", high_severity: false },
            KeywordEntry { word: "net banking login", high_severity: true },
            KeywordEntry { word: "card number", high_severity: true },
            KeywordEntry { word: "one time password", high_severity: false },
        ],
    );
    m.insert(
        KeywordAxis::DigitalArrest,
        vec![
            KeywordEntry { word: "cbi officer", high_severity: true },
            KeywordEntry { word: "customs officer", high_severity: false },
            KeywordEntry { word: "rbi officer", high_severity: true },
            KeywordEntry { word: "trai officer", high_severity: false },
            KeywordEntry { word: "digital arrest", high_severity: true },
            KeywordEntry { word: "video call verification", high_severity: true },
            KeywordEntry { word: "stay on the call", high_severity: true },
            KeywordEntry { word: "do not disconnect", high_severity: true },
            KeywordEntry { word: "money laundering case", high_severity: true },
            KeywordEntry { word: "narcotics parcel", high_severity: true },
            KeywordEntry { word: "government authority", high_severity: false },
        ],
    );
    m
});

/// All keyword strings across every axis, used by the category classifier
/// and the artifact extractor's keyword sub-extractor.
pub fn all_keywords() -> impl Iterator<Item = &'static str> {
    KEYWORD_TABLES.values().flatten().map(|e| e.word)
}

/// Keywords whose presence in a message counts toward payment-pressure
/// detection in the strategy engine (C7, step 3).
pub const PAYMENT_PRESSURE_WORDS: &[&str] = &["pay", "send", "transfer", "now", "immediately"];

/// Keywords whose presence in the *incoming* message triggers the
/// context-adaptive stall short-circuit in the response generator (C8).
pub const SENSITIVE_REQUEST_WORDS: &[&str] = &[
    "otp", "pin", "password", "cvv", "upi", "transfer", "payment", "send money",
];

/// Action-phrase fragments contributing to the scam scorer's pattern score.
pub const ACTION_PHRASES: &[&str] = &["click here", "scan qr", "download app"];

/// Video-call phrases contributing to the scam scorer's pattern score.
pub const VIDEO_CALL_PHRASES: &[&str] = &[
    "video call",
    "stay on video",
    "keep camera on",
    "video verification",
];

/// Banking-context keywords required for the account-number sub-extractor
/// (C4) to accept a 9-18 digit candidate.
pub const BANKING_CONTEXT_WORDS: &[&str] = &[
    "account",
    "a/c",
    "acc",
    "bank",
    "ifsc",
    "neft",
    "imps",
    "rtgs",
    "transfer",
    "balance",
    "credited",
    "debited",
    "transaction",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_axes_present() {
        for axis in KeywordAxis::ALL {
            assert!(!KEYWORD_TABLES[&axis].is_empty());
        }
    }

    #[test]
    fn kyc_scenario_keywords_are_registered() {
        let words: Vec<&str> = all_keywords().collect();
        assert!(words.contains(&"otp"));
        assert!(words.contains(&"kyc"));
        assert!(words.contains(&"immediately"));
        assert!(words.contains(&"account blocked"));
    }
}
