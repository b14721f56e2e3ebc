//! The `Session` record and the closed sum types that tag it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who sent a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Scammer,
    Agent,
}

/// One line of the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// The coarse persona-style tag carried on the session, independent of the
/// specific persona type selected from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaStyle {
    Anxious,
    #[default]
    Confused,
    Cooperative,
}

/// The twelve catalog persona types (see `scam-honeypot-config::persona`).
/// `TechNaive` is the fallback variant for callers that select a persona
/// before a category has been classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaType {
    ElderlyAnxious,
    #[default]
    TechNaive,
    DesperateJobseeker,
    GreedyInvestor,
    WorriedParent,
    RuralFarmer,
    YoungStudent,
    BusyProfessional,
    LonelySenior,
    FirstTimeSeller,
    ScaredVictim,
    TrustingHousewife,
}

/// The scam-category taxonomy. `Unknown` is the fallback for messages that
/// don't match any category's keyword set, or haven't been classified yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScamCategory {
    DigitalArrest,
    KycPhishing,
    InvestmentFraud,
    JobScam,
    CustomsParcel,
    RomanceScam,
    Sextortion,
    QrCodeScam,
    LotteryScam,
    LoanFraud,
    TechSupportScam,
    InsuranceFraud,
    ElectricityDisconnection,
    OnlineShoppingFraud,
    SocialMediaImpersonation,
    #[default]
    Unknown,
}

impl ScamCategory {
    /// All non-fallback categories, in declaration order (used for
    /// tie-breaking and for the category-keyword table iteration order).
    pub const ALL: &'static [ScamCategory] = &[
        ScamCategory::DigitalArrest,
        ScamCategory::KycPhishing,
        ScamCategory::InvestmentFraud,
        ScamCategory::JobScam,
        ScamCategory::CustomsParcel,
        ScamCategory::RomanceScam,
        ScamCategory::Sextortion,
        ScamCategory::QrCodeScam,
        ScamCategory::LotteryScam,
        ScamCategory::LoanFraud,
        ScamCategory::TechSupportScam,
        ScamCategory::InsuranceFraud,
        ScamCategory::ElectricityDisconnection,
        ScamCategory::OnlineShoppingFraud,
        ScamCategory::SocialMediaImpersonation,
    ];

    pub fn as_label(&self) -> &'static str {
        match self {
            ScamCategory::DigitalArrest => "digital_arrest",
            ScamCategory::KycPhishing => "kyc_phishing",
            ScamCategory::InvestmentFraud => "investment_fraud",
            ScamCategory::JobScam => "job_scam",
            ScamCategory::CustomsParcel => "customs_parcel",
            ScamCategory::RomanceScam => "romance_scam",
            ScamCategory::Sextortion => "sextortion",
            ScamCategory::QrCodeScam => "qr_code_scam",
            ScamCategory::LotteryScam => "lottery_scam",
            ScamCategory::LoanFraud => "loan_fraud",
            ScamCategory::TechSupportScam => "tech_support_scam",
            ScamCategory::InsuranceFraud => "insurance_fraud",
            ScamCategory::ElectricityDisconnection => "electricity_disconnection",
            ScamCategory::OnlineShoppingFraud => "online_shopping_fraud",
            ScamCategory::SocialMediaImpersonation => "social_media_impersonation",
            ScamCategory::Unknown => "unknown",
        }
    }
}

/// Tech-literacy tag on a persona profile; drives the self-corrector's
/// "formal vocabulary" rejection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechLiteracy {
    VeryLow,
    Low,
    Medium,
    High,
}

/// The register used when sampling phrase pools / writing the LLM prompt.
/// `HinglishHeavyEnglish` is the fallback for mixed or unrecognized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageStyle {
    PlainEnglish,
    HinglishLight,
    HinglishHeavy,
    #[default]
    HinglishHeavyEnglish,
}

/// The engagement pipeline's per-session state machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementState {
    #[default]
    Idle,
    Engaging,
    Terminating,
    Ended,
}

/// Three-axis scam score plus the derived boolean.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScamScore {
    pub keyword: f64,
    pub intent: f64,
    pub pattern: f64,
    pub total: f64,
    pub is_scam: bool,
}

/// The five unordered artifact sets mined from a conversation.
///
/// Invariant: entries are deduplicated after normalization and the sets
/// only ever grow within a session (insertion-only union via `merge`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedIntelligence {
    pub payment_handles: HashSet<String>,
    pub phone_numbers: HashSet<String>,
    pub phishing_urls: HashSet<String>,
    pub bank_references: HashSet<String>,
    pub suspicious_keywords: HashSet<String>,
}

impl ExtractedIntelligence {
    /// Unions `other` into `self`. Never removes anything already present.
    pub fn merge(&mut self, other: &ExtractedIntelligence) {
        self.payment_handles
            .extend(other.payment_handles.iter().cloned());
        self.phone_numbers
            .extend(other.phone_numbers.iter().cloned());
        self.phishing_urls
            .extend(other.phishing_urls.iter().cloned());
        self.bank_references
            .extend(other.bank_references.iter().cloned());
        self.suspicious_keywords
            .extend(other.suspicious_keywords.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.payment_handles.len()
            + self.phone_numbers.len()
            + self.phishing_urls.len()
            + self.bank_references.len()
            + self.suspicious_keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single conversation with one flagged (or not-yet-flagged) counterparty.
///
/// Mutated only by the engagement pipeline under the session's lock; see
/// `scam-honeypot-persistence::locks::LockManager`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub state: EngagementState,
    pub persona_style: PersonaStyle,
    pub persona_type: PersonaType,
    pub category: ScamCategory,
    pub turn_count: u32,
    pub confidence: f64,
    pub scam_detected: bool,
    pub engagement_active: bool,
    pub transcript: Vec<MessageRecord>,
    pub intelligence: ExtractedIntelligence,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Session {
            id: id.into(),
            state: EngagementState::Idle,
            persona_style: PersonaStyle::default(),
            persona_type: PersonaType::default(),
            category: ScamCategory::default(),
            turn_count: 0,
            confidence: 0.0,
            scam_detected: false,
            engagement_active: true,
            transcript: Vec::new(),
            intelligence: ExtractedIntelligence::default(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Records an ingress message. Increments `turn_count` exactly once,
    /// regardless of how the caller originally labeled the sender's role —
    /// the pipeline normalizes every ingress to `Role::Scammer` before this
    /// is called.
    pub fn record_ingress(&mut self, content: impl Into<String>) {
        self.transcript.push(MessageRecord {
            role: Role::Scammer,
            content: content.into(),
            timestamp: Utc::now(),
        });
        self.turn_count += 1;
        self.touch();
    }

    /// Records the agent's reply. Never increments `turn_count`.
    pub fn record_agent_reply(&mut self, content: impl Into<String>) {
        self.transcript.push(MessageRecord {
            role: Role::Agent,
            content: content.into(),
            timestamp: Utc::now(),
        });
        self.touch();
    }

    /// Sticky true: once set, `mark_scam_detected` is idempotent.
    pub fn mark_scam_detected(&mut self) {
        if !self.scam_detected {
            self.scam_detected = true;
            self.touch();
        }
    }

    /// Sticky false: once `engagement_active` is false it can never be set
    /// back to true.
    pub fn deactivate_engagement(&mut self) {
        if self.engagement_active {
            self.engagement_active = false;
            self.touch();
        }
    }

    pub fn merge_intelligence(&mut self, fresh: &ExtractedIntelligence) {
        let before = self.intelligence.len();
        self.intelligence.merge(fresh);
        if self.intelligence.len() != before {
            self.touch();
        }
    }

    /// The last `n` scammer-role messages, most recent last.
    pub fn last_ingress_messages(&self, n: usize) -> Vec<&MessageRecord> {
        self.transcript
            .iter()
            .filter(|m| m.role == Role::Scammer)
            .rev()
            .take(n)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    /// The last `n` agent-role messages, most recent last.
    pub fn last_agent_messages(&self, n: usize) -> Vec<&MessageRecord> {
        self.transcript
            .iter()
            .filter(|m| m.role == Role::Agent)
            .rev()
            .take(n)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    fn touch(&mut self) {
        let now = Utc::now();
        // last_updated is monotonic non-decreasing even if the system
        // clock is ever observed to go backwards between two calls.
        if now > self.last_updated {
            self.last_updated = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingress_increments_turn_count_once() {
        let mut s = Session::new("abc");
        s.record_ingress("hello");
        assert_eq!(s.turn_count, 1);
        s.record_agent_reply("hi there");
        assert_eq!(s.turn_count, 1);
    }

    #[test]
    fn deactivate_engagement_is_idempotent() {
        let mut s = Session::new("abc");
        s.deactivate_engagement();
        assert!(!s.engagement_active);
        let after_first = s.last_updated;
        s.deactivate_engagement();
        assert!(!s.engagement_active);
        assert_eq!(s.last_updated, after_first);
    }

    #[test]
    fn intelligence_merge_is_insertion_only() {
        let mut s = Session::new("abc");
        let mut fresh = ExtractedIntelligence::default();
        fresh.phone_numbers.insert("+919876543210".into());
        s.merge_intelligence(&fresh);
        assert_eq!(s.intelligence.len(), 1);
        s.merge_intelligence(&ExtractedIntelligence::default());
        assert_eq!(s.intelligence.len(), 1);
    }
}
