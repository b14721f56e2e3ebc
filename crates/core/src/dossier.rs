//! The callback payload built at the end of an engagement.
//!
//! Field names here are the *external* wire names (camelCase) — the
//! session's own `ExtractedIntelligence` uses snake_case set names
//! internally; `Dossier::new` in `scam-honeypot-transport` does the mapping.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// `extractedIntelligence` on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireIntelligence {
    pub bank_accounts: Vec<String>,
    pub upi_ids: Vec<String>,
    pub phishing_links: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub suspicious_keywords: Vec<String>,
}

/// The free-text notes an analyst reads; `agentNotes` on the wire is this
/// struct's `Display` rendering, not its JSON form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentNotes {
    pub category: String,
    pub engagement_count: u32,
    pub intel_summary: String,
    pub tactics: Vec<String>,
    pub risk_level: RiskLevel,
    pub behavior_tags: Vec<String>,
}

impl std::fmt::Display for AgentNotes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "category={} engagement_turns={} risk={} intel=[{}] tactics=[{}] behavior=[{}]",
            self.category,
            self.engagement_count,
            self.risk_level,
            self.intel_summary,
            self.tactics.join(", "),
            self.behavior_tags.join(", "),
        )
    }
}

/// The JSON body POSTed to `GUVI_CALLBACK_URL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dossier {
    pub session_id: String,
    pub scam_detected: bool,
    pub total_messages_exchanged: u32,
    pub extracted_intelligence: WireIntelligence,
    pub agent_notes: String,
}
