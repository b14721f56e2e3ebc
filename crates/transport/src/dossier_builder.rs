//! Builds the callback payload (C11) from a finished session: wire-name
//! mapping, the fixed risk-score rubric, and the three behavior tags.

use scam_honeypot_config::category::category_config;
use scam_honeypot_config::keywords::{KEYWORD_TABLES, PAYMENT_PRESSURE_WORDS};
use scam_honeypot_core::{AgentNotes, Dossier, RiskLevel, Role, Session, WireIntelligence};

pub fn build(session: &Session) -> Dossier {
    let intel = &session.intelligence;
    let wire = WireIntelligence {
        bank_accounts: intel.bank_references.iter().cloned().collect(),
        upi_ids: intel.payment_handles.iter().cloned().collect(),
        phishing_links: intel.phishing_urls.iter().cloned().collect(),
        phone_numbers: intel.phone_numbers.iter().cloned().collect(),
        suspicious_keywords: intel.suspicious_keywords.iter().cloned().collect(),
    };

    let notes = build_agent_notes(session);

    Dossier {
        session_id: session.id.clone(),
        scam_detected: session.scam_detected,
        total_messages_exchanged: session.transcript.len() as u32,
        extracted_intelligence: wire,
        agent_notes: notes.to_string(),
    }
}

fn build_agent_notes(session: &Session) -> AgentNotes {
    let config = category_config(session.category);
    let score = risk_score(session);
    let risk_level = if score >= 8 {
        RiskLevel::High
    } else if score >= 4 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    AgentNotes {
        category: session.category.as_label().to_string(),
        engagement_count: session.turn_count,
        intel_summary: intel_summary(session),
        tactics: config.tactics.iter().map(|t| t.to_string()).collect(),
        risk_level,
        behavior_tags: behavior_tags(session),
    }
}

fn intel_summary(session: &Session) -> String {
    let intel = &session.intelligence;
    format!(
        "handles={} accounts={} urls={} phones={} keywords={}",
        intel.payment_handles.len(),
        intel.bank_references.len(),
        intel.phishing_urls.len(),
        intel.phone_numbers.len(),
        intel.suspicious_keywords.len()
    )
}

fn risk_score(session: &Session) -> u32 {
    let intel = &session.intelligence;
    let mut score = 0;
    if !intel.payment_handles.is_empty() {
        score += 3;
    }
    if !intel.bank_references.is_empty() {
        score += 3;
    }
    if !intel.phishing_urls.is_empty() {
        score += 4;
    }
    if !intel.phone_numbers.is_empty() {
        score += 1;
    }
    if has_high_severity_match(&intel.suspicious_keywords) {
        score += 3;
    }
    if session.turn_count >= 5 {
        score += 2;
    }
    score
}

fn has_high_severity_match(matched: &std::collections::HashSet<String>) -> bool {
    KEYWORD_TABLES
        .values()
        .flatten()
        .any(|entry| entry.high_severity && matched.contains(entry.word))
}

fn behavior_tags(session: &Session) -> Vec<String> {
    let mut tags = Vec::new();
    let scammer_messages = session.last_ingress_messages(session.transcript.len());

    let last_three = scammer_messages.iter().rev().take(3);
    let payment_pressure_count = last_three
        .filter(|m| contains_payment_word(&m.content))
        .count();
    if payment_pressure_count >= 2 {
        tags.push("payment-escalation".to_string());
    }

    if !scammer_messages.is_empty() {
        let unique: std::collections::HashSet<&str> =
            scammer_messages.iter().map(|m| m.content.as_str()).collect();
        let ratio = unique.len() as f64 / scammer_messages.len() as f64;
        if ratio < 0.7 {
            tags.push("repetitive".to_string());
        }
    }

    if scammer_messages.len() >= 5 {
        tags.push("persistent".to_string());
    }

    tags
}

fn contains_payment_word(content: &str) -> bool {
    let lower = content.to_lowercase();
    PAYMENT_PRESSURE_WORDS.iter().any(|w| lower.contains(w))
}
