//! C7 — the strategy engine: should the engagement continue, and what's
//! the conversational state the response generator should lean into.

use scam_honeypot_config::category::category_config;
use scam_honeypot_config::keywords::PAYMENT_PRESSURE_WORDS;
use scam_honeypot_core::{ExtractedIntelligence, ScamCategory, Session};

/// Why the strategy engine decided to stop an engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    MaxTurnsReached,
    SufficientIntel,
    PaymentPressure,
}

impl StopReason {
    pub fn as_label(&self) -> &'static str {
        match self {
            StopReason::MaxTurnsReached => "max_turns",
            StopReason::SufficientIntel => "sufficient_intel",
            StopReason::PaymentPressure => "payment_pressure",
        }
    }
}

/// Decides whether the engagement should continue for another turn.
///
/// Evaluated in order: the smaller of the category's configured turn
/// budget and the process-wide `MAX_ENGAGEMENT_TURNS` ceiling, then an
/// intel-sufficiency score (payment handles/bank references/phishing
/// URLs/phone numbers, each weighted, gated on at least three turns
/// elapsed so a single lucky early message doesn't truncate the
/// conversation before any rapport is built), then a payment-pressure
/// pattern across the most recent scammer messages.
pub fn should_continue(
    session: &Session,
    category: ScamCategory,
    intel: &ExtractedIntelligence,
    global_max_turns: u32,
) -> (bool, Option<StopReason>) {
    let cfg = category_config(category);
    let max_turns = cfg.max_turns.min(global_max_turns);
    if session.turn_count >= max_turns {
        return (false, Some(StopReason::MaxTurnsReached));
    }

    let intel_score = 3 * intel.payment_handles.len() as u32
        + 3 * intel.bank_references.len() as u32
        + 4 * intel.phishing_urls.len() as u32
        + intel.phone_numbers.len() as u32;
    if intel_score >= 7 && session.turn_count >= 3 {
        return (false, Some(StopReason::SufficientIntel));
    }

    let recent = session.last_ingress_messages(4);
    let pressure_hits = recent
        .iter()
        .filter(|m| {
            let lower = m.content.to_lowercase();
            PAYMENT_PRESSURE_WORDS.iter().any(|w| lower.contains(w))
        })
        .count();
    if pressure_hits >= 3 {
        return (false, Some(StopReason::PaymentPressure));
    }

    (true, None)
}

/// A coarse snapshot of the conversation's emotional/tactical shape over
/// the last few scammer turns, used to bias the response generator.
#[derive(Debug, Clone, Default)]
pub struct FlowSnapshot {
    pub urgency_hits: u32,
    pub threat_hits: u32,
    pub info_request_hits: u32,
    pub compliance_hits: u32,
    pub emotional_state: EmotionalState,
    pub pending_action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmotionalState {
    #[default]
    Neutral,
    Anxious,
    Pressured,
    Compliant,
}

const INFO_REQUEST_WORDS: &[&str] = &["otp", "pin", "cvv", "password", "account number", "aadhaar"];
const COMPLIANCE_WORDS: &[&str] = &["okay", "yes sir", "theek hai", "done", "sent"];

/// Scans the last (at most) eight scammer messages for the tactical/
/// emotional signals the response generator leans on.
pub fn analyze_flow(session: &Session) -> FlowSnapshot {
    let messages = session.last_ingress_messages(8);
    let mut snapshot = FlowSnapshot::default();

    for msg in &messages {
        let lower = msg.content.to_lowercase();
        if scam_honeypot_config::keywords::KEYWORD_TABLES[&scam_honeypot_config::keywords::KeywordAxis::Urgency]
            .iter()
            .any(|e| lower.contains(e.word))
        {
            snapshot.urgency_hits += 1;
        }
        if scam_honeypot_config::keywords::KEYWORD_TABLES[&scam_honeypot_config::keywords::KeywordAxis::Threat]
            .iter()
            .any(|e| lower.contains(e.word))
        {
            snapshot.threat_hits += 1;
        }
        if INFO_REQUEST_WORDS.iter().any(|w| lower.contains(w)) {
            snapshot.info_request_hits += 1;
        }
        if COMPLIANCE_WORDS.iter().any(|w| lower.contains(w)) {
            snapshot.compliance_hits += 1;
        }
    }

    snapshot.emotional_state = if snapshot.threat_hits >= 2 {
        EmotionalState::Pressured
    } else if snapshot.urgency_hits >= 2 {
        EmotionalState::Anxious
    } else if snapshot.compliance_hits >= 1 {
        EmotionalState::Compliant
    } else {
        EmotionalState::Neutral
    };

    snapshot.pending_action = if snapshot.info_request_hits > 0 {
        Some("credential_request".to_string())
    } else {
        None
    };

    snapshot
}

/// A short hint string describing how the generator should play the next
/// turn, derived from the flow snapshot and how far into the engagement
/// the session is.
pub fn response_hint(snapshot: &FlowSnapshot, turn_count: u32) -> String {
    let stance = match snapshot.emotional_state {
        EmotionalState::Pressured => "show fear and reluctant compliance",
        EmotionalState::Anxious => "sound flustered and ask for clarification",
        EmotionalState::Compliant => "stay cooperative but slow the pace down",
        EmotionalState::Neutral => "stay mildly confused and curious",
    };

    let pacing = if turn_count <= 2 {
        "early turn: establish the persona's voice"
    } else if turn_count <= 6 {
        "mid engagement: stall for detail without refusing outright"
    } else {
        "late engagement: introduce a plausible delay or distraction"
    };

    match &snapshot.pending_action {
        Some(action) if action == "credential_request" => {
            format!("{stance}; {pacing}; stall on the credential request without refusing outright")
        }
        _ => format!("{stance}; {pacing}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scam_honeypot_core::Session;

    #[test]
    fn stops_at_category_max_turns() {
        let mut session = Session::new("s1");
        session.turn_count = 12;
        let (cont, reason) =
            should_continue(&session, ScamCategory::DigitalArrest, &ExtractedIntelligence::default(), 15);
        assert!(!cont);
        assert_eq!(reason, Some(StopReason::MaxTurnsReached));
    }

    #[test]
    fn stops_once_intel_is_sufficient_after_minimum_turns() {
        let mut session = Session::new("s1");
        session.turn_count = 3;
        let mut intel = ExtractedIntelligence::default();
        intel.bank_references.insert("123456789012".into());
        intel.phishing_urls.insert("http://evil.example/x".into());
        let (cont, reason) = should_continue(&session, ScamCategory::KycPhishing, &intel, 15);
        assert!(!cont);
        assert_eq!(reason, Some(StopReason::SufficientIntel));
    }

    #[test]
    fn sufficient_intel_does_not_truncate_before_minimum_turns() {
        let mut session = Session::new("s1");
        session.turn_count = 1;
        let mut intel = ExtractedIntelligence::default();
        intel.bank_references.insert("123456789012".into());
        intel.phishing_urls.insert("http://evil.example/x".into());
        let (cont, _) = should_continue(&session, ScamCategory::KycPhishing, &intel, 15);
        assert!(cont);
    }

    #[test]
    fn payment_pressure_across_recent_turns_stops_engagement() {
        let mut session = Session::new("s1");
        session.record_ingress("please pay now");
        session.record_ingress("send the transfer immediately");
        session.record_ingress("pay now or else");
        let (cont, reason) =
            should_continue(&session, ScamCategory::KycPhishing, &ExtractedIntelligence::default(), 15);
        assert!(!cont);
        assert_eq!(reason, Some(StopReason::PaymentPressure));
    }

    #[test]
    fn global_cap_stops_a_session_below_the_category_budget() {
        let mut session = Session::new("s1");
        session.turn_count = 5;
        let (cont, reason) = should_continue(
            &session,
            ScamCategory::DigitalArrest,
            &ExtractedIntelligence::default(),
            5,
        );
        assert!(!cont);
        assert_eq!(reason, Some(StopReason::MaxTurnsReached));
    }

    #[test]
    fn flow_snapshot_detects_threat_pressure() {
        let mut session = Session::new("s1");
        session.record_ingress("account will be blocked, legal action will follow");
        session.record_ingress("arrest warrant has been issued against you");
        let snapshot = analyze_flow(&session);
        assert_eq!(snapshot.emotional_state, EmotionalState::Pressured);
    }
}
