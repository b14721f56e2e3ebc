//! C8 — the response generator: an optional LLM path backed by an
//! always-available template path, gated by the self-corrector, with a
//! context-adaptive stall short-circuit for sensitive requests.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use scam_honeypot_config::category::category_config;
use scam_honeypot_config::keywords::SENSITIVE_REQUEST_WORDS;
use scam_honeypot_config::persona::{persona_profile, PersonaProfile};
use scam_honeypot_core::{LanguageStyle, PersonaType, ScamCategory, Session, TechLiteracy, TextGenerator};
use scam_honeypot_text_processing::detect_language_style;

use crate::corrector;
use crate::humanizer::humanize;
use crate::prompt::build_prompt;
use crate::strategy::{analyze_flow, response_hint, FlowSnapshot};

const STALL_PHRASES: &[&str] = &[
    "Ek minute, main likh leta hoon, aap phir se boliye.",
    "Thoda ruko, mujhe ye dhoondhna padega kahan rakha hai.",
    "Sorry, signal chala gaya tha, aap kya bol rahe the?",
    "One second, let me find that, my hands are a bit shaky.",
];

/// Produces the agent's reply for the current turn. Retries the template
/// path if the self-corrector rejects a candidate, trying every phrase in
/// the relevant pool before giving up and returning the plainest exit
/// line available.
pub struct ResponseGenerator {
    llm: Option<Arc<dyn TextGenerator>>,
    rng: Mutex<StdRng>,
}

impl ResponseGenerator {
    pub fn new(llm: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            llm,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Builds a generator with a fixed humanizer seed, for reproducible
    /// tests and for any caller that wants deterministic output.
    pub fn with_seed(llm: Option<Arc<dyn TextGenerator>>, seed: u64) -> Self {
        Self {
            llm,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub async fn generate(&self, session: &Session, category: ScamCategory) -> String {
        let persona = persona_profile(session.persona_type);
        let cfg = category_config(category);

        let mut rng = self.rng.lock().expect("generator rng poisoned");

        if let Some(stall) = context_adaptive_stall(session, &mut rng) {
            return stall;
        }

        let snapshot = analyze_flow(session);
        let hint = response_hint(&snapshot, session.turn_count);

        let reply = if let Some(llm) = &self.llm {
            let recent = session.last_ingress_messages(6);
            let prompt = build_prompt(persona, cfg, &recent, &hint, persona.language_style);
            let recent_agent = session.last_agent_messages(3);
            match llm.generate_text(&prompt).await {
                Ok(raw) => {
                    let cleaned = strip_wrapping_quotes(raw.trim()).to_string();
                    if corrector::check(&cleaned, persona.tech_literacy, &recent_agent).is_ok() {
                        cleaned
                    } else {
                        template_reply(session, persona, &snapshot, &mut rng)
                    }
                }
                Err(_) => template_reply(session, persona, &snapshot, &mut rng),
            }
        } else {
            template_reply(session, persona, &snapshot, &mut rng)
        };

        humanize(&reply, &mut *rng)
    }

    /// Produces a persona exit line for a strategy-driven stop. Never
    /// touches the LLM path or the `typical`/`delay` pools — the engagement
    /// is ending, so only `persona.exit` is eligible.
    pub async fn generate_exit(&self, session: &Session) -> String {
        let persona = persona_profile(session.persona_type);
        let recent_agent = session.last_agent_messages(3);
        let mut rng = self.rng.lock().expect("generator rng poisoned");

        let mut candidates: Vec<&&str> = persona.exit.iter().collect();
        candidates.shuffle(&mut *rng);

        let reply = candidates
            .into_iter()
            .find(|candidate| corrector::check(candidate, persona.tech_literacy, &recent_agent).is_ok())
            .copied()
            .unwrap_or("Signal issue hai, baad mein baat karte hain.")
            .to_string();

        humanize(&reply, &mut *rng)
    }
}

/// Returns a stall phrase when the incoming message requests sensitive
/// information, short-circuiting the normal generation path entirely.
fn context_adaptive_stall(session: &Session, rng: &mut StdRng) -> Option<String> {
    let last = session.last_ingress_messages(1);
    let content = last.first()?.content.to_lowercase();
    if SENSITIVE_REQUEST_WORDS.iter().any(|w| content.contains(w)) {
        STALL_PHRASES.choose(rng).map(|s| s.to_string())
    } else {
        None
    }
}

fn template_reply(
    session: &Session,
    persona: &PersonaProfile,
    snapshot: &FlowSnapshot,
    rng: &mut StdRng,
) -> String {
    let pool = pick_pool(session, persona, snapshot);
    let recent_agent = session.last_agent_messages(3);

    let mut candidates: Vec<&&str> = pool.iter().collect();
    candidates.shuffle(rng);

    for candidate in candidates {
        if corrector::check(candidate, persona.tech_literacy, &recent_agent).is_ok() {
            return candidate.to_string();
        }
    }

    // Every pooled candidate was rejected (should not happen with the
    // authored phrase pools); fall back to the persona's plainest exit.
    persona
        .exit
        .first()
        .copied()
        .unwrap_or("Signal issue hai, baad mein baat karte hain.")
        .to_string()
}

/// Picks which phrase pool to sample from for a non-terminal turn. Exit
/// timing is decided by the caller (via `generate_exit`), not here.
fn pick_pool<'a>(
    session: &Session,
    persona: &'a PersonaProfile,
    snapshot: &FlowSnapshot,
) -> &'a [&'static str] {
    let ingress_is_formal_english = session
        .last_ingress_messages(1)
        .first()
        .map(|m| detect_language_style(&m.content) == LanguageStyle::PlainEnglish)
        .unwrap_or(false);

    if ingress_is_formal_english
        && persona.tech_literacy <= TechLiteracy::Low
        && !persona.confusion.is_empty()
    {
        return persona.confusion;
    }

    if matches!(
        snapshot.emotional_state,
        crate::strategy::EmotionalState::Pressured | crate::strategy::EmotionalState::Anxious
    ) {
        persona.delay
    } else {
        persona.typical
    }
}

fn strip_wrapping_quotes(text: &str) -> &str {
    let text = text.trim();
    if text.len() >= 2 {
        let bytes = text.as_bytes();
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_double_quotes() {
        assert_eq!(strip_wrapping_quotes("\"hello there\""), "hello there");
    }

    #[test]
    fn leaves_unquoted_text_alone() {
        assert_eq!(strip_wrapping_quotes("hello there"), "hello there");
    }

    #[tokio::test]
    async fn sensitive_ingress_triggers_stall_without_calling_llm() {
        let mut session = Session::new("s1");
        session.persona_type = PersonaType::TechNaive;
        session.record_ingress("please share your otp now");

        let generator = ResponseGenerator::new(None);
        let reply = generator.generate(&session, ScamCategory::KycPhishing).await;
        assert!(STALL_PHRASES.contains(&reply.as_str()));
    }

    #[tokio::test]
    async fn template_path_produces_persona_phrase() {
        let mut session = Session::new("s1");
        session.persona_type = PersonaType::ElderlyAnxious;
        session.record_ingress("this is cbi officer speaking");

        let generator = ResponseGenerator::with_seed(None, 99);
        let reply = generator.generate(&session, ScamCategory::DigitalArrest).await;
        let recovered = crate::humanizer::strip_for_test(&reply);
        let persona = persona_profile(PersonaType::ElderlyAnxious);
        assert!(
            persona.typical.contains(&recovered.as_str())
                || persona.delay.contains(&recovered.as_str())
                || persona.exit.contains(&recovered.as_str())
                || persona.confusion.contains(&recovered.as_str())
        );
    }

    #[tokio::test]
    async fn strategy_stop_emits_a_persona_exit_line() {
        let mut session = Session::new("s1");
        session.persona_type = PersonaType::TechNaive;
        session.turn_count = 7;
        session.record_ingress("just one more step to complete");

        let generator = ResponseGenerator::with_seed(None, 7);
        let reply = generator.generate_exit(&session).await;
        let recovered = crate::humanizer::strip_for_test(&reply);
        let persona = persona_profile(PersonaType::TechNaive);
        assert!(persona.exit.contains(&recovered.as_str()));
    }

    #[tokio::test]
    async fn low_turn_count_never_reaches_exit_pool_via_generate() {
        let mut session = Session::new("s1");
        session.persona_type = PersonaType::TechNaive;
        session.turn_count = 1;
        session.record_ingress("just one more step to complete");

        let generator = ResponseGenerator::with_seed(None, 7);
        let reply = generator.generate(&session, ScamCategory::KycPhishing).await;
        let recovered = crate::humanizer::strip_for_test(&reply);
        let persona = persona_profile(PersonaType::TechNaive);
        assert!(!persona.exit.contains(&recovered.as_str()));
    }

    #[tokio::test]
    async fn seeded_generator_is_reproducible() {
        let mut session = Session::new("s1");
        session.persona_type = PersonaType::ElderlyAnxious;
        session.record_ingress("this is cbi officer speaking");

        let a = ResponseGenerator::with_seed(None, 42)
            .generate(&session, ScamCategory::DigitalArrest)
            .await;
        let b = ResponseGenerator::with_seed(None, 42)
            .generate(&session, ScamCategory::DigitalArrest)
            .await;
        assert_eq!(a, b);
    }
}
