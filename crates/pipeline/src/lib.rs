//! C12 — the engagement pipeline: the per-session state machine wiring the
//! scorer (C2), classifier (C3), extractor (C4), strategy engine (C7) and
//! response generator (C8) together for a single turn, persisting through
//! the session store (C9) and handing off to the callback dispatcher (C11)
//! when an engagement closes.
//!
//! Request hygiene (C10) is deliberately not here — it sits in front of
//! this pipeline at the HTTP surface, which is why `handle_turn` takes an
//! already-validated session id and message.

pub mod persona_select;

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use scam_honeypot_agent::{classify, score_message, should_continue, ResponseGenerator};
use scam_honeypot_config::category::category_config;
use scam_honeypot_core::{EngagementState, Result, Session, SessionStore};
use scam_honeypot_persistence::LockManager;
use scam_honeypot_text_processing::extract;
use scam_honeypot_transport::{build_dossier, CallbackDispatcher};

use persona_select::select_persona;

/// Reply returned for an incoming message scored as not worth engaging.
const GENERIC_ACKNOWLEDGMENT: &str = "Thank you for your message.";

/// Fallback exit line for a `Terminating`/`Ended` session that somehow has
/// no recorded agent reply yet (should not happen in practice; every path
/// into `Terminating` records one first).
const FALLBACK_EXIT_LINE: &str = "I need to go now, goodbye.";

/// The outcome of a single turn, enough for an HTTP handler to build every
/// documented response shape without reaching back into the session.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session_id: String,
    pub reply: String,
    pub scam_detected: bool,
    pub engagement_active: bool,
    pub turn_count: u32,
    pub callback_sent: bool,
}

/// Wires C2-C11 together. Cheap to clone (everything inside is an `Arc`),
/// so a single instance is shared across the HTTP server's handlers.
pub struct EngagementPipeline {
    store: Arc<dyn SessionStore>,
    locks: Arc<LockManager>,
    generator: Arc<ResponseGenerator>,
    dispatcher: Arc<CallbackDispatcher>,
    scam_threshold: f64,
    max_engagement_turns: u32,
    persona_rng: Mutex<StdRng>,
}

impl EngagementPipeline {
    pub fn new(
        store: Arc<dyn SessionStore>,
        locks: Arc<LockManager>,
        generator: Arc<ResponseGenerator>,
        dispatcher: Arc<CallbackDispatcher>,
        scam_threshold: f64,
    ) -> Self {
        Self::with_max_turns(store, locks, generator, dispatcher, scam_threshold, 15)
    }

    /// Same as [`EngagementPipeline::new`] but with an explicit
    /// `MAX_ENGAGEMENT_TURNS` ceiling (the strategy engine clamps each
    /// category's own turn budget to this value).
    pub fn with_max_turns(
        store: Arc<dyn SessionStore>,
        locks: Arc<LockManager>,
        generator: Arc<ResponseGenerator>,
        dispatcher: Arc<CallbackDispatcher>,
        scam_threshold: f64,
        max_engagement_turns: u32,
    ) -> Self {
        Self {
            store,
            locks,
            generator,
            dispatcher,
            scam_threshold,
            max_engagement_turns,
            persona_rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Same as [`EngagementPipeline::with_max_turns`] but with a seeded
    /// persona-selection RNG, for reproducible tests.
    pub fn with_seed(
        store: Arc<dyn SessionStore>,
        locks: Arc<LockManager>,
        generator: Arc<ResponseGenerator>,
        dispatcher: Arc<CallbackDispatcher>,
        scam_threshold: f64,
        max_engagement_turns: u32,
        seed: u64,
    ) -> Self {
        Self {
            store,
            locks,
            generator,
            dispatcher,
            scam_threshold,
            max_engagement_turns,
            persona_rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Processes one ingress message for `session_id`. Holds that
    /// session's lock (and a global concurrency permit) for the whole
    /// turn, so concurrent turns on the same session are fully
    /// serialized while unrelated sessions proceed in parallel.
    #[instrument(skip(self, text), fields(session_id))]
    pub async fn handle_turn(&self, session_id: &str, text: &str) -> Result<TurnOutcome> {
        let _guard = self.locks.acquire(session_id).await;

        let mut session = self
            .store
            .get(session_id)
            .await?
            .unwrap_or_else(|| Session::new(session_id));

        let callback_sent = self.advance(&mut session, text).await?;

        self.store.set(session_id, &session).await?;

        let reply = session
            .last_agent_messages(1)
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_else(|| {
                if session.state == EngagementState::Idle {
                    GENERIC_ACKNOWLEDGMENT.to_string()
                } else {
                    FALLBACK_EXIT_LINE.to_string()
                }
            });

        Ok(TurnOutcome {
            session_id: session.id.clone(),
            reply,
            scam_detected: session.scam_detected,
            engagement_active: session.engagement_active,
            turn_count: session.turn_count,
            callback_sent,
        })
    }

    /// Reads a session without mutating it, for read-only routes
    /// (`GET /session/{id}`, `GET /summary/{id}`). Still goes through the
    /// session's lock so a concurrent turn can't be observed half-written.
    pub async fn get_session(&self, session_id: &str) -> Result<Option<Session>> {
        let _guard = self.locks.acquire(session_id).await;
        self.store.get(session_id).await
    }

    /// Ends a session explicitly (the `DELETE /session/{id}` route):
    /// dispatches the callback if the session ever flagged scam, then
    /// removes it from the store.
    pub async fn end_session(&self, session_id: &str) -> Result<Option<(Session, bool)>> {
        let _guard = self.locks.acquire(session_id).await;

        let Some(mut session) = self.store.get(session_id).await? else {
            return Ok(None);
        };

        session.deactivate_engagement();
        let callback_sent = if session.scam_detected {
            let dossier = build_dossier(&session);
            self.dispatcher.dispatch(&dossier).await?
        } else {
            false
        };

        self.store.delete(session_id).await?;
        Ok(Some((session, callback_sent)))
    }

    async fn advance(&self, session: &mut Session, text: &str) -> Result<bool> {
        match session.state {
            EngagementState::Idle => self.advance_idle(session, text).await,
            EngagementState::Engaging => self.advance_engaging(session, text).await,
            EngagementState::Terminating => {
                // The turn that moved a session into Terminating already
                // emitted its exit line; this turn only observes the
                // transition through to Ended and appends the ingress.
                session.record_ingress(text);
                session.state = EngagementState::Ended;
                Ok(false)
            }
            EngagementState::Ended => {
                session.record_ingress(text);
                Ok(false)
            }
        }
    }

    async fn advance_idle(&self, session: &mut Session, text: &str) -> Result<bool> {
        let score = score_message(text, self.scam_threshold);
        session.record_ingress(text);
        session.confidence = score.total;

        if !score.is_scam {
            session.record_agent_reply(GENERIC_ACKNOWLEDGMENT);
            return Ok(false);
        }

        session.mark_scam_detected();

        let (category, _) = classify(text, &session.intelligence.suspicious_keywords);
        session.category = category;

        let cfg = category_config(category);
        session.persona_type = {
            let mut rng = self.persona_rng.lock().expect("persona rng poisoned");
            select_persona(cfg, session.turn_count, &mut *rng)
        };
        session.state = EngagementState::Engaging;

        let fresh = extract(text, &session.intelligence);
        session.merge_intelligence(&fresh);

        info!(session_id = %session.id, category = category.as_label(), "engagement started");

        let reply = self.generator.generate(session, category).await;
        session.record_agent_reply(&reply);

        Ok(false)
    }

    async fn advance_engaging(&self, session: &mut Session, text: &str) -> Result<bool> {
        let score = score_message(text, self.scam_threshold);
        session.record_ingress(text);
        session.confidence = score.total;

        let (category, _) = classify(text, &session.intelligence.suspicious_keywords);
        session.category = category;

        let fresh = extract(text, &session.intelligence);
        session.merge_intelligence(&fresh);

        let (keep_going, reason) = should_continue(
            session,
            category,
            &session.intelligence,
            self.max_engagement_turns,
        );

        if keep_going {
            let reply = self.generator.generate(session, category).await;
            session.record_agent_reply(&reply);
            return Ok(false);
        }

        let reply = self.generator.generate_exit(session).await;
        session.record_agent_reply(&reply);

        info!(
            session_id = %session.id,
            reason = reason.map(|r| r.as_label()).unwrap_or("unknown"),
            "engagement terminating"
        );
        session.state = EngagementState::Terminating;
        session.deactivate_engagement();

        if self.should_dispatch(session) {
            let dossier = build_dossier(session);
            let sent = self.dispatcher.dispatch(&dossier).await?;
            return Ok(sent);
        }

        Ok(false)
    }

    fn should_dispatch(&self, session: &Session) -> bool {
        let intel = &session.intelligence;
        let intel_score = 3 * intel.payment_handles.len() as u32
            + 3 * intel.bank_references.len() as u32
            + 4 * intel.phishing_urls.len() as u32
            + intel.phone_numbers.len() as u32;
        session.scam_detected || intel_score >= 7 || session.turn_count >= 5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use scam_honeypot_persistence::InMemorySessionStore;

    fn pipeline() -> EngagementPipeline {
        let store: Arc<dyn SessionStore> =
            Arc::new(InMemorySessionStore::new(Duration::from_secs(3600)));
        let locks = Arc::new(LockManager::new(100));
        let generator = Arc::new(ResponseGenerator::with_seed(None, 1));
        let dispatcher = Arc::new(CallbackDispatcher::new(None));
        EngagementPipeline::new(store, locks, generator, dispatcher, 0.7)
    }

    #[tokio::test]
    async fn benign_message_never_activates_engagement() {
        let pipeline = pipeline();
        let outcome = pipeline
            .handle_turn("s1", "Hello, how are you doing today?")
            .await
            .unwrap();
        assert!(!outcome.scam_detected);
        assert_eq!(outcome.reply, GENERIC_ACKNOWLEDGMENT);
    }

    #[tokio::test]
    async fn scam_message_activates_engagement_and_replies_in_character() {
        let pipeline = pipeline();
        let outcome = pipeline
            .handle_turn(
                "s2",
                "Your account will be blocked immediately! Verify KYC at \
                 http://fake-bank.xyz or share OTP to 9876543210.",
            )
            .await
            .unwrap();
        assert!(outcome.scam_detected);
        assert!(outcome.engagement_active);
        assert_eq!(outcome.turn_count, 1);
        assert!(!outcome.reply.is_empty());
    }

    #[tokio::test]
    async fn turn_count_increments_once_per_ingress() {
        let pipeline = pipeline();
        pipeline.handle_turn("s3", "hello").await.unwrap();
        let outcome = pipeline.handle_turn("s3", "hello again").await.unwrap();
        assert_eq!(outcome.turn_count, 2);
    }

    #[tokio::test]
    async fn payment_pressure_terminates_engagement() {
        let pipeline = pipeline();
        pipeline
            .handle_turn("s4", "This is CBI officer, you are under digital arrest")
            .await
            .unwrap();
        pipeline.handle_turn("s4", "pay now send transfer").await.unwrap();
        pipeline.handle_turn("s4", "pay now send transfer").await.unwrap();
        let outcome = pipeline
            .handle_turn("s4", "pay now send transfer")
            .await
            .unwrap();
        assert!(!outcome.engagement_active);

        let session = pipeline.get_session("s4").await.unwrap().unwrap();
        let persona = scam_honeypot_config::persona::persona_profile(session.persona_type);
        assert!(
            persona.exit.iter().any(|line| outcome.reply.contains(line)),
            "terminating reply {:?} should be a persona exit line",
            outcome.reply
        );
    }

    #[tokio::test]
    async fn terminating_session_moves_to_ended_on_next_turn() {
        let pipeline = pipeline();
        pipeline
            .handle_turn("s5", "This is CBI officer, you are under digital arrest")
            .await
            .unwrap();
        pipeline.handle_turn("s5", "pay now send transfer").await.unwrap();
        pipeline.handle_turn("s5", "pay now send transfer").await.unwrap();
        let terminating = pipeline
            .handle_turn("s5", "pay now send transfer")
            .await
            .unwrap();
        assert!(!terminating.engagement_active);

        let ended = pipeline.handle_turn("s5", "hello again").await.unwrap();
        assert_eq!(ended.reply, terminating.reply);
        assert!(!ended.engagement_active);
    }
}
