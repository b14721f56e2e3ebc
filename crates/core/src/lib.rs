//! Core domain types and traits for the scam-engagement honeypot.
//!
//! This crate provides foundational types used across the pipeline:
//! - The `Session` record and its embedded `ExtractedIntelligence`
//! - Closed sum types for persona, category and language style
//! - The `SessionStore` and `TextGenerator` capability traits other crates inject
//! - The shared error type

pub mod dossier;
pub mod error;
pub mod session;
pub mod traits;

pub use dossier::{AgentNotes, Dossier, RiskLevel, WireIntelligence};
pub use error::{Error, Result};
pub use session::{
    EngagementState, ExtractedIntelligence, LanguageStyle, MessageRecord, PersonaStyle,
    PersonaType, Role, ScamCategory, ScamScore, Session, TechLiteracy,
};
pub use traits::{SessionStore, TextGenerator};
