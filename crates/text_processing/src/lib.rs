//! Artifact extraction (C4), language-style detection (C6), and the pure
//! half of request hygiene (C10).
//!
//! All three subsystems are pure — no suspension points, no external I/O —
//! so the pipeline can call them synchronously from inside a held session
//! lock.

pub mod extractor;
pub mod hygiene;
pub mod language;

pub use extractor::extract;
pub use hygiene::{
    is_probe_message, normalize_handle, normalize_phones, sanitize_message,
    validate_message_length, validate_session_id, ValidationError,
};
pub use language::detect_language_style;
