//! The outbound callback dispatcher (C11): builds a `Dossier` from a
//! finished session and posts it with bounded retry.

pub mod dispatcher;
pub mod dossier_builder;
pub mod error;

pub use dispatcher::CallbackDispatcher;
pub use dossier_builder::build as build_dossier;
pub use error::TransportError;
