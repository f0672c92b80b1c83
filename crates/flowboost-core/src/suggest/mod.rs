//! Task-breakdown suggestion sources.
//!
//! Two providers, selected by entry point rather than switched at runtime:
//! a deterministic template lookup ([`templates`]) and a call to the hosted
//! text-generation endpoint ([`generative`]). Both produce a short ordered
//! list of micro-step titles.

pub mod generative;
pub mod templates;

pub use generative::{parse_numbered_steps, GenerativeBreakdown, SuggestionOutcome};
pub use templates::suggest_breakdown;
