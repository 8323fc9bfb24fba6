//! External integrations
//!
//! Adapters wrap every collaborator the report touches: the two relational
//! sources, the analytical store, the mail relay, and the Teams webhook.
//! Each exposes a trait the report runner depends on, so every collaborator
//! can be replaced by a test double.

pub mod email;
pub mod notify;
pub mod source;
pub mod warehouse;
