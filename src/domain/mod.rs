//! Domain models and types for Herald.
//!
//! This module contains the core domain models shared by the report layer and
//! the adapters:
//!
//! - **Tabular results** ([`QueryTable`]), the common shape every data source
//!   materializes into
//! - **Email models** ([`EmailMessage`], [`Attachment`])
//! - **Error types** ([`HeraldError`], [`WarehouseError`])
//! - **Result type alias** ([`Result`])
//!
//! All fallible operations return [`Result<T, HeraldError>`]; third-party
//! error types never cross module boundaries.

pub mod errors;
pub mod message;
pub mod result;
pub mod table;

// Re-export commonly used types for convenience
pub use errors::{HeraldError, WarehouseError};
pub use message::{Attachment, EmailMessage};
pub use result::Result;
pub use table::QueryTable;
