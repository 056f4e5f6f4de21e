//! Domain model types (pure).
//!
//! All types in this module are plain data. Anything that talks to the
//! network or the terminal lives elsewhere.

pub mod error;
pub mod key_action;
pub mod namespace;
pub mod query_parts;
pub mod validity;

// Re-export for convenience
pub use error::{AppError, ClientError, SearchError};
pub use key_action::KeyAction;
pub use namespace::NamespaceEntry;
pub use query_parts::QueryParts;
pub use validity::{Severity, ValidityState};
