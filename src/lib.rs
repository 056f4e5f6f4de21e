//! identifiers.org search bar (idorg-bar)
//!
//! Terminal search bar for compact identifiers (CURIEs): classifies what the
//! user typed against namespace candidates from the EBI search service,
//! suggests namespaces while they type, and resolves the final CURIE through
//! the identifiers.org resolver.
//!
//! Pure Core / Impure Shell: [`parser`] and [`state`] never do I/O; the
//! HTTP clients in [`search`] and [`resolver`] and the terminal in [`view`]
//! drive them.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod search;
pub mod state;
pub mod view;
