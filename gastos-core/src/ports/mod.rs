//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services depend
//! only on these traits, not on concrete implementations.

mod identity;
mod sheet_source;

pub use identity::IdentityProvider;
pub use sheet_source::{SheetSource, SheetValues};
