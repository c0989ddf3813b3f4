//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Google Sheets v4 API for SheetSource
//! - Built-in demo sheet for SheetSource
//! - Firebase Identity Toolkit for IdentityProvider

pub mod demo;
pub mod firebase;
pub mod google_sheets;

#[cfg(test)]
pub mod identity_mock;
