//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. The aggregation
//! engine and its helpers are pure; the dashboard and identity gate talk to
//! ports; logging owns the local event database.

pub mod aggregation;
mod auth;
pub mod columns;
pub mod credentials;
mod dashboard;
mod demo;
mod doctor;
pub mod logging;
pub mod money;

pub use aggregation::{aggregate, summarize, ResolvedPolicy};
pub use auth::{bearer_token, IdentityGate};
pub use credentials::{decode_credential, CredentialFormat, LoadedCredential};
pub use dashboard::{DashboardReport, DashboardService};
pub use demo::DemoService;
pub use doctor::{CheckResult, DoctorResult, DoctorService, DoctorSummary};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
