//! Privileged identity administration backend.
//!
//! Exposes two server-only operations: provisioning a user across the
//! identity subsystem and the profile store, and forcibly resetting a user's
//! password. The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] holds validation, the provisioning saga and the reset use-case.
//! - [`inbound`] translates HTTP requests into domain calls.
//! - [`outbound`] talks to the Supabase admin and REST APIs.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
