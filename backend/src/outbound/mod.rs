//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **supabase**: GoTrue admin API and PostgREST adapters for the identity
//!   and profile ports.
//!
//! Adapters are thin translators between domain types and wire payloads.
//! They contain no business logic.

pub mod supabase;
