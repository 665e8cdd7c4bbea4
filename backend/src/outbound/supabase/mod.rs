//! Supabase outbound adapters.
//!
//! Both adapters talk to one Supabase project with the service-role key:
//! [`SupabaseAuthAdmin`] to the GoTrue admin API and
//! [`PostgrestProfileStore`] to the PostgREST profile table.

mod auth_admin;
mod config;
mod dto;
mod http;
mod profiles;

pub use auth_admin::SupabaseAuthAdmin;
pub use config::{ServiceRoleKey, SupabaseConfig, SupabaseConfigError, SupabaseSettings};
pub use profiles::PostgrestProfileStore;
