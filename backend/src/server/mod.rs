//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use identity_admin::Trace;
#[cfg(debug_assertions)]
use identity_admin::doc::ApiDoc;
use identity_admin::domain::ports::{IdentityAdmin, ProfileStore};
use identity_admin::domain::{CallTimeout, CredentialResetService, ProvisioningService};
use identity_admin::inbound::http::configure_functions;
use identity_admin::inbound::http::health::{HealthState, live, ready};
use identity_admin::inbound::http::state::HttpState;
use identity_admin::outbound::supabase::{
    PostgrestProfileStore, SupabaseAuthAdmin, SupabaseConfig,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the Supabase adapters into the two domain services.
///
/// # Errors
/// Returns [`std::io::Error`] when an HTTP client cannot be built.
pub fn build_http_state(supabase: &SupabaseConfig) -> std::io::Result<HttpState> {
    let identities: Arc<dyn IdentityAdmin> = Arc::new(
        SupabaseAuthAdmin::new(supabase)
            .map_err(|e| std::io::Error::other(format!("auth admin client: {e}")))?,
    );
    let profiles: Arc<dyn ProfileStore> = Arc::new(
        PostgrestProfileStore::new(supabase)
            .map_err(|e| std::io::Error::other(format!("profile store client: {e}")))?,
    );
    let timeout = CallTimeout::new(supabase.request_timeout);
    info!(
        base_url = %supabase.base_url,
        profile_table = %supabase.profile_table,
        service_key = %supabase.service_key.fingerprint(),
        timeout_ms = timeout.duration().as_millis(),
        "supabase adapters configured"
    );

    Ok(HttpState::new(
        Arc::new(ProvisioningService::new(
            Arc::clone(&identities),
            profiles,
            timeout,
        )),
        Arc::new(CredentialResetService::new(identities, timeout)),
    ))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_functions)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        http_state,
    } = config;

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
