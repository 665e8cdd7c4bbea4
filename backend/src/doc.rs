//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the admin functions. It registers:
//!
//! - **Paths**: the two privileged functions and the health probes
//! - **Schemas**: response bodies ([`SuccessBody`], [`ErrorBody`]) and the
//!   documentation-only request bodies
//! - **Security**: the bearer token the platform gateway checks before a
//!   request reaches these functions
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    CreateUserBodySchema, ErrorBody, ResetPasswordBodySchema, SuccessBody,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the gateway bearer scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "GatewayBearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Caller token verified by the platform gateway, not by these handlers.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the admin functions.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Identity admin functions",
        description = "Privileged user provisioning and password reset endpoints.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("GatewayBearer" = [])),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::passwords::reset_user_password,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SuccessBody,
        ErrorBody,
        CreateUserBodySchema,
        ResetPasswordBodySchema
    )),
    tags(
        (name = "users", description = "Provisioning and credential operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
