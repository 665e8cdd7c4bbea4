//! HTTP inbound adapter exposing the privileged admin functions.
//!
//! Routes live under `/functions/v1`. On each function resource `OPTIONS`
//! is answered by the CORS preflight and every other method reaches the
//! handler.

use actix_web::http::Method;
use actix_web::web;

pub mod cors;
pub mod error;
pub mod health;
pub mod passwords;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Path prefix shared by both functions.
pub const FUNCTIONS_PREFIX: &str = "/functions/v1";

/// Register `create-user` and `reset-user-password` with CORS headers.
///
/// The caller registers an [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use identity_admin::inbound::http::configure_functions;
///
/// let _app = App::new().configure(configure_functions);
/// ```
pub fn configure_functions(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(FUNCTIONS_PREFIX)
            .wrap(cors::allow_any_origin())
            .service(
                web::resource("/create-user")
                    .route(web::method(Method::OPTIONS).to(cors::create_user_preflight))
                    .route(web::route().to(users::create_user)),
            )
            .service(
                web::resource("/reset-user-password")
                    .route(web::method(Method::OPTIONS).to(cors::reset_password_preflight))
                    .route(web::route().to(passwords::reset_user_password)),
            ),
    );
}
