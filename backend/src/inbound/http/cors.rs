//! CORS handling for the browser-callable admin functions.
//!
//! Every response allows any origin. Preflight requests are answered
//! directly with the headers each function accepts and never reach a
//! domain service.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

/// Origin allowed on every response.
pub const ALLOW_ORIGIN: &str = "*";
/// Request headers accepted by `create-user`.
pub const CREATE_USER_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
/// Request headers accepted by `reset-user-password`.
pub const RESET_PASSWORD_ALLOW_HEADERS: &str = "authorization, content-type";

/// Middleware adding `Access-Control-Allow-Origin: *` to responses that do
/// not already carry it.
#[must_use]
pub fn allow_any_origin() -> DefaultHeaders {
    DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN))
}

fn preflight(allow_headers: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers))
        .body("ok")
}

/// Preflight answer for `create-user`.
pub async fn create_user_preflight() -> HttpResponse {
    preflight(CREATE_USER_ALLOW_HEADERS)
}

/// Preflight answer for `reset-user-password`.
pub async fn reset_password_preflight() -> HttpResponse {
    preflight(RESET_PASSWORD_ALLOW_HEADERS)
}
