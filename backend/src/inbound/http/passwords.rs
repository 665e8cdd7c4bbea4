//! Administrative password reset handler.
//!
//! ```text
//! OPTIONS   /functions/v1/reset-user-password  CORS preflight
//! <any>     /functions/v1/reset-user-password  Replace a user's password
//! ```

use actix_web::{HttpResponse, web};

use crate::domain::CredentialResetRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorBody, SuccessBody};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_body;

/// Replace the password of an existing identity.
#[utoipa::path(
    post,
    path = "/functions/v1/reset-user-password",
    request_body = crate::inbound::http::schemas::ResetPasswordBodySchema,
    responses(
        (status = 200, description = "Password replaced", body = SuccessBody),
        (status = 400, description = "Malformed body or missing fields", body = ErrorBody),
        (status = 500, description = "Identity subsystem rejected the update", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "resetUserPassword"
)]
pub async fn reset_user_password(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let object = parse_body(&body)?;
    state
        .credentials
        .reset(CredentialResetRequest::from_json(&object))
        .await?;
    Ok(HttpResponse::Ok().json(SuccessBody::OK))
}
