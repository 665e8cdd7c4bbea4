//! User provisioning handler.
//!
//! ```text
//! OPTIONS   /functions/v1/create-user  CORS preflight
//! <any>     /functions/v1/create-user  Create identity and profile
//! ```

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::domain::UserProvisioningRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorBody, SuccessBody};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_body;

/// Create a user in the identity subsystem and the profile store.
///
/// The identity is created first; if the profile insert fails the identity
/// is deleted again before the error is returned.
#[utoipa::path(
    post,
    path = "/functions/v1/create-user",
    request_body = crate::inbound::http::schemas::CreateUserBodySchema,
    responses(
        (status = 200, description = "User created", body = SuccessBody),
        (status = 400, description = "Malformed body or missing required fields", body = ErrorBody),
        (status = 500, description = "Identity or profile creation failed", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let object = parse_body(&body)?;
    let request = UserProvisioningRequest::from_json(&object);
    let provisioned = state.provisioning.provision(request).await?;
    info!(identity_id = %provisioned.id, "user provisioned");
    Ok(HttpResponse::Ok().json(SuccessBody::OK))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockCredentialReset, MockUserProvisioning};
    use crate::domain::{Error, IdentityId, ProvisionedUser};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn state(provisioning: MockUserProvisioning) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(provisioning),
            Arc::new(MockCredentialReset::new()),
        ))
    }

    async fn post(state: web::Data<HttpState>, body: &'static str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/create-user", web::post().to(create_user)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/create-user")
            .insert_header(("content-type", "application/json"))
            .set_payload(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn forwards_decoded_fields_and_reports_success() {
        let mut provisioning = MockUserProvisioning::new();
        provisioning
            .expect_provision()
            .times(1)
            .withf(|request: &UserProvisioningRequest| {
                request.email.as_deref() == Some("a@x.com")
                    && request.organisation_id.as_deref() == Some("42")
                    && request.venue_id.is_none()
            })
            .return_once(|_| {
                Ok(ProvisionedUser {
                    id: IdentityId::new("u1").expect("id"),
                })
            });

        let (status, body) = post(
            state(provisioning),
            r#"{"email":"a@x.com","password":"pw123456","name":"A","role":"admin","organisation_id":42}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    #[rstest]
    #[case::empty("")]
    #[case::truncated("{\"email\":")]
    #[case::array("[1, 2]")]
    #[actix_web::test]
    async fn malformed_bodies_never_reach_the_service(#[case] body: &'static str) {
        let mut provisioning = MockUserProvisioning::new();
        provisioning.expect_provision().never();

        let (status, body) = post(state(provisioning), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid or empty JSON body" }));
    }

    #[rstest]
    #[actix_web::test]
    async fn service_errors_become_error_bodies() {
        let mut provisioning = MockUserProvisioning::new();
        provisioning
            .expect_provision()
            .return_once(|_| Err(Error::internal("Failed to create user profile")));

        let (status, body) = post(
            state(provisioning),
            r#"{"email":"a@x.com","password":"pw","name":"A","role":"admin","organisation_id":"o"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to create user profile" }));
    }
}
