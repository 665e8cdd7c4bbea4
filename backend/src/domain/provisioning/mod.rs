//! User provisioning across the identity subsystem and the profile store.
//!
//! The workflow is a two-step saga. The identity is created first because the
//! profile row is keyed by the identifier it generates. When the profile
//! insert fails the identity is deleted again so neither record exists
//! without the other.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    IdentityAdmin, IdentityAdminError, ProfileStore, ProfileStoreError, UserProvisioning,
};
use crate::domain::saga::Saga;
use crate::domain::{
    CallTimeout, Error, IdentityId, JsonObject, Password, ProfileRecord, RequiredFields,
    ValidationError,
};

mod steps;

use steps::{
    CreateIdentityStep, CreateProfileStep, ProvisioningContext, StepError, classify_failure,
};

/// Client-facing message for requests lacking a required field.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
/// Client-facing message when the identity could not be created.
pub const IDENTITY_FAILURE_MESSAGE: &str = "Failed to create user";
/// Client-facing message when the profile could not be created.
pub const PROFILE_FAILURE_MESSAGE: &str = "Failed to create user profile";

/// Unvalidated provisioning input as decoded from the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProvisioningRequest {
    /// Login identifier and profile contact address.
    pub email: Option<String>,
    /// Initial password.
    pub password: Option<Password>,
    /// Display name.
    pub name: Option<String>,
    /// Optional mobile number.
    pub mobile_no: Option<String>,
    /// Caller-defined role.
    pub role: Option<String>,
    /// Owning organisation.
    pub organisation_id: Option<String>,
    /// Optional venue.
    pub venue_id: Option<String>,
}

impl UserProvisioningRequest {
    /// Read the request fields from a decoded JSON object.
    ///
    /// # Examples
    /// ```
    /// use identity_admin::domain::{JsonObject, UserProvisioningRequest};
    ///
    /// let body = JsonObject::parse(br#"{"email":"a@x.com","organisation_id":9}"#).expect("object");
    /// let request = UserProvisioningRequest::from_json(&body);
    /// assert_eq!(request.email.as_deref(), Some("a@x.com"));
    /// assert_eq!(request.organisation_id.as_deref(), Some("9"));
    /// assert!(request.password.is_none());
    /// ```
    #[must_use]
    pub fn from_json(object: &JsonObject) -> Self {
        Self {
            email: object.text("email"),
            password: object
                .text("password")
                .and_then(|value| Password::new(value).ok()),
            name: object.text("name"),
            mobile_no: object.text("mobile_no"),
            role: object.text("role"),
            organisation_id: object.text("organisation_id"),
            venue_id: object.text("venue_id"),
        }
    }
}

/// Provisioning input with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Login identifier and profile contact address.
    pub email: String,
    /// Initial password.
    pub password: Password,
    /// Display name.
    pub name: String,
    /// Optional mobile number.
    pub mobile_no: Option<String>,
    /// Caller-defined role.
    pub role: String,
    /// Owning organisation.
    pub organisation_id: String,
    /// Optional venue.
    pub venue_id: Option<String>,
}

impl NewUser {
    /// Check that every required field is present.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingFields`] naming each absent field.
    pub fn try_from_request(request: UserProvisioningRequest) -> Result<Self, ValidationError> {
        let mut fields = RequiredFields::default();
        let email = fields.take("email", request.email);
        let password = fields.take("password", request.password);
        let name = fields.take("name", request.name);
        let role = fields.take("role", request.role);
        let organisation_id = fields.take("organisation_id", request.organisation_id);

        match (email, password, name, role, organisation_id) {
            (Some(email), Some(password), Some(name), Some(role), Some(organisation_id)) => {
                Ok(Self {
                    email,
                    password,
                    name,
                    mobile_no: request.mobile_no,
                    role,
                    organisation_id,
                    venue_id: request.venue_id,
                })
            }
            _ => Err(fields.into_error()),
        }
    }

    /// Profile row for this user keyed by `id`.
    #[must_use]
    pub fn profile(&self, id: IdentityId) -> ProfileRecord {
        ProfileRecord {
            id,
            name: self.name.clone(),
            email_id: self.email.clone(),
            mobile_no: self.mobile_no.clone(),
            role: self.role.clone(),
            organisation_id: self.organisation_id.clone(),
            venue_id: self.venue_id.clone(),
        }
    }
}

/// Result of a successful provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedUser {
    /// Identifier shared by the identity and the profile.
    pub id: IdentityId,
}

/// Failures of the provisioning workflow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisionError {
    /// The request failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The identity subsystem refused or failed the create call.
    #[error("identity creation failed: {0}")]
    IdentityCreationFailed(IdentityAdminError),
    /// The profile insert failed and the identity was rolled back.
    #[error("profile creation failed: {0}")]
    ProfileCreationFailed(ProfileStoreError),
    /// The profile insert failed and the identity could not be deleted.
    #[error(
        "profile creation failed ({profile}) and identity {identity_id} could not be deleted: {rollback}"
    )]
    CompensationFailed {
        /// Identity left without a profile.
        identity_id: IdentityId,
        /// Profile store failure that triggered the rollback.
        profile: ProfileStoreError,
        /// Failure of the compensating delete.
        rollback: IdentityAdminError,
    },
}

/// Provisioning service implementing [`UserProvisioning`].
///
/// The saga is assembled once and reused for every request.
pub struct ProvisioningService {
    saga: Saga<ProvisioningContext, StepError>,
}

impl ProvisioningService {
    /// Create a service over the two driven ports.
    pub fn new<I, P>(identities: Arc<I>, profiles: Arc<P>, timeout: CallTimeout) -> Self
    where
        I: IdentityAdmin + ?Sized + 'static,
        P: ProfileStore + ?Sized + 'static,
    {
        let saga = Saga::new()
            .step(CreateIdentityStep::new(identities, timeout))
            .step(CreateProfileStep::new(profiles, timeout));
        Self { saga }
    }

    /// Validate the request and run the saga.
    ///
    /// # Errors
    /// Returns [`ProvisionError`] describing which stage failed.
    pub async fn provision(
        &self,
        request: UserProvisioningRequest,
    ) -> Result<ProvisionedUser, ProvisionError> {
        let user = NewUser::try_from_request(request)?;
        let mut ctx = ProvisioningContext::new(user);
        match self.saga.run(&mut ctx).await {
            Ok(()) => match ctx.identity_id {
                Some(id) => Ok(ProvisionedUser { id }),
                None => Err(ProvisionError::IdentityCreationFailed(
                    IdentityAdminError::decode("identity step completed without an id"),
                )),
            },
            Err(failure) => Err(classify_failure(failure, &ctx)),
        }
    }

    fn map_error(error: &ProvisionError) -> Error {
        match error {
            ProvisionError::Validation(cause) => {
                info!(error = %cause, "provisioning request rejected");
                cause.to_client_error(MISSING_FIELDS_MESSAGE)
            }
            ProvisionError::IdentityCreationFailed(cause) => {
                warn!(error = %cause, "identity creation failed");
                Error::internal(IDENTITY_FAILURE_MESSAGE)
            }
            ProvisionError::ProfileCreationFailed(cause) => {
                warn!(error = %cause, "profile creation failed; identity rolled back");
                Error::internal(PROFILE_FAILURE_MESSAGE)
            }
            ProvisionError::CompensationFailed {
                identity_id,
                profile,
                rollback,
            } => {
                error!(
                    %identity_id,
                    profile_error = %profile,
                    rollback_error = %rollback,
                    "identity orphaned: profile creation and rollback both failed"
                );
                Error::internal(PROFILE_FAILURE_MESSAGE)
            }
        }
    }
}

#[async_trait]
impl UserProvisioning for ProvisioningService {
    async fn provision(&self, request: UserProvisioningRequest) -> Result<ProvisionedUser, Error> {
        ProvisioningService::provision(self, request)
            .await
            .map_err(|err| Self::map_error(&err))
    }
}
