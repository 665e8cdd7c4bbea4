//! Saga steps for the provisioning workflow.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{IdentityAdmin, IdentityAdminError, ProfileStore, ProfileStoreError};
use crate::domain::saga::{SagaFailure, SagaStep};
use crate::domain::{CallTimeout, IdentityId, NewIdentity};

use super::{NewUser, ProvisionError};

/// State threaded through the provisioning saga.
#[derive(Debug)]
pub(super) struct ProvisioningContext {
    pub(super) user: NewUser,
    pub(super) identity_id: Option<IdentityId>,
}

impl ProvisioningContext {
    pub(super) fn new(user: NewUser) -> Self {
        Self {
            user,
            identity_id: None,
        }
    }
}

/// Error type shared by both steps so the saga can carry either subsystem's
/// failure.
#[derive(Debug)]
pub(super) enum StepError {
    Identity(IdentityAdminError),
    Profile(ProfileStoreError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity(err) => err.fmt(f),
            Self::Profile(err) => err.fmt(f),
        }
    }
}

pub(super) struct CreateIdentityStep<I: ?Sized> {
    identities: Arc<I>,
    timeout: CallTimeout,
}

impl<I: ?Sized> CreateIdentityStep<I> {
    pub(super) fn new(identities: Arc<I>, timeout: CallTimeout) -> Self {
        Self {
            identities,
            timeout,
        }
    }
}

#[async_trait]
impl<I> SagaStep<ProvisioningContext, StepError> for CreateIdentityStep<I>
where
    I: IdentityAdmin + ?Sized + 'static,
{
    fn name(&self) -> &'static str {
        "create_identity"
    }

    async fn execute(&self, ctx: &mut ProvisioningContext) -> Result<(), StepError> {
        let identity = NewIdentity {
            email: ctx.user.email.clone(),
            password: ctx.user.password.clone(),
            email_confirmed: true,
        };
        let record = self
            .timeout
            .bound(self.identities.create_identity(&identity), |limit| {
                IdentityAdminError::timeout(format!(
                    "create identity exceeded {}ms",
                    limit.as_millis()
                ))
            })
            .await
            .map_err(StepError::Identity)?;
        info!(identity_id = %record.id, "identity created");
        ctx.identity_id = Some(record.id);
        Ok(())
    }

    async fn compensate(&self, ctx: &ProvisioningContext) -> Result<(), StepError> {
        let Some(id) = ctx.identity_id.as_ref() else {
            return Ok(());
        };
        self.timeout
            .bound(self.identities.delete_identity(id), |limit| {
                IdentityAdminError::timeout(format!(
                    "delete identity exceeded {}ms",
                    limit.as_millis()
                ))
            })
            .await
            .map_err(StepError::Identity)?;
        info!(identity_id = %id, "identity rolled back");
        Ok(())
    }
}

pub(super) struct CreateProfileStep<P: ?Sized> {
    profiles: Arc<P>,
    timeout: CallTimeout,
}

impl<P: ?Sized> CreateProfileStep<P> {
    pub(super) fn new(profiles: Arc<P>, timeout: CallTimeout) -> Self {
        Self { profiles, timeout }
    }
}

#[async_trait]
impl<P> SagaStep<ProvisioningContext, StepError> for CreateProfileStep<P>
where
    P: ProfileStore + ?Sized + 'static,
{
    fn name(&self) -> &'static str {
        "create_profile"
    }

    async fn execute(&self, ctx: &mut ProvisioningContext) -> Result<(), StepError> {
        let Some(id) = ctx.identity_id.clone() else {
            return Err(StepError::Profile(ProfileStoreError::rejected(
                "no identity id available for the profile row",
            )));
        };
        let profile = ctx.user.profile(id);
        self.timeout
            .bound(self.profiles.insert_profile(&profile), |limit| {
                ProfileStoreError::timeout(format!(
                    "insert profile exceeded {}ms",
                    limit.as_millis()
                ))
            })
            .await
            .map_err(StepError::Profile)
    }
}

/// Classify a failed saga run.
///
/// A profile failure whose identity rollback also failed leaves an orphaned
/// identity behind and is reported as [`ProvisionError::CompensationFailed`].
pub(super) fn classify_failure(
    failure: SagaFailure<StepError>,
    ctx: &ProvisioningContext,
) -> ProvisionError {
    let SagaFailure {
        cause,
        compensation_failures,
        ..
    } = failure;
    match cause {
        StepError::Identity(err) => ProvisionError::IdentityCreationFailed(err),
        StepError::Profile(profile) => {
            let rollback = compensation_failures
                .into_iter()
                .find_map(|failure| match failure.cause {
                    StepError::Identity(err) => Some(err),
                    StepError::Profile(_) => None,
                });
            match (rollback, ctx.identity_id.clone()) {
                (Some(rollback), Some(identity_id)) => ProvisionError::CompensationFailed {
                    identity_id,
                    profile,
                    rollback,
                },
                _ => ProvisionError::ProfileCreationFailed(profile),
            }
        }
    }
}
