//! In-memory identity and profile subsystems shared by integration suites.
//!
//! Both fakes record every call so tests can assert on the cross-system
//! state after a request: which identities exist, which profiles exist, and
//! what was attempted on the way.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use identity_admin::domain::ports::{
    IdentityAdmin, IdentityAdminError, ProfileStore, ProfileStoreError,
};
use identity_admin::domain::{
    CallTimeout, CredentialResetService, IdentityId, IdentityRecord, NewIdentity, Password,
    ProfileRecord, ProvisioningService,
};
use identity_admin::inbound::http::state::HttpState;
use serde_json::{Value, json};

/// Call observed by [`InMemoryIdentityAdmin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCall {
    Create { email: String },
    Delete { id: IdentityId },
    UpdatePassword { id: IdentityId },
}

#[derive(Debug, Clone)]
struct StoredIdentity {
    email: String,
    password: String,
    email_confirmed: bool,
}

#[derive(Default)]
struct IdentityState {
    identities: HashMap<IdentityId, StoredIdentity>,
    calls: Vec<IdentityCall>,
    create_failure: Option<IdentityAdminError>,
    delete_failure: Option<IdentityAdminError>,
    update_failure: Option<IdentityAdminError>,
}

/// Identity subsystem keeping identities in memory with unique emails.
#[derive(Default)]
pub struct InMemoryIdentityAdmin {
    state: Mutex<IdentityState>,
}

impl InMemoryIdentityAdmin {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IdentityState> {
        self.state.lock().expect("identity state lock")
    }

    /// Insert an identity directly, bypassing the call log.
    pub fn seed(&self, email: &str, password: &str) -> IdentityId {
        let id = IdentityId::new(uuid::Uuid::new_v4().to_string()).expect("uuid id");
        self.lock().identities.insert(
            id.clone(),
            StoredIdentity {
                email: email.to_owned(),
                password: password.to_owned(),
                email_confirmed: true,
            },
        );
        id
    }

    pub fn fail_creates_with(&self, error: IdentityAdminError) {
        self.lock().create_failure = Some(error);
    }

    pub fn fail_deletes_with(&self, error: IdentityAdminError) {
        self.lock().delete_failure = Some(error);
    }

    pub fn fail_updates_with(&self, error: IdentityAdminError) {
        self.lock().update_failure = Some(error);
    }

    pub fn calls(&self) -> Vec<IdentityCall> {
        self.lock().calls.clone()
    }

    pub fn count(&self) -> usize {
        self.lock().identities.len()
    }

    pub fn ids(&self) -> Vec<IdentityId> {
        self.lock().identities.keys().cloned().collect()
    }

    pub fn id_for_email(&self, email: &str) -> Option<IdentityId> {
        self.lock()
            .identities
            .iter()
            .find(|(_, stored)| stored.email == email)
            .map(|(id, _)| id.clone())
    }

    pub fn password_of(&self, id: &IdentityId) -> Option<String> {
        self.lock()
            .identities
            .get(id)
            .map(|stored| stored.password.clone())
    }

    pub fn is_confirmed(&self, id: &IdentityId) -> bool {
        self.lock()
            .identities
            .get(id)
            .is_some_and(|stored| stored.email_confirmed)
    }
}

#[async_trait]
impl IdentityAdmin for InMemoryIdentityAdmin {
    async fn create_identity(
        &self,
        identity: &NewIdentity,
    ) -> Result<IdentityRecord, IdentityAdminError> {
        let mut state = self.lock();
        state.calls.push(IdentityCall::Create {
            email: identity.email.clone(),
        });
        if let Some(error) = state.create_failure.clone() {
            return Err(error);
        }
        if state
            .identities
            .values()
            .any(|stored| stored.email == identity.email)
        {
            return Err(IdentityAdminError::conflict(format!(
                "{} already registered",
                identity.email
            )));
        }
        let id = IdentityId::new(uuid::Uuid::new_v4().to_string()).expect("uuid id");
        state.identities.insert(
            id.clone(),
            StoredIdentity {
                email: identity.email.clone(),
                password: identity.password.expose().to_owned(),
                email_confirmed: identity.email_confirmed,
            },
        );
        Ok(IdentityRecord {
            id,
            email: Some(identity.email.clone()),
        })
    }

    async fn delete_identity(&self, id: &IdentityId) -> Result<(), IdentityAdminError> {
        let mut state = self.lock();
        state.calls.push(IdentityCall::Delete { id: id.clone() });
        if let Some(error) = state.delete_failure.clone() {
            return Err(error);
        }
        match state.identities.remove(id) {
            Some(_) => Ok(()),
            None => Err(IdentityAdminError::not_found(id.to_string())),
        }
    }

    async fn update_password(
        &self,
        id: &IdentityId,
        password: &Password,
    ) -> Result<(), IdentityAdminError> {
        let mut state = self.lock();
        state
            .calls
            .push(IdentityCall::UpdatePassword { id: id.clone() });
        if let Some(error) = state.update_failure.clone() {
            return Err(error);
        }
        match state.identities.get_mut(id) {
            Some(stored) => {
                stored.password = password.expose().to_owned();
                Ok(())
            }
            None => Err(IdentityAdminError::not_found(id.to_string())),
        }
    }
}

#[derive(Default)]
struct ProfileState {
    rows: Vec<ProfileRecord>,
    attempts: usize,
    failure: Option<ProfileStoreError>,
}

/// Profile table keeping rows in memory with a primary key on `id`.
#[derive(Default)]
pub struct InMemoryProfileStore {
    state: Mutex<ProfileState>,
}

impl InMemoryProfileStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProfileState> {
        self.state.lock().expect("profile state lock")
    }

    pub fn fail_inserts_with(&self, error: ProfileStoreError) {
        self.lock().failure = Some(error);
    }

    pub fn rows(&self) -> Vec<ProfileRecord> {
        self.lock().rows.clone()
    }

    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn insert_profile(&self, profile: &ProfileRecord) -> Result<(), ProfileStoreError> {
        let mut state = self.lock();
        state.attempts += 1;
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }
        if state.rows.iter().any(|row| row.id == profile.id) {
            return Err(ProfileStoreError::constraint("duplicate key value (23505)"));
        }
        state.rows.push(profile.clone());
        Ok(())
    }
}

/// The two fakes plus services wired over them.
pub struct Subsystems {
    pub identities: Arc<InMemoryIdentityAdmin>,
    pub profiles: Arc<InMemoryProfileStore>,
}

impl Subsystems {
    pub fn new() -> Self {
        Self {
            identities: InMemoryIdentityAdmin::new(),
            profiles: InMemoryProfileStore::new(),
        }
    }

    pub fn timeout() -> CallTimeout {
        CallTimeout::new(Duration::from_millis(500))
    }

    pub fn provisioning(&self) -> ProvisioningService {
        ProvisioningService::new(
            Arc::clone(&self.identities),
            Arc::clone(&self.profiles),
            Self::timeout(),
        )
    }

    pub fn credentials(&self) -> CredentialResetService<InMemoryIdentityAdmin> {
        CredentialResetService::new(Arc::clone(&self.identities), Self::timeout())
    }

    pub fn http_state(&self) -> HttpState {
        HttpState::new(Arc::new(self.provisioning()), Arc::new(self.credentials()))
    }

    /// Every profile row has an identity and every identity has a profile.
    pub fn assert_consistent(&self) {
        let mut identity_ids: Vec<String> = self
            .identities
            .ids()
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut profile_ids: Vec<String> = self
            .profiles
            .rows()
            .iter()
            .map(|row| row.id.to_string())
            .collect();
        identity_ids.sort();
        profile_ids.sort();
        assert_eq!(identity_ids, profile_ids, "identities and profiles diverged");
    }
}

/// A complete `create-user` body.
pub fn create_user_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "pw123456",
        "name": "A",
        "role": "admin",
        "organisation_id": "org1",
    })
}
