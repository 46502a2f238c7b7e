//! Admin session
//!
//! Login validates the form, exchanges the credentials for a bearer token,
//! stores the token where the API client reads it and records the user in
//! the persisted auth store. Logout undoes both.

use std::sync::Arc;
use thiserror::Error;

use crate::api::{ApiClient, ApiError, AuthApi};
use crate::models::AuthUser;
use crate::storage::{KeyValueStore, StorageError, AUTH_TOKEN_KEY};
use crate::store::AuthStore;
use crate::validation::{LoginForm, ValidationErrors};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Login response did not include a token")]
    MissingToken,

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Signed-in state of the admin client
#[derive(Clone)]
pub struct AdminSession {
    auth_api: AuthApi,
    storage: Arc<dyn KeyValueStore>,
    auth: AuthStore,
}

impl AdminSession {
    pub fn new(client: Arc<ApiClient>, storage: Arc<dyn KeyValueStore>, auth: AuthStore) -> Self {
        Self {
            auth_api: AuthApi::new(client),
            storage,
            auth,
        }
    }

    /// Validate, authenticate and persist; returns the signed-in user
    pub async fn login(&self, form: &LoginForm) -> Result<AuthUser, SessionError> {
        form.validate()?;

        let response = self.auth_api.login(&form.email, &form.password).await?;
        let token = response.token().ok_or(SessionError::MissingToken)?;
        self.storage.set_item(AUTH_TOKEN_KEY, token)?;

        let email = form.email.trim();
        let user = response
            .profile()
            .map(|profile| profile.to_auth_user(email))
            .unwrap_or_else(|| AuthUser::admin(email));
        self.auth.login_as(user.clone())?;

        tracing::info!(email = %user.email, "Signed in");
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.storage.remove_item(AUTH_TOKEN_KEY)?;
        self.auth.logout()?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.auth.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn has_token(&self) -> bool {
        matches!(self.storage.get_item(AUTH_TOKEN_KEY), Ok(Some(token)) if !token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiSettings;
    use crate::storage::MemoryStore;

    fn offline_session(storage: MemoryStore) -> AdminSession {
        let storage: Arc<dyn KeyValueStore> = Arc::new(storage);
        let client = ApiClient::new(&ApiSettings::with_base_url("http://localhost:9/api/v1"), Arc::clone(&storage)).unwrap();
        let auth = AuthStore::open(Arc::clone(&storage));
        AdminSession::new(Arc::new(client), storage, auth)
    }

    #[tokio::test]
    async fn test_invalid_form_blocks_request() {
        let session = offline_session(MemoryStore::new());
        let err = session
            .login(&LoginForm::new("not-an-email", "123"))
            .await
            .unwrap_err();

        match err {
            SessionError::Validation(errors) => {
                assert_eq!(errors.email.as_deref(), Some("Invalid email address"));
                assert_eq!(errors.password.as_deref(), Some("Password must be at least 6 characters"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_token_and_user() {
        let storage = MemoryStore::new();
        storage.set_item(AUTH_TOKEN_KEY, "abc").unwrap();
        let session = offline_session(storage.clone());
        session.auth.login("admin@careoneclinics.com").unwrap();
        assert!(session.has_token());

        session.logout().unwrap();
        assert!(!session.has_token());
        assert!(session.current_user().is_none());
        assert!(storage.get_item(AUTH_TOKEN_KEY).unwrap().is_none());
    }
}
