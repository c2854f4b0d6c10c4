use crate::domain::entities::user::{LoginPayload, Registration, UserUpdate};
use crate::domain::error::DomainError;
use crate::domain::events::DataEvent;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::inventory_api::InventoryApi;
use crate::domain::ports::local_store::{Session, SessionStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Login/logout lifecycle. The bearer token lives on the API client and
/// in the local store; both are replaced together on login and cleared
/// together on logout or on an unauthorized signal from the HTTP layer.
pub struct SessionUseCase {
    api: Arc<dyn InventoryApi>,
    store: Arc<dyn SessionStore>,
}

impl SessionUseCase {
    pub fn new(
        api: Arc<dyn InventoryApi>,
        store: Arc<dyn SessionStore>,
        bus: &dyn EventBus,
    ) -> Self {
        // Forced logout: the API client already dropped its token when it
        // saw the 401; drop the persisted copy too.
        let store_for_handler = store.clone();
        bus.subscribe(Box::new(move |event| {
            if matches!(event, DataEvent::Unauthorized) {
                if let Err(e) = store_for_handler.clear() {
                    warn!("failed to clear session after unauthorized response: {e}");
                }
            }
        }));

        Self { api, store }
    }

    /// Prime the API client with a previously stored token, if any.
    pub fn restore(&self) -> Result<Option<Session>, DomainError> {
        let session = self.store.load()?;
        if let Some(s) = &session {
            self.api.set_token(Some(s.token.clone()));
            debug!("restored session for {:?}", s.user.as_ref().map(|u| &u.email));
        }
        Ok(session)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, DomainError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "Email and password are required".into(),
            ));
        }

        let payload = self.api.login(email.trim(), password).await?;
        self.api.set_token(Some(payload.token.clone()));
        self.store.save(&Session {
            token: payload.token.clone(),
            user: Some(payload.user.clone()),
            saved_at: Utc::now(),
        })?;
        Ok(payload)
    }

    /// Register, then log straight in with the same credentials.
    pub async fn register(&self, data: &Registration) -> Result<LoginPayload, DomainError> {
        if data.name.trim().is_empty() || data.email.trim().is_empty() {
            return Err(DomainError::Validation("Name and email are required".into()));
        }
        if data.password.is_empty() {
            return Err(DomainError::Validation("Password is required".into()));
        }

        self.api.register(data).await?;
        self.login(&data.email, &data.password).await
    }

    pub fn logout(&self) -> Result<(), DomainError> {
        self.api.set_token(None);
        self.store.clear()
    }

    pub fn current(&self) -> Result<Option<Session>, DomainError> {
        self.store.load()
    }

    pub async fn update_profile(&self, data: &UserUpdate) -> Result<(), DomainError> {
        self.api.update_user(data).await?;

        // Keep the stored user in step with a name change.
        if let Some(name) = &data.name {
            if let Some(mut session) = self.store.load()? {
                if let Some(user) = session.user.as_mut() {
                    user.name = name.clone();
                    self.store.save(&session)?;
                }
            }
        }
        Ok(())
    }

    pub async fn request_recovery(&self, email: &str) -> Result<bool, DomainError> {
        if email.trim().is_empty() {
            return Err(DomainError::Validation("Email is required".into()));
        }
        self.api.request_recovery(email.trim()).await
    }

    pub async fn login_with_temp_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<LoginPayload, DomainError> {
        let payload = self.api.login_with_temp_code(email.trim(), code).await?;
        self.api.set_token(Some(payload.token.clone()));
        self.store.save(&Session {
            token: payload.token.clone(),
            user: Some(payload.user.clone()),
            saved_at: Utc::now(),
        })?;
        Ok(payload)
    }
}
