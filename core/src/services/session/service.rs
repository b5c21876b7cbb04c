//! Session service implementation

use std::sync::Arc;

use zm_shared::phone::mask_phone_number;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult, StoreError};
use crate::services::verification::{ClockTrait, KeyValueStoreTrait, SystemClock};

/// Store key of the signed-in user
pub const SESSION_KEY: &str = "user";

/// Keeps track of the locally signed-in user
pub struct SessionService<S, C = SystemClock>
where
    S: KeyValueStoreTrait,
    C: ClockTrait,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S> SessionService<S, SystemClock>
where
    S: KeyValueStoreTrait,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }
}

impl<S, C> SessionService<S, C>
where
    S: KeyValueStoreTrait,
    C: ClockTrait,
{
    pub fn with_clock(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Sign `user` in, replacing any existing session
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user, marked as authenticated
    /// * `Err(DomainError)` - `MissingIdentifier` without an email or phone
    ///   number, or a store fault
    pub async fn login(&self, user: User) -> DomainResult<User> {
        if !user.has_identifier() {
            return Err(AuthError::MissingIdentifier.into());
        }

        let user = user.authenticate(self.clock.now());
        let raw = serde_json::to_string(&user).map_err(|e| StoreError::Corrupt {
            key: SESSION_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(SESSION_KEY, &raw).await?;

        tracing::info!(
            phone = %user.phone_number.as_deref().map(mask_phone_number).unwrap_or_default(),
            has_email = user.email.is_some(),
            event = "session_started",
            "User signed in"
        );

        Ok(user)
    }

    /// The signed-in user, if any
    ///
    /// An entry that cannot be parsed is removed and reported as no session.
    pub async fn current_user(&self) -> DomainResult<Option<User>> {
        let Some(raw) = self.store.get(SESSION_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event = "session_discarded",
                    "Discarding unreadable stored session"
                );
                self.store.delete(SESSION_KEY).await?;
                Ok(None)
            }
        }
    }

    /// Whether a signed-in user is stored
    pub async fn is_authenticated(&self) -> DomainResult<bool> {
        Ok(self
            .current_user()
            .await?
            .is_some_and(|user| user.is_authenticated))
    }

    /// Sign out; a no-op when nobody is signed in
    pub async fn logout(&self) -> DomainResult<()> {
        self.store.delete(SESSION_KEY).await?;
        tracing::info!(event = "session_ended", "User signed out");
        Ok(())
    }
}
