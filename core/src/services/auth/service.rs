//! Main phone login service implementation

use std::sync::Arc;

use zm_shared::config::OtpConfig;
use zm_shared::phone::{is_valid_phone_number, mask_phone_number, normalize_phone_number};

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult};
use crate::services::session::SessionService;
use crate::services::verification::{
    ClockTrait, DeliveryServiceTrait, IssuedCode, KeyValueStoreTrait, OtpAuthenticator, SystemClock,
};

use super::types::LoginOutcome;

/// Phone sign-in: request a code, then exchange it for a session
///
/// The authenticator leaves the resend cooldown to its caller; this service
/// is that caller and refuses sends inside the window.
pub struct PhoneLoginService<S, D, C = SystemClock>
where
    S: KeyValueStoreTrait,
    D: DeliveryServiceTrait,
    C: ClockTrait,
{
    /// Code issue and verification
    authenticator: Arc<OtpAuthenticator<S, D, C>>,
    /// Signed-in user storage
    session: Arc<SessionService<S, C>>,
}

impl<S, D> PhoneLoginService<S, D, SystemClock>
where
    S: KeyValueStoreTrait,
    D: DeliveryServiceTrait,
{
    /// Build the service and its collaborators over one store using wall-clock time
    pub fn new(store: Arc<S>, delivery: Arc<D>, config: OtpConfig) -> Self {
        Self::with_clock(store, delivery, Arc::new(SystemClock), config)
    }
}

impl<S, D, C> PhoneLoginService<S, D, C>
where
    S: KeyValueStoreTrait,
    D: DeliveryServiceTrait,
    C: ClockTrait,
{
    /// Build the service and its collaborators over one store and clock
    pub fn with_clock(store: Arc<S>, delivery: Arc<D>, clock: Arc<C>, config: OtpConfig) -> Self {
        let authenticator = Arc::new(OtpAuthenticator::with_clock(
            store.clone(),
            delivery,
            clock.clone(),
            config,
        ));
        let session = Arc::new(SessionService::with_clock(store, clock));
        Self::from_parts(authenticator, session)
    }

    /// Assemble from existing services
    pub fn from_parts(
        authenticator: Arc<OtpAuthenticator<S, D, C>>,
        session: Arc<SessionService<S, C>>,
    ) -> Self {
        Self {
            authenticator,
            session,
        }
    }

    pub fn authenticator(&self) -> &OtpAuthenticator<S, D, C> {
        &self.authenticator
    }

    pub fn session(&self) -> &SessionService<S, C> {
        &self.session
    }

    /// Send a sign-in code to a phone number
    ///
    /// This method:
    /// 1. Validates and normalises the phone number
    /// 2. Refuses while the resend cooldown is running
    /// 3. Issues a code through the authenticator
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCode)` - The issued code; check `delivery` for the send outcome
    /// * `Err(DomainError)` - Invalid phone number, cooldown, or store fault
    pub async fn request_code(&self, raw_phone: &str) -> DomainResult<IssuedCode> {
        let phone = self.validate_phone(raw_phone)?;

        if !self.authenticator.can_send(&phone).await? {
            let retry_after_seconds = self.resend_available_in(&phone).await?;
            tracing::warn!(
                phone = %mask_phone_number(&phone),
                retry_after_seconds,
                event = "rate_limit_exceeded",
                "Code requested during resend cooldown"
            );
            return Err(AuthError::RateLimitExceeded {
                retry_after_seconds,
            }
            .into());
        }

        self.authenticator.issue(&phone).await
    }

    /// Send another code; same rules as `request_code`
    pub async fn resend_code(&self, phone: &str) -> DomainResult<IssuedCode> {
        tracing::debug!(phone = %mask_phone_number(phone), "Resend requested");
        self.request_code(phone).await
    }

    /// Verify a submitted code and sign the user in on success
    ///
    /// Every rejection carries the same user-facing message.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginOutcome)` - Signed in, or rejected with the verification result
    /// * `Err(DomainError)` - Invalid phone number or store fault
    pub async fn submit_code(&self, raw_phone: &str, code: &str) -> DomainResult<LoginOutcome> {
        let phone = self.validate_phone(raw_phone)?;

        let result = self.authenticator.verify(&phone, code).await?;
        if !result.is_valid() {
            return Ok(LoginOutcome::Rejected {
                result,
                message: result.user_message(),
            });
        }

        let user = self.session.login(User::from_phone(phone)).await?;
        Ok(LoginOutcome::SignedIn { user })
    }

    /// Whole seconds until another code may be requested; 0 when allowed now
    pub async fn resend_available_in(&self, phone: &str) -> DomainResult<i64> {
        let remaining = self.authenticator.cooldown_remaining(phone).await?;
        let millis = remaining.num_milliseconds();
        Ok((millis + 999) / 1000)
    }

    /// End the current session
    pub async fn logout(&self) -> DomainResult<()> {
        self.session.logout().await
    }

    fn validate_phone(&self, raw_phone: &str) -> DomainResult<String> {
        if !is_valid_phone_number(raw_phone) {
            return Err(AuthError::InvalidPhoneFormat {
                phone: mask_phone_number(raw_phone),
            }
            .into());
        }
        Ok(normalize_phone_number(raw_phone))
    }
}
