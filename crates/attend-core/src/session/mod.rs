//! Session lifecycle: login, logout, expiry detection and teardown.

pub mod events;
pub mod store;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use reqwest::Method;
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::gateway::{ApiError, ApiResult, Gateway, decode};
use crate::token;
use crate::types::LoginResponse;
use events::SessionEvents;
use store::SessionStore;

/// User-facing notification shown when an authenticated session ends
/// because the credential expired.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// How often the watcher re-evaluates the credential while authenticated.
pub const EXPIRY_CHECK_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Lifecycle phases.
///
/// `Expired` is anonymous-with-a-reason: follow-up calls fail fast with the
/// session-expired message instead of a generic not-authenticated error.
/// Login behaves identically from either non-authenticated phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Anonymous,
    Authenticated,
    Expired,
}

/// Owns session state transitions.
///
/// Expiry can be reported twice for one session (timer check racing a
/// 401-triggered teardown); both paths collapse into the same idempotent
/// transition, and the session-expired notification fires exactly once per
/// transition out of `Authenticated`.
pub struct SessionManager {
    store: Arc<SessionStore>,
    gateway: Gateway,
    events: Arc<SessionEvents>,
    phase: Mutex<Phase>,
}

impl SessionManager {
    /// Builds the controller and routes the gateway's 401 signal into the
    /// expiry teardown. The initial phase reflects what hydration restored.
    pub fn new(
        store: Arc<SessionStore>,
        gateway: Gateway,
        events: Arc<SessionEvents>,
    ) -> Arc<Self> {
        let phase = if store.credential().is_some() {
            Phase::Authenticated
        } else {
            Phase::Anonymous
        };
        let manager = Arc::new(Self {
            store,
            gateway,
            events,
            phase: Mutex::new(phase),
        });

        let weak: Weak<Self> = Arc::downgrade(&manager);
        manager.events.on_token_expired(move || {
            if let Some(manager) = weak.upgrade() {
                manager.handle_expiry();
            }
        });

        manager
    }

    pub fn phase(&self) -> Phase {
        *self.phase_lock()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == Phase::Authenticated
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Subscribes to session teardown caused by expiry.
    pub fn on_session_expired(&self, listener: impl Fn(&str) + Send + Sync + 'static) {
        self.events.on_session_expired(listener);
    }

    /// Subscribes to explicit logout.
    pub fn on_logged_out(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.events.on_logged_out(listener);
    }

    /// Authenticates against `POST /login` and populates the session.
    ///
    /// The email is normalized to lower-case before it is sent. On failure
    /// the prior phase is kept and the server's message (or "Login failed"
    /// when the response is unusable) is returned.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        let body = json!({
            "email": email.trim().to_lowercase(),
            "password": password,
        });

        self.store.set_loading(true);
        let result = self
            .gateway
            .request(Method::POST, "/login", Some(&body))
            .await;
        self.store.set_loading(false);

        let payload = result?;
        let login: LoginResponse = decode(payload).map_err(|_| ApiError::parse("Login failed"))?;

        self.store.set_credential(Some(login.token));
        self.store.set_identity(Some(login.user));
        *self.phase_lock() = Phase::Authenticated;
        info!("logged in");
        Ok(())
    }

    /// Clears the session pair and notifies logged-out subscribers.
    pub fn logout(&self) {
        self.store.set_credential(None);
        self.store.set_identity(None);
        *self.phase_lock() = Phase::Anonymous;
        debug!("logged out");
        self.events.emit_logged_out();
    }

    /// Tears the session down after expiry (local check or server 401).
    ///
    /// Idempotent: only the transition out of `Authenticated` clears state
    /// and emits the session-expired notification, so repeated signals are
    /// no-ops once the session is already gone.
    pub fn handle_expiry(&self) {
        {
            let mut phase = self.phase_lock();
            if *phase != Phase::Authenticated {
                return;
            }
            *phase = Phase::Expired;
        }
        self.store.set_credential(None);
        self.store.set_identity(None);
        warn!("session expired");
        self.events.emit_session_expired(SESSION_EXPIRED_MESSAGE);
    }

    /// Runs one expiry evaluation; returns true when a teardown happened.
    pub fn check_expiry_now(&self) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        let credential = self.store.credential();
        if token::is_expired(credential.as_deref()) {
            self.handle_expiry();
            return true;
        }
        false
    }

    /// Spawns the periodic expiry watcher.
    ///
    /// The timer runs independently of in-flight requests; a request that
    /// surfaces its own 401 while the timer fires collapses into the same
    /// idempotent teardown.
    pub fn spawn_expiry_watch(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the immediate first tick; hydration already checked expiry
            ticker.tick().await;
            loop {
                ticker.tick().await;
                manager.check_expiry_now();
            }
        })
    }

    fn phase_lock(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
