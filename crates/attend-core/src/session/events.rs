//! Cross-component session notifications.
//!
//! Explicit observer registration instead of ambient global events: the
//! gateway fires `token_expired` on a 401, the lifecycle controller fans it
//! out to `session_expired` / `logged_out` subscribers (a UI's toast
//! hooks). Delivery is at-least-once; subscriber effects must be
//! idempotent. Listeners must not register further listeners from inside a
//! callback.

use std::sync::{Mutex, MutexGuard, PoisonError};

type Listener = Box<dyn Fn() + Send + Sync>;
type MessageListener = Box<dyn Fn(&str) + Send + Sync>;

/// Registry of session event subscribers.
#[derive(Default)]
pub struct SessionEvents {
    token_expired: Mutex<Vec<Listener>>,
    session_expired: Mutex<Vec<MessageListener>>,
    logged_out: Mutex<Vec<Listener>>,
}

fn lock<T>(registry: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionEvents {
    /// Subscribes to the gateway's raw 401 signal. Most consumers want
    /// [`SessionEvents::on_session_expired`] instead; this hook is how the
    /// lifecycle controller learns about server-side rejection.
    pub fn on_token_expired(&self, listener: impl Fn() + Send + Sync + 'static) {
        lock(&self.token_expired).push(Box::new(listener));
    }

    /// Subscribes to session teardown caused by expiry. The callback
    /// receives the user-facing message to surface.
    pub fn on_session_expired(&self, listener: impl Fn(&str) + Send + Sync + 'static) {
        lock(&self.session_expired).push(Box::new(listener));
    }

    /// Subscribes to explicit logout.
    pub fn on_logged_out(&self, listener: impl Fn() + Send + Sync + 'static) {
        lock(&self.logged_out).push(Box::new(listener));
    }

    pub(crate) fn emit_token_expired(&self) {
        for listener in lock(&self.token_expired).iter() {
            listener();
        }
    }

    pub(crate) fn emit_session_expired(&self, message: &str) {
        for listener in lock(&self.session_expired).iter() {
            listener(message);
        }
    }

    pub(crate) fn emit_logged_out(&self) {
        for listener in lock(&self.logged_out).iter() {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn listeners_fire_in_registration_order() {
        let events = SessionEvents::default();
        let count = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&count);
        events.on_logged_out(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let seen = Arc::clone(&count);
        events.on_logged_out(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        events.emit_logged_out();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn session_expired_carries_message() {
        let events = SessionEvents::default();
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();

        let sink = Arc::clone(&seen);
        events.on_session_expired(move |message| {
            lock_vec(&sink).push(message.to_string());
        });

        events.emit_session_expired("expired");
        assert_eq!(lock_vec(&seen).as_slice(), ["expired".to_string()]);
    }

    fn lock_vec(v: &Mutex<Vec<String>>) -> MutexGuard<'_, Vec<String>> {
        v.lock().unwrap()
    }
}
