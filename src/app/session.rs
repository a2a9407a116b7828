//! The logged-in session shared by every page controller.
//!
//! [`Session`] replaces a process-wide singleton with an explicit value that is
//! created once, hydrated from persisted storage, handed to controllers by
//! reference, and mutated only through login, registration and logout.
//!
//! # Lifecycle
//!
//! ```text
//! new()  ──hydrate()──▶  ready (user or none)  ──login/register──▶  user
//!  loading = true          loading = false      ◀──────logout──────
//! ```
//!
//! Subscribers registered with [`Session::subscribe`] are called after every
//! change of user, in registration order.

use crate::domain::error::Result;
use crate::domain::{Registration, User};
use crate::services::AuthService;

/// Handle returned by [`Session::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(Option<&User>)>;

/// Authenticated-user state with persisted backing.
pub struct Session {
    auth: AuthService,
    user: Option<User>,
    loading: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Session {
    /// Creates an un-hydrated session: no user, `loading` set.
    #[must_use]
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth,
            user: None,
            loading: true,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates and hydrates in one step.
    #[must_use]
    pub fn restore(auth: AuthService) -> Self {
        let mut session = Self::new(auth);
        session.hydrate();
        session
    }

    /// Loads the persisted user. Only the first call has any effect.
    pub fn hydrate(&mut self) -> Option<&User> {
        if self.loading {
            let _span = tracing::debug_span!("session_hydrate").entered();
            let user = self.auth.current_user();
            tracing::debug!(found = user.is_some(), "session hydrated");
            self.loading = false;
            self.set_user(user);
        }
        self.user.as_ref()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// `true` until [`hydrate`](Self::hydrate) has run.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Logs in and, on success, makes the user current.
    ///
    /// # Errors
    ///
    /// Propagates [`AuthService::login`] errors; the session is unchanged.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let user = self.auth.login(email, password)?;
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Registers and, on success, makes the new user current.
    ///
    /// # Errors
    ///
    /// Propagates [`AuthService::register`] errors; the session is unchanged.
    pub fn register(&mut self, registration: Registration) -> Result<User> {
        let user = self.auth.register(registration)?;
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Clears the persisted and in-memory user.
    pub fn logout(&mut self) {
        self.auth.logout();
        self.set_user(None);
    }

    /// Registers a listener called with the new user after each change.
    pub fn subscribe(&mut self, listener: impl FnMut(Option<&User>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn set_user(&mut self, user: Option<User>) {
        self.user = user;
        let current = self.user.as_ref();
        for (_, listener) in &mut self.listeners {
            listener(current);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user.as_ref().map(|u| &u.id))
            .field("loading", &self.loading)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryStore;
    use crate::storage::{MemorySessionStore, SessionStore};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn auth_with(persisted: Arc<MemorySessionStore>) -> AuthService {
        AuthService::new(Arc::new(MemoryStore::new()), persisted)
    }

    fn registration(username: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "secret1".to_string(),
        }
    }

    /// Listener that records the username it is called with.
    fn recorder(session: &mut Session) -> (SubscriptionId, Rc<RefCell<Vec<Option<String>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = session.subscribe(move |user| sink.borrow_mut().push(user.map(|u| u.username.clone())));
        (id, seen)
    }

    #[test]
    fn loading_until_hydrated() {
        let persisted = Arc::new(MemorySessionStore::new());
        let mut session = Session::new(auth_with(persisted));
        assert!(session.is_loading());
        assert!(session.user().is_none());

        assert!(session.hydrate().is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn hydrate_runs_once() {
        let persisted = Arc::new(MemorySessionStore::new());
        let mut session = Session::new(auth_with(Arc::clone(&persisted)));
        session.hydrate();

        let late = registration("late").into_user();
        persisted.save(&late).unwrap();
        assert!(session.hydrate().is_none());
    }

    #[test]
    fn restore_picks_up_persisted_user() {
        let user = registration("ana").into_user();
        let persisted = Arc::new(MemorySessionStore::with_user(user.clone()));
        let session = Session::restore(auth_with(persisted));
        assert!(!session.is_loading());
        assert_eq!(session.user(), Some(&user));
    }

    #[test]
    fn listeners_see_every_change() {
        let mut session = Session::restore(auth_with(Arc::new(MemorySessionStore::new())));
        let (_, seen) = recorder(&mut session);

        session.register(registration("ana")).unwrap();
        session.logout();
        session.login("ana@example.com", "secret1").unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![Some("ana".to_string()), None, Some("ana".to_string())]
        );
    }

    #[test]
    fn failed_login_notifies_nobody() {
        let mut session = Session::restore(auth_with(Arc::new(MemorySessionStore::new())));
        let (_, seen) = recorder(&mut session);

        assert!(session.login("ghost@example.com", "secret1").is_err());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let mut session = Session::restore(auth_with(Arc::new(MemorySessionStore::new())));
        let (id, seen) = recorder(&mut session);

        session.register(registration("ana")).unwrap();
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.logout();

        assert_eq!(*seen.borrow(), vec![Some("ana".to_string())]);
    }
}
