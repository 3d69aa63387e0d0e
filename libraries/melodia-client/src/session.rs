//! Auth session store.
//!
//! Holds the current identity and owns the token lifecycle:
//!
//! ```text
//!   Unauthenticated --login--> Authenticating --ok--> Authenticated
//!          ^                          |                    |
//!          +-------- failure ---------+                    |
//!          +---------------- logout / 401 -----------------+
//! ```
//!
//! Observers subscribe to a `watch` channel of [`SessionState`].

use crate::claims::decode_roles;
use crate::client::MusicClient;
use crate::error::Result;
use melodia_core::User;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Current identity plus the bearer token in client-local storage.
pub struct SessionStore {
    client: MusicClient,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Create an unauthenticated session over `client`'s token storage.
    ///
    /// Call [`check_session`](Self::check_session) once at start to restore
    /// a stored session.
    pub fn new(client: MusicClient) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self { client, state }
    }

    pub fn client(&self) -> &MusicClient {
        &self.client
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Authenticated(_))
    }

    /// Whether admin views should be offered.
    pub fn is_admin(&self) -> bool {
        self.state.borrow().user().is_some_and(User::is_admin)
    }

    /// Receive every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Log in and establish a session.
    ///
    /// On success the token is stored and its role claims are merged into
    /// the user. On any failure the session ends up unauthenticated with no
    /// stored token.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User> {
        self.set_state(SessionState::Authenticating);

        let login = match self.client.auth().login(identifier, password).await {
            Ok(login) => login,
            Err(e) => {
                self.invalidate();
                return Err(e);
            }
        };

        let mut user = login.user;
        match login.token {
            Some(token) => {
                if let Err(e) = self.client.tokens().save(&token) {
                    self.invalidate();
                    return Err(e);
                }
                merge_roles(&mut user, &token);
            }
            None => warn!("Login response carried no token; requests stay anonymous"),
        }

        info!(username = %user.username, admin = user.is_admin(), "Session established");
        self.set_state(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    /// Register a new account. The session is not touched.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        self.client.auth().register(username, email, password).await
    }

    /// End the session.
    ///
    /// The backend call is best-effort; the local token and state are
    /// cleared regardless of its outcome.
    pub async fn logout(&self) {
        if let Err(e) = self.client.auth().logout().await {
            debug!(error = %e, "Backend logout failed; clearing local session anyway");
        }
        self.invalidate();
        info!("Logged out");
    }

    /// Restore a session from the stored token.
    ///
    /// Never fails: any problem leaves the session unauthenticated. A
    /// 401/403 additionally discards the stored token as expired.
    pub async fn check_session(&self) -> Option<User> {
        let Some(token) = self.client.tokens().load() else {
            debug!("No stored token; starting anonymous");
            self.set_state(SessionState::Unauthenticated);
            return None;
        };

        self.set_state(SessionState::Authenticating);

        match self.client.auth().me().await {
            Ok(mut user) => {
                merge_roles(&mut user, &token);
                info!(username = %user.username, "Session restored");
                self.set_state(SessionState::Authenticated(user.clone()));
                Some(user)
            }
            Err(e) if e.is_unauthorized() => {
                debug!("Stored token rejected; discarding it");
                self.invalidate();
                None
            }
            Err(e) => {
                debug!(error = %e, "Session check failed; starting anonymous");
                self.set_state(SessionState::Unauthenticated);
                None
            }
        }
    }

    /// Pass a result through, ending the session if it is a 401.
    pub fn handle_unauthorized<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.status() == Some(401) && self.is_authenticated() {
                warn!("Token expired or revoked; ending session");
                self.invalidate();
            }
        }
        result
    }

    /// Drop the local session unconditionally.
    pub fn invalidate(&self) {
        if let Err(e) = self.client.tokens().clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        self.set_state(SessionState::Unauthenticated);
    }

    fn set_state(&self, state: SessionState) {
        self.state.send_replace(state);
    }
}

/// Merge the token's role claims into `user`, skipping ones already present.
fn merge_roles(user: &mut User, token: &str) {
    for role in decode_roles(token) {
        if !user.roles.contains(&role) {
            user.roles.push(role);
        }
    }
}
