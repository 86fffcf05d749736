//! Identity provider contract
//!
//! The analysis client itself takes no dependency on authentication; the
//! persistence and credit collaborators gate every operation on the
//! identity reported here.

use tokio::sync::watch;

/// Authentication state as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn {
        user_id: String,
    },
}

impl AuthState {
    /// User id when signed in
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::SignedIn { user_id } => Some(user_id),
            Self::SignedOut => None,
        }
    }
}

/// Source of the current authenticated identity plus change notifications
pub trait IdentityProvider: Send + Sync {
    /// Currently authenticated user id, if any
    fn current_user(&self) -> Option<String>;

    /// Subscribe to auth state changes; the receiver starts at the current
    /// state
    fn watch(&self) -> watch::Receiver<AuthState>;
}

/// In-process identity source for tests and single-user CLI runs
#[derive(Debug)]
pub struct StaticIdentity {
    state: watch::Sender<AuthState>,
}

impl StaticIdentity {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(AuthState::SignedIn {
            user_id: user_id.into(),
        });
        Self { state }
    }

    pub fn signed_out() -> Self {
        let (state, _) = watch::channel(AuthState::SignedOut);
        Self { state }
    }

    /// Replace the auth state, waking any watchers
    pub fn set(&self, state: AuthState) {
        self.state.send_replace(state);
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<String> {
        self.state.borrow().user_id().map(str::to_string)
    }

    fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
