use std::fmt;

use scan2share_types::session::{AuthStatus, OAuthSession};

use crate::state::AppState;

/// What a sync pass did to the local session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A passwordless account was created and signed in.
    Created,
    /// An existing account was signed in unchanged.
    Activated,
    /// The provider signed out, so the local session was closed.
    SignedOut,
    Unchanged,
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Activated => write!(f, "activated"),
            Self::SignedOut => write!(f, "signed_out"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

impl AppState {
    /// Reconcile the local session with the provider's reported status.
    ///
    /// Runs whenever the provider status changes. A local session that is
    /// already open is never replaced by a different provider identity.
    pub fn sync_oauth(&self, session: &OAuthSession, now_ms: i64) -> (Self, SyncOutcome) {
        match (session.status, &session.user) {
            (AuthStatus::Authenticated, Some(identity)) if !self.is_authenticated => {
                let outcome = if self.users.contains_key(&identity.email) {
                    SyncOutcome::Activated
                } else {
                    SyncOutcome::Created
                };
                let (next, _) = self.sign_in_with_oauth(identity, now_ms);
                (next, outcome)
            }
            (AuthStatus::Unauthenticated, _) if self.is_authenticated => {
                (self.sign_out(), SyncOutcome::SignedOut)
            }
            _ => (self.clone(), SyncOutcome::Unchanged),
        }
    }
}
