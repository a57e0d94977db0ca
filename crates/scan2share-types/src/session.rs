use serde::{Deserialize, Serialize};

/// Authentication status as reported by the external OAuth provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Authenticated,
    Unauthenticated,
    /// The provider has not settled on a status yet.
    Loading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Externally authenticated session pushed into the store by the sync bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthSession {
    pub status: AuthStatus,
    #[serde(default)]
    pub user: Option<OAuthUser>,
}

impl OAuthSession {
    pub fn authenticated(user: OAuthUser) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user: Some(user),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            user: None,
        }
    }
}
