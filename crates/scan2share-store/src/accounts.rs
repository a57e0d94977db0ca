use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use scan2share_types::session::OAuthUser;
use scan2share_types::{ProfileUpdate, SignUp, User};

use crate::error::StoreError;
use crate::state::{AppState, new_id};

/// Provider recorded on accounts created from an OAuth session.
const OAUTH_PROVIDER: &str = "google";

fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::PasswordHash(e.to_string()))
}

fn password_matches(user: &User, password: &str) -> bool {
    let Some(stored) = user.password_hash.as_deref() else {
        return false;
    };
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

impl AppState {
    /// Register a new account and sign it in.
    pub fn sign_up(&self, data: SignUp, now_ms: i64) -> Result<(Self, User), StoreError> {
        if self.users.contains_key(&data.email) {
            return Err(StoreError::EmailTaken(data.email));
        }

        let user = User {
            id: new_id(),
            password_hash: Some(hash_password(&data.password)?),
            email: data.email,
            full_name: data.full_name,
            title: data.title,
            about: data.about,
            location: data.location,
            website: data.website,
            skills: data.skills,
            experience: data.experience,
            avatar: data.avatar,
            provider: None,
            created_at: now_ms,
        };

        Ok((self.activate(user.clone()), user))
    }

    /// Sign in on an exact email and password match. A mismatch changes nothing.
    pub fn sign_in(&self, email: &str, password: &str) -> (Self, Option<User>) {
        match self.users.get(email) {
            Some(user) if password_matches(user, password) => {
                let user = user.clone();
                (self.activate(user.clone()), Some(user))
            }
            _ => (self.clone(), None),
        }
    }

    /// Sign in an externally authenticated identity, creating a passwordless
    /// account for it on first sight. Existing accounts are activated as-is.
    pub fn sign_in_with_oauth(&self, identity: &OAuthUser, now_ms: i64) -> (Self, User) {
        let user = match self.users.get(&identity.email) {
            Some(existing) => existing.clone(),
            None => User {
                id: new_id(),
                email: identity.email.clone(),
                password_hash: None,
                full_name: identity.name.clone().unwrap_or_default(),
                title: "User".into(),
                about: String::new(),
                location: None,
                website: None,
                skills: None,
                experience: None,
                avatar: identity.image.clone(),
                provider: Some(OAUTH_PROVIDER.into()),
                created_at: now_ms,
            },
        };

        (self.activate(user.clone()), user)
    }

    pub fn sign_out(&self) -> Self {
        Self {
            current_user: None,
            is_authenticated: false,
            ..self.clone()
        }
    }

    /// Merge `update` into the signed-in user. Returns `Ok(None)` when nobody
    /// is signed in. Changing the email to one held by another account fails.
    pub fn update_profile(
        &self,
        update: ProfileUpdate,
    ) -> Result<(Self, Option<User>), StoreError> {
        let Some(current) = self.current_user() else {
            return Ok((self.clone(), None));
        };

        let mut user = current.clone();
        let new_email = update
            .email
            .clone()
            .filter(|email| *email != user.email);
        if let Some(email) = &new_email {
            if self.users.contains_key(email) {
                return Err(StoreError::EmailTaken(email.clone()));
            }
        }

        let mut next = self.clone();
        next.users.remove(&user.email);
        if let Some(email) = new_email {
            user.email = email;
        }
        user.merge(update);

        Ok((next.activate(user.clone()), Some(user)))
    }

    /// Store `user` under its email and make it the signed-in account.
    fn activate(&self, user: User) -> Self {
        let mut next = self.clone();
        next.current_user = Some(user.email.clone());
        next.is_authenticated = true;
        next.users.insert(user.email.clone(), user);
        next
    }
}
