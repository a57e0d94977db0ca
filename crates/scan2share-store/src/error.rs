/// Errors a store operation can reject with.
///
/// Unknown ids are not errors: the reducer reports them as `None`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Registration or profile update would give two accounts the same email.
    #[error("user with email {0} already exists")]
    EmailTaken(String),

    /// A credit or debit would leave the balance infinite or NaN.
    #[error("balance would become non-finite: {0}")]
    NonFiniteBalance(f64),

    /// Password could not be hashed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}
