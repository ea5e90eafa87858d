use thiserror::Error;

/// Specialisation of `std::Result`.
pub type Result<T, E = BlindSignatureError> = std::result::Result<T, E>;
pub type Error = BlindSignatureError;

#[derive(Error, Debug)]
/// error variants.
pub enum BlindSignatureError {
    /// The entropy source could not supply random bytes.
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(#[from] rand::Error),

    /// A supplied value violates an operation's contract.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The value shares a common factor with the modulus, so it has
    /// no modular inverse.
    #[error("value is not invertible modulo the key modulus")]
    NotInvertible,

    /// Key material is structurally malformed.
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),
}
