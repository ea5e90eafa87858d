mod blind_sigs;
mod error;
mod field;
mod keys;
mod utils;

pub use crate::blind_sigs::{
    blind, blind_sign, run, unblind, verify, BlindSignature, BlindSigner, BlindedMessage,
    BlindingFactor, Outcome, Requester, Signature,
};
pub use crate::error::{Error, Result};
pub use crate::field::{invert_mod, mul_mod, pow_mod, Scalar};
pub use crate::keys::{KeyPair, PublicKey, SecretKey, MIN_MODULUS_BITS};
pub use crate::utils::{
    digest_message, message_scalar, scalar_from_be_bytes, scalar_to_be_bytes, MESSAGE_LEN,
};
