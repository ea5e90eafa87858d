use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::Scalar;
use crate::utils::scalar_from_be_bytes;

/// Structural floor for the modulus size. A modulus this large always
/// has room for a 32-byte message representative, and toy keys that
/// cannot carry one are rejected up front.
pub const MIN_MODULUS_BITS: u64 = 512;

/// RSA public key `(n, e)`, supplied by an external key-generation
/// collaborator. Construction validates structure only; the crate never
/// generates or persists keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    n: Scalar,
    e: Scalar,
}

impl PublicKey {
    pub fn new(n: Scalar, e: Scalar) -> Result<Self> {
        validate_modulus(&n)?;
        validate_public_exponent(&e, &n)?;
        Ok(Self { n, e })
    }

    /// Big-endian byte-string constructor, the format external key
    /// collaborators conventionally export.
    pub fn from_be_bytes(n: &[u8], e: &[u8]) -> Result<Self> {
        Self::new(scalar_from_be_bytes(n), scalar_from_be_bytes(e))
    }

    pub fn n(&self) -> &Scalar {
        &self.n
    }

    pub fn e(&self) -> &Scalar {
        &self.e
    }

    /// Octet length of the modulus, which is also the size of the
    /// random byte string a blinding factor is sampled from.
    pub fn modulus_len(&self) -> usize {
        ((self.n.bits() + 7) / 8) as usize
    }
}

/// RSA secret key `(n, e, d)`. Carries the public exponent so the
/// matching `PublicKey` can be derived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey {
    n: Scalar,
    e: Scalar,
    d: Scalar,
}

impl SecretKey {
    pub fn new(n: Scalar, e: Scalar, d: Scalar) -> Result<Self> {
        validate_modulus(&n)?;
        validate_public_exponent(&e, &n)?;
        if d.bits() == 0 || d >= n {
            return Err(Error::InvalidKey(
                "private exponent must lie in (0, n)",
            ));
        }
        Ok(Self { n, e, d })
    }

    pub fn from_be_bytes(n: &[u8], e: &[u8], d: &[u8]) -> Result<Self> {
        Self::new(
            scalar_from_be_bytes(n),
            scalar_from_be_bytes(e),
            scalar_from_be_bytes(d),
        )
    }

    pub fn n(&self) -> &Scalar {
        &self.n
    }

    pub fn d(&self) -> &Scalar {
        &self.d
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }
}

/// A secret key together with its derived public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub pk: PublicKey,
    pub sk: SecretKey,
}

impl From<SecretKey> for KeyPair {
    fn from(sk: SecretKey) -> Self {
        Self {
            pk: sk.public_key(),
            sk,
        }
    }
}

fn validate_modulus(n: &Scalar) -> Result<()> {
    if n.bits() < MIN_MODULUS_BITS {
        return Err(Error::InvalidKey("modulus is too small"));
    }
    if !n.bit(0) {
        return Err(Error::InvalidKey("modulus must be odd"));
    }
    Ok(())
}

fn validate_public_exponent(e: &Scalar, n: &Scalar) -> Result<()> {
    if *e <= Scalar::from(1u32) || e >= n {
        return Err(Error::InvalidKey(
            "public exponent must lie in (1, n)",
        ));
    }
    if !e.bit(0) {
        return Err(Error::InvalidKey("public exponent must be odd"));
    }
    Ok(())
}
