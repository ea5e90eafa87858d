use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::{invert_mod, mul_mod, pow_mod, Scalar};
use crate::keys::{KeyPair, PublicKey, SecretKey};
use crate::utils::{scalar_from_be_bytes, scalar_to_be_bytes};

/// A random Scalar that masks a message so the signer never sees it.
///
/// Generation samples `modulus_len` bytes, interprets them big-endian
/// and keeps the value exactly as drawn, without reducing it modulo
/// `n` first; only candidates that are invertible mod `n` are
/// accepted, everything else is resampled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindingFactor(Scalar);

impl BlindingFactor {
    /// Draws a fresh invertible factor from the injected entropy
    /// source. With a valid key the resample loop terminates after one
    /// iteration with overwhelming probability; a failed entropy read
    /// is `RandomSourceUnavailable`.
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R, pk: &PublicKey) -> Result<Self> {
        let mut buf = vec![0u8; pk.modulus_len()];
        loop {
            rng.try_fill_bytes(&mut buf)?;
            let candidate = scalar_from_be_bytes(&buf);
            if invert_mod(&candidate, pk.n()).is_ok() {
                return Ok(Self(candidate));
            }
        }
    }

    pub fn factor(&self) -> &Scalar {
        &self.0
    }
}

impl From<Scalar> for BlindingFactor {
    fn from(s: Scalar) -> Self {
        Self(s)
    }
}

macro_rules! scalar_artifact {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name(Scalar);

        impl $name {
            pub fn value(&self) -> &Scalar {
                &self.0
            }

            pub fn from_be_bytes(bytes: &[u8]) -> Self {
                Self(scalar_from_be_bytes(bytes))
            }

            /// Canonical fixed-width big-endian byte form.
            pub fn to_be_bytes(&self, width: usize) -> Result<Vec<u8>> {
                scalar_to_be_bytes(&self.0, width)
            }
        }

        impl From<Scalar> for $name {
            fn from(s: Scalar) -> Self {
                Self(s)
            }
        }
    };
}

scalar_artifact!(
    /// A message multiplied by the blinding mask, safe to show the
    /// signer.
    BlindedMessage
);
scalar_artifact!(
    /// The signer's raw signature over a blinded message.
    BlindSignature
);
scalar_artifact!(
    /// The unblinded result, a plain RSA signature on the original
    /// message.
    Signature
);

/// Blinds a message representative: `m * r^e mod n`.
///
/// The applied multiplier is the mask `r^e`, not `r` itself, so that
/// signing commutes with the blinding: `(m * r^e)^d = m^d * r`, which
/// the unblinder strips with `r^-1`.
pub fn blind(pk: &PublicKey, message: &Scalar, factor: &BlindingFactor) -> Result<BlindedMessage> {
    if message >= pk.n() {
        return Err(Error::InvalidInput("message representative out of range"));
    }
    let mask = pow_mod(factor.factor(), pk.e(), pk.n());
    Ok(BlindedMessage(mul_mod(message, &mask, pk.n())))
}

/// Signs a blinded message: `blinded^d mod n`. Deterministic, as RSA
/// signing is.
pub fn blind_sign(sk: &SecretKey, blinded: &BlindedMessage) -> Result<BlindSignature> {
    if blinded.value() >= sk.n() {
        return Err(Error::InvalidInput("blinded representative out of range"));
    }
    Ok(BlindSignature(pow_mod(blinded.value(), sk.d(), sk.n())))
}

/// Strips the blinding factor from a raw signature:
/// `raw * r^-1 mod n`. Propagates `NotInvertible` if the factor shares
/// a common factor with the modulus.
pub fn unblind(pk: &PublicKey, raw: &BlindSignature, factor: &BlindingFactor) -> Result<Signature> {
    if raw.value() >= pk.n() {
        return Err(Error::InvalidInput("signature representative out of range"));
    }
    let inv = invert_mod(factor.factor(), pk.n())?;
    Ok(Signature(mul_mod(raw.value(), &inv, pk.n())))
}

/// Checks `sig^e mod n == m`. Any mismatch, including out-of-range
/// representatives, is `false` rather than an error; malformed keys
/// cannot reach this point because keys validate at construction.
pub fn verify(pk: &PublicKey, message: &Scalar, sig: &Signature) -> bool {
    if message >= pk.n() || sig.value() >= pk.n() {
        return false;
    }
    pow_mod(sig.value(), pk.e(), pk.n()) == *message
}

/// The party that wants a signature on a message without revealing it.
/// Owns the signer's public key and one blinding factor, used for a
/// single protocol run.
#[derive(Clone, Debug)]
pub struct Requester {
    pk: PublicKey,
    factor: BlindingFactor,
}

impl Requester {
    pub fn new<R: RngCore + ?Sized>(rng: &mut R, pk: PublicKey) -> Result<Self> {
        let factor = BlindingFactor::generate(rng, &pk)?;
        Ok(Self { pk, factor })
    }

    /// Deterministic construction from a known factor.
    pub fn with_factor(pk: PublicKey, factor: BlindingFactor) -> Self {
        Self { pk, factor }
    }

    pub fn blinding_factor(&self) -> &BlindingFactor {
        &self.factor
    }

    pub fn blind(&self, message: &Scalar) -> Result<BlindedMessage> {
        blind(&self.pk, message, &self.factor)
    }

    pub fn unblind(&self, raw: &BlindSignature) -> Result<Signature> {
        unblind(&self.pk, raw, &self.factor)
    }

    pub fn verify(&self, message: &Scalar, sig: &Signature) -> bool {
        verify(&self.pk, message, sig)
    }
}

/// The party that signs blinded messages without seeing their
/// contents.
#[derive(Clone, Debug)]
pub struct BlindSigner {
    sk: SecretKey,
}

impl BlindSigner {
    pub fn public_key(&self) -> PublicKey {
        self.sk.public_key()
    }

    pub fn sign(&self, blinded: &BlindedMessage) -> Result<BlindSignature> {
        blind_sign(&self.sk, blinded)
    }
}

impl From<SecretKey> for BlindSigner {
    fn from(sk: SecretKey) -> Self {
        Self { sk }
    }
}

/// Terminal state of a protocol run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Verified(Signature),
    Rejected,
}

/// One full protocol run: factor generation, blinding, blind signing,
/// unblinding, verification. Any stage error aborts the run; there are
/// no retries here, a caller that wants one regenerates a fresh factor
/// and redoes the whole pipeline.
pub fn run<R: RngCore + ?Sized>(rng: &mut R, keys: &KeyPair, message: &Scalar) -> Result<Outcome> {
    let factor = BlindingFactor::generate(rng, &keys.pk)?;
    let blinded = blind(&keys.pk, message, &factor)?;
    let raw = blind_sign(&keys.sk, &blinded)?;
    let sig = unblind(&keys.pk, &raw, &factor)?;
    if verify(&keys.pk, message, &sig) {
        Ok(Outcome::Verified(sig))
    } else {
        Ok(Outcome::Rejected)
    }
}
