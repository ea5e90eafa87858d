use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::field::Scalar;

/// Fixed size of a message byte string.
pub const MESSAGE_LEN: usize = 32;

/// Interprets a fixed-size message byte string as a Scalar. The only
/// supported message encoding is exactly `MESSAGE_LEN` big-endian
/// bytes; anything else is a contract violation.
pub fn message_scalar(msg: &[u8]) -> Result<Scalar> {
    if msg.len() != MESSAGE_LEN {
        return Err(Error::InvalidInput("message must be exactly 32 bytes"));
    }
    Ok(scalar_from_be_bytes(msg))
}

/// Reduces arbitrary bytes into the fixed 32-byte message domain via
/// SHA-256. Callers with free-form input hash first, then run the
/// protocol on the digest.
pub fn digest_message(data: &[u8]) -> Scalar {
    scalar_from_be_bytes(&Sha256::digest(data))
}

/// Big-endian bytes to Scalar (OS2IP).
pub fn scalar_from_be_bytes(bytes: &[u8]) -> Scalar {
    Scalar::from_bytes_be(bytes)
}

/// Scalar to fixed-width big-endian bytes (I2OSP), left-padded with
/// zeros. Values that do not fit the width are rejected.
pub fn scalar_to_be_bytes(s: &Scalar, width: usize) -> Result<Vec<u8>> {
    let raw = s.to_bytes_be();
    if raw.len() > width {
        return Err(Error::InvalidInput("value does not fit the given width"));
    }
    let mut out = vec![0u8; width - raw.len()];
    out.extend_from_slice(&raw);
    Ok(out)
}
