use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// An arbitrary-precision non-negative integer. Messages, blinding
/// factors and signatures are all Scalars; every operation that yields
/// a field element reduces it into `[0, modulus - 1]`.
pub type Scalar = num_bigint::BigUint;

/// `(a * b) mod modulus`.
pub fn mul_mod(a: &Scalar, b: &Scalar, modulus: &Scalar) -> Scalar {
    (a * b) % modulus
}

/// `base ^ exp mod modulus`. This is the RSA primitive; signing,
/// verification and the blinding mask are all instances of it.
pub fn pow_mod(base: &Scalar, exp: &Scalar, modulus: &Scalar) -> Scalar {
    base.modpow(exp, modulus)
}

/// Modular multiplicative inverse of `a` by the iterative extended
/// Euclidean algorithm, normalized into `[0, modulus - 1]`.
///
/// Defined only when `gcd(a, modulus) = 1`; anything else, including
/// `a ≡ 0 mod modulus`, is `NotInvertible`. With an RSA modulus the
/// non-coprime case is reachable in principle, so the gcd outcome is
/// surfaced rather than assumed away.
pub fn invert_mod(a: &Scalar, modulus: &Scalar) -> Result<Scalar> {
    let m = BigInt::from_biguint(Sign::Plus, modulus.clone());
    let mut r0 = m.clone();
    let mut r1 = BigInt::from_biguint(Sign::Plus, a % modulus);
    let mut t0 = BigInt::zero();
    let mut t1 = BigInt::one();

    while !r1.is_zero() {
        let q = &r0 / &r1;
        let r = &r0 - &q * &r1;
        let t = &t0 - &q * &t1;
        r0 = r1;
        r1 = r;
        t0 = t1;
        t1 = t;
    }

    // r0 is gcd(a, modulus); t0 is the Bezout coefficient of a.
    if !r0.is_one() {
        return Err(Error::NotInvertible);
    }
    let inv = ((t0 % &m) + &m) % m;
    Ok(inv.into_parts().1)
}
