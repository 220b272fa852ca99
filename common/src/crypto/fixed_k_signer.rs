//! Deterministic ECDSA signing with a fixed nonce.
//!
//! The anchor transaction of every L2 block is signed by the golden touch key with
//! `k = 1`, or `k = 2` when `k = 1` yields `s = 0`. Both the nonce and the key are public,
//! so anyone can reproduce the signature and the protocol can check that the signer did
//! not pick its own nonce.

use alloy::primitives::{B256, Signature, U256, b256};
use anyhow::Error;
use elliptic_curve::{ff::PrimeField, ops::Reduce, point::AffineCoordinates, scalar::IsHigh};
use k256::{FieldBytes, ProjectivePoint, Scalar};

/// `r` of a `k = 1` signature: x coordinate of the secp256k1 generator.
pub const GX: B256 = b256!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");

/// `r` of a `k = 2` signature: x coordinate of `2G`.
pub const GX2: B256 = b256!("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5");

pub fn sign_hash_deterministic(private_key: B256, hash: B256) -> Result<Signature, Error> {
    let signature = sign_hash_with_k(private_key, hash, 1)?;
    if signature.s().is_zero() {
        return sign_hash_with_k(private_key, hash, 2);
    }
    Ok(signature)
}

/// Signs `hash` using the nonce `k`. The returned signature is low-s normalized.
pub fn sign_hash_with_k(private_key: B256, hash: B256, k: u64) -> Result<Signature, Error> {
    let d = Option::<Scalar>::from(Scalar::from_repr(to_field_bytes(private_key)))
        .filter(|d| !bool::from(d.is_zero()))
        .ok_or_else(|| anyhow::anyhow!("fixed_k_signer: invalid private key"))?;
    let k = Scalar::from(k);
    let k_inv = Option::<Scalar>::from(k.invert())
        .ok_or_else(|| anyhow::anyhow!("fixed_k_signer: nonce must not be zero"))?;

    let big_r = (ProjectivePoint::GENERATOR * k).to_affine();
    let r = <Scalar as Reduce<k256::U256>>::reduce_bytes(&big_r.x());
    let z = <Scalar as Reduce<k256::U256>>::reduce_bytes(&to_field_bytes(hash));

    let mut s = k_inv * (z + r * d);
    let mut y_parity = bool::from(big_r.y_is_odd());
    if bool::from(s.is_high()) {
        s = -s;
        y_parity = !y_parity;
    }

    Ok(Signature::new(
        U256::from_be_slice(&r.to_bytes()),
        U256::from_be_slice(&s.to_bytes()),
        y_parity,
    ))
}

fn to_field_bytes(value: B256) -> FieldBytes {
    *FieldBytes::from_slice(value.as_slice())
}
