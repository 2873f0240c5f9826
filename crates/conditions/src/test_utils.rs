//! Test utilities shared across the condition types.
//!
//! Key generation uses the OS RNG.  RSA key generation is slow, so a single
//! key is generated once per test binary and reused.

use std::fmt::Debug;
use std::sync::OnceLock;

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use rsa::pss::BlindedSigningKey;
use rsa::traits::PublicKeyParts;
use sha2::Sha256;
use signature::{RandomizedSigner, SignatureEncoding, Signer};

use crate::errors::{ConditionResult, ErrorKind};
use crate::fulfillment::Fulfillment;
use crate::fulfillments::{Ed25519Sha256, PreimageSha256, RsaSha256};

/// RSA key size used in tests, the smallest accepted.
const RSA_TEST_BITS: usize = 1024;

static RSA_KEY: OnceLock<RsaPrivateKey> = OnceLock::new();

/// Asserts that a result is an error of the given kind.
pub(crate) fn assert_error_kind<T: Debug>(result: ConditionResult<T>, kind: ErrorKind) {
    let err = result.unwrap_err();
    assert_eq!(err.kind(), kind, "unexpected error: {err:?}");
}

/// Asserts that a result is a well-formed input failing its predicate.
pub(crate) fn assert_semantic_violation<T: Debug>(result: ConditionResult<T>) {
    assert_error_kind(result, ErrorKind::SemanticViolation);
}

/// Builds a preimage fulfillment.
pub(crate) fn preimage(secret: &[u8]) -> Fulfillment {
    PreimageSha256::new(secret.to_vec())
        .expect("test: preimage")
        .into()
}

/// Generates a fresh Ed25519 key.
pub(crate) fn ed25519_signing_key() -> SigningKey {
    SigningKey::generate(&mut OsRng)
}

/// Signs a message into an Ed25519 fulfillment.
pub(crate) fn ed25519_fulfillment(sk: &SigningKey, msg: &[u8]) -> Ed25519Sha256 {
    let sig = sk.sign(msg);
    Ed25519Sha256::new(sk.verifying_key().to_bytes(), sig.to_bytes())
}

fn rsa_key() -> &'static RsaPrivateKey {
    RSA_KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut OsRng, RSA_TEST_BITS).expect("test: rsa keygen")
    })
}

/// Big-endian modulus of the shared RSA key.
pub(crate) fn rsa_modulus() -> Vec<u8> {
    rsa_key().n().to_bytes_be()
}

/// Signs a message with the shared RSA key, padded to the modulus length.
pub(crate) fn rsa_sign(msg: &[u8]) -> Vec<u8> {
    let signer = BlindedSigningKey::<Sha256>::new(rsa_key().clone());
    let sig = signer.sign_with_rng(&mut OsRng, msg).to_vec();

    let mut padded = vec![0; rsa_key().size().saturating_sub(sig.len())];
    padded.extend_from_slice(&sig);
    padded
}

/// Signs a message into an RSA fulfillment.
pub(crate) fn rsa_fulfillment(msg: &[u8]) -> RsaSha256 {
    RsaSha256::new(rsa_modulus(), rsa_sign(msg)).expect("test: rsa fulfillment")
}
