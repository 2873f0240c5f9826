//! Signature scheme implementations.
//!
//! This module contains the individual verifiers for each signature-based
//! condition type, organized in separate files.

mod ed25519;
mod rsa_pss;

pub(crate) use ed25519::Ed25519Verifier;
pub(crate) use rsa_pss::RsaPssVerifier;
