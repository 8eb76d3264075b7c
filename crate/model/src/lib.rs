//! Data model of the Boreal KMS control plane.
//!
//! Typed request/response objects, string enumerations and the JSON wire
//! envelope for a remote key-management service. All cryptographic work
//! (encryption, decryption, key generation, wrapping, grant evaluation)
//! happens server-side; this crate only describes the wire shape of the
//! requests sent there. Transport, signing, retries and credential
//! resolution belong to a separate client layer.
//!
//! # Validation posture
//!
//! Constraints documented on request fields (length bounds, accepted
//! value combinations, mutual exclusivity, temporal horizons) are
//! enforced by the remote service at invocation time and surface as
//! remote errors after the request is sent. The single check performed
//! locally is the rejection of a duplicate encryption-context key on the
//! incremental entry path ([`KmsModelError::DuplicateContextEntry`]).

pub use error::{
    KmsModelError,
    result::{KmsModelResult, ResultHelper},
};

pub(crate) mod base64_serde;
mod error;
pub(crate) mod fmt_utils;
pub mod operations;
pub mod types;
pub mod wire;

#[cfg(test)]
mod tests;
