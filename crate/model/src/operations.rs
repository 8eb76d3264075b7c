//! Request and response objects for the control-plane operations.
//!
//! Every request is populated on one thread, handed once to the transport
//! layer, and carries no identity beyond its field values. Constraints
//! documented on the fields (length bounds, accepted combinations,
//! mutual exclusivity, temporal horizons) are validated by the remote
//! service when the request is received; the only check performed locally
//! is the duplicate-key rejection on the incremental encryption-context
//! path.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use zeroize::Zeroizing;

use crate::{
    base64_serde,
    error::result::KmsModelResult,
    fmt_utils::FieldWriter,
    types::{
        AlgorithmSpec, DataKeyPairSpec, DataKeySpec, EncryptionAlgorithmSpec, EncryptionContext,
        ExpirationModel, GrantConstraints, GrantOperation, KeyAgreementAlgorithmSpec, KeyId,
        KeyMetadata, OriginType, RecipientInfo, Tag, WrappingKeySpec,
    },
};

/// Adds a grant to a key, authorizing the grantee principal to use the
/// key for the listed operations.
///
/// Grants propagate with eventual consistency; the returned grant token
/// lets the grantee use the permissions immediately.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGrant {
    pub key_id: KeyId,
    /// Principal the grant authorizes.
    pub grantee_principal: String,
    /// Principal allowed to retire the grant, if different from the
    /// grantee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retiring_principal: Option<String>,
    /// Operations the grant permits. Must be non-empty and supported by
    /// the target key's type; the service rejects mismatches.
    pub operations: Vec<GrantOperation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<GrantConstraints>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    /// Idempotency name: retrying an identical request with the same
    /// name returns the original grant instead of creating a duplicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CreateGrant {
    #[must_use]
    pub fn new(
        key_id: impl Into<KeyId>,
        grantee_principal: impl Into<String>,
        operations: Vec<GrantOperation>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            grantee_principal: grantee_principal.into(),
            retiring_principal: None,
            operations,
            constraints: None,
            grant_tokens: Vec::new(),
            name: None,
        }
    }

    #[must_use]
    pub fn with_retiring_principal(mut self, principal: impl Into<String>) -> Self {
        self.retiring_principal = Some(principal.into());
        self
    }

    /// Appends one operation; repeated calls accumulate.
    #[must_use]
    pub fn with_operation(mut self, operation: GrantOperation) -> Self {
        self.operations.push(operation);
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: GrantConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Appends one token; assign `grant_tokens` directly to replace the
    /// whole list.
    #[must_use]
    pub fn with_grant_token(mut self, token: impl Into<String>) -> Self {
        self.grant_tokens.push(token.into());
        self
    }

    #[must_use]
    pub fn with_grant_tokens<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.grant_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Display for CreateGrant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.field("KeyId", &self.key_id)?;
        w.field("GranteePrincipal", &self.grantee_principal)?;
        w.opt("RetiringPrincipal", self.retiring_principal.as_ref())?;
        w.list("Operations", &self.operations)?;
        w.opt("Constraints", self.constraints.as_ref())?;
        w.list("GrantTokens", &self.grant_tokens)?;
        w.opt("Name", self.name.as_ref())?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGrantResponse {
    /// Proof that the grant may be used immediately, before propagation
    /// completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_id: Option<String>,
}

/// Decrypts a ciphertext produced by one of the encrypting operations.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct Decrypt {
    /// Ciphertext to decrypt, 1..=6144 bytes before encoding.
    #[serde(with = "base64_serde::b64")]
    pub ciphertext_blob: Vec<u8>,
    /// Must match, case-sensitively, the context supplied when the
    /// ciphertext was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_context: Option<EncryptionContext>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    /// Required when the ciphertext was produced under an asymmetric
    /// key; symmetric ciphertexts carry enough metadata for the service
    /// to locate the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    /// Defaults to `SYMMETRIC_DEFAULT` on the server when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<EncryptionAlgorithmSpec>,
}

impl Decrypt {
    #[must_use]
    pub fn new(ciphertext_blob: Vec<u8>) -> Self {
        Self {
            ciphertext_blob,
            encryption_context: None,
            grant_tokens: Vec::new(),
            key_id: None,
            encryption_algorithm: None,
        }
    }

    /// Replaces any existing context wholesale.
    #[must_use]
    pub fn with_encryption_context(mut self, context: EncryptionContext) -> Self {
        self.encryption_context = Some(context);
        self
    }

    /// Incremental-entry path: lazily initializes the context and fails
    /// on a duplicate key, leaving the request unchanged.
    pub fn add_encryption_context_entry(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> KmsModelResult<&mut Self> {
        self.encryption_context
            .get_or_insert_with(EncryptionContext::new)
            .insert(key, value)?;
        Ok(self)
    }

    /// Resets the context to the absent state, observably distinct from
    /// an empty map.
    pub fn clear_encryption_context_entries(&mut self) -> &mut Self {
        self.encryption_context = None;
        self
    }

    /// Appends one token; repeated calls accumulate.
    #[must_use]
    pub fn with_grant_token(mut self, token: impl Into<String>) -> Self {
        self.grant_tokens.push(token.into());
        self
    }

    #[must_use]
    pub fn with_grant_tokens<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.grant_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_key_id(mut self, key_id: impl Into<KeyId>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    #[must_use]
    pub fn with_encryption_algorithm(mut self, algorithm: EncryptionAlgorithmSpec) -> Self {
        self.encryption_algorithm = Some(algorithm);
        self
    }
}

impl Display for Decrypt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.bytes("CiphertextBlob", &self.ciphertext_blob)?;
        w.opt("EncryptionContext", self.encryption_context.as_ref())?;
        w.list("GrantTokens", &self.grant_tokens)?;
        w.opt("KeyId", self.key_id.as_ref())?;
        w.opt("EncryptionAlgorithm", self.encryption_algorithm.as_ref())?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DecryptResponse {
    /// Key that was actually used for the decryption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    /// Wiped from memory when the response is dropped.
    #[serde(
        with = "base64_serde::b64_zeroizing_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub plaintext: Option<Zeroizing<Vec<u8>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<EncryptionAlgorithmSpec>,
}

/// Returns a fresh symmetric data key for envelope encryption, both in
/// plaintext and encrypted under the named key.
///
/// The caller encrypts bulk data with the plaintext copy, discards it,
/// and stores only the encrypted copy next to the data.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKey {
    /// Must reference a symmetric key.
    pub key_id: KeyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_context: Option<EncryptionContext>,
    /// Key length in bytes, 1..=1024. Exactly one of `number_of_bytes`
    /// and `key_spec` must be set; the service rejects requests carrying
    /// both or neither. Nothing is checked locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_bytes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_spec: Option<DataKeySpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    /// When present, the plaintext copy comes back encrypted for the
    /// attested recipient instead of in the clear.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientInfo>,
    /// Checks authorization without performing the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl GenerateDataKey {
    #[must_use]
    pub fn new(key_id: impl Into<KeyId>) -> Self {
        Self {
            key_id: key_id.into(),
            encryption_context: None,
            number_of_bytes: None,
            key_spec: None,
            grant_tokens: Vec::new(),
            recipient: None,
            dry_run: None,
        }
    }

    /// Replaces any existing context wholesale.
    #[must_use]
    pub fn with_encryption_context(mut self, context: EncryptionContext) -> Self {
        self.encryption_context = Some(context);
        self
    }

    /// Incremental-entry path: lazily initializes the context and fails
    /// on a duplicate key, leaving the request unchanged.
    pub fn add_encryption_context_entry(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> KmsModelResult<&mut Self> {
        self.encryption_context
            .get_or_insert_with(EncryptionContext::new)
            .insert(key, value)?;
        Ok(self)
    }

    /// Resets the context to the absent state, observably distinct from
    /// an empty map.
    pub fn clear_encryption_context_entries(&mut self) -> &mut Self {
        self.encryption_context = None;
        self
    }

    #[must_use]
    pub fn with_number_of_bytes(mut self, number_of_bytes: u32) -> Self {
        self.number_of_bytes = Some(number_of_bytes);
        self
    }

    #[must_use]
    pub fn with_key_spec(mut self, key_spec: DataKeySpec) -> Self {
        self.key_spec = Some(key_spec);
        self
    }

    /// Appends one token; repeated calls accumulate.
    #[must_use]
    pub fn with_grant_token(mut self, token: impl Into<String>) -> Self {
        self.grant_tokens.push(token.into());
        self
    }

    #[must_use]
    pub fn with_grant_tokens<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.grant_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_recipient(mut self, recipient: RecipientInfo) -> Self {
        self.recipient = Some(recipient);
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }
}

impl Display for GenerateDataKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.field("KeyId", &self.key_id)?;
        w.opt("EncryptionContext", self.encryption_context.as_ref())?;
        w.opt("NumberOfBytes", self.number_of_bytes.as_ref())?;
        w.opt("KeySpec", self.key_spec.as_ref())?;
        w.list("GrantTokens", &self.grant_tokens)?;
        w.opt("Recipient", self.recipient.as_ref())?;
        w.opt("DryRun", self.dry_run.as_ref())?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyResponse {
    /// Encrypted copy of the data key, safe to store at rest.
    #[serde(
        with = "base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ciphertext_blob: Option<Vec<u8>>,
    /// Absent when the request named an attested recipient. Wiped from
    /// memory when the response is dropped.
    #[serde(
        with = "base64_serde::b64_zeroizing_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub plaintext: Option<Zeroizing<Vec<u8>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    /// Plaintext copy encrypted under the recipient's attested public
    /// key.
    #[serde(
        with = "base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ciphertext_for_recipient: Option<Vec<u8>>,
}

/// Returns a fresh asymmetric data key pair: plaintext public key,
/// plaintext private key, and the private key encrypted under the named
/// symmetric key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_context: Option<EncryptionContext>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    /// Must reference a symmetric key; the pair's private key is
    /// encrypted under it.
    pub key_id: KeyId,
    pub key_pair_spec: DataKeyPairSpec,
}

impl GenerateDataKeyPair {
    #[must_use]
    pub fn new(key_id: impl Into<KeyId>, key_pair_spec: DataKeyPairSpec) -> Self {
        Self {
            encryption_context: None,
            grant_tokens: Vec::new(),
            key_id: key_id.into(),
            key_pair_spec,
        }
    }

    /// Replaces any existing context wholesale.
    #[must_use]
    pub fn with_encryption_context(mut self, context: EncryptionContext) -> Self {
        self.encryption_context = Some(context);
        self
    }

    /// Incremental-entry path: lazily initializes the context and fails
    /// on a duplicate key, leaving the request unchanged.
    pub fn add_encryption_context_entry(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> KmsModelResult<&mut Self> {
        self.encryption_context
            .get_or_insert_with(EncryptionContext::new)
            .insert(key, value)?;
        Ok(self)
    }

    /// Resets the context to the absent state, observably distinct from
    /// an empty map.
    pub fn clear_encryption_context_entries(&mut self) -> &mut Self {
        self.encryption_context = None;
        self
    }

    /// Appends one token; repeated calls accumulate.
    #[must_use]
    pub fn with_grant_token(mut self, token: impl Into<String>) -> Self {
        self.grant_tokens.push(token.into());
        self
    }

    #[must_use]
    pub fn with_grant_tokens<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.grant_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }
}

impl Display for GenerateDataKeyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.opt("EncryptionContext", self.encryption_context.as_ref())?;
        w.list("GrantTokens", &self.grant_tokens)?;
        w.field("KeyId", &self.key_id)?;
        w.field("KeyPairSpec", &self.key_pair_spec)?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyPairResponse {
    #[serde(
        with = "base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub private_key_ciphertext_blob: Option<Vec<u8>>,
    /// Wiped from memory when the response is dropped.
    #[serde(
        with = "base64_serde::b64_zeroizing_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub private_key_plaintext: Option<Zeroizing<Vec<u8>>>,
    /// DER-encoded public key.
    #[serde(
        with = "base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_key: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair_spec: Option<DataKeyPairSpec>,
}

/// Like [`GenerateDataKeyPair`] but the private key is returned only in
/// its encrypted form, for callers that will decrypt it later on a more
/// trusted host.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyPairWithoutPlaintext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_context: Option<EncryptionContext>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    /// Must reference a symmetric key.
    pub key_id: KeyId,
    pub key_pair_spec: DataKeyPairSpec,
    /// Checks authorization without performing the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl GenerateDataKeyPairWithoutPlaintext {
    #[must_use]
    pub fn new(key_id: impl Into<KeyId>, key_pair_spec: DataKeyPairSpec) -> Self {
        Self {
            encryption_context: None,
            grant_tokens: Vec::new(),
            key_id: key_id.into(),
            key_pair_spec,
            dry_run: None,
        }
    }

    /// Replaces any existing context wholesale.
    #[must_use]
    pub fn with_encryption_context(mut self, context: EncryptionContext) -> Self {
        self.encryption_context = Some(context);
        self
    }

    /// Incremental-entry path: lazily initializes the context and fails
    /// on a duplicate key, leaving the request unchanged.
    pub fn add_encryption_context_entry(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> KmsModelResult<&mut Self> {
        self.encryption_context
            .get_or_insert_with(EncryptionContext::new)
            .insert(key, value)?;
        Ok(self)
    }

    /// Resets the context to the absent state, observably distinct from
    /// an empty map.
    pub fn clear_encryption_context_entries(&mut self) -> &mut Self {
        self.encryption_context = None;
        self
    }

    /// Appends one token; repeated calls accumulate.
    #[must_use]
    pub fn with_grant_token(mut self, token: impl Into<String>) -> Self {
        self.grant_tokens.push(token.into());
        self
    }

    #[must_use]
    pub fn with_grant_tokens<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.grant_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }
}

impl Display for GenerateDataKeyPairWithoutPlaintext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.opt("EncryptionContext", self.encryption_context.as_ref())?;
        w.list("GrantTokens", &self.grant_tokens)?;
        w.field("KeyId", &self.key_id)?;
        w.field("KeyPairSpec", &self.key_pair_spec)?;
        w.opt("DryRun", self.dry_run.as_ref())?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateDataKeyPairWithoutPlaintextResponse {
    #[serde(
        with = "base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub private_key_ciphertext_blob: Option<Vec<u8>>,
    /// DER-encoded public key.
    #[serde(
        with = "base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_key: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair_spec: Option<DataKeyPairSpec>,
}

/// Returns the public wrapping key and import token needed to wrap
/// externally generated key material for [`ImportKeyMaterial`].
///
/// The returned parameters are valid for 24 hours and only for the key,
/// wrapping algorithm and wrapping key spec they were requested for.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct GetParametersForImport {
    pub key_id: KeyId,
    pub wrapping_algorithm: AlgorithmSpec,
    pub wrapping_key_spec: WrappingKeySpec,
}

impl GetParametersForImport {
    #[must_use]
    pub fn new(
        key_id: impl Into<KeyId>,
        wrapping_algorithm: AlgorithmSpec,
        wrapping_key_spec: WrappingKeySpec,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            wrapping_algorithm,
            wrapping_key_spec,
        }
    }
}

impl Display for GetParametersForImport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.field("KeyId", &self.key_id)?;
        w.field("WrappingAlgorithm", &self.wrapping_algorithm)?;
        w.field("WrappingKeySpec", &self.wrapping_key_spec)?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GetParametersForImportResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    /// Opaque credential pairing with the public key; both expire
    /// together.
    #[serde(
        with = "base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub import_token: Option<Vec<u8>>,
    /// Public wrapping key. Held zeroizing so a compromised host leaks
    /// as little of the import ceremony as possible.
    #[serde(
        with = "base64_serde::b64_zeroizing_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_key: Option<Zeroizing<Vec<u8>>>,
    #[serde(
        with = "time::serde::timestamp::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parameters_valid_to: Option<OffsetDateTime>,
}

/// Imports externally generated key material into an existing key whose
/// origin is external.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct ImportKeyMaterial {
    pub key_id: KeyId,
    /// From the same [`GetParametersForImport`] response as the wrapping
    /// key that protected `encrypted_key_material`.
    #[serde(with = "base64_serde::b64")]
    pub import_token: Vec<u8>,
    /// Key material wrapped with the public key returned by
    /// [`GetParametersForImport`].
    #[serde(with = "base64_serde::b64")]
    pub encrypted_key_material: Vec<u8>,
    /// Required iff `expiration_model` is `KEY_MATERIAL_EXPIRES`. Must
    /// lie in the future, at most 365 days out; the service validates
    /// both bounds at invocation time.
    #[serde(
        with = "time::serde::timestamp::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_to: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_model: Option<ExpirationModel>,
}

impl ImportKeyMaterial {
    #[must_use]
    pub fn new(
        key_id: impl Into<KeyId>,
        import_token: Vec<u8>,
        encrypted_key_material: Vec<u8>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            import_token,
            encrypted_key_material,
            valid_to: None,
            expiration_model: None,
        }
    }

    #[must_use]
    pub fn with_valid_to(mut self, valid_to: OffsetDateTime) -> Self {
        self.valid_to = Some(valid_to);
        self
    }

    #[must_use]
    pub fn with_expiration_model(mut self, expiration_model: ExpirationModel) -> Self {
        self.expiration_model = Some(expiration_model);
        self
    }
}

impl Display for ImportKeyMaterial {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.field("KeyId", &self.key_id)?;
        w.bytes("ImportToken", &self.import_token)?;
        w.bytes("EncryptedKeyMaterial", &self.encrypted_key_material)?;
        w.opt("ValidTo", self.valid_to.as_ref())?;
        w.opt("ExpirationModel", self.expiration_model.as_ref())?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ImportKeyMaterialResponse {}

/// Replicates a multi-region primary key into another region.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct ReplicateKey {
    /// Must reference a multi-region primary key.
    pub key_id: KeyId,
    /// Must differ from the primary key's region; the service rejects a
    /// replica in the primary's own region.
    pub replica_region: String,
    /// Key policy for the replica. The replica gets the service default
    /// policy when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    /// Skips the safety check that the policy keeps the key manageable
    /// by the caller. Risky; intended for cross-account administration
    /// tooling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_policy_lockout_safety_check: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl ReplicateKey {
    #[must_use]
    pub fn new(key_id: impl Into<KeyId>, replica_region: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            replica_region: replica_region.into(),
            policy: None,
            bypass_policy_lockout_safety_check: None,
            description: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    #[must_use]
    pub fn with_bypass_policy_lockout_safety_check(mut self, bypass: bool) -> Self {
        self.bypass_policy_lockout_safety_check = Some(bypass);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends one tag; repeated calls accumulate.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    #[must_use]
    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = Tag>,
    {
        self.tags.extend(tags);
        self
    }
}

impl Display for ReplicateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.field("KeyId", &self.key_id)?;
        w.field("ReplicaRegion", &self.replica_region)?;
        w.opt("Policy", self.policy.as_ref())?;
        w.opt(
            "BypassPolicyLockoutSafetyCheck",
            self.bypass_policy_lockout_safety_check.as_ref(),
        )?;
        w.opt("Description", self.description.as_ref())?;
        w.list("Tags", &self.tags)?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ReplicateKeyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_key_metadata: Option<KeyMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replica_tags: Vec<Tag>,
}

/// Re-encrypts a ciphertext from one key to another entirely inside the
/// service; the plaintext never leaves it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct ReEncrypt {
    #[serde(with = "base64_serde::b64")]
    pub ciphertext_blob: Vec<u8>,
    /// Must match the context the ciphertext was produced under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_encryption_context: Option<EncryptionContext>,
    /// Required when the ciphertext was produced under an asymmetric
    /// key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_key_id: Option<KeyId>,
    /// Key the ciphertext is re-encrypted under.
    pub destination_key_id: KeyId,
    /// Context bound to the new ciphertext.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_encryption_context: Option<EncryptionContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_encryption_algorithm: Option<EncryptionAlgorithmSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_encryption_algorithm: Option<EncryptionAlgorithmSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
}

impl ReEncrypt {
    #[must_use]
    pub fn new(ciphertext_blob: Vec<u8>, destination_key_id: impl Into<KeyId>) -> Self {
        Self {
            ciphertext_blob,
            source_encryption_context: None,
            source_key_id: None,
            destination_key_id: destination_key_id.into(),
            destination_encryption_context: None,
            source_encryption_algorithm: None,
            destination_encryption_algorithm: None,
            grant_tokens: Vec::new(),
        }
    }

    /// Replaces any existing source context wholesale.
    #[must_use]
    pub fn with_source_encryption_context(mut self, context: EncryptionContext) -> Self {
        self.source_encryption_context = Some(context);
        self
    }

    /// Incremental-entry path for the source context; fails on a
    /// duplicate key, leaving the request unchanged.
    pub fn add_source_encryption_context_entry(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> KmsModelResult<&mut Self> {
        self.source_encryption_context
            .get_or_insert_with(EncryptionContext::new)
            .insert(key, value)?;
        Ok(self)
    }

    /// Resets the source context to the absent state.
    pub fn clear_source_encryption_context_entries(&mut self) -> &mut Self {
        self.source_encryption_context = None;
        self
    }

    #[must_use]
    pub fn with_source_key_id(mut self, key_id: impl Into<KeyId>) -> Self {
        self.source_key_id = Some(key_id.into());
        self
    }

    /// Replaces any existing destination context wholesale.
    #[must_use]
    pub fn with_destination_encryption_context(mut self, context: EncryptionContext) -> Self {
        self.destination_encryption_context = Some(context);
        self
    }

    /// Incremental-entry path for the destination context; fails on a
    /// duplicate key, leaving the request unchanged.
    pub fn add_destination_encryption_context_entry(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> KmsModelResult<&mut Self> {
        self.destination_encryption_context
            .get_or_insert_with(EncryptionContext::new)
            .insert(key, value)?;
        Ok(self)
    }

    /// Resets the destination context to the absent state.
    pub fn clear_destination_encryption_context_entries(&mut self) -> &mut Self {
        self.destination_encryption_context = None;
        self
    }

    #[must_use]
    pub fn with_source_encryption_algorithm(
        mut self,
        algorithm: EncryptionAlgorithmSpec,
    ) -> Self {
        self.source_encryption_algorithm = Some(algorithm);
        self
    }

    #[must_use]
    pub fn with_destination_encryption_algorithm(
        mut self,
        algorithm: EncryptionAlgorithmSpec,
    ) -> Self {
        self.destination_encryption_algorithm = Some(algorithm);
        self
    }

    /// Appends one token; repeated calls accumulate.
    #[must_use]
    pub fn with_grant_token(mut self, token: impl Into<String>) -> Self {
        self.grant_tokens.push(token.into());
        self
    }

    #[must_use]
    pub fn with_grant_tokens<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.grant_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }
}

impl Display for ReEncrypt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.bytes("CiphertextBlob", &self.ciphertext_blob)?;
        w.opt(
            "SourceEncryptionContext",
            self.source_encryption_context.as_ref(),
        )?;
        w.opt("SourceKeyId", self.source_key_id.as_ref())?;
        w.field("DestinationKeyId", &self.destination_key_id)?;
        w.opt(
            "DestinationEncryptionContext",
            self.destination_encryption_context.as_ref(),
        )?;
        w.opt(
            "SourceEncryptionAlgorithm",
            self.source_encryption_algorithm.as_ref(),
        )?;
        w.opt(
            "DestinationEncryptionAlgorithm",
            self.destination_encryption_algorithm.as_ref(),
        )?;
        w.list("GrantTokens", &self.grant_tokens)?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ReEncryptResponse {
    #[serde(
        with = "base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ciphertext_blob: Option<Vec<u8>>,
    /// Key the original ciphertext was encrypted under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_key_id: Option<KeyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_encryption_algorithm: Option<EncryptionAlgorithmSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_encryption_algorithm: Option<EncryptionAlgorithmSpec>,
}

/// Derives a shared secret from the private key of an asymmetric
/// key-agreement key and a caller-supplied public key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct DeriveSharedSecret {
    /// Must reference a key-agreement key pair.
    pub key_id: KeyId,
    pub key_agreement_algorithm: KeyAgreementAlgorithmSpec,
    /// DER-encoded public key of the other party, on the same curve as
    /// the named key pair.
    #[serde(with = "base64_serde::b64")]
    pub public_key: Vec<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grant_tokens: Vec<String>,
    /// Checks authorization without performing the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    /// When present, the derived secret comes back encrypted for the
    /// attested recipient instead of in the clear.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientInfo>,
}

impl DeriveSharedSecret {
    #[must_use]
    pub fn new(
        key_id: impl Into<KeyId>,
        key_agreement_algorithm: KeyAgreementAlgorithmSpec,
        public_key: Vec<u8>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            key_agreement_algorithm,
            public_key,
            grant_tokens: Vec::new(),
            dry_run: None,
            recipient: None,
        }
    }

    /// Appends one token; repeated calls accumulate.
    #[must_use]
    pub fn with_grant_token(mut self, token: impl Into<String>) -> Self {
        self.grant_tokens.push(token.into());
        self
    }

    #[must_use]
    pub fn with_grant_tokens<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.grant_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }

    #[must_use]
    pub fn with_recipient(mut self, recipient: RecipientInfo) -> Self {
        self.recipient = Some(recipient);
        self
    }
}

impl Display for DeriveSharedSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.field("KeyId", &self.key_id)?;
        w.field("KeyAgreementAlgorithm", &self.key_agreement_algorithm)?;
        w.bytes("PublicKey", &self.public_key)?;
        w.list("GrantTokens", &self.grant_tokens)?;
        w.opt("DryRun", self.dry_run.as_ref())?;
        w.opt("Recipient", self.recipient.as_ref())?;
        w.finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DeriveSharedSecretResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<KeyId>,
    /// Raw shared secret. Absent when the request named an attested
    /// recipient. Wiped from memory when the response is dropped.
    #[serde(
        with = "base64_serde::b64_zeroizing_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub shared_secret: Option<Zeroizing<Vec<u8>>>,
    #[serde(
        with = "base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ciphertext_for_recipient: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_agreement_algorithm: Option<KeyAgreementAlgorithmSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_origin: Option<OriginType>,
}
