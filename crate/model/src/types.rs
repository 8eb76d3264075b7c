//! Shared wire types of the control-plane model.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    error::{KmsModelError, result::KmsModelResult},
    fmt_utils::FieldWriter,
};

/// Identifies a server-managed key.
///
/// Four lexical forms are accepted: the bare key identifier, the full key
/// ARN, an alias short-name (`alias/Name`) and the full alias ARN. The
/// value is forwarded verbatim; which form was used is resolved by the
/// remote service, never parsed on this side of the wire. The service
/// bounds the length to 1..=2048 characters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for KeyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for KeyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for KeyId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Non-secret key-value pairs bound to a ciphertext as additional
/// authenticated data.
///
/// The context supplied to the operation consuming a ciphertext must
/// match, case-sensitively, the context supplied to the operation that
/// produced it; the remote service enforces that equality. Keys are
/// unique by construction; the incremental [`insert`](Self::insert) path
/// additionally rejects an attempt to re-bind an existing key.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EncryptionContext(BTreeMap<String, String>);

impl EncryptionContext {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds one entry. Fails with
    /// [`KmsModelError::DuplicateContextEntry`] if `key` is already
    /// bound, leaving the context unchanged.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> KmsModelResult<()> {
        let key = key.into();
        if self.0.contains_key(&key) {
            return Err(KmsModelError::DuplicateContextEntry(key));
        }
        self.0.insert(key, value.into());
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Bulk construction trusts the map: it is unique-keyed already.
impl From<BTreeMap<String, String>> for EncryptionContext {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self(entries)
    }
}

/// Bulk construction from pairs; a later pair silently re-binds an
/// earlier key, as a map literal would.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EncryptionContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Display for EncryptionContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        write!(f, "}}")
    }
}

/// Restricts a grant to requests whose encryption context matches.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct GrantConstraints {
    /// The grant applies only when the request context contains at least
    /// these pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_context_subset: Option<EncryptionContext>,
    /// The grant applies only when the request context equals exactly
    /// these pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_context_equals: Option<EncryptionContext>,
}

impl GrantConstraints {
    #[must_use]
    pub fn subset_of(context: EncryptionContext) -> Self {
        Self {
            encryption_context_subset: Some(context),
            encryption_context_equals: None,
        }
    }

    #[must_use]
    pub fn equals(context: EncryptionContext) -> Self {
        Self {
            encryption_context_subset: None,
            encryption_context_equals: Some(context),
        }
    }
}

impl Display for GrantConstraints {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.opt(
            "EncryptionContextSubset",
            self.encryption_context_subset.as_ref(),
        )?;
        w.opt(
            "EncryptionContextEquals",
            self.encryption_context_equals.as_ref(),
        )?;
        w.finish()
    }
}

/// A key-value label attached to a replicated key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub tag_key: String,
    pub tag_value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag_key: key.into(),
            tag_value: value.into(),
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag_key, self.tag_value)
    }
}

/// Recipient of response key material in attested-enclave flows.
///
/// When present on a request, the service encrypts the sensitive part of
/// its response under the public key carried in the attestation document
/// instead of returning it in the clear.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct RecipientInfo {
    /// Mechanism the service uses to encrypt the payload for the
    /// recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_encryption_algorithm: Option<KeyEncryptionMechanism>,
    /// Signed attestation document of the requesting enclave.
    #[serde(
        with = "crate::base64_serde::b64_opt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attestation_document: Option<Vec<u8>>,
}

impl Display for RecipientInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut w = FieldWriter::new(f)?;
        w.opt(
            "KeyEncryptionAlgorithm",
            self.key_encryption_algorithm.as_ref(),
        )?;
        w.opt_bytes("AttestationDocument", self.attestation_document.as_ref())?;
        w.finish()
    }
}

/// Metadata record describing a key, as returned by key replication.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct KeyMetadata {
    #[serde(
        rename = "AWSAccountId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub account_id: Option<String>,
    pub key_id: KeyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(
        with = "time::serde::timestamp::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_usage: Option<KeyUsageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_state: Option<KeyState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<OriginType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_spec: Option<KeySpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub encryption_algorithms: Vec<EncryptionAlgorithmSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_region: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_model: Option<ExpirationModel>,
    /// Present only for imported key material with an expiry.
    #[serde(
        with = "time::serde::timestamp::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_to: Option<OffsetDateTime>,
}

/// Generates a string-valued enumeration with a trailing raw variant.
///
/// Each enumeration serializes as its wire literal and parses infallibly:
/// a value the client does not recognize lands in `Other` and survives a
/// round trip verbatim, so the model stays usable against a server that
/// is newer than this crate.
macro_rules! spec_enum {
    (
        $(#[$outer:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$outer])*
        #[derive(
            Serialize,
            Deserialize,
            Clone,
            Debug,
            PartialEq,
            Eq,
            Hash,
            strum::Display,
            strum::EnumString,
        )]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* #[strum(serialize = $wire)] $variant,)+
            /// A value this client does not recognize, carried verbatim.
            #[strum(default)]
            Other(String),
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                s.parse::<Self>().unwrap_or(Self::Other(s))
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.to_string()
            }
        }
    };
}

spec_enum! {
    /// Encryption algorithms usable with a ciphertext-producing or
    /// ciphertext-consuming operation.
    EncryptionAlgorithmSpec {
        /// Authenticated symmetric encryption under a service-managed
        /// symmetric key. The server default when the field is omitted.
        SymmetricDefault => "SYMMETRIC_DEFAULT",
        RsaesOaepSha1 => "RSAES_OAEP_SHA_1",
        RsaesOaepSha256 => "RSAES_OAEP_SHA_256",
        Sm2Pke => "SM2PKE",
    }
}

spec_enum! {
    /// Length of a generated symmetric data key.
    DataKeySpec {
        Aes256 => "AES_256",
        Aes128 => "AES_128",
    }
}

spec_enum! {
    /// Type of a generated asymmetric data key pair.
    DataKeyPairSpec {
        Rsa2048 => "RSA_2048",
        Rsa3072 => "RSA_3072",
        Rsa4096 => "RSA_4096",
        EccNistP256 => "ECC_NIST_P256",
        EccNistP384 => "ECC_NIST_P384",
        EccNistP521 => "ECC_NIST_P521",
        EccSecgP256K1 => "ECC_SECG_P256K1",
        Sm2 => "SM2",
    }
}

spec_enum! {
    /// Algorithm used to wrap key material before import. Which
    /// combinations of wrapping algorithm and wrapping key spec are
    /// accepted is decided by the remote service.
    AlgorithmSpec {
        /// Supported for symmetric key material only; deprecated by the
        /// service for new imports.
        RsaesPkcs1V15 => "RSAES_PKCS1_V1_5",
        RsaesOaepSha1 => "RSAES_OAEP_SHA_1",
        RsaesOaepSha256 => "RSAES_OAEP_SHA_256",
        RsaAesKeyWrapSha1 => "RSA_AES_KEY_WRAP_SHA_1",
        RsaAesKeyWrapSha256 => "RSA_AES_KEY_WRAP_SHA_256",
        Sm2Pke => "SM2PKE",
    }
}

spec_enum! {
    /// Type of the public wrapping key returned for an import.
    WrappingKeySpec {
        Rsa2048 => "RSA_2048",
        Rsa3072 => "RSA_3072",
        Rsa4096 => "RSA_4096",
        Sm2 => "SM2",
    }
}

spec_enum! {
    /// Whether imported key material expires.
    ExpirationModel {
        /// Expires at `valid_to`; the field is then required.
        KeyMaterialExpires => "KEY_MATERIAL_EXPIRES",
        KeyMaterialDoesNotExpire => "KEY_MATERIAL_DOES_NOT_EXPIRE",
    }
}

spec_enum! {
    /// Operations a grant can authorize. The target key's type restricts
    /// which of these a grant may name; the remote service rejects
    /// mismatches.
    GrantOperation {
        Decrypt => "Decrypt",
        Encrypt => "Encrypt",
        GenerateDataKey => "GenerateDataKey",
        GenerateDataKeyWithoutPlaintext => "GenerateDataKeyWithoutPlaintext",
        GenerateDataKeyPair => "GenerateDataKeyPair",
        GenerateDataKeyPairWithoutPlaintext => "GenerateDataKeyPairWithoutPlaintext",
        ReEncryptFrom => "ReEncryptFrom",
        ReEncryptTo => "ReEncryptTo",
        Sign => "Sign",
        Verify => "Verify",
        GetPublicKey => "GetPublicKey",
        CreateGrant => "CreateGrant",
        RetireGrant => "RetireGrant",
        DescribeKey => "DescribeKey",
        GenerateMac => "GenerateMac",
        VerifyMac => "VerifyMac",
        DeriveSharedSecret => "DeriveSharedSecret",
    }
}

spec_enum! {
    /// Key-agreement primitive for shared-secret derivation.
    KeyAgreementAlgorithmSpec {
        Ecdh => "ECDH",
    }
}

spec_enum! {
    /// Mechanism used to encrypt response material for an attested
    /// recipient.
    KeyEncryptionMechanism {
        RsaesOaepSha256 => "RSAES_OAEP_SHA_256",
    }
}

spec_enum! {
    /// What a key may be used for.
    KeyUsageType {
        EncryptDecrypt => "ENCRYPT_DECRYPT",
        SignVerify => "SIGN_VERIFY",
        GenerateVerifyMac => "GENERATE_VERIFY_MAC",
        KeyAgreement => "KEY_AGREEMENT",
    }
}

spec_enum! {
    /// Lifecycle state of a key.
    KeyState {
        Creating => "Creating",
        Enabled => "Enabled",
        Disabled => "Disabled",
        PendingDeletion => "PendingDeletion",
        PendingImport => "PendingImport",
        PendingReplicaDeletion => "PendingReplicaDeletion",
        Unavailable => "Unavailable",
        Updating => "Updating",
    }
}

spec_enum! {
    /// Source of a key's material.
    OriginType {
        AwsKms => "AWS_KMS",
        External => "EXTERNAL",
        AwsCloudHsm => "AWS_CLOUDHSM",
        ExternalKeyStore => "EXTERNAL_KEY_STORE",
    }
}

spec_enum! {
    /// Cryptographic configuration of a key.
    KeySpec {
        SymmetricDefault => "SYMMETRIC_DEFAULT",
        Rsa2048 => "RSA_2048",
        Rsa3072 => "RSA_3072",
        Rsa4096 => "RSA_4096",
        EccNistP256 => "ECC_NIST_P256",
        EccNistP384 => "ECC_NIST_P384",
        EccNistP521 => "ECC_NIST_P521",
        EccSecgP256K1 => "ECC_SECG_P256K1",
        Hmac224 => "HMAC_224",
        Hmac256 => "HMAC_256",
        Hmac384 => "HMAC_384",
        Hmac512 => "HMAC_512",
        Sm2 => "SM2",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_context_key_is_rejected_and_state_kept() {
        let mut context = EncryptionContext::new();
        context.insert("purpose", "invoices").unwrap();

        let err = context.insert("purpose", "payroll").unwrap_err();
        assert!(
            matches!(err, KmsModelError::DuplicateContextEntry(ref k) if k == "purpose"),
            "unexpected error: {err}"
        );
        assert_eq!(context.get("purpose"), Some("invoices"));
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn bulk_context_construction_rebinds_silently() {
        let context: EncryptionContext =
            [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(context.get("a"), Some("3"));
        assert_eq!(context.len(), 2);
    }

    #[test]
    fn context_displays_sorted_pairs() {
        let context: EncryptionContext = [("dept", "it"), ("app", "billing")].into_iter().collect();
        assert_eq!(context.to_string(), "{app=billing, dept=it}");
    }

    #[test]
    fn unknown_spec_value_round_trips() {
        let spec: DataKeySpec = "AES_512".parse().unwrap();
        assert_eq!(spec, DataKeySpec::Other("AES_512".to_owned()));
        assert_eq!(spec.to_string(), "AES_512");

        let known: DataKeySpec = "AES_256".parse().unwrap();
        assert_eq!(known, DataKeySpec::Aes256);
        assert_eq!(known.to_string(), "AES_256");
    }
}
