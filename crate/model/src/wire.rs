//! JSON envelope of the control-plane protocol.
//!
//! Every operation is a POST to the service endpoint: a routing target
//! header naming the operation, a vendor JSON media type, and the
//! request object as the body. Binary payloads transit base64-encoded,
//! timestamps as epoch seconds, enumerations as their literal strings.

use serde::{Serialize, de::DeserializeOwned};
use tracing::trace;

use crate::{
    error::result::{KmsModelResult, ResultHelper},
    operations::{
        CreateGrant, CreateGrantResponse, Decrypt, DecryptResponse, DeriveSharedSecret,
        DeriveSharedSecretResponse, GenerateDataKey, GenerateDataKeyPair,
        GenerateDataKeyPairResponse, GenerateDataKeyPairWithoutPlaintext,
        GenerateDataKeyPairWithoutPlaintextResponse, GenerateDataKeyResponse,
        GetParametersForImport, GetParametersForImportResponse, ImportKeyMaterial,
        ImportKeyMaterialResponse, ReEncrypt, ReEncryptResponse, ReplicateKey,
        ReplicateKeyResponse,
    },
};

/// Service prefix of the routing target header.
pub const TARGET_PREFIX: &str = "TrentService";

/// Media type of request and response bodies.
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// A marshallable control-plane operation: its routing name and the type
/// its response body deserializes into.
pub trait KmsOperation: Serialize {
    const NAME: &'static str;
    type Response: DeserializeOwned;
}

/// Value of the routing target header for `O`, e.g.
/// `TrentService.Decrypt`.
#[must_use]
pub fn target<O: KmsOperation>() -> String {
    format!("{TARGET_PREFIX}.{}", O::NAME)
}

/// Serializes `op` into the JSON request body.
///
/// Absent optional fields and empty lists are omitted entirely, never
/// sent as `null`, zero or `[]`; the remote service treats a present
/// field as deliberately set.
pub fn to_request_body<O: KmsOperation>(op: &O) -> KmsModelResult<Vec<u8>> {
    trace!(operation = O::NAME, "marshalling request");
    Ok(serde_json::to_vec(op)?)
}

/// Deserializes a response body for `O`.
pub fn response_from_slice<O: KmsOperation>(body: &[u8]) -> KmsModelResult<O::Response> {
    trace!(operation = O::NAME, "unmarshalling response");
    serde_json::from_slice(body).with_context(|| format!("unmarshalling {} response", O::NAME))
}

macro_rules! kms_operation {
    ($($request:ty => $name:literal, $response:ty;)+) => {
        $(impl KmsOperation for $request {
            const NAME: &'static str = $name;
            type Response = $response;
        })+
    };
}

kms_operation! {
    CreateGrant => "CreateGrant", CreateGrantResponse;
    Decrypt => "Decrypt", DecryptResponse;
    GenerateDataKey => "GenerateDataKey", GenerateDataKeyResponse;
    GenerateDataKeyPair => "GenerateDataKeyPair", GenerateDataKeyPairResponse;
    GenerateDataKeyPairWithoutPlaintext => "GenerateDataKeyPairWithoutPlaintext", GenerateDataKeyPairWithoutPlaintextResponse;
    GetParametersForImport => "GetParametersForImport", GetParametersForImportResponse;
    ImportKeyMaterial => "ImportKeyMaterial", ImportKeyMaterialResponse;
    ReplicateKey => "ReplicateKey", ReplicateKeyResponse;
    ReEncrypt => "ReEncrypt", ReEncryptResponse;
    DeriveSharedSecret => "DeriveSharedSecret", DeriveSharedSecretResponse;
}
