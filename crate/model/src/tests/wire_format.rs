use boreal_logger::log_init;
use serde_json::{Value, json};
use time::macros::datetime;

use crate::{
    operations::{
        CreateGrant, Decrypt, DecryptResponse, DeriveSharedSecret, GenerateDataKey,
        GenerateDataKeyPair, GenerateDataKeyPairWithoutPlaintext, GetParametersForImport,
        ImportKeyMaterial, ReEncrypt, ReplicateKey, ReplicateKeyResponse,
    },
    types::{
        AlgorithmSpec, DataKeyPairSpec, DataKeySpec, EncryptionAlgorithmSpec, EncryptionContext,
        ExpirationModel, GrantConstraints, GrantOperation, KeyAgreementAlgorithmSpec, KeySpec,
        KeyState, OriginType, Tag, WrappingKeySpec,
    },
    wire::{self, KmsOperation},
};

fn body_as_value<O: KmsOperation>(op: &O) -> Value {
    let body = wire::to_request_body(op).unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[test]
fn unset_number_of_bytes_is_omitted_from_the_body() {
    log_init("info");
    let req = GenerateDataKey::new("alias/test").with_key_spec(DataKeySpec::Aes256);
    let value = body_as_value(&req);

    let object = value.as_object().unwrap();
    assert_eq!(object.get("KeyId"), Some(&json!("alias/test")));
    assert_eq!(object.get("KeySpec"), Some(&json!("AES_256")));
    // absent, not null or zero
    assert!(!object.contains_key("NumberOfBytes"));
    assert!(!object.contains_key("EncryptionContext"));
    assert!(!object.contains_key("GrantTokens"));
    assert!(!object.contains_key("DryRun"));
}

#[test]
fn binary_fields_transit_base64() {
    let req = Decrypt::new(vec![1, 2, 3]);
    let value = body_as_value(&req);
    assert_eq!(value["CiphertextBlob"], json!("AQID"));
}

#[test]
fn request_round_trips_through_json() {
    let mut req = Decrypt::new(vec![9, 8, 7])
        .with_key_id("mrk-1234")
        .with_encryption_algorithm(EncryptionAlgorithmSpec::RsaesOaepSha256)
        .with_grant_token("tok");
    req.add_encryption_context_entry("app", "billing").unwrap();

    let body = wire::to_request_body(&req).unwrap();
    let back: Decrypt = serde_json::from_slice(&body).unwrap();
    assert_eq!(back, req);
}

#[test]
fn unknown_enum_value_from_the_server_is_preserved() {
    let body = json!({
        "KeyId": "mrk-1234",
        "Plaintext": "AQID",
        "EncryptionAlgorithm": "QUANTUM_SAFE_2048",
    });
    let response: DecryptResponse = serde_json::from_value(body).unwrap();

    assert_eq!(
        response.plaintext.as_ref().map(|p| p.as_slice()),
        Some(&[1_u8, 2, 3][..])
    );
    assert_eq!(
        response.encryption_algorithm,
        Some(EncryptionAlgorithmSpec::Other("QUANTUM_SAFE_2048".to_owned()))
    );

    // the unrecognized literal survives a re-serialization verbatim
    let echoed = serde_json::to_value(&response).unwrap();
    assert_eq!(echoed["EncryptionAlgorithm"], json!("QUANTUM_SAFE_2048"));
}

#[test]
fn valid_to_transits_as_epoch_seconds() {
    let req = ImportKeyMaterial::new("mrk-1234", vec![1], vec![2])
        .with_valid_to(datetime!(2026-08-01 00:00 UTC))
        .with_expiration_model(ExpirationModel::KeyMaterialExpires);
    let value = body_as_value(&req);

    assert_eq!(value["ValidTo"], json!(1_785_542_400));
    assert_eq!(value["ExpirationModel"], json!("KEY_MATERIAL_EXPIRES"));
    assert_eq!(value["ImportToken"], json!("AQ=="));
}

#[test]
fn replicate_key_serializes_tags_as_objects() {
    let req = ReplicateKey::new("mrk-1234", "eu-west-1")
        .with_description("replica for EU workloads")
        .with_tag(Tag::new("env", "prod"));
    let value = body_as_value(&req);

    assert_eq!(value["ReplicaRegion"], json!("eu-west-1"));
    assert_eq!(value["Tags"], json!([{"TagKey": "env", "TagValue": "prod"}]));
}

#[test]
fn grant_request_serializes_operations_as_literals() {
    let req = CreateGrant::new(
        "alias/app",
        "arn:aws:iam::111122223333:role/consumer",
        vec![
            GrantOperation::GenerateDataKeyPairWithoutPlaintext,
            GrantOperation::ReEncryptFrom,
        ],
    );
    let value = body_as_value(&req);
    assert_eq!(
        value["Operations"],
        json!(["GenerateDataKeyPairWithoutPlaintext", "ReEncryptFrom"])
    );
}

#[test]
fn empty_response_body_deserializes() {
    let response = wire::response_from_slice::<ImportKeyMaterial>(b"{}").unwrap();
    assert_eq!(response, crate::operations::ImportKeyMaterialResponse::default());
}

#[test]
fn malformed_response_body_reports_the_operation() {
    let err = wire::response_from_slice::<Decrypt>(b"not json").unwrap_err();
    assert!(err.to_string().contains("unmarshalling Decrypt response"));
}

#[test]
fn grant_constraints_serialize_under_the_constraints_key() {
    let context: EncryptionContext = [("tenant", "blue")].into_iter().collect();
    let req = CreateGrant::new(
        "alias/app",
        "arn:aws:iam::111122223333:role/consumer",
        vec![GrantOperation::Decrypt],
    )
    .with_constraints(GrantConstraints::equals(context));
    let value = body_as_value(&req);

    assert_eq!(
        value["Constraints"],
        json!({"EncryptionContextEquals": {"tenant": "blue"}})
    );
    assert!(!value.as_object().unwrap().contains_key("RetiringPrincipal"));
}

#[test]
fn replica_metadata_deserializes_with_timestamps_and_enums() {
    let body = json!({
        "ReplicaKeyMetadata": {
            "AWSAccountId": "111122223333",
            "KeyId": "mrk-1234",
            "CreationDate": 1_754_006_400,
            "Enabled": true,
            "KeyState": "Enabled",
            "Origin": "AWS_KMS",
            "KeySpec": "SYMMETRIC_DEFAULT",
            "MultiRegion": true,
        },
        "ReplicaPolicy": "{}",
    });
    let response: ReplicateKeyResponse = serde_json::from_value(body).unwrap();

    let metadata = response.replica_key_metadata.unwrap();
    assert_eq!(metadata.key_id.as_str(), "mrk-1234");
    assert_eq!(
        metadata.creation_date,
        Some(datetime!(2025-08-01 00:00 UTC))
    );
    assert_eq!(metadata.key_state, Some(KeyState::Enabled));
    assert_eq!(metadata.origin, Some(OriginType::AwsKms));
    assert_eq!(metadata.key_spec, Some(KeySpec::SymmetricDefault));
    assert!(metadata.encryption_algorithms.is_empty());
}

#[test]
fn every_operation_routes_under_the_service_prefix() {
    assert_eq!(wire::CONTENT_TYPE, "application/x-amz-json-1.1");
    assert_eq!(wire::target::<CreateGrant>(), "TrentService.CreateGrant");
    assert_eq!(wire::target::<Decrypt>(), "TrentService.Decrypt");
    assert_eq!(
        wire::target::<GenerateDataKey>(),
        "TrentService.GenerateDataKey"
    );
    assert_eq!(
        wire::target::<GenerateDataKeyPair>(),
        "TrentService.GenerateDataKeyPair"
    );
    assert_eq!(
        wire::target::<GenerateDataKeyPairWithoutPlaintext>(),
        "TrentService.GenerateDataKeyPairWithoutPlaintext"
    );
    assert_eq!(
        wire::target::<GetParametersForImport>(),
        "TrentService.GetParametersForImport"
    );
    assert_eq!(
        wire::target::<ImportKeyMaterial>(),
        "TrentService.ImportKeyMaterial"
    );
    assert_eq!(wire::target::<ReplicateKey>(), "TrentService.ReplicateKey");
    assert_eq!(wire::target::<ReEncrypt>(), "TrentService.ReEncrypt");
    assert_eq!(
        wire::target::<DeriveSharedSecret>(),
        "TrentService.DeriveSharedSecret"
    );
}

#[test]
fn derive_shared_secret_carries_der_public_key_base64() {
    let req = DeriveSharedSecret::new(
        "mrk-1234",
        KeyAgreementAlgorithmSpec::Ecdh,
        vec![0x30, 0x59],
    )
    .with_dry_run(true);
    let value = body_as_value(&req);

    assert_eq!(value["KeyAgreementAlgorithm"], json!("ECDH"));
    assert_eq!(value["PublicKey"], json!("MFk="));
    assert_eq!(value["DryRun"], json!(true));
}

#[test]
fn get_parameters_for_import_serializes_all_fields() {
    let req = GetParametersForImport::new(
        "mrk-1234",
        AlgorithmSpec::RsaesOaepSha256,
        WrappingKeySpec::Rsa2048,
    );
    let value = body_as_value(&req);
    assert_eq!(value["WrappingAlgorithm"], json!("RSAES_OAEP_SHA_256"));
    assert_eq!(value["WrappingKeySpec"], json!("RSA_2048"));
}

#[test]
fn key_pair_request_round_trips() {
    let req = GenerateDataKeyPair::new("mrk-1234", DataKeyPairSpec::EccNistP384)
        .with_grant_token("tok");
    let body = wire::to_request_body(&req).unwrap();
    let back: GenerateDataKeyPair = serde_json::from_slice(&body).unwrap();
    assert_eq!(back, req);
}
