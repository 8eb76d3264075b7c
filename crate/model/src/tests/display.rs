use crate::{
    operations::{CreateGrant, Decrypt, GenerateDataKey, GetParametersForImport},
    types::{AlgorithmSpec, DataKeySpec, GrantOperation, WrappingKeySpec},
};

#[test]
fn decrypt_lists_present_fields_only_in_declaration_order() {
    let req = Decrypt::new(vec![0x00, 0x01, 0x02, 0x03]).with_key_id("alias/app");
    assert_eq!(
        req.to_string(),
        "{CiphertextBlob: 00010203,KeyId: alias/app}"
    );
}

#[test]
fn generate_data_key_renders_context_and_tokens() {
    let mut req = GenerateDataKey::new("alias/test")
        .with_key_spec(DataKeySpec::Aes256)
        .with_grant_token("tok");
    req.add_encryption_context_entry("dept", "it").unwrap();

    assert_eq!(
        req.to_string(),
        "{KeyId: alias/test,EncryptionContext: {dept=it},KeySpec: AES_256,GrantTokens: [tok]}"
    );
}

#[test]
fn create_grant_renders_operation_list() {
    let req = CreateGrant::new(
        "alias/app",
        "arn:aws:iam::111122223333:role/consumer",
        vec![GrantOperation::Encrypt, GrantOperation::Decrypt],
    );
    assert_eq!(
        req.to_string(),
        "{KeyId: alias/app,GranteePrincipal: arn:aws:iam::111122223333:role/consumer,\
         Operations: [Encrypt, Decrypt]}"
    );
}

#[test]
fn required_only_request_renders_every_field() {
    let req = GetParametersForImport::new(
        "mrk-1234",
        AlgorithmSpec::RsaAesKeyWrapSha256,
        WrappingKeySpec::Rsa4096,
    );
    assert_eq!(
        req.to_string(),
        "{KeyId: mrk-1234,WrappingAlgorithm: RSA_AES_KEY_WRAP_SHA_256,WrappingKeySpec: RSA_4096}"
    );
}
