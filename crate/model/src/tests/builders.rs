use std::hash::{DefaultHasher, Hash, Hasher};

use crate::{
    KmsModelError,
    operations::{CreateGrant, Decrypt, GenerateDataKey},
    types::{DataKeySpec, EncryptionContext, GrantOperation},
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn fresh_request_has_absent_optionals_and_empty_lists() {
    let req = GenerateDataKey::new("alias/app");
    assert!(req.encryption_context.is_none());
    assert!(req.number_of_bytes.is_none());
    assert!(req.key_spec.is_none());
    assert!(req.grant_tokens.is_empty());
    assert!(req.recipient.is_none());
    assert!(req.dry_run.is_none());
}

#[test]
fn scalar_with_replaces() {
    let req = Decrypt::new(vec![1])
        .with_key_id("alias/first")
        .with_key_id("alias/second");
    assert_eq!(req.key_id.as_ref().map(|k| k.as_str()), Some("alias/second"));
}

#[test]
fn list_with_appends_instead_of_replacing() {
    let req = Decrypt::new(vec![1])
        .with_grant_token("a")
        .with_grant_token("b")
        .with_grant_tokens(["c", "d"]);
    assert_eq!(req.grant_tokens, ["a", "b", "c", "d"]);
}

#[test]
fn map_with_replaces_wholesale() {
    let first: EncryptionContext = [("a", "1")].into_iter().collect();
    let second: EncryptionContext = [("b", "2")].into_iter().collect();

    let req = Decrypt::new(vec![1])
        .with_encryption_context(first)
        .with_encryption_context(second.clone());
    assert_eq!(req.encryption_context, Some(second));
}

#[test]
fn duplicate_context_entry_fails_and_leaves_request_intact() {
    let mut req = GenerateDataKey::new("alias/app");
    req.add_encryption_context_entry("purpose", "invoices")
        .unwrap();

    let err = req
        .add_encryption_context_entry("purpose", "payroll")
        .unwrap_err();
    assert!(matches!(err, KmsModelError::DuplicateContextEntry(ref k) if k == "purpose"));

    let context = req.encryption_context.as_ref().unwrap();
    assert_eq!(context.get("purpose"), Some("invoices"));
    assert_eq!(context.len(), 1);
}

#[test]
fn clear_context_resets_to_absent_not_empty() {
    let mut req = GenerateDataKey::new("alias/app");
    req.add_encryption_context_entry("k", "v").unwrap();
    req.clear_encryption_context_entries();
    assert!(req.encryption_context.is_none());

    // an explicitly empty context is a different observable state
    let empty = GenerateDataKey::new("alias/app").with_encryption_context(EncryptionContext::new());
    assert_ne!(empty.encryption_context, req.encryption_context);
}

#[test]
fn chained_context_entries_accumulate() {
    let mut req = Decrypt::new(vec![1]);
    req.add_encryption_context_entry("a", "1")
        .unwrap()
        .add_encryption_context_entry("b", "2")
        .unwrap();
    assert_eq!(req.encryption_context.as_ref().unwrap().len(), 2);
}

#[test]
fn structural_equality_and_hash() {
    let build = || {
        CreateGrant::new(
            "alias/app",
            "arn:aws:iam::111122223333:role/consumer",
            vec![GrantOperation::Encrypt, GrantOperation::Decrypt],
        )
        .with_name("nightly-batch")
        .with_grant_token("tok-1")
    };

    let a = build();
    let b = build();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let c = build().with_grant_token("tok-2");
    assert_ne!(a, c);
}

#[test]
fn any_single_field_change_breaks_equality() {
    let base = GenerateDataKey::new("alias/app").with_key_spec(DataKeySpec::Aes256);

    assert_ne!(
        base.clone(),
        base.clone().with_key_spec(DataKeySpec::Aes128)
    );
    assert_ne!(base.clone(), base.clone().with_number_of_bytes(32));
    assert_ne!(base.clone(), base.clone().with_dry_run(true));
    assert_eq!(base.clone(), base.clone());
}
