use fdns_domain::{DomainError, SharedSecretKey};

#[test]
fn test_shared_secret_parses_keyname_and_secret() {
    let key: SharedSecretKey = "transfer:c2VjcmV0".parse().unwrap();

    assert_eq!(key.name, "transfer.");
    assert_eq!(key.secret, "c2VjcmV0");
    assert!(key.has_secret());
}

#[test]
fn test_shared_secret_splits_on_first_colon_only() {
    let key: SharedSecretKey = "k:a:b".parse().unwrap();

    assert_eq!(key.name, "k.");
    assert_eq!(key.secret, "a:b");
}

#[test]
fn test_shared_secret_without_colon_is_rejected() {
    let result = "transfer".parse::<SharedSecretKey>();

    assert!(matches!(result, Err(DomainError::InvalidSharedSecret(_))));
}

#[test]
fn test_shared_secret_debug_redacts_secret() {
    let key: SharedSecretKey = "transfer:c2VjcmV0".parse().unwrap();

    let debug = format!("{:?}", key);
    assert!(!debug.contains("c2VjcmV0"));
}

#[test]
fn test_shared_secret_with_empty_name_is_rejected() {
    let result = ":c2VjcmV0".parse::<SharedSecretKey>();

    assert!(matches!(result, Err(DomainError::InvalidSharedSecret(_))));
}

#[test]
fn test_shared_secret_with_illegal_name_is_rejected() {
    let result = "a..b:c2VjcmV0".parse::<SharedSecretKey>();

    assert!(matches!(result, Err(DomainError::InvalidDomainName(_))));
}

#[test]
fn test_shared_secret_with_empty_secret_has_no_secret() {
    let key: SharedSecretKey = "transfer:".parse().unwrap();

    assert!(!key.has_secret());
}
