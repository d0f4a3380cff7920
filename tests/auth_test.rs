use bookrack::auth::password::PasswordManager;
use bookrack::auth::token::{extract_bearer_token, Claims, TokenManager};

#[test]
fn test_token_issue_and_verify() {
    let tokens = TokenManager::new("test-signing-key-for-auth-tests");

    let token = tokens.issue("user123").unwrap();
    assert!(!token.is_empty());

    let subject = tokens.verify(&token).unwrap();
    assert_eq!(subject, "user123");
}

#[test]
fn test_invalid_token_verification() {
    let tokens = TokenManager::new("test-signing-key-for-auth-tests");

    assert!(tokens.verify("invalid.token.here").is_err());
    assert!(tokens.verify("").is_err());
}

#[test]
fn test_rotated_secret_invalidates_outstanding_tokens() {
    let token = TokenManager::new("first-signing-key").issue("user123").unwrap();

    // The same token population served with a different secret rejects it
    let rotated = TokenManager::new("second-signing-key");
    assert!(rotated.verify(&token).is_err());
}

#[test]
fn test_verification_failures_are_indistinguishable() {
    let tokens = TokenManager::new("first-signing-key");
    let forged = TokenManager::new("second-signing-key").issue("user123").unwrap();

    let malformed = tokens.verify("not-a-jwt").unwrap_err();
    let bad_signature = tokens.verify(&forged).unwrap_err();
    assert_eq!(malformed.status_code(), bad_signature.status_code());
    assert_eq!(malformed.public_message(), bad_signature.public_message());
}

#[test]
fn test_claims_carry_fifteen_day_expiry() {
    let claims = Claims::new("user123".to_string());
    assert!(!claims.is_expired());
    assert_eq!(claims.exp - claims.iat, 15 * 24 * 60 * 60);
}

#[test]
fn test_expired_claims() {
    let mut claims = Claims::new("user123".to_string());
    claims.exp = claims.iat.saturating_sub(3600); // 1 hour before issuance
    assert!(claims.is_expired());
}

#[test]
fn test_extract_bearer_token() {
    assert_eq!(
        extract_bearer_token("Bearer abc123"),
        Some("abc123".to_string())
    );
    assert_eq!(extract_bearer_token("bearer abc123"), None);
    assert_eq!(extract_bearer_token("Token abc123"), None);
    assert_eq!(extract_bearer_token(""), None);
}

#[test]
fn test_password_hash_is_never_the_plaintext() {
    let passwords = PasswordManager::new();
    let hash = passwords.hash("secret1").unwrap();
    assert_ne!(hash, "secret1");
    assert!(!hash.contains("secret1"));
}

#[test]
fn test_password_verify_roundtrip() {
    let passwords = PasswordManager::new();
    let hash = passwords.hash("secret1").unwrap();

    assert!(passwords.verify("secret1", &hash).unwrap());
    assert!(!passwords.verify("wrong-password", &hash).unwrap());
}

#[test]
fn test_same_password_hashes_differently() {
    let passwords = PasswordManager::new();
    let first = passwords.hash("secret1").unwrap();
    let second = passwords.hash("secret1").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_malformed_stored_hash_is_an_error_not_a_mismatch() {
    let passwords = PasswordManager::new();
    assert!(passwords.verify("secret1", "plainly-not-a-hash").is_err());
}
