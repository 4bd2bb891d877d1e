use uuid::Uuid;

use super::*;
use crate::account::Metadata;

fn principal() -> Principal {
    Principal { id: Uuid::new_v4(), email: "user@x.com".into(), role: Role::User, metadata: Metadata::new() }
}

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn issue_gives_fresh_tokens() {
    let p = principal();
    let a = Session::issue(p.clone());
    let b = Session::issue(p);
    assert_eq!(a.principal, b.principal);
    assert_ne!(a.access_token, b.access_token);
}

#[test]
fn accessors_read_principal() {
    let session = Session::issue(principal());
    assert_eq!(session.role(), Role::User);
    assert_eq!(session.email(), "user@x.com");
}

#[test]
fn session_serializes_principal_fields() {
    let session = Session::issue(principal());
    let value = serde_json::to_value(&session).unwrap();
    assert_eq!(value["principal"]["email"], "user@x.com");
    assert_eq!(value["principal"]["role"], "user");
    assert_eq!(value["access_token"].as_str().unwrap().len(), 64);
}
