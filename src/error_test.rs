use super::*;

#[test]
fn messages_are_form_ready() {
    assert_eq!(AuthError::AlreadyExists.to_string(), "User already exists");
    assert_eq!(
        AuthError::SingleUserLimitExceeded.to_string(),
        "Only one regular user is allowed. Please contact admin."
    );
    assert_eq!(AuthError::InvalidRoleCredentials.to_string(), "Invalid admin credentials");
    assert_eq!(AuthError::NotFound.to_string(), "User not found");
    assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid password");
    assert_eq!(AuthError::Unauthenticated.to_string(), "No user logged in");
}

#[test]
fn credential_error_carries_detail() {
    let err = AuthError::Credential("salt too short".into());
    assert_eq!(err.to_string(), "credential hashing failed: salt too short");
    assert_eq!(err.code(), "credential");
}

#[test]
fn codes_are_distinct() {
    let all = [
        AuthError::AlreadyExists,
        AuthError::SingleUserLimitExceeded,
        AuthError::InvalidRoleCredentials,
        AuthError::NotFound,
        AuthError::InvalidCredentials,
        AuthError::Unauthenticated,
        AuthError::Forbidden,
        AuthError::InvalidEmail,
        AuthError::Credential(String::new()),
    ];
    let mut codes = all.iter().map(AuthError::code).collect::<Vec<_>>();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), all.len());
}
