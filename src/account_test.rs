use super::*;

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_parses_case_insensitively() {
    assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    assert_eq!(" User ".parse::<Role>(), Ok(Role::User));
}

#[test]
fn role_rejects_unknown() {
    let err = "owner".parse::<Role>().unwrap_err();
    assert_eq!(err, ParseRoleError("owner".into()));
    assert!(err.to_string().contains("owner"));
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    assert_eq!(Role::User.to_string(), "user");
}

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_trims_and_keeps_case() {
    assert_eq!(normalize_email("  User@X.com "), Some("User@X.com".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("user"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[test]
fn email_domain_splits_on_at() {
    assert_eq!(email_domain("admin@algotrek.com"), Some("algotrek.com"));
    assert_eq!(email_domain("nobody"), None);
}

// =============================================================================
// Principal
// =============================================================================

#[test]
fn account_principal_hides_credential() {
    let mut metadata = Metadata::new();
    metadata.insert("full_name".into(), "Test User".into());
    let account = Account::new("user@x.com".into(), "$argon2id$secret".into(), Role::User, metadata);

    let principal = account.principal();
    assert_eq!(principal.id, account.id);
    assert_eq!(principal.email, "user@x.com");
    let json = serde_json::to_string(&principal).unwrap();
    assert!(!json.contains("argon2"));
    assert!(json.contains("\"role\":\"user\""));
}

#[test]
fn display_name_prefers_full_name() {
    let mut metadata = Metadata::new();
    metadata.insert("full_name".into(), "Admin User".into());
    let principal = Principal { id: Uuid::new_v4(), email: "admin@algotrek.com".into(), role: Role::Admin, metadata };
    assert_eq!(principal.display_name(), "Admin User");
}

#[test]
fn display_name_falls_back_to_local_part() {
    let principal =
        Principal { id: Uuid::new_v4(), email: "grace@x.com".into(), role: Role::User, metadata: Metadata::new() };
    assert_eq!(principal.display_name(), "grace");
}
