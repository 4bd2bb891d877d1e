use uuid::Uuid;

use super::*;
use crate::account::{Metadata, Principal};

fn session(role: Role) -> Session {
    let principal = Principal { id: Uuid::new_v4(), email: "p@algotrek.com".into(), role, metadata: Metadata::new() };
    Session::issue(principal)
}

// =============================================================================
// has_role
// =============================================================================

#[test]
fn has_role_matches_principal() {
    let admin = session(Role::Admin);
    assert!(has_role(Some(&admin), Role::Admin));
    assert!(!has_role(Some(&admin), Role::User));
}

#[test]
fn has_role_false_when_signed_out() {
    assert!(!has_role(None, Role::Admin));
    assert!(!has_role(None, Role::User));
}

// =============================================================================
// check_access
// =============================================================================

#[test]
fn authenticated_requirement() {
    let user = session(Role::User);
    assert_eq!(check_access(Some(&user), Requirement::Authenticated), Access::Granted);
    assert_eq!(
        check_access(None, Requirement::Authenticated),
        Access::Denied(DenyReason::SignInRequired)
    );
}

#[test]
fn admin_requirement_asks_anonymous_to_sign_in_and_denies_user() {
    let user = session(Role::User);
    let admin = session(Role::Admin);
    assert!(check_access(Some(&admin), Requirement::Role(Role::Admin)).is_granted());
    assert_eq!(
        check_access(Some(&user), Requirement::Role(Role::Admin)),
        Access::Denied(DenyReason::AdminRequired)
    );
    assert_eq!(
        check_access(None, Requirement::Role(Role::Admin)),
        Access::Denied(DenyReason::SignInRequired)
    );
}

#[test]
fn user_requirement() {
    let user = session(Role::User);
    let admin = session(Role::Admin);
    assert!(check_access(Some(&user), Requirement::Role(Role::User)).is_granted());
    assert_eq!(
        check_access(Some(&admin), Requirement::Role(Role::User)),
        Access::Denied(DenyReason::RoleRequired(Role::User))
    );
    assert_eq!(
        check_access(None, Requirement::Role(Role::User)),
        Access::Denied(DenyReason::SignInRequired)
    );
}

#[test]
fn deny_messages() {
    assert_eq!(DenyReason::AdminRequired.message(), "You need admin privileges to access this page.");
    assert_eq!(DenyReason::SignInRequired.message(), "Please sign in to access this page.");
}
