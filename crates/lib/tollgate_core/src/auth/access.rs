//! Access-rights composition and permit/deny decisions.

use regex::Regex;

use super::AuthError;
use crate::models::{AccessDetails, Identity, RoleTable};

/// Role assigned to callers with no explicit roles.
pub const IMPLICIT_ROLE: &str = "basic";

/// Operation name granted by self-access policies.
pub const SELF_OPERATION: &str = "self";

/// How an operation on an access object may be authorized.
pub enum AccessPolicy<'a> {
    /// Only the caller's role-derived grants apply.
    RoleBased,
    /// Permit when the caller is granted `"self"` on the object and the
    /// predicate holds for the target, otherwise fall back to role grants.
    SelfOrRole(&'a dyn Fn(&Identity) -> bool),
}

/// Compose a caller's effective access rights from assigned roles.
///
/// An empty role list is treated as the single implicit `basic` role.
/// Roles missing from the table are skipped. When two roles grant the
/// same object, their operation lists are appended in role order without
/// deduplication — duplicates are observable by design.
pub fn compose_access_details(user_roles: &[String], role_table: &RoleTable) -> AccessDetails {
    let implicit = [IMPLICIT_ROLE.to_string()];
    let roles: &[String] = if user_roles.is_empty() {
        &implicit
    } else {
        user_roles
    };

    let mut result = AccessDetails::new();
    for role in roles {
        let Some(details) = role_table.get(role) else {
            continue;
        };
        for (object, operations) in details {
            result
                .entry(object.clone())
                .or_default()
                .extend(operations.iter().cloned());
        }
    }
    result
}

/// Decide whether `identity` may perform `operation` on `object`.
///
/// The self shortcut is checked first: a `"self"` grant on the object
/// plus a true predicate permits regardless of other grants. Otherwise
/// any granted pattern matching `operation` permits; everything else is
/// `ActionNotPermitted`.
pub fn authenticate(
    identity: &Identity,
    object: &str,
    operation: &str,
    policy: AccessPolicy<'_>,
) -> Result<(), AuthError> {
    let granted = identity.access_details.get(object);

    if let AccessPolicy::SelfOrRole(is_self) = policy
        && let Some(patterns) = granted
        && patterns.iter().any(|p| op_matches(p, SELF_OPERATION))
        && is_self(identity)
    {
        return Ok(());
    }

    if let Some(patterns) = granted
        && patterns.iter().any(|p| op_matches(p, operation))
    {
        return Ok(());
    }

    Err(AuthError::ActionNotPermitted {
        object: object.to_string(),
        action: operation.to_string(),
    })
}

/// Match an operation against a granted pattern.
///
/// `*` is a wildcard; other patterns are anchored regexes; a pattern
/// that fails to compile falls back to literal comparison.
fn op_matches(pattern: &str, operation: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(operation),
        Err(_) => pattern == operation,
    }
}
