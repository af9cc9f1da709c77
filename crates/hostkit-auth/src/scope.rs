//! OAuth scope enforcement.
//!
//! Requests authenticated by session carry no token and pass every scope
//! check. Requests carrying a user token are limited to the token's scope
//! list.

use crate::{PermissionError, Requester};
use hostkit_types::OAuthScope;

/// Returns `true` if the requester's token covers `scope`.
///
/// Always `true` when the request does not use an OAuth token.
///
/// # Example
///
/// ```
/// use hostkit_auth::{check_scope, OAuthScope, Requester};
/// use hostkit_types::{CollectiveId, UserId};
///
/// let session = Requester::user(UserId(1), CollectiveId(1));
/// assert!(check_scope(&session, OAuthScope::Account));
///
/// let token = session.clone().with_token_scopes([OAuthScope::Account]);
/// assert!(check_scope(&token, OAuthScope::Account));
/// assert!(!check_scope(&token, OAuthScope::Root));
/// ```
#[must_use]
pub fn check_scope(requester: &Requester, scope: OAuthScope) -> bool {
    match requester.user_token() {
        None => true,
        Some(token) => token.scope.contains(&scope),
    }
}

/// Fails when the requester's token does not cover `scope`.
///
/// # Errors
///
/// Returns [`PermissionError::ScopeForbidden`], whose message is
/// `The User Token is not allowed for operations in scope "<scope>".`
pub fn enforce_scope(requester: &Requester, scope: OAuthScope) -> Result<(), PermissionError> {
    if check_scope(requester, scope) {
        return Ok(());
    }
    tracing::warn!(requester = %requester, scope = %scope, "token scope denied");
    Err(PermissionError::ScopeForbidden { scope })
}
