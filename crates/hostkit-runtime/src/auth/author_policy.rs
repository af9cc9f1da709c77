//! `EXPENSE_AUTHOR_CANNOT_APPROVE` resolution.
//!
//! The policy only concerns approvers who authored the expense. The
//! collective's own policy and its host's policy are evaluated separately
//! and either one is enough to block the approval.
//!
//! | Source | Blocks when |
//! |--------|-------------|
//! | Collective | enabled and amount above threshold |
//! | Host | enabled, amount above threshold, and the collective is the host itself, or `appliesToHostedCollectives` with more than one admin (or `appliesToSingleAdminCollectives`) |

use crate::model::ExpenseView;
use hostkit_auth::{AuthorCannotApprovePolicy, PermissionError, Requester};
use hostkit_types::Amount;

/// Returns the threshold of the policy that blocks `requester` from
/// approving, or `None` when no policy applies.
#[must_use]
pub fn blocking_threshold(requester: &Requester, view: &ExpenseView<'_>) -> Option<Amount> {
    let expense = view.expense;
    if requester.user_id() != Some(expense.created_by_user_id) {
        return None;
    }

    let collective = view.collective;
    if let Some(policy) = collective.policies.author_cannot_approve() {
        if policy.covers(expense.amount) {
            return Some(threshold(policy, view));
        }
    }

    let host = view.host?;
    let policy = host.policies.author_cannot_approve()?;
    if !policy.covers(expense.amount) {
        return None;
    }
    let applies = collective.id == host.id
        || (policy.applies_to_hosted_collectives
            && (collective.admin_count > 1 || policy.applies_to_single_admin_collectives));
    applies.then(|| threshold(policy, view))
}

/// Fails when the author-cannot-approve policy blocks the approval.
///
/// # Errors
///
/// Returns [`PermissionError::AuthorCannotApprove`] with the configured
/// threshold.
pub fn check(requester: &Requester, view: &ExpenseView<'_>) -> Result<(), PermissionError> {
    match blocking_threshold(requester, view) {
        None => Ok(()),
        Some(threshold) => {
            tracing::debug!(
                requester = %requester,
                expense = %view.expense.id,
                %threshold,
                "author cannot approve"
            );
            Err(PermissionError::AuthorCannotApprove { threshold })
        }
    }
}

// Thresholds are compared in the expense currency.
fn threshold(policy: &AuthorCannotApprovePolicy, view: &ExpenseView<'_>) -> Amount {
    Amount::new(policy.amount_in_cents, view.expense.currency)
}
