//! Relationship tests between a requester and an expense's accounts.

use crate::model::{Expense, ExpenseView};
use hostkit_auth::Requester;

/// Created the expense, or administers the payee account.
pub(crate) fn is_owner(requester: &Requester, expense: &Expense) -> bool {
    requester.user_id() == Some(expense.created_by_user_id)
        || requester.is_admin_of(expense.from_collective_id)
}

/// Administers the expense collective or its parent.
pub(crate) fn is_collective_admin(requester: &Requester, view: &ExpenseView<'_>) -> bool {
    requester.is_admin_of(view.collective.id)
        || view
            .collective
            .parent_id
            .is_some_and(|parent| requester.is_admin_of(parent))
}

pub(crate) fn is_host_admin(requester: &Requester, view: &ExpenseView<'_>) -> bool {
    view.host_id().is_some_and(|host| requester.is_admin_of(host))
}

/// Host admin, or collective admin when the collective is its own host.
pub(crate) fn is_paying_admin(requester: &Requester, view: &ExpenseView<'_>) -> bool {
    is_host_admin(requester, view)
        || (view.collective.is_self_hosted() && is_collective_admin(requester, view))
}

/// Accountant of the expense collective or its parent.
pub(crate) fn is_collective_accountant(requester: &Requester, view: &ExpenseView<'_>) -> bool {
    requester.is_accountant_of(view.collective.id)
        || view
            .collective
            .parent_id
            .is_some_and(|parent| requester.is_accountant_of(parent))
}

pub(crate) fn is_host_accountant(requester: &Requester, view: &ExpenseView<'_>) -> bool {
    view.host_id()
        .is_some_and(|host| requester.is_accountant_of(host))
}

pub(crate) fn is_admin_or_accountant(requester: &Requester, view: &ExpenseView<'_>) -> bool {
    is_collective_admin(requester, view)
        || is_host_admin(requester, view)
        || is_collective_accountant(requester, view)
        || is_host_accountant(requester, view)
}

/// Administers the payee recorded on a draft.
pub(crate) fn is_draft_payee(requester: &Requester, expense: &Expense) -> bool {
    expense
        .draft_payee()
        .is_some_and(|payee| requester.is_admin_of(payee))
}
