//! Expense permission predicates.
//!
//! Every action is decided by one function, [`decide`]. The public
//! `can_*` / `assert_can_*` pairs are thin views over it, so the boolean
//! answer and the error a mutation returns can never disagree.
//!
//! # Decision Order
//!
//! ```text
//! 1. context store grant                   → allowed
//! 2. no user                               → Unauthenticated
//! 3. token scope (mutations only)          → ScopeForbidden
//! 4. draft payee override                  → allowed
//! 5. status gate                           → UnsupportedStatus
//! 6. feature limitation or frozen account  → UnsupportedUserFeature
//! 7. role / ownership                      → MinimalConditionNotMet
//! 8. author-cannot-approve (approve only)  → AuthorCannotApprove
//! ```
//!
//! Store grants hold for anonymous callers, such as an invited payee who
//! proved a draft's secret key.
//!
//! # Example
//!
//! ```
//! use hostkit_runtime::auth::{assert_can_pay_expense, can_pay_expense, RequestContext};
//! use hostkit_runtime::model::{Collective, CollectiveKind, Expense, ExpenseStatus, ExpenseView};
//! use hostkit_runtime::{ContextPermissionStore, PermissionError, Requester};
//! use hostkit_types::{Amount, CollectiveId, Currency, ExpenseId, Role, UserId};
//!
//! let collective = Collective::new(CollectiveId(2), CollectiveKind::Collective, Currency::Usd)
//!     .with_host(CollectiveId(1));
//! let expense = Expense::new(
//!     ExpenseId(3),
//!     CollectiveId(2),
//!     CollectiveId(40),
//!     UserId(4),
//!     Amount::new(500, Currency::Usd),
//! )
//! .with_status(ExpenseStatus::Approved);
//! let view = ExpenseView::new(&expense, &collective, None);
//! let store = ContextPermissionStore::new();
//!
//! let host_admin = Requester::user(UserId(8), CollectiveId(80)).with_role(CollectiveId(1), Role::Admin);
//! assert!(can_pay_expense(&RequestContext::new(&host_admin, &store), &view));
//!
//! let collective_admin = Requester::user(UserId(9), CollectiveId(90)).with_role(CollectiveId(2), Role::Admin);
//! let err = assert_can_pay_expense(&RequestContext::new(&collective_admin, &store), &view).unwrap_err();
//! assert!(matches!(err, PermissionError::MinimalConditionNotMet { .. }));
//! ```

use super::roles::{
    is_admin_or_accountant, is_collective_accountant, is_collective_admin, is_draft_payee,
    is_host_accountant, is_host_admin, is_owner, is_paying_admin,
};
use super::{author_policy, RequestContext};
use crate::model::{ExpenseKind, ExpenseStatus, ExpenseView};
use hostkit_auth::{enforce_scope, FeatureLimits, PermissionError, PermissionType};
use hostkit_types::OAuthScope;
use std::str::FromStr;

/// Every action an expense predicate can decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseAction {
    Edit,
    EditTags,
    Delete,
    Pay,
    Approve,
    Reject,
    Unapprove,
    MarkAsUnpaid,
    UnschedulePayment,
    VerifyDraft,
    Comment,
    AttachReceipts,
    MarkAsSpam,
    SeeAttachments,
    SeeInvoiceInfo,
    SeePayeeLocation,
    SeePayoutMethod,
    SeeDraftPrivateDetails,
}

impl ExpenseAction {
    pub const ALL: [Self; 18] = [
        Self::Edit,
        Self::EditTags,
        Self::Delete,
        Self::Pay,
        Self::Approve,
        Self::Reject,
        Self::Unapprove,
        Self::MarkAsUnpaid,
        Self::UnschedulePayment,
        Self::VerifyDraft,
        Self::Comment,
        Self::AttachReceipts,
        Self::MarkAsSpam,
        Self::SeeAttachments,
        Self::SeeInvoiceInfo,
        Self::SeePayeeLocation,
        Self::SeePayoutMethod,
        Self::SeeDraftPrivateDetails,
    ];

    /// Returns the kebab-case name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::EditTags => "edit-tags",
            Self::Delete => "delete",
            Self::Pay => "pay",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Unapprove => "unapprove",
            Self::MarkAsUnpaid => "mark-as-unpaid",
            Self::UnschedulePayment => "unschedule-payment",
            Self::VerifyDraft => "verify-draft",
            Self::Comment => "comment",
            Self::AttachReceipts => "attach-receipts",
            Self::MarkAsSpam => "mark-as-spam",
            Self::SeeAttachments => "see-attachments",
            Self::SeeInvoiceInfo => "see-invoice-info",
            Self::SeePayeeLocation => "see-payee-location",
            Self::SeePayoutMethod => "see-payout-method",
            Self::SeeDraftPrivateDetails => "see-draft-private-details",
        }
    }

    /// Returns the phrase used in user-facing error messages.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Edit => "edit this expense",
            Self::EditTags => "edit tags of this expense",
            Self::Delete => "delete this expense",
            Self::Pay => "pay this expense",
            Self::Approve => "approve this expense",
            Self::Reject => "reject this expense",
            Self::Unapprove => "unapprove this expense",
            Self::MarkAsUnpaid => "mark this expense as unpaid",
            Self::UnschedulePayment => "unschedule the payment of this expense",
            Self::VerifyDraft => "verify this draft expense",
            Self::Comment => "comment on this expense",
            Self::AttachReceipts => "attach receipts to this expense",
            Self::MarkAsSpam => "mark this expense as spam",
            Self::SeeAttachments => "see the attachments of this expense",
            Self::SeeInvoiceInfo => "see the invoice information of this expense",
            Self::SeePayeeLocation => "see the payee location of this expense",
            Self::SeePayoutMethod => "see the payout method of this expense",
            Self::SeeDraftPrivateDetails => "see the private details of this draft",
        }
    }

    /// Returns `true` for read-only visibility checks.
    #[must_use]
    pub fn is_visibility(self) -> bool {
        matches!(
            self,
            Self::SeeAttachments
                | Self::SeeInvoiceInfo
                | Self::SeePayeeLocation
                | Self::SeePayoutMethod
                | Self::SeeDraftPrivateDetails
        )
    }

    /// OAuth scope a token must carry.
    fn required_scope(self) -> Option<OAuthScope> {
        (!self.is_visibility()).then_some(OAuthScope::Expenses)
    }

    /// Feature the requester's account must not be limited on.
    fn required_feature(self) -> Option<FeatureLimits> {
        match self {
            Self::Comment => Some(FeatureLimits::COMMENTS),
            action if action.is_visibility() => None,
            _ => Some(FeatureLimits::USE_EXPENSES),
        }
    }

    /// Returns `true` if the action is possible for an expense in `status`.
    #[must_use]
    pub fn allows_status(self, status: ExpenseStatus, kind: ExpenseKind) -> bool {
        use ExpenseStatus as S;

        let is_charge = kind == ExpenseKind::Charge;
        match self {
            Self::Edit => match status {
                S::Pending | S::Approved | S::Error | S::Rejected | S::Draft | S::Unverified => {
                    true
                }
                S::Processing | S::Paid => is_charge,
                S::ScheduledForPayment => false,
            },
            Self::Delete => status == S::Rejected,
            Self::Pay | Self::Unapprove => matches!(status, S::Approved | S::Error),
            Self::Approve | Self::MarkAsSpam => matches!(status, S::Pending | S::Rejected),
            Self::Reject => status == S::Pending,
            Self::MarkAsUnpaid => status == S::Paid && !is_charge,
            Self::UnschedulePayment => status == S::ScheduledForPayment,
            Self::VerifyDraft => matches!(status, S::Draft | S::Unverified),
            Self::AttachReceipts => is_charge && matches!(status, S::Paid | S::Processing),
            Self::EditTags
            | Self::Comment
            | Self::SeeAttachments
            | Self::SeeInvoiceInfo
            | Self::SeePayeeLocation
            | Self::SeePayoutMethod
            | Self::SeeDraftPrivateDetails => true,
        }
    }
}

impl std::fmt::Display for ExpenseAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExpenseAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| format!("unknown expense action '{s}'"))
    }
}

/// Decides `action` for the requester in `ctx` on `view`.
///
/// # Errors
///
/// Returns the first failing step of the decision order as a
/// [`PermissionError`].
pub fn decide(
    action: ExpenseAction,
    ctx: &RequestContext<'_>,
    view: &ExpenseView<'_>,
) -> Result<(), PermissionError> {
    let requester = ctx.requester;
    let expense = view.expense;

    if has_context_grant(action, ctx, view) {
        return Ok(());
    }
    if !requester.is_authenticated() {
        return Err(PermissionError::Unauthenticated);
    }
    if let Some(scope) = action.required_scope() {
        enforce_scope(requester, scope)?;
    }
    if action == ExpenseAction::Edit
        && expense.status == ExpenseStatus::Draft
        && is_draft_payee(requester, expense)
    {
        return Ok(());
    }
    if !action.allows_status(expense.status, expense.kind) {
        return Err(PermissionError::UnsupportedStatus {
            action: action.description(),
            status: expense.status.as_str(),
        });
    }
    if let Some(feature) = action.required_feature() {
        if !requester.can_use_feature(feature) || is_collective_frozen(view) {
            return Err(PermissionError::UnsupportedUserFeature {
                action: action.description(),
            });
        }
    }
    if !meets_minimal_condition(action, ctx, view) {
        return Err(PermissionError::MinimalConditionNotMet {
            action: action.description(),
        });
    }
    if action == ExpenseAction::Approve {
        author_policy::check(requester, view)?;
    }
    Ok(())
}

/// The host's minimum-admins policy freezes the expense's collective.
fn is_collective_frozen(view: &ExpenseView<'_>) -> bool {
    view.host
        .is_some_and(|host| view.collective.is_frozen_by_minimum_admins(host))
}

/// Grants recorded earlier in the call that bypass every other check.
fn has_context_grant(
    action: ExpenseAction,
    ctx: &RequestContext<'_>,
    view: &ExpenseView<'_>,
) -> bool {
    let expense = view.expense;
    match action {
        ExpenseAction::SeeAttachments => ctx
            .permissions
            .check(PermissionType::SeeExpenseAttachmentsUrl, expense.id),
        ExpenseAction::SeePayeeLocation => ctx
            .permissions
            .check(PermissionType::SeeAccountLocation, expense.from_collective_id),
        ExpenseAction::SeeDraftPrivateDetails => ctx
            .permissions
            .check(PermissionType::SeeExpenseDraftPrivateDetails, expense.id),
        _ => false,
    }
}

fn meets_minimal_condition(
    action: ExpenseAction,
    ctx: &RequestContext<'_>,
    view: &ExpenseView<'_>,
) -> bool {
    let requester = ctx.requester;
    let expense = view.expense;
    let owner = is_owner(requester, expense);
    let admin = is_collective_admin(requester, view) || is_host_admin(requester, view);

    match action {
        ExpenseAction::Edit | ExpenseAction::Delete => admin || owner,
        ExpenseAction::EditTags => admin || (owner && expense.status != ExpenseStatus::Paid),
        ExpenseAction::Pay | ExpenseAction::MarkAsUnpaid | ExpenseAction::UnschedulePayment => {
            is_paying_admin(requester, view)
        }
        ExpenseAction::Approve | ExpenseAction::Reject | ExpenseAction::Unapprove => admin,
        ExpenseAction::VerifyDraft => admin || (owner && expense.kind != ExpenseKind::Charge),
        ExpenseAction::AttachReceipts => is_collective_admin(requester, view) || owner,
        ExpenseAction::MarkAsSpam => admin && !owner,
        ExpenseAction::Comment
        | ExpenseAction::SeeAttachments
        | ExpenseAction::SeeInvoiceInfo
        | ExpenseAction::SeePayeeLocation
        | ExpenseAction::SeeDraftPrivateDetails => {
            owner || is_admin_or_accountant(requester, view)
        }
        ExpenseAction::SeePayoutMethod => {
            owner
                || admin
                || is_host_accountant(requester, view)
                || (view.collective.is_self_hosted() && is_collective_accountant(requester, view))
        }
    }
}

/// Runs [`decide`] and writes the audit log entry.
fn evaluate(
    action: ExpenseAction,
    ctx: &RequestContext<'_>,
    view: &ExpenseView<'_>,
) -> Result<(), PermissionError> {
    let result = decide(action, ctx, view);
    match &result {
        Ok(()) => tracing::debug!(
            requester = %ctx.requester,
            action = action.name(),
            expense = %view.expense.id,
            "expense action allowed"
        ),
        Err(err) if action.is_visibility() => tracing::debug!(
            requester = %ctx.requester,
            action = action.name(),
            expense = %view.expense.id,
            reason = %err,
            "expense visibility denied"
        ),
        Err(err) => tracing::warn!(
            requester = %ctx.requester,
            action = action.name(),
            expense = %view.expense.id,
            reason = %err,
            "expense action denied"
        ),
    }
    result
}

/// Returns `true` if [`decide`] allows `action`.
#[must_use]
pub fn can(action: ExpenseAction, ctx: &RequestContext<'_>, view: &ExpenseView<'_>) -> bool {
    evaluate(action, ctx, view).is_ok()
}

/// Fail-fast form of [`can`].
///
/// # Errors
///
/// Returns the [`PermissionError`] produced by [`decide`].
pub fn assert_can(
    action: ExpenseAction,
    ctx: &RequestContext<'_>,
    view: &ExpenseView<'_>,
) -> Result<(), PermissionError> {
    evaluate(action, ctx, view)
}

macro_rules! expense_predicates {
    ($($action:ident => $can:ident, $assert:ident;)*) => {
        $(
            #[doc = concat!("Returns `true` if the requester may perform [`ExpenseAction::", stringify!($action), "`].")]
            #[must_use]
            pub fn $can(ctx: &RequestContext<'_>, view: &ExpenseView<'_>) -> bool {
                can(ExpenseAction::$action, ctx, view)
            }

            #[doc = concat!("Fail-fast form of [`", stringify!($can), "`].")]
            ///
            /// # Errors
            ///
            /// Returns the reason the action is denied.
            pub fn $assert(ctx: &RequestContext<'_>, view: &ExpenseView<'_>) -> Result<(), PermissionError> {
                assert_can(ExpenseAction::$action, ctx, view)
            }
        )*
    };
}

expense_predicates! {
    Edit => can_edit_expense, assert_can_edit_expense;
    EditTags => can_edit_expense_tags, assert_can_edit_expense_tags;
    Delete => can_delete_expense, assert_can_delete_expense;
    Pay => can_pay_expense, assert_can_pay_expense;
    Approve => can_approve_expense, assert_can_approve_expense;
    Reject => can_reject_expense, assert_can_reject_expense;
    Unapprove => can_unapprove_expense, assert_can_unapprove_expense;
    MarkAsUnpaid => can_mark_expense_as_unpaid, assert_can_mark_expense_as_unpaid;
    UnschedulePayment => can_unschedule_expense_payment, assert_can_unschedule_expense_payment;
    VerifyDraft => can_verify_draft_expense, assert_can_verify_draft_expense;
    Comment => can_comment_on_expense, assert_can_comment_on_expense;
    AttachReceipts => can_attach_receipts, assert_can_attach_receipts;
    MarkAsSpam => can_mark_expense_as_spam, assert_can_mark_expense_as_spam;
    SeeAttachments => can_see_expense_attachments, assert_can_see_expense_attachments;
    SeeInvoiceInfo => can_see_expense_invoice_info, assert_can_see_expense_invoice_info;
    SeePayeeLocation => can_see_expense_payee_location, assert_can_see_expense_payee_location;
    SeePayoutMethod => can_see_expense_payout_method, assert_can_see_expense_payout_method;
    SeeDraftPrivateDetails => can_see_expense_draft_private_details, assert_can_see_expense_draft_private_details;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_parse_back() {
        for action in ExpenseAction::ALL {
            assert_eq!(action.name().parse::<ExpenseAction>(), Ok(action));
        }
        assert!("teleport".parse::<ExpenseAction>().is_err());
    }

    #[test]
    fn edit_status_table() {
        use ExpenseStatus as S;

        for status in ExpenseStatus::ALL {
            let expected = !matches!(status, S::Processing | S::Paid | S::ScheduledForPayment);
            assert_eq!(
                ExpenseAction::Edit.allows_status(status, ExpenseKind::Invoice),
                expected,
                "{status}"
            );
        }
        assert!(ExpenseAction::Edit.allows_status(S::Paid, ExpenseKind::Charge));
        assert!(ExpenseAction::Edit.allows_status(S::Processing, ExpenseKind::Charge));
        assert!(!ExpenseAction::Edit.allows_status(S::ScheduledForPayment, ExpenseKind::Charge));
    }

    #[test]
    fn mark_as_unpaid_never_for_charges() {
        assert!(ExpenseAction::MarkAsUnpaid.allows_status(ExpenseStatus::Paid, ExpenseKind::Receipt));
        assert!(!ExpenseAction::MarkAsUnpaid.allows_status(ExpenseStatus::Paid, ExpenseKind::Charge));
    }

    #[test]
    fn attach_receipts_only_for_settled_charges() {
        assert!(ExpenseAction::AttachReceipts.allows_status(ExpenseStatus::Paid, ExpenseKind::Charge));
        assert!(!ExpenseAction::AttachReceipts.allows_status(ExpenseStatus::Paid, ExpenseKind::Invoice));
        assert!(!ExpenseAction::AttachReceipts.allows_status(ExpenseStatus::Pending, ExpenseKind::Charge));
    }

    #[test]
    fn visibility_actions_need_no_scope() {
        for action in ExpenseAction::ALL {
            assert_eq!(action.required_scope().is_none(), action.is_visibility(), "{action}");
        }
    }

    #[test]
    fn comment_is_gated_by_comments_feature() {
        assert_eq!(
            ExpenseAction::Comment.required_feature(),
            Some(FeatureLimits::COMMENTS)
        );
        assert_eq!(
            ExpenseAction::Approve.required_feature(),
            Some(FeatureLimits::USE_EXPENSES)
        );
        assert_eq!(ExpenseAction::SeeAttachments.required_feature(), None);
    }
}
