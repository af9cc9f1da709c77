//! E2E tests for the permission subcommands of the `hostkit` binary.
//!
//! Decisions go to stdout; errors and logs go to stderr.

mod common;

use common::{fixture, hostkit_cmd, hostkit_cmd_in, write_project_config};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

// ─── Expenses ──────────────────────────────────────────────────────

#[test]
fn host_admin_can_approve() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "approve", "--fixture"])
        .arg(fixture("approve_as_host_admin.json"))
        .assert()
        .success()
        .stdout("allowed\n");
}

#[test]
fn host_admin_cannot_pay_pending_expense() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "pay", "--fixture"])
        .arg(fixture("approve_as_host_admin.json"))
        .assert()
        .code(1)
        .stdout(contains("denied [UNSUPPORTED_STATUS]"));
}

#[test]
fn author_blocked_by_policy() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "approve", "--fixture"])
        .arg(fixture("approve_as_author.json"))
        .assert()
        .code(1)
        .stdout(
            "denied [AUTHOR_CANNOT_APPROVE]: Expense author cannot approve expenses over $50.00\n",
        );
}

#[test]
fn context_grant_reveals_attachments() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "see-attachments", "--fixture"])
        .arg(fixture("attachments_by_grant.json"))
        .assert()
        .success()
        .stdout("allowed\n");

    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "see-payout-method", "--fixture"])
        .arg(fixture("attachments_by_grant.json"))
        .assert()
        .code(1)
        .stdout(contains("MINIMAL_CONDITION_NOT_MET"));
}

#[test]
fn anonymous_invitee_with_grant_sees_draft_details() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "see-draft-private-details", "--fixture"])
        .arg(fixture("draft_invitee_grant.json"))
        .assert()
        .success()
        .stdout("allowed\n");

    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "edit", "--fixture"])
        .arg(fixture("draft_invitee_grant.json"))
        .assert()
        .code(1)
        .stdout(contains("denied [UNAUTHENTICATED]"));
}

#[test]
fn half_filled_requester_is_bad_input() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "approve", "--fixture"])
        .arg(fixture("half_requester.json"))
        .assert()
        .code(2)
        .stdout("")
        .stderr(contains("invalid requester").and(contains("userId and collectiveId")));
}

#[test]
fn unknown_action_is_a_usage_error() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "frobnicate", "--fixture"])
        .arg(fixture("approve_as_host_admin.json"))
        .assert()
        .code(2)
        .stderr(contains("unknown expense action 'frobnicate'"));
}

#[test]
fn missing_fixture_is_reported() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "edit", "--fixture", "does-not-exist.json"])
        .assert()
        .code(2)
        .stderr(contains("cannot read fixture"));
}

// ─── Transactions ──────────────────────────────────────────────────

#[test]
fn collective_admin_refunds_within_window() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["transaction", "refund", "--now", "2024-03-10T00:00:00Z", "--fixture"])
        .arg(fixture("refund_by_collective_admin.json"))
        .assert()
        .success()
        .stdout("allowed\n");
}

#[test]
fn collective_admin_refund_window_expires() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["transaction", "reject", "--now", "2024-04-15T00:00:00Z", "--fixture"])
        .arg(fixture("refund_by_collective_admin.json"))
        .assert()
        .code(1)
        .stdout(
            "denied [MINIMAL_CONDITION_NOT_MET]: You don't have permission to reject this transaction\n",
        );
}

#[test]
fn project_config_extends_refund_window() {
    let root = tempfile::tempdir().expect("tempdir");
    write_project_config(&root, "[refund]\ncollective_admin_window_days = 60\n");

    hostkit_cmd_in(&root)
        .args(["transaction", "refund", "--now", "2024-04-15T00:00:00Z", "--fixture"])
        .arg(fixture("refund_by_collective_admin.json"))
        .assert()
        .success();
}

#[test]
fn env_var_overrides_project_config() {
    let root = tempfile::tempdir().expect("tempdir");
    write_project_config(&root, "[refund]\ncollective_admin_window_days = 60\n");

    hostkit_cmd_in(&root)
        .env("HOSTKIT_REFUND_WINDOW_DAYS", "7")
        .args(["transaction", "refund", "--now", "2024-03-10T00:00:00Z", "--fixture"])
        .arg(fixture("refund_by_collective_admin.json"))
        .assert()
        .code(1);
}

#[test]
fn receiving_admin_cannot_download_invoice() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["transaction", "download-invoice", "--fixture"])
        .arg(fixture("refund_by_collective_admin.json"))
        .assert()
        .code(1)
        .stdout(contains("download the invoice of this transaction"));
}

// ─── Scopes and names ──────────────────────────────────────────────

#[test]
fn scope_without_token_is_allowed() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["scope", "expenses"])
        .assert()
        .success()
        .stdout("allowed\n");
}

#[test]
fn scope_missing_from_token_is_denied() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["scope", "expenses", "--token-scopes", "account,email"])
        .assert()
        .code(1)
        .stdout(
            "denied [SCOPE_FORBIDDEN]: The User Token is not allowed for operations in scope \"expenses\".\n",
        );
}

#[test]
fn names_ignore_order_and_accents() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["names", "PALAMAKUMBURA SUDHARAKA", "Sudharaka Palamakumbura"])
        .assert()
        .success()
        .stdout("match\n");

    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["names", "José Ramírez", "jose ramirez"])
        .assert()
        .success();

    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["names", "Sudharaka", "Sudharaka Palamakumbura"])
        .assert()
        .code(1)
        .stdout("no match\n");
}

// ─── Logging ───────────────────────────────────────────────────────

#[test]
fn debug_flag_logs_decisions_to_stderr() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["--debug", "expense", "approve", "--fixture"])
        .arg(fixture("approve_as_host_admin.json"))
        .assert()
        .success()
        .stdout("allowed\n")
        .stderr(contains("expense action allowed"));
}

#[test]
fn quiet_by_default() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["expense", "approve", "--fixture"])
        .arg(fixture("approve_as_host_admin.json"))
        .assert()
        .success()
        .stderr(contains("allowed").not());
}
