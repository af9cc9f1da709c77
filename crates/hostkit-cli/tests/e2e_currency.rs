//! E2E tests for conversion, the balance check and config output.

mod common;

use common::{fixture, hostkit_cmd, hostkit_cmd_in, write_project_config};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

const EUR_USD: &str = "[fx.rates]\n\"EUR/USD\" = 1.1\n";

#[test]
fn settled_expense_uses_ledger_rate() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["convert", "--to", "USD", "--fixture"])
        .arg(fixture("eur_expense_settled.json"))
        .assert()
        .success()
        .stdout(contains("$7.14").and(contains("from Wise")))
        .stdout(contains("approximate").not());
}

#[test]
fn unsettled_expense_uses_configured_platform_rate() {
    let root = tempfile::tempdir().expect("tempdir");
    write_project_config(&root, EUR_USD);

    hostkit_cmd_in(&root)
        .args(["convert", "--to", "USD", "--fixture"])
        .arg(fixture("eur_expense.json"))
        .assert()
        .success()
        .stdout("$11.00 (rate 1.1 from Platform, approximate)\n");
}

#[test]
fn conversion_json_output() {
    let root = tempfile::tempdir().expect("tempdir");
    write_project_config(&root, EUR_USD);

    let output = hostkit_cmd_in(&root)
        .args(["convert", "--json", "--to", "USD", "--fixture"])
        .arg(fixture("eur_expense.json"))
        .output()
        .expect("run hostkit");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["value"], 1100);
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["exchangeRate"]["source"], "PLATFORM");
    assert_eq!(json["exchangeRate"]["isApproximate"], true);
}

#[test]
fn same_currency_has_no_rate() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["convert", "--to", "EUR", "--fixture"])
        .arg(fixture("eur_expense.json"))
        .assert()
        .success()
        .stdout("€10.00\n");
}

#[test]
fn missing_rate_is_an_error() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["convert", "--to", "USD", "--fixture"])
        .arg(fixture("eur_expense.json"))
        .assert()
        .code(2)
        .stderr(contains("no exchange rate available from EUR to USD"));
}

#[test]
fn malformed_rate_key_is_a_config_error() {
    let root = tempfile::tempdir().expect("tempdir");
    write_project_config(&root, "[fx.rates]\n\"EURUSD\" = 1.1\n");

    hostkit_cmd_in(&root)
        .args(["convert", "--to", "USD", "--fixture"])
        .arg(fixture("eur_expense.json"))
        .assert()
        .code(2)
        .stderr(contains("EURUSD"));
}

#[test]
fn balance_one_cent_short() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["balance", "--fixture"])
        .arg(fixture("balance_short.json"))
        .assert()
        .code(1)
        .stdout(
            "denied [INSUFFICIENT_BALANCE]: Collective does not have enough funds to pay this expense. \
             Current balance: $1,000.00, Expense amount: $1,000.01\n",
        );
}

#[test]
fn balance_needs_a_host() {
    let (mut cmd, _guard) = hostkit_cmd();
    cmd.args(["balance", "--fixture"])
        .arg(fixture("eur_expense.json"))
        .assert()
        .code(2)
        .stderr(contains("needs a host"));
}

#[test]
fn config_prints_merged_values() {
    let root = tempfile::tempdir().expect("tempdir");
    write_project_config(&root, "[balance]\nfx_volatility_window_days = 9\n");

    hostkit_cmd_in(&root)
        .env("HOSTKIT_REFUND_WINDOW_DAYS", "45")
        .arg("config")
        .assert()
        .success()
        .stdout(contains("collective_admin_window_days = 45"))
        .stdout(contains("fx_volatility_window_days = 9"));
}

#[test]
fn broken_project_config_fails_fast() {
    let root = tempfile::tempdir().expect("tempdir");
    write_project_config(&root, "[refund\n");

    hostkit_cmd_in(&root)
        .arg("config")
        .assert()
        .code(2)
        .stderr(contains("config error"));
}
