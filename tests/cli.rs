//! End-to-end tests driving the `fintrack` binary against a throwaway data directory

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG")
        .env_remove("FINTRACK_PASSWORD");
    cmd
}

fn add_income(data_dir: &TempDir, amount: &str, date: &str, taxable: bool) {
    let mut cmd = fintrack(data_dir);
    cmd.args(["income", "add", amount, "--date", date]);
    if taxable {
        cmd.arg("--taxable");
    }
    cmd.assert().success();
}

fn add_expense(data_dir: &TempDir, amount: &str, category: &str, date: &str) {
    fintrack(data_dir)
        .args([
            "expense", "add", amount, "--type", "weekly shop", "--category", category, "--date",
            date,
        ])
        .assert()
        .success();
}

#[test]
fn dashboard_shows_balance() {
    let data_dir = TempDir::new().unwrap();
    add_income(&data_dir, "100", "2024-01-15", false);
    add_expense(&data_dir, "40", "Food", "2024-01-16");

    fintrack(&data_dir)
        .args(["dashboard", "--as-of", "2024-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance:"))
        .stdout(predicate::str::contains("$60.00"))
        .stdout(predicate::str::contains("Food"));
}

#[test]
fn dashboard_json_is_parseable() {
    let data_dir = TempDir::new().unwrap();
    add_income(&data_dir, "250", "2024-02-01", false);

    let output = fintrack(&data_dir)
        .args(["dashboard", "--as-of", "2024-02-10", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_income"], serde_json::json!(25_000));
    assert_eq!(report["balance"], serde_json::json!(25_000));
}

#[test]
fn history_lists_newest_first() {
    let data_dir = TempDir::new().unwrap();
    add_income(&data_dir, "100", "2024-01-15", false);
    add_expense(&data_dir, "40", "Food", "2024-01-16");

    let output = fintrack(&data_dir)
        .args(["history", "export", "-o", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        text,
        "Date,Type,Category,Amount\n2024-01-16,expense,Food,40.00\n2024-01-15,income,cash,100.00\n"
    );
}

#[test]
fn history_filters_by_kind_and_search() {
    let data_dir = TempDir::new().unwrap();
    add_income(&data_dir, "100", "2024-01-15", false);
    add_expense(&data_dir, "40", "Food", "2024-01-16");
    add_expense(&data_dir, "12.50", "Transportation", "2024-01-17");

    fintrack(&data_dir)
        .args(["history", "export", "-o", "-", "--kind", "expense", "--search", "trans"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transportation,12.50"))
        .stdout(predicate::str::contains("Food").not())
        .stdout(predicate::str::contains("income").not());
}

#[test]
fn history_export_writes_file() {
    let data_dir = TempDir::new().unwrap();
    add_expense(&data_dir, "40", "Food", "2024-01-16");
    let out = data_dir.path().join("history.csv");

    fintrack(&data_dir)
        .args(["history", "export", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transaction(s)"));

    let contents = std::fs::read_to_string(&out).unwrap();
    assert!(contents.starts_with("Date,Type,Category,Amount\n"));
}

#[test]
fn budget_over_limit() {
    let data_dir = TempDir::new().unwrap();
    add_expense(&data_dir, "40", "Food", "2024-01-16");

    fintrack(&data_dir)
        .args(["budget", "set", "Food", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("133.3%"))
        .stdout(predicate::str::contains("Over budget by $10.00"));

    fintrack(&data_dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Over by $10.00"));
}

#[test]
fn budget_category_is_case_insensitive() {
    let data_dir = TempDir::new().unwrap();
    add_expense(&data_dir, "40", "Food", "2024-01-16");

    fintrack(&data_dir)
        .args(["budget", "set", "food", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget for Food set to $30.00 ($40.00 spent"));

    fintrack(&data_dir)
        .args(["budget", "set", "Food", "50"])
        .assert()
        .success();

    fintrack(&data_dir)
        .args(["export", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budgets:        1"));
}

#[test]
fn budget_set_twice_keeps_one_budget() {
    let data_dir = TempDir::new().unwrap();

    for limit in ["30", "50"] {
        fintrack(&data_dir)
            .args(["budget", "set", "Food", limit])
            .assert()
            .success();
    }

    fintrack(&data_dir)
        .args(["export", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budgets:        1"));
}

#[test]
fn delete_unknown_id_is_noop() {
    let data_dir = TempDir::new().unwrap();
    add_income(&data_dir, "100", "2024-01-15", false);

    fintrack(&data_dir)
        .args(["income", "delete", "no-such-id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing deleted"));

    fintrack(&data_dir)
        .args(["income", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$100.00"));
}

#[test]
fn invalid_amount_is_rejected() {
    let data_dir = TempDir::new().unwrap();

    fintrack(&data_dir)
        .args(["income", "add", "0"])
        .assert()
        .failure();

    fintrack(&data_dir)
        .args(["expense", "add", "abc", "--type", "lunch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn tax_on_selected_income() {
    let data_dir = TempDir::new().unwrap();
    add_income(&data_dir, "1000", "2024-01-15", true);
    add_income(&data_dir, "500", "2024-01-20", false);

    fintrack(&data_dir)
        .args(["tax", "selection", "--all", "--rate", "20", "--deductions", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected 1 income record(s)"))
        .stdout(predicate::str::contains("Tax payable:    $160.00"));
}

#[test]
fn tax_manual_and_gross_net() {
    let data_dir = TempDir::new().unwrap();

    fintrack(&data_dir)
        .args(["tax", "manual", "1000", "-r", "20", "-d", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$160.00"));

    fintrack(&data_dir)
        .args(["tax", "gross-net", "1000", "800"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Taxes deducted: $200.00"))
        .stdout(predicate::str::contains("Tax percentage: 20.00%"));

    fintrack(&data_dir)
        .args(["tax", "gross-net", "800", "1000"])
        .assert()
        .failure();
}

#[test]
fn login_whoami_logout() {
    let data_dir = TempDir::new().unwrap();

    fintrack(&data_dir)
        .args(["auth", "login", "me@example.com", "--password", "secret123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as John Doe"));

    fintrack(&data_dir)
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("me@example.com"));

    fintrack(&data_dir)
        .args(["auth", "logout"])
        .assert()
        .success();

    fintrack(&data_dir)
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn profile_update_requires_login() {
    let data_dir = TempDir::new().unwrap();

    fintrack(&data_dir)
        .args(["profile", "update", "--name", "Jane"])
        .assert()
        .failure();
}

#[test]
fn full_export_json() {
    let data_dir = TempDir::new().unwrap();
    add_income(&data_dir, "100", "2024-01-15", false);
    add_expense(&data_dir, "40", "Food", "2024-01-16");
    let out = data_dir.path().join("full.json");

    fintrack(&data_dir)
        .args(["export", "all", "--pretty"])
        .arg(&out)
        .assert()
        .success();

    let export: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(export["incomes"].as_array().unwrap().len(), 1);
    assert_eq!(export["expenses"].as_array().unwrap().len(), 1);
    assert_eq!(export["metadata"]["earliest_transaction"], "2024-01-15");
}

#[test]
fn mutations_are_audited() {
    let data_dir = TempDir::new().unwrap();
    add_income(&data_dir, "100", "2024-01-15", false);

    fintrack(&data_dir)
        .args(["audit", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"));
}
