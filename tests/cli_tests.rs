use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let tmp = TempDir::new().expect("tmpdir");
    fs::write(
        tmp.path().join("config.json"),
        r#"{"latency": {"min_ms": 0, "max_ms": 0}}"#,
    )
    .unwrap();
    tmp
}

fn ledger(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("LEDGER_STORE_DATA_DIR", dir).env_remove("RUST_LOG");
    cmd
}

fn stored_snapshot(dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(dir.join("data").join("ledger-store-data.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn pay_bill_records_one_settling_transaction() {
    let tmp = workspace();

    ledger(tmp.path())
        .args(["bill", "pay", "b1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paid 'Electricity' ($189.90)"))
        .stdout(predicate::str::contains("Settles:     bill b1"));

    ledger(tmp.path())
        .args(["bill", "pay", "b1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already paid"));

    let snapshot = stored_snapshot(tmp.path());
    let settling: Vec<_> = snapshot["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["billId"] == "b1")
        .collect();
    assert_eq!(settling.len(), 1);
    assert_eq!(settling[0]["amount"], 18990);
    assert_eq!(settling[0]["account"], "Main");
    assert_eq!(settling[0]["kind"], "expense");

    ledger(tmp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger OK"));
}

#[test]
fn unknown_bill_fails_with_not_found() {
    let tmp = workspace();

    ledger(tmp.path())
        .args(["bill", "pay", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bill not found: missing"));
}

#[test]
fn add_and_list_transactions() {
    let tmp = workspace();

    ledger(tmp.path())
        .args([
            "txn", "add", "income", "1500", "-c", "Consulting", "-d", "2999-01-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount:      $1500.00"))
        .stdout(predicate::str::contains("Description: Consulting"));

    ledger(tmp.path())
        .args(["txn", "list", "-l", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2999-01-01"))
        .stdout(predicate::str::contains("Consulting"));
}

#[test]
fn zero_amount_is_rejected() {
    let tmp = workspace();

    ledger(tmp.path())
        .args(["txn", "add", "expense", "0", "-c", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    assert!(!tmp.path().join("data").join("ledger-store-data.json").exists());
}

#[test]
fn corrupt_data_falls_back_to_seed() {
    let tmp = workspace();
    fs::create_dir_all(tmp.path().join("data")).unwrap();
    fs::write(
        tmp.path().join("data").join("ledger-store-data.json"),
        "{ this is not json",
    )
    .unwrap();

    ledger(tmp.path())
        .args(["bill", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Electricity"))
        .stdout(predicate::str::contains("Fiber internet"));
}

#[test]
fn theme_round_trip() {
    let tmp = workspace();

    ledger(tmp.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: system"));

    ledger(tmp.path()).args(["theme", "dark"]).assert().success();

    ledger(tmp.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));

    ledger(tmp.path())
        .args(["theme", "sepia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown theme"));
}

#[test]
fn export_json_writes_full_ledger() {
    let tmp = workspace();
    let out = tmp.path().join("ledger.json");

    ledger(tmp.path())
        .args(["export", "json", "-o", out.to_str().unwrap(), "--pretty"])
        .assert()
        .success();

    let export: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(export["bills"].as_array().unwrap().len(), 3);
    assert_eq!(export["metadata"]["paid_bill_count"], 1);
}

#[test]
fn export_bills_csv_to_default_directory() {
    let tmp = workspace();

    ledger(tmp.path())
        .args(["export", "bills-csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 bills"));

    let files: Vec<_> = fs::read_dir(tmp.path().join("exports"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("bills-") && files[0].ends_with(".csv"));
}

#[test]
fn summary_and_calendar() {
    let tmp = workspace();

    ledger(tmp.path())
        .args(["summary", "--months", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger Summary as of"))
        .stdout(predicate::str::contains("Pending bills: 2 ($319.80)"));

    ledger(tmp.path())
        .arg("calendar")
        .assert()
        .success()
        .stdout(predicate::str::contains("Electricity • $189.90"));
}

#[test]
fn user_set_and_show() {
    let tmp = workspace();

    ledger(tmp.path())
        .args(["user", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No user stored."));

    ledger(tmp.path())
        .args(["user", "set", "--name", "Ada", "--email", "ada@example.com"])
        .assert()
        .success();

    ledger(tmp.path())
        .args(["user", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Email:  ada@example.com"));

    ledger(tmp.path())
        .args(["user", "set", "--name", "Ada L.", "--email", "ada"])
        .assert()
        .success();

    ledger(tmp.path())
        .args(["user", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:   Ada L."))
        .stdout(predicate::str::contains("Email:  ada\n"));
}

#[test]
fn reset_requires_force() {
    let tmp = workspace();
    ledger(tmp.path()).args(["theme", "light"]).assert().success();

    ledger(tmp.path())
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(stored_snapshot(tmp.path())["preferences"]["theme"], "light");

    ledger(tmp.path()).args(["reset", "--force"]).assert().success();

    ledger(tmp.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: system"));
}

#[test]
fn invalid_settings_are_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.json"),
        r#"{"latency": {"min_ms": 10, "max_ms": 1}}"#,
    )
    .unwrap();

    ledger(tmp.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("An unexpected error occurred"));
}
