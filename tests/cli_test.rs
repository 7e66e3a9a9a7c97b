use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn paylink() -> Command {
    let mut cmd = Command::new(cargo_bin!("paylink"));
    cmd.env("RUST_LOG", "warn").env_remove("PAYLINK_DB_PATH");
    cmd
}

#[test]
fn test_demo_list_is_most_recent_first() {
    let output = paylink().args(["--demo", "list"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "id,name,amount,status,due_date,created_at,overdue");
    assert!(lines[1].starts_with("3,Malee Sangsuk,75000,pending,"));
    assert!(lines[2].starts_with("2,Wichan Ruamruay,25000,paid,"));
    assert!(lines[3].starts_with("1,Somchai Jaidee,50000,pending,"));
    assert!(lines[1..].iter().all(|line| line.ends_with(",false")));
}

#[test]
fn test_empty_list_prints_header_only() {
    paylink()
        .arg("list")
        .assert()
        .success()
        .stdout("id,name,amount,status,due_date,created_at,overdue\n");
}

#[test]
fn test_pay_demo_request() {
    paylink()
        .args(["--demo", "pay", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payment request #1"))
        .stdout(predicate::str::contains("Status:   paid"))
        .stdout(predicate::str::contains("Code:     PAY:1:50000:Somchai Jaidee"));
}

#[test]
fn test_pay_twice_is_not_an_error() {
    // Already paid in the demo data.
    paylink()
        .args(["--demo", "pay", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status:   paid"));
}

#[test]
fn test_show_unknown_request_fails() {
    paylink()
        .args(["--demo", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Payment request 99 not found"));
}

#[test]
fn test_pay_unknown_request_fails() {
    paylink()
        .args(["pay", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Payment request 5 not found"));
}

#[test]
fn test_create_request() {
    paylink()
        .args([
            "create",
            "--name",
            "  Somchai  ",
            "--amount",
            "100",
            "--due-in-minutes",
            "60",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payment request #1"))
        .stdout(predicate::str::contains("Status:   pending"))
        .stdout(predicate::str::contains("PAY:1:100:Somchai"))
        .stdout(predicate::str::contains("Link:     http://localhost:5173/pay/1"));
}

#[test]
fn test_create_defaults_due_date_to_end_of_window() {
    paylink()
        .args(["--demo", "create", "--name", "Niran", "--amount", "1500.25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payment request #4"))
        .stdout(predicate::str::contains("Amount:   ฿1,500.25"));
}

#[test]
fn test_create_invalid_request_fails() {
    paylink()
        .args([
            "create",
            "--name",
            " ",
            "--amount",
            "0",
            "--due-in-minutes",
            "1500",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_show_json_with_custom_base_url() {
    let output = paylink()
        .args([
            "--demo",
            "--format",
            "json",
            "--base-url",
            "https://pay.example.com/",
            "show",
            "3",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["name"], "Malee Sangsuk");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["display_status"], "pending");
    assert_eq!(json["overdue"], false);
    assert_eq!(json["payment_code"], "PAY:3:75000:Malee Sangsuk");
    assert_eq!(json["payment_link"], "https://pay.example.com/pay/3");
}

#[test]
fn test_list_json() {
    let output = paylink()
        .args(["--demo", "--format", "json", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<u64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, [3, 2, 1]);
}

#[test]
fn test_demo_summary() {
    paylink()
        .args(["--demo", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total requests: 3"))
        .stdout(predicate::str::contains("Pending:        2"))
        .stdout(predicate::str::contains("Paid:           1"))
        .stdout(predicate::str::contains("Total amount:   ฿150,000"));
}

#[test]
fn test_create_with_unrepresentable_offset_is_rejected() {
    paylink()
        .args([
            "create",
            "--name",
            "a",
            "--amount",
            "1",
            "--due-in-minutes",
            "9223372036854775807",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid input"))
        .stderr(predicate::str::contains("due date must be within 24 hours from now"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_create_with_unrepresentable_negative_offset_is_rejected() {
    paylink()
        .args([
            "create",
            "--name",
            "a",
            "--amount",
            "1",
            "--due-in-minutes",
            "-9223372036854775807",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("due date must be in the future"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_create_invalid_json_lists_fields() {
    let output = paylink()
        .args([
            "--format",
            "json",
            "create",
            "--name",
            " ",
            "--amount",
            "0",
            "--due-in-minutes",
            "1500",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["name", "amount", "due_date"]);
}

#[test]
fn test_create_accepts_exponent_amount() {
    paylink()
        .args([
            "create",
            "--name",
            "Niran",
            "--amount",
            "1.5e3",
            "--due-in-minutes",
            "30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount:   ฿1,500"));
}
