use assert_cmd::Command;
use predicates::prelude::*;

fn tempora() -> Command {
    Command::cargo_bin("tempora").unwrap()
}

// ── diff ────────────────────────────────────────────────────────────────────

#[test]
fn test_diff_traditional() {
    tempora()
        .args(["diff", "2022-12-25", "2023-02-10"])
        .assert()
        .success()
        .stdout("1m 2d 2w\n");
}

#[test]
fn test_diff_reverse_is_negative() {
    tempora()
        .args(["diff", "2023-06-20", "2023-01-15"])
        .assert()
        .success()
        .stdout("-5m 5d\n");
}

#[test]
fn test_diff_absolute_drops_sign() {
    tempora()
        .args(["diff", "2023-06-20", "2023-01-15", "--absolute"])
        .assert()
        .success()
        .stdout("5m 5d\n");
}

#[test]
fn test_diff_relative_with_locale() {
    tempora()
        .args(["diff", "2023-01-15", "2023-06-20", "--format", "relative"])
        .assert()
        .success()
        .stdout("in 5 months\n");

    tempora()
        .args(["--locale", "ja", "diff", "2023-01-15", "2023-06-20", "--format", "relative"])
        .assert()
        .success()
        .stdout("5ヶ月後\n");
}

#[test]
fn test_diff_json() {
    let output = tempora()
        .args(["diff", "2024-02-28", "2024-03-01", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["days"], 2);
    assert_eq!(json["months"], 0);
    assert_eq!(json["inverted"], false);
}

#[test]
fn test_diff_rejects_bad_date() {
    tempora()
        .args(["diff", "yesterday-ish", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("yesterday-ish"));
}

// ── period ──────────────────────────────────────────────────────────────────

#[test]
fn test_period_every_other_day() {
    let output = tempora()
        .args(["period", "2024-01-01", "--end", "2024-01-31", "--step", "2 days"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 16);
    assert!(lines[0].starts_with("2024-01-01"));
    assert!(lines[1].starts_with("2024-01-03"));
}

#[test]
fn test_period_weekday_filter() {
    tempora()
        .args(["period", "2024-01-01", "--end", "2024-01-07", "--filter", "isWeekday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-05"))
        .stdout(predicate::str::contains("2024-01-06").not())
        .stdout(predicate::str::contains("2024-01-07").not());
}

#[test]
fn test_period_recurrences_reverse_json() {
    let output = tempora()
        .args(["period", "2024-01-01", "--recurrences", "3", "--step", "1 month", "--reverse", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.len(), 3);
    assert!(json[0].starts_with("2024-03-01"));
    assert!(json[2].starts_with("2024-01-01"));
}

#[test]
fn test_period_timezone_option() {
    tempora()
        .args(["--tz", "Asia/Tokyo", "period", "2024-01-01", "--recurrences", "1"])
        .assert()
        .success()
        .stdout("2024-01-01T00:00:00+09:00\n");
}

#[test]
fn test_period_unknown_filter_fails() {
    tempora()
        .args(["period", "2024-01-01", "--end", "2024-01-05", "--filter", "nonExistentMethod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist on Moment"));
}

#[test]
fn test_period_invalid_step_fails() {
    tempora()
        .args(["period", "2024-01-01", "--step", "1 fortnight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid interval unit"));
}
