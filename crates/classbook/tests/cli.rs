#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Every run gets its own config dir so the user's settings never leak in.
fn classbook(config: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("classbook").unwrap();
    cmd.arg("--config-dir")
        .arg(config.path())
        .arg("--no-latency")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn lists_the_demo_roster() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["students", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Emma Johnson"))
        .stdout(predicate::str::contains("Ethan Brown"))
        .stdout(predicate::str::contains("100.0%"));
}

#[test]
fn filters_by_grade_level() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["students", "list", "--grade", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Olivia Chen"))
        .stdout(predicate::str::contains("Emma Johnson").not());
}

#[test]
fn unknown_ids_keep_the_typed_text() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["students", "show", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Student with Id abc not found"));

    classbook(&config)
        .args(["assignments", "delete", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Assignment with Id 42 not found"));
}

#[test]
fn adding_a_student_reports_the_new_id() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args([
            "students", "add", "Zoe", "Park", "--grade", "9", "--email", "zoe@school.edu",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student added (7): Zoe Park"));
}

#[test]
fn invalid_student_lists_every_failing_field() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["students", "add", " ", "Park", "--grade", "9", "--email", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("First name is required"))
        .stderr(predicate::str::contains("Email is invalid"));
}

#[test]
fn grade_matrix_counts_graded_rows() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["grades", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter 3 Reading Questions"))
        .stdout(predicate::str::contains("3 of 6 graded"));
}

#[test]
fn out_of_range_score_is_saved_with_a_warning() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["grades", "set", "1", "4", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score 25 is outside 0..20 points"))
        .stdout(predicate::str::contains("Graded Noah Williams on Chapter 3 Reading Questions"));
}

#[test]
fn attendance_week_sums_the_grid() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["attendance", "week", "2024-03-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 present of 10 marked, rate 60.0%"));
}

#[test]
fn marking_attendance_names_the_student() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["attendance", "mark", "5", "2024-03-06", "late"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ava Patel marked late on 2024-03-06"));
}

#[test]
fn csv_report_is_plain_on_stdout() {
    let config = TempDir::new().unwrap();
    let output = classbook(&config)
        .args(["report", "--csv", "--header"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("name,grade,average_grade,attendance_rate,assignments")
    );
    assert_eq!(lines.next(), Some("Emma Johnson,10,32.0,100.0,2"));
    assert_eq!(stdout.lines().count(), 7);
}

#[test]
fn calendar_rejects_month_thirteen() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["calendar", "2024", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit 2 Test"));

    classbook(&config)
        .args(["calendar", "2024", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Month must be between 1 and 12"));
}

#[test]
fn config_set_persists_between_runs() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["config", "upcoming_limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upcoming_limit = 2"));
    assert!(config.path().join("config.json").exists());

    classbook(&config)
        .args(["config", "upcoming_limit"])
        .assert()
        .success()
        .stdout("2\n");

    classbook(&config)
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key: colour"));
}

#[test]
fn seed_flag_replaces_the_demo_class() {
    let config = TempDir::new().unwrap();
    let seed = config.path().join("class.json");
    fs::write(
        &seed,
        r#"{"students": [{"Id": 1, "firstName": "Ada", "lastName": "Lovelace", "grade": "12",
            "email": "ada@school.edu", "enrollmentDate": "2024-01-08T00:00:00Z"}]}"#,
    )
    .unwrap();

    classbook(&config)
        .arg("--seed")
        .arg(&seed)
        .args(["students", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"))
        .stdout(predicate::str::contains("Emma").not());
}

#[test]
fn each_run_starts_from_the_seed() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .args(["students", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student removed"));

    classbook(&config)
        .args(["students", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Emma Johnson"));
}

#[test]
fn dashboard_flags_past_due_work() {
    let config = TempDir::new().unwrap();
    classbook(&config)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 students"))
        .stdout(predicate::str::contains("Science Fair Project"))
        .stdout(predicate::str::contains("6 assignment(s) past due"));
}
