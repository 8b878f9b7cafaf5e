//! Exit-code contract of the `check` subcommand: 0 when a display override
//! is active for the run date, 1 otherwise.

use predicates::str::contains;
use std::fs;

mod common;
use common::{fm, setup_data_dir, write_json};

#[test]
fn test_check_exits_zero_when_override_active() {
    let data_dir = setup_data_dir("check_active");
    write_json(
        &data_dir.join("display_overrides.json"),
        r#"{"2026-01-22": {"image": "assets/party.png", "name": "Party Slide"}}"#,
    );
    fs::write(data_dir.join("assets/party.png"), b"png").unwrap();

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--date",
            "2026-01-22",
            "check",
        ])
        .assert()
        .code(0)
        .stdout(contains("Party Slide"));
}

#[test]
fn test_check_exits_one_on_adjacent_dates() {
    let data_dir = setup_data_dir("check_adjacent");
    write_json(
        &data_dir.join("display_overrides.json"),
        r#"{"2026-01-22": {"image": "assets/party.png", "name": "Party Slide"}}"#,
    );
    fs::write(data_dir.join("assets/party.png"), b"png").unwrap();

    for date in ["2026-01-21", "2026-01-23"] {
        fm()
            .args([
                "--data-dir",
                data_dir.to_str().unwrap(),
                "--date",
                date,
                "check",
            ])
            .assert()
            .code(1);
    }
}

#[test]
fn test_check_exits_one_without_overrides_file() {
    let data_dir = setup_data_dir("check_missing_file");

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--date",
            "2026-01-22",
            "check",
        ])
        .assert()
        .code(1);
}

#[test]
fn test_check_exits_one_when_override_image_missing() {
    let data_dir = setup_data_dir("check_no_image");
    write_json(
        &data_dir.join("display_overrides.json"),
        r#"{"2026-01-22": {"image": "assets/missing.png", "name": "Party Slide"}}"#,
    );

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--date",
            "2026-01-22",
            "check",
        ])
        .assert()
        .code(1);
}

#[test]
fn test_check_ignores_underscore_comment_keys() {
    let data_dir = setup_data_dir("check_comments");
    write_json(
        &data_dir.join("display_overrides.json"),
        r#"{"_comment": "dates map to slides", "2026-01-22": {"image": "assets/party.png", "name": "Party Slide"}}"#,
    );
    fs::write(data_dir.join("assets/party.png"), b"png").unwrap();

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--date",
            "2026-01-22",
            "check",
        ])
        .assert()
        .code(0);
}

#[test]
fn test_invalid_date_flag_is_an_error() {
    let data_dir = setup_data_dir("check_bad_date");

    fm()
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--date",
            "22/01/2026",
            "check",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}
