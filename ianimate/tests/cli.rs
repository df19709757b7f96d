use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn help_lists_all_modes() {
    let mut cmd = Command::cargo_bin("ianimate").expect("binary exists");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("forecast")
                .and(predicate::str::contains("range"))
                .and(predicate::str::contains("list"))
                .and(predicate::str::contains("standard")),
        );
}

#[test]
fn range_mode_requires_start_and_end() {
    let mut cmd = Command::cargo_bin("ianimate").expect("binary exists");
    cmd.arg("range").arg("--start").arg("2024-01-01-00:00");
    cmd.assert().failure();
}

#[test]
fn malformed_start_time_aborts_before_any_work() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("ianimate").expect("binary exists");
    cmd.arg("range")
        .arg("--start")
        .arg("garbage")
        .arg("--end")
        .arg("2024-01-02-00:00")
        .arg("--search-dir")
        .arg(dir.path())
        .arg("--out-dir")
        .arg(dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid start time"));
}

#[test]
fn edge_star_pattern_is_a_configuration_error() {
    let mut cmd = Command::cargo_bin("ianimate").expect("binary exists");
    cmd.arg("standard").arg("--pattern").arg("ips*");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("within the pattern"));
}

/// Full pipeline run with the encoder swapped for `cp` through the
/// command-file template: the manifest is "encoded" by copying it to
/// the output path, so no ffmpeg install is needed.
#[test]
fn standard_mode_runs_the_pipeline_end_to_end() {
    let frames = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(frames.path().join("a_20240101-0300UT.png"), b"x").unwrap();
    fs::write(frames.path().join("b_20240101-0900UT.png"), b"x").unwrap();

    let command_file = out.path().join("copy.command");
    fs::write(&command_file, "cp, input_list, outfile").unwrap();

    let mut cmd = Command::cargo_bin("ianimate").expect("binary exists");
    // Default log_path/store_dir are `.`; run from the output dir so
    // the log lands there.
    cmd.current_dir(out.path());
    cmd.arg("standard")
        .arg("--search-dir")
        .arg(frames.path())
        .arg("--out-dir")
        .arg(out.path())
        .arg("--command-file")
        .arg(&command_file)
        .arg("--outfile")
        .arg("testrun");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SUCCESS"));

    let written = fs::read_to_string(out.path().join("testrun.mp4")).unwrap();
    let mut lines = written.lines();
    assert!(lines.next().unwrap().contains("a_20240101-0300UT.png"));
    assert!(lines.next().unwrap().contains("b_20240101-0900UT.png"));

    let log = fs::read_to_string(out.path().join("ianimate.log")).unwrap();
    assert!(log.contains("FOUND 2 MATCHED FILES"));
}
