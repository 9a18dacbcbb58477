//! End-to-end CLI tests against the bundled snapshot fixture
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;

fn fixture() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/farm.json")
}

#[test]
fn test_workers_listing() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("workers")
        .assert()
        .success()
        .stdout(predicate::str::contains("bld-linux64-ec2-001"))
        .stdout(predicate::str::contains("t-w732-ix-035"));
}

#[test]
fn test_builders_listing_includes_category() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("builders")
        .assert()
        .success()
        .stdout(predicate::str::contains("winxp-opt\twindows"));
}

#[test]
fn test_builds_selection_by_pattern_is_case_insensitive() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("builds")
        .arg("--pattern")
        .arg("Linux*")
        .assert()
        .success()
        .stdout("1\n2\n3\n5\n");
}

#[test]
fn test_builds_selection_requires_category_or_pattern() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("builds")
        .assert()
        .failure()
        .stderr(predicate::str::contains("category or builder pattern"));
}

#[test]
fn test_worker_efficiency_table() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("worker-efficiency")
        .assert()
        .success()
        .stdout(predicate::str::contains("worker\ttotal\tused\tidle\tefficiency"))
        .stdout(predicate::str::contains("bld-linux64-ec2-001\t30\t20\t10\t66.7"))
        .stdout(predicate::str::contains("t-w732-ix-035\t50\t50\t0\t100.0"))
        // Degenerate zero-length span reports full efficiency.
        .stdout(predicate::str::contains("bld-lion-r5-045\t0\t0\t0\t100.0"));
}

#[test]
fn test_worker_efficiency_single_worker() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("worker-efficiency")
        .arg("--worker")
        .arg("t-w732-ix-035")
        .assert()
        .success()
        .stdout(predicate::str::contains("t-w732-ix-035\t50\t50\t0\t100.0"))
        .stdout(predicate::str::contains("bld-linux64").not());
}

#[test]
fn test_builder_durations_mean_ranked_by_value() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("builder-durations")
        .arg("mean")
        .arg("--category")
        .arg("linux")
        .assert()
        .success()
        // linux-opt-unittest durations are 10, 30, 0 -> mean 13.33;
        // linux64-debug has one build of 10 -> the lower value ranks first.
        .stdout("10.00\tlinux64-debug\n13.33\tlinux-opt-unittest\n");
}

#[test]
fn test_builder_durations_single_builder() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("builder-durations")
        .arg("sum")
        .arg("--builder")
        .arg("winxp-opt")
        .assert()
        .success()
        .stdout("20.00\twinxp-opt\n");
}

#[test]
fn test_builder_durations_histogram_sorted_by_name() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("builder-durations")
        .arg("histogram")
        .arg("--pattern")
        .arg("linux*")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("linux-opt-unittest\t"));
}

#[test]
fn test_builder_durations_rejects_unknown_statistic() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("builder-durations")
        .arg("p95")
        .arg("--category")
        .arg("linux")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported statistic"));
}

#[test]
fn test_build_info_prints_fields() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("build-info")
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("builder_name\tlinux-opt-unittest"))
        .stdout(predicate::str::contains("revision\t7f3a9c1d0b2e"))
        .stdout(predicate::str::contains("duration\t30"));
}

#[test]
fn test_build_info_missing_id_is_reported_not_fatal() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(fixture())
        .arg("build-info")
        .arg("999")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("No info found for id 999"))
        .stdout(predicate::str::contains("starttime\t0"));
}

#[test]
fn test_truncate_commands_run_cleanly() {
    for command in ["truncate-build-metadata", "truncate-log-metadata"] {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
        cmd.arg("--data")
            .arg(fixture())
            .arg(command)
            .assert()
            .success()
            .stdout("");
    }
}

#[test]
fn test_malformed_snapshot_is_fatal() {
    use std::io::Write as _;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"builds": 5}}"#).unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg(file.path())
        .arg("workers")
        .assert()
        .failure();
}

#[test]
fn test_missing_snapshot_is_fatal() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
    cmd.arg("--data")
        .arg("/no/such/snapshot.json")
        .arg("workers")
        .assert()
        .failure();
}

#[test]
fn test_output_is_idempotent_across_runs() {
    let run = || {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("farmstat");
        cmd.arg("--data")
            .arg(fixture())
            .arg("builder-durations")
            .arg("median")
            .arg("--pattern")
            .arg("*")
            .output()
            .expect("spawn farmstat")
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}
