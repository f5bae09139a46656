use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const USAGE: &str = "Just run the x86v command. Use the '-h' flag to show this output.";

#[test]
fn short_help_prints_usage() {
    let mut cmd = cargo_bin_cmd!("x86v");
    cmd.arg("-h");
    cmd.assert().success().stdout(format!("{USAGE}\n"));
}

#[test]
fn long_help_prints_usage() {
    let mut cmd = cargo_bin_cmd!("x86v");
    cmd.arg("--help");
    cmd.assert().success().stdout(predicate::str::contains(USAGE));
}

#[test]
fn unknown_flag_fails() {
    let mut cmd = cargo_bin_cmd!("x86v");
    cmd.arg("--bogus");
    cmd.assert().failure().stdout(predicate::str::contains("x86-64 v").not());
}

#[test]
fn positional_argument_fails() {
    let mut cmd = cargo_bin_cmd!("x86v");
    cmd.arg("v3");
    cmd.assert().failure().stdout(predicate::str::is_empty());
}

#[test]
fn bare_run_prints_levels() {
    let mut cmd = cargo_bin_cmd!("x86v");
    cmd.env_remove("X86V_LOG");
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).expect("stdout is UTF-8");
    let line = predicate::str::is_match(r"^x86-64 v[1-4] supported \([a-z0-9_.\- ]+\)$")
        .expect("valid regex");
    for l in text.lines() {
        assert!(line.eval(l), "unexpected line: {l}");
    }
    #[cfg(target_arch = "x86_64")]
    assert!(text.starts_with("x86-64 v1 supported ("));
}

#[test]
fn debug_logging_goes_to_stderr() {
    let mut cmd = cargo_bin_cmd!("x86v");
    cmd.env("X86V_LOG", "debug");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("cpuid"));
}
