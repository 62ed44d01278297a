use assert_cmd::Command;
use predicates::str::contains;

fn chime() -> Command {
    let mut cmd = Command::cargo_bin("chime").expect("binary");
    cmd.env_remove("CHIME_ROLE").env_remove("CHIME_CONFIG");
    cmd
}

#[test]
fn chime_help_works() {
    chime()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Countdown task board"));
}

#[test]
fn chime_version_works() {
    chime().arg("--version").assert().success();
}

#[test]
fn unknown_role_is_a_user_error() {
    chime()
        .args(["--role", "grandparent"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown role"));
}

#[test]
fn malformed_seed_spec_is_rejected() {
    chime()
        .args(["--task", "just-a-title"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("TITLE|DESCRIPTION|HH:MM"));
}

#[test]
fn zero_duration_seed_is_rejected_with_hint() {
    chime()
        .args(["--task", "Homework|Math sheet|00:00"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("hint: durations use HH:MM"));
}

#[test]
fn json_flag_wraps_errors_in_envelope() {
    chime()
        .args(["--json", "--task", "just-a-title"])
        .assert()
        .failure()
        .code(2)
        .stdout(contains("\"status\": \"error\""))
        .stdout(contains("\"kind\": \"user_error\""));
}
