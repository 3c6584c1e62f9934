//! Integration tests for the Sherlock CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Group keys are passed through `SHERLOCK_GROUP_KEY` and account
//! passwords through piped stdin, so no prompt is ever shown.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const KEY: &str = "Str0ng-Key2";

/// Helper: get a Command pointing at the sherlock binary.
fn sherlock() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sherlock").expect("binary should exist");
    cmd.env_remove("SHERLOCK_ROOT").env_remove("SHERLOCK_GROUP_KEY");
    cmd
}

/// Helper: temp root with cheap Argon2 settings.
fn root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child("sherlock.toml")
        .write_str("argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n")
        .unwrap();
    tmp
}

/// Helper: command bound to `root` with `key` as the group key.
fn with_key(root: &TempDir, key: &str) -> Command {
    let mut cmd = sherlock();
    cmd.arg("--root")
        .arg(root.path())
        .env("SHERLOCK_GROUP_KEY", key);
    cmd
}

/// Helper: a root with `default` and `detective` groups set up.
fn detective_root() -> TempDir {
    let root = root();
    with_key(&root, KEY).arg("setup").assert().success();
    with_key(&root, KEY)
        .args(["add", "group", "detective"])
        .assert()
        .success();
    root
}

#[test]
fn help_flag_shows_usage() {
    sherlock()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("per-group encryption keys"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn version_flag_shows_version() {
    sherlock()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sherlock"));
}

#[test]
fn no_args_shows_help() {
    sherlock()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn commands_fail_before_setup() {
    let root = root();
    with_key(&root, KEY)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("set up first"));
}

#[test]
fn setup_twice_fails() {
    let root = root();
    with_key(&root, KEY).arg("setup").assert().success();
    with_key(&root, KEY)
        .arg("setup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn setup_rejects_weak_key() {
    let root = root();
    with_key(&root, "weak")
        .arg("setup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("insecure password"));

    with_key(&root, "weak")
        .args(["setup", "--insecure"])
        .assert()
        .success();
}

#[test]
fn add_get_delete_account() {
    let root = detective_root();

    with_key(&root, KEY)
        .args(["add", "account", "detective@bakerstreet", "--tag", "221b"])
        .write_stdin("S3cret-pipe\n")
        .assert()
        .success();

    with_key(&root, KEY)
        .args(["get", "detective@bakerstreet"])
        .assert()
        .success()
        .stdout("S3cret-pipe\n");

    with_key(&root, "WRONG")
        .args(["get", "detective@bakerstreet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong group key"));

    with_key(&root, KEY)
        .args(["delete", "account", "detective@bakerstreet", "--force"])
        .assert()
        .success();

    with_key(&root, KEY)
        .args(["get", "detective@bakerstreet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("account not found"));
}

#[test]
fn duplicate_account_is_rejected() {
    let root = detective_root();
    for expect_ok in [true, false] {
        let assert = with_key(&root, KEY)
            .args(["add", "account", "detective@yard", "--insecure"])
            .write_stdin("x\n")
            .assert();
        if expect_ok {
            assert.success();
        } else {
            assert
                .failure()
                .stderr(predicate::str::contains("already exists"));
        }
    }
}

#[test]
fn update_name_and_tag() {
    let root = detective_root();
    with_key(&root, KEY)
        .args(["add", "account", "detective@yard"])
        .write_stdin("Lestrade-01\n")
        .assert()
        .success();

    with_key(&root, KEY)
        .args(["update", "tag", "detective@yard", "met"])
        .assert()
        .success();
    with_key(&root, KEY)
        .args(["update", "name", "detective@yard", "scotland-yard"])
        .assert()
        .success();

    with_key(&root, KEY)
        .args(["list", "detective"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scotland-yard"))
        .stdout(predicate::str::contains("#met"))
        .stdout(predicate::str::contains("Lestrade-01").not());
}

#[test]
fn update_password_respects_policy() {
    let root = detective_root();
    with_key(&root, KEY)
        .args(["add", "account", "detective@yard"])
        .write_stdin("Lestrade-01\n")
        .assert()
        .success();

    with_key(&root, KEY)
        .args(["update", "password", "detective@yard"])
        .write_stdin("weak\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("insecure password"));

    with_key(&root, KEY)
        .args(["update", "password", "detective@yard", "--insecure"])
        .write_stdin("weak\n")
        .assert()
        .success();

    with_key(&root, KEY)
        .args(["get", "detective@yard"])
        .assert()
        .success()
        .stdout("weak\n");
}

#[test]
fn list_shows_registered_groups() {
    let root = detective_root();
    with_key(&root, KEY)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("default"))
        .stdout(predicate::str::contains("detective"));
}

#[test]
fn list_empty_group_says_so() {
    let root = detective_root();
    with_key(&root, KEY)
        .args(["list", "detective"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No accounts in 'detective'"));
}

#[test]
fn delete_group_removes_it() {
    let root = detective_root();
    with_key(&root, KEY)
        .args(["delete", "group", "detective", "--force"])
        .assert()
        .success();

    with_key(&root, KEY)
        .args(["list", "detective"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("group cannot be found"));
}

#[test]
fn invalid_query_rejected() {
    let root = detective_root();
    with_key(&root, KEY)
        .args(["get", "a@b@c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid query"));
}

#[test]
fn completions_for_bash() {
    sherlock()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sherlock"));
}
