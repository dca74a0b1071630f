#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const EMAIL: &str = "admin@sdmarketing.test";
pub const PASSWORD: &str = "s3cret-pass";

pub fn sd() -> Command {
    cargo_bin_cmd!("shiftdesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftdesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Run `init` in test mode (no config file written)
pub fn init_db(db_path: &str) {
    sd().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh database with an account signed in
pub fn init_signed_in(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db(&db_path);

    sd().args([
        "--db", &db_path, "signup", "--email", EMAIL, "--password", PASSWORD,
    ])
    .assert()
    .success();

    db_path
}

/// Run a command and return its stdout, asserting success
pub fn run_ok(db_path: &str, args: &[&str]) -> String {
    let mut full = vec!["--db", db_path];
    full.extend_from_slice(args);

    let output = sd().args(&full).output().expect("failed to run shiftdesk");
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Pull the id out of a "... created with id <ID>" / "Shift <ID> ..." message
pub fn id_after(stdout: &str, marker: &str) -> String {
    let start = stdout
        .find(marker)
        .unwrap_or_else(|| panic!("marker {:?} not found in {:?}", marker, stdout))
        + marker.len();
    stdout[start..]
        .split_whitespace()
        .next()
        .expect("id after marker")
        .trim_end_matches(',')
        .to_string()
}
