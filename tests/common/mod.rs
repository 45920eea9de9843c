use assert_cmd::cargo_bin;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Writes a ledger fixture file, one record per line.
pub fn seed_ledger(path: &Path, lines: &[&str]) {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    std::fs::write(path, content).expect("Failed to seed ledger file");
}

/// Runs one interactive session against the given ledger file, feeding the
/// script to stdin and returning the captured output.
pub fn run_session(ledger: &Path, script: &str) -> Output {
    let mut child = Command::new(cargo_bin!("bankline"))
        .arg("--ledger")
        .arg(ledger)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn bankline");

    let mut stdin = child.stdin.take().expect("Failed to open stdin");
    stdin
        .write_all(script.as_bytes())
        .expect("Failed to write session script");
    drop(stdin);

    child.wait_with_output().expect("Failed to run bankline")
}

/// Pulls the freshly generated 10-digit account number out of a create
/// session's output.
pub fn extract_account_number(stdout: &str) -> String {
    const MARKER: &str = "Your account number is: ";
    let start = stdout
        .find(MARKER)
        .expect("Account number was not printed")
        + MARKER.len();
    stdout[start..start + 10].to_string()
}
