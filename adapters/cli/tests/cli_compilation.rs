use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "galactic-defender"])
        .status()
        .expect("failed to invoke cargo check for galactic-defender CLI binary");

    assert!(
        status.success(),
        "cargo check --bin galactic-defender should succeed"
    );
}

#[test]
fn headless_run_reports_a_summary() {
    let output = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args([
            "run",
            "--quiet",
            "--bin",
            "galactic-defender",
            "--",
            "--seed",
            "7",
            "--class",
            "engineer",
            "--ticks",
            "600",
        ])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run the galactic-defender CLI binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("class: Engineer"), "unexpected output: {stdout}");
    assert!(stdout.contains("wave:"), "unexpected output: {stdout}");
}
