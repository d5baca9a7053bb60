use std::process::Command;

#[test]
fn test_help_lists_run_modes() {
    let bin = env!("CARGO_BIN_EXE_lunabuild");

    let output = Command::new(bin).arg("--help").output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["build", "watch", "declarations"] {
        assert!(
            stdout.contains(subcommand),
            "help output should list '{}'; got:\n{}",
            subcommand,
            stdout
        );
    }
}

#[test]
fn test_build_without_manifest_is_fatal() {
    let bin = env!("CARGO_BIN_EXE_lunabuild");
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(bin)
        .arg("build")
        .arg("--project")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("manifest not found"),
        "expected manifest error; got:\n{}",
        stderr
    );
}
