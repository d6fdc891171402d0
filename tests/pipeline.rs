// End-to-end tests driving the real binary against temporary working
// directories. llama-swap is never present next to the test binary, so every
// run stops after config generation, which is exactly the surface under test.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kobold-swap"))
        .current_dir(dir)
        .output()
        .expect("run kobold-swap")
}

#[test]
fn first_run_creates_configs_dir_and_exits_cleanly() {
    let dir = tempfile::TempDir::new().expect("tempdir");

    let output = run_in(dir.path());

    assert!(output.status.success());
    assert!(dir.path().join("configs").is_dir());
    assert!(
        !dir.path().join("config.yaml").exists(),
        "no output file may be written before any configs exist"
    );
}

#[test]
fn empty_configs_dir_exits_cleanly_without_output() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("configs")).expect("mkdir configs");

    let output = run_in(dir.path());

    assert!(output.status.success());
    assert!(!dir.path().join("config.yaml").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No .kcpps files found"));
}

#[test]
fn generates_ordered_mapping_for_discovered_configs() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let configs = dir.path().join("configs");
    fs::create_dir(&configs).expect("mkdir configs");
    fs::write(configs.join("b.kcpps"), b"").expect("write b");
    fs::write(configs.join("a.kcpps"), b"").expect("write a");
    // Existing extraction dir keeps the koboldcpp --unpack step out of the test.
    fs::create_dir(dir.path().join("kcpp-extracted")).expect("mkdir extracted");

    let output = run_in(dir.path());
    assert!(output.status.success());

    let yaml = fs::read_to_string(dir.path().join("config.yaml")).expect("read config.yaml");
    assert!(yaml.starts_with("models:"));
    assert!(yaml.contains("koboldcpp/a:"));
    assert!(yaml.contains("koboldcpp/b:"));
    assert!(
        yaml.find("koboldcpp/a:").expect("a") < yaml.find("koboldcpp/b:").expect("b"),
        "entries must appear in discovery order"
    );
    assert!(yaml.contains("--config configs/a.kcpps"));
    assert!(yaml.contains("--config configs/b.kcpps"));
    assert!(yaml.contains("--port ${PORT}"));
    assert!(yaml.contains("checkEndpoint: /ping"));
}

#[test]
fn stale_output_is_replaced_not_merged() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let configs = dir.path().join("configs");
    fs::create_dir(&configs).expect("mkdir configs");
    fs::write(configs.join("fresh.kcpps"), b"").expect("write config");
    fs::create_dir(dir.path().join("kcpp-extracted")).expect("mkdir extracted");
    fs::write(
        dir.path().join("config.yaml"),
        "models:\n  koboldcpp/stale:\n    cmd: stale\n    checkEndpoint: /ping\n",
    )
    .expect("seed stale output");

    let output = run_in(dir.path());
    assert!(output.status.success());

    let yaml = fs::read_to_string(dir.path().join("config.yaml")).expect("read config.yaml");
    assert!(yaml.contains("koboldcpp/fresh"));
    assert!(!yaml.contains("koboldcpp/stale"));
}

#[test]
fn repeated_runs_produce_identical_output() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let configs = dir.path().join("configs");
    fs::create_dir(&configs).expect("mkdir configs");
    fs::write(configs.join("m.kcpps"), b"").expect("write config");
    fs::create_dir(dir.path().join("kcpp-extracted")).expect("mkdir extracted");

    assert!(run_in(dir.path()).status.success());
    let first = fs::read(dir.path().join("config.yaml")).expect("read");

    assert!(run_in(dir.path()).status.success());
    let second = fs::read(dir.path().join("config.yaml")).expect("read");

    assert_eq!(first, second);
}
