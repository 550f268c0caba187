//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs the binary with an empty config dir so a user dictionary never leaks in.
fn cmd(config_home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("precis");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input_json() {
    let home = TempDir::new().unwrap();
    let output = cmd(&home)
        .arg(get_fixture_path("blog_post.html"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("stdout should be JSON");
    assert_eq!(json["title"], "Why Rust Ownership Matters | The Example Blog");
    assert_eq!(json["readTime"], 1);
    assert!(json["wordCount"].as_u64().unwrap() > 0);
    assert!(json["translatedSummary"].as_str().unwrap().contains("کد"));
    assert!(!json["content"].as_str().unwrap().contains("Archive"));
}

#[test]
fn test_cli_text_format() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-f", "text", &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Why Rust Ownership Matters"))
        .stdout(predicate::str::contains("Summary\n-------"))
        .stdout(predicate::str::contains("Translation\n-----------"))
        .stdout(predicate::str::contains("Read time: 1 minute"));
}

#[test]
fn test_cli_invalid_format() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-f", "markdown", &get_fixture_path("blog_post.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_stdin_input_with_url() {
    let home = TempDir::new().unwrap();
    let html = std::fs::read_to_string(get_fixture_path("blog_post.html")).unwrap();
    cmd(&home)
        .args(["-", "--url", "https://blog.example.com/ownership"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"url\": \"https://blog.example.com/ownership\""));
}

#[test]
fn test_cli_output_file() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("summary.json");

    cmd(&home)
        .args(["-o", output.to_str().unwrap()])
        .arg(get_fixture_path("blog_post.html"))
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(json["summary"].as_str().unwrap().contains("Rust guarantees memory safety"));
}

#[test]
fn test_cli_sentence_limit() {
    let home = TempDir::new().unwrap();
    let output = cmd(&home)
        .args(["--sentences", "1", &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let summary = json["summary"].as_str().unwrap();
    assert!(summary.contains("Rust guarantees memory safety"));
    assert!(!summary.contains("single owner"));
}

#[test]
fn test_cli_custom_dictionary() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let dict = tmp.path().join("dict.json");
    std::fs::write(&dict, r#"{"rust": "RUST"}"#).unwrap();

    cmd(&home)
        .args(["--dictionary", dict.to_str().unwrap(), &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("RUST guarantees memory safety"));
}

#[test]
fn test_cli_custom_noise() {
    let home = TempDir::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let noise = tmp.path().join("noise.json");
    std::fs::write(&noise, r#"["garbage collector"]"#).unwrap();

    cmd(&home)
        .args(["--noise", noise.to_str().unwrap(), &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("garbage collector").not());
}

#[test]
#[cfg(target_os = "linux")]
fn test_cli_user_dictionary_from_config_dir() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("precis");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("dictionary.json"), r#"{"ownership": "OWNERSHIP"}"#).unwrap();

    cmd(&home)
        .args(["-f", "text", &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("tracking OWNERSHIP at compile time"));
}

#[test]
fn test_cli_empty_content_fails() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg(get_fixture_path("empty_content.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not enough readable content"));
}

#[test]
fn test_cli_short_sentences_fail() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg(get_fixture_path("short_sentences.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No summary could be produced"));
}

#[test]
fn test_cli_missing_file() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("does-not-exist.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_invalid_url() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("https://")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_cli_verbose() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .args(["-v", &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Precis"))
        .stderr(predicate::str::contains("Extracting and summarizing"));
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summarize"))
        .stdout(predicate::str::contains("--dictionary"));
}
