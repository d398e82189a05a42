use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const WIZARD: &str = r#"
start: job
url: https://www.linkedin.com/jobs/view/3901/
screens:
  job:
    buttons:
      - label: Easy Apply
        goto: form
    texts:
      .job-details-jobs-unified-top-card__job-title: Data Scientist
      .jobs-unified-top-card__company-name: Acme
      .jobs-description: "Requirements: 3 years of experience, team player"
  form:
    file_input: true
    buttons:
      - label: Next
        goto: review
  review:
    buttons:
      - label: Submit application
        goto: done
  done: {}
"#;

const SNAPSHOT: &str = r#"
nodes:
  - tag: li
    attributes:
      href: /jobs/view/3901/
  - tag: div
    parent: 0
  - tag: span
    text: Data Scientist
    parent: 1
selector_map:
  12: 2
"#;

struct Workspace {
    dir: tempfile::TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("config.yaml");
        let body = format!(
            "ledgers:\n  applications: {}\n  listings: {}\nresumes:\n  spanish: {}\n  english: {}\n",
            dir.path().join("applications.csv").display(),
            dir.path().join("job_listings.csv").display(),
            dir.path().join("cv_es.pdf").display(),
            dir.path().join("cv_en.pdf").display(),
        );
        fs::write(&config, body).expect("write config");
        Self { dir, config }
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn jobpilot(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jobpilot"));
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config);
        cmd
    }
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn status_on_missing_ledger_continues() {
    let ws = Workspace::new();
    let assert = ws
        .jobpilot()
        .args(["--output", "json", "status"])
        .assert()
        .success();
    let report = stdout_json(assert.get_output());
    assert_eq!(report["ledger"], "applications");
    assert_eq!(report["count"], 0);
    assert_eq!(report["target"], 5);
    assert_eq!(report["remaining"], 5);
    assert_eq!(report["decision"], "continue");
    assert!(!ws.path().join("applications.csv").exists());
}

#[test]
fn status_uses_listing_target() {
    let ws = Workspace::new();
    let assert = ws
        .jobpilot()
        .args(["status", "--ledger", "listings"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("0/10 recorded, 10 remaining: continue"), "{}", stdout);
}

#[test]
fn saved_applications_move_status_to_done() {
    let ws = Workspace::new();
    let script = ws.file("job.yaml", WIZARD);
    for n in 0..3 {
        let params = serde_json::json!({
            "job_title": format!("Data Scientist {}", n),
            "company": "Acme",
            "detected_language": "english",
            "resume_variant": "cv_en.pdf",
            "outcome": "succeeded",
            "link": format!("https://www.linkedin.com/jobs/view/{}/", n),
            "notes": ""
        })
        .to_string();
        ws.jobpilot()
            .args(["invoke", "--script"])
            .arg(&script)
            .args(["save_application", "--params", params.as_str()])
            .assert()
            .success();
    }

    let assert = ws
        .jobpilot()
        .args(["--output", "json", "status", "--target", "5"])
        .assert()
        .success();
    let report = stdout_json(assert.get_output());
    assert_eq!(report["count"], 3);
    assert_eq!(report["decision"], "continue");

    let assert = ws
        .jobpilot()
        .args(["--output", "json", "status", "--target", "3"])
        .assert()
        .success();
    assert_eq!(stdout_json(assert.get_output())["decision"], "done");

    let ledger = fs::read_to_string(ws.path().join("applications.csv")).unwrap();
    assert_eq!(ledger.lines().count(), 4);
    assert!(ledger.starts_with("date,job_title,company,detected_language"));
}

#[test]
fn classify_empty_text_falls_back_to_english() {
    let ws = Workspace::new();
    let assert = ws
        .jobpilot()
        .args(["--output", "json", "classify", "--text", ""])
        .assert()
        .success();
    let classification = stdout_json(assert.get_output());
    assert_eq!(classification["language"], "english");
    assert_eq!(classification["basis"], "fallback");
}

#[test]
fn classify_reads_description_file() {
    let ws = Workspace::new();
    let description = ws.file(
        "description.txt",
        "Buscamos analista. Requisitos: experiencia con SQL, trabajo en equipo.",
    );
    let assert = ws
        .jobpilot()
        .args(["classify", "--file"])
        .arg(&description)
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.starts_with("spanish (scored"), "{}", stdout);
}

#[test]
fn classify_requires_input() {
    let ws = Workspace::new();
    ws.jobpilot().arg("classify").assert().failure();
}

#[test]
fn actions_lists_every_action() {
    let ws = Workspace::new();
    let assert = ws.jobpilot().arg("actions").assert().success();
    let manifest = stdout_json(assert.get_output());
    let actions = manifest.as_array().expect("manifest array");
    assert_eq!(actions.len(), 10);
    let save = actions
        .iter()
        .find(|action| action["name"] == "save_job_listing")
        .expect("save_job_listing listed");
    assert!(save["parameters"]["properties"]["compensation"].is_object());
}

#[test]
fn resolve_link_walks_to_ancestor() {
    let ws = Workspace::new();
    let snapshot = ws.file("snapshot.yaml", SNAPSHOT);
    let assert = ws
        .jobpilot()
        .args(["resolve-link", "--index", "12", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "https://www.linkedin.com/jobs/view/3901/");

    ws.jobpilot()
        .args(["resolve-link", "--index", "7", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .failure();
}

#[test]
fn invoke_apply_walks_the_wizard() {
    let ws = Workspace::new();
    let script = ws.file("job.yaml", WIZARD);
    let assert = ws
        .jobpilot()
        .args(["invoke", "--script"])
        .arg(&script)
        .args(["apply_to_job", "--params", r#"{"language": "english"}"#])
        .assert()
        .success();
    let outcome = stdout_json(assert.get_output());
    assert_eq!(outcome["memorable"], true);
    assert_eq!(
        outcome["extracted"],
        "Application submitted with cv_en.pdf (1 step(s))"
    );
}

#[test]
fn invoke_detects_posting_language() {
    let ws = Workspace::new();
    let script = ws.file("job.yaml", WIZARD);
    let assert = ws
        .jobpilot()
        .args(["invoke", "--script"])
        .arg(&script)
        .arg("detect_job_language")
        .assert()
        .success();
    let outcome = stdout_json(assert.get_output());
    assert_eq!(outcome["extracted"]["language"], "english");
    assert_eq!(outcome["extracted"]["basis"], "scored");
}

#[test]
fn invoke_unknown_action_reports_error() {
    let ws = Workspace::new();
    let script = ws.file("job.yaml", WIZARD);
    let assert = ws
        .jobpilot()
        .args(["invoke", "--script"])
        .arg(&script)
        .arg("book_flight")
        .assert()
        .failure();
    let outcome = stdout_json(assert.get_output());
    assert_eq!(outcome["error"], "unknown action 'book_flight'");
}

#[test]
fn invoke_reads_verification_code_from_console() {
    let ws = Workspace::new();
    let script = ws.file("job.yaml", WIZARD);
    let mut cmd = assert_cmd::Command::from_std(ws.jobpilot());
    let assert = cmd
        .args(["invoke", "--script"])
        .arg(&script)
        .arg("request_verification_code")
        .write_stdin("482913\n")
        .assert()
        .success();
    let output = assert.get_output();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HUMAN ACTION REQUIRED"), "{}", stderr);
    let outcome = stdout_json(output);
    assert_eq!(outcome["extracted"], "482913");
    assert_eq!(outcome["memorable"], true);
}
