//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

const JOB: &str = "\
# Frontend Engineer

## Required
- React
- TypeScript

Nice to have: Leadership.
";

const RESUME: &str = r#"{
  "basics": {"name": "Sam Doe", "label": "Frontend developer"},
  "skills": {"hard": [{"name": "React", "level": "expert"}], "soft": ["Leadership"]}
}"#;

/// Write the standard job description and resume into a temp dir.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("jd.md"), JOB).unwrap();
        fs::write(dir.path().join("resume.json"), RESUME).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Run a command from the fixture directory and parse its JSON stdout.
    fn json(&self, args: &[&str]) -> Value {
        let output = cmd()
            .arg("-C")
            .arg(self.root())
            .args(args)
            .output()
            .expect("failed to run command");
        assert!(
            output.status.success(),
            "command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("invalid JSON output")
    }
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("score"))
        .stdout(predicate::str::contains("gaps"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("rank"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: Value = serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"]["vocabulary"]["hard_skills"].as_u64().unwrap() > 0);
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

#[test]
fn invalid_color_fails() {
    cmd()
        .args(["--color", "sometimes", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Extract Command
// =============================================================================

#[test]
fn extract_lists_keywords_in_priority_order() {
    let fx = Fixture::new();
    let json = fx.json(&["--json", "extract", "jd.md"]);

    let keywords = json.as_array().unwrap();
    let names: Vec<&str> = keywords
        .iter()
        .map(|k| k["keyword"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["react", "typescript", "leadership"]);
    assert_eq!(keywords[0]["category"], "hard_skill");
    assert_eq!(keywords[0]["frequency"], 1);
    assert_eq!(keywords[2]["category"], "soft_skill");
}

#[test]
fn extract_category_filter() {
    let fx = Fixture::new();
    let json = fx.json(&["--json", "extract", "jd.md", "--category", "soft-skill"]);

    let keywords = json.as_array().unwrap();
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0]["keyword"], "leadership");
}

#[test]
fn extract_text_output_groups_by_category() {
    let fx = Fixture::new();
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["--color", "never", "extract", "jd.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hard_skill"))
        .stdout(predicate::str::contains("typescript"));
}

#[test]
fn extract_empty_description_finds_nothing() {
    let fx = Fixture::new();
    fx.write("empty.txt", "");
    let json = fx.json(&["--json", "extract", "empty.txt"]);
    assert!(json.as_array().unwrap().is_empty());
}

#[test]
fn extract_missing_file_fails() {
    cmd()
        .args(["extract", "/nonexistent/jd.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// Score Command
// =============================================================================

#[test]
fn score_reports_breakdown() {
    let fx = Fixture::new();
    let json = fx.json(&["--json", "score", "resume.json", "jd.md"]);

    assert_eq!(json["breakdown"]["hardSkillScore"], 50);
    assert_eq!(json["breakdown"]["softSkillScore"], 100);
    assert_eq!(json["breakdown"]["keywordDensityScore"], 50);
    assert_eq!(json["score"], 65);
    assert_eq!(json["breakdown"]["totalScore"], 65);
    assert_eq!(json["missingKeywords"][0]["keyword"], "typescript");
}

#[test]
fn score_passes_gate() {
    let fx = Fixture::new();
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["score", "resume.json", "jd.md", "--min-score", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS:"));
}

#[test]
fn score_fails_gate() {
    let fx = Fixture::new();
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["score", "resume.json", "jd.md", "--min-score", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scores 65 (min: 80)"));
}

#[test]
fn score_rejects_out_of_range_gate() {
    let fx = Fixture::new();
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["score", "resume.json", "jd.md", "--min-score", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn score_with_no_job_keywords_is_lenient() {
    let fx = Fixture::new();
    fx.write("vague.txt", "We are looking for someone great.");
    let json = fx.json(&["--json", "score", "resume.json", "vague.txt"]);

    assert_eq!(json["breakdown"]["hardSkillScore"], 100);
    assert_eq!(json["breakdown"]["softSkillScore"], 100);
    assert_eq!(json["breakdown"]["keywordDensityScore"], 0);
    assert_eq!(json["score"], 90);
}

#[test]
fn score_invalid_resume_fails() {
    let fx = Fixture::new();
    fx.write("broken.json", "{\"skills\": ");
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["score", "broken.json", "jd.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

// =============================================================================
// Gaps Command
// =============================================================================

#[test]
fn gaps_lists_suggestions_by_priority() {
    let fx = Fixture::new();
    fx.write("bare.json", r#"{"summary": "Frontend developer"}"#);
    let json = fx.json(&["--json", "gaps", "bare.json", "jd.md"]);

    let suggestions = json["suggestions"].as_array().unwrap();
    let priorities: Vec<u64> = suggestions
        .iter()
        .map(|s| s["priority"].as_u64().unwrap())
        .collect();
    assert_eq!(priorities, [1, 1, 2]);
    assert_eq!(json["gapsByCategory"]["hardSkills"].as_array().unwrap().len(), 2);
    assert!(
        suggestions[0]["suggestion"]
            .as_str()
            .unwrap()
            .contains("Skills section")
    );
}

#[test]
fn gaps_text_output_shows_keywords() {
    let fx = Fixture::new();
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["--color", "never", "gaps", "resume.json", "jd.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[P1] typescript"));
}

// =============================================================================
// Report Command
// =============================================================================

#[test]
fn report_json_has_all_parts() {
    let fx = Fixture::new();
    let json = fx.json(&["--json", "report", "resume.json", "jd.md"]);

    assert_eq!(json["keywords"].as_array().unwrap().len(), 3);
    assert_eq!(json["score"]["score"], 65);
    assert_eq!(json["gaps"]["missingKeywords"][0]["keyword"], "typescript");
    let feedback = json["feedback"].as_str().unwrap();
    assert!(feedback.starts_with("Moderate match (65/100)"));
    assert!(feedback.contains("\"typescript\""));
}

#[test]
fn report_snapshot_shape() {
    let fx = Fixture::new();
    let json = fx.json(&["report", "resume.json", "jd.md", "--snapshot"]);

    assert_eq!(json["matchScore"], 65);
    assert_eq!(json["matchedKeywords"].as_array().unwrap().len(), 2);
    assert_eq!(json["missingKeywords"].as_array().unwrap().len(), 1);
    assert!(json["feedback"].is_string());
}

#[test]
fn report_text_shows_feedback() {
    let fx = Fixture::new();
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["--color", "never", "report", "resume.json", "jd.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ATS score: 65/100"))
        .stdout(predicate::str::contains("Moderate match"));
}

#[test]
fn report_uses_config_gate() {
    let fx = Fixture::new();
    fx.write(".ats-match.toml", "min_score = 90\n");
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["report", "resume.json", "jd.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("(min: 90)"));
}

// =============================================================================
// Rank Command
// =============================================================================

#[test]
fn rank_orders_resumes_by_score() {
    let fx = Fixture::new();
    fx.write("weak.json", r#"{"summary": "Backend developer"}"#);
    fx.write(
        "strong.json",
        r#"{"summary": "React and TypeScript, leadership of a team of four",
            "skills": {"hard": [{"name": "React"}, {"name": "TypeScript"}], "soft": ["Leadership"]}}"#,
    );

    let json = fx.json(&[
        "--json",
        "rank",
        "jd.md",
        "weak.json",
        "resume.json",
        "strong.json",
    ]);

    let ranked = json.as_array().unwrap();
    let order: Vec<&str> = ranked
        .iter()
        .map(|r| r["resume"].as_str().unwrap())
        .collect();
    assert_eq!(order, ["strong.json", "resume.json", "weak.json"]);
    assert_eq!(ranked[0]["rank"], 1);
    assert_eq!(ranked[1]["score"], 65);
}

#[test]
fn rank_top_limits_output() {
    let fx = Fixture::new();
    fx.write("weak.json", "{}");
    let json = fx.json(&["--json", "rank", "jd.md", "weak.json", "resume.json", "--top", "1"]);

    let ranked = json.as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["resume"], "resume.json");
}

#[test]
fn rank_requires_a_resume() {
    cmd()
        .args(["rank", "jd.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Input Limits
// =============================================================================

#[test]
fn oversized_input_fails() {
    let fx = Fixture::new();
    fx.write(".ats-match.toml", "max_input_bytes = 16\n");
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["score", "resume.json", "jd.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_resolves_relative_inputs() {
    let fx = Fixture::new();
    cmd()
        .arg("-C")
        .arg(fx.root())
        .args(["extract", "jd.md"])
        .assert()
        .success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
