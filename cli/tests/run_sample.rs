use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

const ASSIGN_SUM: &str = r#"{
    "node": "Assignment",
    "targets": [{ "node": "Identifier", "name": "x" }],
    "value": {
        "node": "BinaryOp",
        "op": "Add",
        "left": { "node": "Literal", "value": 1 },
        "right": { "node": "Literal", "value": 2 }
    }
}"#;

const CONSTANT_IF: &str = r#"{
    "node": "Block",
    "statements": [{
        "node": "If",
        "test": { "node": "Literal", "value": true },
        "body": [{
            "node": "Assignment",
            "targets": [{ "node": "Identifier", "name": "y" }],
            "value": { "node": "Literal", "value": 1 }
        }],
        "orelse": [{
            "node": "Assignment",
            "targets": [{ "node": "Identifier", "name": "y" }],
            "value": { "node": "Literal", "value": 2 }
        }]
    }]
}"#;

fn tree_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(json.as_bytes()).expect("failed to write tree");
    file
}

fn tacopt() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tacopt"));
    cmd.env_remove("TACOPT_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

#[test]
fn lower_prints_three_address_code() {
    let file = tree_file(ASSIGN_SUM);

    let stdout = stdout_of(tacopt().arg("lower").arg(file.path()));

    assert_eq!(stdout, "    t0 = 1 + 2\n    x = t0\n");
}

#[test]
fn lower_reads_from_stdin() {
    let stdout = stdout_of(tacopt().args(["lower", "-"]).write_stdin(ASSIGN_SUM));

    assert!(stdout.contains("t0 = 1 + 2"));
}

#[test]
fn lower_json_is_structured() {
    let file = tree_file(ASSIGN_SUM);

    let stdout = stdout_of(tacopt().arg("lower").arg(file.path()).arg("--json"));
    let ops: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(ops.as_array().map(Vec::len), Some(2));
}

#[test]
fn fold_tree_prunes_constant_conditionals() {
    let file = tree_file(CONSTANT_IF);

    let stdout = stdout_of(tacopt().arg("fold-tree").arg(file.path()));

    assert_eq!(stdout, "y = 1\n");
}

#[test]
fn fold_tac_reports_folded_instructions() {
    let file = tree_file(ASSIGN_SUM);

    let stdout = stdout_of(tacopt().arg("fold-tac").arg(file.path()));

    assert!(stdout.contains("t0 = 3"));
    assert!(stdout.contains("Constant folded"));
    assert!(stdout.contains("1 of 2 instruction(s) folded"));
}

#[test]
fn run_with_tree_folding_shows_every_stage() {
    let file = tree_file(CONSTANT_IF);

    let stdout = stdout_of(tacopt().arg("run").arg("--fold-tree").arg(file.path()));

    assert!(stdout.contains("Source"));
    assert!(stdout.contains("y = 1"));
    assert!(!stdout.contains("ifFalse"));
}

#[test]
fn run_json_carries_all_three_outputs() {
    let file = tree_file(CONSTANT_IF);

    let stdout = stdout_of(tacopt().arg("run").arg(file.path()).arg("--json"));
    let out: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(out["tree"]["node"], "Block");
    assert_eq!(out["tac"].as_array().map(Vec::len), Some(6));
    assert_eq!(out["optimized"].as_array().map(Vec::len), Some(6));
}

#[test]
fn structural_error_exits_with_a_report() {
    let file = tree_file(
        r#"{
            "node": "Assignment",
            "targets": [{ "node": "Literal", "value": 2, "location": { "file": "m.py", "line": 1, "column": 0 } }],
            "value": { "node": "Literal", "value": 3 }
        }"#,
    );

    let assert = tacopt().arg("lower").arg(file.path()).assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();

    assert!(stderr.contains("TACOPT | ERROR | m.py:1:0 | assignment target must be a name, found Literal"));
}

#[test]
fn depth_limit_is_configurable() {
    let file = tree_file(ASSIGN_SUM);

    tacopt().args(["lower", "--max-depth", "1"]).arg(file.path()).assert().failure();
    tacopt().args(["lower", "--max-depth", "8"]).arg(file.path()).assert().success();
}

#[test]
fn malformed_json_is_rejected() {
    let file = tree_file("{ \"node\": \"Nope\" }");

    tacopt().arg("lower").arg(file.path()).assert().failure();
}
