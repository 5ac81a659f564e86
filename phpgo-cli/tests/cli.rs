//! End-to-end tests of the `phpgo` binary: JSON AST in, Go file out.

use std::fs;
use std::process::Command;

const AST: &str = r#"{
  "functions": [
    {
      "name": "main",
      "span": { "line": 1, "column": 0, "end_line": 2, "end_column": 0 },
      "body": [
        {
          "Echo": {
            "span": { "line": 2, "column": 4, "end_line": 2, "end_column": 14 },
            "arguments": [
              {
                "span": { "line": 2, "column": 9, "end_line": 2, "end_column": 13 },
                "kind": { "StringLiteral": "hi" }
              }
            ]
          }
        }
      ]
    }
  ]
}"#;

#[test]
fn compiles_ast_to_stdout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hello.json");
    fs::write(&input, AST).expect("write input");

    let output = Command::new(env!("CARGO_BIN_EXE_phpgo"))
        .arg(&input)
        .output()
        .expect("run phpgo");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("// Code generated by phpgo. DO NOT EDIT.\n"));
    assert!(stdout.contains("package hello"));
    assert!(stdout.contains("fmt.Print(\"hi\")"));
}

#[test]
fn writes_output_file_and_honors_name_override() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hello.json");
    let destination = dir.path().join("out.go");
    fs::write(&input, AST).expect("write input");

    let output = Command::new(env!("CARGO_BIN_EXE_phpgo"))
        .arg(&input)
        .arg("--output")
        .arg(&destination)
        .arg("--name")
        .arg("greeter.php")
        .output()
        .expect("run phpgo");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let written = fs::read_to_string(&destination).expect("read output file");
    assert!(written.contains("package greeter"));
}

#[test]
fn rejects_malformed_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").expect("write input");

    let output = Command::new(env!("CARGO_BIN_EXE_phpgo"))
        .arg(&input)
        .output()
        .expect("run phpgo");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse"), "stderr: {stderr}");
}

#[test]
fn dump_ast_prints_the_resolved_tree() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("hello.json");
    fs::write(&input, AST).expect("write input");

    let output = Command::new(env!("CARGO_BIN_EXE_phpgo"))
        .arg(&input)
        .arg("--dump-ast")
        .output()
        .expect("run phpgo");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"functions\""), "stderr: {stderr}");
}
