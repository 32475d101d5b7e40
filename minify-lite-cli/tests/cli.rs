use assert_cmd::Command;
use std::fs;
use std::time::Duration;

fn minify_lite() -> Command {
  let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("minify-lite");
  cmd.timeout(Duration::from_secs(5));
  cmd
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
  String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
  String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

#[test]
fn minify_reads_stdin() {
  let assert = minify_lite()
    .arg("minify")
    .write_stdin("function add(a, b) {\n  return a + b;\n}\n")
    .assert()
    .success();
  assert_eq!(stdout_of(&assert), "function add(v0,v1){return v0+v1;}");
  assert!(stderr_of(&assert).is_empty(), "stderr: {}", stderr_of(&assert));
}

#[test]
fn minify_without_renaming() {
  let assert = minify_lite()
    .args(["minify", "--no-rename"])
    .write_stdin("let x = 1;\n")
    .assert()
    .success();
  assert_eq!(stdout_of(&assert), "let x=1;");
}

#[test]
fn fmt_applies_flags() {
  let assert = minify_lite()
    .args(["fmt", "--indent-width", "4", "--keep-comments"])
    .write_stdin("// hi\nfunction f(){return 1;}")
    .assert()
    .success();
  assert_eq!(
    stdout_of(&assert),
    "// hi\nfunction f() {\n    return 1;\n}\n"
  );
}

#[test]
fn fmt_reads_config_file_and_writes_in_place() {
  let dir = tempfile::tempdir().unwrap();
  let config = dir.path().join("config.json");
  fs::write(&config, r#"{"indentWidth": 3}"#).unwrap();
  let script = dir.path().join("a.js");
  fs::write(&script, "if(a){b();}").unwrap();

  let assert = minify_lite()
    .arg("fmt")
    .arg("--config")
    .arg(&config)
    .arg("--write")
    .arg(&script)
    .assert()
    .success();
  assert!(stdout_of(&assert).is_empty());
  assert_eq!(
    fs::read_to_string(&script).unwrap(),
    "if (a) {\n   b();\n}\n"
  );
}

#[test]
fn outputs_follow_input_order() {
  let dir = tempfile::tempdir().unwrap();
  let mut paths = Vec::new();
  for i in 0..6 {
    let path = dir.path().join(format!("{i}.js"));
    fs::write(&path, format!("let x{i} = {i};")).unwrap();
    paths.push(path);
  }
  let assert = minify_lite().arg("minify").args(&paths).assert().success();
  let expected: String = (0..6).map(|i| format!("let x{i}={i};\n")).collect();
  assert_eq!(stdout_of(&assert), expected);
}

#[test]
fn syntax_errors_are_rendered() {
  let assert = minify_lite()
    .arg("minify")
    .write_stdin("let = 1;")
    .assert()
    .failure()
    .code(1);
  assert!(stdout_of(&assert).is_empty());
  let stderr = stderr_of(&assert);
  assert!(stderr.starts_with("error[PS"), "stderr: {stderr}");
  assert!(stderr.contains("--> <stdin>:1:"), "stderr: {stderr}");
}

#[test]
fn one_failure_fails_the_run() {
  let dir = tempfile::tempdir().unwrap();
  let good = dir.path().join("good.js");
  fs::write(&good, "let a = 1;").unwrap();
  let bad = dir.path().join("bad.js");
  fs::write(&bad, "let a = 1; let a = 2;").unwrap();

  let assert = minify_lite()
    .arg("minify")
    .arg(&good)
    .arg(&bad)
    .assert()
    .failure()
    .code(1);
  assert_eq!(stdout_of(&assert), "let a=1;\n");
  assert!(stderr_of(&assert).contains("error[SY0001]"));
}

#[test]
fn scopes_lists_bindings_and_warns_on_globals() {
  let assert = minify_lite()
    .arg("scopes")
    .write_stdin("function f(a) { return a + g; }")
    .assert()
    .success();
  assert_eq!(
    stdout_of(&assert),
    concat!(
      "scope 0 Global\n",
      "  function f: 0 references, 0 writes\n",
      "  scope 1 Function\n",
      "    param a: 1 references, 0 writes\n",
    )
  );
  assert!(stderr_of(&assert).contains("warning[SY0002]"));
}

#[test]
fn tokens_prints_positions() {
  let assert = minify_lite()
    .arg("tokens")
    .write_stdin("x = 1;")
    .assert()
    .success();
  assert_eq!(
    stdout_of(&assert),
    concat!(
      "1:1 Identifier \"x\"\n",
      "1:3 Operator \"=\"\n",
      "1:5 LiteralNumber \"1\"\n",
      "1:6 Punctuation \";\"\n",
    )
  );
}

#[test]
fn ast_is_json() {
  let assert = minify_lite()
    .arg("ast")
    .write_stdin("x;")
    .assert()
    .success();
  let value: serde_json::Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
  assert!(value.is_object());
}
