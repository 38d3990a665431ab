use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

struct CommandResult {
  status_ok: bool,
  stdout: String,
  stderr: String,
}

fn run_cmd(args: &[&str], input: Option<&str>) -> Result<CommandResult, String> {
  let mut cmd = Command::new(env!("CARGO_BIN_EXE_putlang"));
  cmd
    .args(args)
    .stdin(if input.is_some() {
      Stdio::piped()
    } else {
      Stdio::null()
    })
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

  let mut child = cmd.spawn().map_err(|e| e.to_string())?;
  if let Some(data) = input
    && let Some(mut handle) = child.stdin.take()
  {
    handle
      .write_all(data.as_bytes())
      .map_err(|e| e.to_string())?;
  }

  let output = child.wait_with_output().map_err(|e| e.to_string())?;
  Ok(CommandResult {
    status_ok: output.status.success(),
    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
  })
}

fn temp_file(name: &str, contents: &str) -> Result<PathBuf, String> {
  let nanos = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map_err(|e| e.to_string())?
    .as_nanos();
  let dir = std::env::temp_dir().join(format!("putlang_cli_{}_{nanos}", std::process::id()));
  fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
  let path = dir.join(name);
  fs::write(&path, contents).map_err(|e| e.to_string())?;
  Ok(path)
}

fn remove_temp(path: &Path) -> Result<(), String> {
  match path.parent() {
    Some(dir) => fs::remove_dir_all(dir).map_err(|e| e.to_string()),
    None => Ok(()),
  }
}

#[test]
fn full_report_from_stdin() -> Result<(), String> {
  let result = run_cmd(&[], Some("put x = 5\ndisplay x\n"))?;
  if !result.status_ok {
    return Err(result.stderr);
  }
  for expected in [
    "1: put (Keyword, Line 1)",
    "5: display (Keyword, Line 2)",
    "Parsing successful.",
    "Semantic analysis passed.",
    "Generated Code:\nMOV x, 5\nPRINT x\n",
  ] {
    if !result.stdout.contains(expected) {
      return Err(format!("missing {expected:?} in: {}", result.stdout));
    }
  }
  // Piped input is not a terminal, so no prompt.
  if result.stdout.contains("Enter code") {
    return Err("unexpected prompt".into());
  }
  Ok(())
}

#[test]
fn violations_keep_exit_status_zero() -> Result<(), String> {
  let result = run_cmd(&[], Some("display y\nput 5\n"))?;
  if !result.status_ok {
    return Err(result.stderr);
  }
  if !result.stdout.contains("Syntax Error at line 2 near 'put'") {
    return Err(format!("expected syntax error, got: {}", result.stdout));
  }
  if !result
    .stdout
    .contains("Semantic Error: Undeclared identifier 'y' at line 1")
  {
    return Err(format!("expected semantic error, got: {}", result.stdout));
  }
  Ok(())
}

#[test]
fn ctrl_z_line_ends_input() -> Result<(), String> {
  let result = run_cmd(&[], Some("put a = 1\n\x1a\nput b = 2\n"))?;
  if result.stdout.contains("MOV b, 2") {
    return Err(format!("input after Ctrl+Z was read: {}", result.stdout));
  }
  if !result.stdout.contains("MOV a, 1") {
    return Err(format!("missing MOV a, 1 in: {}", result.stdout));
  }
  Ok(())
}

#[test]
fn lex_stage_from_file() -> Result<(), String> {
  let path = temp_file("lex.put", "put s = \"open\n")?;
  let result = run_cmd(&["--stage", "lex", path.to_str().ok_or("bad path")?], None);
  remove_temp(&path)?;
  let result = result?;
  if !result.status_ok {
    return Err(result.stderr);
  }
  let expected = "Error: Unterminated string at line 1\n\
    Tokens:\n\
    1: put (Keyword, Line 1)\n\
    2: s (Identifier, Line 1)\n\
    3: = (Operator, Line 1)\n";
  if result.stdout != expected {
    return Err(format!("unexpected listing: {:?}", result.stdout));
  }
  Ok(())
}

#[test]
fn invalid_utf8_file_is_decoded_lossily() -> Result<(), String> {
  let path = temp_file("bytes.put", "")?;
  let written = fs::write(&path, b"put x = 5\ndisplay \xff\n").map_err(|e| e.to_string());
  let result = written.and_then(|()| run_cmd(&[path.to_str().ok_or("bad path")?], None));
  remove_temp(&path)?;
  let result = result?;
  if !result.status_ok {
    return Err(result.stderr);
  }
  if !result.stdout.contains("MOV x, 5") || !result.stdout.contains("PRINT \u{fffd}") {
    return Err(format!("unexpected report: {}", result.stdout));
  }
  Ok(())
}

#[test]
fn missing_file_fails() -> Result<(), String> {
  let result = run_cmd(&["/nonexistent/putlang/input.put"], None)?;
  if result.status_ok {
    return Err("expected failure for missing file".into());
  }
  if !result.stderr.contains("cannot read input") {
    return Err(format!("unexpected stderr: {}", result.stderr));
  }
  Ok(())
}

#[test]
fn bad_stage_is_rejected() -> Result<(), String> {
  let result = run_cmd(&["--stage", "optimize"], None)?;
  if result.status_ok {
    return Err("expected failure for bad stage".into());
  }
  if !result.stderr.contains("invalid stage: 'optimize'") {
    return Err(format!("unexpected stderr: {}", result.stderr));
  }
  Ok(())
}
