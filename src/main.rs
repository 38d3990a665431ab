use std::env;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process;

/// Bytes of program text kept; the rest of the input is dropped.
const MAX_INPUT_LEN: usize = 9999;

/// Ctrl+Z at the start of a line ends console input.
const SUBSTITUTE: u8 = 0x1A;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
  Lex,
  Full,
}

struct Args {
  program: String,
  stage: Stage,
  path: Option<String>,
}

fn usage(program: &str) -> String {
  format!("usage: {program} [--stage lex|full] [FILE]")
}

fn fail(program: &str, message: impl std::fmt::Display) -> ! {
  eprintln!("{program}: {message}");
  process::exit(1);
}

fn parse_args() -> Args {
  let mut args = env::args();
  let program = args.next().unwrap_or_else(|| "putlang".to_string());
  let mut stage = Stage::Full;
  let mut path = None;

  while let Some(arg) = args.next() {
    match arg.as_str() {
      "-h" | "--help" => {
        println!("{}", usage(&program));
        process::exit(0);
      }
      "-s" | "--stage" => {
        stage = match args.next().as_deref() {
          Some("lex") => Stage::Lex,
          Some("full") => Stage::Full,
          Some(other) => fail(&program, format!("invalid stage: '{other}'")),
          None => fail(&program, usage(&program)),
        };
      }
      _ if arg.starts_with('-') => fail(&program, format!("unknown option: '{arg}'")),
      _ if path.is_none() => path = Some(arg),
      _ => fail(&program, usage(&program)),
    }
  }

  Args {
    program,
    stage,
    path,
  }
}

fn read_console() -> io::Result<String> {
  let stdin = io::stdin();
  if stdin.is_terminal() {
    println!("Enter code (end with Ctrl+D/Ctrl+Z):");
    io::stdout().flush()?;
  }

  let mut source = String::new();
  for line in stdin.lock().split(b'\n') {
    let line = line?;
    if line.first() == Some(&SUBSTITUTE) {
      break;
    }
    source.push_str(&String::from_utf8_lossy(&line));
    source.push('\n');
    if source.len() > MAX_INPUT_LEN {
      break;
    }
  }
  Ok(source)
}

fn read_file(path: &str) -> io::Result<String> {
  let bytes = fs::read(path)?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn truncate_input(source: &mut String) {
  if source.len() <= MAX_INPUT_LEN {
    return;
  }
  let mut end = MAX_INPUT_LEN;
  while !source.is_char_boundary(end) {
    end -= 1;
  }
  source.truncate(end);
}

fn main() {
  let args = parse_args();

  let read = match &args.path {
    Some(path) => read_file(path),
    None => read_console(),
  };
  let mut source = match read {
    Ok(source) => source,
    Err(err) => fail(&args.program, format!("cannot read input: {err}")),
  };
  truncate_input(&mut source);

  match args.stage {
    Stage::Lex => {
      let out = putlang::tokenizer::tokenize(&source);
      if let Some(err) = &out.error {
        println!("{err}");
      }
      print!("{}", out.tokens);
    }
    Stage::Full => print!("{}", putlang::compile(&source)),
  }
}
