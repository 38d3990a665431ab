//! Code generation: lower recognised statements into pseudo-assembly.
//!
//! Emission is purely positional and performs no validation. `put` takes its
//! destination from the token after the keyword and its source from three
//! tokens after it, whatever those tokens happen to be.

use std::fmt;

use crate::tokenizer::TokenStream;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
  Mov { dst: String, src: String },
  Print { value: String },
}

impl fmt::Display for Instruction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Instruction::Mov { dst, src } => write!(f, "MOV {dst}, {src}"),
      Instruction::Print { value } => write!(f, "PRINT {value}"),
    }
  }
}

/// Emit one instruction per `put`/`display` statement found in the stream.
pub fn generate(tokens: &TokenStream) -> Vec<Instruction> {
  let mut code = Vec::new();
  let mut i = 0;

  while i < tokens.len() {
    let token = &tokens[i];

    if token.is_keyword("put") {
      if let Some(src) = tokens.get(i + 3) {
        code.push(Instruction::Mov {
          dst: tokens[i + 1].value.clone(),
          src: src.value.clone(),
        });
        i += 4;
        continue;
      }
    } else if token.is_keyword("display")
      && let Some(value) = tokens.get(i + 1)
    {
      code.push(Instruction::Print {
        value: value.value.clone(),
      });
    }

    i += 1;
  }

  code
}

/// Render instructions one per line.
pub fn render(code: &[Instruction]) -> String {
  let mut asm = String::new();
  for inst in code {
    asm.push_str(&format!("{inst}\n"));
  }
  asm
}
