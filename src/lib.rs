//! Crate root: wires together the compilation pipeline.
//!
//! Every stage reads the same token stream and none depends on another's
//! verdict:
//! - `tokenizer` scans source text into a flat, position-addressed stream.
//! - `syntax` validates the shape of `put` statements.
//! - `semantic` checks that identifiers are used only after a `put`.
//! - `codegen` emits `MOV`/`PRINT` pseudo-instructions.
//! - `error` holds the diagnostics the stages report.

pub mod codegen;
pub mod error;
pub mod semantic;
pub mod syntax;
pub mod tokenizer;

use std::fmt;

pub use codegen::Instruction;
pub use error::{CompileError, CompileResult};
pub use tokenizer::{Limits, Token, TokenKind, TokenStream};

/// Outcome of running every stage over one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
  pub tokens: TokenStream,
  /// Set when tokenizing stopped early on an unterminated string.
  pub lex_error: Option<CompileError>,
  pub syntax: CompileResult<()>,
  pub semantics: CompileResult<()>,
  pub code: Vec<Instruction>,
}

impl Report {
  /// True when no stage reported anything.
  pub fn is_clean(&self) -> bool {
    self.lex_error.is_none() && self.syntax.is_ok() && self.semantics.is_ok()
  }
}

/// Console transcript: lex diagnostic, token listing, both checks, the code.
impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(err) = &self.lex_error {
      writeln!(f, "{err}")?;
    }
    write!(f, "\n{}", self.tokens)?;

    writeln!(f, "\nParsing...")?;
    match &self.syntax {
      Ok(()) => writeln!(f, "Parsing successful.")?,
      Err(err) => writeln!(f, "{err}")?,
    }

    writeln!(f, "\nSemantic Analysis...")?;
    match &self.semantics {
      Ok(()) => writeln!(f, "Semantic analysis passed.")?,
      Err(err) => writeln!(f, "{err}")?,
    }

    write!(f, "\nGenerated Code:\n{}", codegen::render(&self.code))
  }
}

/// Run the full pipeline with the default limits.
pub fn compile(source: &str) -> Report {
  compile_with(source, Limits::default())
}

pub fn compile_with(source: &str, limits: Limits) -> Report {
  let tokenizer::Tokenized { tokens, error } = tokenizer::tokenize_with(source, limits);
  let syntax = syntax::check_syntax(&tokens);
  let semantics = semantic::check_semantics(&tokens);
  let code = codegen::generate(&tokens);

  Report {
    tokens,
    lex_error: error,
    syntax,
    semantics,
    code,
  }
}
