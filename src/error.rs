//! Shared error type for every stage of the pipeline.
//!
//! None of these are fatal: the tokenizer hands back whatever it managed to
//! scan alongside its error, and the checkers only report the first problem
//! they see.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CompileError {
  /// Input ended inside a string literal opened on `line`.
  #[snafu(display("Error: Unterminated string at line {line}"))]
  UnterminatedString { line: usize },

  /// A `put` statement that is not followed by `<identifier> =`.
  #[snafu(display("Syntax Error at line {line} near '{lexeme}'"))]
  Syntax { line: usize, lexeme: String },

  /// An identifier used before any `put` has defined one.
  #[snafu(display("Semantic Error: Undeclared identifier '{identifier}' at line {line}"))]
  Semantic { identifier: String, line: usize },
}

impl CompileError {
  /// Source line the error points at.
  pub fn line(&self) -> usize {
    match self {
      Self::UnterminatedString { line }
      | Self::Syntax { line, .. }
      | Self::Semantic { line, .. } => *line,
    }
  }
}
