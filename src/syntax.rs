//! Syntax checking over the flat token stream.
//!
//! Only one statement shape is understood: `put <identifier> =`. Every other
//! token is skipped without inspection, so programs with no `put` at all
//! always pass.

use crate::error::{CompileResult, SyntaxSnafu};
use crate::tokenizer::{TokenKind, TokenStream};

/// Report the first `put` that is not followed by an identifier and `=`.
pub fn check_syntax(tokens: &TokenStream) -> CompileResult<()> {
  let mut i = 0;

  while i < tokens.len() {
    if !tokens.is_keyword_at(i, "put") {
      i += 1;
      continue;
    }

    if is_put_shape(tokens, i) {
      i += 3;
      continue;
    }

    let token = &tokens[i];
    return SyntaxSnafu {
      line: token.line,
      lexeme: &token.value,
    }
    .fail();
  }

  Ok(())
}

fn is_put_shape(tokens: &TokenStream, i: usize) -> bool {
  tokens.kind_at(i + 1, TokenKind::Identifier)
    && tokens
      .get(i + 2)
      .is_some_and(|token| token.kind == TokenKind::Operator && token.value == "=")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CompileError;
  use crate::tokenizer::tokenize;

  fn check(src: &str) -> CompileResult<()> {
    check_syntax(&tokenize(src).tokens)
  }

  fn violation(line: usize) -> CompileResult<()> {
    Err(CompileError::Syntax {
      line,
      lexeme: "put".into(),
    })
  }

  #[test]
  fn valid_assignment() {
    assert_eq!(check("put x = 5"), Ok(()));
  }

  #[test]
  fn missing_identifier() {
    assert_eq!(check("put 5"), violation(1));
  }

  #[test]
  fn missing_equals() {
    assert_eq!(check("put x 5"), violation(1));
    assert_eq!(check("put x + 5"), violation(1));
  }

  #[test]
  fn truncated_shape_at_end() {
    assert_eq!(check("put x"), violation(1));
    assert_eq!(check("put"), violation(1));
  }

  #[test]
  fn no_put_statements() {
    assert_eq!(check(""), Ok(()));
    assert_eq!(check("display y ; 1 2 = = ?"), Ok(()));
  }

  #[test]
  fn reports_first_bad_put_only() {
    let src = "put a = 1\nput b = 2\nput 3\nput 4";
    assert_eq!(check(src), violation(3));
  }

  #[test]
  fn consumed_shape_is_not_rescanned() {
    // Scanning resumes right after `=`, so the second `put` is checked on its own.
    assert_eq!(check("put a = put b = 1"), Ok(()));
    assert_eq!(check("put a = put 1"), violation(1));
  }

  #[test]
  fn string_put_is_not_a_keyword() {
    assert_eq!(check("display \"put\""), Ok(()));
  }
}
