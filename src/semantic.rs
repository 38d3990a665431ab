//! Definedness check.
//!
//! There is no symbol table: a single flag flips on the first time a `put`
//! is followed by an identifier, and from then on every identifier counts as
//! defined. Any identifier seen before that point is reported.

use crate::error::{CompileResult, SemanticSnafu};
use crate::tokenizer::{TokenKind, TokenStream};

/// Report the first identifier that appears before any `put <identifier>`.
pub fn check_semantics(tokens: &TokenStream) -> CompileResult<()> {
  let mut defined = false;

  for (i, token) in tokens.iter().enumerate() {
    // Looks one token ahead, so the identifier after `put` is already
    // defined by the time it is visited.
    if token.is_keyword("put") && tokens.kind_at(i + 1, TokenKind::Identifier) {
      defined = true;
    }

    if token.kind == TokenKind::Identifier && !defined {
      return SemanticSnafu {
        identifier: &token.value,
        line: token.line,
      }
      .fail();
    }
  }

  Ok(())
}
