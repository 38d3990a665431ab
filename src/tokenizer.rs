//! Lexical analysis: turns the raw program text into a flat token stream.
//!
//! Scanning is a single left-to-right pass with no backtracking. The only
//! multi-character tokens are string literals and "words", a maximal run of
//! characters that are neither whitespace nor one of the single-character
//! symbols. Words are classified after the fact (keyword, identifier, number,
//! unknown) so the scanner itself never needs lookahead.

use std::fmt;
use std::ops::Index;
use std::slice;

use crate::error::{CompileError, UnterminatedStringSnafu};

/// Maximum number of tokens produced by one `tokenize` call.
pub const MAX_TOKENS: usize = 1000;

/// Longest lexeme value stored. Longer runs are classified whole, then cut
/// to this many characters.
pub const MAX_LEXEME_LEN: usize = 99;

/// Words that classify as [`TokenKind::Keyword`].
pub const KEYWORDS: [&str; 6] = ["put", "display", "check", "otherwise", "repeat", "range"];

/// Characters that always form a token on their own.
const SINGLE_CHAR_SYMBOLS: &str = "+-*/%=><(){};";

/// The subset of [`SINGLE_CHAR_SYMBOLS`] classified as operators. `<` is
/// deliberately absent and lexes as a delimiter.
const OPERATOR_SYMBOLS: &str = "+-*/%=>";

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Keyword,
  Identifier,
  Number,
  Operator,
  Delimiter,
  StringLiteral,
  Unknown,
}

impl TokenKind {
  /// Label used in token listings.
  pub fn label(self) -> &'static str {
    match self {
      TokenKind::Keyword => "Keyword",
      TokenKind::Identifier => "Identifier",
      TokenKind::Number => "Number",
      TokenKind::Operator => "Operator",
      TokenKind::Delimiter => "Delimiter",
      TokenKind::StringLiteral => "String",
      TokenKind::Unknown => "Unknown",
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub value: String,
  pub kind: TokenKind,
  /// 1-based line the token started on.
  pub line: usize,
}

impl Token {
  pub fn new(value: impl Into<String>, kind: TokenKind, line: usize) -> Self {
    Self {
      value: value.into(),
      kind,
      line,
    }
  }

  /// True for a keyword token spelled exactly `word`.
  pub fn is_keyword(&self, word: &str) -> bool {
    self.kind == TokenKind::Keyword && self.value == word
  }
}

/// Read-only, index-addressable sequence of tokens. Later stages address
/// tokens purely by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
  tokens: Vec<Token>,
}

impl TokenStream {
  pub fn len(&self) -> usize {
    self.tokens.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tokens.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&Token> {
    self.tokens.get(index)
  }

  pub fn iter(&self) -> slice::Iter<'_, Token> {
    self.tokens.iter()
  }

  pub fn as_slice(&self) -> &[Token] {
    &self.tokens
  }

  /// Whether the token at `index` exists and is the keyword `word`.
  pub fn is_keyword_at(&self, index: usize, word: &str) -> bool {
    self.get(index).is_some_and(|token| token.is_keyword(word))
  }

  /// Whether the token at `index` exists and has the given kind.
  pub fn kind_at(&self, index: usize, kind: TokenKind) -> bool {
    self.get(index).is_some_and(|token| token.kind == kind)
  }
}

impl Index<usize> for TokenStream {
  type Output = Token;

  fn index(&self, index: usize) -> &Token {
    &self.tokens[index]
  }
}

impl<'a> IntoIterator for &'a TokenStream {
  type Item = &'a Token;
  type IntoIter = slice::Iter<'a, Token>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

/// Human-readable listing, one `index: lexeme (Kind, Line N)` entry per line
/// with 1-based indices.
impl fmt::Display for TokenStream {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Tokens:")?;
    for (i, token) in self.tokens.iter().enumerate() {
      writeln!(
        f,
        "{}: {} ({}, Line {})",
        i + 1,
        token.value,
        token.kind,
        token.line
      )?;
    }
    Ok(())
  }
}

/// Resource caps applied while scanning. Hitting either one truncates
/// silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
  pub max_tokens: usize,
  pub max_lexeme_len: usize,
}

impl Default for Limits {
  fn default() -> Self {
    Self {
      max_tokens: MAX_TOKENS,
      max_lexeme_len: MAX_LEXEME_LEN,
    }
  }
}

/// Result of a tokenizer run. `error` is set when scanning stopped on an
/// unterminated string; `tokens` then holds everything scanned before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
  pub tokens: TokenStream,
  pub error: Option<CompileError>,
}

/// Tokenize with the default [`Limits`].
pub fn tokenize(input: &str) -> Tokenized {
  tokenize_with(input, Limits::default())
}

pub fn tokenize_with(input: &str, limits: Limits) -> Tokenized {
  let mut tokens = Vec::new();
  let mut chars = input.chars().peekable();
  let mut line = 1;

  while tokens.len() < limits.max_tokens {
    let Some(&c) = chars.peek() else {
      break;
    };

    if is_space(c) {
      if c == '\n' {
        line += 1;
      }
      chars.next();
      continue;
    }

    if c == '"' {
      chars.next();
      let start_line = line;
      let mut lexeme = LexemeBuf::new(limits.max_lexeme_len);
      let mut closed = false;
      for c in chars.by_ref() {
        if c == '"' {
          closed = true;
          break;
        }
        if c == '\n' {
          line += 1;
        }
        lexeme.push(c);
      }
      if !closed {
        let error = UnterminatedStringSnafu { line: start_line }.build();
        return Tokenized {
          tokens: TokenStream { tokens },
          error: Some(error),
        };
      }
      tokens.push(Token::new(
        lexeme.finish(),
        TokenKind::StringLiteral,
        start_line,
      ));
      continue;
    }

    if SINGLE_CHAR_SYMBOLS.contains(c) {
      chars.next();
      tokens.push(Token::new(c, classify_symbol(c), line));
      continue;
    }

    let mut lexeme = LexemeBuf::new(limits.max_lexeme_len);
    while let Some(&c) = chars.peek()
      && !is_space(c)
      && !SINGLE_CHAR_SYMBOLS.contains(c)
    {
      lexeme.push(c);
      chars.next();
    }
    let kind = classify_word(lexeme.as_str());
    tokens.push(Token::new(lexeme.finish(), kind, line));
  }

  Tokenized {
    tokens: TokenStream { tokens },
    error: None,
  }
}

/// Scratch buffer holding a whole lexeme. Classification sees the full run;
/// only the stored value is cut to the cap.
struct LexemeBuf {
  text: String,
  cap: usize,
}

impl LexemeBuf {
  fn new(cap: usize) -> Self {
    Self {
      text: String::new(),
      cap,
    }
  }

  fn push(&mut self, c: char) {
    self.text.push(c);
  }

  fn as_str(&self) -> &str {
    &self.text
  }

  fn finish(mut self) -> String {
    if let Some((end, _)) = self.text.char_indices().nth(self.cap) {
      self.text.truncate(end);
    }
    self.text
  }
}

/// The C `isspace` set.
fn is_space(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn classify_symbol(c: char) -> TokenKind {
  if OPERATOR_SYMBOLS.contains(c) {
    TokenKind::Operator
  } else {
    TokenKind::Delimiter
  }
}

/// First matching rule wins: keyword, identifier, number, unknown.
fn classify_word(word: &str) -> TokenKind {
  if KEYWORDS.contains(&word) {
    TokenKind::Keyword
  } else if is_identifier(word) {
    TokenKind::Identifier
  } else if word.chars().all(|c| c.is_ascii_digit()) {
    TokenKind::Number
  } else {
    TokenKind::Unknown
  }
}

fn is_identifier(word: &str) -> bool {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) if first.is_ascii_alphabetic() || first == '_' => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
    _ => false,
  }
}
