//! Line tokenizer shared by config files and the editor command line.
//!
//! A line splits into whitespace-separated words. `=` is always a token of
//! its own, and double quotes group text (with `\` escaping the next
//! character) into a single token.

use std::str::FromStr;
use thiserror::Error;

/// Errors raised while converting tokens into typed arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("wrong number of tokens: missing argument {position}")]
    MissingArgument { position: usize },

    #[error("token type conversion failed for \"{token}\"")]
    InvalidArgument { token: String },

    #[error("wrong number of tokens: unexpected \"{token}\"")]
    TrailingTokens { token: String },
}

/// Result type for token conversion
pub type TokenResult<T> = Result<T, TokenError>;

/// The one single-character operator
pub const ASSIGN: &str = "=";

// Matches the C locale `isspace` set, which includes vertical tab.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Unquoted,
    Quoted,
    Escaped,
}

/// Split one line of text into tokens, in order.
///
/// An unterminated quote is closed silently at end of input.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut mode = Mode::Unquoted;

    for c in line.chars() {
        match mode {
            Mode::Unquoted => match c {
                '=' => {
                    flush(&mut tokens, &mut current);
                    tokens.push(ASSIGN.to_owned());
                }
                '"' => {
                    flush(&mut tokens, &mut current);
                    mode = Mode::Quoted;
                }
                c if is_space(c) => flush(&mut tokens, &mut current),
                c => current.push(c),
            },
            Mode::Quoted => match c {
                '\\' => mode = Mode::Escaped,
                '"' => {
                    tokens.push(std::mem::take(&mut current));
                    mode = Mode::Unquoted;
                }
                c => current.push(c),
            },
            Mode::Escaped => {
                current.push(c);
                mode = Mode::Quoted;
            }
        }
    }

    match mode {
        Mode::Unquoted => flush(&mut tokens, &mut current),
        Mode::Quoted | Mode::Escaped => tokens.push(current),
    }

    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

/// Cursor over tokenized arguments with typed conversion
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    tokens: &'a [String],
    position: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Self { tokens, position: 0 }
    }

    /// Next raw token, if any
    pub fn next_word(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token.as_str())
    }

    /// Convert the next token to `T`
    pub fn next_arg<T: FromStr>(&mut self) -> TokenResult<T> {
        let position = self.position;
        let token = self
            .next_word()
            .ok_or(TokenError::MissingArgument { position })?;
        token.parse().map_err(|_| TokenError::InvalidArgument {
            token: token.to_owned(),
        })
    }

    /// Fail if any token was left unconsumed
    pub fn finish(mut self) -> TokenResult<()> {
        match self.next_word() {
            Some(token) => Err(TokenError::TrailingTokens {
                token: token.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_whitespace() {
        assert_eq!(tokenize("  open   level.lvl\t"), vec!["open", "level.lvl"]);
        assert_eq!(tokenize("a\u{0B}b\r\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_assign_is_its_own_token() {
        assert_eq!(tokenize("a=b"), vec!["a", "=", "b"]);
        assert_eq!(tokenize("a = b"), vec!["a", "=", "b"]);
        assert_eq!(tokenize("=="), vec!["=", "="]);
    }

    #[test]
    fn test_quoted_string() {
        assert_eq!(tokenize("a = \"b c\""), vec!["a", "=", "b c"]);
        assert_eq!(tokenize("\"x = y\""), vec!["x = y"]);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(tokenize("x=\"\\\"q\\\"\""), vec!["x", "=", "\"q\""]);
        assert_eq!(tokenize("\"a\\\\b\""), vec!["a\\b"]);
    }

    #[test]
    fn test_empty_quotes_yield_empty_token() {
        assert_eq!(tokenize("name = \"\""), vec!["name", "=", ""]);
    }

    #[test]
    fn test_quote_splits_adjacent_word() {
        assert_eq!(tokenize("ab\"c d\"e"), vec!["ab", "c d", "e"]);
    }

    #[test]
    fn test_unterminated_quote_closes_silently() {
        assert_eq!(tokenize("open \"my level"), vec!["open", "my level"]);
        assert_eq!(tokenize("\"trailing\\"), vec!["trailing"]);
    }

    #[test]
    fn test_typed_arguments() {
        let tokens = tokenize("vertex 1.5 -2");
        let mut args = Tokens::new(&tokens);
        assert_eq!(args.next_word(), Some("vertex"));
        assert_eq!(args.next_arg::<f64>(), Ok(1.5));
        assert_eq!(args.next_arg::<f64>(), Ok(-2.0));
        assert!(args.finish().is_ok());
    }

    #[test]
    fn test_argument_errors() {
        let tokens = tokenize("line 3 x");
        let mut args = Tokens::new(&tokens);
        args.next_word();
        assert_eq!(args.next_arg::<u16>(), Ok(3));
        assert_eq!(
            args.next_arg::<u16>(),
            Err(TokenError::InvalidArgument { token: "x".into() })
        );
        assert_eq!(
            args.next_arg::<u16>(),
            Err(TokenError::MissingArgument { position: 3 })
        );

        let tokens = tokenize("1 2");
        let mut args = Tokens::new(&tokens);
        args.next_word();
        assert_eq!(
            args.finish(),
            Err(TokenError::TrailingTokens { token: "2".into() })
        );
    }
}
