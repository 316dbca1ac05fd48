//! Query tokenizer
//!
//! Splits statement text into words, quoted strings and punctuation.
//! Keywords are not recognized here; the grammar matchers compare words
//! case-insensitively.

use std::fmt;

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Unquoted run of characters (keyword, identifier, `*` or bare literal)
    Word(String),
    /// Contents of a single- or double-quoted string, quotes removed
    Quoted(String),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `=`
    Equal,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "'{}'", word),
            Token::Quoted(text) => write!(f, "string '{}'", text),
            Token::LeftParen => write!(f, "'('"),
            Token::RightParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Equal => write!(f, "'='"),
        }
    }
}

fn ends_word(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | ',' | '=' | ';' | '\'' | '"')
}

/// Tokenizes one statement (without its trailing `;`).
pub fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LeftParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RightParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Equal);
            }
            ';' => {
                return Err(format!(
                    "unexpected ';' at position {}: one statement per query",
                    start
                ));
            }
            '\'' | '"' => {
                let quote = c;
                chars.next();
                let body_start = start + quote.len_utf8();
                let mut body_end = None;
                for (i, ch) in chars.by_ref() {
                    if ch == quote {
                        body_end = Some(i);
                        break;
                    }
                }
                match body_end {
                    Some(end) => tokens.push(Token::Quoted(input[body_start..end].to_string())),
                    None => {
                        return Err(format!(
                            "unterminated string starting at position {}",
                            start
                        ))
                    }
                }
            }
            _ => {
                let mut end = input.len();
                while let Some(&(i, ch)) = chars.peek() {
                    if ends_word(ch) {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                tokens.push(Token::Word(input[start..end].to_string()));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    fn quoted(s: &str) -> Token {
        Token::Quoted(s.to_string())
    }

    #[test]
    fn test_select_with_where() {
        let tokens = tokenize("SELECT * FROM devices WHERE room = 'A101'").unwrap();
        assert_eq!(
            tokens,
            vec![
                word("SELECT"),
                word("*"),
                word("FROM"),
                word("devices"),
                word("WHERE"),
                word("room"),
                Token::Equal,
                quoted("A101"),
            ]
        );
    }

    #[test]
    fn test_punctuation_without_spaces() {
        let tokens = tokenize("INSERT INTO t(a,b)VALUES(1,'x y')").unwrap();
        assert_eq!(
            tokens,
            vec![
                word("INSERT"),
                word("INTO"),
                word("t"),
                Token::LeftParen,
                word("a"),
                Token::Comma,
                word("b"),
                Token::RightParen,
                word("VALUES"),
                Token::LeftParen,
                word("1"),
                Token::Comma,
                quoted("x y"),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_bare_literals_keep_dots_and_signs() {
        let tokens = tokenize("ip=192.168.1.10 n=-3.5").unwrap();
        assert_eq!(
            tokens,
            vec![
                word("ip"),
                Token::Equal,
                word("192.168.1.10"),
                word("n"),
                Token::Equal,
                word("-3.5"),
            ]
        );
    }

    #[test]
    fn test_quoted_strings_keep_special_characters() {
        let tokens = tokenize(r#"'a, (b) = c' "it's""#).unwrap();
        assert_eq!(tokens, vec![quoted("a, (b) = c"), quoted("it's")]);
    }

    #[test]
    fn test_empty_quoted_string() {
        assert_eq!(tokenize("''").unwrap(), vec![quoted("")]);
    }

    #[test]
    fn test_unicode_text() {
        let tokens = tokenize("name = 'Salle é' x=café").unwrap();
        assert_eq!(tokens[2], quoted("Salle é"));
        assert_eq!(tokens[5], word("café"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("name = 'oops").unwrap_err();
        assert!(err.contains("unterminated"));
    }

    #[test]
    fn test_embedded_semicolon_rejected() {
        assert!(tokenize("SELECT * FROM a; DELETE FROM a WHERE id=1").is_err());
    }
}
