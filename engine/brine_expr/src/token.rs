//! Expression tokenizer built on logos.
//!
//! A raw logos pass classifies the source; [`lex`] cooks the raw tokens into
//! [`Token`]s with parsed payloads (numbers, unquoted strings) and spans.
//! Malformed input surfaces as a [`ParseError`] immediately — there is no
//! error-token recovery because an expression is a single directive, not a
//! file.

use logos::Logos;

use crate::error::ParseError;
use crate::span::Span;

/// Raw token classes from logos, before payload parsing.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("|")]
    Pipe,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("-")]
    Minus,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,

    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("contains")]
    Contains,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("nil")]
    Nil,
    #[token("null")]
    Null,
    #[token("empty")]
    Empty,
    #[token("blank")]
    Blank,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    #[regex(r"[0-9]+")]
    Int,
    // String contents are opaque bytes; no escapes, no interpolation.
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,
    #[regex(r"'[^']*'")]
    SingleQuoted,
}

/// Cooked token kind with payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Pipe,
    Colon,
    Comma,
    Dot,
    DotDot,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Minus,

    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    And,
    Or,
    Not,
    Contains,

    True,
    False,
    Nil,
    Empty,
    Blank,

    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),

    Eof,
}

impl TokenKind {
    /// Human-readable token description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Int(n) => format!("number {n}"),
            TokenKind::Float(f) => format!("number {f}"),
            TokenKind::Str(s) => format!("string {s:?}"),
            TokenKind::Eof => "end of expression".to_string(),
            other => format!("'{}'", other.literal()),
        }
    }

    fn literal(&self) -> &'static str {
        match self {
            TokenKind::Pipe => "|",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Minus => "-",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Contains => "contains",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::Empty => "empty",
            TokenKind::Blank => "blank",
            _ => "",
        }
    }
}

/// A token with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Lex expression source into tokens, ending with an `Eof` token.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let slice = lexer.slice();
        let raw = result
            .map_err(|()| ParseError::at(source, span, format!("unexpected character {slice:?}")))?;
        let kind = cook(raw, slice, source, span)?;
        tokens.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
    Ok(tokens)
}

fn cook(raw: RawToken, slice: &str, source: &str, span: Span) -> Result<TokenKind, ParseError> {
    let kind = match raw {
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::Minus => TokenKind::Minus,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,
        RawToken::Contains => TokenKind::Contains,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Nil | RawToken::Null => TokenKind::Nil,
        RawToken::Empty => TokenKind::Empty,
        RawToken::Blank => TokenKind::Blank,
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
        RawToken::Int => match slice.parse::<i64>() {
            Ok(n) => TokenKind::Int(n),
            Err(_) => {
                return Err(ParseError::at(
                    source,
                    span,
                    format!("integer literal {slice} out of range"),
                ))
            }
        },
        RawToken::Float => match slice.parse::<f64>() {
            Ok(f) => TokenKind::Float(f),
            Err(_) => {
                return Err(ParseError::at(
                    source,
                    span,
                    format!("malformed number {slice}"),
                ))
            }
        },
        RawToken::DoubleQuoted | RawToken::SingleQuoted => {
            TokenKind::Str(slice[1..slice.len() - 1].to_string())
        }
    };
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_filter_chain() {
        assert_eq!(
            kinds(r#"fruits | join: ", ""#),
            vec![
                TokenKind::Ident("fruits".into()),
                TokenKind::Pipe,
                TokenKind::Ident("join".into()),
                TokenKind::Colon,
                TokenKind::Str(", ".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(
            kinds("183.357 12"),
            vec![
                TokenKind::Float(183.357),
                TokenKind::Int(12),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lex_negative_is_minus_then_int() {
        assert_eq!(
            kinds("-17"),
            vec![TokenKind::Minus, TokenKind::Int(17), TokenKind::Eof]
        );
    }

    #[test]
    fn test_lex_range_punctuation() {
        assert_eq!(
            kinds("(1..5)"),
            vec![
                TokenKind::LParen,
                TokenKind::Int(1),
                TokenKind::DotDot,
                TokenKind::Int(5),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_keywords_vs_identifiers() {
        assert_eq!(
            kinds("a contains containsx"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Contains,
                TokenKind::Ident("containsx".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_null_aliases_nil() {
        assert_eq!(kinds("null"), vec![TokenKind::Nil, TokenKind::Eof]);
    }

    #[test]
    fn test_lex_single_quoted_preserves_bytes() {
        assert_eq!(
            kinds(r"'a \t b'"),
            vec![TokenKind::Str(r"a \t b".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_lex_rejects_garbage() {
        let err = lex("a @ b").unwrap_err();
        assert_eq!((err.line, err.column), (1, 3));
    }

    #[test]
    fn test_lex_unterminated_string() {
        assert!(lex(r#""abc"#).is_err());
    }
}
