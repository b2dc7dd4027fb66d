//! Recursive-descent parser for expression and filter-chain source.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! chain    := expr ('|' filter)*
//! filter   := IDENT (':' expr (',' expr)*)?
//! expr     := or_expr
//! or_expr  := and_expr ('or' and_expr)*        left-assoc
//! and_expr := cmp_expr ('and' cmp_expr)*       left-assoc
//! cmp_expr := unary (CMPOP unary)?             non-assoc
//! unary    := 'not' unary | '-' unary | primary
//! primary  := LITERAL | varref | '(' expr ('..' expr)? ')'
//! varref   := IDENT ('.' IDENT | '[' expr ']')*
//! ```
//!
//! The parser owns a token cursor; evaluation state lives elsewhere.

use brine_value::Value;

use crate::ast::{BinaryOp, Expr, FilterCall, Segment, UnaryOp};
use crate::error::ParseError;
use crate::span::Span;
use crate::token::{lex, Token, TokenKind};

/// Parse a full expression or filter chain. The entire source must be
/// consumed; trailing tokens are an error.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
    };
    let expr = parser.chain()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

// Cursor primitives

impl Parser<'_> {
    /// Current token. The stream always ends with `Eof`, so the position
    /// never runs past the end.
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error_here(format!(
                "expected {what}, found {}",
                self.current().kind.describe()
            )))
        }
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        if self.check(&TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.error_here(format!(
                "unexpected {} after expression",
                self.current().kind.describe()
            )))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<(String, Span), ParseError> {
        let span = self.current_span();
        match &self.current().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok((name, span))
            }
            other => Err(self.error_here(format!("expected {what}, found {}", other.describe()))),
        }
    }

    #[cold]
    fn error_here(&self, message: String) -> ParseError {
        ParseError::at(self.source, self.current_span(), message)
    }
}

// Grammar productions

impl Parser<'_> {
    fn chain(&mut self) -> Result<Expr, ParseError> {
        let head = self.expr()?;
        if !self.check(&TokenKind::Pipe) {
            return Ok(head);
        }
        let mut filters = Vec::new();
        while self.eat(&TokenKind::Pipe) {
            filters.push(self.filter()?);
        }
        Ok(Expr::Chain(Box::new(head), filters))
    }

    fn filter(&mut self) -> Result<FilterCall, ParseError> {
        let (name, span) = self.expect_ident("filter name")?;
        let mut args = Vec::new();
        if self.eat(&TokenKind::Colon) {
            args.push(self.expr()?);
            while self.eat(&TokenKind::Comma) {
                args.push(self.expr()?);
            }
        }
        Ok(FilterCall { name, span, args })
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.and_expr()?;
        while self.eat(&TokenKind::Or) {
            let rhs = self.and_expr()?;
            lhs = Expr::Binary(BinaryOp::Or, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.cmp_expr()?;
        while self.eat(&TokenKind::And) {
            let rhs = self.cmp_expr()?;
            lhs = Expr::Binary(BinaryOp::And, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// Comparison is deliberately non-associative: `a < b < c` is a parse
    /// error, not a chained comparison.
    fn cmp_expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.unary()?;
        let op = match &self.current().kind {
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Contains => BinaryOp::Contains,
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.unary()?;
        Ok(Expr::Binary(op, Box::new(lhs), Box::new(rhs)))
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::Not) {
            let operand = self.unary()?;
            return Ok(Expr::Unary(UnaryOp::Not, Box::new(operand)));
        }
        if self.eat(&TokenKind::Minus) {
            let operand = self.unary()?;
            // Fold negated numeric literals so `-17` is a literal.
            return Ok(match operand {
                Expr::Literal(Value::Int(n)) => Expr::Literal(Value::Int(-n)),
                Expr::Literal(Value::Float(f)) => Expr::Literal(Value::Float(-f)),
                other => Expr::Unary(UnaryOp::Neg, Box::new(other)),
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Int(n) => {
                self.advance();
                Ok(Expr::Literal(Value::Int(n)))
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(Expr::Literal(Value::Float(f)))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr::Literal(Value::string(s)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(false)))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expr::Literal(Value::Nil))
            }
            TokenKind::Empty => {
                self.advance();
                Ok(Expr::Empty)
            }
            TokenKind::Blank => {
                self.advance();
                Ok(Expr::Blank)
            }
            TokenKind::LParen => self.paren_or_range(),
            TokenKind::Ident(_) => self.varref(),
            other => Err(self.error_here(format!(
                "expected an expression, found {}",
                other.describe()
            ))),
        }
    }

    /// `'(' expr ')'` grouping, or `'(' expr '..' expr ')'` range — both
    /// start the same way, so disambiguation happens after the first
    /// sub-expression.
    fn paren_or_range(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LParen, "'('")?;
        let first = self.expr()?;
        if self.eat(&TokenKind::DotDot) {
            let last = self.expr()?;
            self.expect(&TokenKind::RParen, "')' to close range")?;
            return Ok(Expr::Range(Box::new(first), Box::new(last)));
        }
        self.expect(&TokenKind::RParen, "')'")?;
        Ok(first)
    }

    fn varref(&mut self) -> Result<Expr, ParseError> {
        let (head, _) = self.expect_ident("variable name")?;
        let mut segments = vec![Segment::Name(head)];
        loop {
            if self.eat(&TokenKind::Dot) {
                let (name, _) = self.expect_ident("property name after '.'")?;
                segments.push(Segment::Name(name));
            } else if self.eat(&TokenKind::LBracket) {
                let index = self.expr()?;
                self.expect(&TokenKind::RBracket, "']' to close index")?;
                segments.push(Segment::Index(index));
            } else {
                break;
            }
        }
        Ok(Expr::Var(segments))
    }
}
