use crate::expression::ast::{BinaryOp, Expr, Lit, UnaryOp};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

// Authored conditions are short; anything nested deeper than this is rejected rather than
// recursed into. Each binary operator in a chain counts as one level.
const MAX_DEPTH: usize = 64;

pub(crate) fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let tokens = lex(src.trim())?;
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = p.parse_conditional()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::new(self.span().start, "expression nests too deeply"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn parse_conditional(&mut self) -> Result<Expr, ExprError> {
        self.enter()?;
        let cond = self.parse_or()?;
        let e = if self.consume(TokenKind::Question) {
            let then = self.parse_conditional()?;
            self.expect(TokenKind::Colon)?;
            let otherwise = self.parse_conditional()?;
            Expr::Conditional {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            }
        } else {
            cond
        };
        self.leave();
        Ok(e)
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_and()?;
        let mark = self.depth;
        while self.consume(TokenKind::OrOr) {
            self.enter()?;
            let r = self.parse_and()?;
            e = binary(BinaryOp::Or, e, r);
        }
        self.depth = mark;
        Ok(e)
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_equality()?;
        let mark = self.depth;
        while self.consume(TokenKind::AndAnd) {
            self.enter()?;
            let r = self.parse_equality()?;
            e = binary(BinaryOp::And, e, r);
        }
        self.depth = mark;
        Ok(e)
    }

    fn parse_equality(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_comparison()?;
        let mark = self.depth;
        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinaryOp::LooseEq,
                TokenKind::Ne => BinaryOp::LooseNe,
                TokenKind::EqEqEq => BinaryOp::StrictEq,
                TokenKind::NeEq => BinaryOp::StrictNe,
                _ => break,
            };
            self.bump();
            self.enter()?;
            let r = self.parse_comparison()?;
            e = binary(op, e, r);
        }
        self.depth = mark;
        Ok(e)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_term()?;
        let mark = self.depth;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Le => BinaryOp::Le,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Ge => BinaryOp::Ge,
                _ => break,
            };
            self.bump();
            self.enter()?;
            let r = self.parse_term()?;
            e = binary(op, e, r);
        }
        self.depth = mark;
        Ok(e)
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_factor()?;
        let mark = self.depth;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.bump();
            self.enter()?;
            let r = self.parse_factor()?;
            e = binary(op, e, r);
        }
        self.depth = mark;
        Ok(e)
    }

    fn parse_factor(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_unary()?;
        let mark = self.depth;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.bump();
            self.enter()?;
            let r = self.parse_unary()?;
            e = binary(op, e, r);
        }
        self.depth = mark;
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        let op = match self.peek().kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix();
        };
        self.bump();
        self.enter()?;
        let e = self.parse_unary()?;
        self.leave();
        Ok(Expr::Unary {
            op,
            expr: Box::new(e),
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_primary()?;

        while self.consume(TokenKind::Dot) {
            let t = self.bump().clone();
            let name = match t.kind {
                TokenKind::Ident(s) => s,
                other => {
                    return Err(ExprError::new(
                        t.span.start,
                        format!("expected ident after '.', found {other:?}"),
                    ));
                }
            };
            e = append_path(e, name, t.span.start)?;
        }

        if self.peek().kind == TokenKind::LParen {
            return Err(ExprError::new(
                self.span().start,
                "function calls are not allowed in conditions",
            ));
        }

        Ok(e)
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Lit(Lit::Number(v))),
            TokenKind::Str(s) => Ok(Expr::Lit(Lit::Str(s))),
            TokenKind::True => Ok(Expr::Lit(Lit::Bool(true))),
            TokenKind::False => Ok(Expr::Lit(Lit::Bool(false))),
            TokenKind::Null => Ok(Expr::Lit(Lit::Null)),
            TokenKind::Undefined => Ok(Expr::Lit(Lit::Undefined)),
            TokenKind::Ident(s) => Ok(Expr::Path(vec![s])),
            TokenKind::LParen => {
                let e = self.parse_conditional()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn append_path(base: Expr, segment: String, offset: usize) -> Result<Expr, ExprError> {
    match base {
        Expr::Path(mut v) => {
            v.push(segment);
            Ok(Expr::Path(v))
        }
        _ => Err(ExprError::new(
            offset,
            "member access base must be an identifier path",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
