//! The reduction stack.
//!
//! Tokens are appended one at a time.  Each append checks that the token may
//! follow the current top of the stack and then collapses everything that has
//! become reducible, so between appends the stack never holds a prefix
//! operator followed by a number, a `number op number` triple, or a
//! parenthesised lone number.  A complete, valid expression therefore ends as
//! exactly one [`Token::Number`].
//!
//! | Incoming | Legal after | On append |
//! |----------|-------------|-----------|
//! | prefix op, `(` | nothing, prefix op, binary op, `(` | push |
//! | number | nothing, `(`, prefix op, binary op | collapse into pending operators |
//! | postfix op | number | apply to the number, then collapse |
//! | binary op | number | push |
//! | `)` | `(` number | drop the parentheses, then collapse |
//!
//! A failed append leaves the stack exactly as it was before the token.

use rust_decimal::Decimal;
use tracing::trace;

use super::error::TokenError;
use super::ops;
use super::token::{render, BinaryOp, Separator, Token, UnaryPostfixOp};

#[derive(Debug, Default, Clone)]
pub struct Reducer {
    stack: Vec<Token>,
}

impl Reducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current stack, bottom first.
    pub fn tokens(&self) -> &[Token] {
        &self.stack
    }

    /// The stack rendered the way error messages show it.
    pub fn residue(&self) -> String {
        render(&self.stack)
    }

    /// Append one token and collapse.
    pub fn push(&mut self, token: Token) -> Result<(), TokenError> {
        trace!(%token, stack = %self.residue(), "append");
        match token {
            Token::Number(n) => self.push_number(n),
            Token::Prefix(_) | Token::Separator(Separator::Open) => self.push_opener(token),
            Token::Postfix(op) => self.push_postfix(op),
            Token::Binary(op) => self.push_binary(op),
            Token::Separator(Separator::Close) => self.push_close(),
        }
    }

    /// The final value, if the stack has collapsed to a single number.
    pub fn result(&self) -> Option<Decimal> {
        match self.stack.as_slice() {
            [Token::Number(n)] => Some(*n),
            _ => None,
        }
    }

    fn push_opener(&mut self, token: Token) -> Result<(), TokenError> {
        match self.stack.last() {
            None | Some(Token::Prefix(_) | Token::Binary(_) | Token::Separator(Separator::Open)) => {
                self.stack.push(token);
                Ok(())
            }
            Some(&prior) => Err(TokenError::Misplaced { token, prior }),
        }
    }

    fn push_binary(&mut self, op: BinaryOp) -> Result<(), TokenError> {
        match self.stack.last() {
            None => Err(TokenError::BinaryFirst(op)),
            Some(Token::Number(_)) => {
                self.stack.push(Token::Binary(op));
                Ok(())
            }
            Some(&prior) => Err(TokenError::BinaryAfterNonNumeric { op, prior }),
        }
    }

    fn push_postfix(&mut self, op: UnaryPostfixOp) -> Result<(), TokenError> {
        let x = match self.stack.last() {
            None => return Err(TokenError::PostfixFirst(op)),
            Some(Token::Number(x)) => *x,
            Some(&prior) => return Err(TokenError::PostfixAfterNonNumeric { op, prior }),
        };
        let value = ops::eval_postfix(op, x)?;
        let mut undo = Vec::new();
        undo.extend(self.stack.pop());
        self.settle(value, undo)
    }

    fn push_close(&mut self) -> Result<(), TokenError> {
        let (prior, number) = match self.stack.as_slice() {
            [] => return Err(TokenError::CloseFirst),
            [.., prior @ (Token::Separator(_) | Token::Prefix(_) | Token::Postfix(_) | Token::Binary(_))] => {
                return Err(TokenError::CloseAfterNonNumeric(*prior))
            }
            [Token::Number(n)] => return Err(TokenError::CloseSecond(*n)),
            [.., prior, Token::Number(n)] => (*prior, *n),
        };
        if prior != Token::OPEN {
            return Err(TokenError::CloseWithoutOpen { prior, number });
        }
        let mut undo = Vec::new();
        undo.extend(self.stack.pop());
        undo.extend(self.stack.pop());
        self.settle(number, undo)
    }

    fn push_number(&mut self, n: Decimal) -> Result<(), TokenError> {
        self.settle(n, Vec::new())
    }

    /// Push `value`, applying every pending operator it completes.
    ///
    /// `undo` holds tokens already popped for this append, most recent last;
    /// on failure they are restored so the stack is unchanged.
    fn settle(&mut self, mut value: Decimal, mut undo: Vec<Token>) -> Result<(), TokenError> {
        loop {
            let step = match self.stack.last() {
                None | Some(Token::Separator(Separator::Open)) => {
                    self.stack.push(Token::Number(value));
                    return Ok(());
                }
                Some(&Token::Prefix(op)) => ops::eval_prefix(op, value)
                    .map(|v| (v, 1))
                    .map_err(TokenError::from),
                Some(&Token::Binary(op)) => {
                    let lhs = match self.stack.iter().rev().nth(1) {
                        Some(Token::Number(x)) => *x,
                        _ => unreachable!("binary operator {op} without a left operand"),
                    };
                    ops::eval_binary(op, lhs, value)
                        .map(|v| (v, 2))
                        .map_err(TokenError::from)
                }
                Some(&prior) => Err(TokenError::NumberAfter { number: value, prior }),
            };
            match step {
                Ok((collapsed, consumed)) => {
                    for _ in 0..consumed {
                        undo.extend(self.stack.pop());
                    }
                    trace!(%collapsed, stack = %self.residue(), "collapse");
                    value = collapsed;
                }
                Err(e) => {
                    self.stack.extend(undo.into_iter().rev());
                    return Err(e);
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
