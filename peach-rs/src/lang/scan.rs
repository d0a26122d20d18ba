//! Peach scanner: turns input text into tokens one at a time.
//!
//! There is no whitespace and no lookahead beyond one character.  A run of
//! digits and `.` is a number, a letter is a variable (resolved to its value
//! on the spot), and anything else is looked up in the symbol table,
//! preferring the two-character spellings `<>`, `[]`, `~=`, `<=`, `>=`.

use super::error::TokenError;
use super::eval::EvalContext;
use super::token::{BinaryOp, Separator, Token, UnaryPostfixOp, UnaryPrefixOp};
use super::value::{is_numeric_char, parse_number};

/// Cursor over one input line.  Positions are character offsets.
pub struct Scanner {
    src: Vec<char>,
    pos: usize,
}

impl Scanner {
    pub fn new(src: &str) -> Self {
        Self::at(src, 0)
    }

    /// Start scanning `src` at character offset `pos`.
    pub fn at(src: &str, pos: usize) -> Self {
        Scanner {
            src: src.chars().collect(),
            pos,
        }
    }

    /// Offset of the next unscanned character.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn read_number(&mut self, first: char) -> Result<Token, TokenError> {
        let mut s = String::new();
        s.push(first);
        while let Some(c) = self.peek().filter(|&c| is_numeric_char(c)) {
            s.push(c);
            self.pos += 1;
        }
        match parse_number(&s) {
            Some(n) => Ok(Token::Number(n)),
            None => Err(TokenError::BadNumber(s)),
        }
    }

    fn read_symbol(&mut self, ch: char) -> Result<Token, TokenError> {
        use BinaryOp::*;
        let token = match ch {
            '(' => Token::Separator(Separator::Open),
            ')' => Token::Separator(Separator::Close),
            '!' => Token::Binary(Min),
            '@' => Token::Binary(Avg),
            '#' => Token::Binary(Max),
            '$' => Token::Binary(Disjunct),
            '%' => Token::Postfix(UnaryPostfixOp::GetOnePercent),
            '+' => Token::Binary(Add),
            '-' => Token::Binary(AbsDiff),
            '*' => Token::Binary(Multiply),
            '/' => Token::Binary(Divide),
            '^' => Token::Binary(Raise),
            '=' => Token::Binary(IsEqual),
            '<' => {
                if self.eat('>') {
                    Token::Prefix(UnaryPrefixOp::IsPossible)
                } else if self.eat('=') {
                    Token::Binary(IsLessOrEqual)
                } else {
                    Token::Binary(IsLess)
                }
            }
            '>' => {
                if self.eat('=') {
                    Token::Binary(IsMoreOrEqual)
                } else {
                    Token::Binary(IsMore)
                }
            }
            '~' => {
                if self.eat('=') {
                    Token::Binary(IsNotEqual)
                } else {
                    Token::Prefix(UnaryPrefixOp::Negate)
                }
            }
            '[' if self.eat(']') => Token::Prefix(UnaryPrefixOp::IsCertain),
            first => {
                return Err(TokenError::UnknownSymbol {
                    first,
                    next: self.peek(),
                })
            }
        };
        Ok(token)
    }

    /// Scan the next token, or `Ok(None)` at end of input.
    ///
    /// Variables are looked up in `ctx` immediately, so a variable reference
    /// comes back as a [`Token::Number`].
    pub fn next_token(&mut self, ctx: &dyn EvalContext) -> Result<Option<Token>, TokenError> {
        let ch = match self.advance() {
            None => return Ok(None),
            Some(c) => c,
        };

        let token = if is_numeric_char(ch) {
            self.read_number(ch)?
        } else if ch.is_alphabetic() {
            Token::Number(ctx.get_var(ch)?)
        } else {
            self.read_symbol(ch)?
        };
        Ok(Some(token))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
