//! This module contains the tokenizer for the regex syntax.
//! The tokenizer classifies every character of the pattern and makes the implicit concatenation
//! of the surface syntax explicit.

use crate::{
    errors::{syntax_error, SyntaxErrorReason},
    Result,
};

/// The character that escapes the following character.
pub(crate) const ESCAPE: char = '\\';

/// A token of the regex syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(char),
    Concat,
    Union,
    Star,
    Plus,
    GroupOpen,
    GroupClose,
}

impl Token {
    /// The binding strength of an operator. Higher binds tighter.
    /// `(` has the lowest precedence until it is matched by `)`.
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Token::Star | Token::Plus => 3,
            Token::Concat => 2,
            Token::Union => 1,
            Token::GroupOpen | Token::GroupClose | Token::Literal(_) => 0,
        }
    }

    /// The character this token was written as.
    /// The implicit concatenation has no character in the pattern.
    pub(crate) fn as_char(&self) -> Option<char> {
        match self {
            Token::Literal(c) => Some(*c),
            Token::Concat => None,
            Token::Union => Some('|'),
            Token::Star => Some('*'),
            Token::Plus => Some('+'),
            Token::GroupOpen => Some('('),
            Token::GroupClose => Some(')'),
        }
    }

    // Tokens after which an operand ends
    fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Literal(_) | Token::GroupClose | Token::Star | Token::Plus
        )
    }

    // Tokens with which an operand begins
    fn begins_operand(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::GroupOpen)
    }
}

/// A token together with the character position it was found at.
/// Inserted concatenation operators get the position of the token that follows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PositionedToken {
    pub(crate) token: Token,
    pub(crate) position: usize,
}

/// Split the pattern into tokens and insert explicit concatenation operators.
pub(crate) fn tokenize(pattern: &str) -> Result<Vec<PositionedToken>> {
    let mut tokens: Vec<PositionedToken> = Vec::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().enumerate();
    while let Some((position, c)) = chars.next() {
        let token = match c {
            '(' => Token::GroupOpen,
            ')' => Token::GroupClose,
            '|' => Token::Union,
            '*' => Token::Star,
            '+' => Token::Plus,
            ESCAPE => match chars.next() {
                Some((_, escaped)) => Token::Literal(escaped),
                None => return Err(syntax_error!(SyntaxErrorReason::DanglingEscape, position)),
            },
            _ => Token::Literal(c),
        };
        if let Some(previous) = tokens.last() {
            if previous.token.ends_operand() && token.begins_operand() {
                tokens.push(PositionedToken {
                    token: Token::Concat,
                    position,
                });
            }
        }
        tokens.push(PositionedToken { token, position });
    }
    Ok(tokens)
}
