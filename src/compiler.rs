//! This module contains the regex compiler.
//! The compiler resolves operator precedence with the shunting-yard algorithm and drives the
//! Thompson construction in postfix order, so no syntax tree is materialized.

use log::{debug, trace};
use std::time::Instant;

use crate::{
    errors::{syntax_error, SyntaxErrorReason},
    graph::AutomatonGraph,
    thompson::ThompsonBuilder,
    token::{tokenize, PositionedToken, Token},
    Result,
};

/// Compile the regex pattern into an NFA.
/// The function returns an error if the pattern is malformed.
/// # Arguments
/// * `pattern` - A string slice that holds the regex.
/// # Returns
/// The automaton that accepts exactly the strings matched by the pattern.
/// # Errors
/// A syntax error is returned for an empty pattern, unbalanced parentheses, an operator without
/// operand or a dangling escape.
pub fn compile(pattern: &str) -> Result<AutomatonGraph> {
    let now = Instant::now();
    if pattern.is_empty() {
        return Err(syntax_error!(SyntaxErrorReason::EmptyPattern, 0));
    }

    let mut compiler = RegexCompiler::new();
    for token in tokenize(pattern)? {
        compiler.process(token)?;
    }
    let nfa = compiler.finish(pattern.chars().count())?;

    let elapsed_time = now.elapsed();
    trace!(
        "Compilation took {} milliseconds.",
        elapsed_time.as_millis()
    );
    debug!(
        "Compiled '{}' into {} states and {} transitions",
        pattern.escape_default(),
        nfa.state_count(),
        nfa.transition_count()
    );
    Ok(nfa)
}

/// The state of one compilation: the operator stack and the stack of automaton fragments.
#[derive(Debug, Default)]
struct RegexCompiler {
    builder: ThompsonBuilder,
    operators: Vec<PositionedToken>,
    operands: Vec<AutomatonGraph>,
}

impl RegexCompiler {
    fn new() -> Self {
        Self::default()
    }

    fn process(&mut self, token: PositionedToken) -> Result<()> {
        match token.token {
            Token::Literal(c) => {
                let fragment = self.builder.literal(c)?;
                self.operands.push(fragment);
            }
            Token::GroupOpen => self.operators.push(token),
            Token::GroupClose => loop {
                match self.operators.pop() {
                    // A `)` right after its `(` encloses nothing
                    Some(PositionedToken {
                        token: Token::GroupOpen,
                        position,
                    }) if position + 1 == token.position => {
                        return Err(syntax_error!(SyntaxErrorReason::EmptyGroup, position))
                    }
                    Some(PositionedToken {
                        token: Token::GroupOpen,
                        ..
                    }) => break,
                    Some(operator) => self.apply(operator)?,
                    None => {
                        return Err(syntax_error!(
                            SyntaxErrorReason::UnmatchedCloseParen,
                            token.position
                        ))
                    }
                }
            },
            Token::Concat | Token::Union | Token::Star | Token::Plus => {
                while let Some(top) = self.operators.last().copied() {
                    if top.token == Token::GroupOpen
                        || top.token.precedence() < token.token.precedence()
                    {
                        break;
                    }
                    self.operators.pop();
                    self.apply(top)?;
                }
                self.operators.push(token);
            }
        }
        Ok(())
    }

    /// Apply all pending operators and return the single remaining fragment.
    fn finish(mut self, end_position: usize) -> Result<AutomatonGraph> {
        while let Some(operator) = self.operators.pop() {
            if operator.token == Token::GroupOpen {
                return Err(syntax_error!(
                    SyntaxErrorReason::UnmatchedOpenParen,
                    operator.position
                ));
            }
            self.apply(operator)?;
        }
        match (self.operands.pop(), self.operands.is_empty()) {
            (Some(nfa), true) => Ok(nfa),
            _ => Err(syntax_error!(
                SyntaxErrorReason::MalformedExpression,
                end_position
            )),
        }
    }

    fn pop_operand(&mut self, operator: &PositionedToken) -> Result<AutomatonGraph> {
        self.operands.pop().ok_or_else(|| {
            let reason = match operator.token.as_char() {
                Some(c) => SyntaxErrorReason::MissingOperand(c),
                None => SyntaxErrorReason::MissingConcatenationOperand,
            };
            syntax_error!(reason, operator.position)
        })
    }

    /// Pop the operands of the operator, build the new fragment and push it.
    fn apply(&mut self, operator: PositionedToken) -> Result<()> {
        trace!(
            "Apply {:?} at position {}",
            operator.token,
            operator.position
        );
        let fragment = match operator.token {
            Token::Star => {
                let inner = self.pop_operand(&operator)?;
                self.builder.star(inner)?
            }
            Token::Plus => {
                let inner = self.pop_operand(&operator)?;
                self.builder.plus(inner)?
            }
            Token::Concat => {
                let right = self.pop_operand(&operator)?;
                let left = self.pop_operand(&operator)?;
                self.builder.concat(left, right)?
            }
            Token::Union => {
                let right = self.pop_operand(&operator)?;
                let left = self.pop_operand(&operator)?;
                self.builder.union(left, right)?
            }
            Token::Literal(_) | Token::GroupOpen | Token::GroupClose => {
                return Err(syntax_error!(
                    SyntaxErrorReason::MalformedExpression,
                    operator.position
                ))
            }
        };
        self.operands.push(fragment);
        Ok(())
    }
}
