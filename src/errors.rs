use thiserror::Error;

use crate::StateID;

/// The result type for the `regex-nfa` crate.
pub type Result<T> = std::result::Result<T, NfaError>;

/// A macro that constructs a new NfaError::SyntaxError variant.
macro_rules! syntax_error {
    ($reason:expr, $position:expr) => {
        $crate::errors::NfaError::new($crate::errors::NfaErrorKind::SyntaxError {
            reason: $reason,
            position: $position,
        })
    };
}
pub(crate) use syntax_error;

/// The error type for the `regex-nfa` crate.
#[derive(Error, Debug)]
pub struct NfaError {
    /// The source of the error.
    pub source: Box<NfaErrorKind>,
}

impl NfaError {
    /// Create a new `NfaError`.
    pub fn new(kind: NfaErrorKind) -> Self {
        NfaError {
            source: Box::new(kind),
        }
    }

    /// Returns true if the error was caused by a malformed pattern.
    pub fn is_syntax_error(&self) -> bool {
        matches!(*self.source, NfaErrorKind::SyntaxError { .. })
    }

    /// The character position of a syntax error, if this is one.
    pub fn position(&self) -> Option<usize> {
        match *self.source {
            NfaErrorKind::SyntaxError { position, .. } => Some(position),
            NfaErrorKind::UnknownState(_)
            | NfaErrorKind::StateCollision(_)
            | NfaErrorKind::MissingStartState => None,
        }
    }
}

impl std::fmt::Display for NfaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum NfaErrorKind {
    /// The pattern is not a well formed regular expression.
    #[error("Malformed regular expression at position {position}: {reason}")]
    SyntaxError {
        /// What went wrong.
        reason: SyntaxErrorReason,
        /// The character index in the pattern where the problem was detected.
        position: usize,
    },

    /// A transition, start or final state referred to a state that is not part of the graph.
    /// This is an internal error and indicates a bug in the automaton construction.
    #[error("Unknown state {0}")]
    UnknownState(StateID),

    /// Two merged graphs contain the same state.
    /// Happens when fragments of different builders or copies of one fragment are combined.
    #[error("State {0} is part of both merged graphs")]
    StateCollision(StateID),

    /// An automaton fragment was combined before its start state was set.
    /// This is an internal error as well.
    #[error("Automaton fragment without start state")]
    MissingStartState,
}

/// The reasons for a syntax error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorReason {
    /// The pattern is empty.
    #[error("empty pattern")]
    EmptyPattern,

    /// A `(` has no matching `)`.
    #[error("unclosed group")]
    UnmatchedOpenParen,

    /// A `)` has no matching `(`.
    #[error("unopened group")]
    UnmatchedCloseParen,

    /// An operator lacks one of its operands.
    #[error("operator '{0}' is missing an operand")]
    MissingOperand(char),

    /// The implicit concatenation lacks one of its operands.
    #[error("concatenation is missing an operand")]
    MissingConcatenationOperand,

    /// A group contains nothing.
    #[error("empty group")]
    EmptyGroup,

    /// The pattern ends with an escape character.
    #[error("dangling escape")]
    DanglingEscape,

    /// The operands could not be reduced to a single automaton.
    #[error("malformed regular expression")]
    MalformedExpression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let error = syntax_error!(SyntaxErrorReason::MissingOperand('*'), 0);
        assert!(error.is_syntax_error());
        assert_eq!(error.position(), Some(0));
        assert_eq!(
            error.to_string(),
            "Malformed regular expression at position 0: operator '*' is missing an operand"
        );
    }

    #[test]
    fn test_unknown_state_display() {
        let error = NfaError::new(NfaErrorKind::UnknownState(StateID::new(7)));
        assert!(!error.is_syntax_error());
        assert_eq!(error.position(), None);
        assert_eq!(error.to_string(), "Unknown state 7");
    }

    #[test]
    fn test_state_collision_display() {
        let error = NfaError::new(NfaErrorKind::StateCollision(StateID::new(0)));
        assert!(!error.is_syntax_error());
        assert_eq!(error.position(), None);
        assert_eq!(error.to_string(), "State 0 is part of both merged graphs");
    }
}
