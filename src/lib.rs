#![forbid(missing_docs)]
//! The `regex-nfa` crate compiles regular expressions into finite automata and tests whether an
//! automaton accepts a string.
//! The supported syntax consists of literal characters, concatenation, alternation (`|`), zero or
//! more (`*`), one or more (`+`) and grouping with parentheses. A backslash escapes the following
//! character.
//!
//! ```
//! let nfa = regex_nfa::compile("ab(c+)").unwrap();
//! assert!(regex_nfa::accepts(&nfa, "abccc"));
//! assert!(!regex_nfa::accepts(&nfa, "ab"));
//!
//! let dfa = regex_nfa::determinize(&nfa).unwrap();
//! assert!(dfa.accepts("abc"));
//! ```

/// Module with error definitions
mod errors;
pub use errors::{NfaError, NfaErrorKind, Result, SyntaxErrorReason};

/// Module that provides the id type for states.
mod ids;
pub use ids::StateID;

/// The graph module contains the data structure shared by NFA and DFA.
mod graph;
pub use graph::{AutomatonGraph, StateSet, Symbol};

/// Module with the epsilon closure calculation.
mod closure;
pub use closure::{epsilon_closure, epsilon_closure_of};

/// The thompson module contains the construction of automaton fragments per regex operator.
mod thompson;
pub use thompson::ThompsonBuilder;

/// The tokenizer of the regex syntax.
mod token;

/// The compiler module turns a regex pattern into an NFA.
mod compiler;
pub use compiler::compile;

/// Module with the simulation of an automaton on an input string.
mod simulator;
pub use simulator::accepts;

/// Module that provides the subset construction and the minimization.
mod dfa;
pub use dfa::{determinize, minimize};

/// Module with conversion to graphviz dot format
#[cfg(feature = "dot")]
mod dot;
#[cfg(feature = "dot")]
pub use dot::render_to;
