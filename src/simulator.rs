//! This module contains the simulation of an automaton on an input string.
//! The simulation tracks the set of all states the automaton can be in after each character, so
//! no backtracking is needed and epsilon cycles do not cause endless recursion.

use log::trace;

use crate::{closure::epsilon_closure, graph::AutomatonGraph};

/// Test whether the automaton accepts the whole input.
/// A graph without start state accepts nothing.
/// The graph is not modified, so a compiled automaton can be shared between threads.
pub fn accepts(graph: &AutomatonGraph, input: &str) -> bool {
    let Some(start_state) = graph.start() else {
        return false;
    };
    let mut current_states = epsilon_closure([start_state], graph);
    for (index, c) in input.chars().enumerate() {
        let next_states = epsilon_closure(graph.move_set(&current_states, c), graph);
        if next_states.is_empty() {
            trace!("No transition on '{}' at position {}", c.escape_default(), index);
            return false;
        }
        current_states = next_states;
    }
    graph.contains_final(&current_states)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // A data type that provides test data for the acceptance tests.
    struct TestData {
        pattern: &'static str,
        accepted: &'static [&'static str],
        rejected: &'static [&'static str],
    }

    const TEST_DATA: &[TestData] = &[
        TestData {
            pattern: "a",
            accepted: &["a"],
            rejected: &["b", "", "aa"],
        },
        TestData {
            pattern: "a|b",
            accepted: &["a", "b"],
            rejected: &["c", "", "ab"],
        },
        TestData {
            pattern: "a*",
            accepted: &["", "a", "aaaa"],
            rejected: &["ab", "b"],
        },
        TestData {
            pattern: "a+",
            accepted: &["a", "aaa"],
            rejected: &["", "b", "aab"],
        },
        TestData {
            pattern: "ab(c+)",
            accepted: &["abc", "abcccc"],
            rejected: &["ab", "abcd", "bc"],
        },
        TestData {
            pattern: "(a|b)*abb",
            accepted: &["abb", "aabb", "babb", "abababb"],
            rejected: &["", "ab", "abba", "bbb"],
        },
        TestData {
            pattern: "(a*)*",
            accepted: &["", "a", "aaa"],
            rejected: &["b"],
        },
        TestData {
            pattern: "(a+|b*)+c",
            accepted: &["c", "ac", "bbc", "abac"],
            rejected: &["", "a", "cc"],
        },
        TestData {
            pattern: "x.y",
            accepted: &["x.y"],
            rejected: &["xzy", "xy"],
        },
    ];

    #[test]
    fn test_accepts() {
        init();
        for data in TEST_DATA {
            let nfa = compile(data.pattern).unwrap();
            for input in data.accepted {
                assert!(
                    accepts(&nfa, input),
                    "'{}' should accept '{}'",
                    data.pattern,
                    input
                );
            }
            for input in data.rejected {
                assert!(
                    !accepts(&nfa, input),
                    "'{}' should reject '{}'",
                    data.pattern,
                    input
                );
            }
        }
    }

    #[test]
    fn test_compiling_twice_accepts_the_same_language() {
        init();
        let inputs = ["", "a", "ab", "abb", "babb", "bbabb", "abab"];
        for data in TEST_DATA {
            let first = compile(data.pattern).unwrap();
            let second = compile(data.pattern).unwrap();
            for input in inputs {
                assert_eq!(accepts(&first, input), accepts(&second, input));
            }
        }
    }

    #[test]
    fn test_graph_without_start_accepts_nothing() {
        let mut graph = AutomatonGraph::new();
        let state = graph.create_state();
        graph.mark_final(state).unwrap();
        assert!(!accepts(&graph, ""));
        assert!(!graph.accepts("a"));
    }

    #[test]
    fn test_shared_between_threads() {
        init();
        let nfa = std::sync::Arc::new(compile("(a|b)*abb").unwrap());
        let handles: Vec<_> = ["abb", "ab", "babb", "bba"]
            .into_iter()
            .map(|input| {
                let nfa = nfa.clone();
                std::thread::spawn(move || (input, nfa.accepts(input)))
            })
            .collect();
        for handle in handles {
            let (input, accepted) = handle.join().unwrap();
            assert_eq!(accepted, input.ends_with("abb"));
        }
    }
}
