//! Epsilon closure over an automaton graph.

use crate::{
    graph::{AutomatonGraph, StateSet, Symbol},
    StateID,
};

/// Calculate the epsilon closure of the given states.
/// The result is the smallest superset of `states` that is closed under epsilon transitions.
/// The traversal uses an explicit work list and stops at already visited states, so epsilon
/// cycles introduced by `*` and `+` are handled.
pub fn epsilon_closure<I>(states: I, graph: &AutomatonGraph) -> StateSet
where
    I: IntoIterator<Item = StateID>,
{
    let mut closure = StateSet::new();
    let mut work_list: Vec<StateID> = Vec::new();
    for state in states {
        if closure.insert(state) {
            work_list.push(state);
        }
    }
    while let Some(state) = work_list.pop() {
        if let Some(targets) = graph.targets(state, Symbol::Epsilon) {
            for target in targets {
                if closure.insert(*target) {
                    work_list.push(*target);
                }
            }
        }
    }
    closure
}

/// The epsilon closure of a single state.
pub fn epsilon_closure_of(state: StateID, graph: &AutomatonGraph) -> StateSet {
    epsilon_closure(std::iter::once(state), graph)
}
