//! This module contains the conversion of an NFA to a DFA.
//! The DFA is generated from the NFA using the subset construction algorithm. Each DFA state
//! stands for an epsilon closed set of NFA states.
//! The DFA can be minimized by partition refinement afterwards.
//! Both results are ordinary automaton graphs without epsilon transitions, so they can be run
//! with the same simulation as the NFA.

use itertools::Itertools;
use log::{debug, trace};
use std::{collections::BTreeMap, time::Instant};

use crate::{
    closure::{epsilon_closure, epsilon_closure_of},
    graph::{AutomatonGraph, StateSet, Symbol},
    Result, StateID,
};

/// Convert the automaton into an equivalent deterministic automaton.
/// The start state of the result is state 0. Missing transitions lead to an implicit dead state.
/// An automaton without start state results in an empty automaton that accepts nothing.
pub fn determinize(nfa: &AutomatonGraph) -> Result<AutomatonGraph> {
    let now = Instant::now();
    let Some(start_state) = nfa.start() else {
        return Ok(AutomatonGraph::new());
    };

    let mut builder = DfaBuilder::new(nfa);
    // The initial state of the DFA is the epsilon closure of the start state of the NFA.
    let (initial_state, _) = builder.add_state_if_new(epsilon_closure_of(start_state, nfa))?;
    builder.dfa.set_start(initial_state)?;
    // The work list holds the DFA states whose transitions still have to be calculated.
    let mut work_list = vec![initial_state];

    while let Some(state_id) = work_list.pop() {
        let nfa_states = builder.nfa_states[state_id.as_usize()].clone();
        for c in nfa.alphabet() {
            let target_states = epsilon_closure(nfa.move_set(&nfa_states, *c), nfa);
            if target_states.is_empty() {
                continue;
            }
            let (target_state, is_new) = builder.add_state_if_new(target_states)?;
            builder
                .dfa
                .add_transition(state_id, Symbol::Char(*c), target_state)?;
            if is_new {
                work_list.push(target_state);
            }
        }
    }

    let dfa = builder.dfa;
    trace!(
        "Subset construction took {} milliseconds.",
        now.elapsed().as_millis()
    );
    debug!(
        "Determinized {} NFA states into {} DFA states",
        nfa.state_count(),
        dfa.state_count()
    );
    Ok(dfa)
}

/// Keeps track of the NFA state sets that have already become DFA states.
struct DfaBuilder<'a> {
    nfa: &'a AutomatonGraph,
    dfa: AutomatonGraph,
    // Maps a set of NFA states to the DFA state that represents it
    subsets: BTreeMap<StateSet, StateID>,
    // The NFA states of each DFA state, indexed by the DFA state id
    nfa_states: Vec<StateSet>,
}

impl<'a> DfaBuilder<'a> {
    fn new(nfa: &'a AutomatonGraph) -> Self {
        Self {
            nfa,
            dfa: AutomatonGraph::new(),
            subsets: BTreeMap::new(),
            nfa_states: Vec::new(),
        }
    }

    /// Add a state to the DFA if it does not already exist.
    /// The state is identified by the NFA states that constitute the DFA state.
    /// Returns the state and whether it was newly created.
    fn add_state_if_new(&mut self, nfa_states: StateSet) -> Result<(StateID, bool)> {
        if let Some(state_id) = self.subsets.get(&nfa_states) {
            return Ok((*state_id, false));
        }

        let state_id = self.dfa.create_state();
        debug_assert_eq!(state_id.as_usize(), self.nfa_states.len());
        trace!(
            "Add state {}: {{{}}}",
            state_id,
            nfa_states.iter().join(", ")
        );
        if self.nfa.contains_final(&nfa_states) {
            self.dfa.mark_final(state_id)?;
        }
        self.subsets.insert(nfa_states.clone(), state_id);
        self.nfa_states.push(nfa_states);
        Ok((state_id, true))
    }
}

/// Minimize a deterministic automaton.
/// Nondeterministic input is determinized first.
/// States are split into groups of equivalent states until no group can be split further. The
/// groups become the states of the result, numbered in the order of their smallest member.
pub fn minimize(dfa: &AutomatonGraph) -> Result<AutomatonGraph> {
    if dfa.is_nondeterministic() {
        return minimize(&determinize(dfa)?);
    }
    let Some(start_state) = dfa.start() else {
        return Ok(AutomatonGraph::new());
    };

    // The initial partition separates accepting from non-accepting states.
    let mut group_of: BTreeMap<StateID, usize> = dfa
        .states()
        .iter()
        .map(|state| (*state, usize::from(dfa.is_final(*state))))
        .collect();
    let mut group_count = 0;
    let groups = loop {
        // States stay in the same group if they were in the same group before and their
        // transitions lead to the same groups for every character.
        let groups = dfa
            .states()
            .iter()
            .copied()
            .into_group_map_by(|state| {
                let targets: Vec<Option<usize>> = dfa
                    .alphabet()
                    .iter()
                    .map(|c| {
                        target_of(dfa, *state, *c).and_then(|target| group_of.get(&target).copied())
                    })
                    .collect();
                (group_of[state], targets)
            })
            .into_values()
            .map(|mut group| {
                group.sort_unstable();
                group
            })
            .sorted_by_key(|group| group[0])
            .collect::<Vec<Vec<StateID>>>();

        for (index, group) in groups.iter().enumerate() {
            for state in group {
                group_of.insert(*state, index);
            }
        }
        trace!("Partition with {} groups", groups.len());
        // Groups are only ever split, an unchanged count means the partition is stable
        if groups.len() == group_count {
            break groups;
        }
        group_count = groups.len();
    };

    let mut minimized = AutomatonGraph::new();
    let new_states: Vec<StateID> = groups.iter().map(|_| minimized.create_state()).collect();
    for (group, new_state) in groups.iter().zip(new_states.iter()) {
        // All states of a group are equivalent, the first one represents the group.
        let representative = group[0];
        for c in dfa.alphabet() {
            if let Some(target) = target_of(dfa, representative, *c) {
                minimized.add_transition(
                    *new_state,
                    Symbol::Char(*c),
                    new_states[group_of[&target]],
                )?;
            }
        }
        if dfa.is_final(representative) {
            minimized.mark_final(*new_state)?;
        }
    }
    minimized.set_start(new_states[group_of[&start_state]])?;

    debug!(
        "Minimized {} DFA states into {} states",
        dfa.state_count(),
        minimized.state_count()
    );
    Ok(minimized)
}

// The single target of a deterministic transition.
fn target_of(dfa: &AutomatonGraph, state: StateID, c: char) -> Option<StateID> {
    dfa.targets(state, Symbol::Char(c))
        .and_then(|targets| targets.first().copied())
}
