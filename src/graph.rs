//! This module contains the automaton graph.
//! The graph stores states and transitions in an index based adjacency structure keyed by
//! (state, symbol). It is used for the NFA built from a regex as well as for the DFA obtained by
//! subset construction.

use std::collections::{BTreeMap, BTreeSet};

use crate::{NfaError, NfaErrorKind, Result, StateID};

/// A set of states.
/// An ordered set is used so that sets of states can serve as keys during subset construction.
pub type StateSet = BTreeSet<StateID>;

/// The symbol a transition is labeled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A transition that is taken without consuming input.
    Epsilon,
    /// A transition that consumes exactly this character.
    Char(char),
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{}", c.escape_default()),
        }
    }
}

/// A finite automaton as a graph of states and labeled transitions.
///
/// States are allocated through [`AutomatonGraph::create_state`] and are never reused.
/// Every state referenced by a transition, the start state or the final states has to be known to
/// the graph.
#[derive(Debug, Clone, Default)]
pub struct AutomatonGraph {
    // All states of the graph
    states: StateSet,
    // The id handed out by the next call to create_state
    next_state: StateID,
    transitions: BTreeMap<(StateID, Symbol), StateSet>,
    start_state: Option<StateID>,
    final_states: StateSet,
    // The characters used on non-epsilon transitions
    alphabet: BTreeSet<char>,
}

impl AutomatonGraph {
    /// Create a new empty graph whose first state will get id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty graph whose first state will get the given id.
    /// Used to hand out disjoint id ranges to the fragments of one compilation.
    pub(crate) fn starting_at(first_state: StateID) -> Self {
        Self {
            next_state: first_state,
            ..Default::default()
        }
    }

    /// Allocate a fresh state.
    pub fn create_state(&mut self) -> StateID {
        let state = self.next_state;
        self.next_state += 1;
        self.states.insert(state);
        state
    }

    /// The id that the next allocated state will get.
    pub(crate) fn next_state(&self) -> StateID {
        self.next_state
    }

    fn check_state(&self, state: StateID) -> Result<()> {
        if self.states.contains(&state) {
            Ok(())
        } else {
            Err(NfaError::new(NfaErrorKind::UnknownState(state)))
        }
    }

    /// Add a transition. Adding the same transition twice has no effect.
    pub fn add_transition(&mut self, from: StateID, symbol: Symbol, to: StateID) -> Result<()> {
        self.check_state(from)?;
        self.check_state(to)?;
        if let Symbol::Char(c) = symbol {
            self.alphabet.insert(c);
        }
        self.transitions.entry((from, symbol)).or_default().insert(to);
        Ok(())
    }

    /// Convenience function to add an epsilon transition.
    pub fn add_epsilon_transition(&mut self, from: StateID, to: StateID) -> Result<()> {
        self.add_transition(from, Symbol::Epsilon, to)
    }

    /// Set the start state. A later call overwrites the previous start state.
    pub fn set_start(&mut self, state: StateID) -> Result<()> {
        self.check_state(state)?;
        self.start_state = Some(state);
        Ok(())
    }

    /// Add the state to the accepting states.
    pub fn mark_final(&mut self, state: StateID) -> Result<()> {
        self.check_state(state)?;
        self.final_states.insert(state);
        Ok(())
    }

    /// Add all given states to the accepting states.
    pub fn mark_finals<I>(&mut self, states: I) -> Result<()>
    where
        I: IntoIterator<Item = StateID>,
    {
        for state in states {
            self.mark_final(state)?;
        }
        Ok(())
    }

    /// The target states of all transitions from `state` labeled with `symbol`.
    /// Returns an empty set if there are none, also for unknown states.
    pub fn transitions_from(&self, state: StateID, symbol: Symbol) -> StateSet {
        self.targets(state, symbol).cloned().unwrap_or_default()
    }

    /// Like `transitions_from` but without cloning the target set.
    pub(crate) fn targets(&self, state: StateID, symbol: Symbol) -> Option<&StateSet> {
        self.transitions.get(&(state, symbol))
    }

    /// The union of the targets of all transitions labeled with `c` from any of the given states.
    pub fn move_set<'a, I>(&self, states: I, c: char) -> StateSet
    where
        I: IntoIterator<Item = &'a StateID>,
    {
        states
            .into_iter()
            .filter_map(|state| self.targets(*state, Symbol::Char(c)))
            .flatten()
            .copied()
            .collect()
    }

    /// Copy all states and transitions of the given graph into this graph under the same ids.
    /// The start state and the final states of `other` are not taken over.
    /// Fails without changing this graph if both graphs contain the same state id.
    pub fn merge(&mut self, other: AutomatonGraph) -> Result<()> {
        if let Some(state) = self.states.intersection(&other.states).next() {
            return Err(NfaError::new(NfaErrorKind::StateCollision(*state)));
        }
        let AutomatonGraph {
            states,
            next_state,
            transitions,
            start_state: _,
            final_states: _,
            alphabet,
        } = other;
        self.states.extend(states);
        self.next_state = self.next_state.max(next_state);
        for (key, targets) in transitions {
            self.transitions.entry(key).or_default().extend(targets);
        }
        self.alphabet.extend(alphabet);
        Ok(())
    }

    /// The start state, if it has been set.
    pub fn start(&self) -> Option<StateID> {
        self.start_state
    }

    /// The accepting states.
    pub fn finals(&self) -> &StateSet {
        &self.final_states
    }

    /// Returns true if the state is an accepting state.
    pub fn is_final(&self, state: StateID) -> bool {
        self.final_states.contains(&state)
    }

    /// Returns true if any of the given states is an accepting state.
    pub fn contains_final<'a, I>(&self, states: I) -> bool
    where
        I: IntoIterator<Item = &'a StateID>,
    {
        states.into_iter().any(|state| self.is_final(*state))
    }

    /// All states of the graph in ascending order.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// The number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// The number of transitions, counting each (from, symbol, to) triple once.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(|targets| targets.len()).sum()
    }

    /// The characters used on the transitions of the graph.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Iterate over all transitions as (from, symbol, to) triples, ordered by source state.
    pub fn transitions(&self) -> impl Iterator<Item = (StateID, Symbol, StateID)> + '_ {
        self.transitions
            .iter()
            .flat_map(|((from, symbol), targets)| {
                targets.iter().map(move |to| (*from, *symbol, *to))
            })
    }

    /// Returns true if the graph has epsilon transitions or more than one target for any
    /// (state, symbol) pair.
    pub fn is_nondeterministic(&self) -> bool {
        self.transitions
            .iter()
            .any(|((_, symbol), targets)| *symbol == Symbol::Epsilon || targets.len() > 1)
    }

    /// Test whether the automaton accepts the given input.
    /// See [`crate::accepts`].
    pub fn accepts(&self, input: &str) -> bool {
        crate::simulator::accepts(self, input)
    }
}

/// The adjacency list of the graph, one line per state.
/// The start state is marked with `->`, accepting states with `*`.
impl std::fmt::Display for AutomatonGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for state in &self.states {
            let start_marker = if self.start_state == Some(*state) {
                "->"
            } else {
                "  "
            };
            let final_marker = if self.is_final(*state) { "*" } else { " " };
            write!(f, "{}{}{}:", start_marker, final_marker, state)?;
            for ((_, symbol), targets) in self
                .transitions
                .range((*state, Symbol::Epsilon)..)
                .take_while(|((from, _), _)| from == state)
            {
                for target in targets {
                    write!(f, " {}->{}", symbol, target)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
