//! This module contains the Thompson construction.
//! Every regex construct is turned into an automaton fragment. Fragments are combined by
//! epsilon transitions into new fragments.
//! All fragments of one compilation take their state ids from the same monotonic counter in the
//! builder, so the id ranges of different fragments never overlap and fragments can be merged
//! without renumbering.

use log::trace;

use crate::{
    graph::{AutomatonGraph, Symbol},
    NfaError, NfaErrorKind, Result, StateID,
};

/// Builds automaton fragments for one compilation.
#[derive(Debug, Default)]
pub struct ThompsonBuilder {
    next_state: StateID,
}

impl ThompsonBuilder {
    /// Create a new builder whose first state gets id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new empty fragment that allocates ids above all ids handed out so far.
    fn fragment(&self) -> AutomatonGraph {
        AutomatonGraph::starting_at(self.next_state)
    }

    /// Hand the fragment out and advance the id counter past its states.
    fn finish(&mut self, fragment: AutomatonGraph) -> AutomatonGraph {
        self.next_state = self.next_state.max(fragment.next_state());
        fragment
    }

    // A missing start state can only stem from a fragment that was not created by a builder.
    fn start_of(fragment: &AutomatonGraph) -> Result<StateID> {
        fragment
            .start()
            .ok_or_else(|| NfaError::new(NfaErrorKind::MissingStartState))
    }

    /// A fragment that accepts exactly the character `c`.
    pub fn literal(&mut self, c: char) -> Result<AutomatonGraph> {
        let mut nfa = self.fragment();
        let start_state = nfa.create_state();
        let end_state = nfa.create_state();
        nfa.add_transition(start_state, Symbol::Char(c), end_state)?;
        nfa.set_start(start_state)?;
        nfa.mark_final(end_state)?;
        Ok(self.finish(nfa))
    }

    /// The concatenation of two fragments.
    pub fn concat(&mut self, left: AutomatonGraph, right: AutomatonGraph) -> Result<AutomatonGraph> {
        let left_start = Self::start_of(&left)?;
        let right_start = Self::start_of(&right)?;
        let left_finals = left.finals().clone();
        let right_finals = right.finals().clone();

        let mut nfa = self.fragment();
        nfa.merge(left)?;
        nfa.merge(right)?;
        // Connect the final states of the left fragment to the start state of the right one
        for state in left_finals {
            nfa.add_epsilon_transition(state, right_start)?;
        }
        nfa.set_start(left_start)?;
        nfa.mark_finals(right_finals)?;
        Ok(self.finish(nfa))
    }

    /// The alternation of two fragments.
    pub fn union(&mut self, left: AutomatonGraph, right: AutomatonGraph) -> Result<AutomatonGraph> {
        let left_start = Self::start_of(&left)?;
        let right_start = Self::start_of(&right)?;
        let finals: Vec<StateID> = left
            .finals()
            .iter()
            .chain(right.finals().iter())
            .copied()
            .collect();

        let mut nfa = self.fragment();
        nfa.merge(left)?;
        nfa.merge(right)?;
        let start_state = nfa.create_state();
        let end_state = nfa.create_state();
        nfa.add_epsilon_transition(start_state, left_start)?;
        nfa.add_epsilon_transition(start_state, right_start)?;
        for state in finals {
            nfa.add_epsilon_transition(state, end_state)?;
        }
        nfa.set_start(start_state)?;
        nfa.mark_final(end_state)?;
        Ok(self.finish(nfa))
    }

    /// Zero or more repetitions of a fragment.
    pub fn star(&mut self, inner: AutomatonGraph) -> Result<AutomatonGraph> {
        self.repetition(inner, true)
    }

    /// One or more repetitions of a fragment.
    pub fn plus(&mut self, inner: AutomatonGraph) -> Result<AutomatonGraph> {
        self.repetition(inner, false)
    }

    // Star and plus only differ in the bypass from the new start state to the new final state.
    fn repetition(&mut self, inner: AutomatonGraph, allow_empty: bool) -> Result<AutomatonGraph> {
        let inner_start = Self::start_of(&inner)?;
        let inner_finals = inner.finals().clone();

        let mut nfa = self.fragment();
        nfa.merge(inner)?;
        let start_state = nfa.create_state();
        let end_state = nfa.create_state();
        nfa.add_epsilon_transition(start_state, inner_start)?;
        if allow_empty {
            nfa.add_epsilon_transition(start_state, end_state)?;
        }
        for state in inner_finals {
            // Loop back for the next repetition
            nfa.add_epsilon_transition(state, inner_start)?;
            nfa.add_epsilon_transition(state, end_state)?;
        }
        nfa.set_start(start_state)?;
        nfa.mark_final(end_state)?;
        trace!(
            "{} over states {}..{}",
            if allow_empty { "star" } else { "plus" },
            inner_start,
            end_state
        );
        Ok(self.finish(nfa))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(states: &[usize]) -> crate::graph::StateSet {
        states.iter().copied().map(StateID::new).collect()
    }

    #[test]
    fn test_literal() {
        let mut builder = ThompsonBuilder::new();
        let nfa = builder.literal('a').unwrap();
        assert_eq!(nfa.state_count(), 2);
        assert_eq!(nfa.start(), Some(StateID::new(0)));
        assert_eq!(nfa.finals(), &ids(&[1]));
        assert_eq!(
            nfa.transitions_from(StateID::new(0), Symbol::Char('a')),
            ids(&[1])
        );
    }

    #[test]
    fn test_fragments_get_disjoint_ids() {
        let mut builder = ThompsonBuilder::new();
        let a = builder.literal('a').unwrap();
        let b = builder.literal('b').unwrap();
        assert!(a.states().is_disjoint(b.states()));
        assert_eq!(b.states(), &ids(&[2, 3]));
    }

    #[test]
    fn test_concat() {
        let mut builder = ThompsonBuilder::new();
        let a = builder.literal('a').unwrap();
        let b = builder.literal('b').unwrap();
        let nfa = builder.concat(a, b).unwrap();
        assert_eq!(nfa.state_count(), 4);
        assert_eq!(nfa.start(), Some(StateID::new(0)));
        assert_eq!(nfa.finals(), &ids(&[3]));
        assert_eq!(
            nfa.transitions_from(StateID::new(1), Symbol::Epsilon),
            ids(&[2])
        );
        assert_eq!(nfa.transition_count(), 3);
    }

    #[test]
    fn test_union() {
        let mut builder = ThompsonBuilder::new();
        let a = builder.literal('a').unwrap();
        let b = builder.literal('b').unwrap();
        let nfa = builder.union(a, b).unwrap();
        assert_eq!(nfa.state_count(), 6);
        assert_eq!(nfa.start(), Some(StateID::new(4)));
        assert_eq!(nfa.finals(), &ids(&[5]));
        assert_eq!(
            nfa.transitions_from(StateID::new(4), Symbol::Epsilon),
            ids(&[0, 2])
        );
        assert_eq!(
            nfa.transitions_from(StateID::new(1), Symbol::Epsilon),
            ids(&[5])
        );
        assert_eq!(
            nfa.transitions_from(StateID::new(3), Symbol::Epsilon),
            ids(&[5])
        );
    }

    #[test]
    fn test_star() {
        let mut builder = ThompsonBuilder::new();
        let a = builder.literal('a').unwrap();
        let nfa = builder.star(a).unwrap();
        assert_eq!(nfa.state_count(), 4);
        assert_eq!(nfa.start(), Some(StateID::new(2)));
        assert_eq!(nfa.finals(), &ids(&[3]));
        assert_eq!(
            nfa.transitions_from(StateID::new(2), Symbol::Epsilon),
            ids(&[0, 3])
        );
        assert_eq!(
            nfa.transitions_from(StateID::new(1), Symbol::Epsilon),
            ids(&[0, 3])
        );
    }

    #[test]
    fn test_plus_has_no_bypass() {
        let mut builder = ThompsonBuilder::new();
        let a = builder.literal('a').unwrap();
        let nfa = builder.plus(a).unwrap();
        assert_eq!(nfa.state_count(), 4);
        assert_eq!(
            nfa.transitions_from(StateID::new(2), Symbol::Epsilon),
            ids(&[0])
        );
        assert_eq!(
            nfa.transitions_from(StateID::new(1), Symbol::Epsilon),
            ids(&[0, 3])
        );
    }

    #[test]
    fn test_nested_constructions_keep_ids_sequential() {
        let mut builder = ThompsonBuilder::new();
        let a = builder.literal('a').unwrap();
        let b = builder.literal('b').unwrap();
        let a_or_b = builder.union(a, b).unwrap();
        let many = builder.star(a_or_b).unwrap();
        let c = builder.literal('c').unwrap();
        let nfa = builder.concat(many, c).unwrap();
        assert_eq!(
            nfa.states(),
            &(0..10).map(StateID::new).collect::<crate::graph::StateSet>()
        );
        assert_eq!(nfa.start(), Some(StateID::new(6)));
        assert_eq!(nfa.finals(), &ids(&[9]));
    }

    #[test]
    fn test_fragments_of_different_builders_are_rejected() {
        let a = ThompsonBuilder::new().literal('a').unwrap();
        let b = ThompsonBuilder::new().literal('b').unwrap();
        let mut builder = ThompsonBuilder::new();
        let error = builder.concat(a, b).unwrap_err();
        assert!(matches!(
            *error.source,
            NfaErrorKind::StateCollision(s) if s == StateID::new(0)
        ));

        let a = builder.literal('a').unwrap();
        assert!(builder.union(a.clone(), a).is_err());
    }
}
