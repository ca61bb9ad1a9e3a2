use std::{fmt::Debug, hash::Hash};

pub mod dfa;
pub mod error;
pub mod nfa;
pub mod regex;
pub mod spec;

/// This trait represents types that can be used as node data in an automaton.
pub trait AutomatonNode: Debug + Clone + PartialEq + Eq + Hash {}
impl<T> AutomatonNode for T where T: Debug + Clone + PartialEq + Eq + Hash {}

/// This trait represents types that can be used as edge labels in an automaton.
pub trait AutomatonEdge: Debug + Clone + PartialEq + Eq + Hash + Ord {}
impl<T> AutomatonEdge for T where T: Debug + Clone + PartialEq + Eq + Hash + Ord {}

/// Incremental construction of an automaton graph.
pub trait AutBuild<NIndex, N, E> {
    fn add_state(&mut self, data: N) -> NIndex;
    fn add_transition(&mut self, from: NIndex, to: NIndex, label: E);
}

/// Anything that defines a language over an alphabet.
pub trait Automaton<E: AutomatonEdge> {
    fn accepts(&self, input: &[E]) -> bool;
    fn alphabet(&self) -> &Vec<E>;
}
