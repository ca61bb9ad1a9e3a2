use std::fmt::Debug;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
    Direction,
};

use super::{
    nfa::{NfaEdge, NFA},
    AutBuild, Automaton, AutomatonEdge, AutomatonNode,
};

pub mod minimization;
pub mod node;

use minimization::Minimizable;
use node::DfaNode;

/// A deterministic finite automaton: at most one outgoing transition per
/// state and symbol, no epsilon transitions. The transition function may be
/// partial; a missing transition rejects the rest of the word.
#[derive(Clone)]
pub struct DFA<N: AutomatonNode, E: AutomatonEdge> {
    start: Option<NodeIndex<u32>>,
    pub graph: DiGraph<DfaNode<N>, E>,
    alphabet: Vec<E>,
}

impl<N: AutomatonNode, E: AutomatonEdge> DFA<N, E> {
    pub fn new(alphabet: Vec<E>) -> Self {
        DFA {
            alphabet,
            start: None,
            graph: DiGraph::new(),
        }
    }

    pub fn set_start(&mut self, start: NodeIndex<u32>) {
        self.start = Some(start);
    }

    pub fn get_start(&self) -> Option<NodeIndex<u32>> {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_accepting(&self, state: NodeIndex<u32>) -> bool {
        self.graph[state].accepting
    }

    /// All accepting states, in index order.
    pub fn final_states(&self) -> Vec<NodeIndex<u32>> {
        self.graph
            .node_indices()
            .filter(|&state| self.graph[state].accepting)
            .collect_vec()
    }

    /// The unique successor of `state` under `symbol`, if any.
    pub fn successor(&self, state: NodeIndex<u32>, symbol: &E) -> Option<NodeIndex<u32>> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .find(|edge| edge.weight() == symbol)
            .map(|edge| edge.target())
    }

    /// Adds a failure state if needed, turning the transition function into
    /// a total one. Every missing (state, symbol) transition is routed to
    /// the failure state, which loops to itself on every symbol. Returns the
    /// failure state if one was added.
    pub fn add_failure_state(&mut self, data: N) -> Option<NodeIndex<u32>> {
        let mut failure_transitions = Vec::new();

        for state in self.graph.node_indices() {
            for symbol in self.alphabet.iter() {
                if self.successor(state, symbol).is_none() {
                    failure_transitions.push((state, symbol.clone()));
                }
            }
        }

        if failure_transitions.is_empty() {
            return None;
        }

        let failure_state = self.add_state(DfaNode::non_accepting(data));

        for (state, symbol) in failure_transitions {
            self.add_transition(state, failure_state, symbol);
        }

        for symbol in self.alphabet.clone() {
            self.add_transition(failure_state, failure_state, symbol);
        }

        Some(failure_state)
    }

    /// Copies the part of the automaton reachable from the start state into
    /// a new DFA, dropping node data and everything unreachable.
    pub fn reachable_copy(&self) -> DFA<(), E> {
        let start = self.start.expect("Self must have a start state");

        let mut reachable = DFA::new(self.alphabet.clone());

        let mut visited = HashMap::new();
        let mut stack = vec![start];
        let new_start = reachable.add_state(DfaNode::new(self.graph[start].accepting, ()));
        reachable.set_start(new_start);
        visited.insert(start, new_start);

        while let Some(state) = stack.pop() {
            let new_from = *visited.get(&state).unwrap();

            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                let new_to = match visited.entry(edge.target()) {
                    Entry::Vacant(entry) => {
                        let new_state = reachable
                            .graph
                            .add_node(DfaNode::new(self.graph[edge.target()].accepting, ()));
                        entry.insert(new_state);
                        stack.push(edge.target());
                        new_state
                    }
                    Entry::Occupied(entry) => *entry.get(),
                };

                reachable.add_transition(new_from, new_to, edge.weight().clone());
            }
        }

        reachable
    }

    /// Builds the automaton for the union of the two languages: a fresh
    /// start state with epsilon transitions to deep copies of both
    /// operands. The result is determinized and minimized, so intermediate
    /// graphs never leak.
    pub fn union<NO: AutomatonNode>(&self, other: &DFA<NO, E>) -> DFA<(), E> {
        let mut nfa = NFA::new(merge_alphabets(&self.alphabet, &other.alphabet));

        let (self_start, _) = nfa.embed_dfa(self);
        let (other_start, _) = nfa.embed_dfa(other);

        let start = nfa.add_state(DfaNode::non_accepting(()));
        nfa.set_start(start);
        nfa.add_transition(start, self_start, NfaEdge::Epsilon);
        nfa.add_transition(start, other_start, NfaEdge::Epsilon);

        nfa.determinize().minimize()
    }

    /// Builds the automaton for the concatenation of the two languages:
    /// every accepting state of the left copy gets an epsilon transition to
    /// the right copy's start and loses its accepting flag.
    pub fn concat<NO: AutomatonNode>(&self, other: &DFA<NO, E>) -> DFA<(), E> {
        let mut nfa = NFA::new(merge_alphabets(&self.alphabet, &other.alphabet));

        let (self_start, self_finals) = nfa.embed_dfa(self);
        let (other_start, _) = nfa.embed_dfa(other);

        nfa.set_start(self_start);
        for state in self_finals {
            nfa.graph[state].accepting = false;
            nfa.add_transition(state, other_start, NfaEdge::Epsilon);
        }

        nfa.determinize().minimize()
    }

    /// Builds the automaton for the Kleene star of the language: a fresh
    /// accepting start state with an epsilon transition into the copy, and
    /// an epsilon transition from every accepting state back to that fresh
    /// start. Accepts the empty word by construction.
    pub fn star(&self) -> DFA<(), E> {
        let mut nfa = NFA::new(self.alphabet.clone());

        let (old_start, finals) = nfa.embed_dfa(self);

        let start = nfa.add_state(DfaNode::accepting(()));
        nfa.set_start(start);
        nfa.add_transition(start, old_start, NfaEdge::Epsilon);
        for state in finals {
            nfa.add_transition(state, start, NfaEdge::Epsilon);
        }

        nfa.determinize().minimize()
    }

    /// A straight-line chain automaton accepting exactly `word`. Already
    /// deterministic and minimal.
    pub fn literal(alphabet: Vec<E>, word: &[E]) -> DFA<(), E> {
        let mut dfa = DFA::new(alphabet);

        let mut current = dfa.add_state(DfaNode::new(word.is_empty(), ()));
        dfa.set_start(current);

        for (i, symbol) in word.iter().enumerate() {
            let next = dfa.add_state(DfaNode::new(i == word.len() - 1, ()));
            dfa.add_transition(current, next, symbol.clone());
            current = next;
        }

        dfa
    }

    /// Human-readable transition listing, for debugging only.
    pub fn dump(&self) -> String {
        let mut out = String::new();

        if let Some(start) = self.start {
            out.push_str(&format!("start: {}\n", start.index()));
        }
        out.push_str(&format!(
            "final: {}\n",
            self.final_states()
                .iter()
                .map(|state| state.index().to_string())
                .join(" ")
        ));

        for edge in self.graph.edge_references() {
            out.push_str(&format!(
                "{} ---({:?})---> {}\n",
                edge.source().index(),
                edge.weight(),
                edge.target().index()
            ));
        }

        out
    }
}

fn merge_alphabets<E: AutomatonEdge>(a: &[E], b: &[E]) -> Vec<E> {
    a.iter().chain(b.iter()).cloned().sorted().dedup().collect_vec()
}

impl<N: AutomatonNode, E: AutomatonEdge> AutBuild<NodeIndex, DfaNode<N>, E> for DFA<N, E> {
    fn add_state(&mut self, data: DfaNode<N>) -> NodeIndex<u32> {
        self.graph.add_node(data)
    }

    fn add_transition(&mut self, from: NodeIndex<u32>, to: NodeIndex<u32>, label: E) {
        if let Some(target) = self.successor(from, &label) {
            if target != to {
                panic!(
                    "Transition conflict, adding the new transition causes this automaton to no longer be deterministic. Existing: {:?} -{:?}-> {:?}. New: {:?} -{:?}-> {:?}",
                    from, label, target, from, label, to
                );
            }
            return;
        }

        self.graph.add_edge(from, to, label);
    }
}

impl<N: AutomatonNode, E: AutomatonEdge> Automaton<E> for DFA<N, E> {
    /// Walks the word symbol by symbol. A symbol without a matching
    /// transition rejects the word immediately; that is ordinary control
    /// flow, not an error.
    fn accepts(&self, input: &[E]) -> bool {
        assert!(self.start.is_some(), "Self must have a start state");

        let mut current_state = self.start;
        for symbol in input {
            match current_state {
                Some(state) => current_state = self.successor(state, symbol),
                None => return false,
            }
        }

        match current_state {
            Some(state) => self.graph[state].accepting,
            None => false,
        }
    }

    fn alphabet(&self) -> &Vec<E> {
        &self.alphabet
    }
}

impl<N: AutomatonNode, E: AutomatonEdge> Debug for DFA<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("initial_state", &self.start)
            .field("final_states", &self.final_states())
            .field("edge_count", &self.graph.edge_count())
            .field(
                "edges",
                &self
                    .graph
                    .edge_references()
                    .map(|edge| {
                        format!(
                            "{:?} --- {:?} --> {:?}",
                            edge.source(),
                            edge.weight(),
                            edge.target()
                        )
                    })
                    .collect_vec(),
            )
            .finish()
    }
}
