use std::{collections::VecDeque, fmt::Debug};

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
    Direction,
};

use super::{
    dfa::{node::DfaNode, DFA},
    AutBuild, Automaton, AutomatonEdge, AutomatonNode,
};

/// An edge of a non-deterministic automaton: either a real alphabet symbol
/// or the distinguished epsilon marker, consumable without reading input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NfaEdge<E: AutomatonEdge> {
    Symbol(E),
    Epsilon,
}

impl<E: AutomatonEdge> NfaEdge<E> {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, NfaEdge::Epsilon)
    }

    pub fn symbol(&self) -> Option<&E> {
        match self {
            NfaEdge::Symbol(symbol) => Some(symbol),
            NfaEdge::Epsilon => None,
        }
    }
}

impl<E: AutomatonEdge> From<Option<E>> for NfaEdge<E> {
    fn from(value: Option<E>) -> Self {
        match value {
            Some(symbol) => NfaEdge::Symbol(symbol),
            None => NfaEdge::Epsilon,
        }
    }
}

/// A non-deterministic finite automaton. Multiple transitions with the same
/// label out of one state and epsilon transitions are both allowed here;
/// [NFA::determinize] removes all of that.
#[derive(Clone)]
pub struct NFA<N: AutomatonNode, E: AutomatonEdge> {
    start: Option<NodeIndex<u32>>,
    pub graph: DiGraph<DfaNode<N>, NfaEdge<E>>,
    alphabet: Vec<E>,
}

impl<N: AutomatonNode, E: AutomatonEdge> NFA<N, E> {
    pub fn new(alphabet: Vec<E>) -> Self {
        NFA {
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

    pub fn set_accepting(&mut self, state: NodeIndex<u32>) {
        self.graph[state].accepting = true;
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_accepting(&self, state: NodeIndex<u32>) -> bool {
        self.graph[state].accepting
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &[NodeIndex<u32>]) -> bool {
        states.iter().any(|&state| self.is_accepting(state))
    }

    /// Calculates the epsilon closure of a state: every state reachable via
    /// one or more epsilon transitions, not including the state itself.
    pub fn e_closure(&self, state: NodeIndex<u32>) -> Vec<NodeIndex<u32>> {
        let mut closure = vec![];
        let mut stack = vec![state];

        while let Some(current) = stack.pop() {
            for edge in self.graph.edges_directed(current, Direction::Outgoing) {
                if edge.weight().is_epsilon() {
                    let target = edge.target();

                    if target != state && !closure.contains(&target) {
                        closure.push(target);
                        stack.push(target);
                    }
                }
            }
        }

        closure
    }

    /// Extends a duplicate-free set of states to its epsilon closure.
    pub fn extend_to_e_closure(&self, states: &mut Vec<NodeIndex<u32>>) {
        let mut stack = states.clone();

        while let Some(state) = stack.pop() {
            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                if edge.weight().is_epsilon() {
                    let target = edge.target();

                    if !states.contains(&target) {
                        states.push(target);
                        stack.push(target);
                    }
                }
            }
        }
    }

    /// Rewrites the automaton in place so that it accepts the same language
    /// without any epsilon transitions.
    ///
    /// First every epsilon closure is materialized as direct epsilon edges,
    /// so the remaining steps can treat epsilon reachability as a one-hop
    /// property. Then acceptance is propagated backwards along those edges,
    /// real transitions are pulled over them (walking from the start state
    /// with an explicit stack, since epsilon graphs may be cyclic), and
    /// finally all epsilon edges are deleted.
    pub fn remove_epsilon_transitions(&mut self) {
        let closures: HashMap<NodeIndex<u32>, Vec<NodeIndex<u32>>> = self
            .graph
            .node_indices()
            .map(|state| (state, self.e_closure(state)))
            .collect();

        for (&state, closure) in &closures {
            for &target in closure {
                if !self.has_transition(state, target, |edge| edge.is_epsilon()) {
                    self.graph.add_edge(state, target, NfaEdge::Epsilon);
                }
            }
        }

        for (&state, closure) in &closures {
            if closure.iter().any(|&target| self.graph[target].accepting) {
                self.graph[state].accepting = true;
            }
        }

        if let Some(start) = self.start {
            let mut visited = HashSet::new();
            let mut stack = vec![start];
            visited.insert(start);

            while let Some(state) = stack.pop() {
                let mut pulled = vec![];
                for &eps_target in &closures[&state] {
                    for edge in self.graph.edges_directed(eps_target, Direction::Outgoing) {
                        if let NfaEdge::Symbol(symbol) = edge.weight() {
                            pulled.push((edge.target(), symbol.clone()));
                        }
                    }
                }

                for (target, symbol) in pulled {
                    if !self.has_transition(state, target, |edge| edge.symbol() == Some(&symbol)) {
                        self.graph.add_edge(state, target, NfaEdge::Symbol(symbol));
                    }
                }

                let successors = self
                    .graph
                    .edges_directed(state, Direction::Outgoing)
                    .map(|edge| edge.target())
                    .collect_vec();
                for successor in successors {
                    if visited.insert(successor) {
                        stack.push(successor);
                    }
                }
            }
        }

        self.graph.retain_edges(|graph, edge| !graph[edge].is_epsilon());
    }

    /// Determinizes the NFA to a DFA via subset construction.
    ///
    /// Epsilon transitions are removed from a working copy first, so the
    /// exploration itself only has to group transitions by label. Each
    /// discovered set of states becomes one DFA state; sets are compared by
    /// content, so two explorations reaching the same set collapse into the
    /// same state. Labels that lead nowhere are simply absent in the result,
    /// which makes the returned DFA partial.
    pub fn determinize(&self) -> DFA<(), E> {
        let mut nfa = self.clone();
        nfa.remove_epsilon_transitions();

        let nfa_start = nfa.start.expect("NFA must have a start state");

        let mut dfa = DFA::new(nfa.alphabet.clone());
        let mut state_map: HashMap<Vec<NodeIndex<u32>>, NodeIndex<u32>> = HashMap::new();

        let start_set = vec![nfa_start];
        let dfa_start = dfa.add_state(DfaNode::new(nfa.is_accepting_set(&start_set), ()));
        dfa.set_start(dfa_start);
        state_map.insert(start_set.clone(), dfa_start);

        let mut queue = VecDeque::new();
        queue.push_back(start_set);

        while let Some(set) = queue.pop_front() {
            for symbol in &nfa.alphabet {
                let mut target_set = vec![];

                for &state in &set {
                    for edge in nfa.graph.edges_directed(state, Direction::Outgoing) {
                        if edge.weight().symbol() == Some(symbol) {
                            target_set.push(edge.target());
                        }
                    }
                }

                if target_set.is_empty() {
                    continue;
                }

                target_set.sort();
                target_set.dedup();

                let target_dfa_state = if let Some(&existing) = state_map.get(&target_set) {
                    existing
                } else {
                    let new_state =
                        dfa.add_state(DfaNode::new(nfa.is_accepting_set(&target_set), ()));
                    state_map.insert(target_set.clone(), new_state);
                    queue.push_back(target_set);
                    new_state
                };

                dfa.add_transition(state_map[&set], target_dfa_state, symbol.clone());
            }
        }

        dfa
    }

    fn has_transition(
        &self,
        from: NodeIndex<u32>,
        to: NodeIndex<u32>,
        matches: impl Fn(&NfaEdge<E>) -> bool,
    ) -> bool {
        self.graph
            .edges_connecting(from, to)
            .any(|edge| matches(edge.weight()))
    }

    /// Human-readable transition listing, for debugging only.
    pub fn dump(&self) -> String {
        let mut out = String::new();

        if let Some(start) = self.start {
            out.push_str(&format!("start: {}\n", start.index()));
        }
        out.push_str(&format!(
            "final: {}\n",
            self.graph
                .node_indices()
                .filter(|&state| self.graph[state].accepting)
                .map(|state| state.index().to_string())
                .join(" ")
        ));

        for edge in self.graph.edge_references() {
            let label = match edge.weight() {
                NfaEdge::Symbol(symbol) => format!("{:?}", symbol),
                NfaEdge::Epsilon => "eps".to_string(),
            };
            out.push_str(&format!(
                "{} ---({})---> {}\n",
                edge.source().index(),
                label,
                edge.target().index()
            ));
        }

        out
    }
}

impl<E: AutomatonEdge> NFA<(), E> {
    /// Copies a whole DFA into this NFA, relabeling its states into a fresh
    /// index range. Returns the embedded start state and the embedded
    /// accepting states.
    ///
    /// The copy shares nothing with the original, so the original can be
    /// used as an operand again without aliasing hazards.
    pub fn embed_dfa<N: AutomatonNode>(
        &mut self,
        dfa: &DFA<N, E>,
    ) -> (NodeIndex<u32>, Vec<NodeIndex<u32>>) {
        let dfa_start = dfa.get_start().expect("operand must have a start state");

        let mut state_map = HashMap::new();
        for state in dfa.graph.node_indices() {
            let copy = self.add_state(DfaNode::new(dfa.graph[state].accepting, ()));
            state_map.insert(state, copy);
        }

        for edge in dfa.graph.edge_references() {
            self.add_transition(
                state_map[&edge.source()],
                state_map[&edge.target()],
                NfaEdge::Symbol(edge.weight().clone()),
            );
        }

        let finals = dfa
            .final_states()
            .into_iter()
            .map(|state| state_map[&state])
            .collect_vec();

        (state_map[&dfa_start], finals)
    }
}

impl<N: AutomatonNode, E: AutomatonEdge> AutBuild<NodeIndex, DfaNode<N>, NfaEdge<E>>
    for NFA<N, E>
{
    fn add_state(&mut self, data: DfaNode<N>) -> NodeIndex<u32> {
        self.graph.add_node(data)
    }

    fn add_transition(&mut self, from: NodeIndex<u32>, to: NodeIndex<u32>, label: NfaEdge<E>) {
        self.graph.add_edge(from, to, label);
    }
}

impl<N: AutomatonNode, E: AutomatonEdge> Automaton<E> for NFA<N, E> {
    fn accepts(&self, input: &[E]) -> bool {
        let mut current_states = vec![self.start.expect("NFA must have a start state")];
        self.extend_to_e_closure(&mut current_states);

        for symbol in input {
            let mut next_states = vec![];

            for &state in &current_states {
                for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                    if edge.weight().symbol() == Some(symbol) {
                        next_states.push(edge.target());
                    }
                }
            }

            if next_states.is_empty() {
                return false;
            }

            next_states.sort();
            next_states.dedup();
            self.extend_to_e_closure(&mut next_states);

            current_states = next_states;
        }

        self.is_accepting_set(&current_states)
    }

    fn alphabet(&self) -> &Vec<E> {
        &self.alphabet
    }
}

impl<N: AutomatonNode, E: AutomatonEdge> Debug for NFA<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("initial_state", &self.start)
            .field(
                "final_states",
                &self
                    .graph
                    .node_indices()
                    .filter(|&state| self.graph[state].accepting)
                    .collect_vec(),
            )
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
