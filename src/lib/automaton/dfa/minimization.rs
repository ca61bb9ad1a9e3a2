use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::automaton::{
    dfa::{node::DfaNode, DFA},
    AutBuild, Automaton, AutomatonEdge, AutomatonNode,
};

pub trait Minimizable {
    type Output;

    fn minimize(&self) -> Self::Output;
}

impl<N: AutomatonNode, E: AutomatonEdge> Minimizable for DFA<N, E> {
    type Output = DFA<(), E>;

    /// Minimizes the DFA with the table-filling algorithm.
    ///
    /// Unreachable states are dropped up front, the transition function is
    /// completed with a failure state, distinguishable state pairs are
    /// marked, and the remaining equivalence classes become the states of
    /// the rebuilt automaton. The failure state's class is dropped again at
    /// the end, so the result is partial, minimal, and free of dead states.
    fn minimize(&self) -> DFA<(), E> {
        let mut working = self.reachable_copy();
        let failure_state = working.add_failure_state(());

        let mut table = MinimizationTable::new(&working, failure_state);
        table.fill();
        table.rebuild()
    }
}

/// The pair-marking table over a complete DFA in which every state is
/// reachable. States are addressed by their compact node index.
struct MinimizationTable<'a, E: AutomatonEdge> {
    dfa: &'a DFA<(), E>,
    failure_state: Option<NodeIndex<u32>>,
    /// targets[state][symbol]: the total transition function.
    targets: Vec<Vec<usize>>,
    /// predecessors[state][symbol]: every state transitioning into `state`
    /// on `symbol`. Drives the backward propagation of markings.
    predecessors: Vec<Vec<Vec<usize>>>,
    /// marked[p][q] (and mirrored) iff p and q are known distinguishable.
    marked: Vec<Vec<bool>>,
}

impl<'a, E: AutomatonEdge> MinimizationTable<'a, E> {
    fn new(dfa: &'a DFA<(), E>, failure_state: Option<NodeIndex<u32>>) -> Self {
        let state_count = dfa.state_count();
        let alphabet_len = dfa.alphabet().len();

        let mut targets = vec![vec![usize::MAX; alphabet_len]; state_count];
        let mut predecessors = vec![vec![vec![]; alphabet_len]; state_count];

        for state in dfa.graph.node_indices() {
            for (symbol_index, symbol) in dfa.alphabet().iter().enumerate() {
                let target = dfa
                    .successor(state, symbol)
                    .expect("the transition function must be total");

                targets[state.index()][symbol_index] = target.index();
                predecessors[target.index()][symbol_index].push(state.index());
            }
        }

        MinimizationTable {
            dfa,
            failure_state,
            targets,
            predecessors,
            marked: vec![vec![false; state_count]; state_count],
        }
    }

    fn is_marked(&self, p: usize, q: usize) -> bool {
        self.marked[p][q]
    }

    fn mark(&mut self, p: usize, q: usize) {
        self.marked[p][q] = true;
        self.marked[q][p] = true;
    }

    fn is_accepting(&self, state: usize) -> bool {
        self.dfa.is_accepting(NodeIndex::new(state))
    }

    /// Marks all distinguishable pairs.
    ///
    /// Seeds the work queue with every pair of which exactly one state is
    /// accepting, then propagates backwards: whenever (u, v) is
    /// distinguishable, so is every pair of predecessors reaching (u, v) on
    /// the same symbol. The pair set is finite and markings only grow, so
    /// the queue drains.
    fn fill(&mut self) {
        let state_count = self.targets.len();
        let alphabet_len = self.dfa.alphabet().len();

        let mut queue = VecDeque::new();

        for p in 0..state_count {
            for q in 0..p {
                if self.is_accepting(p) != self.is_accepting(q) {
                    self.mark(p, q);
                    queue.push_back((p, q));
                }
            }
        }

        while let Some((u, v)) = queue.pop_front() {
            for symbol_index in 0..alphabet_len {
                for &r in &self.predecessors[u][symbol_index] {
                    for &s in &self.predecessors[v][symbol_index] {
                        if r != s && !self.marked[r][s] {
                            self.marked[r][s] = true;
                            self.marked[s][r] = true;
                            queue.push_back((r, s));
                        }
                    }
                }
            }
        }
    }

    /// Groups the states into equivalence classes of unmarked pairs. The
    /// failure state's class comes first so it can be recognized as the
    /// dead class.
    fn classes(&self) -> (Vec<usize>, usize, Option<usize>) {
        let state_count = self.targets.len();
        let mut class_of = vec![usize::MAX; state_count];
        let mut class_count = 0;

        let dead_class = self.failure_state.map(|failure| {
            let failure = failure.index();
            class_of[failure] = 0;
            for q in 0..state_count {
                if q != failure && !self.is_marked(failure, q) {
                    class_of[q] = 0;
                }
            }
            class_count = 1;
            0
        });

        for p in 0..state_count {
            if class_of[p] != usize::MAX {
                continue;
            }

            let class = class_count;
            class_count += 1;
            class_of[p] = class;

            for q in (p + 1)..state_count {
                if class_of[q] == usize::MAX && !self.is_marked(p, q) {
                    class_of[q] = class;
                }
            }
        }

        (class_of, class_count, dead_class)
    }

    /// Builds the minimal automaton with one state per live class.
    /// Transitions into the dead class are dropped, restoring partiality.
    fn rebuild(&self) -> DFA<(), E> {
        let (class_of, class_count, dead_class) = self.classes();

        let start_class =
            class_of[self.dfa.get_start().expect("Self must have a start state").index()];

        let mut minimized = DFA::new(self.dfa.alphabet().clone());

        if Some(start_class) == dead_class {
            // The language is empty, but a start state must still exist.
            let start = minimized.add_state(DfaNode::non_accepting(()));
            minimized.set_start(start);
            return minimized;
        }

        // one representative per class, in class order
        let mut representatives = vec![usize::MAX; class_count];
        for state in 0..class_of.len() {
            let class = class_of[state];
            if representatives[class] == usize::MAX {
                representatives[class] = state;
            }
        }

        let mut class_states = vec![None; class_count];
        for class in 0..class_count {
            if Some(class) == dead_class {
                continue;
            }

            let state =
                minimized.add_state(DfaNode::new(self.is_accepting(representatives[class]), ()));
            class_states[class] = Some(state);

            if class == start_class {
                minimized.set_start(state);
            }
        }

        for class in 0..class_count {
            let Some(from) = class_states[class] else {
                continue;
            };

            for (symbol_index, symbol) in self.dfa.alphabet().iter().enumerate() {
                let target_class = class_of[self.targets[representatives[class]][symbol_index]];

                if let Some(to) = class_states[target_class] {
                    minimized.add_transition(from, to, symbol.clone());
                }
            }
        }

        minimized
    }
}
