use std::collections::VecDeque;

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef, Direction};

use crate::automaton::{dfa::DFA, AutomatonEdge, AutomatonNode};

/// Checks whether two deterministic automata are isomorphic: a bijection
/// between their states, rooted at the start states, preserving transition
/// labels and accepting flags exactly.
///
/// State and final-state counts are compared first as cheap preconditions.
/// The pairing is then grown breadth-first from the start states; every
/// label must lead to consistently paired targets on both sides.
pub fn is_isomorphic<N: AutomatonNode, NO: AutomatonNode, E: AutomatonEdge>(
    a: &DFA<N, E>,
    b: &DFA<NO, E>,
) -> bool {
    if a.state_count() != b.state_count() {
        return false;
    }

    if a.final_states().len() != b.final_states().len() {
        return false;
    }

    let (Some(a_start), Some(b_start)) = (a.get_start(), b.get_start()) else {
        return false;
    };

    let mut forward: HashMap<NodeIndex<u32>, NodeIndex<u32>> = HashMap::new();
    let mut backward: HashMap<NodeIndex<u32>, NodeIndex<u32>> = HashMap::new();
    let mut queue = VecDeque::new();

    forward.insert(a_start, b_start);
    backward.insert(b_start, a_start);
    queue.push_back((a_start, b_start));

    while let Some((a_state, b_state)) = queue.pop_front() {
        if a.is_accepting(a_state) != b.is_accepting(b_state) {
            return false;
        }

        let a_edges = outgoing_by_label(a, a_state);
        let b_edges = outgoing_by_label(b, b_state);

        if a_edges.len() != b_edges.len() {
            return false;
        }

        for (label, a_target) in a_edges {
            let Some(&b_target) = b_edges.get(&label) else {
                return false;
            };

            match (forward.get(&a_target), backward.get(&b_target)) {
                (Some(&mapped), _) if mapped != b_target => return false,
                (_, Some(&mapped)) if mapped != a_target => return false,
                (Some(_), Some(_)) => {}
                _ => {
                    forward.insert(a_target, b_target);
                    backward.insert(b_target, a_target);
                    queue.push_back((a_target, b_target));
                }
            }
        }
    }

    true
}

/// Like [is_isomorphic], but panics on the first mismatch found.
pub fn assert_isomorphic<N: AutomatonNode, NO: AutomatonNode, E: AutomatonEdge>(
    a: &DFA<N, E>,
    b: &DFA<NO, E>,
) {
    assert_eq!(
        a.state_count(),
        b.state_count(),
        "The automata have different state counts"
    );
    assert_eq!(
        a.final_states().len(),
        b.final_states().len(),
        "The automata have different numbers of final states"
    );
    assert!(
        is_isomorphic(a, b),
        "The automata are not isomorphic.\nLeft:\n{}\nRight:\n{}",
        a.dump(),
        b.dump()
    );
}

fn outgoing_by_label<N: AutomatonNode, E: AutomatonEdge>(
    dfa: &DFA<N, E>,
    state: NodeIndex<u32>,
) -> HashMap<E, NodeIndex<u32>> {
    dfa.graph
        .edges_directed(state, Direction::Outgoing)
        .map(|edge| (edge.weight().clone(), edge.target()))
        .collect()
}
