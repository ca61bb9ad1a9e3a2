use petgraph::visit::EdgeRef;
use regex_reach::{
    automaton::{
        dfa::node::DfaNode,
        nfa::{NfaEdge, NFA},
        AutBuild, Automaton,
    },
    validation::same_language::assert_same_language,
};

#[test]
fn test_nfa_accepts() {
    // words over {a, b} ending in "ab"
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.set_start(q0);

    nfa.add_transition(q0, q0, NfaEdge::Symbol('a'));
    nfa.add_transition(q0, q0, NfaEdge::Symbol('b'));
    nfa.add_transition(q0, q1, NfaEdge::Symbol('a'));
    nfa.add_transition(q1, q2, NfaEdge::Symbol('b'));

    assert!(nfa.accepts(&['a', 'b']));
    assert!(nfa.accepts(&['b', 'a', 'a', 'b']));
    assert!(!nfa.accepts(&['a']));
    assert!(!nfa.accepts(&['b', 'a']));
    assert!(!nfa.accepts(&[]));
}

#[test]
fn test_determinize() {
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.set_start(q0);

    nfa.add_transition(q0, q0, NfaEdge::Symbol('a'));
    nfa.add_transition(q0, q0, NfaEdge::Symbol('b'));
    nfa.add_transition(q0, q1, NfaEdge::Symbol('a'));
    nfa.add_transition(q1, q2, NfaEdge::Symbol('b'));

    let dfa = nfa.determinize();

    // at most one transition per state and symbol
    for state in dfa.graph.node_indices() {
        for symbol in dfa.alphabet() {
            let count = dfa
                .graph
                .edges(state)
                .filter(|edge| edge.weight() == symbol)
                .count();
            assert!(count <= 1);
        }
    }

    assert_same_language(&nfa, &dfa, 6);
}

#[test]
fn test_determinize_collapses_equal_sets() {
    // both letters lead from the start into the same set of states
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.set_start(q0);

    nfa.add_transition(q0, q1, NfaEdge::Symbol('a'));
    nfa.add_transition(q0, q2, NfaEdge::Symbol('a'));
    nfa.add_transition(q0, q1, NfaEdge::Symbol('b'));
    nfa.add_transition(q0, q2, NfaEdge::Symbol('b'));

    let dfa = nfa.determinize();

    // {q1, q2} must only be discovered once
    assert_eq!(dfa.state_count(), 2);
    assert_same_language(&nfa, &dfa, 4);
}

#[test]
fn test_determinize_with_epsilon_transitions() {
    let mut nfa = NFA::<u32, char>::new(vec!['a']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.set_start(q0);

    nfa.add_transition(q0, q1, NfaEdge::Epsilon);
    nfa.add_transition(q1, q2, NfaEdge::Symbol('a'));

    let dfa = nfa.determinize();

    assert!(dfa.accepts(&['a']));
    assert!(!dfa.accepts(&[]));
    assert_same_language(&nfa, &dfa, 5);
}

#[test]
fn test_determinize_empty_language() {
    let mut nfa = NFA::<u32, char>::new(vec!['a']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    nfa.set_start(q0);
    nfa.add_transition(q0, q0, NfaEdge::Symbol('a'));

    let dfa = nfa.determinize();

    assert!(dfa.final_states().is_empty());
    assert!(!dfa.accepts(&[]));
    assert!(!dfa.accepts(&['a', 'a']));
}

#[test]
fn test_e_closure() {
    let mut nfa = NFA::<u32, char>::new(vec!['a']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::non_accepting(2));
    let q3 = nfa.add_state(DfaNode::non_accepting(3));

    nfa.set_start(q0);

    nfa.add_transition(q0, q1, NfaEdge::Epsilon);
    nfa.add_transition(q1, q2, NfaEdge::Epsilon);
    nfa.add_transition(q2, q3, NfaEdge::Symbol('a'));

    let mut closure = nfa.e_closure(q0);
    closure.sort();
    assert_eq!(closure, vec![q1, q2]);

    // the state itself is not part of its own closure, even on a cycle
    nfa.add_transition(q2, q0, NfaEdge::Epsilon);
    let mut closure = nfa.e_closure(q0);
    closure.sort();
    assert_eq!(closure, vec![q1, q2]);
}

#[test]
fn test_remove_epsilon_transitions() {
    // two states epsilon-reaching the same final state
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.set_start(q0);

    nfa.add_transition(q0, q1, NfaEdge::Symbol('a'));
    nfa.add_transition(q0, q2, NfaEdge::Epsilon);
    nfa.add_transition(q1, q2, NfaEdge::Epsilon);
    nfa.add_transition(q2, q2, NfaEdge::Symbol('b'));

    let original = nfa.clone();
    nfa.remove_epsilon_transitions();

    assert!(nfa
        .graph
        .edge_references()
        .all(|edge| !edge.weight().is_epsilon()));

    // finality propagated backwards along the old epsilon edges,
    // including onto the start state
    assert!(nfa.is_accepting(q0));
    assert!(nfa.is_accepting(q1));
    assert!(nfa.is_accepting(q2));

    assert_same_language(&original, &nfa, 6);
}

#[test]
fn test_remove_epsilon_transitions_cyclic() {
    let mut nfa = NFA::<u32, char>::new(vec!['a']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.set_start(q0);

    // an epsilon cycle between q0 and q1
    nfa.add_transition(q0, q1, NfaEdge::Epsilon);
    nfa.add_transition(q1, q0, NfaEdge::Epsilon);
    nfa.add_transition(q1, q2, NfaEdge::Symbol('a'));

    let original = nfa.clone();
    nfa.remove_epsilon_transitions();

    assert!(nfa
        .graph
        .edge_references()
        .all(|edge| !edge.weight().is_epsilon()));

    assert!(nfa.accepts(&['a']));
    assert_same_language(&original, &nfa, 5);
}

#[test]
fn test_dump() {
    let mut nfa = NFA::<u32, char>::new(vec!['a']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::accepting(1));
    nfa.set_start(q0);
    nfa.add_transition(q0, q1, NfaEdge::Epsilon);
    nfa.add_transition(q1, q1, NfaEdge::Symbol('a'));

    let dump = nfa.dump();
    assert!(dump.contains("start: 0"));
    assert!(dump.contains("final: 1"));
    assert!(dump.contains("0 ---(eps)---> 1"));
    assert!(dump.contains("1 ---('a')---> 1"));
}
