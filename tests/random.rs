use rand::{rngs::StdRng, Rng, SeedableRng};
use regex_reach::{
    automaton::{
        dfa::minimization::Minimizable,
        dfa::node::DfaNode,
        nfa::{NfaEdge, NFA},
        AutBuild,
    },
    validation::{isomorphism::assert_isomorphic, same_language::assert_same_language},
};

/// Builds a random NFA over {a, b} with a handful of states, random symbol
/// edges, a sprinkling of epsilon edges, and random accepting flags.
fn random_nfa(rng: &mut StdRng) -> NFA<u32, char> {
    let alphabet = vec!['a', 'b'];
    let mut nfa = NFA::new(alphabet.clone());

    let state_count = rng.gen_range(2..7);
    let states = (0..state_count)
        .map(|id| nfa.add_state(DfaNode::new(rng.gen_bool(0.3), id)))
        .collect::<Vec<_>>();

    nfa.set_start(states[0]);

    let edge_count = rng.gen_range(state_count..3 * state_count);
    for _ in 0..edge_count {
        let from = states[rng.gen_range(0..states.len())];
        let to = states[rng.gen_range(0..states.len())];

        let label = if rng.gen_bool(0.2) {
            NfaEdge::Epsilon
        } else {
            NfaEdge::Symbol(alphabet[rng.gen_range(0..alphabet.len())])
        };

        nfa.add_transition(from, to, label);
    }

    nfa
}

#[test]
fn determinize_preserves_the_language() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let nfa = random_nfa(&mut rng);

        let dfa = nfa.determinize();

        assert_same_language(&nfa, &dfa, 6);
    }
}

#[test]
fn epsilon_removal_preserves_the_language() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let nfa = random_nfa(&mut rng);

        let mut epsilon_free = nfa.clone();
        epsilon_free.remove_epsilon_transitions();

        assert_same_language(&nfa, &epsilon_free, 6);
    }
}

#[test]
fn minimize_preserves_the_language() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let dfa = random_nfa(&mut rng).determinize();

        let minimized = dfa.minimize();

        assert_same_language(&dfa, &minimized, 6);
        assert!(minimized.state_count() <= dfa.state_count());
    }
}

#[test]
fn minimize_is_idempotent_on_random_machines() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let dfa = random_nfa(&mut rng).determinize();

        let once = dfa.minimize();
        let twice = once.minimize();

        assert_isomorphic(&once, &twice);
    }
}
