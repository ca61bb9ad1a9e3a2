use itertools::{repeat_n, Itertools};

use crate::automaton::{Automaton, AutomatonEdge};

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking
/// if the automata accept the same words up to a certain length.
pub fn same_language<E: AutomatonEdge>(
    a: &impl Automaton<E>,
    b: &impl Automaton<E>,
    max_word_length: usize,
) -> bool {
    if a.alphabet() != b.alphabet() {
        return false;
    }

    // the empty word never shows up as a cartesian product
    if a.accepts(&[]) != b.accepts(&[]) {
        return false;
    }

    for length in 1..=max_word_length {
        let combinations = repeat_n(a.alphabet(), length).multi_cartesian_product();

        for word in combinations {
            let word: Vec<E> = word.into_iter().cloned().collect_vec();
            if a.accepts(&word) != b.accepts(&word) {
                return false;
            }
        }
    }

    true
}

/// Like [same_language], but panics with the first offending word.
pub fn assert_same_language<E: AutomatonEdge>(
    a: &impl Automaton<E>,
    b: &impl Automaton<E>,
    max_word_length: usize,
) {
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    if a.accepts(&[]) != b.accepts(&[]) {
        panic!("The automata disagree on the empty word");
    }

    for length in 1..=max_word_length {
        let combinations = repeat_n(a.alphabet(), length).multi_cartesian_product();

        for word in combinations {
            let word: Vec<E> = word.into_iter().cloned().collect_vec();
            match (a.accepts(&word), b.accepts(&word)) {
                (true, false) => {
                    panic!(
                        "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                        word
                    );
                }
                (false, true) => {
                    panic!(
                        "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                        word
                    );
                }
                _ => {}
            }
        }
    }
}
