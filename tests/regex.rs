use itertools::Itertools;
use regex_reach::automaton::{error::InvalidExpression, regex::build_from_postfix, Automaton};

fn accepts(dfa: &impl Automaton<char>, word: &str) -> bool {
    dfa.accepts(&word.chars().collect_vec())
}

#[test]
fn single_symbol() {
    let dfa = build_from_postfix("a").unwrap();

    assert!(accepts(&dfa, "a"));
    assert!(!accepts(&dfa, ""));
    assert!(!accepts(&dfa, "aa"));
}

#[test]
fn union() {
    let dfa = build_from_postfix("ab+").unwrap();

    assert!(accepts(&dfa, "a"));
    assert!(accepts(&dfa, "b"));
    assert!(!accepts(&dfa, "ab"));
    assert!(!accepts(&dfa, ""));
}

#[test]
fn concatenation() {
    let dfa = build_from_postfix("ab.").unwrap();

    assert!(accepts(&dfa, "ab"));
    assert!(!accepts(&dfa, "a"));
    assert!(!accepts(&dfa, "b"));
    assert!(!accepts(&dfa, "ba"));
    assert!(!accepts(&dfa, ""));
    assert!(!accepts(&dfa, "abb"));
}

#[test]
fn star() {
    let dfa = build_from_postfix("a*").unwrap();

    assert!(accepts(&dfa, ""));
    assert!(accepts(&dfa, "a"));
    assert!(accepts(&dfa, "aaaa"));
    assert!(!accepts(&dfa, "b"));
}

#[test]
fn results_are_minimal() {
    // a | b collapses into start plus one accepting state
    let dfa = build_from_postfix("ab+").unwrap();
    assert_eq!(dfa.state_count(), 2);

    // a* is a single accepting state with a self loop
    let dfa = build_from_postfix("a*").unwrap();
    assert_eq!(dfa.state_count(), 1);
}

#[test]
fn composed_expression() {
    // (a|b)* c
    let dfa = build_from_postfix("ab+*c.").unwrap();

    assert!(accepts(&dfa, "c"));
    assert!(accepts(&dfa, "abbac"));
    assert!(!accepts(&dfa, ""));
    assert!(!accepts(&dfa, "ab"));
    assert!(!accepts(&dfa, "cc"));
}

#[test]
fn whitespace_is_skipped() {
    let dfa = build_from_postfix("a b +").unwrap();

    assert!(accepts(&dfa, "a"));
    assert!(accepts(&dfa, "b"));
    assert!(!accepts(&dfa, "ab"));
}

#[test]
fn union_with_one_operand_fails() {
    assert_eq!(
        build_from_postfix("a+b").unwrap_err(),
        InvalidExpression::MissingOperands {
            operator: '+',
            position: 1,
            required: 2,
            available: 1,
        }
    );
}

#[test]
fn leading_operator_fails() {
    assert_eq!(
        build_from_postfix("+a.").unwrap_err(),
        InvalidExpression::MissingOperands {
            operator: '+',
            position: 0,
            required: 2,
            available: 0,
        }
    );
}

#[test]
fn starved_concatenation_fails() {
    assert_eq!(
        build_from_postfix("a*.bcd").unwrap_err(),
        InvalidExpression::MissingOperands {
            operator: '.',
            position: 2,
            required: 2,
            available: 1,
        }
    );

    assert_eq!(
        build_from_postfix("ab+.b**cd").unwrap_err(),
        InvalidExpression::MissingOperands {
            operator: '.',
            position: 3,
            required: 2,
            available: 1,
        }
    );
}

#[test]
fn star_without_operand_fails() {
    assert_eq!(
        build_from_postfix("*").unwrap_err(),
        InvalidExpression::MissingOperands {
            operator: '*',
            position: 0,
            required: 1,
            available: 0,
        }
    );
}

#[test]
fn leftover_operands_fail() {
    // "ab" pushes two machines and applies no operator
    assert_eq!(
        build_from_postfix("ab").unwrap_err(),
        InvalidExpression::LeftoverOperands { count: 2 }
    );
}

#[test]
fn empty_expression_fails() {
    assert_eq!(
        build_from_postfix("").unwrap_err(),
        InvalidExpression::Empty
    );
    assert_eq!(
        build_from_postfix("   ").unwrap_err(),
        InvalidExpression::Empty
    );
}

#[test]
fn foreign_character_fails() {
    assert_eq!(
        build_from_postfix("a#").unwrap_err(),
        InvalidExpression::UnexpectedToken {
            token: '#',
            position: 1,
        }
    );
}
