use thiserror::Error;

/// Errors raised while building a machine from a construction record.
///
/// These fail before any algorithm runs; no partial machine is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidConstruction {
    #[error("state id {id} is out of range, the machine has {count} states")]
    StateOutOfRange { id: usize, count: usize },

    #[error("transition label {label:?} is neither the epsilon marker nor a single alphabet symbol")]
    UnknownLabel { label: String },
}

/// Errors raised while evaluating a postfix regular expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidExpression {
    #[error(
        "operator '{operator}' at position {position} needs {required} operands but only {available} were available"
    )]
    MissingOperands {
        operator: char,
        position: usize,
        required: usize,
        available: usize,
    },

    #[error("unexpected character '{token}' at position {position}")]
    UnexpectedToken { token: char, position: usize },

    #[error("expression left {count} machines on the stack, expected exactly one")]
    LeftoverOperands { count: usize },

    #[error("the expression is empty")]
    Empty,
}
