use std::collections::VecDeque;

use hashbrown::HashSet;
use petgraph::{graph::NodeIndex, visit::EdgeRef, Direction};

use crate::{
    automaton::{dfa::DFA, error::InvalidExpression, regex, AutomatonEdge, AutomatonNode},
    logger::{LogLevel, Logger},
};

/// Searches a machine's language for the shortest word whose length is
/// congruent to `residue` modulo `modulus`.
///
/// The search is a breadth-first walk of the product of the machine's
/// states with the residue classes: every transition advances the word
/// length by one, so the residue class of a product node always equals the
/// length of the shortest word reaching it. The first accepting node in the
/// requested class yields the answer. The product has at most
/// `state_count * modulus` nodes, so the walk always terminates.
#[derive(Debug, Clone)]
pub struct ResidueSolverOptions {
    pub log_level: LogLevel,
}

impl Default for ResidueSolverOptions {
    fn default() -> Self {
        ResidueSolverOptions {
            log_level: LogLevel::Warn,
        }
    }
}

impl ResidueSolverOptions {
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn to_solver<N: AutomatonNode, E: AutomatonEdge>(
        self,
        dfa: DFA<N, E>,
        modulus: usize,
        residue: usize,
    ) -> ResidueSolver<N, E> {
        let logger = Logger::new(self.log_level, "Residue Solver");

        ResidueSolver {
            logger,
            dfa,
            modulus,
            residue,
        }
    }
}

#[derive(Debug)]
pub struct ResidueSolver<N: AutomatonNode, E: AutomatonEdge> {
    logger: Logger,
    dfa: DFA<N, E>,
    modulus: usize,
    residue: usize,
}

impl<N: AutomatonNode, E: AutomatonEdge> ResidueSolver<N, E> {
    /// Returns the length of the shortest word in the language with the
    /// requested residue, or `None` if the language contains no such word.
    pub fn solve(&self) -> Option<usize> {
        assert!(self.modulus > 0, "the modulus must be positive");
        assert!(
            self.residue < self.modulus,
            "the residue must be smaller than the modulus"
        );

        let start = self
            .dfa
            .get_start()
            .expect("the machine must have a start state");

        self.logger
            .object("Residue Solver")
            .add_field("states", self.dfa.state_count())
            .add_field("modulus", self.modulus)
            .add_field("residue", self.residue)
            .log(LogLevel::Info);

        let mut visited: HashSet<(NodeIndex<u32>, usize)> = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert((start, 0));
        queue.push_back((start, 0, 0usize));

        while let Some((state, class, length)) = queue.pop_front() {
            if class == self.residue && self.dfa.is_accepting(state) {
                self.logger.info(&format!(
                    "found a word of length {} after visiting {} product nodes",
                    length,
                    visited.len()
                ));
                return Some(length);
            }

            let next_class = (class + 1) % self.modulus;
            for edge in self.dfa.graph.edges_directed(state, Direction::Outgoing) {
                if visited.insert((edge.target(), next_class)) {
                    queue.push_back((edge.target(), next_class, length + 1));
                }
            }
        }

        self.logger.info(&format!(
            "no word with residue {} mod {} exists, visited {} product nodes",
            self.residue,
            self.modulus,
            visited.len()
        ));

        None
    }
}

/// Builds the machine for a postfix regular expression and searches its
/// language for the shortest word with the requested residue.
pub fn solve_regex_residue(
    expr: &str,
    modulus: usize,
    residue: usize,
) -> Result<Option<usize>, InvalidExpression> {
    let dfa = regex::build_from_postfix(expr)?;

    Ok(ResidueSolverOptions::default()
        .to_solver(dfa, modulus, residue)
        .solve())
}
