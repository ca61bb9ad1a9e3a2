use itertools::Itertools;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use super::{
    dfa::{minimization::Minimizable, node::DfaNode, DFA},
    error::InvalidConstruction,
    nfa::{NfaEdge, NFA},
    AutBuild, Automaton, AutomatonNode,
};

/// The transition label marking an epsilon transition in the exchange
/// format. Everywhere else epsilon is [NfaEdge::Epsilon]; the marker only
/// exists at the serialization boundary.
pub const EPSILON_LABEL: &str = "eps";

/// A textual description of a finite state machine, and at the same time
/// the JSON exchange format used to persist and compare machines.
///
/// State ids are indices in `0..number_of_states`. A transition label is a
/// single alphabet symbol or [EPSILON_LABEL]. Serializing and deserializing
/// a machine reproduces one with the same accept behavior; state numbering
/// is only preserved up to isomorphism.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    pub alphabet: String,
    pub number_of_states: usize,
    pub transitions: Vec<(usize, String, usize)>,
    pub start_id: usize,
    pub final_ids: Vec<usize>,
}

impl MachineSpec {
    /// Builds the described NFA, validating every id and label first.
    /// Duplicate final ids collapse.
    pub fn to_nfa(&self) -> Result<NFA<usize, char>, InvalidConstruction> {
        let alphabet = self.alphabet.chars().unique().collect_vec();

        let mut nfa = NFA::new(alphabet.clone());

        let states = (0..self.number_of_states)
            .map(|id| nfa.add_state(DfaNode::non_accepting(id)))
            .collect_vec();

        for (from, label, to) in &self.transitions {
            self.check_id(*from)?;
            self.check_id(*to)?;

            let edge = if label.as_str() == EPSILON_LABEL {
                NfaEdge::Epsilon
            } else {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) if alphabet.contains(&symbol) => NfaEdge::Symbol(symbol),
                    _ => {
                        return Err(InvalidConstruction::UnknownLabel {
                            label: label.clone(),
                        })
                    }
                }
            };

            nfa.add_transition(states[*from], states[*to], edge);
        }

        self.check_id(self.start_id)?;
        nfa.set_start(states[self.start_id]);

        for id in self.final_ids.iter().sorted().dedup() {
            self.check_id(*id)?;
            nfa.set_accepting(states[*id]);
        }

        Ok(nfa)
    }

    /// Builds the described machine and determinizes it.
    pub fn to_dfa(&self) -> Result<DFA<(), char>, InvalidConstruction> {
        Ok(self.to_nfa()?.determinize())
    }

    /// Builds the described machine, determinizes and minimizes it.
    pub fn to_minimal_dfa(&self) -> Result<DFA<(), char>, InvalidConstruction> {
        Ok(self.to_nfa()?.determinize().minimize())
    }

    /// Serializes a DFA back into the exchange format.
    pub fn from_dfa<N: AutomatonNode>(dfa: &DFA<N, char>) -> MachineSpec {
        MachineSpec {
            alphabet: dfa.alphabet().iter().collect(),
            number_of_states: dfa.state_count(),
            transitions: dfa
                .graph
                .edge_references()
                .map(|edge| {
                    (
                        edge.source().index(),
                        edge.weight().to_string(),
                        edge.target().index(),
                    )
                })
                .collect_vec(),
            start_id: dfa
                .get_start()
                .expect("the DFA must have a start state")
                .index(),
            final_ids: dfa
                .final_states()
                .iter()
                .map(|state| state.index())
                .collect_vec(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_file(&self, path: &str) -> anyhow::Result<()> {
        Ok(std::fs::write(path, self.to_json()?)?)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn check_id(&self, id: usize) -> Result<(), InvalidConstruction> {
        if id < self.number_of_states {
            Ok(())
        } else {
            Err(InvalidConstruction::StateOutOfRange {
                id,
                count: self.number_of_states,
            })
        }
    }
}
