use crate::automaton::AutomatonNode;

/// A node in an automaton graph: some data of type `T` plus a flag marking
/// the node as accepting. Shared between [NFA](crate::automaton::nfa::NFA)
/// and [DFA](crate::automaton::dfa::DFA).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DfaNode<T: AutomatonNode> {
    pub accepting: bool,
    pub data: T,
}

impl<T: AutomatonNode> DfaNode<T> {
    pub fn new(accepting: bool, data: T) -> Self {
        DfaNode { accepting, data }
    }

    pub fn accepting(data: T) -> Self {
        DfaNode::new(true, data)
    }

    pub fn non_accepting(data: T) -> Self {
        DfaNode::new(false, data)
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}
