use super::ids::{ChainId, GroupId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: String,                   // Internal chain identifier (1-4 characters)
    pub name: String,                 // Public (author) chain name
    pub model: usize,                 // Index of the owning model
    pub(crate) groups: Vec<GroupId>,  // Ordered groups belonging to this chain
}

impl Chain {
    pub(crate) fn new(id: &str, name: &str, model: usize) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            model,
            groups: Vec::new(),
        }
    }

    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }
}

/// One model (e.g. one NMR conformer) of a structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub(crate) chains: Vec<ChainId>,
}

impl Model {
    pub fn chains(&self) -> &[ChainId] {
        &self.chains
    }
}
