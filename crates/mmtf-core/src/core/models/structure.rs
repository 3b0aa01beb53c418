use super::atom::Atom;
use super::bioassembly::BioAssembly;
use super::chain::{Chain, Model};
use super::crystal::CrystalInfo;
use super::entity::Entity;
use super::group::Group;
use super::header::HeaderInfo;
use super::ids::{ChainId, GroupId};
use super::topology::Bond;
use crate::core::utils::dssp;
use slotmap::SlotMap;

/// A fully assembled macromolecular structure.
///
/// Models, chains, groups and atoms form a strict tree owned by the structure.
/// Chains and groups live in arenas keyed by [`ChainId`] / [`GroupId`] and are
/// additionally kept in traversal order, so the position of a chain in
/// [`chains_iter`](Self::chains_iter) is its global chain index. Atoms are stored
/// flat; an atom's position in [`atoms`](Self::atoms) is its global atom index.
///
/// Entities and bioassemblies refer to chains by global index only.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub structure_id: String,
    pub(crate) models: Vec<Model>,
    pub(crate) chains: SlotMap<ChainId, Chain>,
    pub(crate) chain_order: Vec<ChainId>,
    pub(crate) groups: SlotMap<GroupId, Group>,
    pub(crate) group_order: Vec<GroupId>,
    pub(crate) atoms: Vec<Atom>,
    pub(crate) inter_group_bonds: Vec<Bond>,
    pub(crate) entities: Vec<Entity>,
    pub(crate) bioassemblies: Vec<BioAssembly>,
    pub crystal: Option<CrystalInfo>,
    pub header: HeaderInfo,
}

impl Structure {
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chain_order.len()
    }

    pub fn group_count(&self) -> usize {
        self.group_order.len()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Total bonds: every group bond plus every inter-group bond.
    pub fn bond_count(&self) -> usize {
        self.group_bond_count() + self.inter_group_bonds.len()
    }

    pub fn group_bond_count(&self) -> usize {
        self.groups_iter().map(|(_, g)| g.bonds.len()).sum()
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Chains in traversal order (model by model).
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Groups in traversal order.
    pub fn groups_iter(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.group_order
            .iter()
            .filter_map(|&id| self.groups.get(id).map(|group| (id, group)))
    }

    /// Looks up a chain by its global index.
    pub fn chain_at(&self, index: usize) -> Option<(ChainId, &Chain)> {
        let id = *self.chain_order.get(index)?;
        self.chains.get(id).map(|chain| (id, chain))
    }

    pub fn chain_index(&self, id: ChainId) -> Option<usize> {
        self.chain_order.iter().position(|&c| c == id)
    }

    pub fn model_chains(&self, model: usize) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.models
            .get(model)
            .map(|m| m.chains.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    pub fn chain_groups(&self, chain: ChainId) -> impl Iterator<Item = (GroupId, &Group)> {
        self.chains
            .get(chain)
            .map(|c| c.groups.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.groups.get(id).map(|group| (id, group)))
    }

    /// DSSP symbols of the chain's groups, `-` where undefined.
    pub fn secondary_structure_string(&self, chain: ChainId) -> String {
        self.chain_groups(chain)
            .map(|(_, g)| dssp::symbol(g.secondary_structure).unwrap_or('-'))
            .collect()
    }

    pub fn group_atoms(&self, group: GroupId) -> &[Atom] {
        self.groups
            .get(group)
            .and_then(|g| self.atoms.get(g.atom_range()))
            .unwrap_or_default()
    }

    pub fn inter_group_bonds(&self) -> &[Bond] {
        &self.inter_group_bonds
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The entity claiming the chain at `chain_index`, if any.
    pub fn entity_of_chain(&self, chain_index: usize) -> Option<&Entity> {
        self.entities.iter().find(|e| e.contains_chain(chain_index))
    }

    pub fn bioassemblies(&self) -> &[BioAssembly] {
        &self.bioassemblies
    }
}

// Arena keys depend on insertion history, so equality compares the tree by
// traversal order and content rather than by key.
impl PartialEq for Structure {
    fn eq(&self, other: &Self) -> bool {
        let same_chains = self
            .chains_iter()
            .map(|(_, c)| (&c.id, &c.name, c.model, c.groups.len()))
            .eq(other.chains_iter().map(|(_, c)| (&c.id, &c.name, c.model, c.groups.len())));
        let same_groups = self.group_count() == other.group_count()
            && self
                .groups_iter()
                .zip(other.groups_iter())
                .all(|((_, a), (_, b))| same_group(a, b));
        let same_atoms = self.atoms.len() == other.atoms.len()
            && self.atoms.iter().zip(&other.atoms).all(|(a, b)| same_atom(a, b));

        self.structure_id == other.structure_id
            && self.models.iter().map(|m| m.chains.len()).eq(other.models.iter().map(|m| m.chains.len()))
            && same_chains
            && same_groups
            && same_atoms
            && self.inter_group_bonds == other.inter_group_bonds
            && self.entities == other.entities
            && self.bioassemblies == other.bioassemblies
            && self.crystal == other.crystal
            && self.header == other.header
    }
}

fn same_group(a: &Group, b: &Group) -> bool {
    a.name == b.name
        && a.number == b.number
        && a.insertion_code == b.insertion_code
        && a.chem_comp_type == b.chem_comp_type
        && a.single_letter_code == b.single_letter_code
        && a.sequence_index == b.sequence_index
        && a.secondary_structure == b.secondary_structure
        && a.atoms == b.atoms
        && a.bonds == b.bonds
}

fn same_atom(a: &Atom, b: &Atom) -> bool {
    a.index == b.index
        && a.name == b.name
        && a.serial == b.serial
        && a.alt_loc == b.alt_loc
        && a.position == b.position
        && a.occupancy == b.occupancy
        && a.b_factor == b.b_factor
        && a.element == b.element
        && a.charge == b.charge
}
