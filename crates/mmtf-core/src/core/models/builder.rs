use super::atom::Atom;
use super::bioassembly::{BioAssembly, Transform};
use super::chain::{Chain, Model};
use super::crystal::CrystalInfo;
use super::entity::{Entity, EntityType};
use super::group::{Group, SecondaryStructure};
use super::header::HeaderInfo;
use super::ids::{ChainId, GroupId};
use super::structure::Structure;
use super::topology::{Bond, BondOrder};
use crate::engine::builder::{
    AtomRecord, BondRecord, ChainRecord, EntityRecord, GroupRecord, StructureBuilder,
    StructureTotals, TransformRecord,
};
use nalgebra::Point3;
use tracing::warn;

/// Builds the default [`Structure`] graph from a validated call stream.
#[derive(Debug, Default)]
pub struct StructureGraphBuilder {
    structure: Structure,

    current_chain: Option<ChainId>,
    current_group: Option<GroupId>,
}

impl StructureGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StructureBuilder for StructureGraphBuilder {
    type Output = Structure;

    fn init_structure(&mut self, totals: &StructureTotals, structure_id: &str) {
        let s = &mut self.structure;
        s.structure_id = structure_id.to_string();
        s.models.reserve(totals.models);
        s.chain_order.reserve(totals.chains);
        s.group_order.reserve(totals.groups);
        s.atoms.reserve(totals.atoms);
    }

    fn set_xtal_info(&mut self, crystal: &CrystalInfo) {
        self.structure.crystal = Some(crystal.clone());
    }

    fn set_header_info(&mut self, header: &HeaderInfo) {
        self.structure.header = header.clone();
    }

    fn set_bio_assembly_trans(
        &mut self,
        bioassembly_index: usize,
        transform: &TransformRecord,
        name: &str,
    ) {
        let assemblies = &mut self.structure.bioassemblies;
        let position = match assemblies.iter().position(|a| a.index == bioassembly_index) {
            Some(position) => position,
            None => {
                assemblies.push(BioAssembly {
                    index: bioassembly_index,
                    name: name.to_string(),
                    transforms: Vec::new(),
                });
                assemblies.len() - 1
            }
        };
        assemblies[position].transforms.push(Transform {
            chain_indices: transform.chain_indices.clone(),
            matrix: transform.matrix.clone(),
        });
    }

    fn set_entity_info(&mut self, entity: &EntityRecord) {
        let entity_type = match entity.entity_type.parse::<EntityType>() {
            Ok(ty) => ty,
            Err(e) => {
                warn!("{}; treating entity as polymer", e);
                EntityType::Polymer
            }
        };
        self.structure.entities.push(Entity {
            chain_indices: entity.chain_indices.clone(),
            sequence: entity.sequence.clone(),
            description: entity.description.clone(),
            entity_type,
        });
    }

    fn set_model_info(&mut self, _model_index: usize, chain_count: usize) {
        self.structure.models.push(Model {
            chains: Vec::with_capacity(chain_count),
        });
        self.current_chain = None;
        self.current_group = None;
    }

    fn set_chain_info(&mut self, chain: &ChainRecord) {
        let s = &mut self.structure;
        let model_index = s.models.len().saturating_sub(1);
        let Some(model) = s.models.last_mut() else {
            warn!("Chain '{}' delivered before any model; skipped", chain.chain_id);
            return;
        };
        let mut new_chain = Chain::new(&chain.chain_id, &chain.chain_name, model_index);
        new_chain.groups.reserve(chain.group_count);
        let id = s.chains.insert(new_chain);
        model.chains.push(id);
        s.chain_order.push(id);
        self.current_chain = Some(id);
        self.current_group = None;
    }

    fn set_group_info(&mut self, group: &GroupRecord) {
        let s = &mut self.structure;
        let Some(chain_id) = self.current_chain else {
            warn!("Group '{}' delivered before any chain; skipped", group.group_name);
            return;
        };
        let start = s.atoms.len();
        let id = s.groups.insert(Group {
            name: group.group_name.clone(),
            number: group.group_number,
            insertion_code: group.insertion_code,
            chem_comp_type: group.group_type.clone(),
            single_letter_code: group.single_letter_code,
            sequence_index: usize::try_from(group.sequence_index).ok(),
            secondary_structure: SecondaryStructure::from_code(group.secondary_structure)
                .unwrap_or_default(),
            chain_id,
            atoms: start..start,
            bonds: Vec::with_capacity(group.bond_count),
        });
        if let Some(chain) = s.chains.get_mut(chain_id) {
            chain.groups.push(id);
        }
        s.group_order.push(id);
        self.current_group = Some(id);
    }

    fn set_atom_info(&mut self, atom: &AtomRecord) {
        let s = &mut self.structure;
        let Some((group_id, group)) = self
            .current_group
            .and_then(|id| s.groups.get_mut(id).map(|group| (id, group)))
        else {
            warn!("Atom '{}' delivered before any group; skipped", atom.atom_name);
            return;
        };
        let index = s.atoms.len();
        group.atoms.end = index + 1;
        s.atoms.push(Atom {
            index,
            name: atom.atom_name.clone(),
            serial: atom.serial_number,
            alt_loc: atom.alternative_location_id,
            position: Point3::new(atom.x, atom.y, atom.z),
            occupancy: atom.occupancy,
            b_factor: atom.temperature_factor,
            element: atom.element.clone(),
            charge: atom.charge,
            group_id,
        });
    }

    fn set_group_bond(&mut self, bond: &BondRecord) {
        let Some(group) = self
            .current_group
            .and_then(|id| self.structure.groups.get_mut(id))
        else {
            return;
        };
        group.bonds.push(to_bond(bond));
    }

    fn set_inter_group_bond(&mut self, bond: &BondRecord) {
        self.structure.inter_group_bonds.push(to_bond(bond));
    }

    fn finalize_structure(self) -> Structure {
        self.structure
    }
}

fn to_bond(bond: &BondRecord) -> Bond {
    Bond::new(
        bond.atom_index_one,
        bond.atom_index_two,
        BondOrder::try_from(bond.bond_order).unwrap_or_default(),
    )
}
