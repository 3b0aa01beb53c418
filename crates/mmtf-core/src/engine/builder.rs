use crate::core::models::crystal::CrystalInfo;
use crate::core::models::header::HeaderInfo;

/// Declared totals announced by `init_structure`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureTotals {
    pub bonds: usize,
    pub atoms: usize,
    pub groups: usize,
    pub chains: usize,
    pub models: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRecord {
    pub chain_id: String,   // Internal identifier, 1-4 characters
    pub chain_name: String, // Author-facing name
    pub group_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub group_name: String,
    pub group_number: i32,
    pub insertion_code: Option<char>,
    pub group_type: String,
    pub atom_count: usize,
    pub bond_count: usize,
    pub single_letter_code: char,
    pub sequence_index: i32,      // -1 when not part of an entity sequence
    pub secondary_structure: i32, // DSSP code, -1 when undefined
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub atom_name: String,
    pub serial_number: i32,
    pub alternative_location_id: Option<char>,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub occupancy: f32,
    pub temperature_factor: f32,
    pub element: String,
    pub charge: i32,
}

/// A bond between two atoms. Group bonds use indices local to their group,
/// inter-group bonds use global atom indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondRecord {
    pub atom_index_one: usize,
    pub atom_index_two: usize,
    pub bond_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    pub chain_indices: Vec<usize>,
    pub sequence: String,
    pub description: String,
    pub entity_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformRecord {
    pub chain_indices: Vec<usize>,
    pub matrix: Vec<f64>,
}

/// The capability set a structure representation implements to be populated
/// from a validated call stream.
///
/// Every method is infallible: a builder only ever sees facts that passed
/// validation, delivered in this order:
///
/// 1. [`init_structure`](Self::init_structure)
/// 2. [`set_xtal_info`](Self::set_xtal_info), if crystal info is present
/// 3. [`set_header_info`](Self::set_header_info), if header info is present
/// 4. [`set_bio_assembly_trans`](Self::set_bio_assembly_trans) for each transform
/// 5. [`set_entity_info`](Self::set_entity_info) for each entity
/// 6. for each model, [`set_model_info`](Self::set_model_info) followed by its
///    chains, each chain followed by its groups, each group followed by its
///    atoms and then its group bonds
/// 7. [`set_inter_group_bond`](Self::set_inter_group_bond) for each inter-group bond
/// 8. [`finalize_structure`](Self::finalize_structure)
pub trait StructureBuilder {
    type Output;

    fn init_structure(&mut self, totals: &StructureTotals, structure_id: &str);

    fn set_xtal_info(&mut self, crystal: &CrystalInfo);

    fn set_header_info(&mut self, header: &HeaderInfo);

    fn set_bio_assembly_trans(
        &mut self,
        bioassembly_index: usize,
        transform: &TransformRecord,
        name: &str,
    );

    fn set_entity_info(&mut self, entity: &EntityRecord);

    fn set_model_info(&mut self, model_index: usize, chain_count: usize);

    fn set_chain_info(&mut self, chain: &ChainRecord);

    fn set_group_info(&mut self, group: &GroupRecord);

    fn set_atom_info(&mut self, atom: &AtomRecord);

    fn set_group_bond(&mut self, bond: &BondRecord);

    fn set_inter_group_bond(&mut self, bond: &BondRecord);

    fn finalize_structure(self) -> Self::Output;
}
