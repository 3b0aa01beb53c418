//! The decoded column set of one structure payload.

use crate::core::codec::{Column, ColumnField, CodecError, EncodedArray, EncodingConfig};
use crate::core::io::container::MmtfContainer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;
use thiserror::Error;

pub const MMTF_VERSION: &str = "1.0.0";
pub const MMTF_PRODUCER: &str = concat!("mmtf-rs ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Column '{column}': {source}")]
pub struct ColumnError {
    pub column: ColumnField,
    #[source]
    pub source: CodecError,
}

/// A deduplicated group template. Groups reference templates by position in
/// `groupList`; bond atom indices are local to the template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTemplate {
    pub group_name: String,
    #[serde(default)]
    pub single_letter_code: String,
    #[serde(default)]
    pub chem_comp_type: String,
    pub atom_name_list: Vec<String>,
    pub element_list: Vec<String>,
    pub formal_charge_list: Vec<i32>,
    #[serde(default)]
    pub bond_atom_list: Vec<i32>,
    #[serde(default)]
    pub bond_order_list: Vec<i32>,
}

impl GroupTemplate {
    pub fn atom_count(&self) -> usize {
        self.atom_name_list.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bond_order_list.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityEntry {
    pub chain_index_list: Vec<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub sequence: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformEntry {
    pub chain_index_list: Vec<i32>,
    pub matrix: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BioAssemblyEntry {
    #[serde(default)]
    pub name: String,
    pub transform_list: Vec<TransformEntry>,
}

/// Every field of a structure payload with its binary columns decoded.
///
/// Per-atom columns have one entry per atom, per-group columns one per group,
/// per-chain columns one per chain. Optional columns absent from the payload
/// are filled with their defaults, so every per-level column has a uniform
/// length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    pub structure_id: String,
    pub mmtf_version: String,
    pub mmtf_producer: String,

    pub num_bonds: i32,
    pub num_atoms: i32,
    pub num_groups: i32,
    pub num_chains: i32,
    pub num_models: i32,

    pub space_group: Option<String>,
    pub unit_cell: Option<Vec<f32>>,
    pub ncs_operators: Vec<Vec<f64>>,

    pub title: Option<String>,
    pub deposition_date: Option<String>,
    pub release_date: Option<String>,
    pub experimental_methods: Vec<String>,
    pub resolution: Option<f32>,
    pub r_free: Option<f32>,
    pub r_work: Option<f32>,

    pub group_list: Vec<GroupTemplate>,
    pub entity_list: Vec<EntityEntry>,
    pub bio_assembly_list: Vec<BioAssemblyEntry>,

    // Per atom
    pub x_coords: Vec<f32>,
    pub y_coords: Vec<f32>,
    pub z_coords: Vec<f32>,
    pub b_factors: Vec<f32>,
    pub occupancies: Vec<f32>,
    pub atom_ids: Vec<i32>,
    pub alt_locs: Vec<Option<char>>,

    // Per group
    pub group_ids: Vec<i32>,
    pub group_types: Vec<i32>,
    pub sec_structs: Vec<i32>,
    pub ins_codes: Vec<Option<char>>,
    pub sequence_indices: Vec<i32>,

    // Per chain / model
    pub chain_ids: Vec<String>,
    pub chain_names: Vec<String>,
    pub groups_per_chain: Vec<i32>,
    pub chains_per_model: Vec<i32>,

    // Inter-group bonds, two global atom indices per bond
    pub bond_atoms: Vec<i32>,
    pub bond_orders: Vec<i32>,
}

fn decode_field(field: ColumnField, bytes: &[u8]) -> Result<Column, ColumnError> {
    EncodedArray::from_bytes(bytes)
        .and_then(|array| array.decode())
        .map_err(|source| ColumnError {
            column: field,
            source,
        })
}

fn decode_ints(field: ColumnField, bytes: &[u8]) -> Result<Vec<i32>, ColumnError> {
    decode_field(field, bytes)?
        .into_ints()
        .map_err(|source| ColumnError { column: field, source })
}

fn decode_chars(field: ColumnField, bytes: &[u8]) -> Result<Vec<Option<char>>, ColumnError> {
    decode_field(field, bytes)?
        .into_chars()
        .map_err(|source| ColumnError { column: field, source })
}

fn decode_strings(field: ColumnField, bytes: &[u8]) -> Result<Vec<String>, ColumnError> {
    decode_field(field, bytes)?
        .into_strings()
        .map_err(|source| ColumnError { column: field, source })
}

fn encode_field(
    field: ColumnField,
    column: Column,
    config: &EncodingConfig,
) -> Result<ByteBuf, ColumnError> {
    let encoding = config.get(field);
    EncodedArray::encode(&column, encoding.strategy, encoding.parameter)
        .map(|array| ByteBuf::from(array.to_bytes()))
        .map_err(|source| ColumnError {
            column: field,
            source,
        })
}

impl ColumnSet {
    /// Decodes every binary field of `container`. The five float columns are
    /// independent and decoded in parallel.
    pub fn from_container(container: &MmtfContainer) -> Result<Self, ColumnError> {
        let float_sources = [
            (ColumnField::XCoord, Some(&container.x_coord_list)),
            (ColumnField::YCoord, Some(&container.y_coord_list)),
            (ColumnField::ZCoord, Some(&container.z_coord_list)),
            (ColumnField::BFactor, container.b_factor_list.as_ref()),
            (ColumnField::Occupancy, container.occupancy_list.as_ref()),
        ];
        let mut floats = float_sources
            .par_iter()
            .map(|&(field, bytes)| {
                bytes
                    .map(|b| {
                        decode_field(field, b)?
                            .into_floats()
                            .map_err(|source| ColumnError { column: field, source })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();
        let mut next_floats = || floats.next().flatten();

        let x_coords = next_floats().unwrap_or_default();
        let y_coords = next_floats().unwrap_or_default();
        let z_coords = next_floats().unwrap_or_default();
        let atom_count = x_coords.len();
        let b_factors = next_floats().unwrap_or_else(|| vec![0.0; atom_count]);
        let occupancies = next_floats().unwrap_or_else(|| vec![1.0; atom_count]);

        let atom_ids = match &container.atom_id_list {
            Some(bytes) => decode_ints(ColumnField::AtomId, bytes)?,
            None => (1..).take(atom_count).collect(),
        };
        let alt_locs = match &container.alt_loc_list {
            Some(bytes) => decode_chars(ColumnField::AltLoc, bytes)?,
            None => vec![None; atom_count],
        };

        let group_ids = decode_ints(ColumnField::GroupId, &container.group_id_list)?;
        let group_types = decode_ints(ColumnField::GroupType, &container.group_type_list)?;
        let group_count = group_types.len();
        let sec_structs = match &container.sec_struct_list {
            Some(bytes) => decode_ints(ColumnField::SecStruct, bytes)?,
            None => vec![-1; group_count],
        };
        let ins_codes = match &container.ins_code_list {
            Some(bytes) => decode_chars(ColumnField::InsCode, bytes)?,
            None => vec![None; group_count],
        };
        let sequence_indices = match &container.sequence_index_list {
            Some(bytes) => decode_ints(ColumnField::SequenceIndex, bytes)?,
            None => vec![-1; group_count],
        };

        let chain_ids = decode_strings(ColumnField::ChainId, &container.chain_id_list)?;
        let chain_names = match &container.chain_name_list {
            Some(bytes) => decode_strings(ColumnField::ChainName, bytes)?,
            None => chain_ids.clone(),
        };

        let bond_atoms = match &container.bond_atom_list {
            Some(bytes) => decode_ints(ColumnField::BondAtom, bytes)?,
            None => Vec::new(),
        };
        let bond_orders = match &container.bond_order_list {
            Some(bytes) => decode_ints(ColumnField::BondOrder, bytes)?,
            None => vec![1; bond_atoms.len() / 2],
        };

        Ok(Self {
            structure_id: container.structure_id.clone().unwrap_or_default(),
            mmtf_version: container.mmtf_version.clone(),
            mmtf_producer: container.mmtf_producer.clone(),
            num_bonds: container.num_bonds,
            num_atoms: container.num_atoms,
            num_groups: container.num_groups,
            num_chains: container.num_chains,
            num_models: container.num_models,
            space_group: container.space_group.clone(),
            unit_cell: container.unit_cell.clone(),
            ncs_operators: container.ncs_operator_list.clone(),
            title: container.title.clone(),
            deposition_date: container.deposition_date.clone(),
            release_date: container.release_date.clone(),
            experimental_methods: container.experimental_methods.clone(),
            resolution: container.resolution,
            r_free: container.r_free,
            r_work: container.r_work,
            group_list: container.group_list.clone(),
            entity_list: container.entity_list.clone(),
            bio_assembly_list: container.bio_assembly_list.clone(),
            x_coords,
            y_coords,
            z_coords,
            b_factors,
            occupancies,
            atom_ids,
            alt_locs,
            group_ids,
            group_types,
            sec_structs,
            ins_codes,
            sequence_indices,
            chain_ids,
            chain_names,
            groups_per_chain: container.groups_per_chain.clone(),
            chains_per_model: container.chains_per_model.clone(),
            bond_atoms,
            bond_orders,
        })
    }

    /// Encodes every column with the strategy `config` assigns to it.
    pub fn to_container(&self, config: &EncodingConfig) -> Result<MmtfContainer, ColumnError> {
        let floats = |field, values: &[f32]| encode_field(field, Column::Float(values.to_vec()), config);
        let ints = |field, values: &[i32]| encode_field(field, Column::Int(values.to_vec()), config);
        let chars = |field, values: &[Option<char>]| encode_field(field, Column::Char(values.to_vec()), config);
        let strings = |field, values: &[String]| encode_field(field, Column::Str(values.to_vec()), config);

        let has_bonds = !self.bond_atoms.is_empty();

        Ok(MmtfContainer {
            mmtf_version: self.mmtf_version.clone(),
            mmtf_producer: self.mmtf_producer.clone(),
            structure_id: Some(self.structure_id.clone()),
            title: self.title.clone(),
            deposition_date: self.deposition_date.clone(),
            release_date: self.release_date.clone(),
            experimental_methods: self.experimental_methods.clone(),
            resolution: self.resolution,
            r_free: self.r_free,
            r_work: self.r_work,
            space_group: self.space_group.clone(),
            unit_cell: self.unit_cell.clone(),
            ncs_operator_list: self.ncs_operators.clone(),
            bio_assembly_list: self.bio_assembly_list.clone(),
            entity_list: self.entity_list.clone(),
            num_bonds: self.num_bonds,
            num_atoms: self.num_atoms,
            num_groups: self.num_groups,
            num_chains: self.num_chains,
            num_models: self.num_models,
            group_list: self.group_list.clone(),
            x_coord_list: floats(ColumnField::XCoord, &self.x_coords)?,
            y_coord_list: floats(ColumnField::YCoord, &self.y_coords)?,
            z_coord_list: floats(ColumnField::ZCoord, &self.z_coords)?,
            b_factor_list: Some(floats(ColumnField::BFactor, &self.b_factors)?),
            occupancy_list: Some(floats(ColumnField::Occupancy, &self.occupancies)?),
            atom_id_list: Some(ints(ColumnField::AtomId, &self.atom_ids)?),
            alt_loc_list: Some(chars(ColumnField::AltLoc, &self.alt_locs)?),
            group_id_list: ints(ColumnField::GroupId, &self.group_ids)?,
            group_type_list: ints(ColumnField::GroupType, &self.group_types)?,
            sec_struct_list: Some(ints(ColumnField::SecStruct, &self.sec_structs)?),
            ins_code_list: Some(chars(ColumnField::InsCode, &self.ins_codes)?),
            sequence_index_list: Some(ints(ColumnField::SequenceIndex, &self.sequence_indices)?),
            chain_id_list: strings(ColumnField::ChainId, &self.chain_ids)?,
            chain_name_list: Some(strings(ColumnField::ChainName, &self.chain_names)?),
            groups_per_chain: self.groups_per_chain.clone(),
            chains_per_model: self.chains_per_model.clone(),
            bond_atom_list: has_bonds
                .then(|| ints(ColumnField::BondAtom, &self.bond_atoms))
                .transpose()?,
            bond_order_list: has_bonds
                .then(|| ints(ColumnField::BondOrder, &self.bond_orders))
                .transpose()?,
        })
    }
}
