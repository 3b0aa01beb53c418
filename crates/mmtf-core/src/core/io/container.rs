use crate::core::columns::{BioAssemblyEntry, EntityEntry, GroupTemplate};
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;

/// The MessagePack map a structure payload travels in.
///
/// Binary fields hold encoded arrays (12-byte header plus payload) and are
/// decoded into a [`ColumnSet`](crate::core::columns::ColumnSet).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MmtfContainer {
    #[serde(default)]
    pub mmtf_version: String,
    #[serde(default)]
    pub mmtf_producer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposition_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experimental_methods: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_free: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_work: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cell: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ncs_operator_list: Vec<Vec<f64>>,

    #[serde(default)]
    pub bio_assembly_list: Vec<BioAssemblyEntry>,
    #[serde(default)]
    pub entity_list: Vec<EntityEntry>,

    pub num_bonds: i32,
    pub num_atoms: i32,
    pub num_groups: i32,
    pub num_chains: i32,
    pub num_models: i32,

    pub group_list: Vec<GroupTemplate>,

    pub x_coord_list: ByteBuf,
    pub y_coord_list: ByteBuf,
    pub z_coord_list: ByteBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_factor_list: Option<ByteBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy_list: Option<ByteBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atom_id_list: Option<ByteBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_loc_list: Option<ByteBuf>,

    pub group_id_list: ByteBuf,
    pub group_type_list: ByteBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sec_struct_list: Option<ByteBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ins_code_list: Option<ByteBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_index_list: Option<ByteBuf>,

    pub chain_id_list: ByteBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_name_list: Option<ByteBuf>,
    pub groups_per_chain: Vec<i32>,
    pub chains_per_model: Vec<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bond_atom_list: Option<ByteBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bond_order_list: Option<ByteBuf>,
}
