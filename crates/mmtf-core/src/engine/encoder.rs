use crate::core::columns::{
    BioAssemblyEntry, ColumnSet, EntityEntry, GroupTemplate, MMTF_PRODUCER, MMTF_VERSION,
    TransformEntry,
};
use crate::core::models::group::Group;
use crate::core::models::structure::Structure;
use crate::engine::error::EncodeError;
use std::collections::HashMap;
use tracing::debug;

fn to_i32(value: usize, what: &'static str) -> Result<i32, EncodeError> {
    i32::try_from(value).map_err(|_| EncodeError::CountOverflow { what, value })
}

fn to_i32_list(values: &[usize], what: &'static str) -> Result<Vec<i32>, EncodeError> {
    values.iter().map(|&v| to_i32(v, what)).collect()
}

/// Deduplicates group templates, keeping first-seen order.
#[derive(Debug, Default)]
struct TemplateTable {
    templates: Vec<GroupTemplate>,
    index: HashMap<GroupTemplate, usize>,
}

impl TemplateTable {
    fn intern(&mut self, template: GroupTemplate) -> usize {
        if let Some(&existing) = self.index.get(&template) {
            return existing;
        }
        let next = self.templates.len();
        self.index.insert(template.clone(), next);
        self.templates.push(template);
        next
    }
}

fn template_of(structure: &Structure, group: &Group) -> Result<GroupTemplate, EncodeError> {
    let atoms = structure.atoms().get(group.atom_range()).unwrap_or_default();
    let mut bond_atom_list = Vec::with_capacity(group.bonds().len() * 2);
    for bond in group.bonds() {
        bond_atom_list.push(to_i32(bond.atom1, "group bond atom")?);
        bond_atom_list.push(to_i32(bond.atom2, "group bond atom")?);
    }
    Ok(GroupTemplate {
        group_name: group.name.clone(),
        single_letter_code: group.single_letter_code.to_string(),
        chem_comp_type: group.chem_comp_type.clone(),
        atom_name_list: atoms.iter().map(|a| a.name.clone()).collect(),
        element_list: atoms.iter().map(|a| a.element.clone()).collect(),
        formal_charge_list: atoms.iter().map(|a| a.charge).collect(),
        bond_atom_list,
        bond_order_list: group.bonds().iter().map(|b| b.order.value()).collect(),
    })
}

/// Flattens a structure graph into columns in canonical traversal order.
///
/// Declared totals are recomputed from the graph. Metadata is copied to
/// top-level fields. Fails when a count or index does not fit the 32-bit
/// integer columns of the format.
pub fn encode_columns(structure: &Structure) -> Result<ColumnSet, EncodeError> {
    let atom_count = structure.atom_count();
    let mut columns = ColumnSet {
        structure_id: structure.structure_id.clone(),
        mmtf_version: MMTF_VERSION.to_string(),
        mmtf_producer: MMTF_PRODUCER.to_string(),
        num_bonds: to_i32(structure.bond_count(), "bond")?,
        num_atoms: to_i32(atom_count, "atom")?,
        num_groups: to_i32(structure.group_count(), "group")?,
        num_chains: to_i32(structure.chain_count(), "chain")?,
        num_models: to_i32(structure.model_count(), "model")?,
        x_coords: Vec::with_capacity(atom_count),
        y_coords: Vec::with_capacity(atom_count),
        z_coords: Vec::with_capacity(atom_count),
        b_factors: Vec::with_capacity(atom_count),
        occupancies: Vec::with_capacity(atom_count),
        atom_ids: Vec::with_capacity(atom_count),
        alt_locs: Vec::with_capacity(atom_count),
        ..Default::default()
    };

    if let Some(crystal) = &structure.crystal {
        columns.space_group = Some(crystal.space_group.clone());
        columns.unit_cell = Some(crystal.unit_cell.to_vec());
        columns.ncs_operators = crystal.ncs_operators.clone();
    }
    let header = &structure.header;
    columns.title = header.title.clone();
    columns.deposition_date = header.deposition_date.clone();
    columns.release_date = header.release_date.clone();
    columns.experimental_methods = header.experimental_methods.clone();
    columns.resolution = header.resolution;
    columns.r_free = header.r_free;
    columns.r_work = header.r_work;

    columns.entity_list = structure
        .entities()
        .iter()
        .map(|e| {
            Ok(EntityEntry {
                chain_index_list: to_i32_list(&e.chain_indices, "entity chain index")?,
                description: e.description.clone(),
                entity_type: e.entity_type.to_string(),
                sequence: e.sequence.clone(),
            })
        })
        .collect::<Result<_, EncodeError>>()?;
    columns.bio_assembly_list = structure
        .bioassemblies()
        .iter()
        .map(|a| {
            Ok(BioAssemblyEntry {
                name: a.name.clone(),
                transform_list: a
                    .transforms
                    .iter()
                    .map(|t| {
                        Ok(TransformEntry {
                            chain_index_list: to_i32_list(&t.chain_indices, "transform chain index")?,
                            matrix: t.matrix.clone(),
                        })
                    })
                    .collect::<Result<_, EncodeError>>()?,
            })
        })
        .collect::<Result<_, EncodeError>>()?;

    let mut templates = TemplateTable::default();
    for model in structure.models() {
        columns.chains_per_model.push(to_i32(model.chains().len(), "model chain")?);
        for &chain_id in model.chains() {
            let Some(chain) = structure.chain(chain_id) else {
                continue;
            };
            columns.chain_ids.push(chain.id.clone());
            columns.chain_names.push(chain.name.clone());
            columns.groups_per_chain.push(to_i32(chain.groups().len(), "chain group")?);

            for &group_id in chain.groups() {
                let Some(group) = structure.group(group_id) else {
                    continue;
                };
                columns.group_ids.push(group.number);
                let template = templates.intern(template_of(structure, group)?);
                columns.group_types.push(to_i32(template, "group template")?);
                columns.sec_structs.push(group.secondary_structure.code());
                columns.ins_codes.push(group.insertion_code);
                let sequence_index = match group.sequence_index {
                    Some(index) => to_i32(index, "sequence index")?,
                    None => -1,
                };
                columns.sequence_indices.push(sequence_index);

                for atom in structure.group_atoms(group_id) {
                    columns.x_coords.push(atom.position.x);
                    columns.y_coords.push(atom.position.y);
                    columns.z_coords.push(atom.position.z);
                    columns.b_factors.push(atom.b_factor);
                    columns.occupancies.push(atom.occupancy);
                    columns.atom_ids.push(atom.serial);
                    columns.alt_locs.push(atom.alt_loc);
                }
            }
        }
    }
    columns.group_list = templates.templates;

    for bond in structure.inter_group_bonds() {
        columns.bond_atoms.push(to_i32(bond.atom1, "bond atom")?);
        columns.bond_atoms.push(to_i32(bond.atom2, "bond atom")?);
        columns.bond_orders.push(bond.order.value());
    }

    debug!(
        structure_id = %columns.structure_id,
        groups = columns.group_ids.len(),
        templates = columns.group_list.len(),
        "Encoded structure columns"
    );
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::StructureGraphBuilder;
    use crate::engine::builder::{
        AtomRecord, ChainRecord, GroupRecord, StructureBuilder, StructureTotals,
    };

    fn water_chain(waters: usize) -> Structure {
        let mut builder = StructureGraphBuilder::new();
        builder.init_structure(&StructureTotals::default(), "W");
        builder.set_model_info(0, 1);
        builder.set_chain_info(&ChainRecord {
            chain_id: "B".into(),
            chain_name: "A".into(),
            group_count: waters,
        });
        for i in 0..waters {
            builder.set_group_info(&GroupRecord {
                group_name: "HOH".into(),
                group_number: 100 + i as i32,
                insertion_code: None,
                group_type: "NON-POLYMER".into(),
                atom_count: 1,
                bond_count: 0,
                single_letter_code: '?',
                sequence_index: -1,
                secondary_structure: -1,
            });
            builder.set_atom_info(&AtomRecord {
                atom_name: "O".into(),
                serial_number: i as i32 + 1,
                alternative_location_id: None,
                x: i as f32,
                y: 0.0,
                z: 0.0,
                occupancy: 1.0,
                temperature_factor: 30.0,
                element: "O".into(),
                charge: 0,
            });
        }
        builder.finalize_structure()
    }

    #[test]
    fn identical_groups_share_one_template() {
        let columns = encode_columns(&water_chain(3)).unwrap();
        assert_eq!(columns.group_list.len(), 1);
        assert_eq!(columns.group_types, vec![0, 0, 0]);
        assert_eq!(columns.group_ids, vec![100, 101, 102]);
    }

    #[test]
    fn totals_are_recomputed_from_the_graph() {
        let columns = encode_columns(&water_chain(2)).unwrap();
        assert_eq!(columns.num_atoms, 2);
        assert_eq!(columns.num_groups, 2);
        assert_eq!(columns.num_chains, 1);
        assert_eq!(columns.num_models, 1);
        assert_eq!(columns.num_bonds, 0);
        assert_eq!(columns.chains_per_model, vec![1]);
        assert_eq!(columns.groups_per_chain, vec![2]);
        assert_eq!(columns.chain_ids, vec!["B".to_string()]);
        assert_eq!(columns.chain_names, vec!["A".to_string()]);
    }

    #[test]
    fn missing_sequence_index_is_written_as_sentinel() {
        let columns = encode_columns(&water_chain(1)).unwrap();
        assert_eq!(columns.sequence_indices, vec![-1]);
        assert_eq!(columns.sec_structs, vec![-1]);
    }

    #[test]
    fn counts_beyond_i32_are_reported_instead_of_clamped() {
        let too_many = i32::MAX as usize + 1;
        assert_eq!(to_i32(i32::MAX as usize, "atom"), Ok(i32::MAX));
        assert_eq!(
            to_i32(too_many, "atom"),
            Err(EncodeError::CountOverflow {
                what: "atom",
                value: too_many
            })
        );
        assert!(matches!(
            to_i32_list(&[0, 1, too_many], "entity chain index"),
            Err(EncodeError::CountOverflow {
                what: "entity chain index",
                ..
            })
        ));
    }

    #[test]
    fn template_table_keeps_first_seen_order() {
        let mut table = TemplateTable::default();
        let a = GroupTemplate {
            group_name: "ALA".into(),
            ..Default::default()
        };
        let b = GroupTemplate {
            group_name: "GLY".into(),
            ..Default::default()
        };
        assert_eq!(table.intern(b.clone()), 0);
        assert_eq!(table.intern(a.clone()), 1);
        assert_eq!(table.intern(b), 0);
        assert_eq!(table.templates[1], a);
    }
}
