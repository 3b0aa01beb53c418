use super::assembler::StructureAssembler;
use super::builder::{
    AtomRecord, BondRecord, ChainRecord, EntityRecord, GroupRecord, StructureBuilder,
    StructureTotals, TransformRecord,
};
use super::error::{AssemblyError, ValidationError};
use crate::core::columns::{ColumnSet, GroupTemplate};
use crate::core::models::header::HeaderInfo;
use tracing::trace;

fn malformed(column: &'static str, reason: impl Into<String>) -> ValidationError {
    ValidationError::MalformedColumns {
        column,
        reason: reason.into(),
    }
}

fn at<'a, T>(values: &'a [T], index: usize, column: &'static str) -> Result<&'a T, ValidationError> {
    values.get(index).ok_or_else(|| {
        malformed(
            column,
            format!("no entry at index {index} (column has {} entries)", values.len()),
        )
    })
}

fn count(value: i32, column: &'static str) -> Result<usize, ValidationError> {
    usize::try_from(value).map_err(|_| malformed(column, format!("negative value {value}")))
}

fn indices(values: &[i32], column: &'static str) -> Result<Vec<usize>, ValidationError> {
    values.iter().map(|&v| count(v, column)).collect()
}

/// Splits a flat `[a0, b0, a1, b1, ...]` list into bonds paired with `orders`.
fn bonds(
    atoms: &[i32],
    orders: &[i32],
    column: &'static str,
) -> Result<Vec<BondRecord>, ValidationError> {
    if atoms.len() % 2 != 0 {
        return Err(malformed(column, format!("odd bond atom list length {}", atoms.len())));
    }
    if atoms.len() / 2 != orders.len() {
        return Err(malformed(
            column,
            format!("{} bond atom pairs but {} bond orders", atoms.len() / 2, orders.len()),
        ));
    }
    atoms
        .chunks_exact(2)
        .zip(orders)
        .map(|(pair, &bond_order)| {
            Ok(BondRecord {
                atom_index_one: count(pair[0], column)?,
                atom_index_two: count(pair[1], column)?,
                bond_order,
            })
        })
        .collect()
}

pub(crate) fn header_info(columns: &ColumnSet) -> HeaderInfo {
    HeaderInfo {
        r_free: columns.r_free,
        r_work: columns.r_work,
        resolution: columns.resolution,
        title: columns.title.clone(),
        deposition_date: columns.deposition_date.clone(),
        release_date: columns.release_date.clone(),
        experimental_methods: columns.experimental_methods.clone(),
    }
}

/// Drives `assembler` through the full call stream described by `columns`.
///
/// Group templates are resolved through `groupTypeList`. A column too short
/// for the declared layout is reported as [`ValidationError::MalformedColumns`].
pub fn replay<B: StructureBuilder>(
    columns: &ColumnSet,
    assembler: &mut StructureAssembler<B>,
) -> Result<(), AssemblyError> {
    let totals = StructureTotals {
        bonds: count(columns.num_bonds, "numBonds")?,
        atoms: count(columns.num_atoms, "numAtoms")?,
        groups: count(columns.num_groups, "numGroups")?,
        chains: count(columns.num_chains, "numChains")?,
        models: count(columns.num_models, "numModels")?,
    };
    assembler.init_structure(totals, &columns.structure_id)?;

    if let Some(unit_cell) = &columns.unit_cell {
        assembler.set_xtal_info(
            columns.space_group.as_deref().unwrap_or_default(),
            unit_cell.clone(),
            columns.ncs_operators.clone(),
        )?;
    }
    assembler.set_header_info(header_info(columns))?;

    for (index, assembly) in columns.bio_assembly_list.iter().enumerate() {
        for transform in &assembly.transform_list {
            let record = TransformRecord {
                chain_indices: indices(&transform.chain_index_list, "bioAssemblyList")?,
                matrix: transform.matrix.clone(),
            };
            assembler.set_bio_assembly_trans(index, record, &assembly.name)?;
        }
    }

    for entity in &columns.entity_list {
        assembler.set_entity_info(EntityRecord {
            chain_indices: indices(&entity.chain_index_list, "entityList")?,
            sequence: entity.sequence.clone(),
            description: entity.description.clone(),
            entity_type: entity.entity_type.clone(),
        })?;
    }

    let mut chain_cursor = 0;
    let mut group_cursor = 0;
    let mut atom_cursor = 0;
    for (model_index, &chain_count) in columns.chains_per_model.iter().enumerate() {
        let chain_count = count(chain_count, "chainsPerModel")?;
        assembler.set_model_info(model_index, chain_count)?;
        trace!(model = model_index, chain_count, "Replaying model");

        for _ in 0..chain_count {
            let group_count = count(
                *at(&columns.groups_per_chain, chain_cursor, "groupsPerChain")?,
                "groupsPerChain",
            )?;
            assembler.set_chain_info(ChainRecord {
                chain_id: at(&columns.chain_ids, chain_cursor, "chainIdList")?.clone(),
                chain_name: at(&columns.chain_names, chain_cursor, "chainNameList")?.clone(),
                group_count,
            })?;
            chain_cursor += 1;

            for _ in 0..group_count {
                atom_cursor = replay_group(columns, assembler, group_cursor, atom_cursor)?;
                group_cursor += 1;
            }
        }
    }

    for bond in bonds(&columns.bond_atoms, &columns.bond_orders, "bondAtomList")? {
        assembler.set_inter_group_bond(bond)?;
    }
    Ok(())
}

/// Replays one group and its atoms and bonds. Returns the next atom cursor.
fn replay_group<B: StructureBuilder>(
    columns: &ColumnSet,
    assembler: &mut StructureAssembler<B>,
    group_index: usize,
    atom_cursor: usize,
) -> Result<usize, AssemblyError> {
    let template_index = count(
        *at(&columns.group_types, group_index, "groupTypeList")?,
        "groupTypeList",
    )?;
    let template: &GroupTemplate = at(&columns.group_list, template_index, "groupTypeList")?;
    let group_bonds = bonds(&template.bond_atom_list, &template.bond_order_list, "groupList")?;

    assembler.set_group_info(GroupRecord {
        group_name: template.group_name.clone(),
        group_number: *at(&columns.group_ids, group_index, "groupIdList")?,
        insertion_code: *at(&columns.ins_codes, group_index, "insCodeList")?,
        group_type: template.chem_comp_type.clone(),
        atom_count: template.atom_count(),
        bond_count: group_bonds.len(),
        single_letter_code: template.single_letter_code.chars().next().unwrap_or('?'),
        sequence_index: *at(&columns.sequence_indices, group_index, "sequenceIndexList")?,
        secondary_structure: *at(&columns.sec_structs, group_index, "secStructList")?,
    })?;

    for local in 0..template.atom_count() {
        let atom = atom_cursor + local;
        assembler.set_atom_info(AtomRecord {
            atom_name: at(&template.atom_name_list, local, "groupList")?.clone(),
            serial_number: *at(&columns.atom_ids, atom, "atomIdList")?,
            alternative_location_id: *at(&columns.alt_locs, atom, "altLocList")?,
            x: *at(&columns.x_coords, atom, "xCoordList")?,
            y: *at(&columns.y_coords, atom, "yCoordList")?,
            z: *at(&columns.z_coords, atom, "zCoordList")?,
            occupancy: *at(&columns.occupancies, atom, "occupancyList")?,
            temperature_factor: *at(&columns.b_factors, atom, "bFactorList")?,
            element: at(&template.element_list, local, "groupList")?.clone(),
            charge: *at(&template.formal_charge_list, local, "groupList")?,
        })?;
    }
    for bond in group_bonds {
        assembler.set_group_bond(bond)?;
    }
    Ok(atom_cursor + template.atom_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::StructureGraphBuilder;
    use crate::core::models::structure::Structure;

    fn template(name: &str, atoms: &[&str], bond_atoms: Vec<i32>, bond_orders: Vec<i32>) -> GroupTemplate {
        GroupTemplate {
            group_name: name.into(),
            single_letter_code: name[..1].into(),
            chem_comp_type: "L-PEPTIDE LINKING".into(),
            atom_name_list: atoms.iter().map(|a| a.to_string()).collect(),
            element_list: atoms.iter().map(|a| a[..1].to_string()).collect(),
            formal_charge_list: vec![0; atoms.len()],
            bond_atom_list: bond_atoms,
            bond_order_list: bond_orders,
        }
    }

    /// Chain "A" holding ALA (N, CA, one bond) and GLY (N).
    fn two_group_columns() -> ColumnSet {
        ColumnSet {
            structure_id: "2GRP".into(),
            num_bonds: 1,
            num_atoms: 3,
            num_groups: 2,
            num_chains: 1,
            num_models: 1,
            group_list: vec![
                template("ALA", &["N", "CA"], vec![0, 1], vec![1]),
                template("GLY", &["N"], Vec::new(), Vec::new()),
            ],
            x_coords: vec![0.0, 1.5, 3.0],
            y_coords: vec![0.0; 3],
            z_coords: vec![0.0; 3],
            b_factors: vec![10.0; 3],
            occupancies: vec![1.0; 3],
            atom_ids: vec![1, 2, 3],
            alt_locs: vec![None; 3],
            group_ids: vec![1, 2],
            group_types: vec![0, 1],
            sec_structs: vec![-1, -1],
            ins_codes: vec![None, None],
            sequence_indices: vec![0, 1],
            chain_ids: vec!["A".into()],
            chain_names: vec!["A".into()],
            groups_per_chain: vec![2],
            chains_per_model: vec![1],
            ..ColumnSet::default()
        }
    }

    fn assemble(columns: &ColumnSet) -> Result<Structure, AssemblyError> {
        let mut assembler = StructureAssembler::new(StructureGraphBuilder::new());
        replay(columns, &mut assembler)?;
        assembler.finalize()
    }

    fn malformed_column(result: Result<Structure, AssemblyError>) -> &'static str {
        match result {
            Err(AssemblyError::Validation(ValidationError::MalformedColumns { column, .. })) => column,
            other => panic!("expected malformed columns, got {other:?}"),
        }
    }

    #[test]
    fn well_formed_columns_replay_into_a_structure() {
        let structure = assemble(&two_group_columns()).unwrap();
        assert_eq!(structure.structure_id, "2GRP");
        assert_eq!(structure.atom_count(), 3);
        assert_eq!(structure.group_count(), 2);
        assert_eq!(structure.group_bond_count(), 1);
        assert_eq!(structure.atoms()[1].name, "CA");
    }

    #[test]
    fn huge_declared_totals_with_empty_columns_fail_cleanly() {
        let columns = ColumnSet {
            num_atoms: i32::MAX,
            num_groups: i32::MAX,
            ..ColumnSet::default()
        };
        assert!(matches!(
            assemble(&columns),
            Err(AssemblyError::Validation(ValidationError::TotalMismatch { .. }))
        ));
    }

    #[test]
    fn group_type_outside_group_list_is_malformed() {
        let mut columns = two_group_columns();
        columns.group_types[1] = 5;
        assert_eq!(malformed_column(assemble(&columns)), "groupTypeList");
    }

    #[test]
    fn odd_template_bond_list_is_malformed() {
        let mut columns = two_group_columns();
        columns.group_list[0].bond_atom_list = vec![0, 1, 1];
        assert_eq!(malformed_column(assemble(&columns)), "groupList");
    }

    #[test]
    fn negative_chains_per_model_is_malformed() {
        let mut columns = two_group_columns();
        columns.chains_per_model = vec![-1];
        assert_eq!(malformed_column(assemble(&columns)), "chainsPerModel");
    }

    #[test]
    fn short_atom_column_is_malformed() {
        let mut columns = two_group_columns();
        columns.x_coords.pop();
        assert_eq!(malformed_column(assemble(&columns)), "xCoordList");

        let mut columns = two_group_columns();
        columns.atom_ids.truncate(1);
        assert_eq!(malformed_column(assemble(&columns)), "atomIdList");
    }

    #[test]
    fn unpaired_inter_group_bond_orders_are_malformed() {
        let mut columns = two_group_columns();
        columns.bond_atoms = vec![1, 2];
        assert_eq!(malformed_column(assemble(&columns)), "bondAtomList");
    }

    #[test]
    fn header_fields_are_copied() {
        let mut columns = two_group_columns();
        columns.title = Some("Dipeptide".into());
        columns.r_free = Some(0.25);
        let header = header_info(&columns);
        assert_eq!(header.title.as_deref(), Some("Dipeptide"));
        assert_eq!(header.r_free, Some(0.25));
        assert_eq!(header.resolution, None);
    }
}
