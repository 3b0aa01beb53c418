use super::assembler::Arena;
use super::builder::BondRecord;
use super::error::ValidationError;
use crate::core::models::entity::EntityType;
use crate::core::models::group::SecondaryStructure;
use crate::core::models::topology::BondOrder;

/// Runs every check in order and returns the first violation.
pub(crate) fn validate(arena: &Arena) -> Result<(), ValidationError> {
    check_model_chains(arena)?;
    check_chain_groups(arena)?;
    check_group_contents(arena)?;
    check_totals(arena)?;
    check_group_bonds(arena)?;
    check_inter_group_bonds(arena)?;
    check_group_codes(arena)?;
    check_entities(arena)?;
    check_bioassemblies(arena)?;
    check_unit_cell(arena)
}

fn mismatch(declared: usize, found: usize) -> Option<(usize, usize)> {
    (declared != found).then_some((declared, found))
}

pub(crate) fn check_model_chains(arena: &Arena) -> Result<(), ValidationError> {
    for (model, slot) in arena.models.iter().enumerate() {
        if let Some((declared, found)) = mismatch(slot.declared_chains, slot.chains.len()) {
            return Err(ValidationError::ChainCountMismatch {
                model,
                declared,
                found,
            });
        }
    }
    Ok(())
}

pub(crate) fn check_chain_groups(arena: &Arena) -> Result<(), ValidationError> {
    for (chain, slot) in arena.chains.iter().enumerate() {
        if let Some((declared, found)) = mismatch(slot.record.group_count, slot.groups.len()) {
            return Err(ValidationError::GroupCountMismatch {
                chain,
                declared,
                found,
            });
        }
    }
    Ok(())
}

pub(crate) fn check_group_contents(arena: &Arena) -> Result<(), ValidationError> {
    for (group, slot) in arena.groups.iter().enumerate() {
        if let Some((declared, found)) = mismatch(slot.record.atom_count, slot.atoms.len()) {
            return Err(ValidationError::AtomCountMismatch {
                group,
                declared,
                found,
            });
        }
        if let Some((declared, found)) = mismatch(slot.record.bond_count, slot.bonds.len()) {
            return Err(ValidationError::BondCountMismatch {
                group,
                declared,
                found,
            });
        }
    }
    Ok(())
}

pub(crate) fn check_totals(arena: &Arena) -> Result<(), ValidationError> {
    let totals = &arena.totals;
    let levels = [
        ("model", totals.models, arena.models.len()),
        ("chain", totals.chains, arena.chains.len()),
        ("group", totals.groups, arena.groups.len()),
        ("atom", totals.atoms, arena.atoms.len()),
        (
            "bond",
            totals.bonds,
            arena.group_bonds.len() + arena.inter_group_bonds.len(),
        ),
    ];
    for (level, declared, found) in levels {
        if declared != found {
            return Err(ValidationError::TotalMismatch {
                level,
                declared,
                found,
            });
        }
    }
    Ok(())
}

fn out_of_bounds(bond: &BondRecord, limit: usize) -> Option<usize> {
    [bond.atom_index_one, bond.atom_index_two]
        .into_iter()
        .find(|&atom| atom >= limit)
}

fn valid_order(order: i32) -> bool {
    BondOrder::try_from(order).is_ok()
}

pub(crate) fn check_group_bonds(arena: &Arena) -> Result<(), ValidationError> {
    for (group, slot) in arena.groups.iter().enumerate() {
        let atom_count = slot.atoms.len();
        for (bond, record) in arena.group_bonds[slot.bonds.clone()].iter().enumerate() {
            if let Some(atom) = out_of_bounds(record, atom_count) {
                return Err(ValidationError::GroupBondOutOfBounds {
                    group,
                    bond,
                    atom,
                    atom_count,
                });
            }
            if !valid_order(record.bond_order) {
                return Err(ValidationError::InvalidGroupBondOrder {
                    group,
                    bond,
                    order: record.bond_order,
                });
            }
        }
    }
    Ok(())
}

pub(crate) fn check_inter_group_bonds(arena: &Arena) -> Result<(), ValidationError> {
    let atom_count = arena.atoms.len();
    for (bond, record) in arena.inter_group_bonds.iter().enumerate() {
        if let Some(atom) = out_of_bounds(record, atom_count) {
            return Err(ValidationError::InterGroupBondOutOfBounds {
                bond,
                atom,
                atom_count,
            });
        }
        if !valid_order(record.bond_order) {
            return Err(ValidationError::InvalidInterGroupBondOrder {
                bond,
                order: record.bond_order,
            });
        }
    }
    Ok(())
}

pub(crate) fn check_group_codes(arena: &Arena) -> Result<(), ValidationError> {
    for (group, slot) in arena.groups.iter().enumerate() {
        let code = slot.record.secondary_structure;
        if SecondaryStructure::from_code(code).is_none() {
            return Err(ValidationError::InvalidSecondaryStructure { group, code });
        }
        let index = slot.record.sequence_index;
        if index < -1 {
            return Err(ValidationError::InvalidSequenceIndex { group, index });
        }
    }
    Ok(())
}

/// Entity chain indices must be in bounds, and no chain may belong to more
/// than one entity. Chains without an entity are allowed.
pub(crate) fn check_entities(arena: &Arena) -> Result<(), ValidationError> {
    let chain_count = arena.chains.len();
    let mut owner: Vec<Option<usize>> = vec![None; chain_count];
    for (entity, record) in arena.entities.iter().enumerate() {
        if record.entity_type.parse::<EntityType>().is_err() {
            return Err(ValidationError::UnknownEntityType {
                entity,
                entity_type: record.entity_type.clone(),
            });
        }
        for &chain in &record.chain_indices {
            let Some(slot) = owner.get_mut(chain) else {
                return Err(ValidationError::EntityChainOutOfBounds {
                    entity,
                    chain,
                    chain_count,
                });
            };
            match *slot {
                Some(first) if first != entity => {
                    return Err(ValidationError::OverlappingEntities {
                        chain,
                        first,
                        second: entity,
                    });
                }
                _ => *slot = Some(entity),
            }
        }
    }
    Ok(())
}

pub(crate) fn check_bioassemblies(arena: &Arena) -> Result<(), ValidationError> {
    let chain_count = arena.chains.len();
    for slot in &arena.transforms {
        let bioassembly = slot.bioassembly_index;
        if let Some(&chain) = slot
            .record
            .chain_indices
            .iter()
            .find(|&&chain| chain >= chain_count)
        {
            return Err(ValidationError::BioAssemblyChainOutOfBounds {
                bioassembly,
                chain,
                chain_count,
            });
        }
        let len = slot.record.matrix.len();
        if len != 12 && len != 16 {
            return Err(ValidationError::InvalidTransform { bioassembly, len });
        }
    }
    Ok(())
}

pub(crate) fn check_unit_cell(arena: &Arena) -> Result<(), ValidationError> {
    match &arena.crystal {
        Some(crystal) if crystal.unit_cell.len() != 6 => {
            Err(ValidationError::InvalidUnitCell(crystal.unit_cell.len()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assembler::{ChainSlot, GroupSlot, ModelSlot, RawCrystal, TransformSlot};
    use crate::engine::builder::{
        AtomRecord, ChainRecord, EntityRecord, GroupRecord, StructureTotals, TransformRecord,
    };

    fn group_record(name: &str, atom_count: usize, bond_count: usize) -> GroupRecord {
        GroupRecord {
            group_name: name.into(),
            group_number: 1,
            insertion_code: None,
            group_type: String::new(),
            atom_count,
            bond_count,
            single_letter_code: '?',
            sequence_index: -1,
            secondary_structure: -1,
        }
    }

    fn atom_record() -> AtomRecord {
        AtomRecord {
            atom_name: "C".into(),
            serial_number: 1,
            alternative_location_id: None,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            occupancy: 1.0,
            temperature_factor: 0.0,
            element: "C".into(),
            charge: 0,
        }
    }

    fn bond(one: usize, two: usize, order: i32) -> BondRecord {
        BondRecord {
            atom_index_one: one,
            atom_index_two: two,
            bond_order: order,
        }
    }

    /// One model, chain "A" with ALA (5 atoms, 1 bond) and GLY (4 atoms),
    /// and one inter-group bond 2 -> 6.
    fn valid_arena() -> Arena {
        Arena {
            structure_id: "TEST".into(),
            totals: StructureTotals {
                bonds: 2,
                atoms: 9,
                groups: 2,
                chains: 1,
                models: 1,
            },
            models: vec![ModelSlot {
                declared_chains: 1,
                chains: 0..1,
            }],
            chains: vec![ChainSlot {
                record: ChainRecord {
                    chain_id: "A".into(),
                    chain_name: "A".into(),
                    group_count: 2,
                },
                groups: 0..2,
            }],
            groups: vec![
                GroupSlot {
                    record: group_record("ALA", 5, 1),
                    atoms: 0..5,
                    bonds: 0..1,
                },
                GroupSlot {
                    record: group_record("GLY", 4, 0),
                    atoms: 5..9,
                    bonds: 1..1,
                },
            ],
            atoms: vec![atom_record(); 9],
            group_bonds: vec![bond(0, 1, 1)],
            inter_group_bonds: vec![bond(2, 6, 1)],
            entities: vec![EntityRecord {
                chain_indices: vec![0],
                sequence: "AG".into(),
                description: String::new(),
                entity_type: "polymer".into(),
            }],
            transforms: Vec::new(),
            crystal: None,
            header: None,
        }
    }

    #[test]
    fn valid_arena_passes_every_check() {
        assert_eq!(validate(&valid_arena()), Ok(()));
    }

    #[test]
    fn model_chain_count_mismatch_is_reported() {
        let mut arena = valid_arena();
        arena.models[0].declared_chains = 2;
        assert_eq!(
            validate(&arena),
            Err(ValidationError::ChainCountMismatch {
                model: 0,
                declared: 2,
                found: 1
            })
        );
    }

    #[test]
    fn chain_group_count_mismatch_is_reported() {
        let mut arena = valid_arena();
        arena.chains[0].record.group_count = 3;
        assert_eq!(
            validate(&arena),
            Err(ValidationError::GroupCountMismatch {
                chain: 0,
                declared: 3,
                found: 2
            })
        );
    }

    #[test]
    fn group_bond_count_mismatch_is_reported() {
        let mut arena = valid_arena();
        arena.groups[0].record.bond_count = 2;
        assert_eq!(
            validate(&arena),
            Err(ValidationError::BondCountMismatch {
                group: 0,
                declared: 2,
                found: 1
            })
        );
    }

    #[test]
    fn missing_group_bond_is_a_bond_count_mismatch() {
        let mut arena = valid_arena();
        arena.groups[1].record.bond_count = 1;
        assert_eq!(
            check_group_contents(&arena),
            Err(ValidationError::BondCountMismatch {
                group: 1,
                declared: 1,
                found: 0
            })
        );
    }

    #[test]
    fn surplus_atom_is_an_atom_count_mismatch() {
        let mut arena = valid_arena();
        arena.atoms.push(atom_record());
        arena.groups[1].atoms = 5..10;
        assert!(matches!(
            check_group_contents(&arena),
            Err(ValidationError::AtomCountMismatch {
                group: 1,
                declared: 4,
                found: 5
            })
        ));
    }

    #[test]
    fn bond_total_counts_group_and_inter_group_bonds() {
        let mut arena = valid_arena();
        arena.totals.bonds = 1;
        assert_eq!(
            check_totals(&arena),
            Err(ValidationError::TotalMismatch {
                level: "bond",
                declared: 1,
                found: 2
            })
        );
    }

    #[test]
    fn group_bond_uses_local_bounds() {
        let mut arena = valid_arena();
        arena.group_bonds[0] = bond(0, 5, 1);
        assert!(matches!(
            check_group_bonds(&arena),
            Err(ValidationError::GroupBondOutOfBounds {
                group: 0,
                atom: 5,
                atom_count: 5,
                ..
            })
        ));
    }

    #[test]
    fn inter_group_bond_uses_global_bounds() {
        let mut arena = valid_arena();
        arena.inter_group_bonds[0] = bond(2, 9, 1);
        assert!(matches!(
            check_inter_group_bonds(&arena),
            Err(ValidationError::InterGroupBondOutOfBounds {
                bond: 0,
                atom: 9,
                atom_count: 9
            })
        ));
    }

    #[test]
    fn bond_order_must_be_one_to_four() {
        let mut arena = valid_arena();
        arena.inter_group_bonds[0].bond_order = 0;
        assert!(matches!(
            check_inter_group_bonds(&arena),
            Err(ValidationError::InvalidInterGroupBondOrder { order: 0, .. })
        ));
        let mut arena = valid_arena();
        arena.group_bonds[0].bond_order = 5;
        assert!(matches!(
            check_group_bonds(&arena),
            Err(ValidationError::InvalidGroupBondOrder { order: 5, .. })
        ));
    }

    #[test]
    fn group_codes_are_range_checked() {
        let mut arena = valid_arena();
        arena.groups[0].record.secondary_structure = 8;
        assert!(matches!(
            check_group_codes(&arena),
            Err(ValidationError::InvalidSecondaryStructure { group: 0, code: 8 })
        ));
        let mut arena = valid_arena();
        arena.groups[1].record.sequence_index = -2;
        assert!(matches!(
            check_group_codes(&arena),
            Err(ValidationError::InvalidSequenceIndex { group: 1, index: -2 })
        ));
    }

    #[test]
    fn overlapping_entities_are_rejected() {
        let mut arena = valid_arena();
        let mut second = arena.entities[0].clone();
        second.entity_type = "water".into();
        arena.entities.push(second);
        assert_eq!(
            check_entities(&arena),
            Err(ValidationError::OverlappingEntities {
                chain: 0,
                first: 0,
                second: 1
            })
        );
    }

    #[test]
    fn entity_chain_index_is_bounds_checked() {
        let mut arena = valid_arena();
        arena.entities[0].chain_indices = vec![1];
        assert!(matches!(
            check_entities(&arena),
            Err(ValidationError::EntityChainOutOfBounds { chain: 1, chain_count: 1, .. })
        ));
    }

    #[test]
    fn chains_without_entity_are_allowed() {
        let mut arena = valid_arena();
        arena.entities.clear();
        assert_eq!(check_entities(&arena), Ok(()));
    }

    #[test]
    fn unknown_entity_type_is_rejected() {
        let mut arena = valid_arena();
        arena.entities[0].entity_type = "macrolide".into();
        assert!(matches!(
            check_entities(&arena),
            Err(ValidationError::UnknownEntityType { entity: 0, .. })
        ));
    }

    #[test]
    fn bioassembly_checks_chains_and_matrix_length() {
        let mut arena = valid_arena();
        arena.transforms.push(TransformSlot {
            bioassembly_index: 0,
            name: "1".into(),
            record: TransformRecord {
                chain_indices: vec![0],
                matrix: vec![0.0; 16],
            },
        });
        assert_eq!(check_bioassemblies(&arena), Ok(()));

        arena.transforms[0].record.matrix = vec![0.0; 12];
        assert_eq!(check_bioassemblies(&arena), Ok(()));

        arena.transforms[0].record.matrix = vec![0.0; 9];
        assert_eq!(
            check_bioassemblies(&arena),
            Err(ValidationError::InvalidTransform {
                bioassembly: 0,
                len: 9
            })
        );

        arena.transforms[0].record.chain_indices = vec![3];
        assert!(matches!(
            check_bioassemblies(&arena),
            Err(ValidationError::BioAssemblyChainOutOfBounds { chain: 3, .. })
        ));
    }

    #[test]
    fn unit_cell_must_have_six_values() {
        let mut arena = valid_arena();
        arena.crystal = Some(RawCrystal {
            space_group: "P 1".into(),
            unit_cell: vec![1.0; 5],
            ncs_operators: Vec::new(),
        });
        assert_eq!(
            check_unit_cell(&arena),
            Err(ValidationError::InvalidUnitCell(5))
        );
    }
}
