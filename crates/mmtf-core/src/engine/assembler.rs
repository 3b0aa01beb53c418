use super::builder::{
    AtomRecord, BondRecord, ChainRecord, EntityRecord, GroupRecord, StructureBuilder,
    StructureTotals, TransformRecord,
};
use super::error::{AssemblyError, ProtocolError};
use super::validator;
use crate::core::models::crystal::CrystalInfo;
use crate::core::models::header::HeaderInfo;
use std::ops::Range;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    Uninitialized,
    Building,
    Failed,
}

#[derive(Debug, Clone)]
pub(crate) struct ModelSlot {
    pub declared_chains: usize,
    pub chains: Range<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct ChainSlot {
    pub record: ChainRecord,
    pub groups: Range<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct GroupSlot {
    pub record: GroupRecord,
    pub atoms: Range<usize>,
    pub bonds: Range<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct TransformSlot {
    pub bioassembly_index: usize,
    pub name: String,
    pub record: TransformRecord,
}

#[derive(Debug, Clone)]
pub(crate) struct RawCrystal {
    pub space_group: String,
    pub unit_cell: Vec<f32>,
    pub ncs_operators: Vec<Vec<f64>>,
}

/// Everything recorded between `init_structure` and `finalize`. Each level is a
/// flat vector; parents own index ranges into the level below.
#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    pub structure_id: String,
    pub totals: StructureTotals,
    pub models: Vec<ModelSlot>,
    pub chains: Vec<ChainSlot>,
    pub groups: Vec<GroupSlot>,
    pub atoms: Vec<AtomRecord>,
    pub group_bonds: Vec<BondRecord>,
    pub inter_group_bonds: Vec<BondRecord>,
    pub entities: Vec<EntityRecord>,
    pub transforms: Vec<TransformSlot>,
    pub crystal: Option<RawCrystal>,
    pub header: Option<HeaderInfo>,
}

impl Arena {
    fn open_chain(&self) -> Option<usize> {
        let model = self.models.last()?;
        (!model.chains.is_empty()).then(|| model.chains.end - 1)
    }

    fn open_group(&self) -> Option<usize> {
        let chain = self.chains.get(self.open_chain()?)?;
        (!chain.groups.is_empty()).then(|| chain.groups.end - 1)
    }
}

/// Reconstructs a structure from the ordered call stream and delivers it to a
/// [`StructureBuilder`] once it has been validated.
///
/// Calls are recorded, never forwarded eagerly: the builder sees nothing until
/// [`finalize`](Self::finalize) has checked every count and cross-reference,
/// so it receives either a complete structure or nothing at all.
///
/// Nesting is inferred from declared counts. A chain belongs to the most recent
/// model, a group to the most recent chain of that model, an atom or group bond
/// to the most recent group of that chain. Children beyond or short of a declared
/// count are kept and reported at finalize.
///
/// Any [`ProtocolError`] poisons the assembler; every later call fails with
/// [`ProtocolError::Aborted`].
#[derive(Debug)]
pub struct StructureAssembler<B: StructureBuilder> {
    builder: B,
    state: AssemblerState,
    arena: Arena,
}

impl<B: StructureBuilder> StructureAssembler<B> {
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            state: AssemblerState::Uninitialized,
            arena: Arena::default(),
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    fn poison(&mut self, error: ProtocolError) -> ProtocolError {
        self.state = AssemblerState::Failed;
        error
    }

    fn guard(&mut self, operation: &'static str) -> Result<(), ProtocolError> {
        match self.state {
            AssemblerState::Building => Ok(()),
            AssemblerState::Uninitialized => {
                Err(self.poison(ProtocolError::NotInitialized(operation)))
            }
            AssemblerState::Failed => Err(ProtocolError::Aborted),
        }
    }

    /// Starts the build. Totals are never used to size allocations; they are
    /// only compared against what was recorded, at finalize.
    pub fn init_structure(
        &mut self,
        totals: StructureTotals,
        structure_id: &str,
    ) -> Result<(), ProtocolError> {
        match self.state {
            AssemblerState::Uninitialized => {}
            AssemblerState::Building => return Err(self.poison(ProtocolError::AlreadyInitialized)),
            AssemblerState::Failed => return Err(ProtocolError::Aborted),
        }
        let arena = &mut self.arena;
        arena.structure_id = structure_id.to_string();
        arena.totals = totals;
        self.state = AssemblerState::Building;
        trace!(structure_id, ?totals, "Structure initialized");
        Ok(())
    }

    /// Opens model `model_index`, which must be the next model in sequence.
    pub fn set_model_info(
        &mut self,
        model_index: usize,
        chain_count: usize,
    ) -> Result<(), ProtocolError> {
        self.guard("set_model_info")?;
        let expected = self.arena.models.len();
        if model_index != expected {
            return Err(self.poison(ProtocolError::OutOfOrderModel {
                expected,
                found: model_index,
            }));
        }
        let start = self.arena.chains.len();
        self.arena.models.push(ModelSlot {
            declared_chains: chain_count,
            chains: start..start,
        });
        trace!(model = model_index, chain_count, "Model opened");
        Ok(())
    }

    pub fn set_chain_info(&mut self, chain: ChainRecord) -> Result<(), ProtocolError> {
        self.guard("set_chain_info")?;
        if self.arena.models.is_empty() {
            return Err(self.poison(ProtocolError::NoOpenModel(chain.chain_id)));
        }
        let arena = &mut self.arena;
        let start = arena.groups.len();
        let index = arena.chains.len();
        if let Some(model) = arena.models.last_mut() {
            model.chains.end = index + 1;
        }
        trace!(chain = index, id = %chain.chain_id, groups = chain.group_count, "Chain opened");
        arena.chains.push(ChainSlot {
            record: chain,
            groups: start..start,
        });
        Ok(())
    }

    pub fn set_group_info(&mut self, group: GroupRecord) -> Result<(), ProtocolError> {
        self.guard("set_group_info")?;
        let Some(chain_index) = self.arena.open_chain() else {
            return Err(self.poison(ProtocolError::NoOpenChain(group.group_name)));
        };
        let arena = &mut self.arena;
        let index = arena.groups.len();
        arena.chains[chain_index].groups.end = index + 1;
        let atoms = arena.atoms.len();
        let bonds = arena.group_bonds.len();
        arena.groups.push(GroupSlot {
            record: group,
            atoms: atoms..atoms,
            bonds: bonds..bonds,
        });
        Ok(())
    }

    pub fn set_atom_info(&mut self, atom: AtomRecord) -> Result<(), ProtocolError> {
        self.guard("set_atom_info")?;
        let Some(group_index) = self.arena.open_group() else {
            return Err(self.poison(ProtocolError::NoOpenGroup("set_atom_info")));
        };
        let arena = &mut self.arena;
        arena.atoms.push(atom);
        arena.groups[group_index].atoms.end = arena.atoms.len();
        Ok(())
    }

    /// Records a bond between two atoms of the open group, by local index.
    /// The indices may refer to atoms not yet added; they are checked at finalize.
    pub fn set_group_bond(&mut self, bond: BondRecord) -> Result<(), ProtocolError> {
        self.guard("set_group_bond")?;
        let Some(group_index) = self.arena.open_group() else {
            return Err(self.poison(ProtocolError::NoOpenGroup("set_group_bond")));
        };
        let arena = &mut self.arena;
        arena.group_bonds.push(bond);
        arena.groups[group_index].bonds.end = arena.group_bonds.len();
        Ok(())
    }

    /// Records a bond between two atoms by global index.
    pub fn set_inter_group_bond(&mut self, bond: BondRecord) -> Result<(), ProtocolError> {
        self.guard("set_inter_group_bond")?;
        self.arena.inter_group_bonds.push(bond);
        Ok(())
    }

    pub fn set_entity_info(&mut self, entity: EntityRecord) -> Result<(), ProtocolError> {
        self.guard("set_entity_info")?;
        self.arena.entities.push(entity);
        Ok(())
    }

    pub fn set_bio_assembly_trans(
        &mut self,
        bioassembly_index: usize,
        transform: TransformRecord,
        name: &str,
    ) -> Result<(), ProtocolError> {
        self.guard("set_bio_assembly_trans")?;
        self.arena.transforms.push(TransformSlot {
            bioassembly_index,
            name: name.to_string(),
            record: transform,
        });
        Ok(())
    }

    pub fn set_xtal_info(
        &mut self,
        space_group: &str,
        unit_cell: Vec<f32>,
        ncs_operators: Vec<Vec<f64>>,
    ) -> Result<(), ProtocolError> {
        self.guard("set_xtal_info")?;
        if self.arena.crystal.is_some() {
            return Err(self.poison(ProtocolError::DuplicateCrystalInfo));
        }
        self.arena.crystal = Some(RawCrystal {
            space_group: space_group.to_string(),
            unit_cell,
            ncs_operators,
        });
        Ok(())
    }

    pub fn set_header_info(&mut self, header: HeaderInfo) -> Result<(), ProtocolError> {
        self.guard("set_header_info")?;
        if self.arena.header.is_some() {
            return Err(self.poison(ProtocolError::DuplicateHeaderInfo));
        }
        self.arena.header = Some(header);
        Ok(())
    }

    /// Validates everything recorded and, on success, replays it to the builder
    /// in canonical order and returns the builder's output.
    pub fn finalize(self) -> Result<B::Output, AssemblyError> {
        match self.state {
            AssemblerState::Building => {}
            AssemblerState::Uninitialized => {
                return Err(ProtocolError::NotInitialized("finalize_structure").into());
            }
            AssemblerState::Failed => return Err(ProtocolError::Aborted.into()),
        }
        let Self { builder, arena, .. } = self;
        validator::validate(&arena)?;
        debug!(
            structure_id = %arena.structure_id,
            models = arena.models.len(),
            chains = arena.chains.len(),
            groups = arena.groups.len(),
            atoms = arena.atoms.len(),
            bonds = arena.group_bonds.len() + arena.inter_group_bonds.len(),
            "Structure validated"
        );
        Ok(deliver(&arena, builder))
    }
}

fn deliver<B: StructureBuilder>(arena: &Arena, mut builder: B) -> B::Output {
    builder.init_structure(&arena.totals, &arena.structure_id);

    if let Some(raw) = &arena.crystal {
        if let Ok(unit_cell) = <[f32; 6]>::try_from(raw.unit_cell.as_slice()) {
            builder.set_xtal_info(&CrystalInfo {
                space_group: raw.space_group.clone(),
                unit_cell,
                ncs_operators: raw.ncs_operators.clone(),
            });
        }
    }
    if let Some(header) = &arena.header {
        builder.set_header_info(header);
    }
    for slot in &arena.transforms {
        builder.set_bio_assembly_trans(slot.bioassembly_index, &slot.record, &slot.name);
    }
    for entity in &arena.entities {
        builder.set_entity_info(entity);
    }

    for (model_index, model) in arena.models.iter().enumerate() {
        builder.set_model_info(model_index, model.declared_chains);
        for chain in &arena.chains[model.chains.clone()] {
            builder.set_chain_info(&chain.record);
            for group in &arena.groups[chain.groups.clone()] {
                builder.set_group_info(&group.record);
                for atom in &arena.atoms[group.atoms.clone()] {
                    builder.set_atom_info(atom);
                }
                for bond in &arena.group_bonds[group.bonds.clone()] {
                    builder.set_group_bond(bond);
                }
            }
        }
    }

    for bond in &arena.inter_group_bonds {
        builder.set_inter_group_bond(bond);
    }
    builder.finalize_structure()
}
