use crate::core::models::crystal::CrystalInfo;
use crate::core::models::header::HeaderInfo;
use crate::engine::builder::{
    AtomRecord, BondRecord, ChainRecord, EntityRecord, GroupRecord, StructureBuilder,
    StructureTotals, TransformRecord,
};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct AtomRow<'a> {
    model: usize,
    chain_id: &'a str,
    chain_name: &'a str,
    group_name: &'a str,
    group_number: i32,
    insertion_code: Option<char>,
    atom_index: usize,
    serial: i32,
    atom_name: &'a str,
    alt_loc: Option<char>,
    element: &'a str,
    x: f32,
    y: f32,
    z: f32,
    occupancy: f32,
    b_factor: f32,
    charge: i32,
}

/// A [`StructureBuilder`] that streams every validated atom as one CSV row,
/// with its model, chain and group context. Nothing is kept in memory beyond
/// the current chain and group.
///
/// Builder calls cannot fail, so the first write error is held and returned by
/// [`finalize_structure`](StructureBuilder::finalize_structure); later rows are
/// skipped.
pub struct AtomTableWriter<W: Write> {
    writer: csv::Writer<W>,
    model: usize,
    chain: Option<ChainRecord>,
    group: Option<GroupRecord>,
    atom_index: usize,
    error: Option<csv::Error>,
}

impl<W: Write> AtomTableWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            model: 0,
            chain: None,
            group: None,
            atom_index: 0,
            error: None,
        }
    }
}

impl<W: Write> StructureBuilder for AtomTableWriter<W> {
    /// Number of rows written.
    type Output = Result<usize, csv::Error>;

    fn init_structure(&mut self, _totals: &StructureTotals, _structure_id: &str) {}

    fn set_xtal_info(&mut self, _crystal: &CrystalInfo) {}

    fn set_header_info(&mut self, _header: &HeaderInfo) {}

    fn set_bio_assembly_trans(&mut self, _: usize, _: &TransformRecord, _: &str) {}

    fn set_entity_info(&mut self, _entity: &EntityRecord) {}

    fn set_model_info(&mut self, model_index: usize, _chain_count: usize) {
        self.model = model_index;
    }

    fn set_chain_info(&mut self, chain: &ChainRecord) {
        self.chain = Some(chain.clone());
    }

    fn set_group_info(&mut self, group: &GroupRecord) {
        self.group = Some(group.clone());
    }

    fn set_atom_info(&mut self, atom: &AtomRecord) {
        let index = self.atom_index;
        self.atom_index += 1;
        if self.error.is_some() {
            return;
        }
        let (Some(chain), Some(group)) = (&self.chain, &self.group) else {
            return;
        };
        let row = AtomRow {
            model: self.model,
            chain_id: &chain.chain_id,
            chain_name: &chain.chain_name,
            group_name: &group.group_name,
            group_number: group.group_number,
            insertion_code: group.insertion_code,
            atom_index: index,
            serial: atom.serial_number,
            atom_name: &atom.atom_name,
            alt_loc: atom.alternative_location_id,
            element: &atom.element,
            x: atom.x,
            y: atom.y,
            z: atom.z,
            occupancy: atom.occupancy,
            b_factor: atom.temperature_factor,
            charge: atom.charge,
        };
        if let Err(e) = self.writer.serialize(&row) {
            self.error = Some(e);
        }
    }

    fn set_group_bond(&mut self, _bond: &BondRecord) {}

    fn set_inter_group_bond(&mut self, _bond: &BondRecord) {}

    fn finalize_structure(mut self) -> Self::Output {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.atom_index)
    }
}
