use crate::core::columns::ColumnSet;
use crate::core::io::container::MmtfContainer;
use crate::core::models::builder::StructureGraphBuilder;
use crate::core::models::structure::Structure;
use crate::engine::assembler::StructureAssembler;
use crate::engine::builder::StructureBuilder;
use crate::engine::error::{AssemblyError, EngineError};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::replay::replay;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Decodes a payload (plain or gzip-compressed) into the default structure graph.
#[instrument(skip_all, name = "decode_workflow")]
pub fn decode_structure(bytes: &[u8]) -> Result<Structure, EngineError> {
    decode_with(bytes, StructureGraphBuilder::new())
}

/// Decodes a payload and delivers the validated structure to `builder`.
///
/// # Errors
///
/// Fails with [`EngineError::Container`] if the envelope cannot be parsed,
/// [`EngineError::Column`] if a binary column is malformed, and
/// [`EngineError::Assembly`] if the decoded columns do not describe a valid
/// structure. The builder receives nothing in any of these cases.
#[instrument(skip_all, name = "decode_workflow")]
pub fn decode_with<B: StructureBuilder>(bytes: &[u8], builder: B) -> Result<B::Output, EngineError> {
    let container = MmtfContainer::from_slice(bytes)?;
    debug!(
        version = %container.mmtf_version,
        producer = %container.mmtf_producer,
        "Parsed container"
    );
    let columns = ColumnSet::from_container(&container)?;
    info!(
        structure_id = %columns.structure_id,
        atoms = columns.x_coords.len(),
        groups = columns.group_types.len(),
        chains = columns.chain_ids.len(),
        models = columns.chains_per_model.len(),
        "Decoded columns"
    );
    Ok(decode_columns(&columns, builder)?)
}

/// Replays an already decoded column set into `builder`.
pub fn decode_columns<B: StructureBuilder>(
    columns: &ColumnSet,
    builder: B,
) -> Result<B::Output, AssemblyError> {
    let mut assembler = StructureAssembler::new(builder);
    replay(columns, &mut assembler)?;
    assembler.finalize()
}

pub fn decode_file(path: &Path) -> Result<Structure, EngineError> {
    let bytes = std::fs::read(path)?;
    decode_structure(&bytes)
}

/// Decodes many files in parallel on the current rayon pool. Results keep the
/// input order; one failing file does not affect the others.
#[instrument(skip_all, name = "batch_decode_workflow", fields(files = paths.len()))]
pub fn decode_files(
    paths: &[PathBuf],
    reporter: &ProgressReporter,
) -> Vec<Result<Structure, EngineError>> {
    reporter.report(Progress::BatchStart {
        total_files: paths.len() as u64,
    });
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let result = decode_file(path);
            reporter.report(Progress::FileDone {
                path: path.clone(),
                succeeded: result.is_ok(),
            });
            result
        })
        .collect();
    reporter.report(Progress::BatchFinish);
    info!(
        decoded = results.iter().filter(|r| r.is_ok()).count(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        "Batch decode finished"
    );
    results
}
