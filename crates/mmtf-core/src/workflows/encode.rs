use crate::core::codec::EncodingConfig;
use crate::core::models::structure::Structure;
use crate::engine::encoder::encode_columns;
use crate::engine::error::EngineError;
use tracing::{info, instrument};

/// Serializes a structure as an uncompressed MessagePack payload.
#[instrument(skip_all, name = "encode_workflow")]
pub fn encode_structure(structure: &Structure, config: &EncodingConfig) -> Result<Vec<u8>, EngineError> {
    let container = encode_columns(structure)?.to_container(config)?;
    let bytes = container.to_vec()?;
    info!(
        structure_id = %structure.structure_id,
        atoms = structure.atom_count(),
        bytes = bytes.len(),
        "Encoded structure"
    );
    Ok(bytes)
}

/// Serializes a structure as a gzip-compressed MessagePack payload.
#[instrument(skip_all, name = "encode_workflow")]
pub fn encode_structure_gz(
    structure: &Structure,
    config: &EncodingConfig,
) -> Result<Vec<u8>, EngineError> {
    let container = encode_columns(structure)?.to_container(config)?;
    let bytes = container.to_gzip_vec()?;
    info!(
        structure_id = %structure.structure_id,
        atoms = structure.atom_count(),
        bytes = bytes.len(),
        "Encoded structure (gzip)"
    );
    Ok(bytes)
}
