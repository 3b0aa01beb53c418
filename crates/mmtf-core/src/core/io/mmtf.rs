use super::traits::StructureFile;
use crate::core::codec::EncodingConfig;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use crate::workflows::{decode, encode};
use std::io::{Read, Write};

/// Uncompressed MessagePack structure files. Gzip-compressed input is
/// detected and inflated transparently on read.
pub struct MmtfFile;

/// Gzip-compressed MessagePack structure files (`.mmtf.gz`).
pub struct GzMmtfFile;

fn read_all(reader: &mut impl Read) -> Result<Structure, EngineError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode::decode_structure(&bytes)
}

impl StructureFile for MmtfFile {
    type Error = EngineError;

    fn read_from(reader: &mut impl Read) -> Result<Structure, Self::Error> {
        read_all(reader)
    }

    fn write_to(
        structure: &Structure,
        config: &EncodingConfig,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writer.write_all(&encode::encode_structure(structure, config)?)?;
        Ok(())
    }
}

impl StructureFile for GzMmtfFile {
    type Error = EngineError;

    fn read_from(reader: &mut impl Read) -> Result<Structure, Self::Error> {
        read_all(reader)
    }

    fn write_to(
        structure: &Structure,
        config: &EncodingConfig,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writer.write_all(&encode::encode_structure_gz(structure, config)?)?;
        Ok(())
    }
}

/// Picks the writer by file name: `.gz` paths are compressed.
pub fn write_structure_to_path(
    structure: &Structure,
    config: &EncodingConfig,
    path: &std::path::Path,
) -> Result<(), EngineError> {
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz")) {
        GzMmtfFile::write_to_path(structure, config, path)
    } else {
        MmtfFile::write_to_path(structure, config, path)
    }
}
