use crate::core::codec::EncodingConfig;
use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Reading and writing a structure file format.
pub trait StructureFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be read, decoded or validated.
    fn read_from(reader: &mut impl Read) -> Result<Structure, Self::Error>;

    /// Writes a structure, encoding each column as `config` specifies.
    ///
    /// # Errors
    ///
    /// Returns an error if a column cannot be encoded or writing fails.
    fn write_to(
        structure: &Structure,
        config: &EncodingConfig,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Structure, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(
        structure: &Structure,
        config: &EncodingConfig,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(structure, config, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
