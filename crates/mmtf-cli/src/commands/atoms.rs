use crate::cli::AtomsArgs;
use crate::error::{CliError, Result};
use mmtf::core::io::table::AtomTableWriter;
use mmtf::workflows::decode;
use tracing::info;

/// Decodes the input fully into an in-memory table before touching the output
/// path, so a rejected file never leaves a partial CSV behind.
pub fn run(args: AtomsArgs) -> Result<()> {
    let bytes = std::fs::read(&args.input)?;

    info!("Exporting atoms of {:?} to {:?}", &args.input, &args.output);
    let mut table = Vec::new();
    let rows = decode::decode_with(&bytes, AtomTableWriter::new(&mut table))
        .map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to write atom table: {e}")))?;
    std::fs::write(&args.output, &table)?;

    println!("Wrote {rows} atom rows to {}.", args.output.display());
    Ok(())
}
