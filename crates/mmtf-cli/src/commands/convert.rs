use crate::cli::ConvertArgs;
use crate::config::build_output_settings;
use crate::error::{CliError, Result};
use mmtf::core::io::mmtf::{GzMmtfFile, MmtfFile};
use mmtf::core::io::traits::StructureFile;
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    let settings = build_output_settings(&args)?;

    info!("Loading input structure from {:?}", &args.input);
    let structure = MmtfFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    info!(
        structure_id = %structure.structure_id,
        atoms = structure.atom_count(),
        "Structure decoded"
    );

    if settings.gzip {
        GzMmtfFile::write_to_path(&structure, &settings.encoding, &args.output)?;
    } else {
        MmtfFile::write_to_path(&structure, &settings.encoding, &args.output)?;
    }

    println!(
        "Wrote {} ({} atoms{}).",
        args.output.display(),
        structure.atom_count(),
        if settings.gzip { ", gzip" } else { "" }
    );
    Ok(())
}
