use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use mmtf::core::models::structure::Structure;
use mmtf::engine::progress::ProgressReporter;
use mmtf::workflows::decode;
use std::fmt::Write;
use tracing::{error, info};

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Inspecting {} file(s).", args.files.len());
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let results = decode::decode_files(&args.files, &reporter);

    let mut failures = 0usize;
    for (path, result) in args.files.iter().zip(results) {
        match result {
            Ok(structure) => println!("{}\n{}", path.display(), summarize(&structure)),
            Err(e) => {
                failures += 1;
                error!(path = %path.display(), "Decoding failed: {e}");
                eprintln!("{}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        return Err(CliError::Other(anyhow::anyhow!(
            "{failures} of {} file(s) could not be decoded",
            args.files.len()
        )));
    }
    Ok(())
}

/// Renders a short, human-readable overview of a decoded structure.
pub fn summarize(structure: &Structure) -> String {
    let mut out = String::new();
    let id = if structure.structure_id.is_empty() {
        "(unnamed)"
    } else {
        structure.structure_id.as_str()
    };
    let _ = writeln!(out, "  id:            {id}");
    if let Some(title) = &structure.header.title {
        let _ = writeln!(out, "  title:         {title}");
    }
    if !structure.header.experimental_methods.is_empty() {
        let _ = writeln!(
            out,
            "  methods:       {}",
            structure.header.experimental_methods.join(", ")
        );
    }
    if let Some(resolution) = structure.header.resolution {
        let _ = writeln!(out, "  resolution:    {resolution:.2} Å");
    }
    let _ = writeln!(
        out,
        "  models: {}  chains: {}  groups: {}  atoms: {}  bonds: {}",
        structure.model_count(),
        structure.chain_count(),
        structure.group_count(),
        structure.atom_count(),
        structure.bond_count()
    );
    let _ = writeln!(
        out,
        "  entities: {}  bioassemblies: {}",
        structure.entities().len(),
        structure.bioassemblies().len()
    );
    for (chain_id, chain) in structure.model_chains(0) {
        let ss = structure.secondary_structure_string(chain_id);
        if ss.chars().any(|c| c != '-') {
            let _ = writeln!(out, "  chain {:<4}     {ss}", chain.name);
        }
    }
    if let Some(crystal) = &structure.crystal {
        let [a, b, c] = crystal.cell_lengths();
        let _ = write!(out, "  cell:          {a:.3} {b:.3} {c:.3}");
        if !crystal.space_group.is_empty() {
            let _ = write!(out, " ({})", crystal.space_group);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmtf::core::models::header::HeaderInfo;

    #[test]
    fn summary_of_empty_structure_lists_zero_counts() {
        let structure = Structure::default();
        let summary = summarize(&structure);
        assert!(summary.contains("(unnamed)"));
        assert!(summary.contains("models: 0  chains: 0  groups: 0  atoms: 0  bonds: 0"));
        assert!(!summary.contains("cell:"));
    }

    #[test]
    fn summary_includes_header_fields() {
        let mut structure = Structure::default();
        structure.structure_id = "4HHB".into();
        structure.header = HeaderInfo {
            title: Some("Deoxy haemoglobin".into()),
            resolution: Some(1.74),
            experimental_methods: vec!["X-RAY DIFFRACTION".into()],
            ..HeaderInfo::default()
        };
        let summary = summarize(&structure);
        assert!(summary.contains("4HHB"));
        assert!(summary.contains("Deoxy haemoglobin"));
        assert!(summary.contains("1.74 Å"));
        assert!(summary.contains("X-RAY DIFFRACTION"));
    }
}
