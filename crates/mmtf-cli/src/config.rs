use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use mmtf::core::codec::{ColumnEncoding, ColumnField, EncodingConfig, EncodingConfigBuilder, Strategy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
struct PartialColumnEncoding {
    strategy: Option<Strategy>,
    parameter: Option<i32>,
}

/// Encoding settings as read from a TOML file. Every field is optional and
/// falls back to the per-column defaults.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialEncodingConfig {
    gzip: Option<bool>,
    #[serde(default)]
    columns: BTreeMap<String, PartialColumnEncoding>,
}

impl PartialEncodingConfig {
    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn resolved_columns(&self) -> Result<Vec<(ColumnField, ColumnEncoding)>> {
        self.columns
            .iter()
            .map(|(name, partial)| {
                let field = name
                    .parse::<ColumnField>()
                    .map_err(|e| CliError::Config(e.to_string()))?;
                let default = field.default_encoding();
                let encoding = ColumnEncoding::new(
                    partial.strategy.unwrap_or(default.strategy),
                    partial.parameter.unwrap_or(default.parameter),
                );
                Ok((field, encoding))
            })
            .collect()
    }
}

/// Fully resolved output settings for `convert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub encoding: EncodingConfig,
    pub gzip: bool,
}

/// Merges, in increasing precedence: column defaults, the config file, `-S`
/// overrides and the `--gzip` flag. A `.gz` output path also enables gzip.
pub fn build_output_settings(args: &ConvertArgs) -> Result<OutputSettings> {
    let partial = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "Loading encoding configuration");
            PartialEncodingConfig::from_file(path)?
        }
        None => PartialEncodingConfig::default(),
    };

    let mut builder = EncodingConfigBuilder::new();
    for (field, encoding) in partial.resolved_columns()? {
        builder = builder.column(field, encoding);
    }
    for value in &args.set_values {
        let parsed = parser::parse_override(value).map_err(|e| CliError::Argument(e.to_string()))?;
        debug!(column = %parsed.column, strategy = %parsed.strategy, "Applying column override");
        builder = builder.column(parsed.column, parsed.encoding());
    }
    let encoding = builder.build()?;

    let gz_extension = args
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    let gzip = args.gzip || gz_extension || partial.gzip.unwrap_or(false);

    Ok(OutputSettings { encoding, gzip })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn convert_args(config: Option<PathBuf>, set_values: &[&str], output: &str) -> ConvertArgs {
        ConvertArgs {
            input: PathBuf::from("in.mmtf"),
            output: PathBuf::from(output),
            config,
            gzip: false,
            set_values: set_values.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_config_or_overrides() {
        let settings = build_output_settings(&convert_args(None, &[], "out.mmtf")).unwrap();
        assert_eq!(settings.encoding, EncodingConfig::default());
        assert!(!settings.gzip);
    }

    #[test]
    fn file_values_are_merged_over_defaults() {
        let file = config_file(
            r#"
gzip = true

[columns.b-factor]
parameter = 10

[columns.occupancy]
strategy = 1
"#,
        );
        let args = convert_args(Some(file.path().to_path_buf()), &[], "out.mmtf");
        let settings = build_output_settings(&args).unwrap();

        assert!(settings.gzip);
        assert_eq!(
            settings.encoding.get(ColumnField::BFactor),
            ColumnEncoding::new(Strategy::DeltaRecursiveScaled16, 10)
        );
        assert_eq!(
            settings.encoding.get(ColumnField::Occupancy).strategy,
            Strategy::Float32
        );
    }

    #[test]
    fn set_values_take_precedence_over_file() {
        let file = config_file("[columns.x-coord]\nstrategy = 10\nparameter = 10\n");
        let args = convert_args(Some(file.path().to_path_buf()), &["x-coord=10:100"], "out.mmtf");
        let settings = build_output_settings(&args).unwrap();
        assert_eq!(settings.encoding.get(ColumnField::XCoord).parameter, 100);
    }

    #[test]
    fn gz_output_path_enables_compression() {
        let settings = build_output_settings(&convert_args(None, &[], "out.mmtf.gz")).unwrap();
        assert!(settings.gzip);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = config_file("compression = 9\n");
        let args = convert_args(Some(file.path().to_path_buf()), &[], "out.mmtf");
        assert!(matches!(
            build_output_settings(&args),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn unknown_column_is_a_config_error() {
        let file = config_file("[columns.w-coord]\nstrategy = 10\n");
        let args = convert_args(Some(file.path().to_path_buf()), &[], "out.mmtf");
        assert!(matches!(build_output_settings(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn incompatible_override_is_an_encoding_error() {
        let args = convert_args(None, &["x-coord=4"], "out.mmtf");
        assert!(matches!(build_output_settings(&args), Err(CliError::Encoding(_))));
    }

    #[test]
    fn malformed_override_is_an_argument_error() {
        let args = convert_args(None, &["x-coord"], "out.mmtf");
        assert!(matches!(build_output_settings(&args), Err(CliError::Argument(_))));
    }
}
