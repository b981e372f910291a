use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use solvshell::io::read_species_table;
use solvshell::shell::ConfigFile;
use solvshell::{ExtractConfig, SpeciesTable};

use crate::cli::ExtractArgs;

/// Builds the extraction config with precedence defaults < TOML file < flags.
pub fn build_extract_config(args: &ExtractArgs) -> Result<ExtractConfig> {
    let mut config = ExtractConfig::default();

    if let Some(path) = &args.config {
        let file = load_config_file(path)?;
        config.apply_file(&file);
    }

    if !args.selection.solute_atoms.is_empty() {
        config.solute_atoms = args.selection.solute_atoms.clone();
    }
    if !args.selection.solute_residues.is_empty() {
        config.solute_residues = args.selection.solute_residues.clone();
    }
    if let Some(radius) = args.shell.radius {
        config.radius = radius;
    }
    if let Some(min) = args.shell.min_coord {
        config.coordination.min = min;
    }
    if let Some(max) = args.shell.max_coord {
        config.coordination.max = max;
    }
    if let Some(size) = args.shell.max_shell_size {
        config.max_shell_size = size;
    }
    if let Some(top_n) = args.ranking.top_n {
        config.top_n = top_n;
    }
    if let Some(frames) = args.ranking.max_frames {
        config.max_frames = Some(frames);
    }
    if let Some(seed) = args.ranking.seed {
        config.seed = Some(seed);
    }

    config.validate().context("Invalid extraction parameters")?;
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    ConfigFile::from_toml_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Loads the species metadata table when a path was given.
pub fn load_species_table(path: Option<&Path>) -> Result<Option<SpeciesTable>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file =
        File::open(path).with_context(|| format!("Failed to open metadata: {}", path.display()))?;
    let table = read_species_table(BufReader::new(file))
        .with_context(|| format!("Failed to parse metadata: {}", path.display()))?;
    Ok(Some(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::io::Write;

    fn extract_args(argv: &[&str]) -> ExtractArgs {
        let mut full = vec!["solvshell", "extract", "--system-name", "test"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).expect("valid argv").command {
            Command::Extract(args) => *args,
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "solute_atoms = [\"NA\"]\nradius = 4.5\ntop_n = 7").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = extract_args(&["--config", &path, "--solute-atom", "CL1", "--top-n", "3"]);
        let config = build_extract_config(&args).unwrap();

        assert_eq!(config.solute_atoms, vec!["CL1"]);
        assert_eq!(config.top_n, 3);
        // Untouched flag falls through to the file value.
        assert_eq!(config.radius, 4.5);
    }

    #[test]
    fn validation_failures_surface() {
        let args = extract_args(&["--solute-atom", "CL1", "--min-coord", "9", "--max-coord", "2"]);
        let err = build_extract_config(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid extraction parameters"));
    }

    #[test]
    fn species_table_loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"residue": ["LI"], "species": ["Li+"], "solute_or_solvent": ["solute"]}}"#
        )
        .unwrap();

        let table = load_species_table(Some(file.path())).unwrap().unwrap();
        assert_eq!(table.label_for("LI"), "Li+");
    }

    #[test]
    fn absent_metadata_is_not_an_error() {
        assert!(load_species_table(None).unwrap().is_none());
    }
}
