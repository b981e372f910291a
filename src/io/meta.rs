use std::io::Read;

use serde::Deserialize;

use crate::io::error::Error;
use crate::model::metadata::{Role, SpeciesTable};

/// On-disk shape of `metadata_system.json`: three parallel arrays mapping
/// each residue name to its chemical species and solute/solvent role.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    residue: Vec<String>,
    species: Vec<String>,
    solute_or_solvent: Vec<String>,
}

/// Reads a species table from a `metadata_system.json` document.
pub fn read_species_table<R: Read>(reader: R) -> Result<SpeciesTable, Error> {
    let raw: RawMetadata = serde_json::from_reader(reader)?;

    if raw.residue.len() != raw.species.len() || raw.residue.len() != raw.solute_or_solvent.len() {
        return Err(Error::metadata(format!(
            "parallel arrays disagree in length: {} residues, {} species, {} roles",
            raw.residue.len(),
            raw.species.len(),
            raw.solute_or_solvent.len()
        )));
    }

    let mut table = SpeciesTable::new();
    for ((residue, species), role) in raw
        .residue
        .into_iter()
        .zip(raw.species)
        .zip(raw.solute_or_solvent)
    {
        let role = match role.to_ascii_lowercase().as_str() {
            "solute" => Role::Solute,
            "solvent" => Role::Solvent,
            other => {
                return Err(Error::metadata(format!(
                    "residue '{}' has unknown role '{}' (expected solute or solvent)",
                    residue, other
                )));
            }
        };
        table.insert(residue, species, role);
    }

    Ok(table)
}
