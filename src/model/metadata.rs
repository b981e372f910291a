use std::collections::HashMap;
use std::fmt;

/// Per-atom PDB annotations kept parallel to the atom list of a
/// [`System`](super::system::System).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomSiteInfo {
    pub atom_name: String,
    pub residue_name: String,
    pub residue_id: i32,
    pub chain_id: char,
}

impl AtomSiteInfo {
    pub fn new(
        atom_name: impl Into<String>,
        residue_name: impl Into<String>,
        residue_id: i32,
        chain_id: char,
    ) -> Self {
        Self {
            atom_name: atom_name.into(),
            residue_name: residue_name.into(),
            residue_id,
            chain_id,
        }
    }
}

/// Whether a species acts as solute or solvent in the simulated system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Solute,
    Solvent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Solute => write!(f, "solute"),
            Role::Solvent => write!(f, "solvent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesInfo {
    /// Chemical species label, e.g. "Li+" or "EC".
    pub label: String,
    pub role: Role,
}

/// Maps PDB residue names to chemical species and their solute/solvent role.
///
/// Populated from the `metadata_system.json` file that accompanies a
/// simulated system; residue names not present in the table fall back to
/// being their own species label.
#[derive(Debug, Clone, Default)]
pub struct SpeciesTable {
    entries: HashMap<String, SpeciesInfo>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, residue_name: impl Into<String>, label: impl Into<String>, role: Role) {
        self.entries.insert(
            residue_name.into(),
            SpeciesInfo {
                label: label.into(),
                role,
            },
        );
    }

    pub fn get(&self, residue_name: &str) -> Option<&SpeciesInfo> {
        self.entries.get(residue_name)
    }

    /// Species label for a residue name, falling back to the name itself.
    pub fn label_for<'a>(&'a self, residue_name: &'a str) -> &'a str {
        self.entries
            .get(residue_name)
            .map(|info| info.label.as_str())
            .unwrap_or(residue_name)
    }

    /// Residue names marked as solute, sorted for deterministic iteration.
    pub fn solute_residues(&self) -> Vec<&str> {
        self.residues_with_role(Role::Solute)
    }

    /// Residue names marked as solvent, sorted for deterministic iteration.
    pub fn solvent_residues(&self) -> Vec<&str> {
        self.residues_with_role(Role::Solvent)
    }

    fn residues_with_role(&self, role: Role) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, info)| info.role == role)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SpeciesTable {
        let mut table = SpeciesTable::new();
        table.insert("LI", "Li+", Role::Solute);
        table.insert("CLO", "ClO4-", Role::Solute);
        table.insert("HOH", "H2O", Role::Solvent);
        table
    }

    #[test]
    fn lookup_by_residue_name() {
        let table = sample_table();
        let info = table.get("LI").unwrap();
        assert_eq!(info.label, "Li+");
        assert_eq!(info.role, Role::Solute);
        assert!(table.get("XYZ").is_none());
    }

    #[test]
    fn label_falls_back_to_residue_name() {
        let table = sample_table();
        assert_eq!(table.label_for("HOH"), "H2O");
        assert_eq!(table.label_for("TFSI"), "TFSI");
    }

    #[test]
    fn role_partitions_are_sorted() {
        let table = sample_table();
        assert_eq!(table.solute_residues(), vec!["CLO", "LI"]);
        assert_eq!(table.solvent_residues(), vec!["HOH"]);
    }

    #[test]
    fn role_displays_lowercase() {
        assert_eq!(Role::Solute.to_string(), "solute");
        assert_eq!(Role::Solvent.to_string(), "solvent");
    }
}
