//! Topology grouping of extracted shells.
//!
//! Two shells belong to the same group when they share the central atom name
//! and the multiset of member species. Within a shell, atoms are ordered
//! center residue first, then members by species label and centroid distance
//! from the center, so equal-topology shells line up site-by-site for RMSD.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::metadata::SpeciesTable;
use crate::model::system::{Residue, System};

use super::carve::CarvedShell;

/// Topology key of a shell group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    /// Name of the central solute atom.
    pub center: String,
    /// Member species and their counts, sorted by label.
    pub composition: Vec<(String, usize)>,
    /// Total atoms of a shell with this topology.
    pub atom_total: usize,
}

impl GroupKey {
    /// Coordination number shared by every shell in the group.
    pub fn coordination(&self) -> usize {
        self.composition.iter().map(|(_, count)| count).sum()
    }

    /// Filesystem-safe label, e.g. `CL1_cn3_1ClO4--2H2O`.
    pub fn label(&self) -> String {
        let parts: Vec<String> = self
            .composition
            .iter()
            .map(|(species, count)| format!("{}{}", count, sanitize(species)))
            .collect();
        format!(
            "{}_cn{}_{}",
            sanitize(&self.center),
            self.coordination(),
            parts.join("-")
        )
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// One extracted solvation shell with its provenance.
#[derive(Debug, Clone)]
pub struct SolvationShell {
    /// The shell structure, atoms in canonical group order.
    pub system: System,
    /// Zero-based trajectory frame the shell was carved from.
    pub frame: usize,
    /// Coordination number (complete member residues).
    pub coordination: usize,
    pub key: GroupKey,
}

/// Builds a [`SolvationShell`] from a carved residue set, applying the
/// canonical atom ordering and computing the topology key.
pub(crate) fn build_shell(
    frame_idx: usize,
    frame: &System,
    residues: &[Residue],
    carved: &CarvedShell,
    species: Option<&SpeciesTable>,
) -> SolvationShell {
    let center_pos = frame.atoms[carved.center_atom].position;
    let label_of = |residue: &Residue| -> String {
        match species {
            Some(table) => table.label_for(&residue.name).to_string(),
            None => residue.name.clone(),
        }
    };

    // Members ordered by species label, then by centroid distance from the
    // center atom; residue id breaks exact ties deterministically.
    let mut members: Vec<(String, f64, usize)> = carved
        .members
        .iter()
        .map(|&idx| {
            let residue = &residues[idx];
            (label_of(residue), centroid_dist(frame, residue, center_pos), idx)
        })
        .collect();
    members.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.1.total_cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    let mut system = System::new();
    let mut push_residue = |residue: &Residue| {
        for atom in residue.atoms.clone() {
            system.atoms.push(frame.atoms[atom].clone());
            system.site_info.push(frame.site_info[atom].clone());
        }
    };
    push_residue(&residues[carved.center_residue]);
    for (_, _, idx) in &members {
        push_residue(&residues[*idx]);
    }

    let mut composition: BTreeMap<String, usize> = BTreeMap::new();
    for (label, _, _) in &members {
        *composition.entry(label.clone()).or_insert(0) += 1;
    }

    let key = GroupKey {
        center: frame.site_info[carved.center_atom].atom_name.clone(),
        composition: composition.into_iter().collect(),
        atom_total: system.atom_count(),
    };

    SolvationShell {
        system,
        frame: frame_idx,
        coordination: carved.coordination(),
        key,
    }
}

/// Partitions shells by topology key; BTreeMap keeps group order stable.
pub(crate) fn group_shells(shells: Vec<SolvationShell>) -> BTreeMap<GroupKey, Vec<SolvationShell>> {
    let mut groups: BTreeMap<GroupKey, Vec<SolvationShell>> = BTreeMap::new();
    for shell in shells {
        groups.entry(shell.key.clone()).or_default().push(shell);
    }
    groups
}

fn centroid_dist(frame: &System, residue: &Residue, reference: [f64; 3]) -> f64 {
    let n = residue.atom_count() as f64;
    let mut centroid = [0.0; 3];
    for atom in residue.atoms.clone() {
        for axis in 0..3 {
            centroid[axis] += frame.atoms[atom].position[axis] / n;
        }
    }
    let dx = centroid[0] - reference[0];
    let dy = centroid[1] - reference[1];
    let dz = centroid[2] - reference[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
