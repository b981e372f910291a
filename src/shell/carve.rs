//! First-pass shell carving around a solute center atom.

use std::collections::BTreeSet;

use crate::model::system::Residue;

use super::spatial::NeighborGrid;

/// A solvation shell as residue indices into a frame's residue list.
///
/// Complete-residue semantics: any residue with at least one atom inside the
/// cutoff belongs to the shell in full. `members` never contains the center
/// residue, so its length is the coordination number.
#[derive(Debug, Clone)]
pub(crate) struct CarvedShell {
    pub center_atom: usize,
    pub center_residue: usize,
    pub members: BTreeSet<usize>,
}

impl CarvedShell {
    #[inline]
    pub fn coordination(&self) -> usize {
        self.members.len()
    }

    /// Total atoms across the center residue and all members.
    pub fn atom_count(&self, residues: &[Residue]) -> usize {
        residues[self.center_residue].atom_count()
            + self
                .members
                .iter()
                .map(|&r| residues[r].atom_count())
                .sum::<usize>()
    }
}

/// Carves the shell around one center atom: every residue with an atom
/// within `radius` of the center, as complete residues.
pub(crate) fn carve_shell(
    grid: &NeighborGrid,
    res_of_atom: &[usize],
    center_atom: usize,
    center_pos: [f64; 3],
    radius: f64,
) -> CarvedShell {
    let center_residue = res_of_atom[center_atom];

    let members: BTreeSet<usize> = grid
        .within(center_pos, radius)
        .into_iter()
        .map(|atom| res_of_atom[atom])
        .filter(|&residue| residue != center_residue)
        .collect();

    CarvedShell {
        center_atom,
        center_residue,
        members,
    }
}

/// Maps each atom index to the index of its residue.
pub(crate) fn atom_residue_map(residues: &[Residue], atom_count: usize) -> Vec<usize> {
    let mut map = vec![0; atom_count];
    for (idx, residue) in residues.iter().enumerate() {
        for atom in residue.atoms.clone() {
            map[atom] = idx;
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::metadata::AtomSiteInfo;
    use crate::model::system::System;
    use crate::model::types::Element;

    /// Li center at the origin, one water fully inside the cutoff, one
    /// water straddling it (only its oxygen inside), one far away.
    fn frame() -> System {
        let atom = |sym: &str, pos: [f64; 3]| Atom::new(sym.parse::<Element>().unwrap(), pos);
        System {
            atoms: vec![
                atom("Li", [0.0, 0.0, 0.0]),
                atom("O", [2.0, 0.0, 0.0]),
                atom("H", [2.5, 0.8, 0.0]),
                atom("H", [2.5, -0.8, 0.0]),
                atom("O", [0.0, 2.9, 0.0]),
                atom("H", [0.0, 3.5, 0.8]),
                atom("H", [0.0, 3.5, -0.8]),
                atom("O", [10.0, 0.0, 0.0]),
                atom("H", [10.5, 0.8, 0.0]),
                atom("H", [10.5, -0.8, 0.0]),
            ],
            site_info: vec![
                AtomSiteInfo::new("LI1", "LI", 1, 'A'),
                AtomSiteInfo::new("O", "HOH", 2, 'A'),
                AtomSiteInfo::new("H1", "HOH", 2, 'A'),
                AtomSiteInfo::new("H2", "HOH", 2, 'A'),
                AtomSiteInfo::new("O", "HOH", 3, 'A'),
                AtomSiteInfo::new("H1", "HOH", 3, 'A'),
                AtomSiteInfo::new("H2", "HOH", 3, 'A'),
                AtomSiteInfo::new("O", "HOH", 4, 'A'),
                AtomSiteInfo::new("H1", "HOH", 4, 'A'),
                AtomSiteInfo::new("H2", "HOH", 4, 'A'),
            ],
            box_lengths: None,
        }
    }

    #[test]
    fn partial_overlap_pulls_in_the_whole_residue() {
        let system = frame();
        let residues = system.residues();
        let res_of_atom = atom_residue_map(&residues, system.atom_count());
        let grid = NeighborGrid::build(&system.positions(), 3.0);

        let shell = carve_shell(&grid, &res_of_atom, 0, [0.0, 0.0, 0.0], 3.0);

        // Residues 1 and 2 (both waters near the center); the far water is out.
        assert_eq!(shell.members, BTreeSet::from([1, 2]));
        assert_eq!(shell.coordination(), 2);
        // 1 Li + two complete waters, including hydrogens beyond the cutoff.
        assert_eq!(shell.atom_count(&residues), 7);
    }

    #[test]
    fn center_residue_is_not_a_member() {
        let system = frame();
        let residues = system.residues();
        let res_of_atom = atom_residue_map(&residues, system.atom_count());
        let grid = NeighborGrid::build(&system.positions(), 3.0);

        let shell = carve_shell(&grid, &res_of_atom, 0, [0.0, 0.0, 0.0], 3.0);
        assert!(!shell.members.contains(&shell.center_residue));
    }

    #[test]
    fn atom_residue_map_covers_every_atom() {
        let system = frame();
        let residues = system.residues();
        let map = atom_residue_map(&residues, system.atom_count());
        assert_eq!(map, vec![0, 1, 1, 1, 2, 2, 2, 3, 3, 3]);
    }
}
