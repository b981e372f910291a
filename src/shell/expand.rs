//! Recursive shell expansion across neighboring solute species.

use std::collections::HashSet;

use crate::model::system::{Residue, System};

use super::carve::CarvedShell;
use super::spatial::NeighborGrid;

/// Grows a carved shell until it is closed under solute neighborhood.
///
/// Whenever the shell contains a solute residue that has not been expanded
/// around yet, every residue within `radius` of any of that residue's atoms
/// joins the shell. Ion pairs and clusters are kept intact this way instead
/// of being cut at the first cutoff sphere. The `max_shell_size` atom cap
/// stops runaway growth in concentrated systems.
pub(crate) fn expand_shell(
    frame: &System,
    residues: &[Residue],
    res_of_atom: &[usize],
    grid: &NeighborGrid,
    shell: &mut CarvedShell,
    solute_residues: &HashSet<String>,
    radius: f64,
    max_shell_size: usize,
) {
    let mut expanded: HashSet<usize> = HashSet::from([shell.center_residue]);

    loop {
        if shell.atom_count(residues) >= max_shell_size {
            break;
        }

        let pending: Vec<usize> = shell
            .members
            .iter()
            .copied()
            .filter(|r| !expanded.contains(r) && solute_residues.contains(&residues[*r].name))
            .collect();
        if pending.is_empty() {
            break;
        }

        for residue_idx in pending {
            let probes: Vec<[f64; 3]> = residues[residue_idx]
                .atoms
                .clone()
                .map(|atom| frame.atoms[atom].position)
                .collect();

            for hit in grid.within_any(&probes, radius) {
                let neighbor = res_of_atom[hit];
                if neighbor != shell.center_residue {
                    shell.members.insert(neighbor);
                }
            }
            expanded.insert(residue_idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::metadata::AtomSiteInfo;
    use crate::model::types::Element;
    use crate::shell::carve::{atom_residue_map, carve_shell};

    /// Li at the origin, a Cl counter-ion 2.5 Å away, a water 2.5 Å from the
    /// chloride but 5 Å from the lithium. Carving around Li with r=3 misses
    /// the water; expansion through the solute chloride finds it.
    fn ion_pair_frame() -> System {
        let atom = |sym: &str, pos: [f64; 3]| Atom::new(sym.parse::<Element>().unwrap(), pos);
        System {
            atoms: vec![
                atom("Li", [0.0, 0.0, 0.0]),
                atom("Cl", [2.5, 0.0, 0.0]),
                atom("O", [5.0, 0.0, 0.0]),
                atom("H", [5.6, 0.8, 0.0]),
                atom("H", [5.6, -0.8, 0.0]),
            ],
            site_info: vec![
                AtomSiteInfo::new("LI1", "LI", 1, 'A'),
                AtomSiteInfo::new("CL1", "CL", 2, 'A'),
                AtomSiteInfo::new("O", "HOH", 3, 'A'),
                AtomSiteInfo::new("H1", "HOH", 3, 'A'),
                AtomSiteInfo::new("H2", "HOH", 3, 'A'),
            ],
            box_lengths: None,
        }
    }

    fn run_expansion(max_shell_size: usize) -> CarvedShell {
        let system = ion_pair_frame();
        let residues = system.residues();
        let res_of_atom = atom_residue_map(&residues, system.atom_count());
        let grid = NeighborGrid::build(&system.positions(), 3.0);

        let mut shell = carve_shell(&grid, &res_of_atom, 0, [0.0, 0.0, 0.0], 3.0);
        assert_eq!(shell.coordination(), 1, "carving should only see the Cl");

        let solutes: HashSet<String> = HashSet::from(["LI".into(), "CL".into()]);
        expand_shell(
            &system,
            &residues,
            &res_of_atom,
            &grid,
            &mut shell,
            &solutes,
            3.0,
            max_shell_size,
        );
        shell
    }

    #[test]
    fn expansion_reaches_through_solute_neighbors() {
        let shell = run_expansion(200);
        assert_eq!(shell.members, std::collections::BTreeSet::from([1, 2]));
        assert_eq!(shell.coordination(), 2);
    }

    #[test]
    fn atom_cap_stops_expansion() {
        // Cap below Li + Cl: the pending chloride is never expanded around.
        let shell = run_expansion(2);
        assert_eq!(shell.members, std::collections::BTreeSet::from([1]));
    }

    #[test]
    fn solvent_members_do_not_trigger_expansion() {
        let system = ion_pair_frame();
        let residues = system.residues();
        let res_of_atom = atom_residue_map(&residues, system.atom_count());
        let grid = NeighborGrid::build(&system.positions(), 3.0);

        let mut shell = carve_shell(&grid, &res_of_atom, 0, [0.0, 0.0, 0.0], 3.0);
        let solutes: HashSet<String> = HashSet::from(["LI".into()]);
        expand_shell(
            &system,
            &residues,
            &res_of_atom,
            &grid,
            &mut shell,
            &solutes,
            3.0,
            200,
        );

        // The chloride is not declared solute, so nothing grows.
        assert_eq!(shell.coordination(), 1);
    }
}
