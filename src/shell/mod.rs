//! Solvation-shell extraction pipeline.
//!
//! The stages mirror the analysis workflow: carve complete-residue shells
//! around every matching solute site, expand them across neighboring solute
//! species, filter by coordination number, group by topology, then keep the
//! most diverse representatives of each group.

mod carve;
mod config;
mod diversity;
mod error;
mod expand;
mod group;
mod rmsd;
mod spatial;

pub use config::{ConfigFile, CoordinationRange, ExtractConfig};
pub use error::Error;
pub use group::{GroupKey, SolvationShell};
pub use rmsd::superposed_rmsd;
pub use spatial::NeighborGrid;

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::model::metadata::SpeciesTable;
use crate::model::system::System;

/// Per-group outcome of one extraction run.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub key: GroupKey,
    /// Shells that entered the group before diversity selection.
    pub candidates: usize,
    /// Shells kept after diversity selection.
    pub selected: usize,
    /// Smallest pairwise RMSD among the kept shells; 0 for singletons.
    pub min_separation: f64,
}

/// Result of [`extract`]: the selected shells plus run statistics.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub frames_scanned: usize,
    /// Solute sites matched across all scanned frames.
    pub sites_matched: usize,
    /// Shells within the coordination bounds, before selection.
    pub within_bounds: usize,
    pub shells: Vec<SolvationShell>,
    pub groups: Vec<GroupSummary>,
}

/// Runs the full extraction pipeline over a frame source.
///
/// Frames stream in one at a time; only shells that survive the coordination
/// filter are retained across frames. The frame cap from the config applies
/// here, so callers can hand over an unbounded reader.
pub fn extract<I>(
    frames: I,
    species: Option<&SpeciesTable>,
    config: &ExtractConfig,
) -> Result<ExtractReport, Error>
where
    I: IntoIterator<Item = System>,
{
    config.validate()?;

    let solute_residues: HashSet<String> = if config.solute_residues.is_empty() {
        species
            .map(|table| {
                table
                    .solute_residues()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    } else {
        config.solute_residues.iter().cloned().collect()
    };

    let mut frames_scanned = 0;
    let mut sites_matched = 0;
    let mut kept = Vec::new();

    for frame in frames {
        if config.max_frames.is_some_and(|max| frames_scanned >= max) {
            break;
        }
        frames_scanned += 1;

        let residues = frame.residues();
        let res_of_atom = carve::atom_residue_map(&residues, frame.atom_count());
        let positions = frame.positions();
        let grid = spatial::NeighborGrid::build(&positions, config.radius);

        for (atom_idx, info) in frame.site_info.iter().enumerate() {
            if !matches_selector(&config.solute_atoms, &info.atom_name) {
                continue;
            }
            sites_matched += 1;

            let mut shell = carve::carve_shell(
                &grid,
                &res_of_atom,
                atom_idx,
                positions[atom_idx],
                config.radius,
            );
            expand::expand_shell(
                &frame,
                &residues,
                &res_of_atom,
                &grid,
                &mut shell,
                &solute_residues,
                config.radius,
                config.max_shell_size,
            );

            if config.coordination.contains(shell.coordination()) {
                kept.push(group::build_shell(
                    frames_scanned - 1,
                    &frame,
                    &residues,
                    &shell,
                    species,
                ));
            }
        }
    }

    if frames_scanned == 0 {
        return Err(Error::EmptyTrajectory);
    }
    if sites_matched == 0 {
        return Err(Error::no_matching_sites(&config.solute_atoms, frames_scanned));
    }

    let within_bounds = kept.len();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut shells = Vec::new();
    let mut groups = Vec::new();
    for (key, members) in group::group_shells(kept) {
        let candidates = members.len();
        let indices = diversity::select_diverse(&members, config.top_n, &mut rng)?;
        let min_separation = min_pairwise_rmsd(&members, &indices)?;

        let mut slots: Vec<Option<SolvationShell>> = members.into_iter().map(Some).collect();
        let mut selected = 0;
        for idx in &indices {
            if let Some(shell) = slots[*idx].take() {
                shells.push(shell);
                selected += 1;
            }
        }

        groups.push(GroupSummary {
            key,
            candidates,
            selected,
            min_separation,
        });
    }

    Ok(ExtractReport {
        frames_scanned,
        sites_matched,
        within_bounds,
        shells,
        groups,
    })
}

fn matches_selector(selectors: &[String], atom_name: &str) -> bool {
    selectors
        .iter()
        .any(|name| name.eq_ignore_ascii_case(atom_name))
}

fn min_pairwise_rmsd(shells: &[SolvationShell], indices: &[usize]) -> Result<f64, Error> {
    let mut min = f64::INFINITY;
    for (pos, &i) in indices.iter().enumerate() {
        for &j in &indices[pos + 1..] {
            let rmsd = rmsd::superposed_rmsd(
                &shells[i].system.positions(),
                &shells[j].system.positions(),
            )?;
            min = min.min(rmsd);
        }
    }
    if min.is_finite() { Ok(min) } else { Ok(0.0) }
}
