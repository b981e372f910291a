//! Greedy max–min diversity selection within a topology group.

use rand::rngs::StdRng;
use rand::Rng;

use super::error::Error;
use super::group::SolvationShell;
use super::rmsd::superposed_rmsd;

/// Picks up to `top_n` mutually diverse shells from one group.
///
/// Greedy max–min: start from a random seed shell, then repeatedly add the
/// shell whose minimum RMSD to the already-selected set is largest. This is
/// a heuristic for the (NP-hard) max–min diversity problem; the result
/// depends on the seed point, which is why the RNG is threaded through from
/// a configurable seed. Returns indices into `shells` in selection order;
/// duplicates collapse, so fewer than `top_n` indices come back when the
/// group has exact repeats.
pub(crate) fn select_diverse(
    shells: &[SolvationShell],
    top_n: usize,
    rng: &mut StdRng,
) -> Result<Vec<usize>, Error> {
    if shells.is_empty() || top_n == 0 {
        return Ok(Vec::new());
    }

    let positions: Vec<Vec<[f64; 3]>> = shells.iter().map(|s| s.system.positions()).collect();

    let seed_idx = rng.gen_range(0..shells.len());
    let mut selected = vec![seed_idx];

    // min_rmsds[i] tracks the distance of shell i to the selected set.
    let mut min_rmsds = Vec::with_capacity(shells.len());
    for candidate in &positions {
        min_rmsds.push(superposed_rmsd(&positions[seed_idx], candidate)?);
    }

    while selected.len() < top_n.min(shells.len()) {
        let best = argmax(&min_rmsds);
        if min_rmsds[best] <= f64::EPSILON {
            // Every remaining shell coincides with a selected one.
            break;
        }
        selected.push(best);

        for (idx, candidate) in positions.iter().enumerate() {
            let to_best = superposed_rmsd(&positions[best], candidate)?;
            if to_best < min_rmsds[idx] {
                min_rmsds[idx] = to_best;
            }
        }
    }

    Ok(selected)
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::metadata::AtomSiteInfo;
    use crate::model::system::System;
    use crate::model::types::Element;
    use crate::shell::group::GroupKey;
    use rand::SeedableRng;

    /// A three-atom shell whose apex height parameterizes its geometry.
    fn shell_with_apex(height: f64) -> SolvationShell {
        let element = "O".parse::<Element>().unwrap();
        let system = System {
            atoms: vec![
                Atom::new(element, [0.0, 0.0, 0.0]),
                Atom::new(element, [2.0, 0.0, 0.0]),
                Atom::new(element, [1.0, height, 0.0]),
            ],
            site_info: vec![
                AtomSiteInfo::new("O1", "SOL", 1, 'A'),
                AtomSiteInfo::new("O2", "SOL", 2, 'A'),
                AtomSiteInfo::new("O3", "SOL", 3, 'A'),
            ],
            box_lengths: None,
        };
        SolvationShell {
            key: GroupKey {
                center: "O1".to_string(),
                composition: vec![("SOL".to_string(), 2)],
                atom_total: 3,
            },
            coordination: 2,
            frame: 0,
            system,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(10)
    }

    #[test]
    fn returns_at_most_top_n() {
        let shells: Vec<_> = (0..6).map(|i| shell_with_apex(1.0 + i as f64)).collect();
        let selected = select_diverse(&shells, 3, &mut rng()).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn small_groups_are_returned_whole() {
        let shells = vec![shell_with_apex(1.0), shell_with_apex(4.0)];
        let selected = select_diverse(&shells, 20, &mut rng()).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn identical_shells_collapse() {
        let shells: Vec<_> = (0..5).map(|_| shell_with_apex(2.0)).collect();
        let selected = select_diverse(&shells, 4, &mut rng()).unwrap();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn selection_is_deterministic_under_a_seed() {
        let shells: Vec<_> = (0..8).map(|i| shell_with_apex(0.5 * i as f64 + 1.0)).collect();
        let first = select_diverse(&shells, 4, &mut rng()).unwrap();
        let second = select_diverse(&shells, 4, &mut rng()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn extremes_beat_the_middle() {
        // Apex heights 1..9: whatever the seed, the second pick must be one
        // of the two geometric extremes.
        let shells: Vec<_> = (1..=9).map(|i| shell_with_apex(i as f64)).collect();
        let selected = select_diverse(&shells, 2, &mut rng()).unwrap();
        assert!(selected[1] == 0 || selected[1] == 8, "picked {:?}", selected);
    }

    #[test]
    fn empty_group_selects_nothing() {
        assert!(select_diverse(&[], 5, &mut rng()).unwrap().is_empty());
    }
}
