use std::ops::Range;

use super::atom::Atom;
use super::metadata::AtomSiteInfo;

/// One trajectory frame: atoms plus their PDB site annotations.
///
/// `atoms` and `site_info` are parallel; the PDB reader guarantees equal
/// lengths. `box_lengths` carries the orthorhombic cell from CRYST1 when the
/// file declares one.
#[derive(Debug, Clone, Default)]
pub struct System {
    pub atoms: Vec<Atom>,
    pub site_info: Vec<AtomSiteInfo>,
    pub box_lengths: Option<[f64; 3]>,
}

/// Contiguous run of atoms forming one residue within a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub name: String,
    pub id: i32,
    pub chain_id: char,
    pub atoms: Range<usize>,
}

impl Residue {
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.box_lengths.is_some()
    }

    /// Splits the frame into residues: maximal runs of consecutive atoms
    /// sharing chain id, residue id, and residue name.
    pub fn residues(&self) -> Vec<Residue> {
        let mut residues = Vec::new();
        let mut start = 0;

        for idx in 1..=self.site_info.len() {
            let boundary = match (self.site_info.get(idx), self.site_info.get(start)) {
                (Some(curr), Some(open)) => {
                    curr.chain_id != open.chain_id
                        || curr.residue_id != open.residue_id
                        || curr.residue_name != open.residue_name
                }
                _ => true,
            };

            if boundary {
                let open = &self.site_info[start];
                residues.push(Residue {
                    name: open.residue_name.clone(),
                    id: open.residue_id,
                    chain_id: open.chain_id,
                    atoms: start..idx,
                });
                start = idx;
            }
        }

        residues
    }

    /// Positions of all atoms, in atom order.
    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.atoms.iter().map(|a| a.position).collect()
    }
}
