//! A pure Rust library for extracting solvation-shell structures from
//! molecular-dynamics trajectories. It reads multi-model PDB files, carves
//! complete-residue shells around designated solute sites, and selects the
//! most diverse shell geometries per coordination topology.
//!
//! # Features
//!
//! - **Trajectory reading** — Streaming multi-model PDB parser with CRYST1
//!   box handling and element inference for MD-generated files
//! - **Shell carving** — Complete-residue shells within a cutoff radius,
//!   recursively expanded across neighboring solute species
//! - **Topology grouping** — Shells binned by central atom and member
//!   species composition, with a canonical atom ordering per group
//! - **Diversity selection** — Greedy max–min selection on superposed RMSD,
//!   reproducible under a fixed seed
//! - **XYZ output** — One file per selected shell, tagged with provenance
//!
//! # Quick Start
//!
//! The main entry point is the [`extract`] function, which takes an iterator
//! of trajectory frames and an [`ExtractConfig`]:
//!
//! ```
//! use solvshell::{Atom, AtomSiteInfo, System};
//! use solvshell::{CoordinationRange, ExtractConfig, ExtractError, extract};
//!
//! // One frame: a lithium ion flanked by two waters.
//! let mut frame = System::new();
//! let positions = [
//!     ("LI1", "LI", 1, "Li", [0.0, 0.0, 0.0]),
//!     ("O", "HOH", 2, "O", [2.0, 0.0, 0.0]),
//!     ("H1", "HOH", 2, "H", [2.6, 0.8, 0.0]),
//!     ("H2", "HOH", 2, "H", [2.6, -0.8, 0.0]),
//!     ("O", "HOH", 3, "O", [-2.0, 0.0, 0.0]),
//!     ("H1", "HOH", 3, "H", [-2.6, 0.8, 0.0]),
//!     ("H2", "HOH", 3, "H", [-2.6, -0.8, 0.0]),
//! ];
//! for (name, res, id, symbol, pos) in positions {
//!     frame.atoms.push(Atom::new(symbol.parse()?, pos));
//!     frame.site_info.push(AtomSiteInfo::new(name, res, id, 'A'));
//! }
//!
//! let config = ExtractConfig {
//!     solute_atoms: vec!["LI1".to_string()],
//!     coordination: CoordinationRange::new(1, 6),
//!     seed: Some(10),
//!     ..ExtractConfig::default()
//! };
//!
//! let report = extract([frame], None, &config)?;
//!
//! // Both waters coordinate the lithium.
//! assert_eq!(report.shells.len(), 1);
//! assert_eq!(report.shells[0].coordination, 2);
//! assert_eq!(report.shells[0].key.label(), "LI1_cn2_2HOH");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — PDB trajectory reading, XYZ writing, species metadata
//! - [`shell`] — The extraction pipeline and its configuration
//!
//! # Data Types
//!
//! - [`System`] — One trajectory frame (atoms + PDB site annotations)
//! - [`Atom`] / [`Element`] — Geometry and element identity
//! - [`AtomSiteInfo`] — Atom name, residue name/id, chain
//! - [`SpeciesTable`] — Residue-name → species label/role mapping
//! - [`SolvationShell`] — One extracted shell with provenance
//! - [`ExtractReport`] — Selected shells plus per-group statistics

mod model;

pub mod io;
pub mod shell;

pub use model::atom::Atom;
pub use model::metadata::{AtomSiteInfo, Role, SpeciesInfo, SpeciesTable};
pub use model::system::{Residue, System};
pub use model::types::{Element, ParseElementError};

pub use shell::{
    CoordinationRange, ExtractConfig, ExtractReport, GroupKey, GroupSummary, SolvationShell,
    extract,
};

pub use shell::Error as ExtractError;
