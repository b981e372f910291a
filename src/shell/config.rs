use serde::Deserialize;

use super::error::Error;

/// Inclusive bounds on the coordination number a shell may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinationRange {
    pub min: usize,
    pub max: usize,
}

impl CoordinationRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, coordination: usize) -> bool {
        (self.min..=self.max).contains(&coordination)
    }
}

/// Parameters of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Atom names that define shell centers (e.g. "CL1", "O00").
    pub solute_atoms: Vec<String>,
    /// Residue names treated as solute species during shell expansion.
    pub solute_residues: Vec<String>,
    /// Solvation cutoff radius in Ångströms.
    pub radius: f64,
    /// Coordination numbers to keep.
    pub coordination: CoordinationRange,
    /// Diverse shells retained per topology group.
    pub top_n: usize,
    /// Atom cap applied while expanding shells across solute neighbors.
    pub max_shell_size: usize,
    /// Cap on trajectory frames to analyze; `None` scans the whole file.
    pub max_frames: Option<usize>,
    /// Seed for the diversity selection; `None` draws entropy.
    pub seed: Option<u64>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            solute_atoms: Vec::new(),
            solute_residues: Vec::new(),
            radius: 3.0,
            coordination: CoordinationRange::new(2, 5),
            top_n: 20,
            max_shell_size: 200,
            max_frames: None,
            seed: None,
        }
    }
}

impl ExtractConfig {
    /// Checks the parameter set before a run. Selector presence is checked
    /// here too so a misconfigured run fails before the trajectory is read.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidRadius(self.radius));
        }
        if self.coordination.min > self.coordination.max {
            return Err(Error::InvalidCoordinationRange {
                min: self.coordination.min,
                max: self.coordination.max,
            });
        }
        if self.top_n == 0 {
            return Err(Error::InvalidTopN);
        }
        if self.max_shell_size == 0 {
            return Err(Error::InvalidShellSize);
        }
        if self.solute_atoms.is_empty() {
            return Err(Error::NoSoluteSelector);
        }
        Ok(())
    }

    /// Overlays the fields present in a TOML run configuration. The CLI
    /// applies this between the built-in defaults and its own flags, giving
    /// the precedence defaults < file < flags.
    pub fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(atoms) = &file.solute_atoms {
            self.solute_atoms = atoms.clone();
        }
        if let Some(residues) = &file.solute_residues {
            self.solute_residues = residues.clone();
        }
        if let Some(radius) = file.radius {
            self.radius = radius;
        }
        if let Some(min) = file.min_coord {
            self.coordination.min = min;
        }
        if let Some(max) = file.max_coord {
            self.coordination.max = max;
        }
        if let Some(top_n) = file.top_n {
            self.top_n = top_n;
        }
        if let Some(size) = file.max_shell_size {
            self.max_shell_size = size;
        }
        if let Some(frames) = file.max_frames {
            self.max_frames = Some(frames);
        }
        if let Some(seed) = file.seed {
            self.seed = Some(seed);
        }
    }
}

/// TOML run configuration. Every field is optional; the CLI merges it
/// beneath explicit flags.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub solute_atoms: Option<Vec<String>>,
    pub solute_residues: Option<Vec<String>>,
    pub radius: Option<f64>,
    pub min_coord: Option<usize>,
    pub max_coord: Option<usize>,
    pub top_n: Option<usize>,
    pub max_shell_size: Option<usize>,
    pub max_frames: Option<usize>,
    pub seed: Option<u64>,
}

impl ConfigFile {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }
}
