use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "solvshell",
    about = "Solvation-shell extraction from MD trajectories",
    version,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract solvation shells from a PDB trajectory
    #[command(visible_alias = "x")]
    Extract(Box<ExtractArgs>),

    /// Summarize a trajectory without extracting anything
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Input PDB trajectory (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Directory extraction results are written under
    #[arg(long = "save-dir", value_name = "DIR", default_value = "results")]
    pub save_dir: PathBuf,

    /// System label naming the output subdirectory
    #[arg(long = "system-name", value_name = "NAME")]
    pub system_name: String,

    #[command(flatten)]
    pub selection: SelectionOptions,

    #[command(flatten)]
    pub shell: ShellOptions,

    #[command(flatten)]
    pub ranking: RankingOptions,

    /// TOML run config supplying defaults for any extraction flag
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Solute selection options.
#[derive(Args)]
#[command(next_help_heading = "Solute Selection")]
pub struct SelectionOptions {
    /// Solute atom name defining a shell center, repeatable
    #[arg(long = "solute-atom", value_name = "NAME", action = clap::ArgAction::Append)]
    pub solute_atoms: Vec<String>,

    /// Residue name treated as solute during shell expansion, repeatable
    #[arg(long = "solute-residue", value_name = "RES", action = clap::ArgAction::Append)]
    pub solute_residues: Vec<String>,

    /// Species metadata JSON mapping residue names to species and roles
    #[arg(long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,
}

/// Shell geometry options.
#[derive(Args)]
#[command(next_help_heading = "Shell Geometry")]
pub struct ShellOptions {
    /// Solvation cutoff radius in Å [default: 3.0]
    #[arg(long, value_name = "Å")]
    pub radius: Option<f64>,

    /// Minimum coordination number to keep [default: 2]
    #[arg(long = "min-coord", value_name = "N")]
    pub min_coord: Option<usize>,

    /// Maximum coordination number to keep [default: 5]
    #[arg(long = "max-coord", value_name = "N")]
    pub max_coord: Option<usize>,

    /// Atom cap while expanding across solute neighbors [default: 200]
    #[arg(long = "max-shell-size", value_name = "N")]
    pub max_shell_size: Option<usize>,
}

/// Diversity ranking options.
#[derive(Args)]
#[command(next_help_heading = "Ranking")]
pub struct RankingOptions {
    /// Diverse shells retained per topology group [default: 20]
    #[arg(long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,

    /// Trajectory frames to analyze [default: all]
    #[arg(long = "max-frames", value_name = "N")]
    pub max_frames: Option<usize>,

    /// RNG seed for reproducible diversity selection
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Species metadata JSON for the species breakdown
    #[arg(long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Trajectory frames to scan [default: all]
    #[arg(long = "max-frames", value_name = "N")]
    pub max_frames: Option<usize>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn solute_atoms_stay_discrete_tokens() {
        let cli = Cli::try_parse_from([
            "solvshell",
            "extract",
            "-i",
            "testfiles/al_clo4_example.pdb",
            "--save-dir",
            "results",
            "--system-name",
            "Al_ClO4",
            "--solute-atom",
            "CL1",
            "--solute-atom",
            "O00",
            "--solute-atom",
            "O02",
            "--solute-atom",
            "O03",
            "--solute-atom",
            "O04",
            "--min-coord",
            "2",
            "--max-coord",
            "5",
            "--top-n",
            "20",
        ])
        .expect("valid invocation");

        let Command::Extract(args) = cli.command else {
            panic!("expected extract subcommand");
        };
        assert_eq!(
            args.selection.solute_atoms,
            vec!["CL1", "O00", "O02", "O03", "O04"]
        );
        assert_eq!(args.system_name, "Al_ClO4");
        assert_eq!(args.save_dir, PathBuf::from("results"));
        assert_eq!(args.shell.min_coord, Some(2));
        assert_eq!(args.shell.max_coord, Some(5));
        assert_eq!(args.ranking.top_n, Some(20));
        // Unset flags stay unset so config-file values can fill them.
        assert_eq!(args.shell.radius, None);
    }

    #[test]
    fn info_subcommand_parses() {
        let cli = Cli::try_parse_from(["solvshell", "info", "-i", "traj.pdb", "--max-frames", "5"])
            .expect("valid invocation");
        let Command::Info(args) = cli.command else {
            panic!("expected info subcommand");
        };
        assert_eq!(args.max_frames, Some(5));
        assert!(!args.io.quiet);
    }
}
