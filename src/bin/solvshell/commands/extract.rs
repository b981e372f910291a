use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use solvshell::io::{TrajectoryReader, write_xyz};
use solvshell::{ExtractConfig, ExtractReport, SpeciesTable, System, extract};

use crate::cli::ExtractArgs;
use crate::config::{build_extract_config, load_species_table};
use crate::display::{
    Context as DisplayContext, Progress, print_group_table, print_species_breakdown,
    print_trajectory_info,
};
use crate::io::{open_input, prepare_save_dir, stdin_is_tty};

const TOTAL_STEPS: u8 = 3;

pub fn run_extract(args: ExtractArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: solvshell extract -i <TRAJECTORY> --system-name <NAME> or pipe data via stdin."
        );
    }

    let config = build_extract_config(&args)?;
    let species = load_species_table(args.selection.metadata.as_deref())?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading trajectory");
    let frames = read_frames(&args, &config)?;
    progress.complete_step(
        "Reading trajectory",
        &read_substeps(&args, &frames, species.as_ref()),
    );

    if ctx.interactive {
        print_trajectory_info(&frames);
        if let Some(first) = frames.first() {
            print_species_breakdown(first, species.as_ref());
        }
    }

    progress.step("Extracting solvation shells");
    let report =
        extract(frames, species.as_ref(), &config).context("Solvation-shell extraction failed")?;
    progress.complete_step(
        "Extracting solvation shells",
        &extract_substeps(&config, &report),
    );

    if ctx.interactive {
        print_group_table(&report);
    }

    progress.step("Writing shells");
    let out_dir = prepare_save_dir(&args.save_dir, &args.system_name)?;
    let written = write_shell_files(&out_dir, &args.system_name, &report)?;
    write_summary(&out_dir, &args.system_name, &report, written)?;
    progress.complete_step(
        "Writing shells",
        &[
            format!("{} XYZ file(s) → {}", written, out_dir.display()),
            "Summary → extraction_summary.json".to_string(),
        ],
    );

    progress.finish();

    Ok(())
}

fn read_frames(args: &ExtractArgs, config: &ExtractConfig) -> Result<Vec<System>> {
    let input = open_input(args.io.input.as_deref())?;
    let reader = TrajectoryReader::new(input);

    let frames: Result<Vec<System>, _> = match config.max_frames {
        Some(cap) => reader.take(cap).collect(),
        None => reader.collect(),
    };
    frames.context("Failed to read trajectory")
}

fn read_substeps(args: &ExtractArgs, frames: &[System], species: Option<&SpeciesTable>) -> Vec<String> {
    let source = args
        .io
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());

    let mut steps = vec![format!("Parse PDB ← {}", source)];
    let atoms = frames.first().map(System::atom_count).unwrap_or(0);
    steps.push(format!("{} frame(s) × {} atom(s)", frames.len(), atoms));
    if let Some(table) = species {
        steps.push(format!("Species table: {} residue entries", table.len()));
    }
    steps
}

fn extract_substeps(config: &ExtractConfig, report: &ExtractReport) -> Vec<String> {
    vec![
        format!("{} solute site(s) matched", report.sites_matched),
        format!(
            "{} shell(s) within coordination [{}, {}]",
            report.within_bounds, config.coordination.min, config.coordination.max
        ),
        format!("{} topology group(s)", report.groups.len()),
        format!(
            "Select ≤{} diverse shell(s) per group",
            config.top_n
        ),
    ]
}

fn write_shell_files(
    out_dir: &std::path::Path,
    system_name: &str,
    report: &ExtractReport,
) -> Result<usize> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    for shell in &report.shells {
        let label = shell.key.label();
        let counter = counters.entry(label.clone()).or_insert(0);
        let path = out_dir.join(format!("{}_{}.xyz", label, counter));
        *counter += 1;

        let comment = format!(
            "{} frame={} center={} cn={}",
            system_name, shell.frame, shell.key.center, shell.coordination
        );
        let file = File::create(&path)
            .with_context(|| format!("Failed to create shell file: {}", path.display()))?;
        write_xyz(BufWriter::new(file), &shell.system, &comment)
            .with_context(|| format!("Failed to write shell file: {}", path.display()))?;
    }
    Ok(report.shells.len())
}

#[derive(Serialize)]
struct RunSummary<'a> {
    system: &'a str,
    frames_scanned: usize,
    sites_matched: usize,
    shells_within_bounds: usize,
    shells_written: usize,
    groups: Vec<GroupRecord>,
}

#[derive(Serialize)]
struct GroupRecord {
    topology: String,
    coordination: usize,
    candidates: usize,
    selected: usize,
    min_rmsd: f64,
}

fn write_summary(
    out_dir: &std::path::Path,
    system_name: &str,
    report: &ExtractReport,
    written: usize,
) -> Result<()> {
    let summary = RunSummary {
        system: system_name,
        frames_scanned: report.frames_scanned,
        sites_matched: report.sites_matched,
        shells_within_bounds: report.within_bounds,
        shells_written: written,
        groups: report
            .groups
            .iter()
            .map(|g| GroupRecord {
                topology: g.key.label(),
                coordination: g.key.coordination(),
                candidates: g.candidates,
                selected: g.selected,
                min_rmsd: g.min_separation,
            })
            .collect(),
    };

    let path = out_dir.join("extraction_summary.json");
    let file = File::create(&path)
        .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &summary)
        .with_context(|| format!("Failed to write summary file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvshell::{Atom, AtomSiteInfo, CoordinationRange};

    fn shell_report() -> ExtractReport {
        let mut frame = System::new();
        let positions = [
            ("LI1", "LI", 1, "Li", [0.0, 0.0, 0.0]),
            ("O", "HOH", 2, "O", [2.0, 0.0, 0.0]),
            ("O", "HOH", 3, "O", [-2.0, 0.0, 0.0]),
        ];
        for (name, res, id, symbol, pos) in positions {
            frame.atoms.push(Atom::new(symbol.parse().unwrap(), pos));
            frame.site_info.push(AtomSiteInfo::new(name, res, id, 'A'));
        }

        let config = ExtractConfig {
            solute_atoms: vec!["LI1".into()],
            coordination: CoordinationRange::new(1, 6),
            seed: Some(10),
            ..ExtractConfig::default()
        };
        extract([frame], None, &config).unwrap()
    }

    #[test]
    fn shell_files_and_summary_land_in_the_save_dir() {
        let report = shell_report();
        let dir = tempfile::tempdir().unwrap();
        let out_dir = prepare_save_dir(dir.path(), "LiTest").unwrap();

        let written = write_shell_files(&out_dir, "LiTest", &report).unwrap();
        write_summary(&out_dir, "LiTest", &report, written).unwrap();

        assert_eq!(written, 1);
        assert!(out_dir.join("LI1_cn2_2HOH_0.xyz").is_file());

        let summary: serde_json::Value =
            serde_json::from_reader(File::open(out_dir.join("extraction_summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["system"], "LiTest");
        assert_eq!(summary["shells_written"], 1);
        assert_eq!(summary["groups"][0]["coordination"], 2);
    }

    #[test]
    fn shell_comments_carry_provenance() {
        let report = shell_report();
        let dir = tempfile::tempdir().unwrap();

        write_shell_files(dir.path(), "LiTest", &report).unwrap();
        let text = std::fs::read_to_string(dir.path().join("LI1_cn2_2HOH_0.xyz")).unwrap();
        let comment = text.lines().nth(1).unwrap();
        assert!(comment.contains("LiTest"));
        assert!(comment.contains("frame=0"));
        assert!(comment.contains("cn=2"));
    }
}
