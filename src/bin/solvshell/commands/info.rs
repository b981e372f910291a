use anyhow::{Context, Result, bail};

use solvshell::System;
use solvshell::io::TrajectoryReader;

use crate::cli::InfoArgs;
use crate::config::load_species_table;
use crate::display::{Context as DisplayContext, print_species_breakdown, print_trajectory_info};
use crate::io::{open_input, stdin_is_tty};

pub fn run_info(args: InfoArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: solvshell info -i <TRAJECTORY> or pipe data via stdin."
        );
    }

    let species = load_species_table(args.metadata.as_deref())?;

    let input = open_input(args.io.input.as_deref())?;
    let reader = TrajectoryReader::new(input);
    let frames: Result<Vec<System>, _> = match args.max_frames {
        Some(cap) => reader.take(cap).collect(),
        None => reader.collect(),
    };
    let frames = frames.context("Failed to read trajectory")?;

    if frames.is_empty() {
        bail!("Trajectory contains no frames");
    }

    if ctx.interactive {
        print_trajectory_info(&frames);
        print_species_breakdown(&frames[0], species.as_ref());
    }

    // Machine-readable one-liner for scripting.
    let first = &frames[0];
    println!(
        "frames={} atoms={} residues={}",
        frames.len(),
        first.atom_count(),
        first.residues().len()
    );

    Ok(())
}
