use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = collect_hints(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Option<Vec<String>> {
    let mut hints = Vec::new();

    if let Some(io_err) = err.downcast_ref::<solvshell::io::Error>() {
        collect_io_hints(&mut hints, io_err);
    } else if let Some(extract_err) = err.downcast_ref::<solvshell::ExtractError>() {
        collect_extract_hints(&mut hints, extract_err);
    } else {
        collect_fallback_hints(&mut hints, err);
    }

    if hints.is_empty() { None } else { Some(hints) }
}

fn collect_io_hints(hints: &mut Vec<String>, err: &solvshell::io::Error) {
    use solvshell::io::Error as IoError;

    match err {
        IoError::Io { source } => collect_std_io_hints(hints, source),

        IoError::Parse { format, line, .. } => {
            hints.push(format!(
                "Parser encountered an issue near line {} in {} data",
                line, format
            ));
            hints.push("Inspect the file around that line for malformed records".into());
            hints.push("PDB: check ATOM/HETATM column alignment (columns 1-80)".into());
        }

        IoError::Metadata(_) => {
            hints.push("Species metadata arrays must be parallel".into());
            hints.push("Each residue needs one species label and one role".into());
            hints.push("Valid roles are 'solute' and 'solvent'".into());
        }

        IoError::MetadataJson(_) => {
            hints.push("The metadata file is not valid JSON".into());
            hints.push("Expected keys: residue, species, solute_or_solvent".into());
        }
    }
}

fn collect_extract_hints(hints: &mut Vec<String>, err: &solvshell::ExtractError) {
    use solvshell::ExtractError;

    match err {
        ExtractError::ConfigParse(_) => {
            hints.push("The run config file has invalid TOML syntax".into());
            hints.push("Check for missing quotes, brackets, or unknown keys".into());
        }

        ExtractError::InvalidRadius(_) => {
            hints.push("Pass a positive cutoff via --radius".into());
        }

        ExtractError::InvalidCoordinationRange { .. } => {
            hints.push("Ensure --min-coord does not exceed --max-coord".into());
        }

        ExtractError::InvalidTopN | ExtractError::InvalidShellSize => {
            hints.push("Counts must be at least 1".into());
        }

        ExtractError::NoSoluteSelector => {
            hints.push("Name shell centers with --solute-atom (repeatable)".into());
            hints.push("Or supply solute_atoms in a --config TOML file".into());
        }

        ExtractError::EmptyTrajectory => {
            hints.push("The input contained no ATOM/HETATM records".into());
            hints.push("Check that the file is a PDB trajectory".into());
        }

        ExtractError::NoMatchingSites { .. } => {
            hints.push("Atom names are matched case-insensitively against columns 13-16".into());
            hints.push("Run 'solvshell info' to inspect the trajectory contents".into());
        }

        ExtractError::StructureMismatch { .. } => {
            hints.push("Shells in one topology group stopped lining up".into());
            hints.push("This may indicate a bug — please report if reproducible".into());
        }
    }
}

fn collect_std_io_hints(hints: &mut Vec<String>, source: &std::io::Error) {
    use std::io::ErrorKind;

    match source.kind() {
        ErrorKind::NotFound => {
            hints.push("File or directory not found".into());
            hints.push("Check the path spelling and the working directory".into());
        }
        ErrorKind::PermissionDenied => {
            hints.push("Permission denied accessing the file".into());
            hints.push("Check file permissions with `ls -la`".into());
        }
        ErrorKind::UnexpectedEof => {
            hints.push("Unexpected end of file encountered".into());
            hints.push("The trajectory may be truncated".into());
        }
        ErrorKind::WriteZero => {
            hints.push("Failed to write data (disk full?)".into());
            hints.push("Check available disk space".into());
        }
        _ => {
            hints.push("I/O operation failed".into());
            hints.push("Check file path, permissions, and disk space".into());
        }
    }
}

fn collect_fallback_hints(hints: &mut Vec<String>, err: &Error) {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    let text = text.to_lowercase();

    if text.contains("terminal") || text.contains("stdin") {
        hints.push("Provide input via -i/--input or pipe data to stdin".into());
    } else if text.contains("no such file") || text.contains("not found") {
        hints.push("Check that the file path is correct".into());
        hints.push("Verify the file exists and is readable".into());
    } else if text.contains("permission denied") {
        hints.push("Check file permissions and access rights".into());
    }
}
