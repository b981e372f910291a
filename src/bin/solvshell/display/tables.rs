use std::collections::BTreeMap;
use std::io::{self, Write};

use solvshell::{ExtractReport, SpeciesTable, System};

use crate::util::text::truncate;

const INDENT: &str = "      ";

pub fn print_trajectory_info(frames: &[System]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = vec![("Frames", format!("{}", frames.len()))];

    if let Some(first) = frames.first() {
        rows.push(("Atoms / frame", format!("{}", first.atom_count())));
        rows.push(("Residues / frame", format!("{}", first.residues().len())));
        match first.box_lengths {
            Some([a, b, c]) => {
                rows.push(("Box (Å)", format!("{:.1} × {:.1} × {:.1}", a, b, c)));
            }
            None => rows.push(("Box (Å)", "none".to_string())),
        }
    }

    print_kv_table(&mut out, "Trajectory Summary", &rows);
}

pub fn print_species_breakdown(frame: &System, species: Option<&SpeciesTable>) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for residue in frame.residues() {
        let label = match species {
            Some(table) => table.label_for(&residue.name).to_string(),
            None => residue.name.clone(),
        };
        *counts.entry(label).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return;
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let _ = writeln!(out, "{}┌─ Species Breakdown ─┐", INDENT);
    let _ = writeln!(out, "{}┌────────────┬──────────┬────────────────────────────┐", INDENT);
    let _ = writeln!(out, "{}│ Species    │ Residues │ Share                      │", INDENT);
    let _ = writeln!(out, "{}├────────────┼──────────┼────────────────────────────┤", INDENT);

    for (label, count) in sorted.iter().take(12) {
        let pct = (*count as f64 / total as f64) * 100.0;
        let share = format!("{}  {:>5.1}%", meter(pct, 18), pct);
        let _ = writeln!(
            out,
            "{}│ {:<10} │ {:>8} │ {:<26} │",
            INDENT,
            truncate(label, 10),
            count,
            share
        );
    }
    if sorted.len() > 12 {
        let _ = writeln!(
            out,
            "{}│ {:<10} │ {:>8} │ {:<26} │",
            INDENT,
            "…",
            "",
            format!("({} more species)", sorted.len() - 12)
        );
    }

    let _ = writeln!(out, "{}└────────────┴──────────┴────────────────────────────┘", INDENT);
}

pub fn print_group_table(report: &ExtractReport) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let _ = writeln!(out, "{}┌─ Topology Groups ─┐", INDENT);
    let _ = writeln!(out, "{}┌──────────────────────────────┬────────┬──────┬──────────┐", INDENT);
    let _ = writeln!(out, "{}│ Topology                     │ Found  │ Kept │ Min RMSD │", INDENT);
    let _ = writeln!(out, "{}├──────────────────────────────┼────────┼──────┼──────────┤", INDENT);

    for group in &report.groups {
        let separation = if group.selected > 1 {
            format!("{:.3} Å", group.min_separation)
        } else {
            "—".to_string()
        };
        let _ = writeln!(
            out,
            "{}│ {:<28} │ {:>6} │ {:>4} │ {:>8} │",
            INDENT,
            truncate(&group.key.label(), 28),
            group.candidates,
            group.selected,
            separation
        );
    }

    let _ = writeln!(out, "{}└──────────────────────────────┴────────┴──────┴──────────┘", INDENT);
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let val_w = 36usize;

    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, title);
    let _ = writeln!(
        out,
        "{}┌{}┬{}┐",
        INDENT,
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{}┴{}┘",
        INDENT,
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );
}

fn meter(pct: f64, width: usize) -> String {
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled.min(width)),
        "░".repeat(width.saturating_sub(filled))
    )
}
