use std::io::BufRead;

use crate::io::{Format, error::Error, util};
use crate::model::{atom::Atom, metadata::AtomSiteInfo, system::System};

/// Streaming reader for multi-model PDB trajectories.
///
/// Each MODEL/ENDMDL block becomes one [`System`]; a file without MODEL
/// records yields a single frame. CRYST1 box dimensions are sticky: MD
/// writers usually emit one CRYST1 header that applies to every frame.
pub struct TrajectoryReader<R: BufRead> {
    lines: std::io::Lines<R>,
    line_no: usize,
    box_lengths: Option<[f64; 3]>,
    done: bool,
}

impl<R: BufRead> TrajectoryReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            box_lengths: None,
            done: false,
        }
    }

    fn next_frame(&mut self) -> Result<Option<System>, Error> {
        let mut atoms = Vec::new();
        let mut site_info = Vec::new();

        while let Some(line) = self.lines.next() {
            self.line_no += 1;
            let line = line.map_err(|e| Error::Io { source: e })?;
            let record = field(&line, 0..6);

            match record {
                "ATOM" | "HETATM" => {
                    let (atom, info) = parse_atom_record(&line, self.line_no)?;
                    atoms.push(atom);
                    site_info.push(info);
                }
                "CRYST1" => {
                    self.box_lengths = Some(parse_cryst1(&line, self.line_no)?);
                }
                "ENDMDL" => {
                    if !atoms.is_empty() {
                        return Ok(Some(self.finish_frame(atoms, site_info)));
                    }
                }
                // A MODEL record while atoms are pending means the previous
                // frame was never closed with ENDMDL; emit it.
                "MODEL" => {
                    if !atoms.is_empty() {
                        return Ok(Some(self.finish_frame(atoms, site_info)));
                    }
                }
                "END" => break,
                _ => {}
            }
        }

        self.done = true;
        if atoms.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.finish_frame(atoms, site_info)))
        }
    }

    fn finish_frame(&self, atoms: Vec<Atom>, site_info: Vec<AtomSiteInfo>) -> System {
        System {
            atoms,
            site_info,
            box_lengths: self.box_lengths,
        }
    }
}

impl<R: BufRead> Iterator for TrajectoryReader<R> {
    type Item = Result<System, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Reads every frame of a trajectory into memory.
pub fn read_trajectory<R: BufRead>(reader: R) -> Result<Vec<System>, Error> {
    TrajectoryReader::new(reader).collect()
}

/// Column slice by PDB byte positions, tolerant of short lines.
fn field(line: &str, range: std::ops::Range<usize>) -> &str {
    let end = range.end.min(line.len());
    if range.start >= end {
        return "";
    }
    line.get(range.start..end).unwrap_or("").trim()
}

fn parse_atom_record(line: &str, line_no: usize) -> Result<(Atom, AtomSiteInfo), Error> {
    if line.len() < 54 {
        return Err(Error::parse(
            Format::Pdb,
            line_no,
            "ATOM record too short for coordinate fields",
        ));
    }

    let atom_name = field(line, 12..16);
    let residue_name = field(line, 17..21);
    let chain_id = line.get(21..22).and_then(|s| s.chars().next()).unwrap_or(' ');

    let residue_id = field(line, 22..26)
        .parse::<i32>()
        .map_err(|_| Error::parse(Format::Pdb, line_no, "invalid residue sequence number"))?;

    let x = parse_coord(line, 30..38, line_no, "x")?;
    let y = parse_coord(line, 38..46, line_no, "y")?;
    let z = parse_coord(line, 46..54, line_no, "z")?;

    let element = util::infer_element(field(line, 76..78), atom_name).ok_or_else(|| {
        Error::parse(
            Format::Pdb,
            line_no,
            format!("unable to infer element for atom '{}'", atom_name),
        )
    })?;

    Ok((
        Atom::new(element, [x, y, z]),
        AtomSiteInfo::new(atom_name, residue_name, residue_id, chain_id),
    ))
}

fn parse_coord(
    line: &str,
    range: std::ops::Range<usize>,
    line_no: usize,
    axis: &str,
) -> Result<f64, Error> {
    field(line, range).parse::<f64>().map_err(|_| {
        Error::parse(
            Format::Pdb,
            line_no,
            format!("invalid {} coordinate in ATOM record", axis),
        )
    })
}

fn parse_cryst1(line: &str, line_no: usize) -> Result<[f64; 3], Error> {
    let a = field(line, 6..15);
    let b = field(line, 15..24);
    let c = field(line, 24..33);

    let parse = |s: &str, name: &str| {
        s.parse::<f64>().map_err(|_| {
            Error::parse(
                Format::Pdb,
                line_no,
                format!("invalid {} cell length in CRYST1 record", name),
            )
        })
    };

    Ok([parse(a, "a")?, parse(b, "b")?, parse(c, "c")?])
}
