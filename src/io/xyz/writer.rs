use std::io::Write;

use crate::io::error::Error;
use crate::model::system::System;

/// Writes a structure in XYZ format: atom count, a single comment line,
/// then one `symbol x y z` line per atom.
///
/// Newlines in the comment would corrupt the record structure, so they are
/// replaced with spaces.
pub fn write_xyz<W: Write>(mut writer: W, system: &System, comment: &str) -> Result<(), Error> {
    writeln!(writer, "{}", system.atom_count())?;
    writeln!(writer, "{}", comment.replace(['\n', '\r'], " "))?;

    for atom in &system.atoms {
        writeln!(
            writer,
            "{:<2} {:>12.6} {:>12.6} {:>12.6}",
            atom.element.symbol(),
            atom.position[0],
            atom.position[1],
            atom.position[2]
        )?;
    }

    Ok(())
}
