use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, IsTerminal, Read, Stdin};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Returns `true` if stdin is a terminal (interactive).
pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

#[derive(Debug)]
pub enum InputSource {
    File(BufReader<File>),
    Stdin(BufReader<Stdin>),
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            InputSource::File(r) => r.read(buf),
            InputSource::Stdin(r) => r.read(buf),
        }
    }
}

impl BufRead for InputSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            InputSource::File(r) => r.fill_buf(),
            InputSource::Stdin(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            InputSource::File(r) => r.consume(amt),
            InputSource::Stdin(r) => r.consume(amt),
        }
    }
}

pub fn open_input(path: Option<&Path>) -> Result<InputSource> {
    match path {
        Some(p) => {
            let file = File::open(p)
                .with_context(|| format!("Failed to open input file: {}", p.display()))?;
            Ok(InputSource::File(BufReader::new(file)))
        }
        None => Ok(InputSource::Stdin(BufReader::new(io::stdin()))),
    }
}

/// Creates `<save_dir>/<system_name>/` and returns its path.
pub fn prepare_save_dir(save_dir: &Path, system_name: &str) -> Result<PathBuf> {
    let dir = save_dir.join(system_name);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    Ok(dir)
}
