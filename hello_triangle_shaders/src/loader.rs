//! Reading shader source text from disk.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::trace;

use crate::error::BuildError;

/// Resolves shader names against a root directory and reads them.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    root: PathBuf,
}

impl SourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where `name` would be read from.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Reads the named source in full.
    ///
    /// A name that doesn't exist is reported as [`BuildError::ResourceNotFound`], so an existing
    /// but empty file (which loads as an empty string) can be told apart from a missing one.
    pub fn load(&self, name: &str) -> Result<String, BuildError> {
        let path = self.resolve(name);

        load_source(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => BuildError::ResourceNotFound {
                name: name.to_string(),
                path,
            },
            _ => BuildError::Io {
                name: name.to_string(),
                source: e,
            },
        })
    }
}

/// Reads a file line by line, ending every line (including the last) with `\n`.
///
/// Windows line endings come back as plain `\n`.
pub fn load_source(path: &Path) -> io::Result<String> {
    let reader = BufReader::new(File::open(path)?);
    let mut source = String::new();

    for line in reader.lines() {
        source.push_str(&line?);
        source.push('\n');
    }

    trace!("read {} bytes of shader source from {}", source.len(), path.display());

    Ok(source)
}
