use crate::utils::error::Result;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Reads the tidied input page and opens the feed destination.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    output: Option<PathBuf>,
}

impl LocalStorage {
    /// `None` writes the feed to stdout.
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn read_document(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)?;
        tracing::debug!("read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }

    pub fn open_output(&self) -> Result<Box<dyn Write>> {
        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                Ok(Box::new(BufWriter::new(File::create(path)?)))
            }
            None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        }
    }
}
