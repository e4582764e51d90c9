//! Loading paste data from files, directories or stdin
//!
//! A directory is treated as one long paste: every accepted file below it is
//! read in path order and the contents are joined, so a continuation row at
//! the top of one file inherits the state left by the previous file.

use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::constants::{ACCEPTED_INPUT_EXTENSIONS, STDIN_MARKER};
use crate::error::{ExtractorError, Result};

/// Where the paste data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
    Directory(PathBuf),
}

impl InputSource {
    /// Classify a command-line input argument
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.as_os_str() == STDIN_MARKER {
            return Ok(Self::Stdin);
        }

        if !path.exists() {
            return Err(ExtractorError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        if path.is_dir() {
            return Ok(Self::Directory(path.to_path_buf()));
        }

        if !is_accepted_file(path) {
            return Err(ExtractorError::UnsupportedInput {
                path: path.to_path_buf(),
                reason: format!(
                    "expected one of: {}",
                    ACCEPTED_INPUT_EXTENSIONS
                        .iter()
                        .map(|ext| format!(".{}", ext))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            });
        }

        Ok(Self::File(path.to_path_buf()))
    }

    /// Read the full paste text
    pub fn read(&self) -> Result<String> {
        match self {
            Self::Stdin => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                debug!("Read {} bytes from stdin", content.len());
                Ok(strip_bom(content))
            }
            Self::File(path) => read_file(path),
            Self::Directory(dir) => {
                let files = discover_input_files(dir)?;
                if files.is_empty() {
                    return Err(ExtractorError::UnsupportedInput {
                        path: dir.clone(),
                        reason: "directory contains no .txt, .csv or .tsv files".to_string(),
                    });
                }

                info!("Reading {} input files from {}", files.len(), dir.display());
                let mut combined = String::new();
                for file in &files {
                    let content = read_file(file)?;
                    combined.push_str(&content);
                    if !combined.ends_with('\n') {
                        combined.push('\n');
                    }
                }
                Ok(combined)
            }
        }
    }
}

/// Read paste text from a path argument (`-` for stdin)
pub fn read_input(path: &Path) -> Result<String> {
    InputSource::from_path(path)?.read()
}

/// All accepted files below a directory, sorted by path
pub fn discover_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && is_accepted_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!("Discovered {} input files under {}", files.len(), dir.display());
    Ok(files)
}

/// Whether the file extension is one of the accepted paste formats
pub fn is_accepted_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_INPUT_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

fn read_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(strip_bom(content))
}

fn strip_bom(content: String) -> String {
    match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    }
}
