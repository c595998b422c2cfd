//! This module contains all custom errors used in this library.

use std::fmt;
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ImportError {
    /// The payload source at `path` could not be opened or read.
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    IoError(std::io::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> ImportError {
        ImportError::IoError(e)
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileAccess { path, source } => {
                write!(f, "Import: unable to read {}: {}", path.display(), source)
            }
            Self::IoError(e) => write!(f, "Import: IoError: {}", e),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FileAccess { source, .. } => Some(source),
            Self::IoError(e) => Some(e),
        }
    }
}

#[derive(Debug)]
pub enum ProcessingError {
    InvalidParameter(String),
    /// The adjacency lists are not symmetric.
    InvalidGraph(String),
    InvalidSolution(String),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Self::InvalidGraph(msg) => write!(f, "Invalid graph: {}", msg),
            Self::InvalidSolution(msg) => write!(f, "InvalidSolution: {}", msg),
        }
    }
}

impl Error for ProcessingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn file_access_display_test() {
        let err = ImportError::FileAccess {
            path: PathBuf::from("input/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("input/missing.txt"));
        assert!(err.source().is_some());
    }

    #[test]
    fn processing_display_test() {
        let err = ProcessingError::InvalidGraph("1 -> 2".to_owned());
        assert_eq!(err.to_string(), "Invalid graph: 1 -> 2");
    }
}
