use std::{io, path::PathBuf};
use thiserror::Error;

use crate::{pyplot, record::RowError};

/// Errors that can occur while turning a data file into a figure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The input file does not exist or cannot be read.
    #[error("cannot read input file {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A row is not made of exactly three numeric fields.
    #[error("line {line}: {reason}: {content:?}")]
    Parse {
        line: usize,
        content: String,
        #[source]
        reason: RowError,
    },

    /// The input holds no data row.
    #[error("input contains no data rows")]
    NoData,

    /// The figure could not be written to its destination.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: WriteFailure,
    },

    /// Matplotlib is missing or failed while drawing.
    #[error("plotting failed: {0}")]
    Plot(#[from] pyplot::Error),
}

/// Underlying cause of [`RenderError::Write`].
#[derive(Debug, Error)]
pub enum WriteFailure {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Save(#[from] pyplot::Error),
}

/// Coarse classification of [`RenderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    Parse,
    Write,
    Plot,
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::FileNotFound { .. } => ErrorKind::FileNotFound,
            RenderError::Parse { .. } | RenderError::NoData => ErrorKind::Parse,
            RenderError::Write { .. } => ErrorKind::Write,
            RenderError::Plot(_) => ErrorKind::Plot,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
