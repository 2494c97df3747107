use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by loading, profiling, and exporting reactivity data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: malformed line: {text:?}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("{path}: missing required column {column:?}")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("series {name:?} has no finite reactivity values")]
    NoFiniteValues { name: String },

    #[error("series {name:?} is shorter than the motif length ({len} < {m})")]
    SeriesTooShort { name: String, len: usize, m: usize },

    #[error("motif length {0} is too short")]
    MotifTooShort(usize),

    #[error("consensus search needs at least 2 series, got {0}")]
    TooFewSeries(usize),

    #[error("no candidate window has a finite radius; every window spans missing values")]
    NoUsableWindow,

    #[error("plot rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
