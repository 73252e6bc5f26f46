use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("no vocabulary found: {progress:?} does not exist and {master:?} could not be read: {source}")]
    StorageUnavailable {
        progress: PathBuf,
        master: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed dataset {path:?} at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("dataset {path:?} has no words")]
    Empty { path: PathBuf },

    #[error("every word in {path:?} is learned, run `reset` to start over")]
    AllLearned { path: PathBuf },

    #[error("field {name:?} not found, dataset has {available:?}")]
    UnknownField {
        name: String,
        available: [String; 2],
    },

    #[error("prompt and answer are both {0:?}")]
    SameField(String),

    #[error("no card is being shown")]
    NoCurrentCard,
}

pub type Result<T> = std::result::Result<T, DeckError>;
