use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing and running a training job
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: expected at least a token and a label column, got {content:?}", path.display())]
    MalformedCorpus {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("{}:{line}: expected `<cluster> <word> [<count>]`, got {content:?}", path.display())]
    MalformedClusters {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("failed loading feature extractor `{name}` (available: {})", available.join(", "))]
    UnknownExtractor {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("feature extractor `{name}` didn't fit the extractor API: {reason}")]
    IncompatibleExtractor { name: String, reason: String },

    #[error("invalid training parameters")]
    Params(#[source] io::Error),

    #[error("failed to write progress")]
    Progress(#[source] io::Error),

    #[error("training failed")]
    Train(#[source] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
