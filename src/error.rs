use std::{path::PathBuf, process::ExitStatus};
use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("could not run analyzer `{program}`: {source}")]
    AnalyzerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("analyzer `{program}` exited with {status}: {stderr}")]
    AnalyzerFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("analyzer output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("malformed hex in packet line {line:?}: {source}")]
    MalformedHex {
        line: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("dissector `{program}` failed: {source}")]
    Dissector {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("capture path {0:?} is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    #[error("invalid udp.stream index {0:?}")]
    InvalidStreamIndex(String),

    #[error("capture path {0:?} has no file name")]
    NoCaptureName(PathBuf),

    #[error("could not write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
