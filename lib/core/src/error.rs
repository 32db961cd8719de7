use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Per-record failure to turn a structure string into a fingerprint.
///
/// Never fatal for a run: the record is skipped and reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("empty structure string")]
    Empty,

    #[error("invalid structure: {0}")]
    InvalidStructure(String),
}

/// Per-structure failure to produce a depiction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot depict invalid structure: {0}")]
    InvalidStructure(String),

    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}
