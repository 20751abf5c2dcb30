use thiserror::Error;

/// Failures while turning raw text (or saved count tables) into a `Corpus`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorpusError {
    #[error("Corpus is empty: no valid tokens remained after filtering")]
    Empty,

    #[error("Invalid count table '{file}': {reason}")]
    InvalidTable { file: String, reason: String },
}

/// Validation failures. Each one is fatal to the layout being validated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Slot '{0}' is assigned to more than one character")]
    DuplicateAssignment(String),

    #[error("Unknown slot identifier '{0}'")]
    InvalidSlot(String),

    #[error("Required character '{0}' is not mapped")]
    MissingRequiredCharacter(char),

    #[error("Layout key '{0}' must be exactly one character")]
    InvalidCharacter(String),

    #[error("Character '{0}' appears more than once in the layout string")]
    DuplicateCharacter(char),

    #[error("Layout string has {found} characters, geometry expects {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Invalid states detected while computing a report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("Character '{ch}' sits on slot '{slot}' which the geometry table does not define")]
    UnknownSlot { ch: char, slot: String },

    #[error("Effort model is invalid: {0}")]
    InvalidEffortModel(String),
}

#[derive(Error, Debug)]
pub enum KeyscopeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Geometry Error: {0}")]
    Geometry(String),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

pub type KsResult<T> = Result<T, KeyscopeError>;
