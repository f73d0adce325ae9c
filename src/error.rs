use thiserror::Error;

#[derive(Error, Debug)]
pub enum TicklistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Title cannot be empty")]
    BlankTitle,

    #[error("No id was given as input")]
    MissingId,

    #[error("No todo matches id: {0}")]
    UnknownId(String),

    #[error("Id prefix is ambiguous: {0}")]
    AmbiguousId(String),

    #[error("Invalid custom directory: {0}")]
    InvalidDirectory(String),

    #[error("Missing dir flag value")]
    MissingDirValue,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("TUI error: {0}")]
    Tui(String),

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, TicklistError>;
