use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("symbol text is missing")]
    MissingText,

    #[error("cannot persist symbol: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SymbolResult<T> = Result<T, SymbolError>;
