use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Invalid CSS color: `{0}`")]
    InvalidColor(String),

    #[error("Unknown symbol shape: `{0}`")]
    UnknownSymbolShape(String),
}
