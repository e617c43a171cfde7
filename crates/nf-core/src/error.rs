use thiserror::Error;

pub type NfResult<T> = Result<T, NfError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NfError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Id space exhausted")]
    IdsExhausted,
}
