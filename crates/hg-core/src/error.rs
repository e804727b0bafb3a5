use thiserror::Error;

use crate::ids::Id;

pub type HgResult<T> = Result<T, HgError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HgError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Out of range: {what} (value={value})")]
    OutOfRange { what: &'static str, value: f64 },

    #[error("Element name must not be empty")]
    EmptyName,

    #[error("Element '{name}' already has id {id}")]
    IdAlreadyAssigned { name: String, id: Id },
}
