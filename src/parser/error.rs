use crate::Field;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("first line of a route entry does not start with an index")]
    InvalidIndexLine,

    #[error("{field} line is not a continuation line")]
    MissingContinuation { field: Field },

    #[error("invalid IPv6 address {token:?} in {field} line")]
    InvalidAddressSyntax { field: Field, token: String },

    #[error("error in reading route table: {0}")]
    ReadFailure(#[from] std::io::Error),

    #[error("route table ended before the {field} line")]
    TruncatedRecord { field: Field },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}
