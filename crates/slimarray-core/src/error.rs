// crates/slimarray-core/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlimError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlimError {
    #[error("index {index} out of bounds for array of length {len}")]
    OutOfBounds { index: i64, len: i64 },

    #[error("fitter degree mismatch: lhs={lhs} rhs={rhs}")]
    DegreeMismatch { lhs: u8, rhs: u8 },

    #[error("validation error: {0}")]
    Validation(String),
}
