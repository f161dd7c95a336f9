use std::result::Result as StdResult;
use thiserror::Error as ThisError;

/// Errors surfaced by the parts of the crate that are allowed to fail
/// outright: spec deserialization and the standalone validator.
///
/// The evaluator itself (see [`crate::evaluator::execute`]) never lets one
/// of these escape — a failing step is downgraded to identity and the
/// pipeline continues, per the error policy in the DSL this crate
/// implements.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("configuration is not a JSON object")]
    ConfigNotObject,
    #[error("'pipeline' is missing or is not an array")]
    PipelineNotArray,
    #[error("'version' must be a non-empty string or an integer")]
    InvalidVersion,
    #[error("step {index}: 'op' is missing or is not a string")]
    MissingOpTag { index: usize },
    #[error("step {index}: unknown operation '{op}'")]
    UnknownOp { index: usize, op: String },
    #[error("step {index} ({op}): missing required parameter '{param}'")]
    MissingParam {
        index: usize,
        op: String,
        param: &'static str,
    },
    #[error("step {index} ({op}): parameter '{param}' has the wrong type")]
    WrongParamType {
        index: usize,
        op: String,
        param: &'static str,
    },
}

pub type Result<T> = StdResult<T, Error>;
