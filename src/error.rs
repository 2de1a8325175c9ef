//! Typed failure kinds for list generation.
//!
//! Validators return these instead of exiting so each check stays testable
//! in isolation; only `main` maps them to process exit codes.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config key {key:?} is missing from config.txt")]
    MissingKey { key: &'static str },

    #[error("config key {key:?} has invalid value {value:?}: {reason}")]
    InvalidKey {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("compiler command {command:?} could not be parsed: {reason}")]
    BadCompilerCommand { command: String, reason: String },

    #[error(
        "no_lists ({no_lists}) must equal no_conds ({no_conds}); \
         the rotation is only balanced for square designs"
    )]
    ListConditionMismatch { no_lists: u32, no_conds: u32 },

    #[error("item {item}: found {found} condition lines, expected {expected}")]
    ConditionCountMismatch {
        item: u32,
        found: usize,
        expected: u32,
    },

    #[error(
        "filler/item quotient {observed} does not match the configured \
         {numerator}:{denominator} ratio (quotient {expected})"
    )]
    RatioMismatch {
        observed: u32,
        expected: u32,
        numerator: u32,
        denominator: u32,
    },

    #[error("stimulus pool is empty; the filler:item ratio is undefined")]
    EmptyItemPool,

    #[error("list number {list_no} is out of range; it must be between 1 and {no_lists}")]
    ListOutOfRange { list_no: u32, no_lists: u32 },

    #[error("item {item} has no condition {cond}")]
    MissingCondition { item: u32, cond: u32 },

    #[error("template placeholder {name:?} is not recognized")]
    UnknownPlaceholder { name: String },

    #[error("template has a stray or unterminated brace at byte offset {offset}")]
    StrayBrace { offset: usize },

    #[error("read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code for fatal errors, one code per failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingKey { .. }
            | Error::InvalidKey { .. }
            | Error::BadCompilerCommand { .. } => 2,
            Error::ConditionCountMismatch { .. } | Error::MissingCondition { .. } => 3,
            Error::RatioMismatch { .. } | Error::EmptyItemPool => 4,
            Error::ListOutOfRange { .. } => 5,
            Error::ListConditionMismatch { .. } => 6,
            Error::UnknownPlaceholder { .. } | Error::StrayBrace { .. } => 2,
            Error::ReadInput { .. } => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
