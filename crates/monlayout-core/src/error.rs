// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A fetched record does not match the expected layout, or references
    /// an id that does not exist in the same snapshot.
    #[error("malformed {record} record: {reason}")]
    MalformedRecord { record: &'static str, reason: String },

    #[error("inconsistent snapshot (resources serial {resources}, state serial {state})")]
    InconsistentSnapshot { resources: u32, state: u32 },

    #[error("no mode is common to all cloned outputs")]
    NoCommonMode,

    #[error("outputs cannot be cloned: {0}")]
    IncompatibleClone(String),

    #[error("configuration is based on stale serial {serial}")]
    StaleSerial { serial: u32 },

    #[error("display service unreachable: {0}")]
    ServiceUnreachable(String),

    #[error("display service rejected the configuration: {0}")]
    Rejected(String),

    #[error("unknown output {0}")]
    UnknownOutput(String),

    #[error("output {connector} has no mode {mode}")]
    UnknownMode { connector: String, mode: String },

    #[error("scale {scale} is not supported by mode {mode}")]
    UnsupportedScale { mode: String, scale: f64 },

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("not enough controllers to drive {0} outputs independently")]
    InsufficientControllers(usize),
}

impl Error {
    pub(crate) fn malformed(record: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            record,
            reason: reason.into(),
        }
    }
}
