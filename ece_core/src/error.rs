//! Errors of the event pipeline.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// No fallback produced a point in time.
    #[error("unable to resolve a point in time from date {date:?} and time {time:?}")]
    Unresolvable { date: String, time: String },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
