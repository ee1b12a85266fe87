// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the store and the input parsers.
///
/// Nothing here is retried: the caller reports the error and the record
/// in question stays as it was.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any statement was issued.
    #[error("invalid input: {0}")]
    Validation(String),
    /// No session user is set.
    #[error("not logged in (run `dompet session login <user>`)")]
    Unauthorized,
    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
    /// A stored value that no longer parses.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
