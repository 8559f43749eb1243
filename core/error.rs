// Copyright (c) 2022 Huawei Technologies Co.,Ltd. All rights reserved.
//
// sysMaster is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan
// PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//         http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY
// KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO
// NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//! Error define for sysjob.
//!
//! Definition errors are aggregated in a [`MultiError`] and reported by
//! `define`. Operational and scheduling errors are single values. Lifecycle
//! violations (asking a unit for its state before it was defined and the
//! like) are not represented here: they panic with the message of the
//! matching sentinel.
use crate::job::{JobId, JobKind};
use snafu::prelude::*;
#[allow(unused_imports)]
pub use snafu::ResultExt;
use std::fmt;
use std::process::ExitStatus;
use std::sync::Arc;

/// sysjob Error
#[allow(missing_docs)]
#[derive(Debug, Clone, Snafu)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum Error {
    /// mandatory field is empty
    #[snafu(display("not set"))]
    NotSet,

    /// value is recognized but not implemented
    #[snafu(display("not supported"))]
    NotSupported,

    /// the unit has no process to act on
    #[snafu(display("not started"))]
    NotStarted,

    /// the unit definition has not been parsed successfully
    #[snafu(display("not parsed"))]
    NotParsed,

    #[snafu(display("{}: {}", field, source))]
    Field {
        field: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },

    #[snafu(display("{}", errors))]
    Multi { errors: MultiError },

    #[snafu(display("Failed to parse definition: {}", source))]
    Parse { source: unit_parser::Error },

    #[snafu(display("IoError: {}", source))]
    Io {
        #[snafu(source(from(std::io::Error, Arc::new)))]
        source: Arc<std::io::Error>,
    },

    #[snafu(display("NixError: {}", source))]
    Nix { source: nix::Error },

    #[snafu(display("Failed to spawn '{}': {}", cmd, source))]
    Spawn {
        cmd: String,
        #[snafu(source(from(std::io::Error, Arc::new)))]
        source: Arc<std::io::Error>,
    },

    #[snafu(display("'{}' exited with {}", cmd, status))]
    ExitStatus { cmd: String, status: ExitStatus },

    /// the unit can not be redefined while its process runs
    #[snafu(display("'{}' is still running", cmd))]
    StillRunning { cmd: String },

    #[snafu(display("Confique error: {}", msg))]
    Confique { msg: String },

    /// Job errors
    #[snafu(display("Unmergeable job types: {} and {}", existing, incoming))]
    Unmergeable {
        existing: JobKind,
        incoming: JobKind,
    },

    #[snafu(display("dependency failed: {}", dep))]
    DependencyFailed { dep: String },

    #[snafu(display("job {} not found", id))]
    JobNotFound { id: JobId },

    #[snafu(display("job {} is not waiting", id))]
    JobNotWaiting { id: JobId },

    #[snafu(display("jobs {} and {} act on different units", a, b))]
    UnitMismatch { a: JobId, b: JobId },

    #[snafu(display("job {} can not relate to itself", id))]
    SelfRelation { id: JobId },

    #[snafu(display("ordering cycle among jobs: {:?}", ids))]
    OrderingCycle { ids: Vec<JobId> },

    #[snafu(display("job timed out after {}s", sec))]
    Timeout { sec: u64 },
}

/// Result alias of sysjob
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Build a "field: reason" error.
    pub fn field(field: &str, reason: Error) -> Error {
        Error::Field {
            field: field.to_string(),
            source: Box::new(reason),
        }
    }

    /// The innermost reason of a field error, self otherwise.
    pub fn reason(&self) -> &Error {
        match self {
            Error::Field { source, .. } => source.reason(),
            _ => self,
        }
    }

    /// Whether this error, or any aggregated error, names `field`.
    pub fn names_field(&self, name: &str) -> bool {
        match self {
            Error::Field { field, .. } => field == name,
            Error::Multi { errors } => errors.iter().any(|e| e.names_field(name)),
            _ => false,
        }
    }
}

/// A list of errors reported together.
#[derive(Debug, Clone, Default)]
pub struct MultiError(Vec<Error>);

impl MultiError {
    ///
    pub fn new() -> Self {
        MultiError(Vec::new())
    }

    ///
    pub fn push(&mut self, err: Error) {
        self.0.push(err);
    }

    ///
    pub fn len(&self) -> usize {
        self.0.len()
    }

    ///
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    ///
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }

    /// Ok when nothing was collected, the aggregate otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        Err(Error::Multi { errors: self })
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", msgs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_display() {
        let e = Error::field("Type", Error::field("forking", Error::NotSupported));
        assert_eq!(e.to_string(), "Type: forking: not supported");
        assert!(matches!(e.reason(), Error::NotSupported));
        assert!(e.names_field("Type"));
    }

    #[test]
    fn test_multi_error() {
        let mut merr = MultiError::new();
        assert!(merr.clone().into_result().is_ok());

        merr.push(Error::field("ExecStart", Error::NotSet));
        merr.push(Error::field("Type", Error::NotSupported));
        assert_eq!(merr.len(), 2);

        let e = merr.into_result().unwrap_err();
        assert_eq!(e.to_string(), "ExecStart: not set; Type: not supported");
        assert!(e.names_field("ExecStart"));
        assert!(e.names_field("Type"));
        assert!(!e.names_field("ExecStop"));
    }
}
