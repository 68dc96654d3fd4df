// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while generating a test report.

use std::{error, fmt};
use thiserror::Error;
use xcresult_metadata::{DecodeError, Reference};

type BoxedError = Box<dyn error::Error + Send + Sync>;

/// An error that aborts report generation.
///
/// Only records the report cannot be built without cause this error: the root invocation record
/// and records it explicitly references. Optional data such as coverage or attachments never
/// produce a `FormatError`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// A required record could not be resolved.
    #[error("failed to resolve `{type_name}` record")]
    ResolveRecord {
        /// The type of record being resolved.
        type_name: &'static str,

        /// The underlying error.
        #[source]
        err: ResolveError,
    },

    /// A required record was resolved but could not be decoded.
    #[error("error reading result bundle")]
    DecodeRecord(#[from] DecodeError),
}

/// An error returned by a [`RecordResolver`](crate::resolver::RecordResolver).
#[derive(Debug, Error)]
pub struct ResolveError {
    reference: Option<String>,
    #[source]
    err: BoxedError,
}

impl ResolveError {
    /// Creates a new `ResolveError` for `reference`, or for the root record if `reference` is
    /// `None`.
    pub fn new(reference: Option<&Reference>, err: impl Into<BoxedError>) -> Self {
        Self {
            reference: reference.map(|reference| reference.id.clone()),
            err: err.into(),
        }
    }

    /// Creates a new `ResolveError` for the code coverage export.
    pub fn coverage(err: impl Into<BoxedError>) -> Self {
        Self {
            reference: None,
            err: err.into(),
        }
    }

    /// Returns the identifier of the reference that failed to resolve, or `None` for the root
    /// record.
    pub fn reference_id(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.reference {
            Some(id) => write!(f, "failed to resolve reference `{id}`"),
            None => write!(f, "failed to resolve root record"),
        }
    }
}

/// An error returned by an [`AttachmentExporter`](crate::resolver::AttachmentExporter).
///
/// Export errors are isolated to the activity they occurred in.
#[derive(Debug, Error)]
#[error("failed to export attachments for activity `{activity}`")]
pub struct ExportError {
    activity: String,
    #[source]
    err: BoxedError,
}

impl ExportError {
    /// Creates a new `ExportError` for the activity with the given title.
    pub fn new(activity: impl Into<String>, err: impl Into<BoxedError>) -> Self {
        Self {
            activity: activity.into(),
            err: err.into(),
        }
    }
}

/// An error that occurred while parsing [`FormatterOptions`](crate::options::FormatterOptions).
#[derive(Debug, Error)]
#[error("failed to parse formatter options")]
pub struct OptionsParseError {
    #[source]
    err: toml::de::Error,
}

impl OptionsParseError {
    pub(crate) fn new(err: toml::de::Error) -> Self {
        Self { err }
    }
}

/// Displays an error along with its chain of sources, one per line.
pub struct DisplayErrorChain<E>(E);

impl<E: error::Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self(error)
    }
}

impl<E: error::Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, "\n  caused by: {err}")?;
            source = err.source();
        }
        Ok(())
    }
}
