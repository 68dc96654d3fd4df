// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces to the result bundle reader.
//!
//! Reading the bundle itself (invoking `xcresulttool`, reading files) is left to implementations
//! of these traits. The report generator only ever awaits one call at a time, so implementations
//! don't need to be reentrant.

use crate::errors::{ExportError, ResolveError};
use serde::Serialize;
use std::future::Future;
use xcresult_metadata::{ActionTestActivitySummary, Reference};

/// Resolves references in a result bundle to JSON records.
pub trait RecordResolver {
    /// Resolves `reference` to a record. With `None`, returns the root `ActionsInvocationRecord`.
    ///
    /// The returned value may be plain JSON or `xcresulttool` typed JSON.
    fn resolve(
        &self,
        reference: Option<&Reference>,
    ) -> impl Future<Output = Result<serde_json::Value, ResolveError>> + Send;

    /// Exports the code coverage report for the bundle as JSON.
    fn export_code_coverage(
        &self,
    ) -> impl Future<Output = Result<serde_json::Value, ResolveError>> + Send;
}

/// Exports the attachments of an activity, e.g. writing screenshots to disk.
pub trait AttachmentExporter {
    /// Exports the attachments of `activity`, returning a description of each exported file.
    ///
    /// Only the activity's own attachments are exported, not those of its subactivities.
    fn export_attachments(
        &self,
        activity: &ActionTestActivitySummary,
    ) -> impl Future<Output = Result<Vec<ExportedAttachment>, ExportError>> + Send;
}

/// An attachment exporter that exports nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopExporter;

impl AttachmentExporter for NoopExporter {
    async fn export_attachments(
        &self,
        _activity: &ActionTestActivitySummary,
    ) -> Result<Vec<ExportedAttachment>, ExportError> {
        Ok(Vec::new())
    }
}

/// An attachment that has been exported from the bundle.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedAttachment {
    /// The attachment's display name.
    pub name: String,

    /// The uniform type identifier, e.g. `public.png`.
    pub uniform_type_identifier: String,

    /// Where the attachment was exported to.
    pub path: String,
}
