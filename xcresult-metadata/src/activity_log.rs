// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::Record;
use serde::{Deserialize, Serialize};

/// A section of a build or test log. Sections nest arbitrarily.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogSection {
    /// The kind of section, e.g. `com.apple.dt.IDE.BuildLogSection`.
    pub domain_type: Option<String>,

    /// The section's title.
    #[serde(default)]
    pub title: String,

    /// When the section started.
    pub start_time: Option<String>,

    /// How long the section took, in seconds.
    pub duration: Option<f64>,

    /// The section's result, e.g. `succeeded`.
    pub result: Option<String>,

    /// The command line for command invocation sections.
    pub command_details: Option<String>,

    /// The raw text emitted by this section.
    pub emitted_output: Option<String>,

    /// Nested sections.
    #[serde(default)]
    pub subsections: Vec<ActivityLogSection>,

    /// Diagnostics attached to this section.
    #[serde(default)]
    pub messages: Vec<ActivityLogMessage>,
}

impl Record for ActivityLogSection {
    const TYPE_NAME: &'static str = "ActivityLogSection";
}

/// A diagnostic emitted while building.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogMessage {
    /// The severity, e.g. `error`, `warning` or `notice`.
    #[serde(rename = "type", default)]
    pub message_type: String,

    /// The full diagnostic text.
    #[serde(default)]
    pub title: String,

    /// A short version of the diagnostic text.
    pub short_title: Option<String>,

    /// The diagnostic's category.
    pub category: Option<String>,

    /// Where the diagnostic points to.
    pub location: Option<DocumentLocation>,
}

impl ActivityLogMessage {
    /// Returns true if this message is an error.
    pub fn is_error(&self) -> bool {
        self.message_type == "error"
    }
}

/// A location inside a document, encoded as a URL.
///
/// The URL is usually a `file://` URL with a fragment carrying line and column numbers, e.g.
/// `file:///src/App.swift#EndingLineNumber=9&StartingLineNumber=9`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLocation {
    /// The document URL.
    #[serde(default)]
    pub url: String,

    /// The concrete location type, e.g. `DVTTextDocumentLocation`.
    pub concrete_type_name: Option<String>,
}
