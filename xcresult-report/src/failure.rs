// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display-ready summaries of test failures.

use serde::Serialize;
use swrite::{SWrite, swrite};
use xcresult_metadata::{ActionTestFailureSummary, SourceCodeFrame};

const TITLE_ATTRS: &str = r#"align="right" width="100px""#;
const DETAIL_ATTRS: &str = r#"width="668px""#;

/// A test failure, resolved to a file location and formatted for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureSummary {
    /// The file the failure points to. Empty if unknown.
    pub file_path: String,

    /// The line the failure points to.
    pub line_number: Option<i64>,

    /// The kind of issue, e.g. `Assertion Failure`.
    pub issue_type: String,

    /// The failure message.
    pub message: String,

    /// An HTML table with the file location, issue type and message.
    pub contents: String,

    /// The formatted call stack, one frame per entry. Empty if there is no call stack.
    pub stack_trace: Vec<String>,
}

impl FailureSummary {
    /// Builds a summary from a raw failure record.
    pub fn new(failure: &ActionTestFailureSummary) -> Self {
        let context = failure.source_code_context.as_ref();
        let location = context.and_then(|context| context.location.as_ref());

        let file_path = location
            .and_then(|location| location.file_path.as_deref())
            .filter(|path| !path.is_empty())
            .or(failure.file_name.as_deref())
            .unwrap_or_default()
            .to_owned();
        let line_number = location
            .and_then(|location| location.line_number)
            .or(failure.line_number);

        let file_location = match (file_path.as_str(), line_number) {
            ("", _) => String::new(),
            (path, Some(line)) => format!("{path}:{line}"),
            (path, None) => path.to_owned(),
        };

        let issue_type = failure.issue_type.clone().unwrap_or_default();
        let message = failure.message.clone().unwrap_or_default();

        let mut contents = String::from("<table>");
        swrite!(
            contents,
            "<tr><td {TITLE_ATTRS}><b>File</b><td {DETAIL_ATTRS}>{file_location}"
        );
        swrite!(
            contents,
            "<tr><td {TITLE_ATTRS}><b>Issue Type</b><td {DETAIL_ATTRS}>{issue_type}"
        );
        swrite!(
            contents,
            "<tr><td {TITLE_ATTRS}><b>Message</b><td {DETAIL_ATTRS}>{message}"
        );
        contents.push_str("</table>\n");

        let fallback_path = failure.file_name.as_deref().unwrap_or_default();
        let stack_trace = context
            .map(|context| {
                context
                    .call_stack
                    .iter()
                    .enumerate()
                    .map(|(index, frame)| format_frame(index, frame, fallback_path))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            file_path,
            line_number,
            issue_type,
            message,
            contents,
            stack_trace,
        }
    }
}

/// Builds one [`FailureSummary`] per raw failure, in order.
pub fn collect_failure_summaries(failures: &[ActionTestFailureSummary]) -> Vec<FailureSummary> {
    failures.iter().map(FailureSummary::new).collect()
}

fn format_frame(index: usize, frame: &SourceCodeFrame, fallback_path: &str) -> String {
    let symbol_info = frame.symbol_info.as_ref();
    let image_name = symbol_info
        .and_then(|info| info.image_name.as_deref())
        .unwrap_or_default();
    let symbol_name = symbol_info
        .and_then(|info| info.symbol_name.as_deref())
        .unwrap_or_default();
    let address = frame.address_string.as_deref().unwrap_or_default();

    let location = symbol_info.and_then(|info| info.location.as_ref());
    let file_path = location
        .and_then(|location| location.file_path.as_deref())
        .filter(|path| !path.is_empty())
        .unwrap_or(fallback_path);
    let line_number = location
        .and_then(|location| location.line_number)
        .map(|line| line.to_string())
        .unwrap_or_default();

    format!("{index:<2} {image_name} {address} {symbol_name} {file_path}: {line_number}")
}
