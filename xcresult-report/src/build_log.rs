// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of build errors from the build activity log.

use camino::Utf8Path;
use serde::Serialize;
use std::slice;
use xcresult_metadata::{ActivityLogMessage, ActivityLogSection};

/// Errors extracted from a build log.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildLog {
    /// One line of text per build error.
    pub content: Vec<String>,

    /// One annotation per build error, in the same order as `content`.
    pub annotations: Vec<Annotation>,
}

impl BuildLog {
    /// Collects the errors in `section` and all of its subsections, in pre-order.
    ///
    /// Paths are made relative to the directory containing `workspace_path`, if it is given and
    /// the path is inside that directory.
    pub fn new(section: &ActivityLogSection, workspace_path: Option<&str>) -> Self {
        let workspace_dir = workspace_path.and_then(|path| Utf8Path::new(path).parent());
        let mut log = Self::default();

        let mut stack: Vec<slice::Iter<'_, ActivityLogSection>> =
            vec![slice::from_ref(section).iter()];
        while let Some(sections) = stack.last_mut() {
            let Some(section) = sections.next() else {
                stack.pop();
                continue;
            };
            for message in section.messages.iter().filter(|message| message.is_error()) {
                log.add_error(message, workspace_dir);
            }
            if !section.subsections.is_empty() {
                stack.push(section.subsections.iter());
            }
        }

        log
    }

    /// Returns true if no errors were found.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn add_error(&mut self, message: &ActivityLogMessage, workspace_dir: Option<&Utf8Path>) {
        let location = message
            .location
            .as_ref()
            .and_then(|location| SourceRange::parse(&location.url, workspace_dir));

        match &location {
            Some(range) => self.content.push(format!(
                "{}:{}:{}: error: {}",
                range.path,
                range.start_line,
                range.start_column.unwrap_or(1),
                message.title,
            )),
            None => self.content.push(format!("error: {}", message.title)),
        }

        let range = location.unwrap_or_default();
        self.annotations.push(Annotation {
            path: range.path,
            start_line: range.start_line,
            end_line: range.end_line,
            start_column: range.start_column,
            end_column: range.end_column,
            annotation_level: AnnotationLevel::Failure,
            title: message
                .category
                .clone()
                .unwrap_or_else(|| "Build error".to_owned()),
            message: message.title.clone(),
        });
    }
}

/// A diagnostic pinned to a source range, for display next to the code.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// The file, relative to the workspace directory where possible.
    pub path: String,

    /// The first line, 1-based.
    pub start_line: u64,

    /// The last line, 1-based.
    pub end_line: u64,

    /// The first column, 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u64>,

    /// The last column, 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u64>,

    /// The severity.
    pub annotation_level: AnnotationLevel,

    /// A short title.
    pub title: String,

    /// The diagnostic text.
    pub message: String,
}

/// The severity of an [`Annotation`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    /// Informational.
    Notice,

    /// Something that may be a problem.
    Warning,

    /// Something that caused the build or test run to fail.
    Failure,
}

#[derive(Debug, Default, Eq, PartialEq)]
struct SourceRange {
    path: String,
    start_line: u64,
    end_line: u64,
    start_column: Option<u64>,
    end_column: Option<u64>,
}

impl SourceRange {
    /// Parses a document location URL such as
    /// `file:///src/App.swift#EndingLineNumber=9&StartingLineNumber=9`.
    ///
    /// Line and column numbers in the fragment are 0-based.
    fn parse(url: &str, workspace_dir: Option<&Utf8Path>) -> Option<Self> {
        let (path, fragment) = url.split_once('#').unwrap_or((url, ""));
        let path = path.strip_prefix("file://").unwrap_or(path);
        if path.is_empty() {
            return None;
        }

        let mut range = SourceRange {
            path: relative_path(Utf8Path::new(path), workspace_dir),
            ..SourceRange::default()
        };
        let mut end_line = None;
        for (key, value) in fragment.split('&').filter_map(|pair| pair.split_once('=')) {
            let Ok(value) = value.parse::<u64>() else {
                continue;
            };
            match key {
                "StartingLineNumber" => range.start_line = value.saturating_add(1),
                "EndingLineNumber" => end_line = Some(value.saturating_add(1)),
                "StartingColumnNumber" => range.start_column = Some(value.saturating_add(1)),
                "EndingColumnNumber" => range.end_column = Some(value.saturating_add(1)),
                _ => {}
            }
        }
        if range.start_line == 0 {
            range.start_line = 1;
        }
        range.end_line = end_line.unwrap_or(range.start_line).max(range.start_line);

        Some(range)
    }
}

fn relative_path(path: &Utf8Path, workspace_dir: Option<&Utf8Path>) -> String {
    match workspace_dir {
        Some(dir) if path.starts_with(dir) => pathdiff::diff_utf8_paths(path, dir)
            .map_or_else(|| path.to_string(), |relative| relative.into_string()),
        _ => path.to_string(),
    }
}
