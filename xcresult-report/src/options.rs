// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Options controlling what goes into a report.

use crate::{
    errors::OptionsParseError,
    formatter::Formatter,
    resolver::{AttachmentExporter, RecordResolver},
};
use serde::Deserialize;

/// Options for a [`Formatter`].
///
/// Can be read from a TOML fragment:
///
/// ```toml
/// show-passed-tests = false
/// show-code-coverage = true
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct FormatterOptions {
    /// Whether to load details (activities and failures) for tests that didn't fail.
    pub show_passed_tests: bool,

    /// Whether to export code coverage into the report.
    pub show_code_coverage: bool,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            show_passed_tests: true,
            show_code_coverage: true,
        }
    }
}

impl FormatterOptions {
    /// Parses options from a TOML string. Missing keys take their default values.
    pub fn from_toml_str(input: &str) -> Result<Self, OptionsParseError> {
        toml::from_str(input).map_err(OptionsParseError::new)
    }
}

/// Builder for a [`Formatter`].
#[derive(Debug, Default)]
pub struct FormatterBuilder {
    options: FormatterOptions,
}

impl FormatterBuilder {
    /// Starts from existing options.
    pub fn from_options(options: FormatterOptions) -> Self {
        Self { options }
    }

    /// Sets whether details are loaded for tests that didn't fail.
    pub fn set_show_passed_tests(&mut self, show: bool) -> &mut Self {
        self.options.show_passed_tests = show;
        self
    }

    /// Sets whether code coverage is exported.
    pub fn set_show_code_coverage(&mut self, show: bool) -> &mut Self {
        self.options.show_code_coverage = show;
        self
    }

    /// Creates a new formatter reading from `resolver` and exporting attachments with `exporter`.
    pub fn build<R, E>(&self, resolver: R, exporter: E) -> Formatter<R, E>
    where
        R: RecordResolver,
        E: AttachmentExporter,
    {
        Formatter::new(resolver, exporter, self.options)
    }
}
