// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symbols shown next to test statuses.

use xcresult_metadata::TestStatus;

/// The symbols a renderer shows next to each test status.
///
/// A `StatusGlyphs` is an ordinary value: renderers are handed one and look statuses up in it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusGlyphs {
    /// Shown for passing tests.
    pub success: String,

    /// Shown for failing tests.
    pub failure: String,

    /// Shown for skipped tests.
    pub skipped: String,

    /// Shown for expected failures.
    pub expected_failure: String,

    /// Shown for tests with an unrecognized or missing status.
    pub unknown: String,
}

impl Default for StatusGlyphs {
    fn default() -> Self {
        Self {
            success: "PASS".to_owned(),
            failure: "FAIL".to_owned(),
            skipped: "SKIP".to_owned(),
            expected_failure: "XFAIL".to_owned(),
            unknown: "?".to_owned(),
        }
    }
}

impl StatusGlyphs {
    /// Returns the glyph for `status`.
    pub fn get(&self, status: Option<&TestStatus>) -> &str {
        match status {
            Some(TestStatus::Success) => &self.success,
            Some(TestStatus::Failure) => &self.failure,
            Some(TestStatus::Skipped) => &self.skipped,
            Some(TestStatus::ExpectedFailure) => &self.expected_failure,
            Some(TestStatus::Other(_)) | None => &self.unknown,
        }
    }
}
