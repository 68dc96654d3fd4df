// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Turns the test results in an Xcode result bundle into a report.
//!
//! A [`Formatter`](formatter::Formatter) reads records through a
//! [`RecordResolver`](resolver::RecordResolver), flattens test and activity trees, aggregates
//! statistics and returns a [`TestReport`](report::TestReport). Rendering the report is left to
//! the caller: every report type implements `serde::Serialize`.

pub mod activity;
pub mod aggregate;
pub mod build_log;
pub mod errors;
pub mod failure;
pub mod flatten;
pub mod formatter;
pub mod glyphs;
pub mod options;
pub mod report;
pub mod resolver;
#[cfg(test)]
mod test_helpers;
