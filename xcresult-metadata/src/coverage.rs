// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::Record;
use serde::{Deserialize, Serialize};

/// A code coverage report, as exported by `xccov view --report --json`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeCoverage {
    /// The number of covered lines across all targets.
    pub covered_lines: u64,

    /// The number of executable lines across all targets.
    pub executable_lines: u64,

    /// The ratio of covered to executable lines, between 0 and 1.
    pub line_coverage: f64,

    /// Per-target coverage.
    #[serde(default)]
    pub targets: Vec<TargetCoverage>,
}

impl Record for CodeCoverage {
    const TYPE_NAME: &'static str = "CodeCoverage";
}

/// Coverage for a single build target.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetCoverage {
    /// The target name.
    pub name: String,

    /// The path to the built product.
    #[serde(default)]
    pub build_product_path: String,

    /// The number of covered lines.
    pub covered_lines: u64,

    /// The number of executable lines.
    pub executable_lines: u64,

    /// The ratio of covered to executable lines.
    pub line_coverage: f64,

    /// Per-file coverage.
    #[serde(default)]
    pub files: Vec<FileCoverage>,
}

/// Coverage for a single source file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCoverage {
    /// The file name.
    pub name: String,

    /// The full path of the file.
    pub path: String,

    /// The number of covered lines.
    pub covered_lines: u64,

    /// The number of executable lines.
    pub executable_lines: u64,

    /// The ratio of covered to executable lines.
    pub line_coverage: f64,

    /// Per-function coverage.
    #[serde(default)]
    pub functions: Vec<FunctionCoverage>,
}

/// Coverage for a single function.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCoverage {
    /// The function name.
    pub name: String,

    /// The line the function starts at.
    pub line_number: u64,

    /// How many times the function was called.
    pub execution_count: u64,

    /// The number of covered lines.
    pub covered_lines: u64,

    /// The number of executable lines.
    pub executable_lines: u64,

    /// The ratio of covered to executable lines.
    pub line_coverage: f64,
}
