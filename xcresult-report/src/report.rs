// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The report model handed to renderers.

use crate::{
    activity::FlatActivity,
    aggregate::{ChapterSummary, ReportStats, ReportStatus},
    build_log::{Annotation, BuildLog},
    failure::FailureSummary,
    flatten::FlatTestResult,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use xcresult_metadata::{ActionRunDestinationRecord, CodeCoverage, TestStatus};

/// The root of a test report.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    /// The name of the scheme that was run.
    pub entity_name: Option<String>,

    /// The workspace or project the bundle was created from.
    pub creating_workspace_file_path: Option<String>,

    /// The overall status.
    pub test_status: ReportStatus,

    /// Build errors, if the build had any.
    pub build_log: Option<BuildLog>,

    /// Annotations to show alongside source code.
    pub annotations: Vec<Annotation>,

    /// One chapter per test action.
    pub chapters: Vec<TestReportChapter>,

    /// Code coverage, if it was exported.
    pub code_coverage: Option<TestCodeCoverage>,

    /// Statistics summed over all chapters.
    pub stats: ReportStats,
}

impl TestReport {
    /// Creates a new, empty report with an unknown status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the errors from a build log.
    ///
    /// If the log has no errors, the report is left unchanged. Otherwise the report fails, and the
    /// log's annotations are appended in order.
    pub fn set_build_log(&mut self, build_log: BuildLog) -> &mut Self {
        if build_log.is_empty() {
            return self;
        }
        self.test_status = ReportStatus::Failure;
        self.annotations.extend(build_log.annotations.iter().cloned());
        self.build_log = Some(build_log);
        self
    }

    /// Sets the code coverage for the report.
    pub fn set_code_coverage(&mut self, coverage: TestCodeCoverage) -> &mut Self {
        self.code_coverage = Some(coverage);
        self
    }

    /// Summarizes `chapter`, adds it to the report and updates statistics and status.
    pub fn add_chapter(&mut self, mut chapter: TestReportChapter) -> &mut Self {
        let summary = chapter.summarize();
        self.stats.add_chapter(&summary);
        chapter.summaries.push(summary);
        self.chapters.push(chapter);
        self.update_status();
        self
    }

    /// Updates the status from the accumulated statistics.
    ///
    /// A failure is never replaced, and statistics without passes or failures leave the status
    /// as it was.
    pub fn update_status(&mut self) -> &mut Self {
        if let Some(next) = ReportStatus::from_stats(&self.stats.stats) {
            self.test_status.escalate(next);
        }
        self
    }
}

/// The tests run by a single action against a single destination.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReportChapter {
    /// The scheme command, e.g. `Test`.
    pub scheme_command_name: String,

    /// Where the tests ran.
    pub run_destination: ActionRunDestinationRecord,

    /// The action's title.
    pub title: Option<String>,

    /// Sections keyed by testable name, in the order they were added.
    pub sections: IndexMap<String, TestReportSection>,

    /// Summaries of this chapter's statistics.
    pub summaries: Vec<ChapterSummary>,
}

impl TestReportChapter {
    /// Creates a new chapter with no sections.
    pub fn new(
        scheme_command_name: impl Into<String>,
        run_destination: ActionRunDestinationRecord,
        title: Option<String>,
    ) -> Self {
        Self {
            scheme_command_name: scheme_command_name.into(),
            run_destination,
            title,
            sections: IndexMap::new(),
            summaries: Vec::new(),
        }
    }

    /// Adds a section, replacing any existing section with the same name.
    pub fn add_section(&mut self, section: TestReportSection) -> &mut Self {
        self.sections.insert(section.name.clone(), section);
        self
    }

    /// Aggregates the statistics of every section in this chapter.
    pub fn summarize(&self) -> ChapterSummary {
        let summary = ChapterSummary::aggregate(
            self.sections
                .iter()
                .map(|(name, section)| (name.as_str(), section.tests.as_slice())),
        );
        debug!(
            chapter = %self.scheme_command_name,
            total = summary.stats.total(),
            failed = summary.stats.failed(),
            "summarized chapter"
        );
        summary
    }
}

/// The tests of a single testable target.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReportSection {
    /// The testable's name.
    pub name: String,

    /// The name of the target the tests were built from.
    pub target_name: Option<String>,

    /// Every test in the testable, in pre-order.
    pub tests: Vec<FlatTestResult>,

    /// Details for the tests that had them loaded.
    pub details: Vec<TestDetail>,
}

impl TestReportSection {
    /// Creates a new section with the given tests and no details.
    pub fn new(name: impl Into<String>, tests: Vec<FlatTestResult>) -> Self {
        Self {
            name: name.into(),
            target_name: None,
            tests,
            details: Vec::new(),
        }
    }

    /// Sets the target name.
    pub fn set_target_name(&mut self, target_name: impl Into<String>) -> &mut Self {
        self.target_name = Some(target_name.into());
        self
    }
}

/// The activities and failures of a single test.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDetail {
    /// The test's name.
    pub name: String,

    /// The test's identifier.
    pub identifier: Option<String>,

    /// The group the test was found in.
    pub origin_group: String,

    /// The test's status.
    pub status: Option<TestStatus>,

    /// The time taken by the test.
    #[serde(serialize_with = "crate::aggregate::serialize_opt_secs")]
    pub duration: Option<Duration>,

    /// Failures, ready for display.
    pub failures: Vec<FailureSummary>,

    /// Activities, flattened in pre-order.
    pub activities: Vec<FlatActivity>,
}

/// Code coverage attached to a report.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct TestCodeCoverage {
    coverage: CodeCoverage,
}

impl TestCodeCoverage {
    /// Wraps a decoded coverage report.
    pub fn new(coverage: CodeCoverage) -> Self {
        Self { coverage }
    }

    /// Returns the underlying coverage report.
    pub fn coverage(&self) -> &CodeCoverage {
        &self.coverage
    }

    /// Returns the overall line coverage as a percentage with two decimal places, e.g. `81.25%`.
    pub fn formatted_line_coverage(&self) -> String {
        format!("{:.2}%", self.coverage.line_coverage * 100.0)
    }
}
