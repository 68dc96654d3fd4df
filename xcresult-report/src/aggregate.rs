// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rolling up flattened test results into per-group, per-chapter and per-report statistics.

use crate::flatten::FlatTestResult;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::time::Duration;
use tracing::debug;
use xcresult_metadata::TestStatus;

/// Counts of tests by status.
///
/// `total` is always the sum of the other four counts. Tests with an unrecognized or missing
/// status are not counted at all.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    passed: usize,
    failed: usize,
    skipped: usize,
    expected_failure: usize,
    total: usize,
}

/// Statistics for a whole chapter: the sum of its group statistics.
pub type ChapterStats = GroupStats;

impl GroupStats {
    /// Counts a single test with the given status.
    ///
    /// Returns false, without counting anything, if the status is unrecognized.
    pub fn record(&mut self, status: &TestStatus) -> bool {
        let counter = match status {
            TestStatus::Success => &mut self.passed,
            TestStatus::Failure => &mut self.failed,
            TestStatus::Skipped => &mut self.skipped,
            TestStatus::ExpectedFailure => &mut self.expected_failure,
            TestStatus::Other(_) => return false,
        };
        *counter += 1;
        self.total += 1;
        true
    }

    /// Adds all counts in `other` to `self`.
    pub fn merge(&mut self, other: &GroupStats) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.expected_failure += other.expected_failure;
        self.total += other.total;
    }

    /// The number of tests that passed.
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// The number of tests that failed.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// The number of tests that were skipped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The number of tests that failed in an expected way.
    pub fn expected_failure(&self) -> usize {
        self.expected_failure
    }

    /// The number of tests counted.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns true if any test failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Statistics for a single group of tests, typically a test class.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    /// Counts of tests in this group.
    pub stats: GroupStats,

    /// The duration of the last test in the group with a non-zero duration.
    #[serde(serialize_with = "serialize_secs")]
    pub duration: Duration,
}

/// Aggregated statistics for a chapter.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    /// Group summaries, keyed by section name and then group name, in first-seen order.
    pub groups: IndexMap<String, IndexMap<String, GroupSummary>>,

    /// The sum of all group statistics.
    pub stats: ChapterStats,

    /// The sum of all group durations.
    #[serde(serialize_with = "serialize_secs")]
    pub duration: Duration,
}

impl ChapterSummary {
    /// Aggregates the tests of a chapter's sections.
    ///
    /// Tests are bucketed by their origin group. Tests without an origin group name are not
    /// counted anywhere.
    pub fn aggregate<'a, I>(sections: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [FlatTestResult])>,
    {
        let mut summary = Self::default();

        for (section_name, tests) in sections {
            let mut groups: IndexMap<String, GroupSummary> = IndexMap::new();
            for test in tests {
                if test.origin_group.is_empty() {
                    continue;
                }
                let group = groups.entry(test.origin_group.clone()).or_default();
                if let Some(status) = &test.status {
                    group.stats.record(status);
                }
                if let Some(duration) = test.duration.filter(|duration| !duration.is_zero()) {
                    group.duration = duration;
                }
            }

            debug!(section = section_name, groups = groups.len(), "aggregated section");

            // Sections sharing a name are combined into a single entry.
            let entry = summary.groups.entry(section_name.to_owned()).or_default();
            for (name, group) in groups {
                let existing = entry.entry(name).or_default();
                existing.stats.merge(&group.stats);
                if !group.duration.is_zero() {
                    existing.duration = group.duration;
                }
            }
        }

        // Totals are the sum of the merged entries in `groups`.
        for group in summary.groups.values().flat_map(IndexMap::values) {
            summary.stats.merge(&group.stats);
            summary.duration += group.duration;
        }

        summary
    }

    /// Returns the duration as seconds with two decimal places, e.g. `1.50s`.
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration)
    }

    /// Returns true if any test in the chapter failed.
    pub fn has_failures(&self) -> bool {
        self.stats.has_failures()
    }
}

/// Statistics summed over every chapter in a report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    /// The sum of all chapter statistics.
    pub stats: GroupStats,

    /// The sum of all chapter durations.
    #[serde(serialize_with = "serialize_secs")]
    pub duration: Duration,
}

impl ReportStats {
    /// Adds a chapter's statistics to the report totals.
    pub fn add_chapter(&mut self, chapter: &ChapterSummary) {
        self.stats.merge(&chapter.stats);
        self.duration += chapter.duration;
    }

    /// Returns the duration as seconds with two decimal places, e.g. `1.50s`.
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration)
    }

    /// Returns true if any test in the report failed.
    pub fn has_failures(&self) -> bool {
        self.stats.has_failures()
    }
}

/// The overall status of a report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// No tests have been seen that determine the status.
    #[default]
    Unknown,

    /// Tests passed and none failed.
    Success,

    /// A test or the build failed.
    Failure,
}

impl ReportStatus {
    /// Returns the status implied by `stats`, or `None` if they don't imply one.
    pub fn from_stats(stats: &GroupStats) -> Option<Self> {
        if stats.failed > 0 {
            Some(ReportStatus::Failure)
        } else if stats.passed > 0 {
            Some(ReportStatus::Success)
        } else {
            None
        }
    }

    /// Moves to `next`, unless the status is already `Failure`.
    pub fn escalate(&mut self, next: ReportStatus) {
        if *self != ReportStatus::Failure {
            *self = next;
        }
    }

    /// Returns true if this is a failure.
    pub fn is_failure(self) -> bool {
        self == ReportStatus::Failure
    }
}

fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

// serde's `serialize_with` signature requires `&Option<T>`.
#[expect(clippy::ref_option)]
pub(crate) fn serialize_opt_secs<S: Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
        None => serializer.serialize_none(),
    }
}
