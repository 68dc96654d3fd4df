// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{Record, Reference};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The summaries of all test plan runs for an action.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTestPlanRunSummaries {
    /// One summary per test plan configuration.
    #[serde(default)]
    pub summaries: Vec<ActionTestPlanRunSummary>,
}

impl Record for ActionTestPlanRunSummaries {
    const TYPE_NAME: &'static str = "ActionTestPlanRunSummaries";
}

/// The results of running a test plan under one configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTestPlanRunSummary {
    /// The configuration name.
    pub name: Option<String>,

    /// One summary per testable target.
    #[serde(default)]
    pub testable_summaries: Vec<ActionTestableSummary>,
}

/// The results for one testable target.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTestableSummary {
    /// The testable's name, usually the test bundle name.
    pub name: Option<String>,

    /// The project-relative path of the testable.
    pub project_relative_path: Option<String>,

    /// The target name of the testable.
    pub target_name: Option<String>,

    /// The kind of tests, e.g. `app hosted`.
    pub test_kind: Option<String>,

    /// The top-level test nodes of this testable.
    #[serde(default)]
    pub tests: Vec<TestNode>,
}

/// A node in a test result tree: either a group of tests or a single test.
///
/// The variant is decided once, when the node is decoded: an object with a `subtests` key is a
/// [`Group`](Self::Group), anything else is a [`Leaf`](Self::Leaf).
#[derive(Clone, Debug)]
pub enum TestNode {
    /// A test class, suite or bundle containing further nodes.
    Group(ActionTestSummaryGroup),

    /// An individual test case.
    Leaf(ActionTestMetadata),
}

impl TestNode {
    /// Returns the name of this node.
    pub fn name(&self) -> Option<&str> {
        match self {
            TestNode::Group(group) => group.name.as_deref(),
            TestNode::Leaf(leaf) => leaf.name.as_deref(),
        }
    }
}

impl<'de> Deserialize<'de> for TestNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawTestNode::deserialize(deserializer).map(TestNode::from)
    }
}

/// The union of group and leaf fields, decoded in a single pass.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTestNode {
    name: Option<String>,
    identifier: Option<String>,
    test_status: Option<TestStatus>,
    duration: Option<f64>,
    summary_ref: Option<Reference>,
    #[serde(default)]
    failure_summaries: Vec<ActionTestFailureSummary>,
    subtests: Option<Vec<TestNode>>,
}

impl From<RawTestNode> for TestNode {
    fn from(raw: RawTestNode) -> Self {
        match raw.subtests {
            Some(subtests) => TestNode::Group(ActionTestSummaryGroup {
                name: raw.name,
                identifier: raw.identifier,
                duration: raw.duration,
                subtests,
            }),
            None => TestNode::Leaf(ActionTestMetadata {
                name: raw.name,
                identifier: raw.identifier,
                test_status: raw.test_status,
                duration: raw.duration,
                summary_ref: raw.summary_ref,
                failure_summaries: raw.failure_summaries,
            }),
        }
    }
}

/// A group of tests, such as a test class.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTestSummaryGroup {
    /// The group's name.
    pub name: Option<String>,

    /// The group's identifier.
    pub identifier: Option<String>,

    /// The time taken by the whole group, in seconds.
    pub duration: Option<f64>,

    /// The nodes contained in this group.
    #[serde(default)]
    pub subtests: Vec<TestNode>,
}

impl ActionTestSummaryGroup {
    /// Creates a new named group containing `subtests`.
    pub fn new(name: impl Into<String>, subtests: Vec<TestNode>) -> Self {
        Self {
            name: Some(name.into()),
            identifier: None,
            duration: None,
            subtests,
        }
    }
}

/// Summary information about an individual test, as stored in a test tree.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTestMetadata {
    /// The test's name, e.g. `testExample()`.
    pub name: Option<String>,

    /// The test's identifier, e.g. `ClassA/testExample()`.
    pub identifier: Option<String>,

    /// The test's status, if recorded.
    pub test_status: Option<TestStatus>,

    /// The time taken by the test, in seconds.
    pub duration: Option<f64>,

    /// Reference to the full [`ActionTestSummary`] for this test.
    pub summary_ref: Option<Reference>,

    /// Failure summaries attached directly to the node.
    #[serde(default)]
    pub failure_summaries: Vec<ActionTestFailureSummary>,
}

impl ActionTestMetadata {
    /// Creates a new test with the given name and status.
    pub fn new(name: impl Into<String>, test_status: TestStatus) -> Self {
        Self {
            name: Some(name.into()),
            test_status: Some(test_status),
            ..Self::default()
        }
    }

    /// Sets the duration in seconds.
    pub fn set_duration(&mut self, duration: f64) -> &mut Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the reference to the full test summary.
    pub fn set_summary_ref(&mut self, summary_ref: Reference) -> &mut Self {
        self.summary_ref = Some(summary_ref);
        self
    }
}

/// The full record for a single test, including activities and failures.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTestSummary {
    /// The test's name.
    pub name: Option<String>,

    /// The test's identifier.
    pub identifier: Option<String>,

    /// The test's status.
    pub test_status: Option<TestStatus>,

    /// The time taken by the test, in seconds.
    pub duration: Option<f64>,

    /// The top-level activities performed by the test.
    #[serde(default)]
    pub activity_summaries: Vec<ActionTestActivitySummary>,

    /// The failures recorded by the test.
    #[serde(default)]
    pub failure_summaries: Vec<ActionTestFailureSummary>,
}

impl Record for ActionTestSummary {
    const TYPE_NAME: &'static str = "ActionTestSummary";
}

/// A step performed while running a test, possibly containing sub-steps.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTestActivitySummary {
    /// The activity's title.
    #[serde(default)]
    pub title: String,

    /// The activity's type, e.g. `com.apple.dt.xctest.activity-type.userCreated`.
    #[serde(default)]
    pub activity_type: String,

    /// The activity's unique identifier.
    #[serde(default)]
    pub uuid: String,

    /// When the activity started.
    pub start: Option<String>,

    /// When the activity finished.
    pub finish: Option<String>,

    /// Attachments recorded by this activity.
    #[serde(default)]
    pub attachments: Vec<ActionTestAttachment>,

    /// Nested activities.
    #[serde(default)]
    pub subactivities: Vec<ActionTestActivitySummary>,

    /// Identifiers of failures reported during this activity.
    #[serde(default, rename = "failureSummaryIDs")]
    pub failure_summary_ids: Vec<String>,
}

impl ActionTestActivitySummary {
    /// Creates a new activity with the given title and subactivities.
    pub fn new(title: impl Into<String>, subactivities: Vec<ActionTestActivitySummary>) -> Self {
        Self {
            title: title.into(),
            subactivities,
            ..Self::default()
        }
    }
}

/// A file attached to an activity, such as a screenshot.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTestAttachment {
    /// The uniform type identifier, e.g. `public.png`.
    #[serde(default)]
    pub uniform_type_identifier: String,

    /// The attachment's name.
    pub name: Option<String>,

    /// When the attachment was recorded.
    pub timestamp: Option<String>,

    /// The attachment's lifetime, e.g. `keepAlways`.
    pub lifetime: Option<String>,

    /// The file name of the attachment's payload.
    pub filename: Option<String>,

    /// Reference to the payload stored in the result bundle.
    pub payload_ref: Option<Reference>,

    /// The payload size in bytes.
    pub payload_size: Option<u64>,
}

/// A failure recorded by a test.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTestFailureSummary {
    /// The failure message.
    pub message: Option<String>,

    /// The file in which the failure was recorded.
    pub file_name: Option<String>,

    /// The line at which the failure was recorded.
    pub line_number: Option<i64>,

    /// Whether this is a performance test failure.
    #[serde(default)]
    pub is_performance_failure: bool,

    /// The failure's unique identifier.
    pub uuid: Option<String>,

    /// The kind of issue, e.g. `Assertion Failure`.
    pub issue_type: Option<String>,

    /// A longer description of the failure.
    pub detailed_description: Option<String>,

    /// Where in source code the failure happened, with a call stack.
    pub source_code_context: Option<SourceCodeContext>,

    /// When the failure was recorded.
    pub timestamp: Option<String>,
}

/// Source location and call stack for a failure.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCodeContext {
    /// The location of the failure.
    pub location: Option<SourceCodeLocation>,

    /// The call stack at the time of the failure.
    #[serde(default)]
    pub call_stack: Vec<SourceCodeFrame>,
}

/// A location in a source file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCodeLocation {
    /// The file path.
    pub file_path: Option<String>,

    /// The line number.
    pub line_number: Option<i64>,
}

/// A single frame of a call stack.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCodeFrame {
    /// The frame's address, e.g. `0x10c3a1b2f`.
    pub address_string: Option<String>,

    /// Symbolication information for the frame.
    pub symbol_info: Option<SourceCodeSymbolInfo>,
}

/// Symbolication information for a call stack frame.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCodeSymbolInfo {
    /// The binary image containing the frame.
    pub image_name: Option<String>,

    /// The symbol name.
    pub symbol_name: Option<String>,

    /// The source location of the frame.
    pub location: Option<SourceCodeLocation>,
}

/// The outcome of a single test.
///
/// The four known statuses are modeled as variants; any other value is preserved in
/// [`Other`](Self::Other).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TestStatus {
    /// The test passed.
    Success,

    /// The test failed.
    Failure,

    /// The test was skipped.
    Skipped,

    /// The test failed in a way that was declared as expected.
    ExpectedFailure,

    /// An unrecognized status.
    Other(String),
}

impl TestStatus {
    /// Returns the status as it is spelled in result bundles.
    pub fn as_str(&self) -> &str {
        match self {
            TestStatus::Success => "Success",
            TestStatus::Failure => "Failure",
            TestStatus::Skipped => "Skipped",
            TestStatus::ExpectedFailure => "Expected Failure",
            TestStatus::Other(other) => other,
        }
    }

    /// Returns true if this is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Failure)
    }
}

impl From<&str> for TestStatus {
    fn from(s: &str) -> Self {
        match s {
            "Success" => TestStatus::Success,
            "Failure" => TestStatus::Failure,
            "Skipped" => TestStatus::Skipped,
            "Expected Failure" => TestStatus::ExpectedFailure,
            other => TestStatus::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TestStatus::from(s.as_str()))
    }
}
