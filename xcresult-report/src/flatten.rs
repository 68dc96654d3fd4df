// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flattening of test result trees.

use serde::Serialize;
use std::{slice, time::Duration};
use xcresult_metadata::{
    ActionTestFailureSummary, ActionTestMetadata, Reference, TestNode, TestStatus,
};

/// A single test, copied out of a test tree and tagged with the group it was found in.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatTestResult {
    /// The name of the test.
    pub name: String,

    /// The test's identifier, if recorded.
    pub identifier: Option<String>,

    /// The name of the test's immediate parent group. Empty if the group had no name.
    pub origin_group: String,

    /// The test's status. `None` if the tree didn't record one.
    pub status: Option<TestStatus>,

    /// The time taken by the test.
    #[serde(serialize_with = "crate::aggregate::serialize_opt_secs")]
    pub duration: Option<Duration>,

    /// Reference to the full test summary.
    #[serde(skip)]
    pub summary_ref: Option<Reference>,

    /// Failures recorded directly on the tree node.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failure_summaries: Vec<ActionTestFailureSummary>,
}

impl FlatTestResult {
    fn new(origin_group: &str, leaf: &ActionTestMetadata) -> Self {
        Self {
            name: leaf.name.clone().unwrap_or_default(),
            identifier: leaf.identifier.clone(),
            origin_group: origin_group.to_owned(),
            status: leaf.test_status.clone(),
            // Negative, NaN and overflowing durations are treated as absent.
            duration: leaf
                .duration
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
            summary_ref: leaf.summary_ref.clone(),
            failure_summaries: leaf.failure_summaries.clone(),
        }
    }
}

/// Flattens the tests under a group into `out`.
///
/// Leaves are appended in pre-order, each tagged with the name of its immediate parent group:
/// `group_name` for the direct children of `tests`, and the nested group's own name below that.
/// Trees of any depth are supported.
pub fn collect_test_summaries(group_name: &str, tests: &[TestNode], out: &mut Vec<FlatTestResult>) {
    // Each entry is a group that is partway through being visited.
    let mut stack: Vec<(&str, slice::Iter<'_, TestNode>)> = vec![(group_name, tests.iter())];

    while let Some((current_group, children)) = stack.last_mut() {
        let current_group = *current_group;
        match children.next() {
            Some(TestNode::Group(group)) => {
                let name = group.name.as_deref().unwrap_or_default();
                stack.push((name, group.subtests.iter()));
            }
            Some(TestNode::Leaf(leaf)) => {
                out.push(FlatTestResult::new(current_group, leaf));
            }
            None => {
                stack.pop();
            }
        }
    }
}
