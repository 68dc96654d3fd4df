// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Arbitrary implementations for test trees and activity trees.

use crate::{
    ActionTestActivitySummary, ActionTestMetadata, ActionTestSummaryGroup, TestNode, TestStatus,
};
use proptest::{collection::vec, option, prelude::*};

impl Arbitrary for TestStatus {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            3 => Just(TestStatus::Success),
            2 => Just(TestStatus::Failure),
            1 => Just(TestStatus::Skipped),
            1 => Just(TestStatus::ExpectedFailure),
            1 => "[A-Z][a-z]{2,8}".prop_map(|s| TestStatus::from(s.as_str())),
        ]
        .boxed()
    }
}

impl Arbitrary for TestNode {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let leaf = (
            "[a-z]{1,8}",
            option::of(any::<TestStatus>()),
            option::of(0.0f64..10.0),
        )
            .prop_map(|(name, test_status, duration)| {
                TestNode::Leaf(ActionTestMetadata {
                    name: Some(format!("{name}()")),
                    test_status,
                    duration,
                    ..ActionTestMetadata::default()
                })
            });

        leaf.prop_recursive(6, 64, 6, |inner| {
            ("[A-Z][a-zA-Z]{0,8}", vec(inner, 0..6)).prop_map(|(name, subtests)| {
                TestNode::Group(ActionTestSummaryGroup::new(name, subtests))
            })
        })
        .boxed()
    }
}

impl Arbitrary for ActionTestActivitySummary {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let leaf = "[a-z ]{1,12}".prop_map(|title| ActionTestActivitySummary::new(title, vec![]));

        leaf.prop_recursive(6, 64, 4, |inner| {
            ("[a-z ]{1,12}", vec(inner, 0..4)).prop_map(|(title, subactivities)| {
                ActionTestActivitySummary::new(title, subactivities)
            })
        })
        .boxed()
    }
}
