// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A small result bundle, written in `xcresulttool` typed JSON.

use serde_json::{Map, Value, json};
use std::{collections::HashMap, sync::Once};
use xcresult_metadata::Reference;
use xcresult_report::{errors::ResolveError, resolver::RecordResolver};

pub(crate) fn test_init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Installing twice fails, so this is only done once per process.
        let _ = color_eyre::install();
    });
}

pub(crate) fn string(value: &str) -> Value {
    json!({"_type": {"_name": "String"}, "_value": value})
}

pub(crate) fn int(value: i64) -> Value {
    json!({"_type": {"_name": "Int"}, "_value": value.to_string()})
}

pub(crate) fn double(value: f64) -> Value {
    json!({"_type": {"_name": "Double"}, "_value": value.to_string()})
}

pub(crate) fn array(values: Vec<Value>) -> Value {
    json!({"_type": {"_name": "Array"}, "_values": values})
}

pub(crate) fn object(type_name: &str, fields: Vec<(&str, Value)>) -> Value {
    let mut map = Map::new();
    map.insert("_type".to_owned(), json!({"_name": type_name}));
    for (key, value) in fields {
        map.insert(key.to_owned(), value);
    }
    Value::Object(map)
}

pub(crate) fn reference(id: &str) -> Value {
    object("Reference", vec![("id", string(id))])
}

pub(crate) fn group(name: &str, subtests: Vec<Value>) -> Value {
    object(
        "ActionTestSummaryGroup",
        vec![("name", string(name)), ("subtests", array(subtests))],
    )
}

pub(crate) fn leaf(name: &str, status: &str, duration: f64, summary_ref: Option<&str>) -> Value {
    let mut fields = vec![
        ("name", string(name)),
        ("identifier", string(name)),
        ("testStatus", string(status)),
        ("duration", double(duration)),
    ];
    if let Some(id) = summary_ref {
        fields.push(("summaryRef", reference(id)));
    }
    object("ActionTestMetadata", fields)
}

pub(crate) fn activity(title: &str, subactivities: Vec<Value>) -> Value {
    let mut fields = vec![
        ("title", string(title)),
        (
            "activityType",
            string("com.apple.dt.xctest.activity-type.userCreated"),
        ),
        ("uuid", string(&format!("uuid-{title}"))),
    ];
    if !subactivities.is_empty() {
        fields.push(("subactivities", array(subactivities)));
    }
    object("ActionTestActivitySummary", fields)
}

/// Options for building the bundle.
#[derive(Clone, Debug, Default)]
pub(crate) struct BundleOptions {
    pub(crate) build_errors: Vec<&'static str>,
    pub(crate) coverage: bool,
    pub(crate) include_failure_summary: bool,
}

/// An in-memory result bundle.
#[derive(Debug)]
pub(crate) struct Bundle {
    root: Value,
    records: HashMap<String, Value>,
    coverage: Option<Value>,
}

impl Bundle {
    pub(crate) fn new(options: &BundleOptions) -> Self {
        let mut records = HashMap::new();

        records.insert(
            "metadata".to_owned(),
            object(
                "ActionsInvocationMetadata",
                vec![
                    (
                        "creatingWorkspaceFilePath",
                        string("/work/App/App.xcworkspace"),
                    ),
                    (
                        "schemeIdentifier",
                        object(
                            "EntityIdentifier",
                            vec![
                                ("entityName", string("App")),
                                ("entityType", string("scheme")),
                            ],
                        ),
                    ),
                ],
            ),
        );

        let messages: Vec<Value> = options
            .build_errors
            .iter()
            .map(|title| {
                object(
                    "ActivityLogMessage",
                    vec![
                        ("type", string("error")),
                        ("title", string(title)),
                        (
                            "location",
                            object(
                                "DocumentLocation",
                                vec![(
                                    "url",
                                    string(
                                        "file:///work/App/Sources/App.swift#EndingLineNumber=4&StartingLineNumber=4",
                                    ),
                                )],
                            ),
                        ),
                    ],
                )
            })
            .collect();
        let mut log_fields = vec![("title", string("Build App"))];
        if !messages.is_empty() {
            log_fields.push((
                "subsections",
                array(vec![object(
                    "ActivityLogMajorSection",
                    vec![
                        ("title", string("Compile App.swift")),
                        ("messages", array(messages)),
                    ],
                )]),
            ));
        }
        records.insert("log".to_owned(), object("ActivityLogSection", log_fields));

        records.insert(
            "tests".to_owned(),
            object(
                "ActionTestPlanRunSummaries",
                vec![(
                    "summaries",
                    array(vec![object(
                        "ActionTestPlanRunSummary",
                        vec![
                            ("name", string("Test Scheme Action")),
                            (
                                "testableSummaries",
                                array(vec![
                                    object(
                                        "ActionTestableSummary",
                                        vec![
                                            ("name", string("AppTests")),
                                            ("targetName", string("AppTests")),
                                            (
                                                "tests",
                                                array(vec![group(
                                                    "AppTests.xctest",
                                                    vec![
                                                        group(
                                                            "ClassA",
                                                            vec![
                                                                leaf("testPass()", "Success", 0.25, Some("pass")),
                                                                leaf("testFail()", "Failure", 0.5, Some("fail")),
                                                            ],
                                                        ),
                                                        group(
                                                            "ClassB",
                                                            vec![
                                                                leaf("testSkip()", "Skipped", 0.0, None),
                                                                leaf("testExpected()", "Expected Failure", 1.0, None),
                                                            ],
                                                        ),
                                                    ],
                                                )]),
                                            ),
                                        ],
                                    ),
                                    // Unnamed testables are dropped from the report.
                                    object(
                                        "ActionTestableSummary",
                                        vec![(
                                            "tests",
                                            array(vec![leaf("testOrphan()", "Failure", 0.1, None)]),
                                        )],
                                    ),
                                ]),
                            ),
                        ],
                    )]),
                )],
            ),
        );

        records.insert(
            "pass".to_owned(),
            object(
                "ActionTestSummary",
                vec![
                    ("name", string("testPass()")),
                    ("testStatus", string("Success")),
                    (
                        "activitySummaries",
                        array(vec![activity("Start Test", vec![])]),
                    ),
                ],
            ),
        );

        let mut fail_fields = vec![
            ("name", string("testFail()")),
            ("testStatus", string("Failure")),
            (
                "activitySummaries",
                array(vec![
                    activity(
                        "Start Test",
                        vec![activity(
                            "Set Up",
                            vec![activity("Launch App", vec![])],
                        )],
                    ),
                    activity("Tear Down", vec![]),
                ]),
            ),
        ];
        if options.include_failure_summary {
            fail_fields.push((
                "failureSummaries",
                array(vec![object(
                    "ActionTestFailureSummary",
                    vec![
                        ("message", string("XCTAssertEqual failed: (\"1\") is not equal to (\"2\")")),
                        ("fileName", string("/work/App/AppTests/ClassA.swift")),
                        ("lineNumber", int(12)),
                        ("issueType", string("Assertion Failure")),
                    ],
                )]),
            ));
        }
        records.insert(
            "fail".to_owned(),
            object("ActionTestSummary", fail_fields),
        );

        let mut action_result = vec![("testsRef", reference("tests"))];
        if options.coverage {
            action_result.push((
                "coverage",
                object(
                    "CodeCoverageInfo",
                    vec![("hasCoverageData", json!({"_type": {"_name": "Bool"}, "_value": "true"}))],
                ),
            ));
        }

        let root = object(
            "ActionsInvocationRecord",
            vec![
                ("metadataRef", reference("metadata")),
                (
                    "actions",
                    array(vec![object(
                        "ActionRecord",
                        vec![
                            ("schemeCommandName", string("Test")),
                            ("title", string("Testing project App with scheme App")),
                            (
                                "runDestination",
                                object(
                                    "ActionRunDestinationRecord",
                                    vec![
                                        ("displayName", string("iPhone 15")),
                                        ("targetArchitecture", string("arm64")),
                                    ],
                                ),
                            ),
                            (
                                "buildResult",
                                object("ActionResult", vec![("logRef", reference("log"))]),
                            ),
                            ("actionResult", object("ActionResult", action_result)),
                        ],
                    )]),
                ),
            ],
        );

        // Coverage is exported by xccov as plain JSON.
        let coverage = options.coverage.then(|| {
            json!({
                "coveredLines": 13,
                "executableLines": 16,
                "lineCoverage": 0.8125,
                "targets": [{
                    "name": "App.app",
                    "buildProductPath": "/build/App.app",
                    "coveredLines": 13,
                    "executableLines": 16,
                    "lineCoverage": 0.8125,
                    "files": [],
                }],
            })
        });

        Self {
            root,
            records,
            coverage,
        }
    }

    pub(crate) fn remove_record(&mut self, id: &str) {
        self.records.remove(id);
    }
}

impl RecordResolver for Bundle {
    async fn resolve(&self, reference: Option<&Reference>) -> Result<Value, ResolveError> {
        match reference {
            None => Ok(self.root.clone()),
            Some(reference) => self.records.get(&reference.id).cloned().ok_or_else(|| {
                ResolveError::new(Some(reference), format!("record `{}` not found", reference.id))
            }),
        }
    }

    async fn export_code_coverage(&self) -> Result<Value, ResolveError> {
        self.coverage
            .clone()
            .ok_or_else(|| ResolveError::coverage("bundle has no coverage"))
    }
}
