// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use color_eyre::eyre::{Result, bail, ensure};
use pretty_assertions::assert_eq;
use std::time::Duration;
use xcresult_metadata::TestStatus;
use xcresult_report::{
    aggregate::ReportStatus,
    errors::FormatError,
    formatter::Formatter,
    options::{FormatterBuilder, FormatterOptions},
    resolver::NoopExporter,
};

#[tokio::test]
async fn formats_typed_bundle() -> Result<()> {
    test_init();

    let bundle = Bundle::new(&BundleOptions {
        include_failure_summary: true,
        ..BundleOptions::default()
    });
    let report = Formatter::new(bundle, NoopExporter, FormatterOptions::default())
        .format()
        .await?;

    assert_eq!(report.entity_name.as_deref(), Some("App"));
    assert_eq!(
        report.creating_workspace_file_path.as_deref(),
        Some("/work/App/App.xcworkspace")
    );
    assert_eq!(report.test_status, ReportStatus::Failure);
    ensure!(report.build_log.is_none(), "build without errors has no log");
    ensure!(report.annotations.is_empty(), "no annotations without errors");

    assert_eq!(report.chapters.len(), 1);
    let chapter = &report.chapters[0];
    assert_eq!(chapter.scheme_command_name, "Test");
    assert_eq!(chapter.run_destination.display_name, "iPhone 15");
    assert_eq!(
        chapter.sections.keys().collect::<Vec<_>>(),
        vec!["AppTests"],
        "unnamed testable is dropped"
    );

    let section = &chapter.sections["AppTests"];
    assert_eq!(section.target_name.as_deref(), Some("AppTests"));
    let tests: Vec<_> = section
        .tests
        .iter()
        .map(|test| (test.name.as_str(), test.origin_group.as_str()))
        .collect();
    assert_eq!(
        tests,
        vec![
            ("testPass()", "ClassA"),
            ("testFail()", "ClassA"),
            ("testSkip()", "ClassB"),
            ("testExpected()", "ClassB"),
        ]
    );
    assert_eq!(section.tests[3].status, Some(TestStatus::ExpectedFailure));

    let summary = &chapter.summaries[0];
    let stats = summary.stats;
    assert_eq!(
        (
            stats.total(),
            stats.passed(),
            stats.failed(),
            stats.skipped(),
            stats.expected_failure()
        ),
        (4, 1, 1, 1, 1)
    );
    assert_eq!(
        summary.groups["AppTests"]["ClassA"].duration,
        Duration::from_millis(500)
    );
    assert_eq!(summary.formatted_duration(), "1.50s");
    ensure!(summary.has_failures(), "chapter has failures");
    assert_eq!(report.stats.stats, stats);

    Ok(())
}

#[tokio::test]
async fn loads_details_for_tests_with_summaries() -> Result<()> {
    test_init();

    let bundle = Bundle::new(&BundleOptions {
        include_failure_summary: true,
        ..BundleOptions::default()
    });
    let report = Formatter::new(bundle, NoopExporter, FormatterOptions::default())
        .format()
        .await?;

    let details = &report.chapters[0].sections["AppTests"].details;
    let names: Vec<_> = details.iter().map(|detail| detail.name.as_str()).collect();
    assert_eq!(names, vec!["testPass()", "testFail()"]);

    let failing = &details[1];
    let activities: Vec<_> = failing
        .activities
        .iter()
        .map(|activity| (activity.title.as_str(), activity.indent))
        .collect();
    assert_eq!(
        activities,
        vec![
            ("Start Test", 0),
            ("Set Up", 1),
            ("Launch App", 2),
            ("Tear Down", 0),
        ]
    );

    assert_eq!(failing.failures.len(), 1);
    let failure = &failing.failures[0];
    assert_eq!(failure.file_path, "/work/App/AppTests/ClassA.swift");
    assert_eq!(failure.line_number, Some(12));
    assert_eq!(failure.issue_type, "Assertion Failure");
    assert_eq!(failure.stack_trace, Vec::<String>::new());
    ensure!(
        failure
            .contents
            .contains("/work/App/AppTests/ClassA.swift:12"),
        "contents show the failure location: {}",
        failure.contents
    );

    Ok(())
}

#[tokio::test]
async fn passed_test_details_can_be_disabled() -> Result<()> {
    test_init();

    let formatter = FormatterBuilder::default()
        .set_show_passed_tests(false)
        .build(Bundle::new(&BundleOptions::default()), NoopExporter);
    let report = formatter.format().await?;

    let details = &report.chapters[0].sections["AppTests"].details;
    let names: Vec<_> = details.iter().map(|detail| detail.name.as_str()).collect();
    assert_eq!(names, vec!["testFail()"]);
    ensure!(
        details[0].failures.is_empty(),
        "no failure summaries were recorded"
    );

    Ok(())
}

#[tokio::test]
async fn build_errors_fail_report_and_add_annotations() -> Result<()> {
    test_init();

    let bundle = Bundle::new(&BundleOptions {
        build_errors: vec!["cannot find 'foo' in scope", "missing return"],
        ..BundleOptions::default()
    });
    let report = Formatter::new(bundle, NoopExporter, FormatterOptions::default())
        .format()
        .await?;

    assert_eq!(report.test_status, ReportStatus::Failure);
    let Some(build_log) = &report.build_log else {
        bail!("build log should be set");
    };
    assert_eq!(
        build_log.content,
        vec![
            "Sources/App.swift:5:1: error: cannot find 'foo' in scope".to_owned(),
            "Sources/App.swift:5:1: error: missing return".to_owned(),
        ]
    );

    let annotations: Vec<_> = report
        .annotations
        .iter()
        .map(|annotation| {
            (
                annotation.path.as_str(),
                annotation.start_line,
                annotation.message.as_str(),
            )
        })
        .collect();
    assert_eq!(
        annotations,
        vec![
            ("Sources/App.swift", 5, "cannot find 'foo' in scope"),
            ("Sources/App.swift", 5, "missing return"),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn coverage_is_exported_when_enabled() -> Result<()> {
    test_init();

    let options = BundleOptions {
        coverage: true,
        ..BundleOptions::default()
    };

    let report = Formatter::new(
        Bundle::new(&options),
        NoopExporter,
        FormatterOptions::default(),
    )
    .format()
    .await?;
    let Some(coverage) = &report.code_coverage else {
        bail!("coverage should be exported");
    };
    assert_eq!(coverage.formatted_line_coverage(), "81.25%");
    assert_eq!(coverage.coverage().targets[0].name, "App.app");

    let report = FormatterBuilder::default()
        .set_show_code_coverage(false)
        .build(Bundle::new(&options), NoopExporter)
        .format()
        .await?;
    ensure!(
        report.code_coverage.is_none(),
        "coverage is skipped when disabled"
    );

    Ok(())
}

#[tokio::test]
async fn missing_referenced_record_aborts() -> Result<()> {
    test_init();

    let mut bundle = Bundle::new(&BundleOptions::default());
    bundle.remove_record("fail");
    let error = match Formatter::new(bundle, NoopExporter, FormatterOptions::default())
        .format()
        .await
    {
        Ok(_) => bail!("formatting should fail"),
        Err(error) => error,
    };

    let FormatError::ResolveRecord { type_name, err } = &error else {
        bail!("unexpected error: {error}");
    };
    assert_eq!(*type_name, "ActionTestSummary");
    assert_eq!(err.reference_id(), Some("fail"));
    assert_eq!(error.to_string(), "failed to resolve `ActionTestSummary` record");

    Ok(())
}

#[tokio::test]
async fn report_serializes_for_renderers() -> Result<()> {
    test_init();

    let bundle = Bundle::new(&BundleOptions::default());
    let report = Formatter::new(bundle, NoopExporter, FormatterOptions::default())
        .format()
        .await?;
    let value = serde_json::to_value(&report)?;

    assert_eq!(value["testStatus"], "failure");
    assert_eq!(value["entityName"], "App");
    let section = &value["chapters"][0]["sections"]["AppTests"];
    assert_eq!(section["tests"][1]["status"], "Failure");
    assert_eq!(section["tests"][3]["status"], "Expected Failure");
    assert_eq!(section["tests"][0]["duration"], 0.25);
    assert_eq!(
        value["chapters"][0]["summaries"][0]["stats"]["expectedFailure"],
        1
    );

    Ok(())
}
