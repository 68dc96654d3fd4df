// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building a [`TestReport`] from a result bundle.

use crate::{
    activity::collect_activities,
    build_log::BuildLog,
    errors::{DisplayErrorChain, FormatError},
    failure::collect_failure_summaries,
    flatten::{FlatTestResult, collect_test_summaries},
    options::FormatterOptions,
    report::{TestCodeCoverage, TestDetail, TestReport, TestReportChapter, TestReportSection},
    resolver::{AttachmentExporter, RecordResolver},
};
use tracing::debug;
use xcresult_metadata::{
    ActionRecord, ActionTestPlanRunSummaries, ActionTestSummary, ActionsInvocationMetadata,
    ActionsInvocationRecord, ActivityLogSection, CodeCoverage, Record, Reference, decode_record,
};

/// Reads a result bundle through a [`RecordResolver`] and builds a [`TestReport`] from it.
///
/// Records are resolved one at a time, in the order they appear in the bundle.
#[derive(Debug)]
pub struct Formatter<R, E> {
    resolver: R,
    exporter: E,
    options: FormatterOptions,
}

impl<R, E> Formatter<R, E>
where
    R: RecordResolver,
    E: AttachmentExporter,
{
    /// Creates a new formatter.
    pub fn new(resolver: R, exporter: E, options: FormatterOptions) -> Self {
        Self {
            resolver,
            exporter,
            options,
        }
    }

    /// Returns the options this formatter was created with.
    pub fn options(&self) -> &FormatterOptions {
        &self.options
    }

    /// Builds the report.
    ///
    /// Fails if the root record, or any record it references other than code coverage, can't be
    /// resolved and decoded.
    pub async fn format(&self) -> Result<TestReport, FormatError> {
        let invocation: ActionsInvocationRecord = self.resolve(None).await?;
        let mut report = TestReport::new();

        if let Some(metadata_ref) = &invocation.metadata_ref {
            let metadata: ActionsInvocationMetadata = self.resolve(Some(metadata_ref)).await?;
            report.entity_name = metadata
                .scheme_identifier
                .and_then(|identifier| identifier.entity_name);
            report.creating_workspace_file_path = metadata.creating_workspace_file_path;
        }

        for action in &invocation.actions {
            if let Some(log_ref) = &action.build_result.log_ref {
                let log: ActivityLogSection = self.resolve(Some(log_ref)).await?;
                let build_log = BuildLog::new(&log, report.creating_workspace_file_path.as_deref());
                report.set_build_log(build_log);
            }

            let Some(tests_ref) = &action.action_result.tests_ref else {
                continue;
            };
            let chapter = self.load_chapter(action, tests_ref).await?;
            report.add_chapter(chapter);

            if action.action_result.coverage.is_some()
                && self.options.show_code_coverage
                && let Some(coverage) = self.load_code_coverage().await
            {
                report.set_code_coverage(coverage);
            }
        }

        debug!(
            chapters = report.chapters.len(),
            status = ?report.test_status,
            "finished report"
        );
        Ok(report)
    }

    async fn load_chapter(
        &self,
        action: &ActionRecord,
        tests_ref: &Reference,
    ) -> Result<TestReportChapter, FormatError> {
        let mut chapter = TestReportChapter::new(
            action.scheme_command_name.clone(),
            action.run_destination.clone(),
            action.title.clone(),
        );

        let run_summaries: ActionTestPlanRunSummaries = self.resolve(Some(tests_ref)).await?;
        for summary in &run_summaries.summaries {
            for testable in &summary.testable_summaries {
                let group_name = testable.name.as_deref().unwrap_or_default();
                let mut tests = Vec::new();
                collect_test_summaries(group_name, &testable.tests, &mut tests);

                let Some(name) = &testable.name else {
                    debug!(tests = tests.len(), "dropping unnamed testable");
                    continue;
                };
                let mut section = TestReportSection::new(name.clone(), tests);
                if let Some(target_name) = &testable.target_name {
                    section.set_target_name(target_name.clone());
                }
                section.details = self.load_details(&section.tests).await?;
                chapter.add_section(section);
            }
        }

        Ok(chapter)
    }

    async fn load_details(&self, tests: &[FlatTestResult]) -> Result<Vec<TestDetail>, FormatError> {
        let mut details = Vec::new();
        for test in tests {
            let Some(summary_ref) = &test.summary_ref else {
                continue;
            };
            let failed = test.status.as_ref().is_some_and(|status| status.is_failure());
            if !failed && !self.options.show_passed_tests {
                continue;
            }

            let summary: ActionTestSummary = self.resolve(Some(summary_ref)).await?;
            let mut activities = Vec::new();
            collect_activities(
                &self.exporter,
                &summary.activity_summaries,
                &mut activities,
                0,
            )
            .await;

            details.push(TestDetail {
                name: test.name.clone(),
                identifier: test.identifier.clone(),
                origin_group: test.origin_group.clone(),
                status: test.status.clone(),
                duration: test.duration,
                failures: collect_failure_summaries(&summary.failure_summaries),
                activities,
            });
        }
        Ok(details)
    }

    async fn load_code_coverage(&self) -> Option<TestCodeCoverage> {
        let value = match self.resolver.export_code_coverage().await {
            Ok(value) => value,
            Err(error) => {
                debug!("omitting code coverage: {}", DisplayErrorChain::new(error));
                return None;
            }
        };
        match decode_record::<CodeCoverage>(value) {
            Ok(coverage) => Some(TestCodeCoverage::new(coverage)),
            Err(error) => {
                debug!("omitting code coverage: {}", DisplayErrorChain::new(error));
                None
            }
        }
    }

    async fn resolve<T: Record>(&self, reference: Option<&Reference>) -> Result<T, FormatError> {
        let value = self
            .resolver
            .resolve(reference)
            .await
            .map_err(|err| FormatError::ResolveRecord {
                type_name: T::TYPE_NAME,
                err,
            })?;
        Ok(decode_record(value)?)
    }
}
