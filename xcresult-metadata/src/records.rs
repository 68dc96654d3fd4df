// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::Record;
use serde::{Deserialize, Serialize};

/// A reference to another record stored in the result bundle.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// The opaque identifier of the referenced record.
    pub id: String,

    /// The type of the referenced record, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<TypeDefinition>,
}

impl Reference {
    /// Creates a new reference with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target_type: None,
        }
    }
}

/// The type of a referenced record.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct TypeDefinition {
    /// The record type name.
    pub name: String,
}

/// The root record of a result bundle.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsInvocationRecord {
    /// Reference to the [`ActionsInvocationMetadata`] for this invocation.
    pub metadata_ref: Option<Reference>,

    /// The actions (build, test, ...) performed by this invocation.
    #[serde(default)]
    pub actions: Vec<ActionRecord>,
}

impl Record for ActionsInvocationRecord {
    const TYPE_NAME: &'static str = "ActionsInvocationRecord";
}

/// Metadata describing the invocation.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsInvocationMetadata {
    /// The path to the workspace or project that was built.
    pub creating_workspace_file_path: Option<String>,

    /// The scheme that was used for the invocation.
    pub scheme_identifier: Option<EntityIdentifier>,
}

impl Record for ActionsInvocationMetadata {
    const TYPE_NAME: &'static str = "ActionsInvocationMetadata";
}

/// Identifies a scheme, target or other entity.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityIdentifier {
    /// The entity's name.
    pub entity_name: Option<String>,

    /// The kind of entity, e.g. `scheme`.
    pub entity_type: Option<String>,

    /// The containing project or workspace name.
    pub container_name: Option<String>,
}

/// One action of an invocation, such as a build or a test run against a destination.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// The scheme command, e.g. `Test`.
    #[serde(default)]
    pub scheme_command_name: String,

    /// The scheme task, e.g. `BuildAndAction`.
    pub scheme_task_name: Option<String>,

    /// A human readable title.
    pub title: Option<String>,

    /// When the action started.
    pub started_time: Option<String>,

    /// When the action ended.
    pub ended_time: Option<String>,

    /// The destination the action ran against.
    #[serde(default)]
    pub run_destination: ActionRunDestinationRecord,

    /// The result of the build phase.
    #[serde(default)]
    pub build_result: ActionResult,

    /// The result of the action phase (e.g. running tests).
    #[serde(default)]
    pub action_result: ActionResult,
}

/// The destination an action ran against.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRunDestinationRecord {
    /// The destination's display name, e.g. `iPhone 15`.
    #[serde(default)]
    pub display_name: String,

    /// The architecture of the destination.
    #[serde(default)]
    pub target_architecture: String,

    /// The destination device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_device_record: Option<ActionDeviceRecord>,

    /// The SDK the action was built with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_sdk_record: Option<ActionSdkRecord>,
}

/// A device used as a run destination.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDeviceRecord {
    /// The device name.
    #[serde(default)]
    pub name: String,

    /// The device model, e.g. `iPhone 15`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    /// The operating system version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system_version: Option<String>,

    /// The platform, e.g. `iOS Simulator`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_record: Option<ActionPlatformRecord>,
}

/// A platform description.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlatformRecord {
    /// The platform identifier.
    #[serde(default)]
    pub identifier: String,

    /// The user-facing platform name.
    #[serde(default)]
    pub user_description: String,
}

/// An SDK description.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSdkRecord {
    /// The SDK name.
    #[serde(default)]
    pub name: String,

    /// The SDK identifier.
    #[serde(default)]
    pub identifier: String,

    /// The SDK version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system_version: Option<String>,
}

/// The result of one phase of an action.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    /// The name of the result, e.g. `build`.
    pub result_name: Option<String>,

    /// The status, e.g. `succeeded` or `failed`.
    pub status: Option<String>,

    /// Reference to the [`ActivityLogSection`](crate::ActivityLogSection) for this phase.
    pub log_ref: Option<Reference>,

    /// Reference to the [`ActionTestPlanRunSummaries`](crate::ActionTestPlanRunSummaries) for this
    /// phase.
    pub tests_ref: Option<Reference>,

    /// Code coverage information, if coverage was gathered.
    pub coverage: Option<CodeCoverageInfo>,
}

/// Where code coverage data for an action is stored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeCoverageInfo {
    /// Whether coverage data was recorded.
    #[serde(default)]
    pub has_coverage_data: bool,

    /// Reference to the coverage report.
    pub report_ref: Option<Reference>,

    /// Reference to the coverage archive.
    pub archive_ref: Option<Reference>,
}
