// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flattening of activity trees.

use crate::{
    errors::DisplayErrorChain,
    resolver::{AttachmentExporter, ExportedAttachment},
};
use serde::Serialize;
use std::slice;
use tracing::warn;
use xcresult_metadata::ActionTestActivitySummary;

/// An activity along with its depth in the activity tree.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatActivity {
    /// The activity's title.
    pub title: String,

    /// The activity's type.
    pub activity_type: String,

    /// The activity's unique identifier.
    pub uuid: String,

    /// When the activity started.
    pub start: Option<String>,

    /// When the activity finished.
    pub finish: Option<String>,

    /// Identifiers of failures reported during this activity.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failure_summary_ids: Vec<String>,

    /// The attachments exported for this activity. Empty if exporting failed.
    pub attachments: Vec<ExportedAttachment>,

    /// The number of ancestors between this activity and the root of its tree.
    pub indent: usize,
}

impl FlatActivity {
    fn new(
        activity: &ActionTestActivitySummary,
        attachments: Vec<ExportedAttachment>,
        indent: usize,
    ) -> Self {
        Self {
            title: activity.title.clone(),
            activity_type: activity.activity_type.clone(),
            uuid: activity.uuid.clone(),
            start: activity.start.clone(),
            finish: activity.finish.clone(),
            failure_summary_ids: activity.failure_summary_ids.clone(),
            attachments,
            indent,
        }
    }
}

/// Flattens a forest of activities into `out`, in pre-order.
///
/// Each activity is emitted with `indent` set to its depth below the forest roots, offset by the
/// `indent` passed in. Attachments are exported for every activity before it is emitted; an
/// export failure is logged and the activity is emitted without attachments.
pub async fn collect_activities<E>(
    exporter: &E,
    activities: &[ActionTestActivitySummary],
    out: &mut Vec<FlatActivity>,
    indent: usize,
) where
    E: AttachmentExporter,
{
    let mut stack: Vec<slice::Iter<'_, ActionTestActivitySummary>> = vec![activities.iter()];

    while let Some(siblings) = stack.last_mut() {
        let Some(activity) = siblings.next() else {
            stack.pop();
            continue;
        };
        // The stack holds the iterators of all ancestors plus the current level.
        let depth = indent + stack.len() - 1;

        let attachments = match exporter.export_attachments(activity).await {
            Ok(attachments) => attachments,
            Err(error) => {
                warn!("{}", DisplayErrorChain::new(error));
                Vec::new()
            }
        };
        out.push(FlatActivity::new(activity, attachments, depth));

        if !activity.subactivities.is_empty() {
            stack.push(activity.subactivities.iter());
        }
    }
}
