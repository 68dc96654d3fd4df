// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory resolver and exporter implementations for tests.

use crate::{
    errors::{ExportError, ResolveError},
    resolver::{AttachmentExporter, ExportedAttachment, RecordResolver},
};
use std::{
    collections::{BTreeSet, HashMap},
    sync::Mutex,
};
use xcresult_metadata::{ActionTestActivitySummary, Reference};

/// A resolver backed by a map from reference IDs to JSON values.
#[derive(Debug, Default)]
pub(crate) struct MapResolver {
    root: serde_json::Value,
    records: HashMap<String, serde_json::Value>,
    coverage: Option<serde_json::Value>,
}

impl MapResolver {
    pub(crate) fn new(root: serde_json::Value) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    pub(crate) fn with_record(mut self, id: &str, value: serde_json::Value) -> Self {
        self.records.insert(id.to_owned(), value);
        self
    }

    pub(crate) fn with_coverage(mut self, value: serde_json::Value) -> Self {
        self.coverage = Some(value);
        self
    }
}

impl RecordResolver for MapResolver {
    async fn resolve(
        &self,
        reference: Option<&Reference>,
    ) -> Result<serde_json::Value, ResolveError> {
        match reference {
            None => Ok(self.root.clone()),
            Some(reference) => self
                .records
                .get(&reference.id)
                .cloned()
                .ok_or_else(|| ResolveError::new(Some(reference), "no such record")),
        }
    }

    async fn export_code_coverage(&self) -> Result<serde_json::Value, ResolveError> {
        self.coverage
            .clone()
            .ok_or_else(|| ResolveError::coverage("no coverage in bundle"))
    }
}

/// An exporter that records the activities it was asked to export, producing one attachment per
/// activity.
#[derive(Debug, Default)]
pub(crate) struct RecordingExporter {
    failing: BTreeSet<String>,
    exported: Mutex<Vec<String>>,
}

impl RecordingExporter {
    /// Fails exports for activities with the given titles.
    pub(crate) fn failing_on<'a>(titles: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            failing: titles.into_iter().map(str::to_owned).collect(),
            exported: Mutex::default(),
        }
    }

    pub(crate) fn exported(&self) -> Vec<String> {
        self.exported.lock().expect("lock is not poisoned").clone()
    }
}

impl AttachmentExporter for RecordingExporter {
    async fn export_attachments(
        &self,
        activity: &ActionTestActivitySummary,
    ) -> Result<Vec<ExportedAttachment>, ExportError> {
        self.exported
            .lock()
            .expect("lock is not poisoned")
            .push(activity.title.clone());
        if self.failing.contains(&activity.title) {
            return Err(ExportError::new(activity.title.clone(), "disk full"));
        }
        Ok(vec![ExportedAttachment {
            name: activity.title.clone(),
            uniform_type_identifier: "public.plain-text".to_owned(),
            path: format!("attachments/{}.txt", activity.title),
        }])
    }
}
