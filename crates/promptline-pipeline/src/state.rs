//! The evolving state record threaded through a pipeline run.
//!
//! `PipelineState` is a mapping from field name to JSON value, mutated
//! additively: each node contributes its own declared output field and never
//! touches fields owned by other nodes.  The failure marker lives in a
//! dedicated slot **separate from the data fields**, so a caller can always
//! distinguish “node failed, field absent” from “node succeeded with an
//! empty string”.

use std::collections::BTreeMap;

use promptline_core::generic::FailureKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::NodeFailure;

/// Failure marker recorded by the runner when a node fails.
///
/// Carries the failing node’s name alongside the failure it returned, so a
/// request handler can render “description succeeded, diagnosis failed”.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineFailure {
    pub node: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Field mapping plus the reserved error slot.
///
/// Serializable as-is, so a thin request handler can hand the whole state (or
/// a [`Self::project`]ion of it) to its JSON renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineState {
    fields: BTreeMap<String, Value>,
    error: Option<PipelineFailure>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a text field, fluent style.
    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), Value::String(value.into()));
        self
    }

    /// Seed an arbitrary JSON field, fluent style.
    pub fn with_value(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Fetch a required upstream text field.
    ///
    /// Returns a [`FailureKind::MissingUpstreamField`] failure if the field is
    /// absent or not a string.  With a correctly ordered pipeline this never
    /// fires, because the runner stops before a node whose input producer
    /// failed.
    pub fn require_str(&self, field: &str) -> Result<&str, NodeFailure> {
        self.get_str(field).ok_or_else(|| NodeFailure {
            kind: FailureKind::MissingUpstreamField,
            message: format!("required upstream field `{field}` is absent"),
        })
    }

    /// The failure marker, if a node failed during the run.
    pub fn error(&self) -> Option<&PipelineFailure> {
        self.error.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Reduced view for response rendering: the named fields only, absent
    /// ones skipped.
    pub fn project(&self, fields: &[&str]) -> BTreeMap<String, Value> {
        fields
            .iter()
            .filter_map(|field| {
                self.fields
                    .get(*field)
                    .map(|value| ((*field).to_owned(), value.clone()))
            })
            .collect()
    }

    pub(crate) fn apply(&mut self, update: PartialUpdate) {
        for (field, value) in update.0 {
            self.fields.insert(field, value);
        }
    }

    pub(crate) fn record_failure(&mut self, node: &str, failure: NodeFailure) {
        self.error = Some(PipelineFailure {
            node: node.to_owned(),
            kind: failure.kind,
            message: failure.message,
        });
    }
}

/// The additive contribution of one successful node.
///
/// A node may only populate its **own declared output field**; the runner
/// drops (and logs) any entry targeting a field the node does not own.
#[derive(Debug, Clone, Default)]
pub struct PartialUpdate(pub(crate) BTreeMap<String, Value>);

impl PartialUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single text field, the common case.
    pub fn text(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut update = Self::default();
        update.0.insert(field.into(), Value::String(value.into()));
        update
    }

    /// Single JSON field.
    pub fn value(field: impl Into<String>, value: Value) -> Self {
        let mut update = Self::default();
        update.0.insert(field.into(), value);
        update
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn retain_field(&mut self, field: &str) -> Vec<String> {
        let dropped: Vec<String> = self
            .0
            .keys()
            .filter(|key| key.as_str() != field)
            .cloned()
            .collect();
        for key in &dropped {
            self.0.remove(key);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_str_reports_missing_upstream_field() {
        let state = PipelineState::new().with_text("description", "spotted leaf");
        assert_eq!(state.require_str("description").unwrap(), "spotted leaf");

        let failure = state.require_str("diagnosis").unwrap_err();
        assert_eq!(failure.kind, FailureKind::MissingUpstreamField);
    }

    #[test]
    fn projection_skips_absent_fields() {
        let state = PipelineState::new().with_text("description", "d");
        let view = state.project(&["description", "diagnosis"]);
        assert_eq!(view.len(), 1);
        assert_eq!(view["description"], Value::String("d".into()));
    }

    #[test]
    fn state_serializes_with_error_slot() {
        let mut state = PipelineState::new().with_text("input", "x");
        state.record_failure(
            "chat",
            NodeFailure {
                kind: FailureKind::ProviderError,
                message: "boom".into(),
            },
        );
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["error"]["node"], "chat");
        assert_eq!(json["error"]["kind"], "provider_error");
        assert_eq!(json["fields"]["input"], "x");
    }
}
