//! Content planning models.
//!
//! The planning endpoint takes a small content-strategy payload and returns
//! an opaque JSON document. The client never depends on its shape; it only
//! reads a handful of fields for display, and tolerates any of them missing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Request body of `POST /api/content-planning`.
///
/// The defaults are the strategy the dashboard has always sent. They can be
/// replaced through the `[strategy]` section of `config.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default)]
pub struct ContentStrategy {
    pub content_goals: String,
    pub brand_guidelines: String,
    pub publishing_frequency: String,
}

impl Default for ContentStrategy {
    fn default() -> Self {
        Self {
            content_goals: "Establish thought leadership in AI healthcare, drive engagement from healthcare professionals".to_string(),
            brand_guidelines: "Professional yet approachable tone, evidence-based content".to_string(),
            publishing_frequency: "3x per week".to_string(),
        }
    }
}

/// The content plan returned by the planning endpoint.
///
/// Wraps the raw JSON document. Accessors look at the top level first and
/// then inside `result`, since the backend nests the plan-run output there.
///
/// Serialized as the bare document: serde_json writes and reads newtype
/// structs as their inner value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[ts(type = "unknown")]
pub struct ContentPlan(pub Value);

impl ContentPlan {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The raw JSON document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.0
            .get(name)
            .or_else(|| self.0.get("result").and_then(|result| result.get(name)))
    }

    /// Value of a plan-run input, read from `plan_run_inputs.<name>.value`.
    ///
    /// Non-string values are rendered as compact JSON.
    pub fn plan_input(&self, name: &str) -> Option<String> {
        let value = self.field("plan_run_inputs")?.get(name)?.get("value")?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn publishing_frequency(&self) -> Option<String> {
        self.plan_input("publishing_frequency")
    }

    pub fn brand_guidelines(&self) -> Option<String> {
        self.plan_input("brand_guidelines")
    }

    pub fn content_goals(&self) -> Option<String> {
        self.plan_input("content_goals")
    }

    /// Plan-run state, e.g. `COMPLETE`.
    pub fn state(&self) -> Option<&str> {
        self.field("state").and_then(Value::as_str)
    }

    /// Whether the backend reported the plan run as `COMPLETE`.
    pub fn is_complete(&self) -> bool {
        self.state() == Some("COMPLETE")
    }

    pub fn plan_id(&self) -> Option<&str> {
        self.field("plan_id").and_then(Value::as_str)
    }

    /// The last eight characters of the plan id, for compact display.
    pub fn short_plan_id(&self) -> Option<String> {
        let id = self.plan_id()?;
        let count = id.chars().count();
        Some(id.chars().skip(count.saturating_sub(8)).collect())
    }

    /// Content-plan files keyed by filename.
    pub fn content_plans(&self) -> Option<&Map<String, Value>> {
        self.field("content_plans").and_then(Value::as_object)
    }

    /// True when none of the structured fields are present, in which case
    /// only the raw document can be shown.
    pub fn is_unstructured(&self) -> bool {
        self.field("plan_run_inputs").is_none() && self.content_plans().is_none()
    }
}
