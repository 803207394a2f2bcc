//! Display normalization of generated chart specifications.
//!
//! Cards already show the chart's name, so the title embedded by the generator is
//! stripped before the spec reaches a renderer. A stored spec that isn't a JSON object
//! is shown as an empty chart instead of failing the whole page.

use serde_json::{Map, Value};

use crate::constants::CHART_TITLE_KEY;

/// Declarative chart description (axes, series, ...), as a JSON object.
pub type ChartSpec = Map<String, Value>;

/// Parse a stored spec. Absent, unparseable and non-object payloads all become `{}`.
#[must_use]
pub fn parse_chart_spec(raw: Option<&str>) -> ChartSpec {
    let Some(raw) = raw else {
        return ChartSpec::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(spec)) => spec,
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "chart spec is not an object, rendering empty");
            ChartSpec::new()
        },
        Err(e) => {
            tracing::warn!(error = %e, "malformed chart spec, rendering empty");
            ChartSpec::new()
        },
    }
}

/// Remove the embedded title and serialize the spec back to its stored form.
///
/// Applying this to its own output returns the same string.
#[must_use]
pub fn strip_chart_title(raw: Option<&str>) -> String {
    let mut spec = parse_chart_spec(raw);
    spec.remove(CHART_TITLE_KEY);
    Value::Object(spec).to_string()
}

const fn json_kind(value: &Value) -> &'static str {
    match *value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
