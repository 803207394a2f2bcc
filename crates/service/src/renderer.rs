//! Drawing chart specs.
//!
//! Renderers take a declarative ECharts-style option object and must never fail:
//! missing or empty input draws an empty canvas.

use chartboard_core::ChartSpec;
use serde_json::Value;

/// Marker drawn when there is nothing to chart.
pub const EMPTY_CANVAS: &str = "(empty chart)";

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub trait ChartRenderer: Send + Sync {
    fn render(&self, spec: Option<&ChartSpec>) -> String;
}

/// Terminal renderer: one line for the category axis, one sparkline per series.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextChartRenderer;

impl ChartRenderer for TextChartRenderer {
    fn render(&self, spec: Option<&ChartSpec>) -> String {
        let Some(spec) = spec else {
            return EMPTY_CANVAS.to_owned();
        };

        let mut lines = Vec::new();
        let categories = axis_categories(spec.get("xAxis"));
        if !categories.is_empty() {
            lines.push(format!("x: {}", categories.join(", ")));
        }

        for (index, series) in series_list(spec).iter().enumerate() {
            let kind = series.get("type").and_then(Value::as_str).unwrap_or("series");
            let name = series
                .get("name")
                .and_then(Value::as_str)
                .map_or_else(|| format!("#{}", index + 1), str::to_owned);
            let values = series_values(series.get("data"));
            if values.is_empty() {
                lines.push(format!("[{kind}] {name}: no data"));
                continue;
            }
            let numbers: Vec<String> = values.iter().map(|v| format_number(*v)).collect();
            lines.push(format!("[{kind}] {name} {} {}", sparkline(&values), numbers.join(", ")));
        }

        if lines.is_empty() {
            return EMPTY_CANVAS.to_owned();
        }
        lines.join("\n")
    }
}

fn series_list(spec: &ChartSpec) -> Vec<&serde_json::Map<String, Value>> {
    match spec.get("series") {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        Some(Value::Object(single)) => vec![single],
        _ => Vec::new(),
    }
}

/// `xAxis` may be a single axis object or an array of them; the first one with
/// `data` wins.
fn axis_categories(axis: Option<&Value>) -> Vec<String> {
    let data = match axis {
        Some(Value::Array(axes)) => axes.iter().find_map(|a| a.get("data")),
        Some(axis @ Value::Object(_)) => axis.get("data"),
        _ => None,
    };
    let Some(Value::Array(items)) = data else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            Value::Object(o) => o.get("value").map_or_else(String::new, value_label),
            other => value_label(other),
        })
        .collect()
}

/// Numeric points of a series. Points may be plain numbers, numeric strings,
/// `{value: n}` objects (pie) or `[x, y]` pairs (scatter, y is taken).
fn series_values(data: Option<&Value>) -> Vec<f64> {
    let Some(Value::Array(points)) = data else {
        return Vec::new();
    };
    points.iter().filter_map(point_value).collect()
}

fn point_value(point: &Value) -> Option<f64> {
    match point {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(o) => o.get("value").and_then(point_value),
        Value::Array(pair) => pair.last().and_then(point_value),
        _ => None,
    }
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = SPARK_LEVELS.len() - 1;
    values
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                return SPARK_LEVELS[top / 2];
            }
            let level = (((v - min) / span) * top as f64).round() as usize;
            SPARK_LEVELS[level.min(top)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(value: serde_json::Value) -> ChartSpec {
        match value {
            Value::Object(map) => map,
            _ => panic!("test spec must be an object"),
        }
    }

    #[test]
    fn test_none_renders_empty_canvas() {
        assert_eq!(TextChartRenderer.render(None), EMPTY_CANVAS);
    }

    #[test]
    fn test_empty_object_renders_empty_canvas() {
        assert_eq!(TextChartRenderer.render(Some(&ChartSpec::new())), EMPTY_CANVAS);
    }

    #[test]
    fn test_line_chart() {
        let s = spec(serde_json::json!({
            "xAxis": {"type": "category", "data": ["Mon", "Tue", "Wed"]},
            "series": [{"name": "Users", "type": "line", "data": [10, 20, 30]}]
        }));
        let out = TextChartRenderer.render(Some(&s));
        assert!(out.contains("x: Mon, Tue, Wed"));
        assert!(out.contains("[line] Users ▁▅█ 10, 20, 30"));
    }

    #[test]
    fn test_pie_values_and_unnamed_series() {
        let s = spec(serde_json::json!({
            "series": [{"type": "pie", "data": [{"name": "a", "value": 1.5}, {"name": "b", "value": "2"}]}]
        }));
        let out = TextChartRenderer.render(Some(&s));
        assert!(out.contains("[pie] #1"));
        assert!(out.contains("1.50, 2"));
    }

    #[test]
    fn test_series_without_data() {
        let s = spec(serde_json::json!({"series": [{"type": "bar", "name": "Empty"}]}));
        assert_eq!(TextChartRenderer.render(Some(&s)), "[bar] Empty: no data");
    }

    #[test]
    fn test_flat_series_sparkline() {
        assert_eq!(sparkline(&[3.0, 3.0]), "▄▄");
    }

    #[test]
    fn test_garbage_shapes_do_not_panic() {
        let s = spec(serde_json::json!({"xAxis": 5, "series": "nope"}));
        assert_eq!(TextChartRenderer.render(Some(&s)), EMPTY_CANVAS);
    }
}
