//! Turning a listing response into the records the board shows.

use chartboard_client::ListResponse;
use chartboard_core::{ChartRecord, PageResult, strip_chart_title};

use crate::error::ServiceError;

/// Normalize a fetched page for display.
///
/// Consumes the response and returns fresh records: ready records get their
/// embedded chart title removed, every other record passes through untouched.
///
/// # Errors
/// Returns [`ServiceError::MissingData`] when the response has no data payload.
pub fn reconcile(response: ListResponse) -> Result<PageResult, ServiceError> {
    let page = response.data.ok_or(ServiceError::MissingData)?;
    let records = page.records.into_iter().map(normalize_record).collect();
    Ok(PageResult::new(records, page.total))
}

/// Display normalization of a single record.
#[must_use]
pub fn normalize_record(record: ChartRecord) -> ChartRecord {
    if !record.is_ready() {
        return record;
    }
    let gen_chart = strip_chart_title(record.gen_chart.as_deref());
    ChartRecord { gen_chart: Some(gen_chart), ..record }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartboard_core::ChartId;

    fn record(id: &str, status: i32, gen_chart: Option<&str>) -> ChartRecord {
        ChartRecord {
            id: ChartId::from(id),
            name: Some(format!("chart {id}")),
            goal: Some("show growth".to_owned()),
            chart_type: Some("bar".to_owned()),
            gen_chart: gen_chart.map(str::to_owned),
            gen_result: None,
            status,
            exec_msg: None,
            user_id: None,
            create_time: None,
            update_time: None,
        }
    }

    fn response(records: Vec<ChartRecord>, total: u64) -> ListResponse {
        ListResponse::with_page(PageResult::new(records, total))
    }

    #[test]
    fn test_empty_page() {
        let page = reconcile(response(vec![], 0)).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_missing_data_is_error() {
        let err = reconcile(ListResponse { data: None }).unwrap_err();
        assert!(matches!(err, ServiceError::MissingData));
        assert!(err.is_retrieval());
    }

    #[test]
    fn test_ready_title_stripped() {
        let page =
            reconcile(response(vec![record("1", 2, Some(r#"{"title":"X","series":[]}"#))], 1))
                .unwrap();
        let spec: serde_json::Value =
            serde_json::from_str(page.records[0].gen_chart.as_deref().unwrap()).unwrap();
        assert_eq!(spec, serde_json::json!({"series": []}));
    }

    #[test]
    fn test_ready_without_spec_gets_empty_object() {
        let page = reconcile(response(vec![record("1", 2, None)], 1)).unwrap();
        assert_eq!(page.records[0].gen_chart.as_deref(), Some("{}"));
    }

    #[test]
    fn test_ready_malformed_spec_isolated() {
        let page = reconcile(response(
            vec![record("1", 2, Some("{oops")), record("2", 2, Some(r#"{"title":"ok","series":[]}"#))],
            2,
        ))
        .unwrap();
        assert_eq!(page.records[0].gen_chart.as_deref(), Some("{}"));
        assert_eq!(page.records[1].gen_chart.as_deref(), Some(r#"{"series":[]}"#));
    }

    #[test]
    fn test_non_ready_untouched() {
        let raw = r#"{"title":"keep", "series" : []}"#;
        let records: Vec<_> =
            [0, 1, 3, 7].iter().map(|&status| record("9", status, Some(raw))).collect();
        let page = reconcile(response(records.clone(), 4)).unwrap();
        assert_eq!(page.records, records);
    }

    #[test]
    fn test_reconcile_twice_is_identical() {
        let records = vec![
            record("1", 2, Some(r#"{"title":{"text":"A"},"xAxis":{"data":["x"]}}"#)),
            record("2", 0, None),
            record("3", 3, Some("{}")),
        ];
        let first = reconcile(response(records, 12)).unwrap();
        let second = reconcile(response(first.records.clone(), first.total)).unwrap();
        assert_eq!(first, second);
    }
}
