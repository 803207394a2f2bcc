//! Per-card status dispatch.
//!
//! A card's body is a pure function of the record's status. The board never moves a
//! record between statuses; whatever the last fetch said is what gets drawn.

use chartboard_core::constants::QUEUE_BUSY_MESSAGE;
use chartboard_core::{ChartId, ChartRecord, ChartSpec, ChartStatus, CoreError, Identity, parse_chart_spec};

/// Visual weight of a placeholder body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
    Error,
}

/// Body of a card, one variant per generation status.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemView {
    Queued { message: String },
    Generating { message: Option<String> },
    Ready { goal: Option<String>, chart: Option<ChartSpec> },
    Failed { message: Option<String> },
}

impl ItemView {
    /// Select the body for a record.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownStatus`] for a status code this build doesn't know.
    pub fn for_record(record: &ChartRecord) -> Result<Self, CoreError> {
        Ok(match record.status()? {
            ChartStatus::Queued => Self::Queued {
                message: record
                    .exec_msg
                    .clone()
                    .unwrap_or_else(|| QUEUE_BUSY_MESSAGE.to_owned()),
            },
            ChartStatus::Generating => Self::Generating { message: record.exec_msg.clone() },
            ChartStatus::Ready => Self::Ready {
                goal: record.goal.clone(),
                chart: record.gen_chart.as_deref().map(|raw| parse_chart_spec(Some(raw))),
            },
            ChartStatus::Failed => Self::Failed { message: record.exec_msg.clone() },
        })
    }

    /// Placeholder heading and severity; `None` for ready charts.
    #[must_use]
    pub const fn placeholder(&self) -> Option<(Severity, &'static str)> {
        match *self {
            Self::Queued { .. } => Some((Severity::Warning, "Waiting to generate")),
            Self::Generating { .. } => Some((Severity::Info, "Generating chart")),
            Self::Ready { .. } => None,
            Self::Failed { .. } => Some((Severity::Error, "Chart generation failed")),
        }
    }

    /// Text shown under the placeholder heading.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Queued { message } => Some(message.as_str()),
            Self::Generating { message } | Self::Failed { message } => message.as_deref(),
            Self::Ready { .. } => None,
        }
    }
}

/// Everything needed to draw one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: ChartId,
    pub title: Option<String>,
    /// "Chart type: ..." line, only when the record has a chart type.
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub body: ItemView,
}

/// Build the card for a record.
///
/// # Errors
/// Returns [`CoreError::UnknownStatus`] when the record's status is not one of the four
/// known values. The caller decides how to show that.
pub fn render_item(record: &ChartRecord, identity: &Identity) -> Result<CardView, CoreError> {
    Ok(CardView {
        id: record.id.clone(),
        title: record.name.clone(),
        description: record.chart_type.as_ref().map(|t| format!("Chart type: {t}")),
        avatar_url: identity.avatar_url.clone(),
        body: ItemView::for_record(record)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: i32) -> ChartRecord {
        ChartRecord {
            id: ChartId::from("5"),
            name: Some("Revenue".to_owned()),
            goal: Some("Compare regions".to_owned()),
            chart_type: None,
            gen_chart: None,
            gen_result: None,
            status,
            exec_msg: None,
            user_id: None,
            create_time: None,
            update_time: None,
        }
    }

    #[test]
    fn test_queued_without_message_uses_default() {
        let view = ItemView::for_record(&record(0)).unwrap();
        assert_eq!(view, ItemView::Queued { message: QUEUE_BUSY_MESSAGE.to_owned() });
        assert_eq!(view.placeholder().unwrap().0, Severity::Warning);
    }

    #[test]
    fn test_queued_with_message() {
        let mut r = record(0);
        r.exec_msg = Some("3 jobs ahead".to_owned());
        assert_eq!(ItemView::for_record(&r).unwrap().message(), Some("3 jobs ahead"));
    }

    #[test]
    fn test_generating_has_no_default_message() {
        let view = ItemView::for_record(&record(1)).unwrap();
        assert_eq!(view, ItemView::Generating { message: None });
        assert_eq!(view.message(), None);
        assert_eq!(view.placeholder().unwrap().0, Severity::Info);
    }

    #[test]
    fn test_failed_shows_exec_msg() {
        let mut r = record(3);
        r.exec_msg = Some("AI service error".to_owned());
        let view = ItemView::for_record(&r).unwrap();
        assert_eq!(view.placeholder(), Some((Severity::Error, "Chart generation failed")));
        assert_eq!(view.message(), Some("AI service error"));
    }

    #[test]
    fn test_ready_with_spec() {
        let mut r = record(2);
        r.gen_chart = Some(r#"{"series":[{"type":"bar","data":[1,2]}]}"#.to_owned());
        let ItemView::Ready { goal, chart } = ItemView::for_record(&r).unwrap() else {
            panic!("expected ready view");
        };
        assert_eq!(goal.as_deref(), Some("Compare regions"));
        assert!(chart.unwrap().contains_key("series"));
    }

    #[test]
    fn test_ready_without_spec_renders_no_chart() {
        let view = ItemView::for_record(&record(2)).unwrap();
        assert_eq!(view, ItemView::Ready { goal: Some("Compare regions".to_owned()), chart: None });
        assert_eq!(view.placeholder(), None);
    }

    #[test]
    fn test_unknown_status_is_error() {
        assert_eq!(ItemView::for_record(&record(4)), Err(CoreError::UnknownStatus(4)));
    }

    #[test]
    fn test_card_fields() {
        let mut r = record(1);
        r.chart_type = Some("pie".to_owned());
        let card = render_item(&r, &Identity::with_avatar("https://a/b.png")).unwrap();
        assert_eq!(card.title.as_deref(), Some("Revenue"));
        assert_eq!(card.description.as_deref(), Some("Chart type: pie"));
        assert_eq!(card.avatar_url.as_deref(), Some("https://a/b.png"));

        let card = render_item(&record(1), &Identity::anonymous()).unwrap();
        assert_eq!(card.description, None);
        assert_eq!(card.avatar_url, None);
    }
}
