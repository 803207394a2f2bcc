//! Plain-text rendering of the whole board: cards, pager, total.

use std::fmt::Write as _;

use chartboard_core::{ChartRecord, ChartStatus, Identity};

use crate::renderer::ChartRenderer;
use crate::state::BoardState;
use crate::view::{CardView, ItemView, Severity, render_item};

/// Draw the board as terminal text.
///
/// A record with an unknown status still gets a card, with an error placeholder in place
/// of its body, so one odd record never hides the rest of the page.
#[must_use]
pub fn render_board(state: &BoardState, identity: &Identity, renderer: &dyn ChartRenderer) -> String {
    let mut out = String::new();
    let filter = state.query.name.as_deref().map(|n| format!(" | name: \"{n}\"")).unwrap_or_default();
    let _ = writeln!(
        out,
        "My charts | page {}/{} | {} per page{filter}{}",
        state.query.current,
        state.page_count().max(1),
        state.query.page_size,
        if state.busy { " | loading..." } else { "" },
    );

    if state.chart_list.is_empty() {
        let _ = writeln!(out, "\n  (no charts)");
    }
    for record in &state.chart_list {
        out.push('\n');
        render_card(&mut out, record, identity, renderer);
    }

    let pending = state.count_status(ChartStatus::Queued) + state.count_status(ChartStatus::Generating);
    let _ = write!(out, "\nTotal: {}", state.total);
    if pending > 0 {
        let _ = write!(out, " ({pending} on this page still generating)");
    }
    out.push('\n');
    out
}

fn render_card(out: &mut String, record: &ChartRecord, identity: &Identity, renderer: &dyn ChartRenderer) {
    match render_item(record, identity) {
        Ok(card) => write_card(out, &card, renderer),
        Err(e) => {
            tracing::warn!(id = %record.id, error = %e, "cannot render chart card");
            let _ = writeln!(out, "+ {} [#{}]", record.name.as_deref().unwrap_or("(untitled)"), record.id);
            let _ = writeln!(out, "  [error] {e}");
        },
    }
}

fn write_card(out: &mut String, card: &CardView, renderer: &dyn ChartRenderer) {
    let avatar = card.avatar_url.as_deref().map(|a| format!(" <{a}>")).unwrap_or_default();
    let _ = writeln!(out, "+ {} [#{}]{avatar}", card.title.as_deref().unwrap_or("(untitled)"), card.id);
    if let Some(description) = &card.description {
        let _ = writeln!(out, "  {description}");
    }

    if let Some((severity, heading)) = card.body.placeholder() {
        let tag = match severity {
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Error => "error",
        };
        let _ = writeln!(out, "  [{tag}] {heading}");
        if let Some(message) = card.body.message() {
            let _ = writeln!(out, "  {message}");
        }
        return;
    }

    if let ItemView::Ready { goal, chart } = &card.body {
        if let Some(goal) = goal {
            let _ = writeln!(out, "  Analysis goal: {goal}");
        }
        for line in renderer.render(chart.as_ref()).lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{EMPTY_CANVAS, TextChartRenderer};
    use chartboard_core::constants::QUEUE_BUSY_MESSAGE;
    use chartboard_core::{ChartId, QueryParams};

    fn record(id: &str, status: i32) -> ChartRecord {
        ChartRecord {
            id: ChartId::from(id),
            name: Some(format!("Chart {id}")),
            goal: Some("growth".to_owned()),
            chart_type: Some("line".to_owned()),
            gen_chart: None,
            gen_result: None,
            status,
            exec_msg: None,
            user_id: None,
            create_time: None,
            update_time: None,
        }
    }

    fn state(records: Vec<ChartRecord>, total: u64) -> BoardState {
        BoardState { chart_list: records, total, busy: false, ..BoardState::new(QueryParams::default()) }
    }

    #[test]
    fn test_empty_board() {
        let out = render_board(&state(vec![], 0), &Identity::anonymous(), &TextChartRenderer);
        assert!(out.contains("page 1/1"));
        assert!(out.contains("(no charts)"));
        assert!(out.trim_end().ends_with("Total: 0"));
    }

    #[test]
    fn test_each_status_variant() {
        let mut failed = record("4", 3);
        failed.exec_msg = Some("model timeout".to_owned());
        let mut ready = record("3", 2);
        ready.gen_chart = Some(r#"{"series":[{"type":"line","data":[1,2]}]}"#.to_owned());

        let out = render_board(
            &state(vec![record("1", 0), record("2", 1), ready, failed], 9),
            &Identity::with_avatar("http://img/me.png"),
            &TextChartRenderer,
        );

        assert!(out.contains("[warning] Waiting to generate"));
        assert!(out.contains(QUEUE_BUSY_MESSAGE));
        assert!(out.contains("[info] Generating chart"));
        assert!(out.contains("Analysis goal: growth"));
        assert!(out.contains("[line] #1"));
        assert!(out.contains("[error] Chart generation failed"));
        assert!(out.contains("model timeout"));
        assert!(out.contains("<http://img/me.png>"));
        assert!(out.contains("Chart type: line"));
        assert!(out.contains("page 1/3"));
        assert!(out.contains("Total: 9 (2 on this page still generating)"));
    }

    #[test]
    fn test_ready_without_spec_draws_empty_canvas() {
        let out = render_board(&state(vec![record("1", 2)], 1), &Identity::anonymous(), &TextChartRenderer);
        assert!(out.contains(EMPTY_CANVAS));
    }

    #[test]
    fn test_ready_without_goal_omits_goal_line() {
        let mut ready = record("1", 2);
        ready.goal = None;
        let out = render_board(&state(vec![ready], 1), &Identity::anonymous(), &TextChartRenderer);
        assert!(!out.contains("Analysis goal"));
        assert!(out.contains(EMPTY_CANVAS));
    }

    #[test]
    fn test_unknown_status_keeps_other_cards() {
        let out = render_board(
            &state(vec![record("1", 8), record("2", 3)], 2),
            &Identity::anonymous(),
            &TextChartRenderer,
        );
        assert!(out.contains("Unknown chart status: 8"));
        assert!(out.contains("Chart 2"));
        assert!(out.contains("Chart generation failed"));
    }

    #[test]
    fn test_header_shows_filter_and_loading() {
        let mut s = state(vec![], 0);
        s.query = QueryParams::filtered(&QueryParams::default(), "sales");
        s.busy = true;
        let out = render_board(&s, &Identity::anonymous(), &TextChartRenderer);
        assert!(out.contains("name: \"sales\""));
        assert!(out.contains("loading..."));
    }
}
