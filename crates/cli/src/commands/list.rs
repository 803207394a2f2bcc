use anyhow::{Result, bail};
use chartboard_service::{ChartBoard, TextChartRenderer, render_board};
use tokio::sync::broadcast;

use crate::commands::initial_params;
use crate::config::Settings;

pub(crate) async fn run(
    settings: &Settings,
    name: Option<&str>,
    page: u32,
    page_size: Option<u32>,
) -> Result<()> {
    let initial = initial_params(settings, name, page, page_size)?;
    let (notices_tx, mut notices_rx) = broadcast::channel(16);
    let board = ChartBoard::spawn(settings.client()?, settings.default_params(), initial, notices_tx);

    let state = board.wait_idle().await?;
    if let Ok(notice) = notices_rx.try_recv() {
        bail!(notice.message);
    }
    tracing::info!(total = state.total, records = state.chart_list.len(), "loaded my charts");
    print!("{}", render_board(&state, &settings.identity(), &TextChartRenderer));
    Ok(())
}
