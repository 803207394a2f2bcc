//! Query controller and the board driver behind it.
//!
//! The controller only edits parameters. Each edit that changes them by value marks the
//! board busy and notifies the driver through a `watch` channel, and the driver issues one
//! fetch for the new snapshot. Apart from that busy flag the driver is the only writer of
//! [`BoardState`]; list and total are replaced together from a single response.
//!
//! Every fetch gets a monotonic request id. Issuing a new fetch aborts the previous one,
//! and a completion whose id is not the newest is dropped, so a slow response can never
//! overwrite the page the user asked for last.

use std::sync::Arc;

use chartboard_client::{ChartQueryService, ClientError, ListResponse};
use chartboard_core::constants::LOAD_FAILED_NOTICE;
use chartboard_core::{CoreError, QueryParams};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::ServiceError;
use crate::reconcile::reconcile;
use crate::state::{BoardState, Notice};

/// Handle for editing the listing parameters. Cheap to clone.
#[derive(Debug, Clone)]
pub struct QueryController {
    defaults: QueryParams,
    params: Arc<watch::Sender<QueryParams>>,
    refresh: mpsc::UnboundedSender<()>,
    state: Arc<watch::Sender<BoardState>>,
}

impl QueryController {
    /// Start a new name search: defaults, page 1, the given name.
    ///
    /// Returns whether the parameters changed (and so a fetch was triggered).
    pub fn set_filter(&self, name: &str) -> bool {
        let next = QueryParams::filtered(&self.defaults, name);
        self.replace(next)
    }

    /// Jump to another page, keeping name and sort.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPage`] for a zero page or page size; the current
    /// parameters are left unchanged.
    pub fn set_page(&self, page: u32, page_size: u32) -> Result<bool, CoreError> {
        let next = self.params.borrow().paged(page, page_size)?;
        Ok(self.replace(next))
    }

    /// Re-issue the current parameters without changing them.
    ///
    /// # Errors
    /// Returns [`ServiceError::Stopped`] if the driver has exited.
    pub fn refresh(&self) -> Result<(), ServiceError> {
        self.refresh.send(()).map_err(|_| ServiceError::Stopped)
    }

    /// Current parameters.
    #[must_use]
    pub fn params(&self) -> QueryParams {
        self.params.borrow().clone()
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub fn busy(&self) -> bool {
        self.state.borrow().busy
    }

    /// Latest published view state.
    #[must_use]
    pub fn snapshot(&self) -> BoardState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified whenever the view state changes.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<BoardState> {
        self.state.subscribe()
    }

    /// The busy flag is raised while the parameter lock is held, so the driver cannot
    /// settle the new fetch before it is set.
    fn replace(&self, next: QueryParams) -> bool {
        self.params.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            self.state.send_modify(|state| state.busy = true);
            *current = next;
            true
        })
    }
}

/// Outcome of one fetch, tagged with its request id.
#[derive(Debug)]
struct Completion {
    request: u64,
    result: Result<ListResponse, ClientError>,
}

#[derive(Debug)]
struct InFlight {
    request: u64,
    task: JoinHandle<()>,
}

/// Owns the board state and turns parameter changes into fetches.
struct BoardDriver {
    service: Arc<dyn ChartQueryService>,
    params: watch::Receiver<QueryParams>,
    refresh: mpsc::UnboundedReceiver<()>,
    state: Arc<watch::Sender<BoardState>>,
    notices: broadcast::Sender<Notice>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    last_request: u64,
    in_flight: Option<InFlight>,
}

impl BoardDriver {
    async fn run(mut self) {
        self.issue();
        loop {
            tokio::select! {
                changed = self.params.changed() => {
                    if changed.is_err() {
                        tracing::debug!("query controller dropped, stopping board driver");
                        break;
                    }
                    self.issue();
                }
                Some(()) = self.refresh.recv() => self.issue(),
                Some(done) = self.completions_rx.recv() => self.settle(done),
            }
        }
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
    }

    fn issue(&mut self) {
        let params = self.params.borrow_and_update().clone();
        self.last_request += 1;
        let request = self.last_request;

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(superseded = previous.request, by = request, "aborting superseded fetch");
            previous.task.abort();
        }

        self.state.send_modify(|state| {
            state.query = params.clone();
            state.busy = true;
        });
        tracing::debug!(request, page = %params.current, page_size = %params.page_size, name = ?params.name, "fetching charts");

        let service = Arc::clone(&self.service);
        let completions = self.completions_tx.clone();
        let task = tokio::spawn(async move {
            let result = service.list_my_charts(&params).await;
            let _ = completions.send(Completion { request, result });
        });
        self.in_flight = Some(InFlight { request, task });
    }

    fn settle(&mut self, done: Completion) {
        if done.request != self.last_request {
            tracing::warn!(request = done.request, latest = self.last_request, "dropping stale chart list response");
            return;
        }
        self.in_flight = None;

        match done.result.map_err(ServiceError::from).and_then(reconcile) {
            Ok(page) => {
                tracing::debug!(request = done.request, records = page.records.len(), total = page.total, "chart list applied");
                self.state.send_modify(|state| {
                    state.chart_list = page.records;
                    state.total = page.total;
                    state.busy = false;
                    state.applied_request = Some(done.request);
                    state.settled += 1;
                });
            },
            Err(e) => {
                tracing::warn!(request = done.request, error = %e, "chart list retrieval failed");
                let _ = self.notices.send(Notice::error(format!("{LOAD_FAILED_NOTICE}: {e}")));
                self.state.send_modify(|state| {
                    state.busy = false;
                    state.settled += 1;
                });
            },
        }
    }
}

/// A running board: the controller plus the driver task behind it.
///
/// Dropping the board stops the driver; a fetch already in flight finishes unobserved.
#[derive(Debug)]
pub struct ChartBoard {
    controller: QueryController,
    driver: JoinHandle<()>,
}

impl ChartBoard {
    /// Start a board and issue the first fetch for `initial`.
    ///
    /// `defaults` is what a name search resets to. Retrieval failures are broadcast on
    /// `notices`; subscribe before calling this to see the first fetch's outcome.
    #[must_use]
    pub fn spawn(
        service: Arc<dyn ChartQueryService>,
        defaults: QueryParams,
        initial: QueryParams,
        notices: broadcast::Sender<Notice>,
    ) -> Self {
        let (params_tx, params_rx) = watch::channel(initial.clone());
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let state = Arc::new(watch::Sender::new(BoardState::new(initial)));
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        let driver = BoardDriver {
            service,
            params: params_rx,
            refresh: refresh_rx,
            state: Arc::clone(&state),
            notices,
            completions_tx,
            completions_rx,
            last_request: 0,
            in_flight: None,
        };

        let controller = QueryController {
            defaults,
            params: Arc::new(params_tx),
            refresh: refresh_tx,
            state,
        };
        Self { controller, driver: tokio::spawn(driver.run()) }
    }

    #[must_use]
    pub const fn controller(&self) -> &QueryController {
        &self.controller
    }

    /// Wait until the fetch for the current parameters has settled.
    ///
    /// # Errors
    /// Returns [`ServiceError::Stopped`] if the driver exits first.
    pub async fn wait_idle(&self) -> Result<BoardState, ServiceError> {
        let params = self.controller.params();
        self.wait_until(|state| !state.busy && state.query == params).await
    }

    /// Wait until at least `settled` fetches have settled and none is outstanding.
    ///
    /// # Errors
    /// Returns [`ServiceError::Stopped`] if the driver exits first.
    pub async fn wait_settled(&self, settled: u64) -> Result<BoardState, ServiceError> {
        self.wait_until(|state| state.settled >= settled && !state.busy).await
    }

    async fn wait_until(
        &self,
        mut ready: impl FnMut(&BoardState) -> bool,
    ) -> Result<BoardState, ServiceError> {
        let mut rx = self.controller.watch_state();
        let state = rx.wait_for(|state| ready(state)).await.map_err(|_| ServiceError::Stopped)?;
        Ok(state.clone())
    }
}

impl Drop for ChartBoard {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
