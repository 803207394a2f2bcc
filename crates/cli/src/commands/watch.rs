use std::time::Duration;

use anyhow::Result;
use chartboard_service::{BoardState, ChartBoard, QueryController, TextChartRenderer, render_board};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::commands::initial_params;
use crate::config::Settings;

const HELP: &str = "type a name and press enter to search (empty line clears the search)\n\
                    :page N [SIZE]  go to page N   :next / :prev  move one page\n\
                    :refresh        reload         :quit          leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Search(String),
    Page { page: u32, page_size: Option<u32> },
    Next,
    Prev,
    Refresh,
    Help,
    Quit,
    Invalid(String),
}

pub(crate) fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Input::Search(line.to_owned());
    };

    let mut words = command.split_whitespace();
    match words.next().unwrap_or("") {
        "page" | "p" => {
            let page = words.next().and_then(|w| w.parse().ok());
            let page_size = match words.next() {
                Some(w) => match w.parse() {
                    Ok(size) => Some(size),
                    Err(_) => return Input::Invalid(format!("not a page size: {w}")),
                },
                None => None,
            };
            match page {
                Some(page) => Input::Page { page, page_size },
                None => Input::Invalid("usage: :page N [SIZE]".to_owned()),
            }
        },
        "next" | "n" => Input::Next,
        "prev" => Input::Prev,
        "refresh" | "r" => Input::Refresh,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => Input::Invalid(format!("unknown command :{other}")),
    }
}

pub(crate) async fn run(settings: &Settings, name: Option<&str>, poll_secs: u64) -> Result<()> {
    let initial = initial_params(settings, name, 1, None)?;
    let (notices_tx, mut notices) = broadcast::channel(16);
    let board = ChartBoard::spawn(settings.client()?, settings.default_params(), initial, notices_tx);
    let controller = board.controller();
    let identity = settings.identity();

    let mut state_rx = controller.watch_state();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut poll = tokio::time::interval(Duration::from_secs(poll_secs.max(1)));
    let polling = poll_secs > 0;
    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !apply_input(controller, parse_input(&line))? {
                    break;
                }
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                if state.busy {
                    eprintln!("loading...");
                } else {
                    print!("{}", render_board(&state, &identity, &TextChartRenderer));
                }
            }
            notice = notices.recv() => match notice {
                Ok(notice) => eprintln!("! {}", notice.message),
                Err(RecvError::Lagged(skipped)) => tracing::warn!(skipped, "missed notices"),
                Err(RecvError::Closed) => break,
            },
            _ = poll.tick(), if polling => {
                if should_poll(&controller.snapshot()) {
                    tracing::debug!("jobs still generating, reloading");
                    controller.refresh()?;
                }
            }
        }
    }
    Ok(())
}

fn should_poll(state: &BoardState) -> bool {
    !state.busy && state.has_pending()
}

/// Returns `false` when the user asked to leave.
fn apply_input(controller: &QueryController, input: Input) -> Result<bool> {
    let params = controller.params();
    match input {
        Input::Search(text) => {
            if !controller.set_filter(&text) {
                println!("(already showing that search)");
            }
        },
        Input::Page { page, page_size } => {
            let size = page_size.unwrap_or(params.page_size.get());
            if let Err(e) = controller.set_page(page, size) {
                eprintln!("! {e}");
            }
        },
        Input::Next => {
            let total_pages = controller.snapshot().page_count();
            let next = params.current.get().saturating_add(1);
            if u64::from(next) > total_pages {
                println!("(already on the last page)");
            } else {
                controller.set_page(next, params.page_size.get())?;
            }
        },
        Input::Prev => {
            if params.current.get() == 1 {
                println!("(already on the first page)");
            } else {
                controller.set_page(params.current.get() - 1, params.page_size.get())?;
            }
        },
        Input::Refresh => controller.refresh()?,
        Input::Help => println!("{HELP}"),
        Input::Quit => return Ok(false),
        Input::Invalid(message) => eprintln!("! {message}"),
    }
    Ok(true)
}
