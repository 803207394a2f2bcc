//! Service layer for chartboard
//!
//! Turns user edits of the listing parameters into fetches, reconciles each fetched
//! page into view state, and renders that state as cards.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod board;
mod controller;
mod error;
mod reconcile;
mod renderer;
mod state;
mod view;

pub use board::render_board;
pub use controller::{ChartBoard, QueryController};
pub use error::ServiceError;
pub use reconcile::{normalize_record, reconcile};
pub use renderer::{ChartRenderer, EMPTY_CANVAS, TextChartRenderer};
pub use state::{BoardState, Notice, NoticeLevel};
pub use view::{CardView, ItemView, Severity, render_item};
