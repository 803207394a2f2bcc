//! Core types for chartboard
//!
//! Domain types shared by the client, the service layer and the CLI.

mod chart;
mod chart_spec;
pub mod constants;
mod env_config;
mod error;
mod identity;
mod page;
mod query;

pub use chart::*;
pub use chart_spec::*;
pub use env_config::*;
pub use error::*;
pub use identity::*;
pub use page::*;
pub use query::*;
