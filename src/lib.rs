//! Batch downloader for the weekly PGN archives of The Week in Chess.
//!
//! Issues are fetched as `twic{id}g.zip`, the single `twic{id}.pgn` entry is
//! extracted next to it and the archive is removed again.

pub mod batch;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod fetch;
pub mod plan;
pub mod report;
pub mod resource;
pub mod unpack;

pub use batch::{Batch, BatchSummary, ItemOutcome, run};
pub use cleanup::cleanup;
pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{Fetch, Fetcher};
pub use plan::IdRange;
pub use report::write_report;
pub use resource::{Identifier, Resource};
pub use unpack::unpack;
