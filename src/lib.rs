//! a persistent book of short quotes with community votes and near-duplicate
//! suppression, stored in a single SQLite file.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod similarity;
pub mod telemetry;

mod queries;
mod quotes;
mod schema;
mod store;
mod votes;

pub use config::Config;
pub use error::{ConfigError, StoreError};
pub use models::{AddOutcome, NewQuote, Quote, Rejection, ScoredQuote, Vote, VoteValue};
pub use store::Store;
