//! resc-rules Library
//!
//! Client for the rules and findings API of a RESC backend: listing detected
//! rules, per-rule finding status counts, and listing, uploading and
//! downloading rule packs.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod query;
pub mod transport;

pub use error::RulesClientError;
pub use providers::rules::RuleService;
pub use providers::RulesApi;
pub use query::QueryParams;
pub use transport::{RequestOptions, Transport, TransportConfig};
