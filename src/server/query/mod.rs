//! Declarative query composition with a deduplicating result cache.
//!
//! A [`QueryConfig`] names a table, a column selection, an optional order, a single filter
//! and any number of embedded relations. [`QueryBuilder`] turns a validated configuration
//! into SQL for the connection's backend and embeds related rows as nested JSON.
//! [`QueryCache`] keys results by [`QueryConfig::cache_key`] so concurrent callers with the
//! same configuration share one in-flight request.

pub mod builder;
pub mod cache;
pub mod config;

pub use builder::QueryBuilder;
pub use cache::{QueryCache, QueryState};
pub use config::{Filter, Operator, OrderBy, QueryConfig, Relation, ResolvedQuery, Table};
