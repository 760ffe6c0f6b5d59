use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::query::Query;

/// Message the record store reports when a single-row query matches zero or
/// several rows
pub const SINGLE_ROW_MISMATCH: &str = "JSON object requested, multiple (or no) rows returned";

/// Errors reported by the record store
///
/// `Display` yields the store's own message so it can be surfaced verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or the exchange broke down
    #[error("{0}")]
    Transport(String),

    /// The store answered and refused the query
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The store answered with rows that do not have the expected shape
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Query interface of the external record store
///
/// One call performs one statement. Selects return the matching rows; writes
/// return the affected rows when the query asks for them and an empty set
/// otherwise. Transport, authentication and serialization are the
/// implementation's business.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn execute(&self, query: Query) -> StoreResult<Vec<Value>>;
}
