//! Persistence error type

use sqlx::error::BoxDynError;

use super::unit_of_work::TxState;

/// Any failure below the API boundary.
///
/// Repositories and the gateway return these unmodified; only the HTTP layer
/// turns them into responses.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("statement references @{name} but no such parameter was bound")]
    UnboundParameter { name: String },

    #[error("parameter @{name} bound more than once")]
    DuplicateParameter { name: &'static str },

    #[error("failed to bind parameter @{name}: {source}")]
    Bind {
        name: &'static str,
        #[source]
        source: BoxDynError,
    },

    #[error("statement returned no rows")]
    NoRows,

    #[error("a transaction is already active on this session")]
    TransactionAlreadyActive,

    #[error("no transaction is active on this session")]
    NoActiveTransaction,

    #[error("cannot {op} a transaction in state {from}")]
    InvalidTransition { from: TxState, op: &'static str },
}
