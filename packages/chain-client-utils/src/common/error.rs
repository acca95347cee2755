/// error type to be returned by all client types.
#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    #[error("client error: {0}")]
    ClientError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("transaction error: {0}")]
    TransactionError(String),
    /// The transaction was broadcast but has not appeared on chain within
    /// the polling budget. Not a failure verdict; the tx may still land.
    #[error("transaction {0} not found on chain yet")]
    TransactionPending(String),
}
