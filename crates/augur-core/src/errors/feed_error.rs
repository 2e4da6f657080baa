/// Upstream feed errors. Any of these aborts the invocation.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("feed returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("malformed feed payload: {reason}")]
    Malformed { reason: String },

    #[error("all {attempts} feed attempts failed: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}
