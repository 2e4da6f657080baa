//! Span definitions per operation: ingest, cycle, mining.

/// Span around one feed fetch and ingest.
#[macro_export]
macro_rules! ingest_span {
    ($url:expr) => {
        tracing::info_span!("augur.ingest", url = %$url)
    };
}

/// Span around one per-mode prediction cycle.
#[macro_export]
macro_rules! cycle_span {
    ($mode:expr, $history_len:expr) => {
        tracing::info_span!("augur.cycle", mode = %$mode, history_len = $history_len)
    };
}

/// Span around one mining pass.
#[macro_export]
macro_rules! mining_span {
    ($mode:expr, $sequence_len:expr) => {
        tracing::info_span!("augur.mining", mode = %$mode, sequence_len = $sequence_len)
    };
}
