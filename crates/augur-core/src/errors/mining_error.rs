/// Rule mining errors.
#[derive(Debug, thiserror::Error)]
pub enum MiningError {
    #[error("label and numeric sequences differ in length: {labels} vs {numbers}")]
    SequenceMismatch { labels: usize, numbers: usize },
}
