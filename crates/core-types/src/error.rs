use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Price series is not strictly ordered by timestamp at index {0}")]
    UnorderedSeries(usize),

    #[error("Invalid close price {1} at index {0}: prices must be positive and finite")]
    InvalidPrice(usize, f64),

    #[error("Invalid volume {1} at index {0}: volume must be non-negative and finite")]
    InvalidVolume(usize, f64),
}
