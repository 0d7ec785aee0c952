use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Not enough data to perform calculation: {0}")]
    InsufficientData(String),
}
