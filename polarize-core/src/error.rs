use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid player level: caps must be positive (normal={normal_limit}, phase={phase_limit})")]
    InvalidPlayerLevel { normal_limit: f64, phase_limit: f64 },
}
