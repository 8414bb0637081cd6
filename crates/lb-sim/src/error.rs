use lb_core::LbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("traffic model error: {0}")]
    Traffic(#[from] LbError),
}

pub type SimResult<T> = Result<T, SimError>;
