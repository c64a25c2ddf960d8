//! Pipeline error types.

use std::time::Duration;

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Publish rejected after {attempts} attempt(s): {reason}")]
    Rejected { reason: String, attempts: u32 },

    #[error("Publish failed after {attempts} attempt(s): {reason}")]
    Exhausted { reason: String, attempts: u32 },

    #[error("Publish timed out after {attempts} attempt(s) of {timeout:?}")]
    TimedOut { timeout: Duration, attempts: u32 },
}

impl PipelineError {
    /// Whether resubmitting later might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PipelineError::Exhausted { .. } | PipelineError::TimedOut { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            PipelineError::Rejected { attempts, .. }
            | PipelineError::Exhausted { attempts, .. }
            | PipelineError::TimedOut { attempts, .. } => *attempts,
        }
    }
}
