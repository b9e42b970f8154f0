use thiserror::Error;

use super::state::Stage;

/// Why an input was ignored. Ignored inputs never change state.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    #[error("input for the {expected:?} stage while in {actual:?}")]
    WrongStage { expected: Stage, actual: Stage },
    #[error("target {0} does not exist in this stage")]
    UnknownTarget(u8),
    #[error("target {0} was already resolved")]
    AlreadyResolved(u8),
    #[error("session already started")]
    AlreadyStarted,
}
