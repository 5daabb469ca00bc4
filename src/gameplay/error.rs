use super::action::ActionKind;
use crate::Chips;

/// Why a table refused a request.
///
/// Every variant is raised before the table is touched,
/// except `Corrupt`, which aborts an application in progress
/// and leaves the previous state in place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("stale action index {given}, expected {expected}")]
    Stale { given: u64, expected: u64 },
    #[error("{kind} is not legal: {reason}")]
    Illegal { kind: ActionKind, reason: String },
    #[error("{kind} of {amount} outside [{min}, {max}]")]
    Bounds {
        kind: ActionKind,
        amount: Chips,
        min: Chips,
        max: Chips,
    },
    #[error("{0} holds no seat at this table")]
    Unseated(String),
    #[error("corrupt table state: {0}")]
    Corrupt(String),
}

impl Error {
    pub fn illegal(kind: ActionKind, reason: impl Into<String>) -> Self {
        Self::Illegal {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Self::Corrupt(e.to_string())
    }
}
