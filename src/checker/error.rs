// src/checker/error.rs
use mongodb::error::{Error as DriverError, ErrorKind};
use thiserror::Error;

/// Failure classes for a checklist run.
///
/// `Operation` means the server rejected a specific command; call sites
/// degrade those to a logged error or warning and keep going. `Connection`
/// covers transport-level failures (I/O, server selection, pool teardown)
/// and aborts the remainder of the checklist.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("connection failure: {0}")]
    Connection(#[source] DriverError),

    #[error("operation failure: {0}")]
    Operation(#[source] DriverError),
}

impl CheckError {
    pub fn is_operation_failure(&self) -> bool {
        matches!(self, CheckError::Operation(_))
    }
}

impl From<DriverError> for CheckError {
    fn from(err: DriverError) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Command(_) | ErrorKind::Write(_) | ErrorKind::Authentication { .. } => {
                CheckError::Operation(err)
            }
            _ => CheckError::Connection(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_command_errors_classify_as_connection() {
        let err = CheckError::from(DriverError::custom("simulated transport failure"));
        assert!(!err.is_operation_failure());
        assert!(matches!(err, CheckError::Connection(_)));
    }
}
