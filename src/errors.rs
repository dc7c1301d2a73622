use std::fmt::{Display, Error, Formatter};

use crate::domain::ExecutionError;

pub type ClosehookResult<T> = Result<T, ClosehookError>;

#[derive(Debug, PartialEq, Clone)]
pub enum ClosehookError {
    Execution(ExecutionError),
    Harness(HarnessError),
}

/// The harness bookkeeping itself went wrong, as opposed to the case under test failing. The
/// original drivers treat these as their own failure class and so do we.
#[derive(Debug, PartialEq, Clone)]
pub enum HarnessError {
    UnbalancedExit { expected: String, found: String },
    ExitWithoutEnter(String),
    DanglingEnter(String),
}

impl From<ExecutionError> for ClosehookError {
    fn from(e: ExecutionError) -> Self {
        ClosehookError::Execution(e)
    }
}

impl From<HarnessError> for ClosehookError {
    fn from(e: HarnessError) -> Self {
        ClosehookError::Harness(e)
    }
}

impl Display for ClosehookError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            ClosehookError::Execution(e) => write!(f, "Execution error: {e}"),
            ClosehookError::Harness(e) => write!(f, "Harness error: {e}"),
        }
    }
}

impl Display for HarnessError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            HarnessError::UnbalancedExit { expected, found } => {
                write!(f, "Expected to exit '{expected}', found '{found}'")
            }
            HarnessError::ExitWithoutEnter(name) => {
                write!(f, "Exited '{name}' without entering it")
            }
            HarnessError::DanglingEnter(name) => {
                write!(f, "Entered '{name}' without exiting it")
            }
        }
    }
}
