use std::fmt::{Display, Error, Formatter};

/// The one condition the runtime raises on its own: a generator with nothing left to yield. It is
/// how exhaustion, explicit disposal, and resume-after-close all present to the caller. Anything
/// else that goes wrong inside the runtime is a fault (a panic), not an error value.
#[derive(Debug, PartialEq, Clone)]
pub enum ExecutionError {
    StopIteration,
}

impl Display for ExecutionError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            ExecutionError::StopIteration => write!(f, "StopIteration"),
        }
    }
}
