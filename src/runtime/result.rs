use crate::domain::ExecutionError;

/// Raised runtime errors, used in the upper levels of the runtime. A generator fault that is not
/// representable here (a panicking close hook, say) propagates as a panic instead.
pub type RunResult<T> = Result<T, ExecutionError>;
