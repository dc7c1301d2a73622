mod cases;
mod closehook;
#[cfg(test)]
mod conformance;
mod core;
mod domain;
mod errors;
mod harness;
mod host;
mod runtime;
#[cfg(feature = "wasm")]
mod wasm;

pub use closehook::Closehook;
pub use domain::{ExecutionError, Value};
pub use errors::{ClosehookError, ClosehookResult, HarnessError};
pub use harness::{AlertHandle, Outcome, TestDriver};
pub use host::Host;
pub use runtime::{CellRef, GenRef, GenState, GeneratorIterator, HeapStats, RunResult, Runtime};
