mod generator;
mod heap;
pub(crate) mod macros;
mod result;
#[allow(clippy::module_inception)]
mod runtime;

pub use generator::{GenRef, GenState, GeneratorIterator};
pub use heap::{CellRef, HeapStats};
pub use result::RunResult;
pub use runtime::Runtime;
