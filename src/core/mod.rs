mod container;
mod log;

pub use container::{Container, Storable};
#[allow(unused_imports)]
pub use log::{log, LogLevel};
